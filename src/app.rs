use std::sync::Arc;

use crate::ai::{AiGateway, GeminiHttpClient, GenerativeClient};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::notify::Notifier;
use crate::panels::{DoubtResolverPanel, NoteEditorPanel, PyqAnalyzerPanel, TaskManagerPanel};
use crate::store::{RecordStore, StudyStore};

/// Top-level application context. Owns the shared store and the gateway and
/// hands the four panels out to whatever frontend drives them.
pub struct App {
    store: Arc<StudyStore>,
    tasks: TaskManagerPanel,
    notes: NoteEditorPanel,
    pyq: PyqAnalyzerPanel,
    doubt: DoubtResolverPanel,
}

impl App {
    pub async fn bootstrap(
        config: AppConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let client = Arc::new(GeminiHttpClient::new(config.gemini.clone())?);
        Self::with_client(&config, client, notifier).await
    }

    /// Same wiring with an explicit client implementation, for embedders that
    /// bring their own transport and for tests.
    pub async fn with_client(
        config: &AppConfig,
        client: Arc<dyn GenerativeClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let repo = RecordStore::connect(&config.database_url).await?;
        let store = Arc::new(StudyStore::open(repo).await?);
        let gateway = Arc::new(AiGateway::new(client, Arc::clone(&notifier)));

        Ok(Self {
            tasks: TaskManagerPanel::new(
                Arc::clone(&store),
                Arc::clone(&gateway),
                Arc::clone(&notifier),
            ),
            notes: NoteEditorPanel::new(
                Arc::clone(&store),
                Arc::clone(&gateway),
                Arc::clone(&notifier),
            ),
            pyq: PyqAnalyzerPanel::new(Arc::clone(&gateway), Arc::clone(&notifier)),
            doubt: DoubtResolverPanel::new(
                Arc::clone(&store),
                Arc::clone(&gateway),
                Arc::clone(&notifier),
            ),
            store,
        })
    }

    pub fn store(&self) -> &Arc<StudyStore> {
        &self.store
    }

    pub fn tasks(&self) -> &TaskManagerPanel {
        &self.tasks
    }

    pub fn notes(&self) -> &NoteEditorPanel {
        &self.notes
    }

    pub fn pyq(&self) -> &PyqAnalyzerPanel {
        &self.pyq
    }

    pub fn doubt(&self) -> &DoubtResolverPanel {
        &self.doubt
    }
}
