use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ai::{AiGateway, prompts};
use crate::error::AppError;
use crate::notify::Notifier;

use super::{Activity, ActivityCell};

/// Minimum pasted-questions length before an analysis request is made.
pub const MIN_QUESTIONS_CHARS: usize = 20;

/// Previous-year-question analysis. Nothing here touches the store; the panel
/// only keeps its latest analysis for re-display.
pub struct PyqAnalyzerPanel {
    gateway: Arc<AiGateway>,
    notifier: Arc<dyn Notifier>,
    analyzing: ActivityCell,
    last_analysis: RwLock<Option<String>>,
}

impl PyqAnalyzerPanel {
    pub(crate) fn new(gateway: Arc<AiGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            analyzing: ActivityCell::new(),
            last_analysis: RwLock::new(None),
        }
    }

    pub fn analyzing_state(&self) -> Activity {
        self.analyzing.state()
    }

    pub async fn last_analysis(&self) -> Option<String> {
        self.last_analysis.read().await.clone()
    }

    pub async fn analyze(
        &self,
        questions: &str,
        subject: &str,
    ) -> Result<Option<String>, AppError> {
        if questions.trim().chars().count() < MIN_QUESTIONS_CHARS {
            self.notifier.error("Please add more questions to analyze");
            return Err(AppError::Validation(
                "Please add more questions to analyze".to_string(),
            ));
        }

        let _guard = self.analyzing.try_begin()?;

        // The previous analysis is discarded as soon as a new run starts.
        *self.last_analysis.write().await = None;

        let Some(analysis) = self
            .gateway
            .generate(&prompts::analyze_questions(questions, subject))
            .await
        else {
            return Ok(None);
        };

        *self.last_analysis.write().await = Some(analysis.clone());
        self.notifier.success("Analysis completed successfully");
        Ok(Some(analysis))
    }
}
