use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::ai::{AiGateway, ChatTurn, prompts};
use crate::error::AppError;
use crate::models::{Note, Task};
use crate::notify::Notifier;
use crate::store::StudyStore;

use super::{Activity, ActivityCell};

const GREETING: &str =
    "Hi! I'm your AI study assistant. How can I help you with your studies today?";

pub const DEFAULT_SUBJECT: &str = "General";

/// Conversational assistant. Keeps the transcript in memory only; anything
/// worth keeping is saved into the shared collections explicitly.
pub struct DoubtResolverPanel {
    store: Arc<StudyStore>,
    gateway: Arc<AiGateway>,
    notifier: Arc<dyn Notifier>,
    replying: ActivityCell,
    summarizing: ActivityCell,
    transcript: RwLock<Vec<ChatTurn>>,
    subject: RwLock<String>,
}

impl DoubtResolverPanel {
    pub(crate) fn new(
        store: Arc<StudyStore>,
        gateway: Arc<AiGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            gateway,
            notifier,
            replying: ActivityCell::new(),
            summarizing: ActivityCell::new(),
            transcript: RwLock::new(vec![ChatTurn::model(GREETING)]),
            subject: RwLock::new(DEFAULT_SUBJECT.to_string()),
        }
    }

    pub fn replying_state(&self) -> Activity {
        self.replying.state()
    }

    pub async fn transcript(&self) -> Vec<ChatTurn> {
        self.transcript.read().await.clone()
    }

    pub async fn subject(&self) -> String {
        self.subject.read().await.clone()
    }

    pub async fn set_subject(&self, subject: &str) {
        *self.subject.write().await = subject.to_string();
    }

    /// Records the question, asks for a reply, records the reply. Blank input
    /// is ignored; on gateway failure the question stays in the transcript
    /// without an answer.
    pub async fn send(&self, question: &str) -> Result<Option<String>, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let _guard = self.replying.try_begin()?;

        self.transcript.write().await.push(ChatTurn::user(question));

        let subject = self.subject.read().await.clone();
        let Some(reply) = self
            .gateway
            .generate(&prompts::resolve_doubt(question, &subject))
            .await
        else {
            return Ok(None);
        };

        self.transcript
            .write()
            .await
            .push(ChatTurn::model(reply.clone()));
        Ok(Some(reply))
    }

    /// Saves a piece of the conversation as a task in the shared store.
    pub async fn save_reply_as_task(
        &self,
        title: &str,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Task, AppError> {
        if title.trim().is_empty() {
            self.notifier.error("Task title cannot be empty");
            return Err(AppError::Validation(
                "Task title cannot be empty".to_string(),
            ));
        }

        let task = self.store.add_task(title.to_string(), due_date).await?;
        self.notifier.success("Task added successfully");
        Ok(task)
    }

    /// Summarizes selected conversation text. No length threshold on this
    /// path; the selection was already produced by the model.
    pub async fn summarize_selection(&self, selection: &str) -> Result<Option<String>, AppError> {
        let _guard = self.summarizing.try_begin()?;
        Ok(self
            .gateway
            .generate(&prompts::summarize_notes(selection))
            .await)
    }

    /// Saves selected conversation text as a note, optionally with a summary
    /// produced by `summarize_selection`.
    pub async fn save_selection_as_note(
        &self,
        title: &str,
        subject: &str,
        content: &str,
        summary: Option<String>,
    ) -> Result<Note, AppError> {
        if title.trim().is_empty() {
            self.notifier.error("Note title cannot be empty");
            return Err(AppError::Validation(
                "Note title cannot be empty".to_string(),
            ));
        }

        let note = self
            .store
            .add_note(
                title.to_string(),
                content.to_string(),
                subject.to_string(),
                summary,
            )
            .await?;
        self.notifier.success("Note saved successfully");
        Ok(note)
    }
}
