use std::sync::Arc;

use crate::ai::{AiGateway, prompts};
use crate::error::AppError;
use crate::models::Note;
use crate::notify::Notifier;
use crate::store::StudyStore;

use super::{Activity, ActivityCell};

/// Minimum note content length before a summary request leaves the device.
pub const MIN_SUMMARY_CONTENT_CHARS: usize = 50;

pub struct NoteEditorPanel {
    store: Arc<StudyStore>,
    gateway: Arc<AiGateway>,
    notifier: Arc<dyn Notifier>,
    summarizing: ActivityCell,
}

impl NoteEditorPanel {
    pub(crate) fn new(
        store: Arc<StudyStore>,
        gateway: Arc<AiGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            gateway,
            notifier,
            summarizing: ActivityCell::new(),
        }
    }

    pub fn summarizing_state(&self) -> Activity {
        self.summarizing.state()
    }

    pub async fn create_note(
        &self,
        title: &str,
        content: &str,
        subject: &str,
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
                None,
            )
            .await?;
        self.notifier.success("Note created successfully");
        Ok(note)
    }

    pub async fn update_note(
        &self,
        id: &str,
        title: &str,
        content: &str,
        subject: &str,
    ) -> Result<Note, AppError> {
        if title.trim().is_empty() {
            self.notifier.error("Note title cannot be empty");
            return Err(AppError::Validation(
                "Note title cannot be empty".to_string(),
            ));
        }

        match self
            .store
            .update_note(
                id,
                title.to_string(),
                content.to_string(),
                subject.to_string(),
            )
            .await?
        {
            Some(note) => {
                self.notifier.success("Note updated successfully");
                Ok(note)
            }
            None => Err(AppError::NotFound),
        }
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), AppError> {
        if self.store.remove_note(id).await? {
            self.notifier.info("Note deleted");
        }
        Ok(())
    }

    /// Summarizes the note's current content and stores the result on the
    /// note. Content under the threshold is refused before any network call.
    pub async fn generate_summary(&self, id: &str) -> Result<Option<String>, AppError> {
        let note = self
            .store
            .notes()
            .await
            .into_iter()
            .find(|note| note.id == id)
            .ok_or(AppError::NotFound)?;

        if note.content.trim().chars().count() < MIN_SUMMARY_CONTENT_CHARS {
            self.notifier
                .error("Please add more content to generate a summary");
            return Err(AppError::Validation(
                "Please add more content to generate a summary".to_string(),
            ));
        }

        let _guard = self.summarizing.try_begin()?;

        let Some(summary) = self
            .gateway
            .generate(&prompts::summarize_notes(&note.content))
            .await
        else {
            return Ok(None);
        };

        self.store.set_note_summary(id, summary.clone()).await?;
        self.notifier.success("Summary generated successfully");
        Ok(Some(summary))
    }
}
