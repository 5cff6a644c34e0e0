use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::ai::{AiGateway, prompts};
use crate::error::AppError;
use crate::models::Task;
use crate::notify::Notifier;
use crate::store::StudyStore;

use super::{Activity, ActivityCell};

/// Task CRUD plus AI-generated study plans sourced from the note collection.
pub struct TaskManagerPanel {
    store: Arc<StudyStore>,
    gateway: Arc<AiGateway>,
    notifier: Arc<dyn Notifier>,
    planning: ActivityCell,
}

impl TaskManagerPanel {
    pub(crate) fn new(
        store: Arc<StudyStore>,
        gateway: Arc<AiGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            gateway,
            notifier,
            planning: ActivityCell::new(),
        }
    }

    pub fn planning_state(&self) -> Activity {
        self.planning.state()
    }

    pub async fn add_task(
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

    pub async fn toggle_task(&self, id: &str) -> Result<Option<Task>, AppError> {
        self.store.toggle_task(id).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        if self.store.remove_task(id).await? {
            self.notifier.info("Task removed");
        }
        Ok(())
    }

    /// One gateway call over the whole note collection; each non-empty line of
    /// the reply becomes one task, in reply order. An absent reply appends
    /// nothing (the gateway has already notified).
    pub async fn plan_study_tasks(&self) -> Result<Vec<Task>, AppError> {
        let notes = self.store.notes().await;
        if notes.is_empty() {
            self.notifier
                .error("No notes available to generate study plan");
            return Err(AppError::Validation(
                "No notes available to generate study plan".to_string(),
            ));
        }

        let _guard = self.planning.try_begin()?;

        let Some(reply) = self.gateway.generate(&prompts::plan_study_tasks(&notes)).await else {
            return Ok(Vec::new());
        };

        let titles: Vec<String> = reply
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if titles.len() != notes.len() {
            warn!(
                expected = notes.len(),
                received = titles.len(),
                "study plan line count does not match note count"
            );
        }

        let tasks = self.store.append_tasks(titles).await?;
        self.notifier
            .success(&format!("Generated {} study tasks", tasks.len()));
        Ok(tasks)
    }
}
