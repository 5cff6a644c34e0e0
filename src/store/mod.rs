pub mod repository;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};

use crate::error::AppError;
use crate::models::{Note, Task};

pub use repository::{NOTES_KEY, RecordStore, TASKS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    TasksChanged,
    NotesChanged,
}

/// The one shared copy of both collections. Panels read and mutate through
/// this instance instead of keeping their own; every mutation is mirrored to
/// the durable store before it becomes visible in memory, and publishes a
/// change event for anyone subscribed.
pub struct StudyStore {
    repo: RecordStore,
    tasks: RwLock<Vec<Task>>,
    notes: RwLock<Vec<Note>>,
    events: broadcast::Sender<StoreEvent>,
}

impl StudyStore {
    pub async fn open(repo: RecordStore) -> Result<Self, AppError> {
        let tasks = repo.load::<Task>(TASKS_KEY).await?;
        let notes = repo.load::<Note>(NOTES_KEY).await?;
        let (events, _) = broadcast::channel(16);

        Ok(Self {
            repo,
            tasks: RwLock::new(tasks),
            notes: RwLock::new(notes),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn notes(&self) -> Vec<Note> {
        self.notes.read().await.clone()
    }

    pub async fn add_task(
        &self,
        title: String,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Task, AppError> {
        let task = Task::new(title, due_date);

        let mut tasks = self.tasks.write().await;
        let mut next = tasks.clone();
        next.push(task.clone());
        self.repo.save(TASKS_KEY, &next).await?;
        *tasks = next;
        drop(tasks);

        let _ = self.events.send(StoreEvent::TasksChanged);
        Ok(task)
    }

    /// Bulk append for AI-generated study plans; one task per title, fresh
    /// ids, not completed, no due date.
    pub async fn append_tasks(&self, titles: Vec<String>) -> Result<Vec<Task>, AppError> {
        let appended: Vec<Task> = titles
            .into_iter()
            .map(|title| Task::new(title, None))
            .collect();

        let mut tasks = self.tasks.write().await;
        let mut next = tasks.clone();
        next.extend(appended.iter().cloned());
        self.repo.save(TASKS_KEY, &next).await?;
        *tasks = next;
        drop(tasks);

        let _ = self.events.send(StoreEvent::TasksChanged);
        Ok(appended)
    }

    /// Missing id is a no-op and reads as `None`.
    pub async fn toggle_task(&self, id: &str) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            return Ok(None);
        };

        let mut next = tasks.clone();
        next[index].completed = !next[index].completed;
        self.repo.save(TASKS_KEY, &next).await?;
        *tasks = next;
        let toggled = tasks[index].clone();
        drop(tasks);

        let _ = self.events.send(StoreEvent::TasksChanged);
        Ok(Some(toggled))
    }

    /// Returns whether a record was removed; deleting a missing id is a no-op.
    pub async fn remove_task(&self, id: &str) -> Result<bool, AppError> {
        let mut tasks = self.tasks.write().await;
        if !tasks.iter().any(|task| task.id == id) {
            return Ok(false);
        }

        let next: Vec<Task> = tasks.iter().filter(|task| task.id != id).cloned().collect();
        self.repo.save(TASKS_KEY, &next).await?;
        *tasks = next;
        drop(tasks);

        let _ = self.events.send(StoreEvent::TasksChanged);
        Ok(true)
    }

    pub async fn add_note(
        &self,
        title: String,
        content: String,
        subject: String,
        summary: Option<String>,
    ) -> Result<Note, AppError> {
        let mut note = Note::new(title, content, subject);
        note.summary = summary;

        let mut notes = self.notes.write().await;
        let mut next = notes.clone();
        next.push(note.clone());
        self.repo.save(NOTES_KEY, &next).await?;
        *notes = next;
        drop(notes);

        let _ = self.events.send(StoreEvent::NotesChanged);
        Ok(note)
    }

    /// A content edit clears any stored summary; the summary derives from the
    /// content and must not outlive it.
    pub async fn update_note(
        &self,
        id: &str,
        title: String,
        content: String,
        subject: String,
    ) -> Result<Option<Note>, AppError> {
        let mut notes = self.notes.write().await;
        let Some(index) = notes.iter().position(|note| note.id == id) else {
            return Ok(None);
        };

        let mut next = notes.clone();
        {
            let note = &mut next[index];
            if note.content != content {
                note.summary = None;
            }
            note.title = title;
            note.content = content;
            note.subject = subject;
        }
        self.repo.save(NOTES_KEY, &next).await?;
        *notes = next;
        let updated = notes[index].clone();
        drop(notes);

        let _ = self.events.send(StoreEvent::NotesChanged);
        Ok(Some(updated))
    }

    pub async fn set_note_summary(
        &self,
        id: &str,
        summary: String,
    ) -> Result<Option<Note>, AppError> {
        let mut notes = self.notes.write().await;
        let Some(index) = notes.iter().position(|note| note.id == id) else {
            return Ok(None);
        };

        let mut next = notes.clone();
        next[index].summary = Some(summary);
        self.repo.save(NOTES_KEY, &next).await?;
        *notes = next;
        let updated = notes[index].clone();
        drop(notes);

        let _ = self.events.send(StoreEvent::NotesChanged);
        Ok(Some(updated))
    }

    pub async fn remove_note(&self, id: &str) -> Result<bool, AppError> {
        let mut notes = self.notes.write().await;
        if !notes.iter().any(|note| note.id == id) {
            return Ok(false);
        }

        let next: Vec<Note> = notes.iter().filter(|note| note.id != id).cloned().collect();
        self.repo.save(NOTES_KEY, &next).await?;
        *notes = next;
        drop(notes);

        let _ = self.events.send(StoreEvent::NotesChanged);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    async fn open_store() -> StudyStore {
        let repo = RecordStore::in_memory().await.expect("connect");
        StudyStore::open(repo).await.expect("open")
    }

    #[tokio::test]
    async fn add_task_appends_one_fresh_record() {
        let store = open_store().await;
        let first = store.add_task("Read chapter 3".to_string(), None).await.unwrap();
        let second = store.add_task("Solve problems".to_string(), None).await.unwrap();

        let tasks = store.tasks().await;
        assert_eq!(tasks.len(), 2);
        assert_ne!(first.id, second.id);
        assert_eq!(tasks[0].id, first.id);
        assert_eq!(tasks[1].id, second.id);
        assert!(!tasks[0].completed);
        assert!(!tasks[1].completed);
    }

    #[tokio::test]
    async fn remove_task_deletes_exactly_the_match() {
        let store = open_store().await;
        let keep = store.add_task("keep".to_string(), None).await.unwrap();
        let drop_me = store.add_task("drop".to_string(), None).await.unwrap();

        assert!(store.remove_task(&drop_me.id).await.unwrap());
        let tasks = store.tasks().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, keep.id);

        // Deleting an unknown id changes nothing.
        assert!(!store.remove_task("no-such-id").await.unwrap());
        assert_eq!(store.tasks().await.len(), 1);
    }

    #[tokio::test]
    async fn toggle_twice_restores_the_original_record() {
        let store = open_store().await;
        let due = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        let task = store
            .add_task("Flashcards".to_string(), Some(due))
            .await
            .unwrap();

        let toggled = store.toggle_task(&task.id).await.unwrap().unwrap();
        assert!(toggled.completed);

        let restored = store.toggle_task(&task.id).await.unwrap().unwrap();
        assert_eq!(restored, task);

        assert_eq!(store.toggle_task("no-such-id").await.unwrap(), None);
    }

    #[tokio::test]
    async fn collections_survive_reopen_with_instants_intact() {
        let repo = RecordStore::in_memory().await.expect("connect");
        let due = Utc.with_ymd_and_hms(2026, 3, 15, 23, 59, 59).unwrap();

        let store = StudyStore::open(repo.clone()).await.expect("open");
        let task = store.add_task("Past papers".to_string(), Some(due)).await.unwrap();
        let note = store
            .add_note(
                "Electrostatics".to_string(),
                "Coulomb's law and field lines".to_string(),
                "Physics".to_string(),
                None,
            )
            .await
            .unwrap();
        drop(store);

        let reopened = StudyStore::open(repo).await.expect("reopen");
        let tasks = reopened.tasks().await;
        let notes = reopened.notes().await;

        assert_eq!(tasks, vec![task]);
        assert_eq!(notes, vec![note.clone()]);
        assert_eq!(tasks[0].due_date, Some(due));
        assert_eq!(notes[0].created_at, note.created_at);
    }

    #[tokio::test]
    async fn content_edit_clears_the_summary() {
        let store = open_store().await;
        let note = store
            .add_note(
                "Cell biology".to_string(),
                "Mitochondria".to_string(),
                "Biology".to_string(),
                None,
            )
            .await
            .unwrap();

        store
            .set_note_summary(&note.id, "Powerhouse".to_string())
            .await
            .unwrap();

        // Touching title or subject keeps the summary.
        let renamed = store
            .update_note(
                &note.id,
                "Cell biology II".to_string(),
                "Mitochondria".to_string(),
                "Biology".to_string(),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.summary.as_deref(), Some("Powerhouse"));

        // Editing the content invalidates it.
        let edited = store
            .update_note(
                &note.id,
                "Cell biology II".to_string(),
                "Mitochondria and ribosomes".to_string(),
                "Biology".to_string(),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edited.summary, None);
    }

    #[tokio::test]
    async fn append_tasks_preserves_input_order() {
        let store = open_store().await;
        store.add_task("existing".to_string(), None).await.unwrap();

        let appended = store
            .append_tasks(vec!["one".to_string(), "two".to_string(), "three".to_string()])
            .await
            .unwrap();
        assert_eq!(appended.len(), 3);

        let tasks = store.tasks().await;
        let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, vec!["existing", "one", "two", "three"]);
    }

    #[tokio::test]
    async fn mutations_publish_change_events() {
        let store = open_store().await;
        let mut events = store.subscribe();

        store.add_task("watch me".to_string(), None).await.unwrap();
        assert_eq!(events.recv().await.unwrap(), StoreEvent::TasksChanged);

        store
            .add_note(
                "n".to_string(),
                "c".to_string(),
                "Other".to_string(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(events.recv().await.unwrap(), StoreEvent::NotesChanged);
    }
}
