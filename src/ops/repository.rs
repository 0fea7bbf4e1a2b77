use std::path::{Path, PathBuf};

use crate::io::document::{JsonDocument, StoreError};
use crate::io::lock::{DataLock, LockError};
use crate::model::item::{Event, EventDraft, Item, ItemDraft, ItemKind, Task, TaskDraft};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("id prefix '{prefix}' matches more than one item: {matches:?}")]
    AmbiguousId { prefix: String, matches: Vec<String> },
}

/// Orchestrates the two item documents behind one data directory.
///
/// Tasks and events live in separate whole-document JSON stores; every
/// mutating operation takes the directory's advisory file lock for its
/// read-modify-write cycle, then delegates to the matching document.
/// Callers replace their in-memory collections only with what a successful
/// operation returns — nothing is applied optimistically.
pub struct Repository {
    data_dir: PathBuf,
    tasks: JsonDocument<Task>,
    events: JsonDocument<Event>,
}

impl Repository {
    pub fn open(data_dir: &Path) -> Self {
        Repository {
            data_dir: data_dir.to_path_buf(),
            tasks: JsonDocument::new(data_dir.join(ItemKind::Task.document_name())),
            events: JsonDocument::new(data_dir.join(ItemKind::Event.document_name())),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Establish both documents, leaving existing collections untouched.
    pub fn initialize(&self) -> Result<(), RepoError> {
        let _lock = self.lock()?;
        self.tasks.initialize_if_absent()?;
        self.events.initialize_if_absent()?;
        Ok(())
    }

    // --- Tasks ---

    /// Load the task collection, establishing an empty document when it is
    /// missing or unparsable. Plain reads skip the lock; re-establishing a
    /// document is a write and takes it.
    pub fn load_tasks(&self) -> Result<Vec<Task>, RepoError> {
        if let Some(tasks) = self.tasks.load() {
            return Ok(tasks);
        }
        let _lock = self.lock()?;
        Ok(self.tasks.initialize_if_absent()?)
    }

    pub fn add_task(&self, draft: TaskDraft) -> Result<Task, RepoError> {
        let _lock = self.lock()?;
        Ok(self.tasks.add(draft)?)
    }

    /// Full-replacement update keyed by id. Returns the post-update collection.
    pub fn update_task(&self, task: Task) -> Result<Vec<Task>, RepoError> {
        let _lock = self.lock()?;
        Ok(self.tasks.update(task)?)
    }

    pub fn remove_task(&self, task: &Task) -> Result<Vec<Task>, RepoError> {
        let _lock = self.lock()?;
        Ok(self.tasks.remove(&task.id)?)
    }

    // --- Events ---

    pub fn load_events(&self) -> Result<Vec<Event>, RepoError> {
        if let Some(events) = self.events.load() {
            return Ok(events);
        }
        let _lock = self.lock()?;
        Ok(self.events.initialize_if_absent()?)
    }

    pub fn add_event(&self, draft: EventDraft) -> Result<Event, RepoError> {
        let _lock = self.lock()?;
        Ok(self.events.add(draft)?)
    }

    pub fn update_event(&self, event: Event) -> Result<Vec<Event>, RepoError> {
        let _lock = self.lock()?;
        Ok(self.events.update(event)?)
    }

    pub fn remove_event(&self, event: &Event) -> Result<Vec<Event>, RepoError> {
        let _lock = self.lock()?;
        Ok(self.events.remove(&event.id)?)
    }

    // --- Kind-tagged operations ---

    /// Create a task or event; the draft's tag picks the document once, here.
    pub fn add(&self, draft: ItemDraft) -> Result<Item, RepoError> {
        match draft {
            ItemDraft::Task(draft) => Ok(Item::Task(self.add_task(draft)?)),
            ItemDraft::Event(draft) => Ok(Item::Event(self.add_event(draft)?)),
        }
    }

    /// Find one item by full id or unique id prefix, searching tasks first.
    pub fn find(&self, id_or_prefix: &str) -> Result<Option<Item>, RepoError> {
        let tasks = self.load_tasks()?;
        let events = self.load_events()?;

        let mut matches: Vec<Item> = tasks
            .into_iter()
            .filter(|t| t.id.starts_with(id_or_prefix))
            .map(Item::Task)
            .chain(
                events
                    .into_iter()
                    .filter(|e| e.id.starts_with(id_or_prefix))
                    .map(Item::Event),
            )
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches.remove(0))),
            _ => Err(RepoError::AmbiguousId {
                prefix: id_or_prefix.to_string(),
                matches: matches.iter().map(|m| m.id().to_string()).collect(),
            }),
        }
    }

    fn lock(&self) -> Result<DataLock, LockError> {
        DataLock::acquire_default(&self.data_dir)
    }
}
