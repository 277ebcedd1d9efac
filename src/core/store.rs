use super::ids::IdGenerator;
use super::task::Task;

/// Called with the full list after every change.
pub trait TaskListObserver {
    fn tasks_changed(&mut self, tasks: &[Task]);
}

/// Observer that ignores every change.
pub struct NoopObserver;

impl TaskListObserver for NoopObserver {
    fn tasks_changed(&mut self, _tasks: &[Task]) {}
}

/// Ordered list of tasks. Insertion order is display order.
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: Box<dyn IdGenerator + Send>,
    observer: Box<dyn TaskListObserver + Send>,
}

impl TaskStore {
    /// Seed the store and report the initial list to `observer`.
    pub fn new(
        tasks: Vec<Task>,
        ids: Box<dyn IdGenerator + Send>,
        observer: Box<dyn TaskListObserver + Send>,
    ) -> Self {
        let mut store = Self { tasks, ids, observer };
        store.notify();
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task. Blank text is ignored and returns `None`.
    pub fn add(&mut self, text: &str, deadline: &str, label: &str) -> Option<String> {
        if text.trim().is_empty() {
            log::debug!("Ignoring task with empty text");
            return None;
        }
        let id = self.ids.next_id();
        self.tasks.push(Task::new(id.clone(), text, deadline, label));
        log::debug!("Added task {}", id);
        self.notify();
        Some(id)
    }

    /// Flip the completed flag of every task with this id. Returns false if
    /// there was none.
    pub fn toggle(&mut self, id: &str) -> bool {
        let mut matched = 0;
        for task in self.tasks.iter_mut().filter(|t| t.id == id) {
            task.completed = !task.completed;
            matched += 1;
        }
        if matched == 0 {
            log::debug!("Toggle for unknown task {}", id);
            return false;
        }
        log::debug!("Toggled {} task(s) with id {}", matched, id);
        self.notify();
        true
    }

    /// Delete the task with this id. Returns false if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            log::debug!("Remove for unknown task {}", id);
            return false;
        }
        log::debug!("Removed task {}", id);
        self.notify();
        true
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Share of completed tasks in percent, unrounded. 0 for an empty list.
    pub fn completion_fraction(&self) -> f32 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.completed_count() as f32 / self.tasks.len() as f32 * 100.0
    }

    /// Share of completed tasks as a whole percent.
    pub fn completion_percentage(&self) -> u32 {
        self.completion_fraction().round() as u32
    }

    fn notify(&mut self) {
        self.observer.tasks_changed(&self.tasks);
    }
}
