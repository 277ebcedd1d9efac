use super::store::TaskStore;

/// Form fields for a task that has not been added yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub deadline: String,
    pub label: String,
}

impl Draft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

/// The "Add New Task" dialog: open/closed plus the draft it edits.
///
/// The draft survives dismissal, so reopening the dialog shows what was typed
/// before. Only a successful submit clears it.
#[derive(Debug, Default)]
pub struct NewTaskDialog {
    state: DialogState,
    draft: Draft,
}

impl NewTaskDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn open(&mut self) {
        self.state = DialogState::Open;
    }

    pub fn dismiss(&mut self) {
        self.state = DialogState::Closed;
    }

    pub fn set_text(&mut self, value: String) {
        self.draft.text = value;
    }

    pub fn set_deadline(&mut self, value: String) {
        self.draft.deadline = value;
    }

    pub fn set_label(&mut self, value: String) {
        self.draft.label = value;
    }

    /// Add the draft to `store`. On success the draft is cleared and the
    /// dialog closes; blank text leaves everything as it was.
    pub fn submit(&mut self, store: &mut TaskStore) -> Option<String> {
        let id = store.add(&self.draft.text, &self.draft.deadline, &self.draft.label)?;
        self.draft.clear();
        self.state = DialogState::Closed;
        Some(id)
    }
}
