#[derive(Debug, Clone)]
pub enum Message {
    // New task dialog
    OpenNewTaskDialog,
    CloseNewTaskDialog,
    DraftText(String),
    DraftDeadline(String),
    DraftLabel(String),
    SubmitNewTask,

    // Task list
    ToggleTask(String),
    RemoveTask(String),

    // Settings
    OpenSettings,
    CloseSettings,
    ToggleDebugLogging,
}
