pub mod settings;
pub mod tasks;
