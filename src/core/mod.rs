pub mod draft;
pub mod ids;
pub mod store;
pub mod task;
