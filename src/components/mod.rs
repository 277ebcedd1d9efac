pub mod completion_summary;
pub mod label_tag;
pub mod task_row;
