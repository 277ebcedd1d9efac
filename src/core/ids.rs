use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Task;

/// Source of fresh task ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Which id generator the application uses for new tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdScheme {
    /// Millisecond timestamps, the format older lists were written with.
    #[default]
    Timestamp,
    Uuid,
}

impl IdScheme {
    /// Build a generator for this scheme that will not reissue any id already in `existing`.
    pub fn generator(self, existing: &[Task]) -> Box<dyn IdGenerator + Send> {
        match self {
            Self::Timestamp => Box::new(TimestampIds::after(existing)),
            Self::Uuid => Box::new(UuidIds),
        }
    }
}

/// Milliseconds since the Unix epoch, strictly increasing even when the clock
/// stalls or steps backwards.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: u64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start past the largest numeric id in `tasks`.
    pub fn after(tasks: &[Task]) -> Self {
        let last = tasks
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    fn issue(&mut self, now: u64) -> String {
        self.last = now.max(self.last.saturating_add(1));
        self.last.to_string()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.issue(now)
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic counter: "1", "2", ...
#[derive(Debug)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ids_never_repeat_when_clock_stalls() {
        let mut ids = TimestampIds::new();
        assert_eq!(ids.issue(1_000), "1000");
        assert_eq!(ids.issue(1_000), "1001");
        assert_eq!(ids.issue(999), "1002");
        assert_eq!(ids.issue(5_000), "5000");
    }

    #[test]
    fn timestamp_ids_start_after_loaded_tasks() {
        let tasks = vec![
            Task::new("4102444800000", "Far future", "", ""),
            Task::new("not-a-number", "Imported", "", ""),
        ];
        let mut ids = TimestampIds::after(&tasks);
        assert_eq!(ids.next_id(), "4102444800001");
    }

    #[test]
    fn timestamp_ids_saturate_at_largest_id() {
        let tasks = vec![Task::new(u64::MAX.to_string(), "Huge id", "", "")];
        let mut ids = TimestampIds::after(&tasks);
        assert_eq!(ids.next_id(), u64::MAX.to_string());
    }

    #[test]
    fn timestamp_ids_track_wall_clock() {
        let mut ids = TimestampIds::new();
        let id: u64 = ids.next_id().parse().unwrap();
        // 2020-01-01T00:00:00Z
        assert!(id > 1_577_836_800_000);
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::starting_at(7);
        assert_eq!(ids.next_id(), "7");
        assert_eq!(ids.next_id(), "8");
    }
}
