use chrono::Utc;
use log::debug;

use crate::model::{SortOrder, Training};

/// Trainings logged during this run, in the order they were saved, plus the
/// list view's current sort order.
#[derive(Debug, Default)]
pub struct AppState {
    pub(super) trainings: Vec<Training>,
    pub(super) sort_order: SortOrder,
    last_id: i64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trainings(&self) -> &[Training] {
        &self.trainings
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Creation timestamp in epoch milliseconds. Two trainings saved within
    /// the same millisecond get consecutive ids.
    pub fn next_id(&mut self) -> String {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    pub(super) fn next_id_at(&mut self, now_millis: i64) -> String {
        let id = now_millis.max(self.last_id + 1);
        self.last_id = id;
        debug!("Issued training id {}", id);
        id.to_string()
    }
}
