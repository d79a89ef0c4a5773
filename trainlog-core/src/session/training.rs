//! Training list operations.

use log::info;

use crate::aggregate::sort_by_volume;
use crate::model::{SortOrder, Training};
use crate::session::{AppState, FormError, TrainingDraft};

impl AppState {
    /// Finish the draft and append the resulting training.
    pub fn submit(&mut self, draft: &mut TrainingDraft) -> Result<&Training, FormError> {
        draft.check()?;
        let id = self.next_id();
        let training = draft.finish(id)?;
        Ok(self.add_training(training))
    }

    pub fn add_training(&mut self, training: Training) -> &Training {
        info!(
            "Saved training {} ({}) with {} exercises",
            training.name(),
            training.id(),
            training.exercises().len()
        );
        self.trainings.push(training);
        &self.trainings[self.trainings.len() - 1]
    }

    /// Trainings ordered by volume using the current sort order.
    pub fn sorted(&self) -> Vec<Training> {
        sort_by_volume(&self.trainings, self.sort_order)
    }

    pub fn toggle_sort(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.toggle();
        self.sort_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exercise;
    use pretty_assertions::assert_eq;

    fn draft(name: &str, exercises: &[Exercise]) -> TrainingDraft {
        let mut draft = TrainingDraft::default();
        draft.name = name.to_string();
        for exercise in exercises {
            draft.add_exercise(exercise.clone());
        }
        draft
    }

    #[test]
    fn submit_appends_and_resets_draft() {
        let mut state = AppState::new();
        let mut d = draft("Legs", &[Exercise::new("Squat", 3, 10, 20.0)]);

        let id = state.submit(&mut d).unwrap().id().to_string();
        assert_eq!(state.trainings().len(), 1);
        assert_eq!(state.trainings()[0].id(), id);
        assert!(d.name.is_empty());
        assert!(d.exercises().is_empty());
    }

    #[test]
    fn invalid_submit_keeps_state_untouched() {
        let mut state = AppState::new();
        let mut d = draft("Legs", &[]);

        assert_eq!(state.submit(&mut d), Err(FormError::NoExercises));
        assert!(state.trainings().is_empty());
        assert_eq!(d.name, "Legs");
    }

    #[test]
    fn sorted_follows_toggle() {
        let mut state = AppState::new();
        let mut a = draft("A", &[Exercise::new("Squat", 3, 10, 20.0)]);
        let mut b = draft("B", &[Exercise::new("Deadlift", 4, 8, 50.0)]);
        state.submit(&mut a).unwrap();
        state.submit(&mut b).unwrap();

        let names = |state: &AppState| {
            state
                .sorted()
                .iter()
                .map(|t| t.name().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(state.sort_order(), SortOrder::Descending);
        assert_eq!(names(&state), vec!["B", "A"]);
        assert_eq!(state.toggle_sort(), SortOrder::Ascending);
        assert_eq!(names(&state), vec!["A", "B"]);
        assert_eq!(state.trainings()[0].name(), "A");
    }

    #[test]
    fn ids_never_repeat() {
        let mut state = AppState::new();
        assert_eq!(state.next_id_at(1_000), "1000");
        assert_eq!(state.next_id_at(1_000), "1001");
        assert_eq!(state.next_id_at(999), "1002");
        assert_eq!(state.next_id_at(5_000), "5000");
    }
}
