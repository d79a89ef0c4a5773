//! Derived metrics over a training's exercises and ordering of trainings by volume.

use std::fmt;

use crate::model::{Exercise, SortOrder, Training};

/// Sum of sets x reps x weight. An empty list has zero volume.
pub fn total_volume(exercises: &[Exercise]) -> f64 {
    exercises
        .iter()
        .fold(0.0, |total, exercise| total + exercise.volume())
}

/// Heaviest weight across the exercises. Starts from zero, so an empty list
/// (or one holding only negative weights) reports 0.
pub fn max_weight(exercises: &[Exercise]) -> f64 {
    exercises.iter().fold(0.0, |max, exercise| {
        if exercise.weight > max {
            exercise.weight
        } else {
            max
        }
    })
}

/// Returns a new list ordered by total volume. Trainings with equal volume
/// keep their relative input order. NaN volumes (huge weights of opposite
/// sign) are ordered by `f64::total_cmp` and end up at one end of the list.
pub fn sort_by_volume(trainings: &[Training], order: SortOrder) -> Vec<Training> {
    let mut keyed: Vec<(f64, &Training)> = trainings
        .iter()
        .map(|training| (total_volume(training.exercises()), training))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Ascending => a.total_cmp(b),
        SortOrder::Descending => b.total_cmp(a),
    });

    keyed
        .into_iter()
        .map(|(_, training)| training.clone())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSummary {
    pub volume: f64,
    pub max_weight: f64,
}

pub fn summarize(training: &Training) -> TrainingSummary {
    TrainingSummary {
        volume: total_volume(training.exercises()),
        max_weight: max_weight(training.exercises()),
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total volume {} kg, max weight {} kg",
            self.volume, self.max_weight
        )
    }
}
