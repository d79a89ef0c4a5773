//! Core records: exercises, trainings and catalog entries.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Largest integer an f64 holds exactly; above this the fractional check is meaningless.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole-number weights are written as integers (`20`, not `20.0`) so exported
/// documents keep the shape of earlier exports.
fn serialize_weight<S>(weight: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if weight.is_finite() && weight.fract() == 0.0 && weight.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*weight as i64)
    } else {
        serializer.serialize_f64(*weight)
    }
}

/// One named movement with sets, reps and weight (kg).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(serialize_with = "serialize_weight")]
    pub weight: f64,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: u32, reps: u32, weight: f64) -> Self {
        Self {
            name: name.into(),
            sets,
            reps,
            weight,
        }
    }

    /// sets x reps x weight
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} sets x {} reps @ {}kg",
            self.name, self.sets, self.reps, self.weight
        )
    }
}

/// A named, ordered collection of exercises performed in one session.
///
/// New trainings come out of [`crate::session::TrainingDraft::finish`], which
/// guarantees a non-empty name and at least one exercise. Documents read back
/// from an export are taken as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    id: String,
    name: String,
    exercises: Vec<Exercise>,
}

impl Training {
    pub(crate) fn new(id: String, name: String, exercises: Vec<Exercise>) -> Self {
        Self {
            id,
            name,
            exercises,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}

/// Exercise name as offered by the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for CatalogEntry {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn exercise_display() {
        let exercise = Exercise::new("Squat", 3, 10, 22.5);
        assert_eq!(exercise.to_string(), "Squat: 3 sets x 10 reps @ 22.5kg");
        let exercise = Exercise::new("Bench", 4, 8, 50.0);
        assert_eq!(exercise.to_string(), "Bench: 4 sets x 8 reps @ 50kg");
    }

    #[rstest]
    #[case(20.0, r#"{"name":"Row","sets":1,"reps":1,"weight":20}"#)]
    #[case(22.5, r#"{"name":"Row","sets":1,"reps":1,"weight":22.5}"#)]
    #[case(0.0, r#"{"name":"Row","sets":1,"reps":1,"weight":0}"#)]
    #[case(-5.0, r#"{"name":"Row","sets":1,"reps":1,"weight":-5}"#)]
    fn weight_serialization(#[case] weight: f64, #[case] expected: &str) {
        let exercise = Exercise::new("Row", 1, 1, weight);
        assert_eq!(serde_json::to_string(&exercise).unwrap(), expected);
    }

    #[test]
    fn integer_weight_deserializes() {
        let exercise: Exercise =
            serde_json::from_str(r#"{"name":"Row","sets":2,"reps":5,"weight":40}"#).unwrap();
        assert_eq!(exercise, Exercise::new("Row", 2, 5, 40.0));
    }

    #[test]
    fn sort_order_defaults_to_descending() {
        assert_eq!(SortOrder::default(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggle(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.toggle(), SortOrder::Descending);
    }
}
