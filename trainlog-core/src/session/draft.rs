//! Form drafts. Field values stay as typed until validation turns them into records.

use std::mem;

use log::debug;

use crate::model::{Exercise, Training};
use crate::session::FormError;

/// The exercise form's fields, as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingValue(field));
    }
    let parsed: i64 = trimmed.parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;
    if parsed <= 0 {
        return Err(FormError::NonPositive(field));
    }
    u32::try_from(parsed).map_err(|_| FormError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Weight is not range checked; a blank field means 0.
fn parse_weight(value: &str) -> Result<f64, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(weight) if weight.is_finite() => Ok(weight),
        _ => Err(FormError::InvalidNumber {
            field: "weight",
            value: value.to_string(),
        }),
    }
}

impl ExerciseDraft {
    pub fn validate(&self) -> Result<Exercise, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName("exercise name"));
        }
        let sets = parse_count("sets", &self.sets)?;
        let reps = parse_count("reps", &self.reps)?;
        let weight = parse_weight(&self.weight)?;
        Ok(Exercise::new(name, sets, reps, weight))
    }
}

/// The training form: a name and the exercises added so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingDraft {
    pub name: String,
    exercises: Vec<Exercise>,
}

impl TrainingDraft {
    pub fn add_exercise(&mut self, exercise: Exercise) {
        debug!("Draft {:?} gained exercise {}", self.name, exercise);
        self.exercises.push(exercise);
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn check(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName("training name"));
        }
        if self.exercises.is_empty() {
            return Err(FormError::NoExercises);
        }
        Ok(())
    }

    /// Turns the draft into a training and clears it for the next one. On
    /// error the draft is left as it was.
    pub fn finish(&mut self, id: String) -> Result<Training, FormError> {
        self.check()?;
        let name = mem::take(&mut self.name).trim().to_string();
        let exercises = mem::take(&mut self.exercises);
        Ok(Training::new(id, name, exercises))
    }
}
