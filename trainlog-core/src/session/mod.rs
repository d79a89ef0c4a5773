//! In-memory application state and the form drafts that feed it.
//!
//! This module provides [`AppState`], which holds the trainings logged during
//! the current run, and the [`ExerciseDraft`]/[`TrainingDraft`] types that
//! validate form input before it becomes an immutable record.

mod draft;
mod error;
mod session;
mod training;

pub use draft::{ExerciseDraft, TrainingDraft};
pub use error::FormError;
pub use session::AppState;
