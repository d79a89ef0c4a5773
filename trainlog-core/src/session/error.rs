use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingName(&'static str),
    #[error("{0} is required")]
    MissingValue(&'static str),
    #[error("{field} must be a whole number or decimal, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
    #[error("add at least one exercise before saving the training")]
    NoExercises,
}
