//! Error types for the Fitlog estimate pipeline

use thiserror::Error;

use crate::validation::get_field_display_label;

/// Input rejected at the validation boundary, with field context
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{display_label}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Unrecognized labels coming in from the wire
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown weight unit: {0}")]
    WeightUnit(String),

    #[error("Unknown height unit: {0}")]
    HeightUnit(String),

    #[error("Unknown biological sex: {0}")]
    BiologicalSex(String),

    #[error("Unknown activity level: {0}")]
    ActivityLevel(String),
}

impl ParseError {
    /// Name of the input field the label was read from
    pub fn field(&self) -> &'static str {
        match self {
            ParseError::WeightUnit(_) => "weight_unit",
            ParseError::HeightUnit(_) => "height_unit",
            ParseError::BiologicalSex(_) => "biological_sex",
            ParseError::ActivityLevel(_) => "activity_level",
        }
    }
}

impl From<ParseError> for ValidationError {
    fn from(err: ParseError) -> Self {
        ValidationError::new(err.field(), err.to_string())
    }
}
