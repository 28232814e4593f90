use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid pixel coordinate: {value}. Must be a finite number")]
    InvalidCoordinate { value: f64 },

    #[error("Invalid date: {date}. Expected YYYY-MM-DD")]
    InvalidDate { date: String },

    #[error(transparent)]
    Pipeline(#[from] ndvipro::Error),
}
