//! Error type for the command-line front end.

use std::path::PathBuf;

/// Wraps errors from the library crates into one type for `main`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Engine definition error: {0}")]
    Project(String),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Performance model error: {0}")]
    Performance(String),

    #[error("Kinematics error: {0}")]
    Kinematics(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<es_project::ProjectError> for AppError {
    fn from(err: es_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<es_performance::PerfError> for AppError {
    fn from(err: es_performance::PerfError) -> Self {
        AppError::Performance(err.to_string())
    }
}

impl From<es_kinematics::KinematicsError> for AppError {
    fn from(err: es_kinematics::KinematicsError) -> Self {
        AppError::Kinematics(err.to_string())
    }
}

impl From<es_core::EsError> for AppError {
    fn from(err: es_core::EsError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
