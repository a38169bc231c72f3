//! Kinematics error types.

use es_core::EsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },
}

pub type KinematicsResult<T> = Result<T, KinematicsError>;

impl From<EsError> for KinematicsError {
    fn from(e: EsError) -> Self {
        KinematicsError::InvalidParameter {
            what: match e {
                EsError::InvalidParameter { what } => what.to_string(),
                EsError::NonFinite { what, value } => format!("{what} is not finite ({value})"),
            },
        }
    }
}
