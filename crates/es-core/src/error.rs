use thiserror::Error;

pub type EsResult<T> = Result<T, EsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EsError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },
}
