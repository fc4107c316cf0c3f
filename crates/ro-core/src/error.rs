use thiserror::Error;

pub type RoResult<T> = Result<T, RoError>;

#[derive(Error, Debug)]
pub enum RoError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
