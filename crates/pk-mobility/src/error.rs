use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("mobility configuration error: {0}")]
    Config(String),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
