use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptionsError>;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("import options parse failure: {0}")]
    Parse(String),

    #[error("import options I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("import options serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("import options YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("import options violate series geometry: {0}")]
    Core(#[from] CoreError),
}
