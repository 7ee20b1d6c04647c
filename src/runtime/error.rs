use crate::formats::IoError;
use crate::importer::ImportError;
use crate::model::CoreError;
use crate::options::OptionsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("series contract error: {0}")]
    Core(#[from] CoreError),

    #[error("I/O service error: {0}")]
    Io(#[from] IoError),

    #[error("options error: {0}")]
    Options(#[from] OptionsError),

    #[error("import service error: {0}")]
    Import(#[from] ImportError),
}
