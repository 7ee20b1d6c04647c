use crate::formats::IoError;
use crate::model::CoreError;
use crate::options::OptionsError;
use crate::stack::StackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("series {series}: failed to decode plane {plane}: {source}")]
    Decode {
        series: usize,
        plane: usize,
        source: IoError,
    },

    #[error("series {series}: plane {plane} decoded to no pixel data")]
    EmptyPlane { series: usize, plane: usize },

    #[error("series {series}: dimension contract violated: {source}")]
    Contract { series: usize, source: CoreError },

    #[error("series {series}: stack assembly failed{}: {source}", plane_suffix(.plane))]
    Stack {
        series: usize,
        plane: Option<usize>,
        source: StackError,
    },

    #[error("series {series}: reader failure: {source}")]
    Reader { series: usize, source: IoError },

    #[error("import options rejected: {0}")]
    Options(#[from] OptionsError),
}

fn plane_suffix(plane: &Option<usize>) -> String {
    plane.map(|plane| format!(" at plane {plane}")).unwrap_or_default()
}

impl ImportError {
    /// Series the failure belongs to, if any.
    pub fn series(&self) -> Option<usize> {
        match self {
            ImportError::Decode { series, .. }
            | ImportError::EmptyPlane { series, .. }
            | ImportError::Contract { series, .. }
            | ImportError::Stack { series, .. }
            | ImportError::Reader { series, .. } => Some(*series),
            ImportError::Options(_) => None,
        }
    }
}
