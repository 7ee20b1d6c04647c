mod context;
mod error;
mod import_service;
mod io_service;

pub use context::AppContext;
pub use error::{AppError, Result};
pub use import_service::ImportService;
pub use io_service::IoService;
