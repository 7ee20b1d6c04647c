use super::{ImportService, IoService};

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    import_service: ImportService,
    io_service: IoService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import_service(&self) -> &ImportService {
        &self.import_service
    }

    pub fn io_service(&self) -> &IoService {
        &self.io_service
    }
}
