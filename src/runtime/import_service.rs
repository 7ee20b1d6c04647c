use std::path::Path;

use crate::formats::{MetadataStore, PlaneReader};
use crate::importer::{
    CancelToken, ImportOutcome, ImportReport, ImportedImage, Importer, collect_original_metadata,
    materialize_stack, save_report,
};
use crate::model::OriginalMetadata;
use crate::options::{ImportOptions, load_options};

use super::Result;

#[derive(Debug, Clone, Default)]
pub struct ImportService {
    cancel: CancelToken,
}

impl ImportService {
    pub fn load_options(&self, path: impl AsRef<Path>) -> Result<ImportOptions> {
        Ok(load_options(path)?)
    }

    /// Token that cancels runs started by this service.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn run<R, M>(&self, reader: &mut R, store: &M, options: ImportOptions) -> Result<ImportOutcome>
    where
        R: PlaneReader + ?Sized,
        M: MetadataStore + ?Sized,
    {
        let mut importer = Importer::new(options).with_cancel(self.cancel.clone());
        Ok(importer.run(reader, store)?)
    }

    /// Decodes the deferred slices of `image` in place.
    pub fn materialize<R: PlaneReader + ?Sized>(
        &self,
        reader: &mut R,
        image: &mut ImportedImage,
        options: &ImportOptions,
    ) -> Result<()> {
        if !image.stack.is_deferred() {
            return Ok(());
        }
        image.stack = materialize_stack(
            reader,
            &image.stack,
            |series| options.series_options(series).crop,
            options.scale_policy,
        )?;
        Ok(())
    }

    pub fn metadata<R, M>(&self, reader: &mut R, store: &M) -> Result<OriginalMetadata>
    where
        R: PlaneReader + ?Sized,
        M: MetadataStore + ?Sized,
    {
        Ok(collect_original_metadata(reader, store)?)
    }

    pub fn save_report(&self, path: impl AsRef<Path>, report: &ImportReport) -> Result<()> {
        save_report(path, report)?;
        Ok(())
    }
}
