use tracing::debug;

use crate::formats::{MetadataStore, PlaneReader, probe_series};
use crate::model::OriginalMetadata;

use super::{ImportError, Result};

/// Gathers the global, per-series and core metadata of every series into
/// one flat table.
pub fn collect_original_metadata<R, M>(reader: &mut R, store: &M) -> Result<OriginalMetadata>
where
    R: PlaneReader + ?Sized,
    M: MetadataStore + ?Sized,
{
    let mut metadata = OriginalMetadata::new();
    metadata.merge_prefixed(&reader.global_metadata(), "");
    if let Some(location) = reader.used_files().first() {
        metadata.insert("Location", location.display().to_string());
    }

    let series_count = reader.series_count();
    for series in 0..series_count {
        let info =
            probe_series(reader, series).map_err(|source| ImportError::Reader { series, source })?;
        let name = store.series_name(series);
        let prefix = OriginalMetadata::series_prefix(name.as_deref(), series, series_count);
        metadata.merge_prefixed(&reader.series_metadata(), &prefix);
        metadata.add_core_values(&prefix, &info);
    }
    debug!(series_count, entries = metadata.len(), "collect_original_metadata");
    Ok(metadata)
}
