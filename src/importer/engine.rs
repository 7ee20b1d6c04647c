use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::dims::DimensionMapper;
use crate::formats::{MetadataStore, PlaneReader, probe_series};
use crate::label::{SliceLabeler, stack_title};
use crate::model::{self, SeriesInfo};
use crate::options::{ImportOptions, SeriesOptions};
use crate::select::{PlaneSelection, SeriesRanges, select_planes};
use crate::stack::{ImageStack, StackRouter, concatenate, fuse_channels};

use super::virtual_stack::{decode, register_merged, register_planes};
use super::{
    CancelToken, HyperDims, ImportError, ImportReport, ImportedImage, ProgressSink, Result,
    SeriesReport, StackSummary, ThrottledProgress, TracingProgress,
};

/// Result of one import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Finished output images, after concatenation and splitting.
    pub images: Vec<ImportedImage>,
    /// Stacks of a series interrupted by cancellation. Incomplete.
    pub partial: Vec<ImageStack>,
    pub cancelled: bool,
    pub report: ImportReport,
}

enum SeriesOutcome {
    Done(Vec<ImportedImage>, SeriesReport),
    Cancelled(Vec<ImageStack>, SeriesReport),
}

/// Per-series import context shared by the decode loop and the output step.
struct SeriesPlan {
    info: SeriesInfo,
    options: SeriesOptions,
    ranges: SeriesRanges,
    mapper: DimensionMapper,
    labeler: SliceLabeler,
    name: Option<String>,
    size: (usize, usize),
    planes: Vec<usize>,
}

/// Drives a [`PlaneReader`] through selection, decoding, routing and
/// assembly of every enabled series.
pub struct Importer {
    options: ImportOptions,
    cancel: CancelToken,
    progress: Box<dyn ProgressSink>,
    source_name: Option<String>,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            cancel: CancelToken::new(),
            progress: Box::new(ThrottledProgress::new(TracingProgress)),
            source_name: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Replaces the default throttled `tracing` progress.
    pub fn with_progress(mut self, progress: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Name used in stack titles instead of the reader's file names.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn run<R, M>(&mut self, reader: &mut R, store: &M) -> Result<ImportOutcome>
    where
        R: PlaneReader + ?Sized,
        M: MetadataStore + ?Sized,
    {
        self.options.validate()?;
        let series_count = reader.series_count();
        let mut images = Vec::new();
        let mut report = ImportReport::default();

        for series in 0..series_count {
            if !self.options.is_series_enabled(series) {
                debug!(series, "series disabled");
                continue;
            }
            if self.cancel.is_cancelled() {
                return Ok(cancelled(images, Vec::new(), report));
            }
            match self.import_series(reader, store, series, series_count)? {
                SeriesOutcome::Done(series_images, series_report) => {
                    images.extend(series_images);
                    report.series.push(series_report);
                }
                SeriesOutcome::Cancelled(partial, series_report) => {
                    report.series.push(series_report);
                    return Ok(cancelled(images, partial, report));
                }
            }
        }

        if self.options.concatenate {
            images = concatenate(images);
        }
        let axes = self.options.split_axes();
        if axes.any() {
            images = images
                .into_iter()
                .flat_map(|image| image.split(axes))
                .collect();
        }
        report.outputs = images.iter().map(StackSummary::from).collect();
        info!(
            series = report.series.len(),
            images = images.len(),
            "import finished"
        );
        Ok(ImportOutcome {
            images,
            partial: Vec::new(),
            cancelled: false,
            report,
        })
    }

    fn plan_series<R, M>(&self, reader: &mut R, store: &M, series: usize) -> Result<SeriesPlan>
    where
        R: PlaneReader + ?Sized,
        M: MetadataStore + ?Sized,
    {
        let contract = |source| ImportError::Contract { series, source };
        let info =
            probe_series(reader, series).map_err(|source| ImportError::Reader { series, source })?;
        let options = self.options.series_options(series);
        let ranges = options.ranges(info.extents());
        let mapper = DimensionMapper::for_series(&info);
        let selection = select_planes(&mapper, &ranges).map_err(contract)?;
        let name = store.series_name(series);
        let labeler = SliceLabeler::new(&info, &ranges, name.clone());
        let size = info.plane_size(options.crop).map_err(contract)?;
        let planes = self.plane_order(&mapper, &selection).map_err(contract)?;
        Ok(SeriesPlan {
            info,
            options,
            ranges,
            mapper,
            labeler,
            name,
            size,
            planes,
        })
    }

    /// Selected plane indices in output order.
    fn plane_order(
        &self,
        mapper: &DimensionMapper,
        selection: &PlaneSelection,
    ) -> model::Result<Vec<usize>> {
        let Some(order) = self
            .options
            .stack_order
            .filter(|order| *order != mapper.order())
        else {
            return Ok(selection.indices().collect());
        };
        let output = mapper.with_order(order);
        let mut planes = Vec::with_capacity(selection.selected_count());
        for position in 0..output.image_count() {
            let index = mapper.to_linear(output.to_coordinate(position)?)?;
            if selection.contains(index) {
                planes.push(index);
            }
        }
        Ok(planes)
    }

    fn import_series<R, M>(
        &mut self,
        reader: &mut R,
        store: &M,
        series: usize,
        series_count: usize,
    ) -> Result<SeriesOutcome>
    where
        R: PlaneReader + ?Sized,
        M: MetadataStore + ?Sized,
    {
        let started = Instant::now();
        let plan = self.plan_series(reader, store, series)?;
        let selected = plan.planes.len();
        self.progress
            .status(&format!("Reading series {}/{}", series + 1, series_count));
        debug!(
            series,
            selected,
            image_count = plan.info.image_count,
            width = plan.size.0,
            height = plan.size.1,
            "import_series"
        );

        let mut report = SeriesReport {
            series,
            name: plan.name.clone(),
            selected_planes: selected,
            decoded_planes: 0,
            stacks: Vec::new(),
            duration_ms: 0,
        };
        let mut luts = BTreeMap::new();

        let stacks = if self.options.virtual_stack {
            let stack = if self.options.merge_channels {
                register_merged(
                    &plan.info,
                    &plan.mapper,
                    &plan.labeler,
                    plan.ranges.c,
                    plan.size,
                )?
            } else {
                let contract = |source| ImportError::Contract { series, source };
                let all = SeriesRanges::full(plan.mapper.extents());
                let selection = select_planes(&plan.mapper, &all).map_err(contract)?;
                let planes = self.plane_order(&plan.mapper, &selection).map_err(contract)?;
                register_planes(&plan.info, &plan.mapper, &plan.labeler, &planes, plan.size)?
            };
            vec![(stack, self.options.merge_channels)]
        } else {
            let contract = |source| ImportError::Contract { series, source };
            let (width, height) = plan.size;
            let mut router = StackRouter::new(width, height, self.options.scale_policy);
            for (done, &index) in plan.planes.iter().enumerate() {
                self.progress.progress(done, selected);
                self.progress
                    .status(&format!("Reading plane {}/{}", done + 1, selected));
                if self.cancel.is_cancelled() {
                    warn!(series, decoded = done, selected, "import cancelled");
                    report.decoded_planes = done;
                    report.duration_ms = started.elapsed().as_millis() as u64;
                    return Ok(SeriesOutcome::Cancelled(router.finish(), report));
                }

                reader
                    .set_series(series)
                    .map_err(|source| ImportError::Reader { series, source })?;
                let components = decode(reader, series, index, plan.options.crop)?;
                let coordinate = plan.mapper.to_coordinate(index).map_err(contract)?;
                if plan.info.indexed && components.len() == 1 && !luts.contains_key(&coordinate.c) {
                    let lut = reader
                        .lookup_table(index)
                        .map_err(|source| ImportError::Decode {
                            series,
                            plane: index,
                            source,
                        })?;
                    if let Some(lut) = lut {
                        luts.insert(coordinate.c, lut);
                    }
                }
                let label = plan.labeler.label(coordinate).map_err(contract)?;
                router
                    .route_components(label, coordinate, components)
                    .map_err(|source| ImportError::Stack {
                        series,
                        plane: Some(index),
                        source,
                    })?;
                report.decoded_planes += 1;
            }
            self.progress.progress(selected, selected);
            self.merge_decoded(router.finish(), &plan)?
        };

        let title = stack_title(
            &self.source_file(reader, series, series_count),
            plan.name.as_deref(),
            series_count,
        );
        let dimension_order = self
            .options
            .stack_order
            .unwrap_or(plan.info.dimension_order);
        // Virtual stacks hold every (Z, T) position of the series.
        let (slices, frames, channels) = if self.options.virtual_stack {
            let extents = plan.mapper.extents();
            (extents.size_z, extents.size_t, extents.size_c)
        } else {
            (
                plan.ranges.z.count(),
                plan.ranges.t.count(),
                plan.ranges.c.count(),
            )
        };
        let images = stacks
            .into_iter()
            .filter(|(stack, _)| !stack.is_empty())
            .map(|(stack, merged)| {
                let channels = if merged { 1 } else { channels };
                let dims = HyperDims::new(channels, slices, frames).fit(stack.len());
                let display_range = if self.options.autoscale {
                    stack.data_range().or_else(|| stack.default_display_range())
                } else {
                    stack.default_display_range()
                };
                report.stacks.push(stack.kind());
                ImportedImage {
                    title: title.clone(),
                    series: vec![series],
                    stack,
                    dims,
                    display_range,
                    channel_luts: luts.clone(),
                    dimension_order,
                }
            })
            .collect::<Vec<_>>();
        report.duration_ms = started.elapsed().as_millis() as u64;
        Ok(SeriesOutcome::Done(images, report))
    }

    /// Fuses the channels of qualifying 8-bit stacks when merging is on.
    fn merge_decoded(
        &self,
        stacks: Vec<ImageStack>,
        plan: &SeriesPlan,
    ) -> Result<Vec<(ImageStack, bool)>> {
        if !self.options.merge_channels {
            return Ok(stacks.into_iter().map(|stack| (stack, false)).collect());
        }
        let series = plan.info.index;
        let labeler = plan.labeler.merged();
        let channels = plan.ranges.c.count();
        let mut merged = Vec::with_capacity(stacks.len());
        for stack in stacks {
            let fused = fuse_channels(&stack, channels, &labeler).map_err(|source| {
                ImportError::Stack {
                    series,
                    plane: None,
                    source,
                }
            })?;
            match fused {
                Some(fused) => merged.push((fused, true)),
                None => merged.push((stack, false)),
            }
        }
        Ok(merged)
    }

    fn source_file<R: PlaneReader + ?Sized>(
        &self,
        reader: &R,
        series: usize,
        series_count: usize,
    ) -> String {
        if let Some(name) = &self.source_name {
            return name.clone();
        }
        let files = reader.used_files();
        let file = if files.len() == series_count {
            files.get(series)
        } else {
            files.first()
        };
        file.map(|path| path.display().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

fn cancelled(
    images: Vec<ImportedImage>,
    partial: Vec<ImageStack>,
    mut report: ImportReport,
) -> ImportOutcome {
    report.cancelled = true;
    report.outputs = images.iter().map(StackSummary::from).collect();
    ImportOutcome {
        images,
        partial,
        cancelled: true,
        report,
    }
}
