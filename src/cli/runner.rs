use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::formats::PlaneReader;
use crate::options::ImportOptions;
use crate::runtime::AppContext;

use super::types::{Cli, Commands, ImageLabels, ImportFlags, SourceInfo};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let app = AppContext::new();

    match cli.command {
        Commands::Info { inputs, metadata } => {
            let mut reader = app
                .io_service()
                .open(inputs.as_slice())
                .map_err(|error| error.to_string())?;
            let series = app
                .io_service()
                .probe(&mut reader)
                .map_err(|error| error.to_string())?;
            let metadata = if metadata {
                let store = reader.clone();
                let table = app
                    .import_service()
                    .metadata(&mut reader, &store)
                    .map_err(|error| error.to_string())?;
                Some(table.to_lines(" = ").lines().map(str::to_string).collect())
            } else {
                None
            };
            let info = SourceInfo {
                files: display_paths(&reader.used_files()),
                series,
                metadata,
            };
            print_json(&info)?;
        }
        Commands::Import {
            inputs,
            output_dir,
            report,
            flags,
        } => {
            let options = resolve_options(&app, &flags)?;
            let mut reader = app
                .io_service()
                .open(inputs.as_slice())
                .map_err(|error| error.to_string())?;
            let store = reader.clone();
            let mut outcome = app
                .import_service()
                .run(&mut reader, &store, options.clone())
                .map_err(|error| error.to_string())?;
            fs::create_dir_all(&output_dir).map_err(|error| error.to_string())?;
            for (index, image) in outcome.images.iter_mut().enumerate() {
                app.import_service()
                    .materialize(&mut reader, image, &options)
                    .map_err(|error| error.to_string())?;
                let path = output_path(&output_dir, index, &image.title);
                app.io_service()
                    .write(&path, &image.stack)
                    .map_err(|error| error.to_string())?;
                info!(path = %path.display(), slices = image.stack.len(), "wrote stack");
            }
            if let Some(report_path) = report {
                app.import_service()
                    .save_report(report_path, &outcome.report)
                    .map_err(|error| error.to_string())?;
            }
            print_json(&outcome.report)?;
        }
        Commands::Labels { inputs, flags } => {
            let mut options = resolve_options(&app, &flags)?;
            options.virtual_stack = true;
            let mut reader = app
                .io_service()
                .open(inputs.as_slice())
                .map_err(|error| error.to_string())?;
            let store = reader.clone();
            let outcome = app
                .import_service()
                .run(&mut reader, &store, options)
                .map_err(|error| error.to_string())?;
            let images = outcome
                .images
                .iter()
                .map(|image| ImageLabels {
                    title: image.title.clone(),
                    labels: image.stack.labels().map(str::to_string).collect(),
                })
                .collect::<Vec<_>>();
            print_json(&images)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_options(app: &AppContext, flags: &ImportFlags) -> Result<ImportOptions, String> {
    let mut options = match &flags.options {
        Some(path) => app
            .import_service()
            .load_options(path)
            .map_err(|error| error.to_string())?,
        None => ImportOptions::default(),
    };
    options.concatenate |= flags.concatenate;
    options.merge_channels |= flags.merge_channels;
    options.virtual_stack |= flags.virtual_stack;
    options.split_channels |= flags.split_channels;
    options.split_focal_planes |= flags.split_focal_planes;
    options.split_timepoints |= flags.split_timepoints;
    options.autoscale |= flags.autoscale;
    Ok(options)
}

fn output_path(directory: &Path, index: usize, title: &str) -> PathBuf {
    let stem = title
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | '.') {
                character
            } else {
                '_'
            }
        })
        .collect::<String>();
    directory.join(format!("{index:03}_{stem}.tif"))
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|path| path.display().to_string()).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}
