// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: export a JSON scene to an IFC4 file
//!
//! Usage:
//!   ifc-export <scene.json> [--output <file.ifc>] [--deterministic]

use anyhow::{bail, Context, Result};
use ifc_export_engine::{ExportConfig, ExportObject, ExportSummary, Exporter};
use nalgebra::Vector3;
use serde::Deserialize;
use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Scene file layout
#[derive(Debug, Deserialize)]
struct Scene {
    #[serde(default = "default_origin")]
    project_origin: Vector3<f64>,
    #[serde(default = "default_north")]
    north: Vector3<f64>,
    objects: Vec<ExportObject>,
}

fn default_origin() -> Vector3<f64> {
    Vector3::zeros()
}

fn default_north() -> Vector3<f64> {
    Vector3::y()
}

struct Args {
    scene: PathBuf,
    output: PathBuf,
    deterministic: bool,
}

fn print_usage() {
    println!("ifc-export - Export a JSON scene to an IFC4 file");
    println!();
    println!("Usage:");
    println!("  ifc-export <scene.json> [options]");
    println!();
    println!("Options:");
    println!("  --output <path>     Output file (default: scene name with .ifc)");
    println!("  --deterministic     Sequential globally unique ids and a fixed timestamp");
    println!("  -h, --help          Show this help");
    println!();
    println!("Environment:");
    println!("  IFC_EXPORT_*               Export settings (project name, author, id seed, ...)");
    println!("  IFC_EXPORT_WORKER_THREADS  Threads used to prepare meshes");
    println!("  RUST_LOG                   Log filter");
}

fn parse_args(args: &[String]) -> Result<Option<Args>> {
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return Ok(None);
    }

    let scene = PathBuf::from(&args[1]);
    let mut output = None;
    let mut deterministic = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" => {
                i += 1;
                let path = args.get(i).context("--output needs a path")?;
                output = Some(PathBuf::from(path));
            }
            "--deterministic" => {
                deterministic = true;
            }
            other => bail!("Unknown option: {}", other),
        }
        i += 1;
    }

    let output = output.unwrap_or_else(|| scene.with_extension("ifc"));
    Ok(Some(Args {
        scene,
        output,
        deterministic,
    }))
}

fn load_scene(path: &Path) -> Result<Scene> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scene {}", path.display()))
}

fn worker_threads() -> usize {
    env::var("IFC_EXPORT_WORKER_THREADS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(num_cpus::get)
}

fn export_config(args: &Args) -> ExportConfig {
    let mut config = ExportConfig::from_env();
    if let Some(name) = args.output.file_name() {
        config.file_name = name.to_string_lossy().into_owned();
    }
    if args.deterministic {
        config.deterministic_ids = true;
        if config.timestamp.is_none() {
            config.timestamp = Some("1970-01-01T00:00:00".to_string());
        }
    }
    config
}

/// `<output>.part`, next to the output so the final rename stays on one filesystem
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Run `write` against a partial file and move it over `output` on success.
///
/// On failure the partial file is removed and an existing `output` is left as it was.
fn write_output<T>(output: &Path, write: impl FnOnce(BufWriter<File>) -> Result<T>) -> Result<T> {
    let partial = partial_path(output);
    let file = File::create(&partial)
        .with_context(|| format!("Failed to create {}", partial.display()))?;

    match write(BufWriter::new(file)) {
        Ok(value) => {
            fs::rename(&partial, output).with_context(|| {
                format!("Failed to move {} to {}", partial.display(), output.display())
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(&partial) {
                tracing::warn!(
                    path = %partial.display(),
                    error = %cleanup,
                    "Failed to remove partial output"
                );
            }
            Err(err)
        }
    }
}

fn export_scene(args: &Args, config: ExportConfig) -> Result<ExportSummary> {
    let scene = load_scene(&args.scene)?;
    tracing::info!(
        scene = %args.scene.display(),
        objects = scene.objects.len(),
        "Loaded scene"
    );

    let exporter = Exporter::new(config);
    write_output(&args.output, |out| {
        let (_, summary) = exporter
            .export_to_writer(out, &scene.project_origin, &scene.north, &scene.objects)
            .with_context(|| format!("Failed to export {}", args.output.display()))?;
        Ok(summary)
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,ifc_export_engine=debug".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(worker_threads())
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let start = Instant::now();
    let summary = export_scene(&args, export_config(&args))?;
    tracing::info!(
        output = %args.output.display(),
        records = summary.records,
        products = summary.products,
        triangles = summary.triangles,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Export complete"
    );
    Ok(())
}
