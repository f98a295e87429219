//! # VasthraAI CLI
//!
//! Headless front end over `vasthra_core`: upload a sketch, inspect a saved
//! design record, and show the effective settings.
//!
//! ```text
//! vasthra_cli generate sketch.png --record design.json --download
//! vasthra_cli view --record design.json --out-dir ./designs
//! vasthra_cli --service-url http://gpu-box:8000 config --save
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use vasthra_core::config;
use vasthra_core::download::{download_dir_for, save_design};
use vasthra_core::errors::{VasthraError, VasthraResult};
use vasthra_core::generation::GenerationClient;
use vasthra_core::handoff::{Route, ViewerEntry};
use vasthra_core::sketch::SketchFile;
use vasthra_core::uploader::Uploader;
use vasthra_core::viewer::{ImageKind, Viewer};
use vasthra_core::{logging, ServiceConfig};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Generation service address, overriding settings and environment
    #[arg(long, global = true)]
    service_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a PNG or JPEG sketch and print the design record
    Generate {
        sketch: PathBuf,

        /// Also write the record JSON to this file
        #[arg(long)]
        record: Option<PathBuf>,

        /// Save the generated design once it is ready
        #[arg(long)]
        download: bool,
    },
    /// Show and download the design held in a record file
    View {
        #[arg(long)]
        record: PathBuf,

        /// Directory for the downloaded design
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the effective settings as TOML
    Config {
        /// Also write them to the settings file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("warn");
    let args = Args::parse();

    let mut settings = config::load()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Could not load settings, using defaults");
            ServiceConfig::default()
        })
        .with_env_overrides();
    if let Some(url) = args.service_url {
        settings = settings.with_base_url(url);
    }

    let result = match args.command {
        Command::Generate {
            sketch,
            record,
            download,
        } => match connect(settings) {
            Ok(client) => generate(&client, &sketch, record.as_deref(), download).await,
            Err(message) => Err(message),
        },
        Command::View { record, out_dir } => match connect(settings) {
            Ok(client) => view(&client, &record, out_dir).await,
            Err(message) => Err(message),
        },
        Command::Config { save } => print_config(&settings, save),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn connect(settings: ServiceConfig) -> Result<GenerationClient, String> {
    GenerationClient::new(settings).map_err(|e| e.to_string())
}

async fn generate(
    client: &GenerationClient,
    sketch: &Path,
    record_file: Option<&Path>,
    download: bool,
) -> Result<(), String> {
    let mut uploader = Uploader::new();
    let candidate = match SketchFile::from_path(sketch) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!(error = %e, "Could not read sketch");
            None
        }
    };
    if !uploader.select(candidate) {
        return Err(uploader.error().unwrap_or_default().to_string());
    }

    let Some(file) = uploader.begin_generate() else {
        return Err(uploader.error().unwrap_or_default().to_string());
    };

    println!("Generating design from {}...", file.name);
    let outcome = client.generate(&file).await;

    let record = match uploader.finish_generate(outcome) {
        Some(Route::ViewDesigns(record)) => record,
        _ => return Err(uploader.error().unwrap_or_default().to_string()),
    };

    let json = record.to_json().map_err(|e| e.to_string())?;
    println!("{json}");

    if let Some(path) = record_file {
        fs::write(path, &json).map_err(|e| {
            VasthraError::file_error("write record", path.display().to_string(), e.to_string())
                .to_string()
        })?;
        info!(path = %path.display(), "Record written");
    }

    if download {
        let viewer = match Viewer::enter(ViewerEntry::Ready(record)) {
            Ok(viewer) => viewer,
            Err(_) => return Ok(()),
        };
        let dir = download_dir_for(client.config());
        report_download(download_design(client, &viewer, &dir).await);
    }

    Ok(())
}

async fn view(client: &GenerationClient, record_file: &Path, out_dir: Option<PathBuf>) -> Result<(), String> {
    let stored = fs::read_to_string(record_file)
        .map_err(|e| warn!(path = %record_file.display(), error = %e, "Could not read record"))
        .ok();

    let viewer = Viewer::enter(ViewerEntry::from_json(stored.as_deref())).map_err(|_| {
        format!(
            "No design in {}. Run `vasthra_cli generate <SKETCH> --record {}` first.",
            record_file.display(),
            record_file.display()
        )
    })?;

    for kind in ImageKind::ALL {
        println!("{}: {}", kind.title(), viewer.image_url(*kind, client.config()));
    }

    let dir = out_dir.unwrap_or_else(|| download_dir_for(client.config()));
    report_download(download_design(client, &viewer, &dir).await);
    Ok(())
}

/// Re-fetch the generated design and save it. `None` when download is not offered.
async fn download_design(client: &GenerationClient, viewer: &Viewer, dir: &Path) -> Option<VasthraResult<PathBuf>> {
    let path = viewer.download_path()?;
    let result = match client.fetch_image(path).await {
        Ok(bytes) => save_design(&bytes, dir),
        Err(e) => Err(e),
    };
    Some(result)
}

/// Downloads are best-effort: failures are reported but do not fail the command
fn report_download(result: Option<VasthraResult<PathBuf>>) {
    match result {
        Some(Ok(path)) => println!("Design saved to {}", path.display()),
        Some(Err(e)) => {
            warn!(error = %e, "Download failed");
            eprintln!("Download failed: {e}");
        }
        None => println!("No generated design to download"),
    }
}

fn print_config(settings: &ServiceConfig, save: bool) -> Result<(), String> {
    let text = config::to_toml(settings).map_err(|e| e.to_string())?;
    print!("{text}");

    if save {
        config::save(settings).map_err(|e| e.to_string())?;
        println!("Settings saved");
    }
    Ok(())
}
