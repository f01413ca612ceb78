// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_log;
use crate::core::augment::{AugmentationClient, FAILURE_MESSAGE};
use crate::core::export::Exporter;
use crate::core::html;
use crate::core::preview::render_preview;
use crate::core::{ConfigManager, FsOps, Layout, ServiceClient};
use crate::types::ResumeData;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "Form-driven resume builder with live preview, AI assist and PDF export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Also write logs to this file (truncated on startup)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the web editor
    Serve,
    /// Render the preview as a standalone HTML document
    Render {
        /// Resume JSON file; the demo record when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = "Modern")]
        layout: Layout,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export the preview as a one-page PDF
    Export {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = "Modern")]
        layout: Layout,
        /// Output file; `<output dir>/Resume-<name>.pdf` when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fill in summary and skills with the text-generation service
    Generate {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the demonstration record as JSON
    Demo {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub async fn handle_command(command: Command, config: ConfigManager) -> Result<()> {
    match command {
        Command::Serve => start_web_server(config).await,

        Command::Render { input, layout, out } => {
            let record = load_record(input.as_deref()).await?;
            let root = render_preview(&record, layout);
            let document = html::document(&format!("{} - Resume", record.personal.name), &root, None);
            emit(out.as_deref(), &document).await
        }

        Command::Export { input, layout, out } => {
            let record = load_record(input.as_deref()).await?;
            let root = render_preview(&record, layout);

            let pdf = Exporter::from_config(&config.export)
                .export(&root, &record.personal.name)
                .await
                .context("PDF export failed")?;

            let path = export_destination(&config, out, &pdf.file_name).await?;
            FsOps::write_bytes(&path, &pdf.bytes).await?;
            app_log!(
                info,
                "Exported {} ({}x{} px page)",
                path.display(),
                pdf.page.width,
                pdf.page.height
            );
            println!("{}", path.display());
            Ok(())
        }

        Command::Generate { input, out } => {
            let record = load_record(input.as_deref()).await?;
            let client = AugmentationClient::new(Arc::new(ServiceClient::new(&config.generation)?));

            let augmentation = client
                .generate_summary_and_skills(&record)
                .await
                .map_err(|_| anyhow::anyhow!(FAILURE_MESSAGE))?;

            let merged = record.merge_augmentation(&augmentation);
            emit(out.as_deref(), &serde_json::to_string_pretty(&merged)?).await
        }

        Command::Demo { out } => {
            emit(out.as_deref(), &serde_json::to_string_pretty(&ResumeData::demo())?).await
        }
    }
}

async fn load_record(input: Option<&Path>) -> Result<ResumeData> {
    match input {
        Some(path) => {
            app_log!(info, "Loading resume from {}", path.display());
            FsOps::read_record(path).await
        }
        None => Ok(ResumeData::demo()),
    }
}

/// Explicit `--out`, or the file name inside the configured output directory,
/// which is created on demand.
async fn export_destination(config: &ConfigManager, out: Option<PathBuf>, file_name: &str) -> Result<PathBuf> {
    match out {
        Some(path) => Ok(path),
        None => {
            config.ensure_directories().await?;
            Ok(config.export.output_dir.join(file_name))
        }
    }
}

async fn emit(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => FsOps::write_file_safe(path, content).await,
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
