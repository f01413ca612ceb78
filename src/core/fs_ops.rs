// src/core/fs_ops.rs
//! File system helpers for CLI input and export output

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::app_log;
use crate::types::ResumeData;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            app_log!(info, "Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write text, creating parent directories as needed
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        Self::write_bytes(path, content.as_bytes()).await
    }

    pub async fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir_exists(parent).await?;
            }
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        app_log!(info, "Written file: {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Load a record from a JSON file in the camelCase wire format
    pub async fn read_record(path: &Path) -> Result<ResumeData> {
        let content = Self::read_file_safe(path).await?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse resume JSON: {}", path.display()))
    }
}
