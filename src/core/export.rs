// src/core/export.rs
//! Export pipeline - rasterize the preview, wrap the image in a one-page PDF

use anyhow::{Context, Result};
use base64::Engine;
use printpdf::image_crate::{self, GenericImageView};
use printpdf::{Image, ImageTransform, Mm, PdfDocument, Pt};
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;

use crate::app_log;
use crate::core::config_manager::ExportConfig;
use crate::core::html::{self, Node};
use crate::core::FsOps;

/// Supersampling factor used when rasterizing the preview.
pub const SUPERSAMPLE_SCALE: u32 = 2;

/// CSS pixels per inch; jsPDF-style "px" pages use 0.75pt per px.
const PX_PER_INCH: f32 = 96.0;
const PT_PER_PX: f32 = 0.75;

/// Width of the preview root at scale 1.
const PREVIEW_WIDTH_PX: u32 = 800;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

// ===== Models =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RasterImage {
    pub fn to_data_url(&self) -> String {
        format!(
            "{}{}",
            PNG_DATA_URL_PREFIX,
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let payload = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| anyhow::anyhow!("Expected a base64 PNG data URL"))?;

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .context("Invalid base64 in image data URL")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub orientation: Orientation,
    pub unit: Unit,
    pub width: f32,
    pub height: f32,
}

impl PageSpec {
    /// Portrait page matching a supersampled raster, halved back to layout size.
    pub fn for_raster(image: &RasterImage, scale: u32) -> Self {
        let scale = scale.max(1) as f32;
        Self {
            orientation: Orientation::Portrait,
            unit: Unit::Px,
            width: image.width as f32 / scale,
            height: image.height as f32 / scale,
        }
    }

    pub fn size_pt(&self) -> (f32, f32) {
        match self.unit {
            Unit::Px => (self.width * PT_PER_PX, self.height * PT_PER_PX),
        }
    }
}

/// `Resume-<name with spaces as hyphens>.pdf`
pub fn pdf_file_name(person_name: &str) -> String {
    format!("Resume-{}.pdf", person_name.replace(' ', "-"))
}

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub file_name: String,
    pub page: PageSpec,
    pub bytes: Vec<u8>,
}

// ===== Collaborators =====

#[rocket::async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, root: &Node, scale: u32) -> Result<RasterImage>;
}

pub trait PdfAssembler: Send + Sync {
    fn assemble(&self, page: &PageSpec, image_data_url: &str, title: &str) -> Result<Vec<u8>>;
}

/// Renders the node to a self-contained HTML document and shells out to `wkhtmltoimage`.
pub struct CommandRasterizer {
    bin: String,
}

impl CommandRasterizer {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[rocket::async_trait]
impl Rasterizer for CommandRasterizer {
    async fn rasterize(&self, root: &Node, scale: u32) -> Result<RasterImage> {
        let workspace = tempfile::tempdir().context("Failed to create temporary workspace")?;
        let input = workspace.path().join("resume.html");
        let output = workspace.path().join("resume.png");

        FsOps::write_file_safe(&input, &raster_document(root)).await?;

        app_log!(info, "Rasterizing preview with {} at scale {}", self.bin, scale);

        let status = Command::new(&self.bin)
            .arg("--quiet")
            .arg("--zoom")
            .arg(scale.to_string())
            .arg("--width")
            .arg((PREVIEW_WIDTH_PX * scale).to_string())
            .arg(&input)
            .arg(&output)
            .status()
            .await
            .with_context(|| format!("Failed to execute {}", self.bin))?;

        if !status.success() {
            anyhow::bail!("{} exited with {}", self.bin, status);
        }

        load_png(&output).await
    }
}

/// Document handed to the rasterizer binary.
pub fn raster_document(root: &Node) -> String {
    html::static_document("Resume", root)
}

async fn load_png(path: &Path) -> Result<RasterImage> {
    let png = FsOps::read_bytes(path).await?;
    let image = image_crate::load_from_memory(&png).context("Failed to decode rasterized image")?;
    let (width, height) = GenericImageView::dimensions(&image);
    Ok(RasterImage { png, width, height })
}

/// Single-page PDF with the image stretched over the whole page.
pub struct PrintPdfAssembler;

impl PdfAssembler for PrintPdfAssembler {
    fn assemble(&self, page: &PageSpec, image_data_url: &str, title: &str) -> Result<Vec<u8>> {
        let png = decode_data_url(image_data_url)?;
        let image = image_crate::load_from_memory(&png).context("Failed to decode image payload")?;
        let (image_width, _) = GenericImageView::dimensions(&image);

        let (width_pt, height_pt) = page.size_pt();
        let (document, page_index, layer_index) = PdfDocument::new(
            title,
            Mm::from(Pt(width_pt)),
            Mm::from(Pt(height_pt)),
            "Layer 1",
        );
        let layer = document.get_page(page_index).get_layer(layer_index);

        // image pixels per page inch, so the raster covers exactly page.width px
        let dpi = image_width as f32 * PX_PER_INCH / page.width.max(1.0);
        Image::from_dynamic_image(&image).add_to_layer(
            layer,
            ImageTransform {
                dpi: Some(dpi),
                ..Default::default()
            },
        );

        document
            .save_to_bytes()
            .map_err(|e| anyhow::anyhow!("Failed to write PDF: {:?}", e))
    }
}

// ===== Export Trigger =====

#[derive(Clone)]
pub struct Exporter {
    rasterizer: Arc<dyn Rasterizer>,
    assembler: Arc<dyn PdfAssembler>,
}

impl Exporter {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, assembler: Arc<dyn PdfAssembler>) -> Self {
        Self {
            rasterizer,
            assembler,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(
            Arc::new(CommandRasterizer::new(config.rasterizer_bin.clone())),
            Arc::new(PrintPdfAssembler),
        )
    }

    /// Rasterize `root` at the supersampling scale and assemble the PDF.
    /// Failures are returned as-is; nothing is retried.
    pub async fn export(&self, root: &Node, person_name: &str) -> Result<ExportedPdf> {
        let image = self.rasterizer.rasterize(root, SUPERSAMPLE_SCALE).await?;
        let page = PageSpec::for_raster(&image, SUPERSAMPLE_SCALE);
        let file_name = pdf_file_name(person_name);

        app_log!(
            info,
            "Assembling {} from {}x{} raster ({}x{} px page)",
            file_name,
            image.width,
            image.height,
            page.width,
            page.height
        );

        let bytes = self
            .assembler
            .assemble(&page, &image.to_data_url(), &file_name)?;

        Ok(ExportedPdf {
            file_name,
            page,
            bytes,
        })
    }
}
