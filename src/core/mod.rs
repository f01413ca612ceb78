// src/core/mod.rs
//! Core services: record editing, rendering, augmentation and export

pub mod augment;
pub mod config_manager;
pub mod editor;
pub mod export;
pub mod form;
pub mod fs_ops;
pub mod html;
pub mod layout;
pub mod preview;
pub mod service_client;
pub mod stylesheet;

pub use augment::{Augmentation, AugmentationClient, AugmentationFailed, TextGenerator};
pub use config_manager::ConfigManager;
pub use editor::{EditError, FieldEdit};
pub use export::{Exporter, PdfAssembler, Rasterizer};
pub use fs_ops::FsOps;
pub use html::Node;
pub use layout::Layout;
pub use service_client::ServiceClient;
