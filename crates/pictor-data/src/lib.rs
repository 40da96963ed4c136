//! # pictor-data
//!
//! Directory-backed image datasets.
//!
//! This crate provides:
//! - [`Dataset`] trait — indexed, lazily-loaded sample source
//! - [`ClassFolder`] — class-per-directory images with a fixed or per-instance vocabulary
//! - [`MaskFolder`] — image / binary-mask pairs for segmentation
//! - [`DetectionFolder`] — images with text bounding-box annotations
//! - [`ImageDirectory`] — unlabeled images
//! - [`Transform`] / [`PairedTransform`] — per-access preprocessing hooks
//
// Every dataset enumerates its entries once, at construction, and fails with
// `Error::EmptySource` if there are none. Each `get` opens, decodes and closes
// its source files; nothing is cached.

pub mod annotation;
pub mod augment;
pub mod class_folder;
pub mod convert;
pub mod dataset;
pub mod detection;
pub mod image_dir;
pub mod labels;
pub mod mask_folder;
mod scan;
pub mod transform;

pub use annotation::{parse_annotation, parse_box_line, BoundingBox, DetectionTarget};
pub use augment::{RandomHorizontalFlip, Resize};
pub use class_folder::{ClassFolder, ClassFolderBuilder, RmbFolder};
pub use convert::{image_to_chw, mask_to_binary};
pub use dataset::Dataset;
pub use detection::{DetectionFolder, DetectionFolderBuilder};
pub use image_dir::{ImageDirectory, ImageDirectoryBuilder};
pub use labels::{ClassLabel, ClassTable, Denomination, FixedLabels, LabelTable};
pub use mask_folder::{derive_image_path, MaskFolder, MaskFolderBuilder};
pub use transform::{Compose, Joint, Normalize, PairedTransform, Standardize, Transform};

pub use pictor_core::{Array, Error, Result, Shape};
