// DetectionFolder — images with text bounding-box annotations
//
// Layout (PennFudan style):
//
//   root/
//     PNGImages/FudanPed00001.png
//     Annotation/FudanPed00001.txt
//
// Construction lists the image directory once and keeps the stems. The
// annotation is read and parsed on every `get`.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;

use pictor_core::{Error, Result};

use crate::annotation::{parse_annotation_with_marker, DetectionTarget, BOX_MARKER};
use crate::convert::open_rgb;
use crate::dataset::{check_index, Dataset};
use crate::scan::{files_with_suffix, utf8_name};
use crate::transform::PairedTransform;

pub const DEFAULT_IMAGE_DIR: &str = "PNGImages";
pub const DEFAULT_ANNOTATION_DIR: &str = "Annotation";
pub const DEFAULT_IMAGE_EXTENSION: &str = ".png";
pub const DEFAULT_ANNOTATION_EXTENSION: &str = ".txt";

/// Builder for [`DetectionFolder`].
pub struct DetectionFolderBuilder {
    root: PathBuf,
    image_dir: String,
    annotation_dir: String,
    image_extension: String,
    annotation_extension: String,
    marker: String,
    transform: Option<Box<dyn PairedTransform<RgbImage, DetectionTarget>>>,
}

impl DetectionFolderBuilder {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DetectionFolderBuilder {
            root: root.as_ref().to_path_buf(),
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
            annotation_dir: DEFAULT_ANNOTATION_DIR.to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            annotation_extension: DEFAULT_ANNOTATION_EXTENSION.to_string(),
            marker: BOX_MARKER.to_string(),
            transform: None,
        }
    }

    pub fn image_dir(mut self, name: impl Into<String>) -> Self {
        self.image_dir = name.into();
        self
    }

    pub fn annotation_dir(mut self, name: impl Into<String>) -> Self {
        self.annotation_dir = name.into();
        self
    }

    pub fn image_extension(mut self, ext: impl Into<String>) -> Self {
        self.image_extension = ext.into();
        self
    }

    pub fn annotation_extension(mut self, ext: impl Into<String>) -> Self {
        self.annotation_extension = ext.into();
        self
    }

    /// Token identifying box lines in annotation files.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn transform(
        mut self,
        t: impl PairedTransform<RgbImage, DetectionTarget> + 'static,
    ) -> Self {
        self.transform = Some(Box::new(t));
        self
    }

    pub fn build(self) -> Result<DetectionFolder> {
        let image_dir = self.root.join(&self.image_dir);
        let annotation_dir = self.root.join(&self.annotation_dir);

        let mut stems = Vec::new();
        for path in files_with_suffix(&image_dir, &self.image_extension)? {
            if let Some(stem) = utf8_name(&path).and_then(|n| n.strip_suffix(&self.image_extension)) {
                stems.push(stem.to_string());
            }
        }
        if stems.is_empty() {
            return Err(Error::empty_source(image_dir));
        }
        debug!(root = %self.root.display(), images = stems.len(), "scanned detection folder");

        Ok(DetectionFolder {
            image_dir,
            annotation_dir,
            stems,
            image_extension: self.image_extension,
            annotation_extension: self.annotation_extension,
            marker: self.marker,
            transform: self.transform,
        })
    }
}

/// Object-detection dataset: every sample is `(image, DetectionTarget)`.
pub struct DetectionFolder {
    image_dir: PathBuf,
    annotation_dir: PathBuf,
    stems: Vec<String>,
    image_extension: String,
    annotation_extension: String,
    marker: String,
    transform: Option<Box<dyn PairedTransform<RgbImage, DetectionTarget>>>,
}

impl DetectionFolder {
    pub fn builder<P: AsRef<Path>>(root: P) -> DetectionFolderBuilder {
        DetectionFolderBuilder::new(root)
    }

    /// Image stems (file names without extension) in sample order.
    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    pub fn image_path(&self, index: usize) -> Result<PathBuf> {
        check_index(index, self.stems.len())?;
        Ok(self
            .image_dir
            .join(format!("{}{}", self.stems[index], self.image_extension)))
    }

    pub fn annotation_path(&self, index: usize) -> Result<PathBuf> {
        check_index(index, self.stems.len())?;
        Ok(self
            .annotation_dir
            .join(format!("{}{}", self.stems[index], self.annotation_extension)))
    }

    /// Read and parse the annotation of the i-th sample without decoding
    /// its image.
    pub fn target(&self, index: usize) -> Result<DetectionTarget> {
        let text = fs::read_to_string(self.annotation_path(index)?)?;
        Ok(parse_annotation_with_marker(&text, &self.marker))
    }
}

impl Dataset for DetectionFolder {
    type Item = (RgbImage, DetectionTarget);

    fn len(&self) -> usize {
        self.stems.len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        let img = open_rgb(&self.image_path(index)?)?;
        let target = self.target(index)?;
        Ok(match &self.transform {
            Some(t) => t.apply(img, target),
            None => (img, target),
        })
    }

    fn name(&self) -> &str {
        "DetectionFolder"
    }
}
