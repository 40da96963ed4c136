// ImageDirectory — unlabeled images in one flat directory (e.g. CelebA)

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;

use pictor_core::{Error, Result};

use crate::convert::open_rgb;
use crate::dataset::{check_index, Dataset};
use crate::scan::files_with_suffix;
use crate::transform::Transform;

pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Builder for [`ImageDirectory`].
pub struct ImageDirectoryBuilder {
    root: PathBuf,
    extension: String,
    transform: Option<Box<dyn Transform<RgbImage>>>,
}

impl ImageDirectoryBuilder {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        ImageDirectoryBuilder {
            root: root.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
            transform: None,
        }
    }

    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    pub fn transform(mut self, t: impl Transform<RgbImage> + 'static) -> Self {
        self.transform = Some(Box::new(t));
        self
    }

    pub fn build(self) -> Result<ImageDirectory> {
        let paths = files_with_suffix(&self.root, &self.extension)?;
        if paths.is_empty() {
            return Err(Error::empty_source(self.root));
        }
        debug!(root = %self.root.display(), images = paths.len(), "scanned image directory");
        Ok(ImageDirectory {
            root: self.root,
            paths,
            transform: self.transform,
        })
    }
}

/// Dataset of images without targets; `get` returns the image alone.
pub struct ImageDirectory {
    root: PathBuf,
    paths: Vec<PathBuf>,
    transform: Option<Box<dyn Transform<RgbImage>>>,
}

impl ImageDirectory {
    pub fn builder<P: AsRef<Path>>(root: P) -> ImageDirectoryBuilder {
        ImageDirectoryBuilder::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Dataset for ImageDirectory {
    type Item = RgbImage;

    fn len(&self) -> usize {
        self.paths.len()
    }

    fn get(&self, index: usize) -> Result<RgbImage> {
        check_index(index, self.paths.len())?;
        let img = open_rgb(&self.paths[index])?;
        Ok(match &self.transform {
            Some(t) => t.apply(img),
            None => img,
        })
    }

    fn name(&self) -> &str {
        "ImageDirectory"
    }
}
