// ClassFolder — directory-per-class image classification dataset
//
// Layout (any depth; a file's class is the name of the directory holding it):
//
//   root/
//     1/
//       img_001.jpg
//     100/
//       img_002.jpg
//
// The class vocabulary is a `LabelTable`: either the fixed RMB denominations
// or a per-instance `ClassTable`. A directory that holds matching files but
// is not in the vocabulary fails construction with `UnknownClass`; one that
// holds no matching files is never looked up.
//
// USAGE:
//
//   let ds = ClassFolder::rmb("data/rmb_split/train").build()?;
//   let (img, label) = ds.get(0)?;

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;

use pictor_core::{Error, Result};

use crate::convert::open_rgb;
use crate::dataset::{check_index, Dataset};
use crate::labels::{ClassTable, Denomination, FixedLabels, LabelTable};
use crate::scan::class_files;
use crate::transform::Transform;

/// Default image extension (case-sensitive).
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Builder for [`ClassFolder`].
pub struct ClassFolderBuilder<L> {
    root: PathBuf,
    labels: L,
    extension: String,
    transform: Option<Box<dyn Transform<RgbImage>>>,
}

impl<L: LabelTable> ClassFolderBuilder<L> {
    pub fn new<P: AsRef<Path>>(root: P, labels: L) -> Self {
        ClassFolderBuilder {
            root: root.as_ref().to_path_buf(),
            labels,
            extension: DEFAULT_EXTENSION.to_string(),
            transform: None,
        }
    }

    /// Only files whose names end with `ext` are samples.
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    /// Transform applied to every decoded image.
    pub fn transform(mut self, t: impl Transform<RgbImage> + 'static) -> Self {
        self.transform = Some(Box::new(t));
        self
    }

    /// Scan the directory tree and build the dataset.
    pub fn build(self) -> Result<ClassFolder<L>> {
        ClassFolder::scan(self)
    }
}

/// Image classification dataset whose labels come from directory names.
pub struct ClassFolder<L> {
    root: PathBuf,
    labels: L,
    /// Per-sample metadata: (path, class_index).
    entries: Vec<(PathBuf, usize)>,
    transform: Option<Box<dyn Transform<RgbImage>>>,
}

/// The two-denomination RMB banknote set.
pub type RmbFolder = ClassFolder<FixedLabels<Denomination>>;

impl ClassFolder<FixedLabels<Denomination>> {
    /// Builder over the fixed `"1"` / `"100"` vocabulary.
    pub fn rmb<P: AsRef<Path>>(root: P) -> ClassFolderBuilder<FixedLabels<Denomination>> {
        ClassFolderBuilder::new(root, FixedLabels::new())
    }
}

impl ClassFolder<ClassTable> {
    /// Builder over a vocabulary chosen for this instance.
    pub fn with_classes<P: AsRef<Path>>(root: P, table: ClassTable) -> ClassFolderBuilder<ClassTable> {
        ClassFolderBuilder::new(root, table)
    }
}

impl<L: LabelTable> ClassFolder<L> {
    pub fn builder<P: AsRef<Path>>(root: P, labels: L) -> ClassFolderBuilder<L> {
        ClassFolderBuilder::new(root, labels)
    }

    fn scan(builder: ClassFolderBuilder<L>) -> Result<Self> {
        let ClassFolderBuilder {
            root,
            labels,
            extension,
            transform,
        } = builder;

        let mut entries = Vec::new();
        for (class, path) in class_files(&root, &extension)? {
            let Some(index) = labels.index_of(&class) else {
                return Err(Error::UnknownClass {
                    name: class,
                    path: path.parent().unwrap_or(root.as_path()).to_path_buf(),
                });
            };
            entries.push((path, index));
        }

        if entries.is_empty() {
            return Err(Error::empty_source(root));
        }
        debug!(
            root = %root.display(),
            samples = entries.len(),
            classes = labels.num_classes(),
            "scanned class folder"
        );

        Ok(ClassFolder {
            root,
            labels,
            entries,
            transform,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Class names ordered by index.
    pub fn class_names(&self) -> Vec<String> {
        self.labels.names()
    }

    pub fn num_classes(&self) -> usize {
        self.labels.num_classes()
    }

    /// Class index of the i-th sample, without loading it.
    pub fn class_of(&self, index: usize) -> Result<usize> {
        check_index(index, self.entries.len())?;
        Ok(self.entries[index].1)
    }

    /// File path of the i-th sample.
    pub fn path_of(&self, index: usize) -> Result<&Path> {
        check_index(index, self.entries.len())?;
        Ok(&self.entries[index].0)
    }

    /// All `(path, class_index)` entries in index order.
    pub fn entries(&self) -> &[(PathBuf, usize)] {
        &self.entries
    }
}

impl<L: LabelTable> Dataset for ClassFolder<L> {
    type Item = (RgbImage, usize);

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.entries.len())?;
        let (path, label) = &self.entries[index];
        let img = open_rgb(path)?;
        let img = match &self.transform {
            Some(t) => t.apply(img),
            None => img,
        };
        Ok((img, *label))
    }

    fn name(&self) -> &str {
        "ClassFolder"
    }
}
