// MaskFolder — paired image / segmentation-mask dataset
//
// One flat directory holds images and their masks side by side:
//
//   root/
//     00001.png
//     00001_matte.png
//     00002.png
//     00002_matte.png
//
// Only the masks are enumerated. The image path is derived from the mask
// path by string substitution at access time (`X_matte.png` → `X.png`),
// never by a second listing. Mask order is shuffled once at construction by
// the injected random source and is stable afterwards.
//
// Each sample is `(image [3, S, S], mask [1, S, S])`, both `f32`. Image values
// stay in 0..=255; mask values are in {0, 1}.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use pictor_core::{Array, Error, Result};

use crate::convert::{
    image_to_chw, mask_to_binary, open_mask, open_rgb, resize_mask_square, resize_rgb_square,
};
use crate::dataset::{check_index, Dataset};
use crate::scan::files_with_suffix;
use crate::transform::PairedTransform;

pub const DEFAULT_MASK_SUFFIX: &str = "_matte.png";
pub const DEFAULT_IMAGE_EXTENSION: &str = ".png";
pub const DEFAULT_IN_SIZE: u32 = 224;
/// Seed used by [`MaskFolderBuilder::build`] when none is given.
pub const DEFAULT_SEED: u64 = 1;

/// Image path for a mask path: strip `mask_suffix` from the file name and
/// append `image_extension`. `None` if the name does not end with the suffix.
pub fn derive_image_path(mask: &Path, mask_suffix: &str, image_extension: &str) -> Option<PathBuf> {
    let name = mask.file_name()?.to_str()?;
    let stem = name.strip_suffix(mask_suffix)?;
    Some(mask.with_file_name(format!("{stem}{image_extension}")))
}

/// Builder for [`MaskFolder`].
pub struct MaskFolderBuilder {
    root: PathBuf,
    in_size: u32,
    mask_suffix: String,
    image_extension: String,
    seed: u64,
    transform: Option<Box<dyn PairedTransform<Array, Array>>>,
}

impl MaskFolderBuilder {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        MaskFolderBuilder {
            root: root.as_ref().to_path_buf(),
            in_size: DEFAULT_IN_SIZE,
            mask_suffix: DEFAULT_MASK_SUFFIX.to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            seed: DEFAULT_SEED,
            transform: None,
        }
    }

    /// Side length both planes are resized to.
    pub fn in_size(mut self, size: u32) -> Self {
        self.in_size = size;
        self
    }

    pub fn mask_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.mask_suffix = suffix.into();
        self
    }

    pub fn image_extension(mut self, ext: impl Into<String>) -> Self {
        self.image_extension = ext.into();
        self
    }

    /// Seed of the `StdRng` used by [`build`](Self::build).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Transform applied to the `(image, mask)` pair. Wrap a single-array
    /// transform in [`Joint`](crate::transform::Joint) to apply it to both.
    pub fn transform(mut self, t: impl PairedTransform<Array, Array> + 'static) -> Self {
        self.transform = Some(Box::new(t));
        self
    }

    /// Build, shuffling with `StdRng::seed_from_u64(seed)`.
    pub fn build(self) -> Result<MaskFolder> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.build_with_rng(&mut rng)
    }

    /// Build, shuffling the mask order with the given random source.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<MaskFolder> {
        let mut masks = files_with_suffix(&self.root, &self.mask_suffix)?;
        if masks.is_empty() {
            return Err(Error::empty_source(self.root));
        }
        masks.shuffle(rng);
        debug!(root = %self.root.display(), masks = masks.len(), "scanned mask folder");

        Ok(MaskFolder {
            root: self.root,
            masks,
            in_size: self.in_size,
            mask_suffix: self.mask_suffix,
            image_extension: self.image_extension,
            transform: self.transform,
        })
    }
}

/// Segmentation dataset of image / binary-mask pairs.
pub struct MaskFolder {
    root: PathBuf,
    masks: Vec<PathBuf>,
    in_size: u32,
    mask_suffix: String,
    image_extension: String,
    transform: Option<Box<dyn PairedTransform<Array, Array>>>,
}

impl MaskFolder {
    pub fn builder<P: AsRef<Path>>(root: P) -> MaskFolderBuilder {
        MaskFolderBuilder::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn in_size(&self) -> u32 {
        self.in_size
    }

    /// Mask paths in sample order.
    pub fn mask_paths(&self) -> &[PathBuf] {
        &self.masks
    }

    /// Image path paired with a mask path.
    pub fn image_path_for(&self, mask: &Path) -> Result<PathBuf> {
        derive_image_path(mask, &self.mask_suffix, &self.image_extension).ok_or_else(|| {
            Error::msg(format!(
                "mask {} does not end with {:?}",
                mask.display(),
                self.mask_suffix
            ))
        })
    }

    fn load_image(&self, path: &Path) -> Result<Array> {
        let img = resize_rgb_square(&open_rgb(path)?, self.in_size);
        image_to_chw(&img)
    }

    fn load_mask(&self, path: &Path) -> Result<Array> {
        let mask = resize_mask_square(&open_mask(path)?, self.in_size);
        mask_to_binary(&mask)
    }
}

impl Dataset for MaskFolder {
    type Item = (Array, Array);

    fn len(&self) -> usize {
        self.masks.len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.masks.len())?;
        let mask_path = &self.masks[index];
        let image_path = self.image_path_for(mask_path)?;

        let side = self.in_size as usize;
        let image = self.load_image(&image_path)?;
        image.expect_shape((3, side, side))?;
        let mask = self.load_mask(mask_path)?;
        mask.expect_shape((1, side, side))?;

        Ok(match &self.transform {
            Some(t) => t.apply(image, mask),
            None => (image, mask),
        })
    }

    fn name(&self) -> &str {
        "MaskFolder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_path_strips_suffix() {
        let p = derive_image_path(Path::new("/data/portrait/00017_matte.png"), "_matte.png", ".png");
        assert_eq!(p, Some(PathBuf::from("/data/portrait/00017.png")));
    }

    #[test]
    fn image_path_with_other_extension() {
        let p = derive_image_path(Path::new("a/b_matte.png"), "_matte.png", ".jpg");
        assert_eq!(p, Some(PathBuf::from("a/b.jpg")));
    }

    #[test]
    fn image_path_requires_suffix() {
        assert!(derive_image_path(Path::new("a/b.png"), "_matte.png", ".png").is_none());
    }
}
