// Image augmentation — resizing and random flips
//
// The flip decides once per call, so a paired application (image + mask,
// image + boxes) always keeps both halves aligned.

use image::imageops::{self, FilterType};
use image::RgbImage;
use rand::thread_rng;
use rand::Rng;

use pictor_core::Array;

use crate::annotation::{BoundingBox, DetectionTarget};
use crate::transform::{PairedTransform, Transform};

// Resize

/// Resize an image to exactly `(width, height)`.
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
    pub filter: FilterType,
}

impl Resize {
    /// Bilinear resize.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            filter: FilterType::Triangle,
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl Transform<RgbImage> for Resize {
    fn apply(&self, img: RgbImage) -> RgbImage {
        imageops::resize(&img, self.width, self.height, self.filter)
    }
}

// RandomHorizontalFlip

/// Flip horizontally with probability `p`.
///
/// Works on decoded images, on `[C, H, W]` arrays, on image/mask pairs and on
/// image/box pairs (boxes are mirrored with the image).
#[derive(Debug, Clone, Copy)]
pub struct RandomHorizontalFlip {
    pub p: f64,
}

impl RandomHorizontalFlip {
    pub fn new(p: f64) -> Self {
        Self { p }
    }

    fn should_flip(&self) -> bool {
        thread_rng().gen::<f64>() < self.p
    }
}

fn flip_chw(mut a: Array) -> Array {
    let dims = a.dims().to_vec();
    if dims.len() != 3 {
        return a;
    }
    let w = dims[2];
    for row in a.as_mut_slice().chunks_mut(w.max(1)) {
        row.reverse();
    }
    a
}

/// Mirror boxes across the vertical axis of an image `width` pixels wide.
pub fn flip_boxes(target: &mut DetectionTarget, width: u32) {
    let w = width as f32;
    for b in &mut target.boxes {
        *b = BoundingBox::new(w - b.xmax, b.ymin, w - b.xmin, b.ymax);
    }
}

impl Transform<Array> for RandomHorizontalFlip {
    fn apply(&self, a: Array) -> Array {
        if self.should_flip() {
            flip_chw(a)
        } else {
            a
        }
    }
}

impl Transform<RgbImage> for RandomHorizontalFlip {
    fn apply(&self, img: RgbImage) -> RgbImage {
        if self.should_flip() {
            imageops::flip_horizontal(&img)
        } else {
            img
        }
    }
}

impl PairedTransform<Array, Array> for RandomHorizontalFlip {
    fn apply(&self, image: Array, mask: Array) -> (Array, Array) {
        if self.should_flip() {
            (flip_chw(image), flip_chw(mask))
        } else {
            (image, mask)
        }
    }
}

impl PairedTransform<RgbImage, DetectionTarget> for RandomHorizontalFlip {
    fn apply(&self, img: RgbImage, mut target: DetectionTarget) -> (RgbImage, DetectionTarget) {
        if !self.should_flip() {
            return (img, target);
        }
        flip_boxes(&mut target, img.width());
        (imageops::flip_horizontal(&img), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn ramp(c: usize, h: usize, w: usize) -> Array {
        Array::from_vec((0..c * h * w).map(|v| v as f32).collect(), (c, h, w)).unwrap()
    }

    #[test]
    fn flip_array_deterministic() {
        // p=1.0 always flips
        let out = Transform::<Array>::apply(&RandomHorizontalFlip::new(1.0), ramp(1, 2, 3));
        assert_eq!(out.as_slice(), &[2.0, 1.0, 0.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn never_flip() {
        let out = Transform::<Array>::apply(&RandomHorizontalFlip::new(0.0), ramp(1, 2, 3));
        assert_eq!(out, ramp(1, 2, 3));
    }

    #[test]
    fn flip_pair_keeps_alignment() {
        let flip = RandomHorizontalFlip::new(1.0);
        let (img, mask) = PairedTransform::apply(&flip, ramp(3, 2, 2), ramp(1, 2, 2));
        assert_eq!(img.get(&[2, 0, 0]), Some(9.0));
        assert_eq!(mask.as_slice(), &[1.0, 0.0, 3.0, 2.0]);
    }

    #[test]
    fn flip_boxes_with_image() {
        let mut img = RgbImage::new(100, 10);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        let target = DetectionTarget {
            boxes: vec![BoundingBox::new(10.0, 2.0, 30.0, 8.0)],
            labels: vec![1],
        };
        let (img, target) = PairedTransform::apply(&RandomHorizontalFlip::new(1.0), img, target);
        assert_eq!(img.get_pixel(99, 0), &Rgb([255, 0, 0]));
        assert_eq!(target.boxes[0], BoundingBox::new(70.0, 2.0, 90.0, 8.0));
        assert_eq!(target.labels, vec![1]);
    }

    #[test]
    fn resize_exact() {
        let out = Transform::apply(&Resize::new(5, 3), RgbImage::new(20, 20));
        assert_eq!(out.dimensions(), (5, 3));
    }
}
