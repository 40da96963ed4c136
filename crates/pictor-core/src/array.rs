// Array — owned, dense, row-major f32 buffer with a shape
//
// This is the numeric form a sample takes once it leaves the image decoder:
// planes are laid out channel-first ([C, H, W]) so they can be handed to a
// batching layer without further reordering.

use crate::error::{Error, Result};
use crate::shape::Shape;

/// Dense `f32` array in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    data: Vec<f32>,
    shape: Shape,
}

impl Array {
    /// Wrap `data` with the given shape, checking the element count.
    pub fn from_vec(data: Vec<f32>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        let expected = shape.elem_count();
        if data.len() != expected {
            return Err(Error::ElementCountMismatch {
                shape,
                expected,
                got: data.len(),
            });
        }
        Ok(Array { data, shape })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Element at a multi-dimensional index, `None` when out of bounds or
    /// when the index rank differs from the array rank.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        if index.len() != self.shape.rank() {
            return None;
        }
        let strides = self.shape.stride_contiguous();
        let mut offset = 0;
        for ((&i, &d), &s) in index.iter().zip(self.shape.dims()).zip(&strides) {
            if i >= d {
                return None;
            }
            offset += i * s;
        }
        self.data.get(offset).copied()
    }

    /// Apply `f` to every element in place.
    pub fn map_inplace(&mut self, f: impl Fn(f32) -> f32) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Mutable view of one leading-dimension slice (a channel plane for CHW).
    pub fn channel_mut(&mut self, c: usize) -> Option<&mut [f32]> {
        let channels = self.shape.dim(0)?;
        if c >= channels {
            return None;
        }
        let plane = self.data.len() / channels;
        Some(&mut self.data[c * plane..(c + 1) * plane])
    }

    /// Error unless this array has exactly `expected` shape.
    pub fn expect_shape(&self, expected: impl Into<Shape>) -> Result<()> {
        let expected = expected.into();
        if self.shape != expected {
            return Err(Error::ShapeMismatch {
                expected,
                got: self.shape.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_count() {
        let err = Array::from_vec(vec![0.0; 5], (2, 3)).unwrap_err();
        assert!(matches!(
            err,
            Error::ElementCountMismatch {
                expected: 6,
                got: 5,
                ..
            }
        ));
    }

    #[test]
    fn get_uses_row_major_offsets() {
        let a = Array::from_vec((0..24).map(|v| v as f32).collect(), (2, 3, 4)).unwrap();
        assert_eq!(a.get(&[0, 0, 0]), Some(0.0));
        assert_eq!(a.get(&[1, 2, 3]), Some(23.0));
        assert_eq!(a.get(&[0, 1, 2]), Some(6.0));
        assert_eq!(a.get(&[2, 0, 0]), None);
        assert_eq!(a.get(&[0, 0]), None);
    }

    #[test]
    fn channel_planes() {
        let mut a = Array::from_vec(vec![0.0; 12], (3, 2, 2)).unwrap();
        a.channel_mut(1).unwrap().fill(7.0);
        assert_eq!(a.get(&[0, 1, 1]), Some(0.0));
        assert_eq!(a.get(&[1, 0, 0]), Some(7.0));
        assert_eq!(a.get(&[2, 0, 0]), Some(0.0));
        assert!(a.channel_mut(3).is_none());
    }

    #[test]
    fn map_and_shape_check() {
        let mut a = Array::from_vec(vec![1.0, 2.0], 2).unwrap();
        a.map_inplace(|v| v * 10.0);
        assert_eq!(a.as_slice(), &[10.0, 20.0]);
        assert!(a.expect_shape(2).is_ok());
        assert!(a.expect_shape((1, 2)).is_err());
    }
}
