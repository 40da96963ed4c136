// Transform — per-access preprocessing hooks
//
// A dataset applies its transform once per `get`, after decoding. Datasets
// whose target is spatial (masks, boxes) take a `PairedTransform` so both
// halves of the sample are changed together.

use pictor_core::Array;

/// A transform applied to each sample before it is returned.
pub trait Transform<T>: Send + Sync {
    /// Apply the transform to a sample, returning the modified sample.
    fn apply(&self, sample: T) -> T;
}

impl<T, F> Transform<T> for F
where
    F: Fn(T) -> T + Send + Sync,
{
    fn apply(&self, sample: T) -> T {
        self(sample)
    }
}

/// A transform over a sample and its spatial target at once.
pub trait PairedTransform<A, B>: Send + Sync {
    fn apply(&self, sample: A, target: B) -> (A, B);
}

impl<A, B, F> PairedTransform<A, B> for F
where
    F: Fn(A, B) -> (A, B) + Send + Sync,
{
    fn apply(&self, sample: A, target: B) -> (A, B) {
        self(sample, target)
    }
}

/// Lift a single-sample transform to a pair by applying it to both halves
/// identically.
pub struct Joint<T> {
    inner: Box<dyn Transform<T>>,
}

impl<T> Joint<T> {
    pub fn new(inner: impl Transform<T> + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl<T> PairedTransform<T, T> for Joint<T> {
    fn apply(&self, a: T, b: T) -> (T, T) {
        (self.inner.apply(a), self.inner.apply(b))
    }
}

// Built-in transforms

/// Divide every element by a scale factor.
///
/// Commonly used for image pixels: `Normalize::new(255.0)`.
#[derive(Debug, Clone)]
pub struct Normalize {
    scale: f32,
}

impl Normalize {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Transform<Array> for Normalize {
    fn apply(&self, mut sample: Array) -> Array {
        let scale = self.scale;
        sample.map_inplace(|v| v / scale);
        sample
    }
}

/// Per-channel standardisation of a `[C, H, W]` array: `(x - mean[c]) / std[c]`.
///
/// Channels beyond the configured statistics are left unchanged.
#[derive(Debug, Clone)]
pub struct Standardize {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
}

impl Standardize {
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Self {
        Self { mean, std }
    }

    /// The ImageNet RGB statistics, for inputs already scaled to [0, 1].
    pub fn imagenet() -> Self {
        Self::new(vec![0.485, 0.456, 0.406], vec![0.229, 0.224, 0.225])
    }
}

impl Transform<Array> for Standardize {
    fn apply(&self, mut sample: Array) -> Array {
        for (c, (&m, &s)) in self.mean.iter().zip(&self.std).enumerate() {
            if let Some(plane) = sample.channel_mut(c) {
                for v in plane {
                    *v = (*v - m) / s;
                }
            }
        }
        sample
    }
}

/// Chain multiple transforms, applied in order.
pub struct Compose<T> {
    transforms: Vec<Box<dyn Transform<T>>>,
}

impl<T> Compose<T> {
    pub fn new(transforms: Vec<Box<dyn Transform<T>>>) -> Self {
        Self { transforms }
    }
}

impl<T> Transform<T> for Compose<T> {
    fn apply(&self, mut sample: T) -> T {
        for t in &self.transforms {
            sample = t.apply(sample);
        }
        sample
    }
}
