use std::path::PathBuf;

use crate::shape::Shape;

/// All errors that can occur while enumerating or loading a dataset.
///
/// Construction-time failures (`EmptySource`, `UnknownClass`, `NotADirectory`)
/// are fatal to the instance. Lower-level I/O and decode failures are wrapped
/// transparently so they reach the caller unmodified.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory scan produced zero usable entries.
    #[error("empty source: {path} contains no matching files, check the path to the images")]
    EmptySource { path: PathBuf },

    /// A class directory name is not part of the label vocabulary.
    #[error("unknown class label {name:?} for directory {path}")]
    UnknownClass { name: String, path: PathBuf },

    /// The root (or a required subdirectory) is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Sample index past the end of the entry list.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A decoded sample does not have the layout the dataset promises.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    /// Element count mismatch when creating an array from a vec.
    #[error("element count mismatch: shape {shape} requires {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Directory traversal failure (permission denied, symlink loop, ...).
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }

    /// `EmptySource` for the given directory.
    pub fn empty_source(path: impl Into<PathBuf>) -> Self {
        Error::EmptySource { path: path.into() }
    }
}

/// Convenience Result type used throughout pictor.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_names_the_directory() {
        let e = Error::empty_source("/data/celeba");
        let text = e.to_string();
        assert!(text.starts_with("empty source: /data/celeba"));
    }

    #[test]
    fn io_errors_pass_through_unchanged() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let e: Error = io.into();
        assert_eq!(e.to_string(), "no such file");
        assert!(matches!(e, Error::Io(ref inner) if inner.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn shape_mismatch_reports_both_shapes() {
        let e = Error::ShapeMismatch {
            expected: Shape::from((1, 4, 4)),
            got: Shape::from((3, 4, 4)),
        };
        let text = e.to_string();
        assert!(text.starts_with("shape mismatch: expected"));
        assert!(text.contains(&Shape::from((3, 4, 4)).to_string()));
    }
}
