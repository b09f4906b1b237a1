//! Error types for volume loading and surface reconstruction.

use thiserror::Error;

/// Errors that can occur while loading volumes or reconstructing surfaces.
///
/// All variants are recoverable: a failed load installs no field, and a
/// reconstruction request without a field reports rather than panics. The
/// one fatal condition in the crate (an out-of-range sample access) is a
/// programming-contract violation and asserts instead of appearing here.
#[derive(Error, Debug)]
pub enum IsomeshError {
    /// The volume file could not be opened or read.
    #[error("cannot read volume: {0}")]
    Io(#[from] std::io::Error),

    /// The volume has no leading dimension token.
    #[error("volume is missing its leading dimension")]
    MissingDimension,

    /// The declared grid dimension cannot form a single voxel.
    #[error("volume dimension {n} is too small to form a voxel")]
    DimensionTooSmall {
        /// The declared dimension.
        n: usize,
    },

    /// The volume ended before all declared samples were present.
    #[error("truncated volume: expected {expected} samples, found {got}")]
    TruncatedVolume {
        /// Number of samples the header declares.
        expected: usize,
        /// Number of samples actually present.
        got: usize,
    },

    /// A token in the volume could not be parsed as a number.
    #[error("invalid token {token:?} at position {position}")]
    InvalidToken {
        /// Zero-based token position in the file (0 is the dimension).
        position: usize,
        /// The offending token.
        token: String,
    },

    /// A reconstruction was requested before any volume was loaded.
    #[error("no volume loaded")]
    NoVolumeLoaded,
}

/// Result type alias for isomesh operations.
pub type Result<T> = core::result::Result<T, IsomeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IsomeshError::DimensionTooSmall { n: 1 };
        assert_eq!(
            format!("{}", err),
            "volume dimension 1 is too small to form a voxel"
        );

        let err = IsomeshError::TruncatedVolume {
            expected: 27,
            got: 20,
        };
        assert_eq!(
            format!("{}", err),
            "truncated volume: expected 27 samples, found 20"
        );

        let err = IsomeshError::InvalidToken {
            position: 3,
            token: "abc".to_string(),
        };
        assert_eq!(format!("{}", err), "invalid token \"abc\" at position 3");

        let err = IsomeshError::NoVolumeLoaded;
        assert_eq!(format!("{}", err), "no volume loaded");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: IsomeshError = io.into();
        assert!(matches!(err, IsomeshError::Io(_)));
    }
}
