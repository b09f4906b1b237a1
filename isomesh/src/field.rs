//! Scalar volume storage and the plain-text volume reader.
//!
//! A volume is a cubic grid of `dim³` float samples held in one flat owned
//! buffer, read from a whitespace-separated text file: a leading integer
//! dimension followed by exactly `dim³` values in nested order with the
//! first coordinate varying slowest.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use isomesh_core::{GridCoord, Point3};

use crate::error::{IsomeshError, Result};

/// A dense cubic grid of scalar samples with its cached value range.
///
/// The field is immutable once constructed: loading a new volume replaces
/// the field wholesale rather than mutating it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    dim: usize,
    samples: Vec<f32>,
    min_value: f32,
    max_value: f32,
}

impl ScalarField {
    /// Load a volume from a file path.
    ///
    /// # Errors
    /// - [`IsomeshError::Io`] when the file cannot be opened or read
    /// - the [`ScalarField::from_reader`] parse errors
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let field = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded volume {}³ from {} (range [{}, {}])",
            field.dim,
            path.as_ref().display(),
            field.min_value,
            field.max_value
        );
        Ok(field)
    }

    /// Parse a volume from a reader.
    ///
    /// Reads one leading integer dimension, then exactly `dim³` float
    /// samples; anything after the final sample is ignored. The value range
    /// is computed while reading.
    ///
    /// # Errors
    /// - [`IsomeshError::MissingDimension`] on an empty input
    /// - [`IsomeshError::DimensionTooSmall`] when `dim <= 1`
    /// - [`IsomeshError::InvalidToken`] on a non-numeric token
    /// - [`IsomeshError::TruncatedVolume`] when samples are missing
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut tokens = text.split_whitespace();
        let dim_token = tokens.next().ok_or(IsomeshError::MissingDimension)?;
        let dim: usize = dim_token
            .parse()
            .map_err(|_| IsomeshError::InvalidToken {
                position: 0,
                token: dim_token.to_string(),
            })?;
        if dim <= 1 {
            return Err(IsomeshError::DimensionTooSmall { n: dim });
        }

        let expected = dim.pow(3);
        let mut samples = Vec::new();
        let mut min_value = f32::INFINITY;
        let mut max_value = f32::NEG_INFINITY;

        for (index, token) in tokens.take(expected).enumerate() {
            let value: f32 = token.parse().map_err(|_| IsomeshError::InvalidToken {
                position: index + 1,
                token: token.to_string(),
            })?;
            min_value = min_value.min(value);
            max_value = max_value.max(value);
            samples.push(value);
        }

        if samples.len() != expected {
            return Err(IsomeshError::TruncatedVolume {
                expected,
                got: samples.len(),
            });
        }

        Ok(Self {
            dim,
            samples,
            min_value,
            max_value,
        })
    }

    /// Construct a field from samples already in memory.
    ///
    /// The samples must be in the same nested order as the file format
    /// (first coordinate slowest).
    ///
    /// # Errors
    /// - [`IsomeshError::DimensionTooSmall`] when `dim <= 1`
    /// - [`IsomeshError::TruncatedVolume`] when `samples.len() != dim³`
    pub fn from_samples(dim: usize, samples: Vec<f32>) -> Result<Self> {
        if dim <= 1 {
            return Err(IsomeshError::DimensionTooSmall { n: dim });
        }
        let expected = dim.pow(3);
        if samples.len() != expected {
            return Err(IsomeshError::TruncatedVolume {
                expected,
                got: samples.len(),
            });
        }

        let mut min_value = f32::INFINITY;
        let mut max_value = f32::NEG_INFINITY;
        for &value in &samples {
            min_value = min_value.min(value);
            max_value = max_value.max(value);
        }

        Ok(Self {
            dim,
            samples,
            min_value,
            max_value,
        })
    }

    /// Grid dimension: the number of samples along each axis.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of samples (`dim³`).
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// World-space spacing between adjacent grid points (`1 / dim`).
    #[inline]
    pub fn cell_size(&self) -> f32 {
        1.0 / self.dim as f32
    }

    /// The sample at grid point `(i, j, k)`.
    ///
    /// # Panics
    /// Out-of-range coordinates are a programming-contract violation and
    /// panic; they are never silently wrapped.
    #[inline]
    pub fn sample(&self, i: usize, j: usize, k: usize) -> f32 {
        assert!(
            i < self.dim && j < self.dim && k < self.dim,
            "grid access ({}, {}, {}) outside {}³ volume",
            i,
            j,
            k,
            self.dim
        );
        self.samples[GridCoord::new(i, j, k).flat_index(self.dim)]
    }

    /// World-space position of grid point `(i, j, k)`.
    #[inline]
    pub fn position(&self, i: usize, j: usize, k: usize) -> Point3 {
        GridCoord::new(i, j, k).position(self.cell_size())
    }

    /// Smallest sample value in the volume.
    #[inline]
    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    /// Largest sample value in the volume.
    #[inline]
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// The `(min, max)` sample range.
    #[inline]
    pub fn value_range(&self) -> (f32, f32) {
        (self.min_value, self.max_value)
    }

    /// Map a `[0, 1]` fraction onto the sampled value range.
    ///
    /// `0.0` yields the minimum sample, `1.0` the maximum. Useful for
    /// choosing an isovalue relative to whatever range a volume happens to
    /// cover.
    #[inline]
    pub fn isovalue_at(&self, fraction: f32) -> f32 {
        self.min_value + (self.max_value - self.min_value) * fraction
    }
}
