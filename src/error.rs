//! Errors returned by the quantizer, tile and tessellation functions.
//!
//! Every variant is a precondition failure: functions check their inputs and
//! output capacity up front, so an `Err` means nothing was written.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("polyline needs at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("output buffer `{buffer}` holds {capacity} elements but {required} are needed")]
    BufferTooSmall {
        buffer: &'static str,
        required: usize,
        capacity: usize,
    },

    #[error("tile level {0} is outside 0..=15")]
    InvalidLevel(u8),

    #[error("tile ({x},{y}) does not exist at level {level}")]
    TileOutOfRange { x: u16, y: u16, level: u8 },

    #[error("the root tile has no parent")]
    RootHasNoParent,

    #[error("vertex index {0} does not fit in a u32 index buffer")]
    IndexOverflow(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails unless `points` has at least `required` elements.
pub(crate) fn require_points<T>(points: &[T], required: usize) -> Result<()> {
    if points.len() < required {
        Err(Error::TooFewPoints {
            required: required,
            actual: points.len(),
        })
    } else {
        Ok(())
    }
}

/// Fails unless `buffer` can hold `required` elements.
pub(crate) fn require_capacity<T>(name: &'static str, buffer: &[T], required: usize) -> Result<()> {
    if buffer.len() < required {
        Err(Error::BufferTooSmall {
            buffer: name,
            required: required,
            capacity: buffer.len(),
        })
    } else {
        Ok(())
    }
}

/// Fails unless `count` vertices numbered from `base` all fit a `u32` index.
pub(crate) fn require_index_range(base: usize, count: usize) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    let last = base.saturating_add(count - 1);
    if last > u32::MAX as usize {
        Err(Error::IndexOverflow(last))
    } else {
        Ok(())
    }
}
