//! Removes points that make polylines harder to tessellate.
mod parallel;

pub use self::parallel::{eliminate_parallel_segments, PARALLEL_EPSILON};
