//! Quantizes geographic data and tessellates it into GPU-ready triangles for
//! a 2D slippy map.
//!
//! The world is a `u32` square: see `quantize` for how degrees map onto it and
//! `tile` for how it divides into a quad tree. `simplify` cleans polylines up
//! and `tessellate` turns them into ribbons with feathered edges. `compile`
//! strings the first steps together for raw GIS rings.

#[macro_use] extern crate log;

pub mod compile;
pub mod error;
pub mod geo;
pub mod quantize;
pub mod simplify;
pub mod tessellate;
pub mod tile;

pub use crate::error::{Error, Result};
pub use crate::geo::{Point, Vector, Wgs84};
