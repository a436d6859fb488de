//! Turns quantized polylines into triangles.
//!
//! Two passes build a road:
//!
//! 1. `ribbon` widens the polyline into a mitered ribbon of triangles and
//!    records the ribbon's boundary (its "outline").
//! 2. `aa` extrudes that outline by about a pixel into a feathered fringe the
//!    shader fades out.
//!
//! Both write into caller-sized buffers: each advertises exactly how many
//! elements it will write, checks capacity before writing anything, and never
//! allocates. `Arena` tracks a write cursor so many polylines can share one
//! buffer.

mod arena;
mod debug;
mod join;

pub mod aa;
pub mod outline;
pub mod ribbon;
pub mod road;

pub use self::arena::{Arena, Claim};
pub use self::debug::{Color, DebugLine, DebugLines};
pub use self::join::{offset, offset_join, Join};
