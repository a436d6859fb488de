use serde::{Deserialize, Serialize};

use crate::geo::Vector;

/// An RGBA color with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GREY: Color = Color::rgb(0.7, 0.7, 0.7);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color { r: r, g: g, b: b, a: 1.0 }
    }

    /// Drops alpha: the AA vertex layout carries three channels.
    pub fn to_rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Color {
        Color::BLACK
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    pub from: Vector,
    pub to: Vector,
    pub color: Color,
}

/// Colored line segments describing how geometry was built.
///
/// The ribbon tessellator fills this when `emit_debug_geometry` is set: the
/// source polyline in black and edge perpendiculars in grey. Miter spokes are
/// green, or red where the join fell back to the unmitered offset. Outline
/// edges are blue.
#[derive(Clone, Debug, Default)]
pub struct DebugLines {
    lines: Vec<DebugLine>,
}

impl DebugLines {
    pub fn new() -> DebugLines {
        DebugLines::default()
    }

    pub fn add_line(&mut self, from: Vector, to: Vector, color: Color) {
        self.lines.push(DebugLine {
            from: from,
            to: to,
            color: color,
        });
    }

    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
