// -----------------------------------------------------------------------------
// Pixel canvas
// -----------------------------------------------------------------------------

use bytemuck::{Pod, Zeroable};

use super::Point;

/// Side length of the square canvas, in pixels.
pub const CANVAS_DIM: usize = 800;

/// One RGB pixel. `repr(C)` + `Pod` pin the layout to exactly 3 bytes with
/// no padding, so a `&[Pixel]` reinterprets directly as the row-major byte
/// buffer the texture upload expects.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };
    pub const RED: Pixel = Pixel { r: 255, g: 0, b: 0 };
}

/// Fixed-size square pixel grid, stored as one contiguous buffer indexed
/// `y * CANVAS_DIM + x`. Exclusively owned by the engine; the UI only ever
/// reads byte copies taken between batches.
pub struct Canvas {
    pixels: Vec<Pixel>,
}

impl Canvas {
    /// All-black canvas.
    pub fn new() -> Self {
        Self {
            pixels: vec![Pixel::BLACK; CANVAS_DIM * CANVAS_DIM],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::BLACK);
    }

    /// Plot one pixel. `p` must lie in `[0, CANVAS_DIM)²`; the engine's
    /// midpoint invariant guarantees this for every generated point.
    #[inline]
    pub fn put(&mut self, p: Point, color: Pixel) {
        self.pixels[p.y as usize * CANVAS_DIM + p.x as usize] = color;
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * CANVAS_DIM + x]
    }

    /// Raw RGB bytes, row-major, stride `CANVAS_DIM * 3`, no padding.
    pub fn as_rgb_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
