//! Affine transform used for text and line positioning.

use std::fmt;

/// A 2D affine transform in PDF row-vector layout.
///
/// ```text
///   a  b  0      a = scale_x    b = shear_x
///   c  d  0      c = shear_y    d = scale_y
///   e  f  1      e = offset_x   f = offset_y
/// ```
///
/// The third column is implicit. The matrix is `Copy`, so saving the line
/// matrix into the text matrix is a plain assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    /// Horizontal scale (a)
    pub scale_x: f64,
    /// Horizontal shear (b)
    pub shear_x: f64,
    /// Vertical shear (c)
    pub shear_y: f64,
    /// Vertical scale (d)
    pub scale_y: f64,
    /// Horizontal offset (e)
    pub offset_x: f64,
    /// Vertical offset (f)
    pub offset_y: f64,
}

impl AffineMatrix {
    /// The identity transform.
    pub const IDENTITY: AffineMatrix = AffineMatrix {
        scale_x: 1.0,
        shear_x: 0.0,
        shear_y: 0.0,
        scale_y: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Create an identity matrix.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a matrix from the six `Tm` operands.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            scale_x: a,
            shear_x: b,
            shear_y: c,
            scale_y: d,
            offset_x: e,
            offset_y: f,
        }
    }

    /// Overwrite all six components.
    pub fn set(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        *self = Self::new(a, b, c, d, e, f);
    }

    /// Move by `(dx, dy)` in the matrix's local space.
    ///
    /// The delta is mapped through the linear part before it is added to the
    /// offset, so a scaled text matrix advances by scaled glyph widths.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        *self = AffineMatrix::new(1.0, 0.0, 0.0, 1.0, dx, dy).multiply(self);
    }

    /// Concatenate `self` with `other`, `self` applied first.
    ///
    /// In row-vector form this is `self × other`: a point mapped by the result
    /// equals the point mapped by `self` and then by `other`.
    pub fn multiply(&self, other: &AffineMatrix) -> AffineMatrix {
        AffineMatrix {
            scale_x: self.scale_x * other.scale_x + self.shear_x * other.shear_y,
            shear_x: self.scale_x * other.shear_x + self.shear_x * other.scale_y,
            shear_y: self.shear_y * other.scale_x + self.scale_y * other.shear_y,
            scale_y: self.shear_y * other.shear_x + self.scale_y * other.scale_y,
            offset_x: self.offset_x * other.scale_x
                + self.offset_y * other.shear_y
                + other.offset_x,
            offset_y: self.offset_x * other.shear_x
                + self.offset_y * other.scale_y
                + other.offset_y,
        }
    }

    /// Map a point through the matrix.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale_x + y * self.shear_y + self.offset_x,
            x * self.shear_x + y * self.scale_y + self.offset_y,
        )
    }

    /// Add `(dx, dy)` to the offset, ignoring scale and shear.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Current position as `(offset_x, offset_y)`.
    pub fn position(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for AffineMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {} {} {}]",
            self.scale_x, self.shear_x, self.shear_y, self.scale_y, self.offset_x, self.offset_y
        )
    }
}
