//! Data model for placed text.
//!
//! This module defines the values the operator interpreter produces: the
//! affine matrices it tracks, the font metrics it consults, and the show
//! operations it emits for reconstruction.

mod font;
mod matrix;
mod show;

pub use font::{FontDefinition, FontTable, SPACE_CODE};
pub use matrix::AffineMatrix;
pub use show::{ShowOperation, TextParams, TextRun, MAX_VISIBLE_BYTE, MIN_VISIBLE_BYTE};
