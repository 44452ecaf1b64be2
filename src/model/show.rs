//! Text-showing operations and the runs they are built from.
//!
//! A text block can contain several text-showing operators, each painting a
//! string at the current text matrix position. With `TJ` the string is split
//! into runs separated by per-mille horizontal adjustments:
//!
//! ```text
//! [(P)1(remium )1(S)1(ubscript)0.997489(ion)]TJ
//! ```
//!
//! The total width of a show operation moves the text matrix, so later
//! operations in the same block depend on it even when they paint somewhere
//! else on the page.

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use super::FontDefinition;
use crate::error::Result;

/// Lowest byte treated as visible text.
pub const MIN_VISIBLE_BYTE: u8 = 0x20;

/// Highest byte treated as visible text.
pub const MAX_VISIBLE_BYTE: u8 = 0x7E;

/// A run of literal bytes and the adjustment that preceded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Raw string bytes, escapes already resolved
    pub bytes: Vec<u8>,
    /// Horizontal adjustment in thousandths of text space
    pub adjustment: f64,
}

impl TextRun {
    /// Create a text run.
    pub fn new(bytes: impl Into<Vec<u8>>, adjustment: f64) -> Self {
        Self {
            bytes: bytes.into(),
            adjustment,
        }
    }

    /// Lossy UTF-8 view of the run.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Text state captured when a show operation is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextParams {
    /// Font size
    pub font_size: f64,
    /// Char spacing (`Tc`)
    pub char_spacing: f64,
    /// Word spacing (`Tw`)
    pub word_spacing: f64,
    /// Leading (`TL`)
    pub leading: f64,
    /// Horizontal scale as a fraction (`Tz` / 100)
    pub scale: f64,
    /// Render mode (`Tr`)
    pub render_mode: i32,
    /// Rise (`Ts`)
    pub rise: f64,
    /// Knockout flag
    pub knockout: f64,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            leading: 0.0,
            scale: 1.0,
            render_mode: 0,
            rise: 0.0,
            knockout: 0.0,
        }
    }
}

/// One placed string together with the text state in effect when it was placed.
#[derive(Debug, Clone)]
pub struct ShowOperation<'f> {
    runs: Vec<TextRun>,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Text matrix X offset at placement time
    pub start_x: f64,
    /// Text matrix Y offset at placement time
    pub start_y: f64,
    /// Font the string is painted with
    pub font: &'f FontDefinition,
    /// Text state snapshot
    pub params: TextParams,
    width: OnceCell<f64>,
}

impl<'f> ShowOperation<'f> {
    /// Create a show operation.
    pub fn new(
        runs: Vec<TextRun>,
        page_number: u32,
        start: (f64, f64),
        font: &'f FontDefinition,
        params: TextParams,
    ) -> Self {
        Self {
            runs,
            page_number,
            start_x: start.0,
            start_y: start.1,
            font,
            params,
            width: OnceCell::new(),
        }
    }

    /// The runs making up this operation.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Font size in effect.
    pub fn font_size(&self) -> f64 {
        self.params.font_size
    }

    /// Text of all runs.
    ///
    /// Unless `include_special` is set, bytes outside the printable ASCII band
    /// are dropped.
    pub fn text(&self, include_special: bool) -> String {
        if include_special {
            let bytes: Vec<u8> = self
                .runs
                .iter()
                .flat_map(|run| run.bytes.iter().copied())
                .collect();
            return String::from_utf8_lossy(&bytes).into_owned();
        }
        self.runs
            .iter()
            .flat_map(|run| run.bytes.iter().copied())
            .filter(|b| (MIN_VISIBLE_BYTE..=MAX_VISIBLE_BYTE).contains(b))
            .map(char::from)
            .collect()
    }

    /// Total advance width of every glyph in the operation.
    ///
    /// Computed once; later calls return the cached value.
    pub fn width(&self) -> Result<f64> {
        if let Some(width) = self.width.get() {
            return Ok(*width);
        }
        let mut width = 0.0;
        for run in &self.runs {
            for &code in &run.bytes {
                width += self.font.glyph_width(
                    code,
                    run.adjustment,
                    self.params.font_size,
                    self.params.char_spacing,
                    self.params.word_spacing,
                    self.params.scale,
                )?;
            }
        }
        let _ = self.width.set(width);
        Ok(width)
    }
}
