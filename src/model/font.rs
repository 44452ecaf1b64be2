//! Font metrics and glyph advance widths.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Byte code of the space glyph, the only glyph word spacing applies to.
pub const SPACE_CODE: u8 = 0x20;

/// Width metrics for a simple (single-byte) font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDefinition {
    /// Resource name used by `Tf` (e.g., "F1")
    pub name: String,

    /// Base font name (e.g., "Helvetica")
    #[serde(default)]
    pub base_font: String,

    /// Font type code
    #[serde(default)]
    pub font_type: i32,

    /// First character code covered by `widths`
    pub first_char: u8,

    /// Last character code covered by `widths` (inclusive)
    pub last_char: u8,

    /// Advance widths, index 0 is `first_char`
    pub widths: Vec<f64>,

    /// Object reference of the font descriptor
    #[serde(default)]
    pub descriptor: i64,
}

impl FontDefinition {
    /// Create a font definition with the given code range and widths.
    pub fn new(name: impl Into<String>, first_char: u8, last_char: u8, widths: Vec<f64>) -> Self {
        Self {
            name: normalize_name(&name.into()).to_string(),
            base_font: String::new(),
            font_type: 0,
            first_char,
            last_char,
            widths,
            descriptor: 0,
        }
    }

    /// Set the base font name.
    pub fn with_base_font(mut self, base_font: impl Into<String>) -> Self {
        self.base_font = base_font.into();
        self
    }

    /// Check whether a character code lies within the declared range.
    pub fn covers(&self, code: u8) -> bool {
        code >= self.first_char && code <= self.last_char
    }

    /// Horizontal displacement of one glyph after it is painted.
    ///
    /// `adjustment` is a per-mille value from a `TJ` array; it is scaled by the
    /// font size along with the table width. Word spacing applies only to the
    /// single-byte space code, every other code gets char spacing.
    pub fn glyph_width(
        &self,
        code: u8,
        adjustment: f64,
        font_size: f64,
        char_spacing: f64,
        word_spacing: f64,
        horizontal_scale: f64,
    ) -> Result<f64> {
        let table_width = self.table_width(code)?;
        let mut width = (table_width - adjustment / 1000.0) * font_size;
        if code == SPACE_CODE {
            width += word_spacing;
        } else {
            width += char_spacing;
        }
        Ok(width * horizontal_scale)
    }

    fn table_width(&self, code: u8) -> Result<f64> {
        let out_of_range = || Error::GlyphRange {
            code,
            font: self.name.clone(),
            first: self.first_char,
            last: self.last_char,
        };
        if !self.covers(code) {
            return Err(out_of_range());
        }
        self.widths
            .get(usize::from(code - self.first_char))
            .copied()
            .ok_or_else(out_of_range)
    }
}

/// Fonts available on one page, keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontTable {
    fonts: BTreeMap<String, FontDefinition>,
}

impl FontTable {
    /// Create an empty font table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font, keyed by its name.
    pub fn with_font(mut self, font: FontDefinition) -> Self {
        let key = normalize_name(&font.name).to_string();
        self.fonts.insert(key, font);
        self
    }

    /// Look up a font by resource name. A leading `/` is ignored.
    pub fn get(&self, name: &str) -> Option<&FontDefinition> {
        self.fonts.get(normalize_name(name))
    }

    /// Number of fonts in the table.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if the table has no fonts.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Iterate fonts in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FontDefinition> {
        self.fonts.values()
    }
}

impl FromIterator<FontDefinition> for FontTable {
    fn from_iter<I: IntoIterator<Item = FontDefinition>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FontTable::new(), |table, font| table.with_font(font))
    }
}

fn normalize_name(name: &str) -> &str {
    name.strip_prefix('/').unwrap_or(name)
}
