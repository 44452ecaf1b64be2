//! Page sources: where raw text blocks and font metrics come from.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{FontDefinition, FontTable};

/// Supplier of per-page text blocks and fonts.
///
/// Implemented by whatever parses the container format. Pages are numbered
/// from 1. Implementations must be shareable across threads because pages
/// may be reconstructed in parallel.
pub trait PageSource: Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Raw `BT ... ET` blocks of a page, in content-stream order.
    fn page_text_blocks(&self, page: u32) -> Result<Vec<String>>;

    /// Fonts referenced by a page.
    fn font_definitions(&self, page: u32) -> Result<FontTable>;
}

/// Raw content of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    /// Text blocks in content-stream order
    #[serde(default)]
    pub blocks: Vec<String>,

    /// Fonts available on the page
    #[serde(default)]
    pub fonts: Vec<FontDefinition>,
}

impl PageData {
    /// Create a page from blocks and fonts.
    pub fn new(blocks: Vec<String>, fonts: Vec<FontDefinition>) -> Self {
        Self { blocks, fonts }
    }
}

/// In-memory page source, usually loaded from JSON.
///
/// ```json
/// { "pages": [ { "blocks": ["BT ... ET"], "fonts": [ { "name": "F1", ... } ] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSource {
    /// Pages in order
    pub pages: Vec<PageData>,
}

impl JsonSource {
    /// Create a source from pages.
    pub fn new(pages: Vec<PageData>) -> Self {
        Self { pages }
    }

    /// Load a source from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_slice(&data)
    }

    /// Parse a source from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Parse a source from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn page(&self, page: u32) -> Result<&PageData> {
        let count = self.page_count();
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .ok_or(Error::PageOutOfRange(page, count))
    }
}

impl PageSource for JsonSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text_blocks(&self, page: u32) -> Result<Vec<String>> {
        Ok(self.page(page)?.blocks.clone())
    }

    fn font_definitions(&self, page: u32) -> Result<FontTable> {
        Ok(self.page(page)?.fonts.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "pages": [
            {
                "blocks": ["BT /F1 10 Tf 10 700 Td (One) Tj ET"],
                "fonts": [{ "name": "/F1", "first_char": 32, "last_char": 126, "widths": [] }]
            },
            {}
        ]
    }"#;

    #[test]
    fn test_json_source_parse() {
        let source = JsonSource::from_slice(DOC.as_bytes()).unwrap();
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page_text_blocks(1).unwrap().len(), 1);
        assert!(source.font_definitions(1).unwrap().get("F1").is_some());
        assert!(source.page_text_blocks(2).unwrap().is_empty());
    }

    #[test]
    fn test_page_out_of_range() {
        let source = JsonSource::from_slice(DOC.as_bytes()).unwrap();
        assert!(matches!(
            source.page_text_blocks(0),
            Err(Error::PageOutOfRange(0, 2))
        ));
        assert!(matches!(
            source.font_definitions(3),
            Err(Error::PageOutOfRange(3, 2))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            JsonSource::from_slice(b"{ not json"),
            Err(Error::Json(_))
        ));
    }
}
