//! Export options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::layout::LayoutOptions;

/// Options for exporting page text.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Which pages to export
    pub pages: PageSelection,

    /// Whether to reconstruct pages in parallel
    pub parallel: bool,

    /// Reading-order reconstruction options
    pub layout: LayoutOptions,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Keep or drop non-printable bytes in exported text.
    pub fn with_special_chars(mut self, include: bool) -> Self {
        self.layout = self.layout.with_special_chars(include);
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pages: PageSelection::All,
            parallel: true,
            layout: LayoutOptions::default(),
        }
    }
}

/// Page selection for export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Export all pages
    #[default]
    All,
    /// Export a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Export specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Selected page numbers of a document with `page_count` pages, ascending.
    pub fn resolve(&self, page_count: u32) -> Vec<u32> {
        (1..=page_count).filter(|p| self.includes(*p)).collect()
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let page = |text: &str| -> Result<u32> {
            text.trim()
                .parse()
                .map_err(|_| Error::InvalidPageRange(s.to_string()))
        };

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                return Ok(PageSelection::Range(page(start)?..=page(end)?));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            if let Some((start, end)) = part.split_once('-') {
                pages.extend(page(start)?..=page(end)?);
            } else {
                pages.push(page(part)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
