//! Document-level export: a loop over pages of a [`PageSource`].
//!
//! Each page is replayed and reconstructed on its own, with its own font
//! table, so pages can be processed in parallel. Output is always in page
//! order.
//!
//! # Example
//!
//! ```no_run
//! use glyphline::export::{Exporter, ExportOptions, JsonSource};
//!
//! fn main() -> glyphline::Result<()> {
//!     let source = JsonSource::open("pages.json")?;
//!     let exporter = Exporter::with_options(source, ExportOptions::new().sequential());
//!     exporter.export_to_file("pages.txt")?;
//!     Ok(())
//! }
//! ```

mod options;
mod source;

pub use options::{ExportOptions, PageSelection};
pub use source::{JsonSource, PageData, PageSource};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::layout::Placement;
use crate::parser::PageRender;

/// Exports reconstructed text from every selected page of a source.
pub struct Exporter<S> {
    source: S,
    options: ExportOptions,
}

impl<S: PageSource> Exporter<S> {
    /// Create an exporter with default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ExportOptions::default())
    }

    /// Create an exporter with custom options.
    pub fn with_options(source: S, options: ExportOptions) -> Self {
        Self { source, options }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Export options in use.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Number of pages in the source.
    pub fn page_count(&self) -> u32 {
        self.source.page_count()
    }

    /// Replay a page and hand the finished interpreter to `f`.
    fn with_page<T>(&self, page: u32, f: impl FnOnce(&PageRender<'_>) -> Result<T>) -> Result<T> {
        let count = self.page_count();
        if page == 0 || page > count {
            return Err(Error::PageOutOfRange(page, count));
        }
        let blocks = self
            .source
            .page_text_blocks(page)
            .map_err(|e| e.in_page(page))?;
        let fonts = self
            .source
            .font_definitions(page)
            .map_err(|e| e.in_page(page))?;

        let mut render = PageRender::new(page, &fonts);
        for block in &blocks {
            render.add_text_block(block)?;
        }
        log::debug!(
            "page {}: {} blocks, {} show operations",
            page,
            blocks.len(),
            render.show_ops().len()
        );
        f(&render)
    }

    /// Plain text of one page (page numbers start at 1).
    pub fn page_plain_text(&self, page: u32) -> Result<String> {
        self.with_page(page, |render| render.plain_text(&self.options.layout))
    }

    /// Reading-order placements of one page.
    pub fn page_placements(&self, page: u32) -> Result<Vec<Placement>> {
        self.with_page(page, |render| {
            let layout = render.indexed_show_ops(&self.options.layout)?;
            Ok(layout.placements(self.options.layout.include_special))
        })
    }

    /// Text of every selected page as `(page, text)` pairs in page order.
    ///
    /// A source without pages is an error; a selection that matches no pages
    /// yields an empty list.
    pub fn export_pages(&self) -> Result<Vec<(u32, String)>> {
        let count = self.page_count();
        if count == 0 {
            return Err(Error::EmptyDocument);
        }
        let pages = self.options.pages.resolve(count);
        let text_of = |page: u32| self.page_plain_text(page).map(|text| (page, text));
        if self.options.parallel {
            pages.par_iter().map(|&page| text_of(page)).collect()
        } else {
            pages.iter().map(|&page| text_of(page)).collect()
        }
    }

    /// Concatenated text of every selected page.
    pub fn export_to_string(&self) -> Result<String> {
        Ok(self
            .export_pages()?
            .into_iter()
            .map(|(_, text)| text)
            .collect())
    }

    /// Write the concatenated text of every selected page.
    ///
    /// Nothing is written if any page fails.
    pub fn export_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (_, text) in self.export_pages()? {
            writer.write_all(text.as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the concatenated text of every selected page to a file.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let pages = self.export_pages()?;
        let mut writer = BufWriter::new(File::create(path)?);
        for (_, text) in pages {
            writer.write_all(text.as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }
}
