//! Per-page text interpreter.
//!
//! Parts of one sentence can live in different show operations, or even in
//! different text blocks, each with its own position. `PageRender` replays the
//! text operators of every block on a page, tracking the line and text
//! matrices, and records each show operation with the position and width it
//! would have when painted. Reconstruction into reading order happens later,
//! once the whole page has been replayed.

use crate::error::{Error, Result};
use crate::layout::{self, LayoutOptions, PageLayout};
use crate::model::{AffineMatrix, FontTable, ShowOperation, TextParams};

use super::operands::{
    parse_font, parse_matrix, parse_quote, parse_single, parse_text_runs, parse_xy,
};
use super::operator::TextOperator;
use super::tokenizer::{block_body, BlockTokenizer, Token};

/// Interpreter state for one page.
pub struct PageRender<'f> {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Matrix anchoring the start of the current line
    pub line_matrix: AffineMatrix,
    /// Matrix advanced by each show operation
    pub text_matrix: AffineMatrix,
    /// Current transformation matrix
    pub transformation_matrix: AffineMatrix,
    /// Text state applied to new show operations
    pub params: TextParams,
    /// Selected font resource name
    pub font_name: String,
    fonts: &'f FontTable,
    show_ops: Vec<ShowOperation<'f>>,
}

impl<'f> PageRender<'f> {
    /// Create a page interpreter over the page's font table.
    pub fn new(page_number: u32, fonts: &'f FontTable) -> Self {
        Self {
            page_number,
            line_matrix: AffineMatrix::identity(),
            text_matrix: AffineMatrix::identity(),
            transformation_matrix: AffineMatrix::identity(),
            params: TextParams::default(),
            font_name: String::new(),
            fonts,
            show_ops: Vec::new(),
        }
    }

    /// Show operations recorded so far, in stream order.
    pub fn show_ops(&self) -> &[ShowOperation<'f>] {
        &self.show_ops
    }

    /// Replay one `BT ... ET` text block.
    ///
    /// State carries over between blocks: matrices are only reset by explicit
    /// operators. Any failure aborts the block and is reported with the page
    /// number attached.
    pub fn add_text_block(&mut self, raw: &str) -> Result<()> {
        log::debug!("new text block on page {}", self.page_number);
        self.replay_block(raw)
            .map_err(|e| e.in_page(self.page_number))
    }

    fn replay_block(&mut self, raw: &str) -> Result<()> {
        let body = block_body(raw)?;
        for token in BlockTokenizer::new(body) {
            let token = token?;
            self.dispatch(&token)?;
            log::debug!(
                "after {} tm=({}, {}) lm=({}, {})",
                token.operator_str(),
                self.text_matrix.offset_x,
                self.text_matrix.offset_y,
                self.line_matrix.offset_x,
                self.line_matrix.offset_y
            );
        }
        Ok(())
    }

    fn dispatch(&mut self, token: &Token<'_>) -> Result<()> {
        let operand = token.operand_str();
        let Some(op) = TextOperator::from_mnemonic(token.operator) else {
            return Err(Error::UnknownOperator {
                operator: token.operator_str().into_owned(),
                operand: operand.into_owned(),
            });
        };
        log::debug!("operator='{}' operand='{}'", op, operand);
        let name = op.mnemonic();

        let result = match op {
            TextOperator::MoveText => self.move_to_next_line(name, &operand, false),
            TextOperator::MoveTextSetLeading => self.move_to_next_line(name, &operand, true),
            TextOperator::SetMatrix => self.set_matrix(name, &operand),
            TextOperator::ShowText | TextOperator::ShowTextAdjusted => {
                self.show_text(token.operand)
            }
            TextOperator::NextLine => {
                self.next_line();
                Ok(())
            }
            TextOperator::SetLeading => {
                self.params.leading = parse_single(name, &operand)?;
                Ok(())
            }
            TextOperator::SetCharSpacing => {
                self.params.char_spacing = parse_single(name, &operand)?;
                Ok(())
            }
            TextOperator::SetWordSpacing => {
                self.params.word_spacing = parse_single(name, &operand)?;
                Ok(())
            }
            TextOperator::SetHorizontalScale => {
                self.params.scale = parse_single(name, &operand)? / 100.0;
                Ok(())
            }
            TextOperator::SetFont => {
                let (font_name, size) = parse_font(name, &operand)?;
                self.font_name = font_name;
                self.params.font_size = size;
                Ok(())
            }
            TextOperator::NextLineShowText => {
                self.next_line();
                self.show_text(token.operand)
            }
            TextOperator::NextLineSpacingShowText => {
                let (word_spacing, char_spacing, text) = parse_quote(name, &operand)?;
                self.next_line();
                self.params.word_spacing = word_spacing;
                self.params.char_spacing = char_spacing;
                self.show_text(text.as_bytes())
            }
            TextOperator::SetRenderMode | TextOperator::SetRise => Ok(()),
        };
        if op.shows_text() {
            return result.map_err(|e| e.in_operator(name, &operand));
        }
        result
    }

    /// `Td` / `TD`: move the line matrix and restart the text matrix there.
    fn move_to_next_line(&mut self, operator: &str, operand: &str, set_leading: bool) -> Result<()> {
        let (x, y) = parse_xy(operator, operand)?;
        if set_leading {
            self.params.leading = y;
        }
        self.line_matrix.move_by(x, y);
        self.text_matrix = self.line_matrix;
        Ok(())
    }

    /// `T*`: drop the line by the current leading.
    fn next_line(&mut self) {
        self.line_matrix.offset_y -= self.params.leading;
        self.text_matrix = self.line_matrix;
    }

    /// `Tm`: both matrices are set.
    fn set_matrix(&mut self, operator: &str, operand: &str) -> Result<()> {
        let [a, b, c, d, e, f] = parse_matrix(operator, operand)?;
        self.text_matrix.set(a, b, c, d, e, f);
        self.line_matrix.set(a, b, c, d, e, f);
        Ok(())
    }

    /// Record a show operation at the text matrix and advance past it.
    fn show_text(&mut self, operand: &[u8]) -> Result<()> {
        let font = self
            .fonts
            .get(&self.font_name)
            .ok_or_else(|| Error::FontResolution(self.font_name.clone()))?;
        let op = ShowOperation::new(
            parse_text_runs(operand),
            self.page_number,
            self.text_matrix.position(),
            font,
            self.params,
        );
        let width = op.width()?;
        let (before_x, before_y) = self.text_matrix.position();
        self.text_matrix.translate(width, 0.0);
        log::debug!(
            "added text '{}' x/y before={}/{} after={}/{}",
            op.text(true),
            before_x,
            before_y,
            self.text_matrix.offset_x,
            self.text_matrix.offset_y
        );
        self.show_ops.push(op);
        Ok(())
    }

    /// Reconstruct the page into reading order.
    pub fn indexed_show_ops(&self, options: &LayoutOptions) -> Result<PageLayout<'_, 'f>> {
        layout::reconstruct(&self.show_ops, options).map_err(|e| e.in_page(self.page_number))
    }

    /// Reconstruct the page and return only its text.
    pub fn plain_text(&self, options: &LayoutOptions) -> Result<String> {
        Ok(self.indexed_show_ops(options)?.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontDefinition;

    fn fonts() -> FontTable {
        // 'H' = 0.7, 'i' = 0.25, everything else in 32..=126 = 0.5
        let mut widths = vec![0.5; 95];
        widths[usize::from(b'H' - 32)] = 0.7;
        widths[usize::from(b'i' - 32)] = 0.25;
        FontTable::new().with_font(FontDefinition::new("F1", 32, 126, widths))
    }

    fn hi_width(font_size: f64) -> f64 {
        (0.7 - 0.001) * font_size + (0.25 - 0.001) * font_size
    }

    #[test]
    fn test_simple_block() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT 10 20 Td /F1 12 Tf (Hi) Tj ET").unwrap();

        assert_eq!(page.show_ops().len(), 1);
        let op = &page.show_ops()[0];
        assert_eq!((op.start_x, op.start_y), (10.0, 20.0));
        assert!((page.text_matrix.offset_x - (10.0 + hi_width(12.0))).abs() < 1e-9);
        assert_eq!(page.text_matrix.offset_y, 20.0);
        assert_eq!(page.line_matrix.offset_x, 10.0);
    }

    #[test]
    fn test_empty_block() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT ET").unwrap();
        assert!(page.show_ops().is_empty());
        assert_eq!(page.plain_text(&LayoutOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_td_sets_leading() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT 5 -14 TD T* ET").unwrap();
        assert_eq!(page.params.leading, -14.0);
        // TD moves by -14, T* drops by leading (-14) again, i.e. back up
        assert_eq!(page.line_matrix.position(), (5.0, 0.0));
        assert_eq!(page.text_matrix, page.line_matrix);
    }

    #[test]
    fn test_next_line_uses_leading() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT 14 TL 72 700 Td T* T* ET").unwrap();
        assert_eq!(page.line_matrix.position(), (72.0, 672.0));
    }

    #[test]
    fn test_tm_sets_both_matrices() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT 2 0 0 2 100 500 Tm ET").unwrap();
        let expected = AffineMatrix::new(2.0, 0.0, 0.0, 2.0, 100.0, 500.0);
        assert_eq!(page.text_matrix, expected);
        assert_eq!(page.line_matrix, expected);
    }

    #[test]
    fn test_show_advance_uses_text_matrix_scale() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT 2 0 0 1 0 0 Tm /F1 10 Tf (a) Tj ET").unwrap();
        // (0.5 - 0.001) * 10, doubled by the matrix scale
        assert!((page.text_matrix.offset_x - 9.98).abs() < 1e-9);
    }

    #[test]
    fn test_spacing_and_scale_setters() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT 0.5 Tc 2 Tw 80 Tz 1 Tr 3 Ts ET").unwrap();
        assert_eq!(page.params.char_spacing, 0.5);
        assert_eq!(page.params.word_spacing, 2.0);
        assert!((page.params.scale - 0.8).abs() < 1e-12);
        assert_eq!(page.params.render_mode, 0);
        assert_eq!(page.params.rise, 0.0);
    }

    #[test]
    fn test_state_persists_across_blocks() {
        let fonts = fonts();
        let mut page = PageRender::new(2, &fonts);
        page.add_text_block("BT /F1 10 Tf 50 600 Td (a) Tj ET").unwrap();
        page.add_text_block("BT (b) Tj ET").unwrap();
        let ops = page.show_ops();
        assert_eq!(ops.len(), 2);
        assert!(ops[1].start_x > ops[0].start_x);
        assert_eq!(ops[1].start_y, 600.0);
        assert_eq!(ops[1].page_number, 2);
    }

    #[test]
    fn test_single_quote_operator() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT /F1 10 Tf 12 TL 0 100 Td (X)' ET").unwrap();
        assert_eq!(page.show_ops()[0].start_y, 88.0);
        assert_eq!(page.show_ops()[0].text(false), "X");
    }

    #[test]
    fn test_double_quote_matches_expanded_sequence() {
        let fonts = fonts();
        let mut quoted = PageRender::new(1, &fonts);
        quoted
            .add_text_block("BT /F1 10 Tf 12 TL 1 Tc 3 Tw 0 100 Td 0 0 (X)\" ET")
            .unwrap();

        let mut expanded = PageRender::new(1, &fonts);
        expanded
            .add_text_block("BT /F1 10 Tf 12 TL 1 Tc 3 Tw 0 100 Td T* 0 Tw 0 Tc (X) Tj ET")
            .unwrap();

        let a = &quoted.show_ops()[0];
        let b = &expanded.show_ops()[0];
        assert_eq!((a.start_x, a.start_y), (b.start_x, b.start_y));
        assert_eq!(a.params, b.params);
        assert_eq!(a.text(false), "X");
        assert_eq!(quoted.text_matrix, expanded.text_matrix);
        assert_eq!(a.params.char_spacing, 0.0);
        assert_eq!(a.params.word_spacing, 0.0);
    }

    #[test]
    fn test_unknown_operator() {
        let fonts = fonts();
        let mut page = PageRender::new(4, &fonts);
        let err = page.add_text_block("BT 1 2 Tx ET").unwrap_err();
        assert!(matches!(err, Error::InPage { page: 4, .. }));
        assert!(matches!(
            err.root(),
            Error::UnknownOperator { operator, .. } if operator == "Tx"
        ));
    }

    #[test]
    fn test_operand_parse_error() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        let err = page.add_text_block("BT 10 Td ET").unwrap_err();
        assert!(matches!(
            err.root(),
            Error::OperandParse { operator, .. } if operator == "Td"
        ));
    }

    #[test]
    fn test_missing_font() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT /F9 10 Tf ET").unwrap();
        let err = page.add_text_block("BT (a) Tj ET").unwrap_err();
        assert!(matches!(err.root(), Error::FontResolution(name) if name == "F9"));
    }

    #[test]
    fn test_show_errors_name_operator_and_operand() {
        let fonts = fonts();
        let mut page = PageRender::new(5, &fonts);
        page.add_text_block("BT /F9 10 Tf ET").unwrap();
        let err = page.add_text_block("BT [(ab) -20 (c)] TJ ET").unwrap_err();
        assert!(matches!(err, Error::InPage { page: 5, .. }));
        let Error::InPage { source, .. } = &err else {
            unreachable!()
        };
        assert!(matches!(
            source.as_ref(),
            Error::InOperator { operator, operand, .. }
                if operator == "TJ" && operand == "[(ab) -20 (c)]"
        ));
        assert!(err.to_string().contains("Operator 'TJ'"));

        let mut page = PageRender::new(1, &fonts);
        let err = page
            .add_text_block("BT /F1 10 Tf 12 TL 0 0 (\u{80})\" ET")
            .unwrap_err();
        assert!(err.to_string().contains("Operator '\"'"), "{}", err);
        assert!(matches!(err.root(), Error::GlyphRange { .. }));
    }

    #[test]
    fn test_non_decimal_matrix_is_operand_error() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        for block in ["BT NaN 0 0 1 inf 1e3 Tm ET", "BT 1 0 0 1 NaN 700 Tm ET"] {
            let err = page.add_text_block(block).unwrap_err();
            assert!(
                matches!(err.root(), Error::OperandParse { operator, .. } if operator == "Tm"),
                "{}",
                err
            );
        }
        assert_eq!(page.text_matrix, AffineMatrix::identity());
    }

    #[test]
    fn test_nested_parens_in_show_text() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block("BT /F1 10 Tf (f(x)y) Tj ET").unwrap();
        assert_eq!(page.show_ops()[0].text(false), "f(x)y");
    }

    #[test]
    fn test_glyph_out_of_range() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        let err = page
            .add_text_block("BT /F1 10 Tf (caf\u{e9}) Tj ET")
            .unwrap_err();
        assert!(matches!(err.root(), Error::GlyphRange { .. }));
    }

    #[test]
    fn test_unterminated_literal_is_structural() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        let err = page
            .add_text_block("BT /F1 10 Tf (unterminated ET")
            .unwrap_err();
        assert!(matches!(err.root(), Error::Structural(_)));
    }

    #[test]
    fn test_escaped_paren_in_block() {
        let fonts = fonts();
        let mut page = PageRender::new(1, &fonts);
        page.add_text_block(r"BT /F1 10 Tf (a\)b) Tj ET").unwrap();
        assert_eq!(page.show_ops()[0].text(false), "a)b");
    }
}
