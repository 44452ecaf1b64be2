//! Text block interpretation.

mod operands;
mod operator;
mod page_render;
mod scanner;
mod tokenizer;

pub use operands::{
    parse_font, parse_matrix, parse_quote, parse_single, parse_text_runs, parse_xy,
    DEFAULT_ADJUSTMENT,
};
pub use operator::TextOperator;
pub use page_render::PageRender;
pub use scanner::{LiteralScanner, ScanEvent};
pub use tokenizer::{block_body, BlockTokenizer, Token};
