//! Reading-order reconstruction.

mod options;
mod rows;

pub use options::{
    LayoutOptions, DEFAULT_INSERTION_PRECISION, DEFAULT_MAX_INSERT_BOUNDARY,
    DEFAULT_MAX_INSERT_VARIANCE, DEFAULT_MIN_INSERT_BOUNDARY, DEFAULT_ROW_HEIGHT,
};
pub use rows::{insert_into_row, reconstruct, row_key, PageLayout, Placement, Row};
