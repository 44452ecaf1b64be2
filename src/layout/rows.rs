//! Row/column reconstruction of reading order.
//!
//! Show operations arrive in stream order, which need not match where they
//! sit on the page. Rows are found by quantizing Y; within a row, operations
//! are keyed by their start X so a row reads left to right. Two operations
//! starting at the same X are kept apart by nudging the later one to the
//! nearest free key.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::Serialize;

use super::LayoutOptions;
use crate::error::{Error, Result};
use crate::model::ShowOperation;

/// Show operations of one row keyed by their (possibly nudged) X.
pub type Row<'a, 'f> = BTreeMap<OrderedFloat<f64>, &'a ShowOperation<'f>>;

/// Reading-order index of a page plus its assembled text.
#[derive(Debug, Clone)]
pub struct PageLayout<'a, 'f> {
    /// Rows keyed by quantized Y; higher keys are read first
    pub rows: BTreeMap<i64, Row<'a, 'f>>,
    /// Plain text, one line per row
    pub text: String,
}

impl<'a, 'f> PageLayout<'a, 'f> {
    /// Rows from the top of the page down.
    pub fn rows_in_reading_order(&self) -> impl Iterator<Item = (i64, &Row<'a, 'f>)> {
        self.rows.iter().rev().map(|(key, row)| (*key, row))
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if no text was placed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flatten the index into serializable placements in reading order.
    pub fn placements(&self, include_special: bool) -> Vec<Placement> {
        self.rows_in_reading_order()
            .flat_map(|(row, cols)| {
                cols.iter().map(move |(x, op)| Placement {
                    page: op.page_number,
                    row,
                    x: x.into_inner(),
                    start_x: op.start_x,
                    start_y: op.start_y,
                    width: op.width().ok(),
                    font: op.font.name.clone(),
                    font_size: op.font_size(),
                    text: op.text(include_special),
                })
            })
            .collect()
    }
}

/// One show operation as placed by reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Page number (1-indexed)
    pub page: u32,
    /// Row key
    pub row: i64,
    /// Column key the operation was stored under
    pub x: f64,
    /// Start X as painted
    pub start_x: f64,
    /// Start Y as painted
    pub start_y: f64,
    /// Advance width, if it could be computed
    pub width: Option<f64>,
    /// Font resource name
    pub font: String,
    /// Font size
    pub font_size: f64,
    /// Visible text
    pub text: String,
}

/// Quantize a Y coordinate into a row key.
pub fn row_key(y: f64, row_height: f64) -> i64 {
    (y / row_height).floor() as i64
}

/// Insert `op` into `row` at or near `desired_x` and return the key used.
///
/// Offsets `x + k*step` and `x - k*step` are tried for k = 0, 1, 2, ...
/// A slot above `desired_x` must stay at or below the upper boundary, one
/// below must stay at or above the lower boundary. Returns `None` when no slot
/// exists within the search radius.
pub fn insert_into_row<'a, 'f>(
    row: &mut Row<'a, 'f>,
    op: &'a ShowOperation<'f>,
    desired_x: f64,
    options: &LayoutOptions,
) -> Option<f64> {
    if !desired_x.is_finite() {
        return None;
    }
    for step in 0..=options.max_search_steps() {
        let offset = step as f64 * options.insertion_precision;
        let up = desired_x + offset;
        let down = desired_x - offset;
        if step > 0 && up == desired_x && down == desired_x {
            // step is below the float resolution at this X
            break;
        }
        if up <= options.max_insert_boundary && !row.contains_key(&OrderedFloat(up)) {
            row.insert(OrderedFloat(up), op);
            return Some(up);
        }
        if down >= options.min_insert_boundary && !row.contains_key(&OrderedFloat(down)) {
            row.insert(OrderedFloat(down), op);
            return Some(down);
        }
    }
    None
}

/// Build the reading-order index and text for a page's show operations.
pub fn reconstruct<'a, 'f>(
    ops: &'a [ShowOperation<'f>],
    options: &LayoutOptions,
) -> Result<PageLayout<'a, 'f>> {
    let mut rows: BTreeMap<i64, Row<'a, 'f>> = BTreeMap::new();

    for op in ops {
        let key = row_key(op.start_y, options.row_height);
        let row = rows.entry(key).or_default();
        let placed = insert_into_row(row, op, op.start_x, options).ok_or(
            Error::PlacementExhausted {
                row: key,
                x: op.start_x,
            },
        )?;
        if placed != op.start_x {
            log::debug!(
                "row {} x={} occupied, placed '{}' at {}",
                key,
                op.start_x,
                op.text(true),
                placed
            );
        }
    }

    let mut text = String::new();
    for (_, row) in rows.iter().rev() {
        for op in row.values() {
            text.push_str(&op.text(options.include_special));
        }
        text.push('\n');
    }

    Ok(PageLayout { rows, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontDefinition, TextParams, TextRun};

    fn font() -> FontDefinition {
        FontDefinition::new("F1", 32, 126, vec![0.5; 95])
    }

    fn op<'f>(font: &'f FontDefinition, text: &str, x: f64, y: f64) -> ShowOperation<'f> {
        ShowOperation::new(
            vec![TextRun::new(text, 1.0)],
            1,
            (x, y),
            font,
            TextParams {
                font_size: 10.0,
                ..TextParams::default()
            },
        )
    }

    #[test]
    fn test_row_key_floors() {
        assert_eq!(row_key(100.0, 10.0), 10);
        assert_eq!(row_key(104.0, 10.0), 10);
        assert_eq!(row_key(99.9, 10.0), 9);
        assert_eq!(row_key(-0.5, 10.0), -1);
    }

    #[test]
    fn test_same_row_ordered_by_x() {
        let font = font();
        let ops = vec![op(&font, "second", 50.0, 104.0), op(&font, "first", 5.0, 100.0)];
        let layout = reconstruct(&ops, &LayoutOptions::default()).unwrap();
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.text, "firstsecond\n");
    }

    #[test]
    fn test_rows_top_to_bottom() {
        let font = font();
        let ops = vec![
            op(&font, "bottom", 10.0, 100.0),
            op(&font, "top", 10.0, 700.0),
            op(&font, "middle", 10.0, 400.0),
        ];
        let layout = reconstruct(&ops, &LayoutOptions::default()).unwrap();
        assert_eq!(layout.text, "top\nmiddle\nbottom\n");
        let keys: Vec<i64> = layout.rows_in_reading_order().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![70, 40, 10]);
    }

    #[test]
    fn test_collision_nudges_by_one_step() {
        let font = font();
        let a = op(&font, "a", 5.0, 100.0);
        let b = op(&font, "b", 5.0, 100.0);
        let options = LayoutOptions::default();
        let mut row = Row::new();
        assert_eq!(insert_into_row(&mut row, &a, 5.0, &options), Some(5.0));
        let placed = insert_into_row(&mut row, &b, 5.0, &options).unwrap();
        assert_eq!(placed, 5.0 + options.insertion_precision);
        assert_eq!(row.len(), 2);
        assert_eq!(row[&OrderedFloat(5.0)].text(false), "a");
    }

    #[test]
    fn test_collision_searches_down_when_up_taken() {
        let font = font();
        let ops: Vec<_> = (0..3).map(|_| op(&font, "x", 5.0, 0.0)).collect();
        let options = LayoutOptions::default();
        let mut row = Row::new();
        let placed: Vec<f64> = ops
            .iter()
            .map(|o| insert_into_row(&mut row, o, 5.0, &options).unwrap())
            .collect();
        let step = options.insertion_precision;
        assert_eq!(placed, vec![5.0, 5.0 + step, 5.0 - step]);
    }

    #[test]
    fn test_upper_boundary_forces_search_down() {
        let font = font();
        let a = op(&font, "a", 595.28, 0.0);
        let b = op(&font, "b", 595.28, 0.0);
        let options = LayoutOptions::default();
        let mut row = Row::new();
        insert_into_row(&mut row, &a, 595.28, &options).unwrap();
        let placed = insert_into_row(&mut row, &b, 595.28, &options).unwrap();
        assert!(placed < 595.28);
    }

    #[test]
    fn test_exhausted_search_is_error() {
        let font = font();
        let ops = vec![op(&font, "a", 5.0, 0.0), op(&font, "b", 5.0, 0.0)];
        let options = LayoutOptions::default().with_column_search(1.0, 0.0);
        let err = reconstruct(&ops, &options).unwrap_err();
        assert!(matches!(err, Error::PlacementExhausted { row: 0, .. }));
    }

    #[test]
    fn test_non_finite_x_is_rejected() {
        let font = font();
        let a = op(&font, "a", f64::NAN, 0.0);
        let mut row = Row::new();
        assert!(insert_into_row(&mut row, &a, f64::NAN, &LayoutOptions::default()).is_none());
    }

    #[test]
    fn test_empty_input() {
        let layout = reconstruct(&[], &LayoutOptions::default()).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.text, "");
    }

    #[test]
    fn test_reconstruct_is_deterministic() {
        let font = font();
        let ops: Vec<_> = (0..50)
            .map(|i| op(&font, "w", f64::from(i % 7) * 3.0, f64::from(i % 5) * 12.0))
            .collect();
        let first = reconstruct(&ops, &LayoutOptions::default()).unwrap();
        let second = reconstruct(&ops, &LayoutOptions::default()).unwrap();
        assert_eq!(first.text, second.text);
        assert_eq!(
            first.placements(false),
            second.placements(false)
        );
    }

    #[test]
    fn test_placements_in_reading_order() {
        let font = font();
        let ops = vec![op(&font, "low", 10.0, 50.0), op(&font, "high", 10.0, 500.0)];
        let layout = reconstruct(&ops, &LayoutOptions::default()).unwrap();
        let placements = layout.placements(false);
        assert_eq!(placements[0].text, "high");
        assert_eq!(placements[0].row, 50);
        assert_eq!(placements[1].text, "low");
        assert_eq!(placements[1].font, "F1");
    }
}
