//! Reconstruction options and configuration.

/// Height of one visual row in text space units.
pub const DEFAULT_ROW_HEIGHT: f64 = 10.0;

/// Step used when searching for a free column slot.
pub const DEFAULT_INSERTION_PRECISION: f64 = 0.000_000_1;

/// Largest distance from the requested X a column slot may be moved.
pub const DEFAULT_MAX_INSERT_VARIANCE: f64 = 50.0;

/// Lowest X a displaced column slot may take.
pub const DEFAULT_MIN_INSERT_BOUNDARY: f64 = 1.0;

/// Highest X a displaced column slot may take (A4 width in points).
pub const DEFAULT_MAX_INSERT_BOUNDARY: f64 = 595.28;

/// Options for rebuilding reading order from show operations.
///
/// The defaults are tuned against real documents; changing them changes
/// which operations end up on the same row.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Y distance quantized into one row
    pub row_height: f64,

    /// Column search step
    pub insertion_precision: f64,

    /// Column search radius
    pub max_insert_variance: f64,

    /// Lower bound for displaced column slots
    pub min_insert_boundary: f64,

    /// Upper bound for displaced column slots
    pub max_insert_boundary: f64,

    /// Keep bytes outside printable ASCII in the output text
    pub include_special: bool,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row height.
    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Set the column search step and radius.
    pub fn with_column_search(mut self, precision: f64, max_variance: f64) -> Self {
        self.insertion_precision = precision;
        self.max_insert_variance = max_variance;
        self
    }

    /// Set the bounds for displaced column slots.
    pub fn with_boundaries(mut self, min: f64, max: f64) -> Self {
        self.min_insert_boundary = min;
        self.max_insert_boundary = max;
        self
    }

    /// Keep or drop non-printable bytes.
    pub fn with_special_chars(mut self, include: bool) -> Self {
        self.include_special = include;
        self
    }

    /// Number of search steps allowed on each side of the requested X.
    pub fn max_search_steps(&self) -> u64 {
        if self.insertion_precision > 0.0 {
            (self.max_insert_variance / self.insertion_precision).round() as u64
        } else {
            0
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            insertion_precision: DEFAULT_INSERTION_PRECISION,
            max_insert_variance: DEFAULT_MAX_INSERT_VARIANCE,
            min_insert_boundary: DEFAULT_MIN_INSERT_BOUNDARY,
            max_insert_boundary: DEFAULT_MAX_INSERT_BOUNDARY,
            include_special: false,
        }
    }
}
