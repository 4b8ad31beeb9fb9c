//! Optional numeric sanity ranges attached to field descriptors.

/// An inclusive numeric bound for a field's values.
///
/// Either side may be NaN to mean "unbounded". The range is a plain
/// value object created at schema-definition time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange {
    min: f64,
    max: f64,
}

impl DataRange {
    /// Positive values, no upper bound.
    pub const POSITIVE: DataRange = DataRange {
        min: 0.0,
        max: f64::NAN,
    };
    /// Strictly positive values, no upper bound; out-of-range data is
    /// expected to have been replaced by NaN upstream.
    pub const POSITIVE_STRICT: DataRange = DataRange {
        min: 0.0,
        max: f64::NAN,
    };

    /// Create a range. Pass NaN for an unbounded side.
    pub const fn new(min: f64, max: f64) -> DataRange {
        DataRange { min, max }
    }

    /// The lower bound (NaN if unbounded).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound (NaN if unbounded).
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Check a value against the range.
    ///
    /// NaN values are never out of range: undefined data is not a
    /// range violation. Infinite values are always out of range.
    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        if value.is_infinite() {
            return false;
        }
        if !self.min.is_nan() && value < self.min {
            return false;
        }
        if !self.max.is_nan() && value > self.max {
            return false;
        }
        true
    }
}

impl core::fmt::Display for DataRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let min: &dyn core::fmt::Display = if self.min.is_nan() { &"-Inf" } else { &self.min };
        let max: &dyn core::fmt::Display = if self.max.is_nan() { &"+Inf" } else { &self.max };
        write!(f, "[{}, {}]", min, max)
    }
}
