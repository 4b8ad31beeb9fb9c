/// Errors raised by schema setup and explicit unit conversions.
///
/// Malformed *file content* never produces an `Error`: structural and
/// semantic data problems are collected as graded diagnostics by the
/// [`Checker`](crate::checker::Checker). An `Error` always indicates a
/// mistake made by code (a bad unit token in a schema definition, or a
/// conversion request between unrelated units).
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No unit's alias list contains the given token.
    UnsupportedUnit(String),
    /// Conversion requested towards a unit that is not this unit's reference.
    IncompatibleUnits {
        /// Canonical symbol of the source unit.
        from: &'static str,
        /// Canonical symbol of the requested target unit.
        to: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnsupportedUnit(token) => write!(f, "unsupported unit: [{token}]"),
            Error::IncompatibleUnits { from, to } => {
                write!(f, "unit conversion not allowed from [{from}] to [{to}]")
            }
        }
    }
}

impl std::error::Error for Error {}
