//! Validation: graded diagnostics and the keyword/column checking
//! algorithms.
//!
//! Checking is exhaustive, never fail-fast: every defect of every
//! field is collected into the [`Checker`] so a caller sees the
//! complete list in one pass. Only schema misconfiguration surfaces
//! as [`Error`](crate::error::Error) elsewhere; malformed file
//! content always becomes a diagnostic.

use std::collections::HashMap;

use crate::column::ColumnData;
use crate::datatype::DataType;
use crate::descriptor::{AcceptedValues, ChannelCount, FieldDescriptor};
use crate::model::HduModel;
use crate::value::KeywordValue;

/// Grading of a validation finding. Severe findings indicate format
/// non-compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational note.
    Info,
    /// Tolerated deviation, or a check that could not be performed.
    Warning,
    /// Format non-compliance.
    Severe,
}

impl Severity {
    /// Short uppercase label used in report dumps.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Severe => "SEVERE",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckMessage {
    /// Finding grade.
    pub severity: Severity,
    /// Name of the field the finding concerns, when applicable.
    pub field: Option<String>,
    /// Human-readable message.
    pub message: String,
}

/// Accumulating diagnostics sink.
///
/// Recording can be suspended (e.g. while probing data that is known
/// to be incomplete) without touching already-collected findings.
#[derive(Debug)]
pub struct Checker {
    records: Vec<CheckMessage>,
    recording: bool,
}

impl Default for Checker {
    fn default() -> Checker {
        Checker::new()
    }
}

impl Checker {
    /// A fresh, recording sink.
    pub fn new() -> Checker {
        Checker {
            records: Vec::with_capacity(32),
            recording: true,
        }
    }

    fn add(&mut self, severity: Severity, field: Option<String>, message: String) {
        if self.recording {
            self.records.push(CheckMessage {
                severity,
                field,
                message,
            });
        }
    }

    /// Record an informational message not tied to a field.
    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Severity::Info, None, message.into());
    }

    /// Record a warning about the named field.
    pub fn warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.add(Severity::Warning, Some(field.into()), message.into());
    }

    /// Record a severe finding about the named field.
    pub fn severe(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.add(Severity::Severe, Some(field.into()), message.into());
    }

    /// All findings, in emission order.
    pub fn messages(&self) -> &[CheckMessage] {
        &self.records
    }

    /// Number of warnings collected.
    pub fn n_warnings(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .count()
    }

    /// Number of severe findings collected.
    pub fn n_severes(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.severity == Severity::Severe)
            .count()
    }

    /// One-line summary of the findings collected so far.
    pub fn status(&self) -> String {
        format!(
            "{} warnings, {} severe errors",
            self.n_warnings(),
            self.n_severes()
        )
    }

    /// Multi-line report: one `LABEL\tmessage` line per finding,
    /// ending with the status line.
    pub fn report(&self) -> String {
        let mut out = String::with_capacity(self.records.len() * 50);
        for record in &self.records {
            out.push_str(record.severity.label());
            out.push('\t');
            out.push_str(&record.message);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.status());
        out
    }

    /// Discard every collected finding.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Enable or suspend recording. Findings emitted while suspended
    /// are dropped.
    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }
}

/// Check one keyword value against its descriptor: type match first,
/// then accepted-value membership (only meaningful when the type
/// matched).
pub fn check_keyword(desc: &FieldDescriptor, value: &KeywordValue, checker: &mut Checker) {
    log::debug!("check : {} = {}", desc.name(), value);

    let actual = value.data_type();
    if actual != desc.data_type() {
        checker.severe(
            desc.name(),
            format!(
                "Invalid format for keyword '{}', found '{}' should be '{}'",
                desc.name(),
                actual.code(),
                desc.data_type().code()
            ),
        );
        return;
    }

    match desc.accepted() {
        AcceptedValues::None => {}
        AcceptedValues::Int(accepted) => {
            if let Some(val) = value.as_int() {
                if !accepted.iter().any(|&a| i64::from(a) == val) {
                    checker.severe(
                        desc.name(),
                        format!(
                            "Invalid value for keyword '{}', found '{}' should be '{}'",
                            desc.name(),
                            val,
                            desc.accepted().as_choice_string()
                        ),
                    );
                }
            }
        }
        AcceptedValues::Str(accepted) => {
            if let Some(val) = value.as_str() {
                if !accepted.iter().any(|a| a == val) {
                    checker.severe(
                        desc.name(),
                        format!(
                            "Invalid value for keyword '{}', found '{}' should be '{}'",
                            desc.name(),
                            val,
                            desc.accepted().as_choice_string()
                        ),
                    );
                }
            }
        }
    }
}

/// Check one decoded column against its descriptor.
///
/// The algorithm, in order and without ever stopping early:
///
/// 1. classify the raw array (element type, rows, per-row repeat;
///    unset string cells are normalized to empty strings, and an
///    uninterpretable 3-D shape is reported severe);
/// 2. row-count check against `n_rows`;
/// 3. repeat/type check against the declared cardinality — resolved
///    through `channels` for dynamic columns — where character
///    columns only reject *overflow* of the declared width and a
///    declared cardinality of 0 downgrades the repeat check to a
///    warning while still enforcing the type;
/// 4. accepted-value membership per row (and per repeat index for
///    array cells);
/// 5. sanity-range check for numeric columns declaring a range.
///
/// Units are advisory metadata and are not checked here.
pub fn check_column(
    desc: &FieldDescriptor,
    value: &mut ColumnData,
    n_rows: usize,
    channels: Option<&dyn ChannelCount>,
    checker: &mut Checker,
) {
    log::debug!("check : {} = {}", desc.name(), value.shape_description());

    let shape = value.classify();

    if !shape.supported {
        let message = format!(
            "Unsupported array dimensions for column '{}': {}",
            desc.name(),
            value.shape_description()
        );
        log::error!("{}", message);
        checker.severe(desc.name(), message);
    }

    if shape.rows != n_rows {
        checker.severe(
            desc.name(),
            format!(
                "Invalid length for column '{}', found {} row(s) should be {} row(s)",
                desc.name(),
                shape.rows,
                n_rows
            ),
        );
    }

    let desc_type = desc.data_type();
    let desc_repeat = desc.resolve_repeat(channels);

    if desc_repeat == 0 {
        // Unknown cardinality (or a dynamic column with no resolvable
        // reference): repeat cannot be checked, the type still can.
        checker.warning(
            desc.name(),
            format!("Can't check repeat for column '{}'", desc.name()),
        );
        if shape.data_type != desc_type {
            checker.severe(
                desc.name(),
                format!(
                    "Invalid format for column '{}', found '{}' should be '{}'",
                    desc.name(),
                    shape.data_type.code(),
                    desc_type.code()
                ),
            );
        }
    } else {
        let mismatch = if shape.data_type != desc_type {
            true
        } else if desc_type == DataType::Char {
            // Fixed-width strings: shorter values are padded by the
            // format, only overflow is a defect.
            shape.repeat > desc_repeat
        } else {
            shape.repeat != desc_repeat
        };
        if mismatch {
            checker.severe(
                desc.name(),
                format!(
                    "Invalid format for column '{}', found '{}{}' should be '{}{}'",
                    desc.name(),
                    shape.repeat,
                    shape.data_type.code(),
                    desc_repeat,
                    desc_type.code()
                ),
            );
        }
    }

    check_column_values(desc, value, checker);
}

/// Accepted-value and range checks over every row and repeat position.
fn check_column_values(desc: &FieldDescriptor, value: &ColumnData, checker: &mut Checker) {
    match desc.accepted() {
        AcceptedValues::Int(accepted) => {
            let choices = desc.accepted().as_choice_string();
            match value {
                ColumnData::Short(rows) => {
                    for (row, &val) in rows.iter().enumerate() {
                        if !accepted.contains(&val) {
                            checker.severe(
                                desc.name(),
                                format!(
                                    "Invalid value for column '{}' line {}, found '{}' should be '{}'",
                                    desc.name(),
                                    row,
                                    val,
                                    choices
                                ),
                            );
                        }
                    }
                }
                ColumnData::ShortArray(rows) => {
                    for (row, values) in rows.iter().enumerate() {
                        for (idx, &val) in values.iter().enumerate() {
                            if !accepted.contains(&val) {
                                let message = if values.len() > 1 {
                                    format!(
                                        "Invalid value at index {} for column '{}' line {}, found '{}' should be '{}'",
                                        idx,
                                        desc.name(),
                                        row,
                                        val,
                                        choices
                                    )
                                } else {
                                    format!(
                                        "Invalid value for column '{}' line {}, found '{}' should be '{}'",
                                        desc.name(),
                                        row,
                                        val,
                                        choices
                                    )
                                };
                                checker.severe(desc.name(), message);
                            }
                        }
                    }
                }
                // Any other array type already failed the type check.
                _ => {}
            }
        }
        AcceptedValues::Str(accepted) => {
            if let ColumnData::String(rows) = value {
                let choices = desc.accepted().as_choice_string();
                for (row, cell) in rows.iter().enumerate() {
                    let val = cell.as_deref().unwrap_or("");
                    if !accepted.iter().any(|a| a == val) {
                        checker.severe(
                            desc.name(),
                            format!(
                                "Invalid value for column '{}' line {}, found '{}' should be '{}'",
                                desc.name(),
                                row,
                                val,
                                choices
                            ),
                        );
                    }
                }
            }
        }
        AcceptedValues::None => {
            if let Some(range) = desc.data_range() {
                check_column_range(desc, value, *range, checker);
            }
        }
    }
}

fn check_column_range(
    desc: &FieldDescriptor,
    value: &ColumnData,
    range: crate::range::DataRange,
    checker: &mut Checker,
) {
    let mut report = |row: usize, idx: Option<usize>, val: f64| {
        let message = match idx {
            Some(idx) => format!(
                "Invalid value at index {} for column '{}' line {}, found '{}' should be in range {}",
                idx,
                desc.name(),
                row,
                val,
                range
            ),
            None => format!(
                "Invalid value for column '{}' line {}, found '{}' should be in range {}",
                desc.name(),
                row,
                val,
                range
            ),
        };
        checker.severe(desc.name(), message);
    };

    match value {
        ColumnData::Real(rows) => {
            for (row, &val) in rows.iter().enumerate() {
                if !range.contains(f64::from(val)) {
                    report(row, None, f64::from(val));
                }
            }
        }
        ColumnData::Double(rows) => {
            for (row, &val) in rows.iter().enumerate() {
                if !range.contains(val) {
                    report(row, None, val);
                }
            }
        }
        ColumnData::RealArray(rows) => {
            for (row, values) in rows.iter().enumerate() {
                for (idx, &val) in values.iter().enumerate() {
                    if !range.contains(f64::from(val)) {
                        report(row, (values.len() > 1).then_some(idx), f64::from(val));
                    }
                }
            }
        }
        ColumnData::DoubleArray(rows) => {
            for (row, values) in rows.iter().enumerate() {
                for (idx, &val) in values.iter().enumerate() {
                    if !range.contains(val) {
                        report(row, (values.len() > 1).then_some(idx), val);
                    }
                }
            }
        }
        other => {
            // Declaring a range on a non-numeric column is a schema
            // mistake, not a data defect.
            log::error!(
                "Incompatible data type {} with range check for column '{}'",
                other.shape_description(),
                desc.name()
            );
        }
    }
}

/// Validate one HDU: keywords in schema order, then every column
/// descriptor in schema order against the decoded arrays in
/// `columns`. A missing mandatory column is a severe defect; extra
/// entries in `columns` with no descriptor are ignored.
///
/// `n_rows` is the table's current row count and `channels` resolves
/// the cardinality of dynamic columns.
pub fn check_table(
    model: &HduModel,
    columns: &mut HashMap<String, ColumnData>,
    n_rows: usize,
    channels: Option<&dyn ChannelCount>,
    checker: &mut Checker,
) {
    checker.info(format!("Analysing HDU [{}]:", model.hdu_id()));

    model.check_keywords(checker);

    for desc in model.schema().columns() {
        match columns.get_mut(desc.name()) {
            None => {
                if !desc.is_optional() {
                    checker.severe(desc.name(), format!("Missing column '{}'", desc.name()));
                }
            }
            Some(column) => check_column(desc, column, n_rows, channels, checker),
        }
    }
}
