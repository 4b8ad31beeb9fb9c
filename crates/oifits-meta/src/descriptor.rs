//! Field descriptors: the immutable schema entry for one keyword or
//! column.

use crate::datatype::DataType;
use crate::range::DataRange;
use crate::unit::Unit;

/// Provider of the current spectral channel count, used to resolve
/// the cardinality of dynamic columns at validation time.
///
/// The provider is queried on every resolution and its answer must
/// reflect the backing table's current state (rows may be appended
/// between two validation passes). Implementations must be
/// side-effect-free and safe to call repeatedly.
pub trait ChannelCount {
    /// Current number of distinct spectral channels.
    fn channel_count(&self) -> usize;
}

impl<F: Fn() -> usize> ChannelCount for F {
    fn channel_count(&self) -> usize {
        self()
    }
}

/// The kind of field a descriptor declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Scalar header keyword.
    Keyword,
    /// Table column with a fixed repeat count.
    Column {
        /// Name of the companion column holding per-value errors.
        error_column: Option<String>,
    },
    /// Table column whose repeat count is resolved at validation time
    /// from the associated spectral table's channel count.
    DynamicColumn {
        /// Name of the companion column holding per-value errors.
        error_column: Option<String>,
    },
}

/// Enumerated accepted values for a field.
///
/// A field declares integer values, string values, or neither; the
/// closed enum makes declaring both impossible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedValues {
    /// Any value is accepted.
    None,
    /// Only the listed integers are accepted.
    Int(Vec<i16>),
    /// Only the listed strings are accepted.
    Str(Vec<String>),
}

impl AcceptedValues {
    /// `|`-separated display form used in diagnostics messages.
    pub fn as_choice_string(&self) -> String {
        match self {
            AcceptedValues::None => String::new(),
            AcceptedValues::Int(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("|"),
            AcceptedValues::Str(values) => values.join("|"),
        }
    }
}

/// Immutable description of one named keyword or column.
///
/// # Identity
///
/// Equality and hashing are defined **solely by the field name**: two
/// descriptors with the same name but different shapes compare equal
/// and hash identically. This is a deliberate identity contract
/// (descriptors act as map/set keys, and a same-named descriptor is a
/// duplicate by definition); do not replace it with derived
/// structural equality.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    description: String,
    data_type: DataType,
    /// Cardinality: 0 means "resolved dynamically or unknown"; for
    /// character fields, a positive value is the maximum string
    /// length rather than an element count.
    repeat: usize,
    unit: Unit,
    accepted: AcceptedValues,
    data_range: Option<DataRange>,
    optional: bool,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// Canonical initializer; every public constructor funnels here.
    fn init(
        name: impl Into<String>,
        description: impl Into<String>,
        data_type: DataType,
        repeat: usize,
        kind: FieldKind,
    ) -> FieldDescriptor {
        FieldDescriptor {
            name: name.into(),
            description: description.into(),
            data_type,
            repeat,
            unit: Unit::NoUnit,
            accepted: AcceptedValues::None,
            data_range: None,
            optional: false,
            kind,
        }
    }

    /// A mandatory scalar keyword with no unit and no accepted values.
    pub fn keyword(
        name: impl Into<String>,
        description: impl Into<String>,
        data_type: DataType,
    ) -> FieldDescriptor {
        FieldDescriptor::init(name, description, data_type, 1, FieldKind::Keyword)
    }

    /// A mandatory column with the given cardinality (for character
    /// columns, the maximum string length).
    pub fn column(
        name: impl Into<String>,
        description: impl Into<String>,
        data_type: DataType,
        repeat: usize,
    ) -> FieldDescriptor {
        FieldDescriptor::init(
            name,
            description,
            data_type,
            repeat,
            FieldKind::Column { error_column: None },
        )
    }

    /// A column whose cardinality is resolved at validation time from
    /// a [`ChannelCount`] provider. Its stored repeat is 0 and is
    /// never consulted.
    pub fn dynamic_column(
        name: impl Into<String>,
        description: impl Into<String>,
        data_type: DataType,
    ) -> FieldDescriptor {
        FieldDescriptor::init(
            name,
            description,
            data_type,
            0,
            FieldKind::DynamicColumn { error_column: None },
        )
    }

    /// Attach a unit.
    pub fn with_unit(mut self, unit: Unit) -> FieldDescriptor {
        self.unit = unit;
        self
    }

    /// Attach a sanity range.
    pub fn with_range(mut self, range: DataRange) -> FieldDescriptor {
        self.data_range = Some(range);
        self
    }

    /// Restrict values to an integer enumeration. Replaces any
    /// previously declared accepted set.
    pub fn with_int_accepted(mut self, values: impl Into<Vec<i16>>) -> FieldDescriptor {
        self.accepted = AcceptedValues::Int(values.into());
        self
    }

    /// Restrict values to a string enumeration. Replaces any
    /// previously declared accepted set.
    pub fn with_str_accepted<S: Into<String>>(
        mut self,
        values: impl IntoIterator<Item = S>,
    ) -> FieldDescriptor {
        self.accepted = AcceptedValues::Str(values.into_iter().map(Into::into).collect());
        self
    }

    /// Name the companion column holding per-value errors. No effect
    /// on keyword descriptors.
    pub fn with_error_column(mut self, error: impl Into<String>) -> FieldDescriptor {
        match &mut self.kind {
            FieldKind::Column { error_column } | FieldKind::DynamicColumn { error_column } => {
                *error_column = Some(error.into());
            }
            FieldKind::Keyword => {}
        }
        self
    }

    /// Mark the field optional (absence is not a defect).
    pub fn optional(mut self) -> FieldDescriptor {
        self.optional = true;
        self
    }

    /// Field name, the sole identity key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptive comment.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Stored cardinality (0 for dynamic/unknown). Use
    /// [`resolve_repeat`](FieldDescriptor::resolve_repeat) to obtain
    /// the effective cardinality of a dynamic column.
    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Attached unit (advisory metadata, never validated).
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Declared accepted-value enumeration.
    pub fn accepted(&self) -> &AcceptedValues {
        &self.accepted
    }

    /// Optional sanity range.
    pub fn data_range(&self) -> Option<&DataRange> {
        self.data_range.as_ref()
    }

    /// `true` if absence of this field is tolerated.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The field kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Name of the companion error column, if declared.
    pub fn error_column(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Column { error_column } | FieldKind::DynamicColumn { error_column } => {
                error_column.as_deref()
            }
            FieldKind::Keyword => None,
        }
    }

    /// `true` for a multi-valued field: stored cardinality above 1,
    /// or a dynamic column (whose resolved cardinality may exceed 1).
    pub fn is_array(&self) -> bool {
        self.repeat > 1 || matches!(self.kind, FieldKind::DynamicColumn { .. })
    }

    /// Effective cardinality.
    ///
    /// A dynamic column queries the provider **every time** (the
    /// backing table may have grown since the last call); with no
    /// provider available it resolves to 0, the "unknown, cannot
    /// check repeat" sentinel. Static fields return the stored value.
    pub fn resolve_repeat(&self, channels: Option<&dyn ChannelCount>) -> usize {
        match self.kind {
            FieldKind::DynamicColumn { .. } => {
                channels.map(|c| c.channel_count()).unwrap_or(0)
            }
            _ => self.repeat,
        }
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FieldDescriptor {}

impl core::hash::Hash for FieldDescriptor {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl core::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self.kind {
            FieldKind::Keyword => "KEYWORD",
            FieldKind::Column { .. } | FieldKind::DynamicColumn { .. } => "COLUMN",
        };
        write!(f, "{} '{}' [{} {}]", label, self.name, self.repeat, self.data_type)?;
        if self.unit != Unit::NoUnit {
            write!(f, " ({})", self.unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    fn hash_of(desc: &FieldDescriptor) -> u64 {
        let mut hasher = DefaultHasher::new();
        desc.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_is_name_only() {
        let a = FieldDescriptor::keyword("EFF_WAVE", "wavelength", DataType::Double);
        let b = FieldDescriptor::column("EFF_WAVE", "something else", DataType::Int, 12);
        let c = FieldDescriptor::keyword("EFF_BAND", "bandwidth", DataType::Double);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn same_name_descriptors_dedup_in_sets() {
        let mut set = HashSet::new();
        set.insert(FieldDescriptor::keyword("X", "first", DataType::Char));
        set.insert(FieldDescriptor::column("X", "second", DataType::Real, 3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn defaults_are_mandatory_no_unit_no_values() {
        let desc = FieldDescriptor::column("VIS2DATA", "squared visibility", DataType::Double, 1);
        assert!(!desc.is_optional());
        assert_eq!(desc.unit(), Unit::NoUnit);
        assert_eq!(*desc.accepted(), AcceptedValues::None);
        assert!(desc.data_range().is_none());
        assert!(desc.error_column().is_none());
    }

    #[test]
    fn builder_attributes() {
        let desc = FieldDescriptor::column("EFF_WAVE", "effective wavelength", DataType::Real, 1)
            .with_unit(Unit::Meter)
            .with_range(DataRange::POSITIVE)
            .with_error_column("EFF_BAND")
            .optional();
        assert_eq!(desc.unit(), Unit::Meter);
        assert!(desc.data_range().is_some());
        assert_eq!(desc.error_column(), Some("EFF_BAND"));
        assert!(desc.is_optional());
    }

    #[test]
    fn accepted_sets_are_exclusive_by_replacement() {
        let desc = FieldDescriptor::column("TARGET_ID", "target index", DataType::Int, 1)
            .with_int_accepted(vec![1, 2, 3])
            .with_str_accepted(["A", "B"]);
        // Declaring the string set replaced the integer set entirely.
        match desc.accepted() {
            AcceptedValues::Str(values) => assert_eq!(values, &["A", "B"]),
            other => panic!("Expected Str, got {:?}", other),
        }
    }

    #[test]
    fn is_array_rules() {
        assert!(!FieldDescriptor::column("A", "", DataType::Double, 1).is_array());
        assert!(FieldDescriptor::column("B", "", DataType::Double, 2).is_array());
        assert!(FieldDescriptor::dynamic_column("C", "", DataType::Double).is_array());
    }

    #[test]
    fn static_repeat_resolution() {
        let desc = FieldDescriptor::column("STA_INDEX", "stations", DataType::Int, 2);
        assert_eq!(desc.resolve_repeat(None), 2);
        let provider = || 99usize;
        assert_eq!(desc.resolve_repeat(Some(&provider)), 2);
    }

    #[test]
    fn dynamic_repeat_queries_provider_every_time() {
        let desc = FieldDescriptor::dynamic_column("VISAMP", "amplitude", DataType::Double);
        let nwave = Cell::new(5usize);
        let provider = || nwave.get();

        assert_eq!(desc.resolve_repeat(Some(&provider)), 5);
        nwave.set(8);
        assert_eq!(desc.resolve_repeat(Some(&provider)), 8);
    }

    #[test]
    fn dynamic_repeat_without_provider_is_unknown() {
        let desc = FieldDescriptor::dynamic_column("VISAMP", "amplitude", DataType::Double);
        assert_eq!(desc.resolve_repeat(None), 0);
    }

    #[test]
    fn error_column_ignored_on_keywords() {
        let desc = FieldDescriptor::keyword("EXTNAME", "extension name", DataType::Char)
            .with_error_column("IGNORED");
        assert!(desc.error_column().is_none());
    }

    #[test]
    fn display_format() {
        let kw = FieldDescriptor::keyword("EXTNAME", "extension name", DataType::Char);
        assert_eq!(kw.to_string(), "KEYWORD 'EXTNAME' [1 A]");

        let col = FieldDescriptor::column("EFF_WAVE", "wavelength", DataType::Real, 1)
            .with_unit(Unit::Meter);
        assert_eq!(col.to_string(), "COLUMN 'EFF_WAVE' [1 E] (m)");
    }

    #[test]
    fn choice_strings() {
        assert_eq!(
            AcceptedValues::Int(vec![1, 2, 3]).as_choice_string(),
            "1|2|3"
        );
        assert_eq!(
            AcceptedValues::Str(vec!["LSR".into(), "HELIOCEN".into()]).as_choice_string(),
            "LSR|HELIOCEN"
        );
        assert_eq!(AcceptedValues::None.as_choice_string(), "");
    }
}
