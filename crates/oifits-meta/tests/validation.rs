//! End-to-end validation tests for oifits-meta.
//!
//! Schemas are built in code, bound to in-memory decoded content, and
//! checked through the full table-validation path.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use oifits_meta::{
    check_table, Checker, ColumnData, DataRange, DataType, FieldDescriptor, HduModel, HduSchema,
    SchemaRegistry, Severity, Unit,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn wavelength_schema() -> Arc<HduSchema> {
    let mut schema = HduSchema::new("OI_WAVELENGTH");
    schema
        .add(FieldDescriptor::keyword(
            "EXTNAME",
            "extension name",
            DataType::Char,
        ))
        .add(
            FieldDescriptor::keyword("OI_REVN", "revision number", DataType::Int)
                .with_int_accepted(vec![1, 2]),
        )
        .add(
            FieldDescriptor::column("EFF_WAVE", "effective wavelength", DataType::Double, 1)
                .with_unit(Unit::Meter)
                .with_range(DataRange::POSITIVE)
                .with_error_column("EFF_BAND"),
        )
        .add(
            FieldDescriptor::column("EFF_BAND", "effective bandwidth", DataType::Double, 1)
                .with_unit(Unit::Meter)
                .with_range(DataRange::POSITIVE)
                .optional(),
        );
    Arc::new(schema)
}

fn vis_schema() -> Arc<HduSchema> {
    let mut schema = HduSchema::new("OI_VIS");
    schema
        .add(FieldDescriptor::keyword(
            "EXTNAME",
            "extension name",
            DataType::Char,
        ))
        .add(
            FieldDescriptor::dynamic_column("VISAMP", "visibility amplitude", DataType::Double)
                .with_error_column("VISAMPERR"),
        )
        .add(FieldDescriptor::dynamic_column(
            "VISDATA",
            "raw visibility",
            DataType::Complex,
        ));
    Arc::new(schema)
}

fn severes(checker: &Checker) -> Vec<&str> {
    checker
        .messages()
        .iter()
        .filter(|m| m.severity == Severity::Severe)
        .map(|m| m.message.as_str())
        .collect()
}

// ===========================================================================
// Full table validation
// ===========================================================================

#[test]
fn missing_mandatory_keyword_is_the_only_severe() {
    // EXTNAME unset, EFF_WAVE well-formed: exactly one severe finding.
    let mut model = HduModel::new(wavelength_schema());
    model.set_ext_nb(1);
    model.set_keyword("OI_REVN", 2i64);

    let mut columns = HashMap::new();
    columns.insert(
        String::from("EFF_WAVE"),
        ColumnData::Double(vec![1.2e-6, 1.4e-6, 1.6e-6]),
    );

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 3, None, &mut checker);

    let msgs = severes(&checker);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("Missing keyword 'EXTNAME'"));
    assert_eq!(checker.n_warnings(), 0);
}

#[test]
fn clean_table_reports_nothing_but_info() {
    let mut model = HduModel::new(wavelength_schema());
    model.set_ext_nb(1);
    model.set_keyword("EXTNAME", "OI_WAVELENGTH");
    model.set_keyword("OI_REVN", 1i64);

    let mut columns = HashMap::new();
    columns.insert(
        String::from("EFF_WAVE"),
        ColumnData::Double(vec![1.2e-6, 1.4e-6]),
    );
    columns.insert(
        String::from("EFF_BAND"),
        ColumnData::Double(vec![1.0e-8, 1.0e-8]),
    );

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 2, None, &mut checker);

    assert_eq!(checker.n_severes(), 0);
    assert_eq!(checker.n_warnings(), 0);
    assert_eq!(checker.messages()[0].severity, Severity::Info);
    assert!(checker.messages()[0]
        .message
        .contains("Analysing HDU [OI_WAVELENGTH#1]:"));
}

#[test]
fn every_defect_is_collected_in_one_pass() {
    // Bad revision value, missing mandatory column, out-of-range
    // wavelength: all three findings come back together.
    let mut model = HduModel::new(wavelength_schema());
    model.set_keyword("EXTNAME", "OI_WAVELENGTH");
    model.set_keyword("OI_REVN", 9i64);

    let mut columns = HashMap::new();

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 2, None, &mut checker);

    let msgs = severes(&checker);
    assert_eq!(msgs.len(), 2);
    assert!(msgs[0].contains("Invalid value for keyword 'OI_REVN', found '9' should be '1|2'"));
    assert!(msgs[1].contains("Missing column 'EFF_WAVE'"));
    // Optional EFF_BAND absent: no finding.
    assert!(!checker
        .messages()
        .iter()
        .any(|m| m.message.contains("EFF_BAND")));
}

#[test]
fn optional_column_present_is_still_checked() {
    let mut model = HduModel::new(wavelength_schema());
    model.set_keyword("EXTNAME", "OI_WAVELENGTH");
    model.set_keyword("OI_REVN", 1i64);

    let mut columns = HashMap::new();
    columns.insert(String::from("EFF_WAVE"), ColumnData::Double(vec![1.2e-6]));
    columns.insert(String::from("EFF_BAND"), ColumnData::Double(vec![-1.0e-8]));

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 1, None, &mut checker);

    let msgs = severes(&checker);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("Invalid value for column 'EFF_BAND' line 0"));
}

// ===========================================================================
// Dynamic cardinality
// ===========================================================================

#[test]
fn dynamic_columns_track_the_channel_count_across_passes() {
    let mut model = HduModel::new(vis_schema());
    model.set_keyword("EXTNAME", "OI_VIS");

    let nwave = Cell::new(4usize);
    let provider = || nwave.get();

    let mut columns = HashMap::new();
    columns.insert(
        String::from("VISAMP"),
        ColumnData::DoubleArray(vec![vec![0.9; 4]; 2]),
    );
    columns.insert(
        String::from("VISDATA"),
        ColumnData::RealCube(vec![vec![vec![0.0, 1.0]; 4]; 2]),
    );

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 2, Some(&provider), &mut checker);
    assert_eq!(checker.n_severes(), 0);

    // The wavelength table grew: the same descriptors now resolve to
    // the new cardinality and the unchanged data no longer fits.
    nwave.set(6);
    checker.clear();
    check_table(&model, &mut columns, 2, Some(&provider), &mut checker);

    let msgs = severes(&checker);
    assert_eq!(msgs.len(), 2);
    assert!(msgs[0].contains("Invalid format for column 'VISAMP', found '4D' should be '6D'"));
    assert!(msgs[1].contains("Invalid format for column 'VISDATA', found '4C' should be '6C'"));
}

#[test]
fn dynamic_columns_without_provider_degrade_to_warnings() {
    let mut model = HduModel::new(vis_schema());
    model.set_keyword("EXTNAME", "OI_VIS");

    let mut columns = HashMap::new();
    columns.insert(
        String::from("VISAMP"),
        ColumnData::DoubleArray(vec![vec![0.9; 4]; 2]),
    );
    columns.insert(
        String::from("VISDATA"),
        ColumnData::RealCube(vec![vec![vec![0.0, 1.0]; 4]; 2]),
    );

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 2, None, &mut checker);

    assert_eq!(checker.n_severes(), 0);
    assert_eq!(checker.n_warnings(), 2);
    assert!(checker
        .messages()
        .iter()
        .any(|m| m.message.contains("Can't check repeat for column 'VISAMP'")));
}

#[test]
fn malformed_complex_cube_is_severe() {
    let mut model = HduModel::new(vis_schema());
    model.set_keyword("EXTNAME", "OI_VIS");

    let provider = || 4usize;
    let mut columns = HashMap::new();
    columns.insert(
        String::from("VISAMP"),
        ColumnData::DoubleArray(vec![vec![0.9; 4]; 2]),
    );
    // Trailing dimension 3 is not interpretable as (real, imaginary).
    columns.insert(
        String::from("VISDATA"),
        ColumnData::RealCube(vec![vec![vec![0.0, 1.0, 2.0]; 4]; 2]),
    );

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 2, Some(&provider), &mut checker);

    let msgs = severes(&checker);
    assert!(msgs
        .iter()
        .any(|m| m.contains("Unsupported array dimensions for column 'VISDATA': f32[2][4][3]")));
}

// ===========================================================================
// String columns
// ===========================================================================

#[test]
fn string_widths_tolerate_underflow_only() {
    let mut schema = HduSchema::new("OI_TARGET");
    schema.add(FieldDescriptor::column(
        "TARGET",
        "target name",
        DataType::Char,
        16,
    ));
    let model = HduModel::new(Arc::new(schema));

    let mut columns = HashMap::new();
    columns.insert(
        String::from("TARGET"),
        ColumnData::String(vec![Some(String::from("VEGA")), None]),
    );

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 2, None, &mut checker);
    assert_eq!(checker.n_severes(), 0);

    // The unset cell was normalized while checking.
    match columns.get("TARGET").unwrap() {
        ColumnData::String(cells) => assert_eq!(cells[1].as_deref(), Some("")),
        other => panic!("Expected String, got {:?}", other),
    }

    columns.insert(
        String::from("TARGET"),
        ColumnData::String(vec![Some(String::from("A-NAME-LONGER-THAN-16-CHARS")), None]),
    );
    checker.clear();
    check_table(&model, &mut columns, 2, None, &mut checker);
    let msgs = severes(&checker);
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("found '27A' should be '16A'"));
}

// ===========================================================================
// Registry round
// ===========================================================================

#[test]
fn registry_feeds_models_for_validation() {
    let mut registry = SchemaRegistry::new();
    registry.register(Arc::try_unwrap(wavelength_schema()).unwrap());

    let mut model = registry.model("OI_WAVELENGTH").unwrap();
    model.set_keyword("EXTNAME", "OI_WAVELENGTH");
    model.set_keyword("OI_REVN", 1i64);

    let mut columns = HashMap::new();
    columns.insert(String::from("EFF_WAVE"), ColumnData::Double(vec![2.2e-6]));

    let mut checker = Checker::new();
    check_table(&model, &mut columns, 1, None, &mut checker);
    assert_eq!(checker.n_severes(), 0);

    assert!(registry.model("NO_SUCH_TABLE").is_none());
}
