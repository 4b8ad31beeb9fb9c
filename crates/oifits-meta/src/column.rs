//! Decoded table column arrays handed over by the binary codec.

use crate::datatype::DataType;

/// Raw column data for one table column, already decoded into native
/// arrays following FITS binary-table conventions: 1-D per-row
/// scalars, 2-D `[row][repeat]`, or 3-D `[row][repeat][2]` for
/// complex values.
///
/// String cells are `Option<String>` so decoders may leave unset
/// cells empty; [`ColumnData::classify`] normalizes `None` to an
/// empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// 1-D character column; repeat is the per-column string width.
    String(Vec<Option<String>>),
    /// 1-D 16-bit integer column.
    Short(Vec<i16>),
    /// 2-D 16-bit integer column.
    ShortArray(Vec<Vec<i16>>),
    /// 1-D 32-bit real column.
    Real(Vec<f32>),
    /// 2-D 32-bit real column.
    RealArray(Vec<Vec<f32>>),
    /// 1-D 64-bit double column.
    Double(Vec<f64>),
    /// 2-D 64-bit double column.
    DoubleArray(Vec<Vec<f64>>),
    /// 1-D logical column.
    Logical(Vec<bool>),
    /// 2-D logical column.
    LogicalArray(Vec<Vec<bool>>),
    /// 3-D 32-bit float column; reads as complex when the trailing
    /// dimension is exactly 2.
    RealCube(Vec<Vec<Vec<f32>>>),
}

/// The observed type and shape of a decoded column, as inferred by
/// [`ColumnData::classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnShape {
    /// Element data type; [`DataType::Complex`] for a supported cube.
    pub data_type: DataType,
    /// First array dimension, i.e. the number of rows present.
    pub rows: usize,
    /// Values per row; for character columns, the maximum observed
    /// string length.
    pub repeat: usize,
    /// `false` for a 3-D shape that is not interpretable as complex.
    pub supported: bool,
}

impl ColumnData {
    /// Number of rows present (the first array dimension).
    pub fn rows(&self) -> usize {
        match self {
            ColumnData::String(v) => v.len(),
            ColumnData::Short(v) => v.len(),
            ColumnData::ShortArray(v) => v.len(),
            ColumnData::Real(v) => v.len(),
            ColumnData::RealArray(v) => v.len(),
            ColumnData::Double(v) => v.len(),
            ColumnData::DoubleArray(v) => v.len(),
            ColumnData::Logical(v) => v.len(),
            ColumnData::LogicalArray(v) => v.len(),
            ColumnData::RealCube(v) => v.len(),
        }
    }

    /// Infer the element type and per-row repeat of this column.
    ///
    /// For 1-D columns the repeat is 1, except for character columns
    /// where it is the maximum string length across all rows (FITS
    /// strings are fixed-width per column; the observed width is
    /// inferred rather than trusted). Unset string cells are replaced
    /// by empty strings while scanning, a deliberate side effect that
    /// tolerates decoders leaving cells unset.
    ///
    /// For 2-D columns the repeat is the second dimension (taken from
    /// the first row). A 3-D column reads as [`DataType::Complex`]
    /// when its trailing dimension is 2 or when it holds no row at
    /// all; any other 3-D shape is flagged unsupported and classified
    /// by its `f32` element type.
    pub fn classify(&mut self) -> ColumnShape {
        match self {
            ColumnData::String(cells) => {
                let rows = cells.len();
                let mut max = 0;
                for cell in cells.iter_mut() {
                    match cell {
                        None => *cell = Some(String::new()),
                        Some(s) => max = max.max(s.len()),
                    }
                }
                ColumnShape {
                    data_type: DataType::Char,
                    rows,
                    repeat: max,
                    supported: true,
                }
            }
            ColumnData::Short(v) => scalar_shape(DataType::Int, v.len()),
            ColumnData::Real(v) => scalar_shape(DataType::Real, v.len()),
            ColumnData::Double(v) => scalar_shape(DataType::Double, v.len()),
            ColumnData::Logical(v) => scalar_shape(DataType::Logical, v.len()),
            ColumnData::ShortArray(v) => array_shape(DataType::Int, v),
            ColumnData::RealArray(v) => array_shape(DataType::Real, v),
            ColumnData::DoubleArray(v) => array_shape(DataType::Double, v),
            ColumnData::LogicalArray(v) => array_shape(DataType::Logical, v),
            ColumnData::RealCube(v) => {
                let rows = v.len();
                let repeat = v.first().map(Vec::len).unwrap_or(0);
                let trailing = v
                    .first()
                    .and_then(|row| row.first())
                    .map(Vec::len)
                    .unwrap_or(0);
                // An empty cube has no shape to reject.
                if rows == 0 || trailing == 2 {
                    ColumnShape {
                        data_type: DataType::Complex,
                        rows,
                        repeat,
                        supported: true,
                    }
                } else {
                    ColumnShape {
                        data_type: DataType::Real,
                        rows,
                        repeat,
                        supported: false,
                    }
                }
            }
        }
    }

    /// Short textual description of the array shape, for diagnostics
    /// and trace logging (e.g. `f32[3][5][2]`).
    pub fn shape_description(&self) -> String {
        match self {
            ColumnData::String(v) => format!("str[{}]", v.len()),
            ColumnData::Short(v) => format!("i16[{}]", v.len()),
            ColumnData::ShortArray(v) => describe_2d("i16", v),
            ColumnData::Real(v) => format!("f32[{}]", v.len()),
            ColumnData::RealArray(v) => describe_2d("f32", v),
            ColumnData::Double(v) => format!("f64[{}]", v.len()),
            ColumnData::DoubleArray(v) => describe_2d("f64", v),
            ColumnData::Logical(v) => format!("bool[{}]", v.len()),
            ColumnData::LogicalArray(v) => describe_2d("bool", v),
            ColumnData::RealCube(v) => {
                let second = v.first().map(Vec::len).unwrap_or(0);
                let third = v
                    .first()
                    .and_then(|row| row.first())
                    .map(Vec::len)
                    .unwrap_or(0);
                format!("f32[{}][{}][{}]", v.len(), second, third)
            }
        }
    }
}

fn scalar_shape(data_type: DataType, rows: usize) -> ColumnShape {
    ColumnShape {
        data_type,
        rows,
        repeat: 1,
        supported: true,
    }
}

fn array_shape<T>(data_type: DataType, v: &[Vec<T>]) -> ColumnShape {
    ColumnShape {
        data_type,
        rows: v.len(),
        repeat: v.first().map(Vec::len).unwrap_or(0),
        supported: true,
    }
}

fn describe_2d<T>(elem: &str, v: &[Vec<T>]) -> String {
    let second = v.first().map(Vec::len).unwrap_or(0);
    format!("{}[{}][{}]", elem, v.len(), second)
}
