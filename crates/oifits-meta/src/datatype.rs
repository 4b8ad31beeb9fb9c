//! Primitive field kinds of the OIFITS standard.

/// The data type of a keyword or column, following the FITS format
/// codes used in OIFITS:
///
/// - `A` -- character/string
/// - `I` -- integer (16- and 32-bit integers both decode to this type)
/// - `E` -- real (32-bit IEEE float)
/// - `D` -- double (64-bit IEEE float)
/// - `L` -- logical (true/false)
/// - `C` -- complex (pair of 32-bit IEEE floats)
///
/// The complex type is not inferable from a scalar: a column reads as
/// complex when its decoded array is 3-D with a trailing dimension of
/// exactly 2 and `f32` elements (see
/// [`ColumnData::classify`](crate::column::ColumnData::classify)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Character/string data.
    Char,
    /// Integer data (canonically 16-bit in table columns).
    Int,
    /// 32-bit real data.
    Real,
    /// 64-bit double data.
    Double,
    /// Logical (boolean) data.
    Logical,
    /// Complex data (two 32-bit floats per value).
    Complex,
}

impl DataType {
    /// The single-character FITS format code.
    pub fn code(self) -> char {
        match self {
            DataType::Char => 'A',
            DataType::Int => 'I',
            DataType::Real => 'E',
            DataType::Double => 'D',
            DataType::Logical => 'L',
            DataType::Complex => 'C',
        }
    }

    /// Name of the canonical native type values of this kind decode
    /// into. Integer columns decode to `i16` by convention even though
    /// 32-bit integers collapse into the same [`DataType::Int`].
    pub fn native_type_name(self) -> &'static str {
        match self {
            DataType::Char => "str",
            DataType::Int => "i16",
            DataType::Real => "f32",
            DataType::Double => "f64",
            DataType::Logical => "bool",
            DataType::Complex => "[f32; 2]",
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.code())
    }
}
