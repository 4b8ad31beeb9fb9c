//! Typed FITS/OIFITS header and table metadata with schema-driven
//! validation.
//!
//! The crate models an HDU schema as an ordered set of
//! [`FieldDescriptor`]s (keywords and columns), binds decoded file
//! content to it through [`HduModel`] and [`ColumnData`], and checks
//! the content exhaustively into a [`Checker`] diagnostics sink.
//! Physical units convert through [`Unit`], including the
//! frequency-to-wavelength bridge.

pub mod checker;
pub mod column;
pub mod datatype;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod range;
pub mod registry;
pub mod unit;
pub mod value;

pub use checker::{check_column, check_keyword, check_table, CheckMessage, Checker, Severity};
pub use column::{ColumnData, ColumnShape};
pub use datatype::DataType;
pub use descriptor::{AcceptedValues, ChannelCount, FieldDescriptor, FieldKind};
pub use error::{Error, Result};
pub use model::{HduModel, HduSchema, HeaderCard};
pub use range::DataRange;
pub use registry::SchemaRegistry;
pub use unit::{Unit, C_LIGHT};
pub use value::KeywordValue;
