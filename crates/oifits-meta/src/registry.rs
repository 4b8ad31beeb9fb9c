//! Process-wide schema registry.
//!
//! Schemas are built once at startup, registered here, then shared
//! read-only by every model of the matching HDU kind. The registry is
//! populated explicitly and never mutated afterwards, so it is safe
//! to hold in a `LazyLock` static:
//!
//! ```
//! use std::sync::LazyLock;
//! use oifits_meta::{DataType, FieldDescriptor, HduSchema, SchemaRegistry};
//!
//! static SCHEMAS: LazyLock<SchemaRegistry> = LazyLock::new(|| {
//!     let mut registry = SchemaRegistry::new();
//!     let mut wave = HduSchema::new("OI_WAVELENGTH");
//!     wave.add(FieldDescriptor::keyword("EXTNAME", "extension name", DataType::Char));
//!     registry.register(wave);
//!     registry
//! });
//!
//! let model = SCHEMAS.model("OI_WAVELENGTH").unwrap();
//! assert_eq!(model.schema().name(), "OI_WAVELENGTH");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{HduModel, HduSchema};

/// Map from HDU kind name to its shared schema.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<HduSchema>>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> SchemaRegistry {
        SchemaRegistry {
            schemas: HashMap::new(),
        }
    }

    /// Register a schema under its own name, wrapping it for sharing.
    /// Registering the same name twice replaces the earlier schema.
    pub fn register(&mut self, schema: HduSchema) -> Arc<HduSchema> {
        let shared = Arc::new(schema);
        self.schemas
            .insert(shared.name().to_owned(), Arc::clone(&shared));
        shared
    }

    /// Look up a registered schema by HDU kind name.
    pub fn get(&self, name: &str) -> Option<&Arc<HduSchema>> {
        self.schemas.get(name)
    }

    /// Instantiate a fresh model sharing the schema registered under
    /// `name`, or `None` if that kind is unknown.
    pub fn model(&self, name: &str) -> Option<HduModel> {
        self.schemas.get(name).map(|s| HduModel::new(Arc::clone(s)))
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
