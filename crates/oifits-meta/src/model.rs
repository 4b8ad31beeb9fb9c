//! HDU schema and per-file model: an ordered set of field
//! descriptors plus the sparse keyword-value overlay decoded from one
//! file.

use std::collections::HashMap;
use std::sync::Arc;

use crate::checker::{check_keyword, Checker};
use crate::datatype::DataType;
use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::value::KeywordValue;

/// A free-form header entry not covered by any registered descriptor,
/// kept for forward compatibility with format extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCard {
    /// Card keyword.
    pub key: String,
    /// Optional card value, as decoded text.
    pub value: Option<String>,
    /// Optional card comment.
    pub comment: Option<String>,
}

impl core::fmt::Display for HeaderCard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.key)?;
        if let Some(value) = &self.value {
            write!(f, " = '{}'", value)?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " / {}", comment)?;
        }
        Ok(())
    }
}

/// The schema of one HDU kind: its field descriptors in registration
/// order.
///
/// A schema is built once at startup, then shared read-only (via
/// [`Arc`]) across every [`HduModel`] of that kind in every opened
/// file. Registration order governs validation output order.
#[derive(Debug, Clone)]
pub struct HduSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl HduSchema {
    /// Create an empty schema for the named HDU kind (e.g. `OI_VIS`).
    pub fn new(name: impl Into<String>) -> HduSchema {
        HduSchema {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The HDU kind name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a descriptor, preserving insertion order. Registering
    /// a name twice replaces the earlier descriptor in place (name is
    /// the sole descriptor identity).
    pub fn add(&mut self, desc: FieldDescriptor) -> &mut HduSchema {
        match self.fields.iter_mut().find(|f| f.name() == desc.name()) {
            Some(existing) => *existing = desc,
            None => self.fields.push(desc),
        }
        self
    }

    /// Look up a descriptor by field name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// All descriptors in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Keyword descriptors only, in registration order.
    pub fn keywords(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| matches!(f.kind(), FieldKind::Keyword))
    }

    /// Column descriptors only, in registration order.
    pub fn columns(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| !matches!(f.kind(), FieldKind::Keyword))
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if no descriptor has been registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One HDU instance of a known kind within one opened file: the
/// shared schema plus this file's decoded keyword values and extra
/// header cards.
///
/// The keyword map is a sparse overlay on the schema: an absent key
/// means "not present in the file", not zero. Keys without a
/// registered descriptor are tolerated; truly free-form entries go to
/// the header-card list instead.
#[derive(Debug, Clone)]
pub struct HduModel {
    schema: Arc<HduSchema>,
    ext_nb: Option<i32>,
    keywords: HashMap<String, KeywordValue>,
    header_cards: Vec<HeaderCard>,
}

impl HduModel {
    /// Create a model bound to a shared schema, with no values set.
    pub fn new(schema: Arc<HduSchema>) -> HduModel {
        HduModel {
            schema,
            ext_nb: None,
            keywords: HashMap::new(),
            header_cards: Vec::new(),
        }
    }

    /// The shared schema this model conforms to.
    pub fn schema(&self) -> &HduSchema {
        &self.schema
    }

    /// FITS extension number, if known.
    pub fn ext_nb(&self) -> Option<i32> {
        self.ext_nb
    }

    /// Define the FITS extension number.
    pub fn set_ext_nb(&mut self, ext_nb: i32) {
        self.ext_nb = Some(ext_nb);
    }

    /// HDU identifier `EXTNAME#N`, falling back to `HDU#N` when the
    /// EXTNAME keyword is unset.
    pub fn hdu_id(&self) -> String {
        let name = self.get_string("EXTNAME", "HDU");
        format!("{}#{}", name, self.ext_nb.unwrap_or(-1))
    }

    /* --- keyword values --- */

    /// Store a decoded keyword value.
    pub fn set_keyword(&mut self, name: impl Into<String>, value: impl Into<KeywordValue>) {
        let name = name.into();
        let value = value.into();
        log::debug!("KEYWORD [{}] = '{}'", name, value);
        self.keywords.insert(name, value);
    }

    /// Raw lookup; `None` means the keyword is not present in the file.
    pub fn keyword(&self, name: &str) -> Option<&KeywordValue> {
        self.keywords.get(name)
    }

    /// String value of a keyword, or `def` when absent or non-string.
    pub fn get_string<'a>(&'a self, name: &str, def: &'a str) -> &'a str {
        self.keywords
            .get(name)
            .and_then(KeywordValue::as_str)
            .unwrap_or(def)
    }

    /// Integer value of a keyword, narrowing a stored double, or
    /// `def` when absent.
    pub fn get_int(&self, name: &str, def: i64) -> i64 {
        self.keywords
            .get(name)
            .and_then(KeywordValue::as_int)
            .unwrap_or(def)
    }

    /// Double value of a keyword, widening a stored integer, or `def`
    /// when absent.
    pub fn get_double(&self, name: &str, def: f64) -> f64 {
        self.keywords
            .get(name)
            .and_then(KeywordValue::as_double)
            .unwrap_or(def)
    }

    /// Logical value of a keyword, or `def` when absent.
    pub fn get_logical(&self, name: &str, def: bool) -> bool {
        self.keywords
            .get(name)
            .and_then(KeywordValue::as_logical)
            .unwrap_or(def)
    }

    /// Best-effort textual update: converts `text` into the native
    /// type declared by the registered descriptor and stores it.
    ///
    /// Unknown names, unsupported declared types (real, complex) and
    /// unparsable text are logged and skipped rather than raised;
    /// this permissive policy supports interactive editing.
    pub fn update_keyword(&mut self, name: &str, text: &str) {
        let Some(desc) = self.schema.get(name) else {
            log::warn!("Ignore update of unknown keyword {}", name);
            return;
        };
        match desc.data_type() {
            DataType::Char => self.set_keyword(name, text),
            DataType::Double => match text.parse::<f64>() {
                Ok(d) => self.set_keyword(name, d),
                Err(_) => log::warn!("Ignore {} keyword update, bad double '{}'", name, text),
            },
            DataType::Int => match text.parse::<i64>() {
                Ok(n) => self.set_keyword(name, n),
                Err(_) => log::warn!("Ignore {} keyword update, bad integer '{}'", name, text),
            },
            DataType::Logical => match parse_logical(text) {
                Some(b) => self.set_keyword(name, b),
                None => log::warn!("Ignore {} keyword update, bad logical '{}'", name, text),
            },
            other => log::warn!("Ignore {} keyword update of type {}", name, other),
        }
    }

    /* --- extra header cards --- */

    /// `true` if any extra header card is attached.
    pub fn has_header_cards(&self) -> bool {
        !self.header_cards.is_empty()
    }

    /// Append a free-form header card. Cards are never deduplicated.
    pub fn add_header_card(
        &mut self,
        key: impl Into<String>,
        value: Option<String>,
        comment: Option<String>,
    ) {
        self.header_cards.push(HeaderCard {
            key: key.into(),
            value,
            comment,
        });
    }

    /// The extra header cards, in append order.
    pub fn header_cards(&self) -> &[HeaderCard] {
        &self.header_cards
    }

    /// Reclaim unused card-list capacity. Explicit maintenance
    /// operation, never run automatically.
    pub fn trim_header_cards(&mut self) {
        self.header_cards.shrink_to_fit();
    }

    /// String dump of the extra header cards, `separator` after each.
    pub fn header_cards_string(&self, separator: &str) -> String {
        let mut out = String::new();
        for card in &self.header_cards {
            out.push_str(&card.to_string());
            out.push_str(separator);
        }
        out
    }

    /* --- checker --- */

    /// Check every registered keyword descriptor in insertion order:
    /// a missing mandatory keyword is a severe defect; a present
    /// value is checked for type and accepted-value membership.
    ///
    /// Columns are checked separately by
    /// [`check_table`](crate::checker::check_table), which carries
    /// the decoded column arrays this model does not hold.
    pub fn check_keywords(&self, checker: &mut Checker) {
        log::debug!("checkKeywords: {}", self.hdu_id());
        for desc in self.schema.keywords() {
            match self.keywords.get(desc.name()) {
                None => {
                    if !desc.is_optional() {
                        checker.severe(desc.name(), format!("Missing keyword '{}'", desc.name()));
                    }
                }
                Some(value) => check_keyword(desc, value, checker),
            }
        }
    }
}

fn parse_logical(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("T") || text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("F") || text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
