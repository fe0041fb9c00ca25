//! `TreeView` - ownership-aware wrapper around a parsed JSON tree.
//!
//! A view is either empty (default-constructed or moved-from) or owns
//! exactly one tree. Cloning deep-copies the tree, so a clone never
//! aliases its source. All typed field access goes through [`TreeView::tree`],
//! which fails with [`Error::InvalidState`] on an empty view.

use std::fmt;
use std::io::Read;

use serde::de::value::SeqAccessDeserializer;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};

use crate::error::{Error, Result, ValidationError};

/// Generic JSON tree backing every view.
pub type Tree = Value;

/// Ownership state of a [`TreeView`].
#[derive(Debug, Clone, Default, PartialEq)]
enum TreeState {
    /// No tree: default-constructed or moved-from.
    #[default]
    Empty,
    /// Exclusively owned tree.
    Owned(Tree),
}

/// Wrapper around zero or one JSON tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeView {
    state: TreeState,
}

impl TreeView {
    /// Parses JSON text and applies the top-level rule.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] if the text is not well-formed JSON.
    /// - [`ValidationError::EmptyKey`] if a first-level entry has an empty name.
    /// - [`ValidationError::DuplicateKey`] if a first-level name repeats.
    pub fn parse(text: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(text)?;
        document.validate()
    }

    /// Parses JSON from a reader, with the same rules as [`TreeView::parse`].
    ///
    /// # Errors
    ///
    /// Same as [`TreeView::parse`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: Document = serde_json::from_reader(reader)?;
        document.validate()
    }

    /// Wraps an already-parsed tree without validating it.
    #[must_use]
    pub const fn from_tree(tree: Tree) -> Self {
        Self {
            state: TreeState::Owned(tree),
        }
    }

    /// Returns `true` if this view owns a tree.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self.state, TreeState::Owned(_))
    }

    /// Returns the owned tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] on an empty view.
    pub const fn tree(&self) -> Result<&Tree> {
        match &self.state {
            TreeState::Owned(tree) => Ok(tree),
            TreeState::Empty => Err(Error::InvalidState),
        }
    }

    /// Mutable access to the owned tree.
    pub(crate) const fn tree_mut(&mut self) -> Result<&mut Tree> {
        match &mut self.state {
            TreeState::Owned(tree) => Ok(tree),
            TreeState::Empty => Err(Error::InvalidState),
        }
    }

    /// Consumes the view and returns its tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] on an empty view.
    pub fn into_tree(self) -> Result<Tree> {
        match self.state {
            TreeState::Owned(tree) => Ok(tree),
            TreeState::Empty => Err(Error::InvalidState),
        }
    }

    /// Moves the tree into a new view and leaves `self` empty.
    #[must_use]
    pub fn transfer_ownership(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Renders the tree as indented `'key':[value]` lines for debugging.
    ///
    /// The output is diagnostic only and cannot be parsed back.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.state {
            TreeState::Owned(tree) => render_node(tree, 0, &mut out),
            TreeState::Empty => out.push_str("<invalid>"),
        }
        out
    }

    // --- Field accessors ---

    /// Looks up a first-level field, treating `null` as absent.
    fn field(&self, name: &str) -> Result<Option<&Value>> {
        Ok(self.tree()?.get(name).filter(|value| !value.is_null()))
    }

    /// Reads a required integer field.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] on an empty view.
    /// - [`Error::FieldMissing`] if the field is absent.
    /// - [`Error::FieldTypeMismatch`] if the field is not an integer.
    pub fn required_i64(&self, name: &str) -> Result<i64> {
        self.field(name)?
            .map_or_else(|| Err(Error::FieldMissing(String::from(name))), |v| as_i64(name, v))
    }

    /// Reads an optional integer field.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] on an empty view, [`Error::FieldTypeMismatch`]
    /// if the field is present but not an integer.
    pub fn optional_i64(&self, name: &str, default: i64) -> Result<i64> {
        self.field(name)?.map_or(Ok(default), |v| as_i64(name, v))
    }

    /// Reads an optional floating point field.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] on an empty view, [`Error::FieldTypeMismatch`]
    /// if the field is present but not a number.
    pub fn optional_f64(&self, name: &str, default: f64) -> Result<f64> {
        self.field(name)?.map_or(Ok(default), |v| as_f64(name, v))
    }

    /// Reads an optional boolean field.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] on an empty view, [`Error::FieldTypeMismatch`]
    /// if the field is present but not a boolean.
    pub fn optional_bool(&self, name: &str, default: bool) -> Result<bool> {
        self.field(name)?.map_or(Ok(default), |v| as_bool(name, v))
    }

    /// Reads an optional string field.
    ///
    /// Numbers and booleans are rendered as text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] on an empty view, [`Error::FieldTypeMismatch`]
    /// if the field is an object or an array.
    pub fn optional_string(&self, name: &str, default: &str) -> Result<String> {
        self.field(name)?
            .map_or_else(|| Ok(String::from(default)), |v| as_string(name, v))
    }

    /// Reads an array of strings. An absent field yields an empty list.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] on an empty view, [`Error::FieldTypeMismatch`]
    /// if the field or one of its items has the wrong kind.
    pub fn string_list(&self, name: &str) -> Result<Vec<String>> {
        match self.field(name)? {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(|v| as_string(name, v)).collect(),
            Some(_) => Err(Error::mismatch(name, "array")),
        }
    }

    /// Reads an array of sub-trees as independent views.
    /// An absent field yields an empty list.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] on an empty view, [`Error::FieldTypeMismatch`]
    /// if the field is not an array.
    pub fn list(&self, name: &str) -> Result<Vec<Self>> {
        match self.field(name)? {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.iter().cloned().map(Self::from_tree).collect()),
            Some(_) => Err(Error::mismatch(name, "array")),
        }
    }

    /// Moves an array of sub-trees out of this view without copying them.
    /// The field is left as `null`.
    pub(crate) fn take_list(&mut self, name: &str) -> Result<Vec<Self>> {
        let taken = self.tree_mut()?.get_mut(name).map(Value::take);
        match taken {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.into_iter().map(Self::from_tree).collect()),
            Some(other) => {
                if let Some(slot) = self.tree_mut()?.get_mut(name) {
                    *slot = other;
                }
                Err(Error::mismatch(name, "array"))
            }
        }
    }

    /// Reads a nested object as an independent view.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] on an empty view, [`Error::FieldTypeMismatch`]
    /// if the field is not an object.
    pub fn child(&self, name: &str) -> Result<Option<Self>> {
        match self.field(name)? {
            None => Ok(None),
            Some(value @ Value::Object(_)) => Ok(Some(Self::from_tree(value.clone()))),
            Some(_) => Err(Error::mismatch(name, "object")),
        }
    }
}

impl fmt::Display for TreeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// --- Coercions ---

fn as_i64(name: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| Error::mismatch(name, "integer")),
        Value::String(s) => s.trim().parse().map_err(|_| Error::mismatch(name, "integer")),
        _ => Err(Error::mismatch(name, "integer")),
    }
}

fn as_f64(name: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| Error::mismatch(name, "number")),
        Value::String(s) => s.trim().parse().map_err(|_| Error::mismatch(name, "number")),
        _ => Err(Error::mismatch(name, "number")),
    }
}

fn as_bool(name: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => s.trim().parse().map_err(|_| Error::mismatch(name, "boolean")),
        _ => Err(Error::mismatch(name, "boolean")),
    }
}

fn as_string(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(Error::mismatch(name, "string")),
    }
}

// --- Rendering ---

fn render_node(value: &Value, depth: usize, out: &mut String) {
    let indent = " ".repeat(depth);
    let child_depth = depth.saturating_add(1);
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                render_entry(&indent, key, child, child_depth, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for child in items {
                render_entry(&indent, "", child, child_depth, out);
            }
        }
        Value::String(s) => push_scalar(&indent, s, out),
        Value::Null | Value::Object(_) | Value::Array(_) => push_scalar(&indent, "", out),
        Value::Bool(_) | Value::Number(_) => push_scalar(&indent, &value.to_string(), out),
    }
}

fn render_entry(indent: &str, key: &str, child: &Value, depth: usize, out: &mut String) {
    out.push_str(indent);
    out.push('\'');
    out.push_str(key);
    out.push_str("':[");
    render_node(child, depth, out);
    out.push_str("]\n");
}

fn push_scalar(indent: &str, text: &str, out: &mut String) {
    out.push_str(indent);
    out.push('<');
    out.push_str(text);
    out.push('>');
}

// --- Top-level parsing ---

/// A freshly parsed document. Object documents keep every first-level
/// entry, duplicates included, so the top-level rule can be checked.
enum Document {
    Object(Vec<(String, Value)>),
    Other(Value),
}

impl Document {
    fn validate(self) -> Result<TreeView> {
        match self {
            Self::Other(value) => Ok(TreeView::from_tree(value)),
            Self::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (name, value) in entries {
                    if name.is_empty() {
                        return Err(ValidationError::EmptyKey.into());
                    }
                    if map.contains_key(&name) {
                        return Err(ValidationError::DuplicateKey(name).into());
                    }
                    map.insert(name, value);
                }
                Ok(TreeView::from_tree(Value::Object(map)))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON document")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Document, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(Document::Object(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> std::result::Result<Document, A::Error> {
        Value::deserialize(SeqAccessDeserializer::new(seq)).map(Document::Other)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Document, E> {
        Ok(Document::Other(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Document, E> {
        Ok(Document::Other(Value::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Document, E> {
        Ok(Document::Other(Value::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Document, E> {
        Ok(Document::Other(Value::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Document, E> {
        Ok(Document::Other(Value::from(v)))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Document, E> {
        Ok(Document::Other(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_rejects_duplicate_top_level_key() {
        // Arrange & Act
        let result = TreeView::parse(r#"{"a":1,"a":2}"#);

        // Assert
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::DuplicateKey(ref k))) if k == "a"
        ));
    }

    #[test]
    fn test_parse_rejects_empty_top_level_key() {
        // Arrange & Act
        let result = TreeView::parse(r#"{"":1,"b":2}"#);

        // Assert
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::EmptyKey))
        ));
    }

    #[test]
    fn test_parse_ignores_nested_keys() {
        // Arrange & Act
        let nested = TreeView::parse(r#"{"a":{"b":1},"c":2}"#);
        let nested_dup = TreeView::parse(r#"{"a":{"b":1,"b":2,"":3}}"#);

        // Assert
        assert!(nested.unwrap().is_valid());
        assert!(nested_dup.unwrap().is_valid());
    }

    #[test]
    fn test_parse_accepts_top_level_array() {
        // Arrange & Act
        let view = TreeView::parse(r#"[{"iso_3166_1":"AD","zones":["Europe/Andorra"]}]"#).unwrap();

        // Assert
        assert!(view.tree().unwrap().is_array());
    }

    #[test]
    fn test_parse_malformed_json() {
        // Arrange & Act
        let result = TreeView::parse(r#"{"a":"#);

        // Assert
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_reader() {
        // Arrange
        let input = r#"{"id":42}"#.as_bytes();

        // Act
        let view = TreeView::from_reader(input).unwrap();

        // Assert
        assert_eq!(view.required_i64("id").unwrap(), 42);
    }

    #[test]
    fn test_default_is_empty() {
        // Arrange & Act
        let view = TreeView::default();

        // Assert
        assert!(!view.is_valid());
        assert!(matches!(view.tree(), Err(Error::InvalidState)));
        assert!(matches!(view.required_i64("id"), Err(Error::InvalidState)));
        assert!(matches!(
            view.optional_string("name", ""),
            Err(Error::InvalidState)
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        // Arrange
        let mut source = TreeView::parse(r#"{"id":7,"name":"Dune"}"#).unwrap();

        // Act
        let copy = source.clone();
        if let Ok(Value::Object(map)) = source.tree_mut() {
            map.insert(String::from("name"), Value::from("Changed"));
        }
        drop(source);

        // Assert
        assert!(copy.is_valid());
        assert_eq!(copy.required_i64("id").unwrap(), 7);
        assert_eq!(copy.optional_string("name", "").unwrap(), "Dune");
    }

    #[test]
    fn test_transfer_ownership_empties_source() {
        // Arrange
        let mut source = TreeView::parse(r#"{"id":7}"#).unwrap();

        // Act
        let target = source.transfer_ownership();

        // Assert
        assert!(!source.is_valid());
        assert!(target.is_valid());
        assert_eq!(target.required_i64("id").unwrap(), 7);
    }

    #[test]
    fn test_required_field_missing() {
        // Arrange
        let view = TreeView::parse("{}").unwrap();

        // Act
        let result = view.required_i64("id");

        // Assert
        assert!(matches!(result, Err(Error::FieldMissing(ref f)) if f == "id"));
    }

    #[test]
    fn test_field_type_mismatch() {
        // Arrange
        let view = TreeView::parse(r#"{"id":"abc","name":{"x":1},"tags":3}"#).unwrap();

        // Act & Assert
        assert!(matches!(
            view.required_i64("id"),
            Err(Error::FieldTypeMismatch { ref field, expected: "integer" }) if field == "id"
        ));
        assert!(matches!(
            view.optional_string("name", ""),
            Err(Error::FieldTypeMismatch { expected: "string", .. })
        ));
        assert!(matches!(
            view.string_list("tags"),
            Err(Error::FieldTypeMismatch { expected: "array", .. })
        ));
    }

    #[test]
    fn test_coercions() {
        // Arrange
        let view = TreeView::parse(
            r#"{"id":"12","year":1999,"score":"7.5","adult":false,"poster_path":null}"#,
        )
        .unwrap();

        // Act & Assert
        assert_eq!(view.required_i64("id").unwrap(), 12);
        assert_eq!(view.optional_string("year", "").unwrap(), "1999");
        assert!((view.optional_f64("score", 0.0).unwrap() - 7.5).abs() < f64::EPSILON);
        assert!(!view.optional_bool("adult", true).unwrap());
        assert_eq!(view.optional_string("poster_path", "-").unwrap(), "-");
    }

    #[test]
    fn test_take_list_moves_items() {
        // Arrange
        let mut view = TreeView::parse(r#"{"page":1,"results":[{"id":1},{"id":2}]}"#).unwrap();

        // Act
        let items = view.take_list("results").unwrap();

        // Assert
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].required_i64("id").unwrap(), 2);
        assert!(view.list("results").unwrap().is_empty());
        assert_eq!(view.optional_i64("page", 0).unwrap(), 1);
    }

    #[test]
    fn test_render() {
        // Arrange
        let view = TreeView::parse(r#"{"a":{"b":1},"c":"x"}"#).unwrap();

        // Act
        let text = view.render();

        // Assert
        assert_eq!(text, "'a':[ 'b':[  <1>]\n]\n'c':[ <x>]\n");
        assert_eq!(TreeView::default().to_string(), "<invalid>");
    }
}
