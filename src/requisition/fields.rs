//! Ordered multipart field map.
//!
//! Form fields may arrive once or several times under the same name. The
//! map keeps every value, in arrival order, and remembers the order in
//! which each name was first seen. Names are indexed so both inserting and
//! looking up a field stay constant time however many parts a body carries.

use std::collections::HashMap;

/// One raw value of a multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File {
        filename: String,
        content_type: Option<String>,
        content: Vec<u8>,
    },
}

impl FieldValue {
    /// Text content of the value. Files have no text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::File { .. } => None,
        }
    }
}

/// Field name → ordered values, in first-insertion order of the names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, Vec<FieldValue>)>,
    /// Name → position in `entries`.
    index: HashMap<String, usize>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1.push(value),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, vec![value]));
            }
        }
    }

    /// Append a text value under `name`.
    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.push(name, FieldValue::Text(value.into()));
    }

    /// All values received for `name`.
    pub fn values(&self, name: &str) -> &[FieldValue] {
        self.index
            .get(name)
            .map(|&pos| self.entries[pos].1.as_slice())
            .unwrap_or(&[])
    }

    /// Scalar view of a field: the first value when several were sent.
    pub fn first(&self, name: &str) -> Option<&FieldValue> {
        self.values(name).first()
    }

    /// Scalar text view of a field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.first(name).and_then(FieldValue::as_text)
    }

    /// Fields with their values, in the order names were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldValue])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Field names in the order they were first seen.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (k, v) in iter {
            fields.push_text(k, v);
        }
        fields
    }
}
