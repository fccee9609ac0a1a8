//! Ordered name-value fields of a message head.
use std::{fmt::Display, io::Write};

/// Insertion-ordered multimap of header fields.
///
/// Names are compared without ASCII case-sensitivity as HTTP requires.
/// Duplicate names are permitted and insertion order is preserved, so a
/// parsed head serializes back to its original field order.
///
/// No validation is performed on whether the names or values are valid
/// HTTP values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.fields.clear()
    }

    /// Appends a field, keeping any existing fields with the same name.
    pub fn append<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.fields.push((name.into(), value.into()))
    }

    /// Inserts a field, removing any existing fields with the same name.
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let name = name.into();
        self.remove(&name);
        self.fields.push((name, value.into()));
    }

    pub fn remove(&mut self, name: &str) {
        self.fields
            .retain(|(n, _v)| !n.eq_ignore_ascii_case(name));
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|(n, _v)| n.eq_ignore_ascii_case(name))
    }

    /// Returns the value of the first field with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _v)| n.eq_ignore_ascii_case(name))
            .map(|(_n, v)| v.as_str())
    }

    /// Returns the values of every field with the given name, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter().filter_map(move |(n, v)| {
            if n.eq_ignore_ascii_case(name) {
                Some(v.as_str())
            } else {
                None
            }
        })
    }

    /// Parses the value of the first field with the given name as an
    /// unsigned integer.
    ///
    /// Unlike the std library parsing functions, only ASCII digits are
    /// permitted.
    pub fn get_u64_strict(&self, name: &str) -> Option<Result<u64, std::num::ParseIntError>> {
        self.get(name)
            .map(|value| crate::parse::parse_u64_strict(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Writes the fields as CRLF-terminated lines followed by the empty
    /// line that ends a head.
    pub fn serialize<W: Write>(&self, mut buf: W) -> std::io::Result<()> {
        for (name, value) in &self.fields {
            buf.write_all(name.as_bytes())?;
            buf.write_all(b": ")?;
            buf.write_all(value.as_bytes())?;
            buf.write_all(b"\r\n")?;
        }

        buf.write_all(b"\r\n")?;

        Ok(())
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Extend<(String, String)> for FieldMap {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.fields.extend(iter)
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            fields: Vec::from_iter(iter),
        }
    }
}

impl Display for FieldMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in &self.fields {
            write!(f, "{}: {}\r\n", name, value)?;
        }

        Ok(())
    }
}
