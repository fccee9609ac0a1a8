//! URL query strings.
use std::fmt::Display;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

// Everything except unreserved characters; space is handled by the
// `'+'` substitution.
const QUERY_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered parameters of a URL query string.
///
/// Insertion order is significant and preserved on serialization;
/// duplicate names are permitted and name lookups return the first
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    parameters: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }

    /// Parses a `name=value[&name=value]*` string, percent-decoding and
    /// substituting `'+'` with space in both names and values.
    ///
    /// Empty input yields no parameters.
    pub fn parse(input: &str) -> Self {
        let mut query = Self::new();

        for token in input.split('&') {
            if token.is_empty() {
                continue;
            }

            match token.split_once('=') {
                Some((name, value)) => {
                    query.append_parameter(decode_component(name), decode_component(value))
                }
                None => query.append_parameter(decode_component(token), ""),
            }
        }

        query
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Returns the index of the first parameter with the given name.
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|(n, _v)| n == name)
    }

    /// Returns the value of the first parameter with the given name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameter_index(name)
            .map(|index| self.parameters[index].1.as_str())
    }

    /// Returns the parameter at the given index.
    ///
    /// # Panics
    ///
    /// Panics when the index is out of range.
    pub fn parameter_at(&self, index: usize) -> (&str, &str) {
        let (name, value) = &self.parameters[index];
        (name, value)
    }

    /// Appends a parameter; its index is the previous parameter count.
    pub fn append_parameter<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.parameters.push((name.into(), value.into()));
    }

    /// Removes the parameter at the given index, shifting the indices of
    /// the parameters after it down by one.
    ///
    /// # Panics
    ///
    /// Panics when the index is out of range.
    pub fn remove_parameter(&mut self, index: usize) {
        self.parameters.remove(index);
    }

    /// Removes the first parameter with the given name. Returns whether
    /// a parameter was removed.
    pub fn remove_parameter_named(&mut self, name: &str) -> bool {
        match self.parameter_index(name) {
            Some(index) => {
                self.parameters.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Display for QueryString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (name, value)) in self.parameters.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }

            write!(f, "{}={}", encode_component(name), encode_component(value))?;
        }

        Ok(())
    }
}

fn decode_component(input: &str) -> String {
    let input = input.replace('+', " ");

    percent_decode_str(&input).decode_utf8_lossy().into_owned()
}

fn encode_component(input: &str) -> String {
    input
        .split(' ')
        .map(|part| percent_encode(part.as_bytes(), QUERY_ESCAPE_SET).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let query = QueryString::parse("param1=value1&param2=2");

        assert_eq!(query.len(), 2);
        assert_eq!(query.to_string(), "param1=value1&param2=2");
    }

    #[test]
    fn test_parse_empty() {
        let query = QueryString::parse("");

        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }

    #[test]
    fn test_append() {
        let mut query = QueryString::parse("param1=value1&param2=2");

        query.append_parameter("param3", "3");

        assert_eq!(query.parameter_index("param3"), Some(2));
        assert_eq!(query.to_string(), "param1=value1&param2=2&param3=3");
    }

    #[test]
    fn test_escaping() {
        let query = QueryString::parse("q=two+words&path=a%2Fb&sym=%E2%82%AC");

        assert_eq!(query.parameter("q"), Some("two words"));
        assert_eq!(query.parameter("path"), Some("a/b"));
        assert_eq!(query.parameter("sym"), Some("€"));

        assert_eq!(query.to_string(), "q=two+words&path=a%2Fb&sym=%E2%82%AC");
    }

    #[test]
    fn test_encoded_name() {
        let query = QueryString::parse("a+b=1");

        assert_eq!(query.parameter("a b"), Some("1"));
        assert_eq!(query.to_string(), "a+b=1");
    }

    #[test]
    fn test_duplicates_ordered() {
        let query = QueryString::parse("k=1&k=2&j=3");

        assert_eq!(query.parameter("k"), Some("1"));
        assert_eq!(query.parameter_at(1), ("k", "2"));
        assert_eq!(query.to_string(), "k=1&k=2&j=3");
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut query = QueryString::parse("a=1&b=2&c=3");

        query.remove_parameter(1);

        assert_eq!(query.parameter_index("a"), Some(0));
        assert_eq!(query.parameter_index("b"), None);
        assert_eq!(query.parameter_index("c"), Some(1));

        assert!(query.remove_parameter_named("a"));
        assert_eq!(query.parameter_index("c"), Some(0));
        assert_eq!(query.to_string(), "c=3");
    }
}
