//! Request query parameters: collecting them from a raw query string,
//! normalizing the search parameter, and resolving the requested page.

use super::*;

pub const MALFORMED_URI: &str = "URI malformed";

/// Characters `decodeURI` leaves percent-encoded.
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// A query parameter as produced by URL query decoding: one value, or every
/// value of a repeated key.
#[derive(Debug, PartialEq, Clone)]
pub enum QueryValue {
  One(String),
  Many(Vec<String>),
}

impl QueryValue {
  fn first(&self) -> Option<&str> {
    match self {
      Self::One(value) => Some(value),
      Self::Many(values) => values.first().map(String::as_str),
    }
  }

  fn single(&self) -> Option<&str> {
    match self {
      Self::One(value) => Some(value),
      Self::Many(values) if values.len() == 1 => Some(&values[0]),
      Self::Many(_) => None,
    }
  }
}

impl From<&str> for QueryValue {
  fn from(value: &str) -> Self {
    Self::One(value.into())
  }
}

impl From<Vec<&str>> for QueryValue {
  fn from(values: Vec<&str>) -> Self {
    Self::Many(values.into_iter().map(String::from).collect())
  }
}

/// Decoded query pairs of a request, in the order they appeared.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct QueryParams {
  pairs: Vec<(String, String)>,
}

impl QueryParams {
  pub fn parse(query: Option<&str>) -> Self {
    Self {
      pairs: query
        .map(|query| {
          url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
        })
        .unwrap_or_default(),
    }
  }

  pub fn get(&self, key: &str) -> Option<QueryValue> {
    let mut values = self
      .pairs
      .iter()
      .filter(|(k, _)| k == key)
      .map(|(_, v)| v.clone())
      .collect::<Vec<String>>();

    match values.len() {
      0 => None,
      1 => values.pop().map(QueryValue::One),
      _ => Some(QueryValue::Many(values)),
    }
  }

  /// Serialize these pairs with `key` replaced by `value`.
  pub fn with(&self, key: &str, value: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());

    for (k, v) in self.pairs.iter().filter(|(k, _)| k != key) {
      serializer.append_pair(k, v);
    }

    serializer.append_pair(key, value);

    serializer.finish()
  }
}

/// Normalize a search-style parameter into a single decoded string.
///
/// Absent and empty values yield `None`. Repeated keys use the first value.
pub fn query_string(value: Option<&QueryValue>) -> Result<Option<String>> {
  match value.and_then(QueryValue::first) {
    Some(value) if !value.is_empty() => decode_uri(value).map(Some),
    _ => Ok(None),
  }
}

/// The requested page, or 1 unless `value` is an integer of at least 1.
pub fn page_number(value: Option<&QueryValue>) -> u32 {
  value
    .and_then(QueryValue::single)
    .and_then(|value| value.trim().parse::<u32>().ok())
    .filter(|page| *page >= 1)
    .unwrap_or(1)
}

/// Decode percent escapes the way `decodeURI` does: escaped reserved
/// characters are kept encoded, and malformed escapes are an error.
pub fn decode_uri(input: &str) -> Result<String> {
  let bytes = input.as_bytes();
  let mut decoded = Vec::with_capacity(bytes.len());
  let mut i = 0;

  while i < bytes.len() {
    if bytes[i] != b'%' {
      decoded.push(bytes[i]);
      i += 1;
      continue;
    }

    let byte = bytes
      .get(i + 1..i + 3)
      .and_then(|hex| std::str::from_utf8(hex).ok())
      .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
      .and_then(|hex| u8::from_str_radix(hex, 16).ok())
      .ok_or_else(|| anyhow!("{MALFORMED_URI}: `{input}`"))?;

    if RESERVED.contains(&byte) {
      decoded.extend_from_slice(&bytes[i..i + 3]);
    } else {
      decoded.push(byte);
    }

    i += 3;
  }

  String::from_utf8(decoded).map_err(|_| anyhow!("{MALFORMED_URI}: `{input}`"))
}
