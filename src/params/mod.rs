//! Raw request parameters, as handed to the clause parser.
//!
//! A parameter value is either a single string or, when the key was
//! repeated in the query string, the ordered list of its strings.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// One parameter's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Single(String),
    Multiple(Vec<String>),
}

impl RawValue {
    /// The value strings in order; one for `Single`.
    pub fn values(&self) -> &[String] {
        match self {
            RawValue::Single(value) => std::slice::from_ref(value),
            RawValue::Multiple(values) => values,
        }
    }

    fn append(&mut self, value: String) {
        match self {
            RawValue::Single(first) => {
                let first = std::mem::take(first);
                *self = RawValue::Multiple(vec![first, value]);
            }
            RawValue::Multiple(values) => values.push(value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Single(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Single(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(values: Vec<String>) -> Self {
        RawValue::Multiple(values)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(values: Vec<&str>) -> Self {
        RawValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Reads a document scalar back as query text (YAML `page: 20` is `"20"`).
///
/// Floats keep their fractional part (`1.0` stays `"1.0"`), integers of any
/// width are accepted, and `null` reads as an empty value.
struct ScalarText;

impl<'de> Visitor<'de> for ScalarText {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_bool<E>(self, v: bool) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_i64<E>(self, v: i64) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_u64<E>(self, v: u64) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_i128<E>(self, v: i128) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_u128<E>(self, v: u128) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_f64<E>(self, v: f64) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(format!("{:?}", v))
    }

    fn visit_str<E>(self, v: &str) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(v.to_string())
    }

    fn visit_string<E>(self, v: String) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(v)
    }

    fn visit_unit<E>(self) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(String::new())
    }

    fn visit_none<E>(self) -> Result<String, E>
    where
        E: de::Error,
    {
        Ok(String::new())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

struct RawText(String);

impl<'de> Deserialize<'de> for RawText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarText).map(RawText)
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar or a list of scalars")
    }

    fn visit_bool<E>(self, v: bool) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_bool(v).map(RawValue::Single)
    }

    fn visit_i64<E>(self, v: i64) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_i64(v).map(RawValue::Single)
    }

    fn visit_u64<E>(self, v: u64) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_u64(v).map(RawValue::Single)
    }

    fn visit_i128<E>(self, v: i128) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_i128(v).map(RawValue::Single)
    }

    fn visit_u128<E>(self, v: u128) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_u128(v).map(RawValue::Single)
    }

    fn visit_f64<E>(self, v: f64) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_f64(v).map(RawValue::Single)
    }

    fn visit_str<E>(self, v: &str) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_str(v).map(RawValue::Single)
    }

    fn visit_string<E>(self, v: String) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_string(v).map(RawValue::Single)
    }

    fn visit_unit<E>(self) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_unit().map(RawValue::Single)
    }

    fn visit_none<E>(self) -> Result<RawValue, E>
    where
        E: de::Error,
    {
        ScalarText.visit_none().map(RawValue::Single)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<RawValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<RawValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(RawText(value)) = seq.next_element()? {
            values.push(value);
        }
        Ok(RawValue::Multiple(values))
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

/// Ordered mapping from parameter name to raw value.
///
/// Keys are unique; iteration follows first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    entries: Vec<(String, RawValue)>,
}

impl RawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string, a `?query`, an absolute URL or a `/path?query`.
    ///
    /// Bare query strings are read whole, so a `?` inside a value is kept.
    /// For URLs only the query component is used, without any `#fragment`.
    /// Uses form-urlencoded rules (`+` is a space). Repeated keys collect into
    /// `RawValue::Multiple` in the order they appear.
    pub fn from_query(input: &str) -> Self {
        let url = url::Url::parse(input).ok().filter(|url| url.has_host());
        let query = match &url {
            Some(url) => url.query().unwrap_or_default(),
            None if input.starts_with('/') => {
                let query = input.split_once('?').map_or("", |(_, q)| q);
                query.split_once('#').map_or(query, |(q, _)| q)
            }
            None => input.strip_prefix('?').unwrap_or(input),
        };

        let mut params = RawParameters::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()).into_owned() {
            params.push(key, value);
        }
        params
    }

    /// Append one value under `key`, turning an existing single value into a list.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.append(value),
            None => self.entries.push((key, RawValue::Single(value))),
        }
    }

    /// Set `key` to `value`, keeping the key's original position if present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of value strings across all keys.
    pub fn value_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.values().len()).sum()
    }
}

impl<K, V> FromIterator<(K, V)> for RawParameters
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<'de> Deserialize<'de> for RawParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = RawParameters;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of parameter names to strings or lists of strings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut params = RawParameters::new();
                while let Some((key, value)) = map.next_entry::<String, RawValue>()? {
                    params.insert(key, value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}
