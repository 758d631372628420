use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoercionError;

/// One benchmark run: invocation flags and reported statistics in a single
/// string-keyed namespace.
///
/// Values stay strings. Numeric views are taken at the point of use with
/// [`Record::int`] and [`Record::float`], which fail instead of defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, String>,
    /// Values that lost a name collision between an invocation flag and a
    /// result line, keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    shadowed: BTreeMap<String, String>,
}

impl Record {
    pub(crate) fn from_parts(
        fields: BTreeMap<String, String>,
        shadowed: BTreeMap<String, String>,
    ) -> Self {
        Self { fields, shadowed }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Name of the benchmark executable, e.g. `buy` or `single`.
    pub fn binary(&self) -> Option<&str> {
        self.get("binary")
    }

    pub fn shadowed(&self) -> &BTreeMap<String, String> {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reads `field` as an integer axis value.
    pub fn int(&self, field: &str) -> Result<i64, CoercionError> {
        let raw = self.require(field)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| CoercionError::NotNumeric {
                field: field.to_string(),
                value: raw.to_string(),
            })
    }

    /// Reads `field` as a finite floating point number.
    pub fn float(&self, field: &str) -> Result<f64, CoercionError> {
        let raw = self.require(field)?;
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(CoercionError::NotNumeric {
                field: field.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    fn require(&self, field: &str) -> Result<&str, CoercionError> {
        self.get(field).ok_or_else(|| CoercionError::Missing {
            field: field.to_string(),
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            shadowed: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

/// Something best-effort parsing or reduction skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-based line in the input stream, when the diagnostic is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            line,
        }
    }

    pub fn info(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            severity: Severity::Information,
            message: message.into(),
            line,
        }
    }
}

/// Records in the order their runs appear in the input, plus whatever was
/// skipped on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub records: Vec<Record>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Corpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            diagnostics: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Appends another corpus after this one. Records from `other` count as
    /// later runs for latest-wins reduction.
    pub fn extend(&mut self, other: Corpus) {
        self.records.extend(other.records);
        self.diagnostics.extend(other.diagnostics);
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Corpus {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
