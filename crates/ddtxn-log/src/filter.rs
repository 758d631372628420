use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::MissingKeyPolicy;
use crate::error::FilterError;
use crate::ir::Record;

/// A conjunction of required field values.
///
/// A record matches when every constrained field it has equals the required
/// value. Constrained fields the record lacks are governed by
/// [`MissingKeyPolicy`]; the default lets them pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    constraints: BTreeMap<String, String>,
    #[serde(default)]
    missing: MissingKeyPolicy,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the constraint `field == value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.insert(field.into(), value.into());
        self
    }

    pub fn missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing = policy;
        self
    }

    pub fn constraints(&self) -> &BTreeMap<String, String> {
        &self.constraints
    }

    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.missing
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.constraints
            .iter()
            .all(|(field, want)| match record.get(field) {
                Some(have) => have == want,
                None => self.missing == MissingKeyPolicy::Pass,
            })
    }
}

impl<K, V> FromIterator<(K, V)> for Predicate
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |p, (k, v)| p.with(k, v))
    }
}

/// Keeps the records matching `predicate`, preserving their order.
pub fn filter<'a, I>(records: I, predicate: &Predicate) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| predicate.matches(r))
        .collect()
}

/// Like [`filter()`], but an empty input is an error rather than an empty
/// selection.
pub fn all_matching<'a>(
    records: &'a [Record],
    predicate: &Predicate,
) -> Result<Vec<&'a Record>, FilterError> {
    if records.is_empty() {
        return Err(FilterError::EmptyCorpus);
    }
    let matched = filter(records, predicate);
    log::debug!(
        "{} of {} records match {:?}",
        matched.len(),
        records.len(),
        predicate.constraints()
    );
    Ok(matched)
}
