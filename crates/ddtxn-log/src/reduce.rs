use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoercionError;
use crate::filter::{Predicate, filter};
use crate::ir::{Diagnostic, Record};
use crate::stats::Extractor;

/// One record per integer axis value, iterated in ascending axis order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSet<'a> {
    axis: String,
    points: BTreeMap<i64, &'a Record>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dropped: Vec<Diagnostic>,
}

impl<'a> PointSet<'a> {
    pub fn axis(&self) -> &str {
        &self.axis
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, x: i64) -> Option<&'a Record> {
        self.points.get(&x).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &'a Record)> + '_ {
        self.points.iter().map(|(x, r)| (*x, *r))
    }

    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.points.keys().copied()
    }

    /// Records left out because their axis value was missing or not an integer.
    pub fn dropped(&self) -> &[Diagnostic] {
        &self.dropped
    }

    /// `(x, y)` rows for a tabular writer; `y` is `None` when the surviving
    /// record lacks the field.
    pub fn rows<'s>(&'s self, y: &'s str) -> impl Iterator<Item = (i64, Option<&'a str>)> + 's {
        self.iter().map(move |(x, r)| (x, r.get(y)))
    }

    /// Numeric `(x, y)` pairs for plotting.
    pub fn series<E>(&self, extractor: &E) -> Result<Vec<(i64, f64)>, CoercionError>
    where
        E: Extractor + ?Sized,
    {
        self.iter()
            .map(|(x, r)| extractor.extract(r).map(|y| (x, y)))
            .collect()
    }
}

/// Groups records by the integer value of `axis`. A later record with the
/// same axis value replaces an earlier one.
pub fn reduce<'a, I>(records: I, axis: &str) -> PointSet<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut points = BTreeMap::new();
    let mut dropped = Vec::new();

    for record in records {
        match record.int(axis) {
            Ok(x) => {
                if points.insert(x, record).is_some() {
                    log::debug!("{axis}={x}: newer run replaces older one");
                }
            }
            Err(e) => {
                log::warn!("no {axis}: {e}");
                dropped.push(Diagnostic::warning(e.to_string(), None));
            }
        }
    }

    PointSet {
        axis: axis.to_string(),
        points,
        dropped,
    }
}

/// [`filter()`] followed by [`reduce()`].
pub fn reduce_points<'a, I>(records: I, axis: &str, predicate: &Predicate) -> PointSet<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    reduce(filter(records, predicate), axis)
}
