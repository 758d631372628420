use serde::{Deserialize, Serialize};

use crate::error::{CoercionError, StatError};
use crate::filter::{Predicate, filter};
use crate::ir::Record;

/// Pulls one number out of a record.
pub trait Extractor {
    fn extract(&self, record: &Record) -> Result<f64, CoercionError>;

    /// Name reported when an extracted value is rejected.
    fn name(&self) -> &str {
        "extracted value"
    }
}

impl<F> Extractor for F
where
    F: Fn(&Record) -> Result<f64, CoercionError>,
{
    fn extract(&self, record: &Record) -> Result<f64, CoercionError> {
        self(record)
    }
}

/// Reads a field as a float, optionally dividing by a constant (e.g. to get
/// per-worker throughput).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExtractor {
    field: String,
    divisor: f64,
}

impl FieldExtractor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            divisor: 1.0,
        }
    }

    pub fn divided_by(mut self, divisor: f64) -> Self {
        self.divisor = divisor;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Extractor for FieldExtractor {
    fn name(&self) -> &str {
        self.field()
    }

    fn extract(&self, record: &Record) -> Result<f64, CoercionError> {
        let value = record.float(&self.field)? / self.divisor;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CoercionError::NotNumeric {
                field: self.field.clone(),
                value: format!(
                    "{} / {}",
                    record.get(&self.field).unwrap_or_default(),
                    self.divisor
                ),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean, min and max of `extractor` over `records`.
///
/// # Errors
///
/// [`StatError::EmptyInput`] for no records, [`StatError::Coercion`] as soon
/// as one record does not yield a number.
pub fn aggregate<'a, I, E>(records: I, extractor: &E) -> Result<Summary, StatError>
where
    I: IntoIterator<Item = &'a Record>,
    E: Extractor + ?Sized,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for record in records {
        let v = extractor.extract(record)?;
        if !v.is_finite() {
            return Err(CoercionError::NotNumeric {
                field: extractor.name().to_string(),
                value: v.to_string(),
            }
            .into());
        }
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    if count == 0 {
        return Err(StatError::EmptyInput);
    }
    // Rounding in the sum can push the mean a ulp past the extremes.
    let mean = (sum / count as f64).clamp(min, max);
    Ok(Summary {
        count,
        mean,
        min,
        max,
    })
}

pub fn aggregate_field<'a, I>(records: I, field: &str) -> Result<Summary, StatError>
where
    I: IntoIterator<Item = &'a Record>,
{
    aggregate(records, &FieldExtractor::new(field))
}

/// Aggregates once per value of `over`, each time adding `over == value` to
/// `predicate`.
pub fn sweep<E, S>(
    records: &[Record],
    predicate: &Predicate,
    over: &str,
    values: &[S],
    extractor: &E,
) -> Vec<(String, Result<Summary, StatError>)>
where
    E: Extractor + ?Sized,
    S: AsRef<str>,
{
    values
        .iter()
        .map(|value| {
            let value = value.as_ref();
            let narrowed = predicate.clone().with(over, value);
            let matched = filter(records, &narrowed);
            (value.to_string(), aggregate(matched, extractor))
        })
        .collect()
}
