use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnknownVariant;
use crate::ir::Record;

/// Concurrency-control scheme a run used, from its `sys` and `atomic` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemVariant {
    Doppel,
    Occ,
    TwoPhaseLocking,
    /// 2PL with atomic increments.
    Atomic,
}

impl SystemVariant {
    pub fn from_fields(sys: Option<&str>, atomic: Option<&str>) -> Result<Self, UnknownVariant> {
        let flag = atomic.map(str::to_ascii_lowercase);
        match (sys, flag.as_deref()) {
            (Some("0"), _) => Ok(Self::Doppel),
            (Some("1"), _) => Ok(Self::Occ),
            (Some("2"), Some("false")) => Ok(Self::TwoPhaseLocking),
            (Some("2"), Some("true")) => Ok(Self::Atomic),
            _ => Err(UnknownVariant {
                sys: sys.map(str::to_string),
                atomic: atomic.map(str::to_string),
            }),
        }
    }

    pub fn from_record(record: &Record) -> Result<Self, UnknownVariant> {
        Self::from_fields(record.get("sys"), record.get("atomic"))
    }

    /// Series title used in graphs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Doppel => "Doppel",
            Self::Occ => "OCC",
            Self::TwoPhaseLocking => "2PL",
            Self::Atomic => "Atomic",
        }
    }
}

impl fmt::Display for SystemVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
