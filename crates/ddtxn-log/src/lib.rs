//! # ddtxn Log Reducer
//!
//! Parser and point reducer for the text dumps written by ddtxn benchmark runs.
//!
//! ## Overview
//!
//! Each benchmark run appends a block to a log: the command line that
//! launched it, prefixed with `# `, followed by `name: value` statistics.
//!
//! ```text
//! # ./buy -nprocs 80 -nw 80 -contention 100000 -rr 90 -sys=1 -phase=80
//! nworkers: 80
//! total/sec: 4.0391641537445895e+07
//! abortrate: 9.72
//! ```
//!
//! This crate turns a stream of such blocks into [`Record`]s and reduces
//! them into per-configuration tables:
//!
//! ```text
//!  log text ──► CorpusBuilder ──► Corpus ──► Predicate ─┬─► reduce()    ──► PointSet
//!                                                       └─► aggregate() ──► Summary
//! ```
//!
//! - [`RecordParser`] parses one block. Invocation flags and result lines
//!   share one namespace; collisions keep the losing value in
//!   [`Record::shadowed`].
//! - [`CorpusBuilder`] splits a (possibly chunked) stream into blocks.
//! - [`Predicate`] selects records by required field values.
//! - [`reduce()`] keys records by an integer axis field, latest run wins.
//! - [`aggregate`] computes mean/min/max through an [`Extractor`].
//!
//! Everything is best-effort: malformed lines and blocks are skipped and
//! reported as [`Diagnostic`]s and through the `log` facade.
//!
//! ## Examples
//!
//! ```
//! use ddtxn_log::{CorpusBuilder, FieldExtractor, Predicate, aggregate, reduce_points};
//!
//! let log = concat!(
//!     "# ./buy -nw 20 -sys=0 -rr 10\n",
//!     "total/sec: 50.0\n",
//!     "# ./buy -nw 20 -sys=0 -rr 10\n",
//!     "total/sec: 75.0\n",
//!     "# ./buy -nw 20 -sys=0 -rr 50\n",
//!     "total/sec: 90.0\n",
//! );
//! let corpus = CorpusBuilder::new().build(log);
//! let predicate = Predicate::new().with("sys", "0").with("binary", "buy");
//!
//! let points = reduce_points(&corpus, "rr", &predicate);
//! let rows: Vec<_> = points.rows("total/sec").collect();
//! assert_eq!(rows, vec![(10, Some("75.0")), (50, Some("90.0"))]);
//!
//! let summary = aggregate(&corpus, &FieldExtractor::new("total/sec")).unwrap();
//! assert_eq!(summary.max, 90.0);
//! ```
//!
//! Reading a log from disk and exporting the corpus:
//!
//! ```no_run
//! use ddtxn_log::CorpusBuilder;
//! use std::fs;
//!
//! let log = fs::read_to_string("buy-data.out")?;
//! let corpus = CorpusBuilder::new().build(&log);
//! fs::write("runs.json", serde_json::to_string_pretty(&corpus)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
/// Streaming splitter for multi-run logs.
pub mod corpus;
pub mod error;
pub mod filter;
/// Records, corpora and diagnostics.
pub mod ir;
/// Single-block record parser.
pub mod parser;
pub mod reduce;
pub mod stats;
pub mod variant;


pub use config::{CollisionPolicy, Config, MissingKeyPolicy, ParseConfig};
pub use corpus::CorpusBuilder;
pub use error::{CoercionError, ConfigError, FilterError, ParseError, StatError, UnknownVariant};
pub use filter::{Predicate, all_matching, filter};
pub use ir::{Corpus, Diagnostic, Record, Severity};
pub use parser::{Line, RecordParser};
pub use reduce::{PointSet, reduce, reduce_points};
pub use stats::{Extractor, FieldExtractor, Summary, aggregate, aggregate_field, sweep};
pub use variant::SystemVariant;
