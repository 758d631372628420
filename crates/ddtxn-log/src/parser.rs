use std::collections::BTreeMap;

use crate::config::{CollisionPolicy, ParseConfig};
use crate::error::ParseError;
use crate::ir::{Diagnostic, Record};

/// What a single line of run output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// The command line that launched the run.
    Invocation,
    /// A `name: value` statistics line.
    Field { name: &'a str, value: &'a str },
    Comment,
    /// A known non-data header such as the `BKey` banner.
    Header,
    Blank,
    /// Anything else. Skipped.
    Unrecognized,
}

/// Turns one run's text block into a [`Record`].
///
/// Parsing is best-effort: only a missing or empty invocation line fails the
/// block. Statistics lines that do not look like `name: value` are skipped
/// and reported through the diagnostics sink.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    config: ParseConfig,
}

impl RecordParser {
    /// Creates a parser with the stock ddtxn output conventions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    pub fn is_invocation(&self, line: &str) -> bool {
        line.starts_with(self.config.invocation_prefix.as_str())
    }

    /// Classifies one line of output. Trailing `\r` is ignored.
    pub fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        let line = line.trim_end_matches('\r');
        if self.is_invocation(line) {
            return Line::Invocation;
        }
        if line.starts_with(self.config.comment_prefix.as_str()) {
            return Line::Comment;
        }
        if self
            .config
            .ignored_prefixes
            .iter()
            .any(|p| line.starts_with(p.as_str()))
        {
            return Line::Header;
        }
        if line.trim().is_empty() {
            return Line::Blank;
        }

        let mut parts = line.split(": ");
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(value), None) if !name.trim().is_empty() => Line::Field {
                name: name.trim(),
                value: value.trim(),
            },
            _ => Line::Unrecognized,
        }
    }

    /// Splits an invocation line into `(field, value)` pairs, starting with
    /// `binary`.
    ///
    /// `-name=value` and `-name value` are both accepted. Configured boolean
    /// flags never consume the next token, and a trailing flag with no value
    /// is ignored.
    ///
    /// # Errors
    ///
    /// [`ParseError::MalformedInvocation`] if no executable follows the marker.
    pub fn parse_invocation(&self, line: &str) -> Result<Vec<(String, String)>, ParseError> {
        let line = line.trim_end_matches('\r');
        let body = line
            .strip_prefix(self.config.comment_prefix.as_str())
            .unwrap_or(line);
        let tokens: Vec<&str> = body.split_whitespace().collect();

        let binary = tokens
            .first()
            .and_then(|exe| exe.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ParseError::MalformedInvocation {
                line: line.to_string(),
            })?;

        let mut fields = vec![("binary".to_string(), binary.to_string())];
        let mut i = 1;
        while i < tokens.len() {
            let token = tokens[i];
            i += 1;
            let Some(flag) = token.strip_prefix('-') else {
                continue;
            };
            let flag = flag.trim_start_matches('-');

            if let Some((name, value)) = flag.split_once('=') {
                if !name.is_empty() {
                    fields.push((name.to_string(), value.to_string()));
                }
                continue;
            }
            if flag.is_empty() || self.config.is_boolean_flag(flag) {
                continue;
            }
            match tokens.get(i) {
                Some(value) => {
                    fields.push((flag.to_string(), value.to_string()));
                    i += 1;
                }
                None => log::debug!("ignoring trailing flag `{token}` without a value"),
            }
        }
        Ok(fields)
    }

    /// Parses a complete run block.
    ///
    /// # Arguments
    ///
    /// * `block` - The invocation line followed by the run's statistics dump.
    ///
    /// # Returns
    ///
    /// The merged record, or [`ParseError`] when the block has no usable
    /// invocation line.
    pub fn parse(&self, block: &str) -> Result<Record, ParseError> {
        let mut diagnostics = Vec::new();
        self.parse_lines(
            block.lines().enumerate().map(|(i, l)| (i + 1, l)),
            &mut diagnostics,
        )
    }

    /// Parses numbered lines of one block, pushing every skipped line into
    /// `diagnostics`.
    pub(crate) fn parse_lines<'a, I>(
        &self,
        lines: I,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Record, ParseError>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut invocation: Option<Vec<(String, String)>> = None;
        let mut results: Vec<(String, String)> = Vec::new();

        for (line_no, line) in lines {
            match self.classify(line) {
                Line::Invocation if invocation.is_none() => {
                    invocation = Some(self.parse_invocation(line)?);
                }
                Line::Invocation => {
                    log::debug!("line {line_no}: extra invocation line in block ignored");
                    diagnostics.push(Diagnostic::info(
                        "extra invocation line in block ignored",
                        Some(line_no),
                    ));
                }
                Line::Field { name, value } => {
                    results.push((name.to_string(), value.to_string()));
                }
                Line::Unrecognized => {
                    log::debug!("line {line_no}: skipping unrecognized line {line:?}");
                    diagnostics.push(Diagnostic::info(
                        format!("skipped unrecognized line {:?}", line.trim()),
                        Some(line_no),
                    ));
                }
                Line::Comment | Line::Header | Line::Blank => {}
            }
        }

        let invocation = invocation.ok_or(ParseError::MissingInvocation)?;
        Ok(self.merge(invocation, results))
    }

    fn merge(&self, invocation: Vec<(String, String)>, results: Vec<(String, String)>) -> Record {
        let (base, overlay) = match self.config.collision {
            CollisionPolicy::PreferResult => (invocation, results),
            CollisionPolicy::PreferInvocation => (results, invocation),
        };

        let mut fields: BTreeMap<String, String> = base.into_iter().collect();
        let mut shadowed = BTreeMap::new();
        for (name, value) in overlay {
            if let Some(old) = fields.insert(name.clone(), value)
                && fields.get(&name) != Some(&old)
            {
                shadowed.insert(name, old);
            }
        }
        Record::from_parts(fields, shadowed)
    }
}
