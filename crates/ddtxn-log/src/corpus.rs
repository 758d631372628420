use crate::config::ParseConfig;
use crate::ir::{Corpus, Diagnostic, Record};
use crate::parser::{Line, RecordParser};

/// A streaming splitter for multi-run benchmark logs.
///
/// Input may arrive in arbitrary chunks. Only complete lines are consumed;
/// a run block is closed when the next invocation line arrives or when the
/// builder is finished, so chunking never changes the resulting corpus.
pub struct CorpusBuilder {
    parser: RecordParser,
    buffer: String,
    line_no: usize,
    block: Vec<(usize, String)>,
    records: Vec<Record>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::with_parser(RecordParser::new())
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self::with_parser(RecordParser::with_config(config))
    }

    pub fn with_parser(parser: RecordParser) -> Self {
        Self {
            parser,
            buffer: String::new(),
            line_no: 0,
            block: Vec::new(),
            records: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Appends input and closes any run blocks it completes.
    ///
    /// # Returns
    ///
    /// The records completed by this chunk, in input order.
    pub fn update(&mut self, input: &str) -> &[Record] {
        self.buffer.push_str(input);
        let start = self.records.len();

        if let Some(last_nl) = self.buffer.rfind('\n') {
            let chunk: String = self.buffer.drain(..=last_nl).collect();
            for line in chunk.lines() {
                self.push_line(line);
            }
        }

        &self.records[start..]
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Treats the end of input as the end of the last run block.
    pub fn finish(mut self) -> Corpus {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.push_line(&rest);
        }
        self.flush_block();

        log::info!(
            "built corpus of {} runs from {} lines ({} diagnostics)",
            self.records.len(),
            self.line_no,
            self.diagnostics.len()
        );
        Corpus {
            records: self.records,
            diagnostics: self.diagnostics,
        }
    }

    /// One-shot parse of a whole log.
    pub fn build(mut self, input: &str) -> Corpus {
        self.update(input);
        self.finish()
    }

    fn push_line(&mut self, line: &str) {
        self.line_no += 1;
        if self.parser.is_invocation(line) {
            self.flush_block();
        }
        self.block.push((self.line_no, line.to_string()));
    }

    fn flush_block(&mut self) {
        if self.block.is_empty() {
            return;
        }
        let block = std::mem::take(&mut self.block);
        let first_line = block[0].0;

        // Text before the first run is only worth a diagnostic if it carried data.
        if !self.parser.is_invocation(&block[0].1)
            && !block
                .iter()
                .any(|(_, l)| matches!(self.parser.classify(l), Line::Field { .. }))
        {
            return;
        }

        let lines = block.iter().map(|(n, l)| (*n, l.as_str()));
        match self.parser.parse_lines(lines, &mut self.diagnostics) {
            Ok(record) => self.records.push(record),
            Err(e) => {
                log::warn!("dropping run block at line {first_line}: {e}");
                self.diagnostics.push(Diagnostic::warning(
                    format!("dropped run block: {e}"),
                    Some(first_line),
                ));
            }
        }
    }
}
