#![no_main]
use ddtxn_log::{CorpusBuilder, FieldExtractor, Predicate, aggregate, reduce_points};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Panic freedom only; arbitrary bytes are read lossily as text.
    let s = String::from_utf8_lossy(data);

    // Split the input unevenly to exercise chunk boundaries as well.
    let mid = s.char_indices().nth(s.len() / 3).map_or(0, |(i, _)| i);
    let mut builder = CorpusBuilder::new();
    builder.update(&s[..mid]);
    builder.update(&s[mid..]);
    let corpus = builder.finish();

    let points = reduce_points(&corpus, "nw", &Predicate::new().with("sys", "0"));
    let _ = points.series(&FieldExtractor::new("total/sec"));
    let _ = aggregate(&corpus, &FieldExtractor::new("total/sec"));
});
