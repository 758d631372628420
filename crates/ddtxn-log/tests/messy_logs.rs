use ddtxn_log::ir::Severity;
use ddtxn_log::{CorpusBuilder, SystemVariant};

#[test]
fn test_messy_run_output() {
    let input = include_str!("fixtures/messy.txt");
    let corpus = CorpusBuilder::new().build(input);

    for diagnostic in &corpus.diagnostics {
        println!("{:?}", diagnostic);
    }

    // The `# ./` block has no executable and is the only run dropped.
    assert_eq!(corpus.len(), 3);

    let first = &corpus.records[0];
    assert_eq!(first.get("phase"), Some("20"));
    assert_eq!(first.get("naborts"), Some("10"));
    assert!(!first.contains("ck"));
    assert!(!first.contains("abortrate"));
    assert!(first.iter().all(|(name, _)| !name.starts_with("BKey")));

    let second = &corpus.records[1];
    assert!(!second.contains("phase"), "trailing flag must be ignored");
    assert_eq!(second.get("total/sec"), Some("9.0e+05"));

    let variants: Vec<_> = corpus
        .iter()
        .map(|r| SystemVariant::from_record(r).unwrap().label())
        .collect();
    assert_eq!(variants, vec!["Doppel", "OCC", "Atomic"]);

    let warnings: Vec<_> = corpus
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line, Some(13));

    let skipped: Vec<_> = corpus
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Information)
        .filter_map(|d| d.line)
        .collect();
    assert_eq!(skipped, vec![6, 7]);
}
