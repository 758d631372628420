use ddtxn_log::{
    CollisionPolicy, CorpusBuilder, FieldExtractor, MissingKeyPolicy, ParseConfig, Predicate,
    aggregate, all_matching, reduce_points,
};

const LOG: &str = include_str!("fixtures/buy-data.log");

#[test]
fn test_simple_structure() {
    let corpus = CorpusBuilder::new().build(LOG);
    assert_eq!(corpus.len(), 3);
    assert!(corpus.diagnostics.is_empty());

    let first = &corpus.records[0];
    assert_eq!(first.binary(), Some("buy"));
    assert_eq!(first.get("nprocs"), Some("80"));
    assert_eq!(first.get("actual time"), Some("10.062740397s"));
    assert_eq!(first.get("rlock"), Some("false"));
    assert_eq!(first.shadowed().get("rlock").map(String::as_str), Some("False"));
}

#[test]
fn test_scale_graph() {
    let corpus = CorpusBuilder::new().build(LOG);
    let predicate = Predicate::new()
        .with("binary", "buy")
        .with("rr", "90")
        .with("retry", "False");

    // sys=0 runs carry no `retry` flag; the missing key does not exclude them.
    let points = reduce_points(&corpus, "nw", &predicate);
    assert_eq!(points.keys().collect::<Vec<_>>(), vec![40, 80]);
    assert_eq!(points.get(40).and_then(|r| r.get("total/sec")), Some("3.3e+07"));

    let strict = predicate.missing_key(MissingKeyPolicy::Reject);
    let points = reduce_points(&corpus, "nw", &strict);
    assert_eq!(points.keys().collect::<Vec<_>>(), vec![80]);
}

#[test]
fn test_per_worker_throughput() {
    let corpus = CorpusBuilder::new().build(LOG);
    let doppel = all_matching(&corpus.records, &Predicate::new().with("sys", "0")).unwrap();
    assert_eq!(doppel.len(), 2);

    let summary = aggregate(doppel, &FieldExtractor::new("total/sec").divided_by(40.0)).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.min, 775_000.0);
    assert_eq!(summary.max, 825_000.0);
    assert_eq!(summary.mean, 800_000.0);
}

#[test]
fn test_custom_conventions() {
    let config = ParseConfig {
        comment_prefix: "% ".to_string(),
        invocation_prefix: "% /".to_string(),
        collision: CollisionPolicy::PreferInvocation,
        ..ParseConfig::default()
    };
    let input = "% /opt/bench/rubis -sys=1\nsys: 0\n# ./buy -sys=0\n";
    let corpus = CorpusBuilder::with_config(config).build(input);

    // `# ./buy` is just an unrecognized line under these conventions.
    assert_eq!(corpus.len(), 1);
    let record = &corpus.records[0];
    assert_eq!(record.binary(), Some("rubis"));
    assert_eq!(record.get("sys"), Some("1"));
    assert_eq!(record.shadowed().get("sys").map(String::as_str), Some("0"));
    assert_eq!(corpus.diagnostics.len(), 1);
}
