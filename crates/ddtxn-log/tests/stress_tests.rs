use ddtxn_log::CorpusBuilder;

#[test]
fn test_char_by_char_streaming() {
    let input = include_str!("fixtures/buy-data.log");
    let expected = CorpusBuilder::new().build(input);

    let mut builder = CorpusBuilder::new();
    let mut completed = 0;
    // Feed one character at a time
    for c in input.chars() {
        let mut buf = [0; 4];
        let s = c.encode_utf8(&mut buf);
        completed += builder.update(s).len();
    }
    let streamed = builder.finish();

    assert_eq!(completed, expected.len() - 1);
    assert_eq!(streamed, expected);
}

#[test]
fn test_many_runs() {
    let mut input = String::new();
    for i in 0..2000 {
        input.push_str(&format!("# ./buy -nw {} -sys=0\ntotal/sec: {}.0\n", i % 10, i));
    }
    let corpus = CorpusBuilder::new().build(&input);
    assert_eq!(corpus.len(), 2000);

    let points = ddtxn_log::reduce(&corpus, "nw");
    assert_eq!(points.len(), 10);
    assert_eq!(points.get(9).and_then(|r| r.get("total/sec")), Some("1999.0"));
}

#[test]
fn test_crlf_input() {
    let input = "# ./buy -nw 4\r\ntotal/sec: 1.0\r\n";
    let corpus = CorpusBuilder::new().build(input);
    assert_eq!(corpus.records[0].get("nw"), Some("4"));
    assert_eq!(corpus.records[0].get("total/sec"), Some("1.0"));
}
