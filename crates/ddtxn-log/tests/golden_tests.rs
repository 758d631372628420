use ddtxn_log::CorpusBuilder;
use std::fs;
use std::path::Path;

#[test]
fn run_golden_tests() {
    let fixtures_dir = Path::new("tests/fixtures");
    if !fixtures_dir.exists() {
        // Skip if no fixtures
        return;
    }

    for entry in fs::read_dir(fixtures_dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "log") {
            let log_content = fs::read_to_string(&path).expect("Failed to read log");
            let corpus = CorpusBuilder::new().build(&log_content);

            let golden_path = path.with_extension("golden.json");

            if std::env::var("UPDATE_GOLDEN").is_ok() {
                let json_output = serde_json::to_string_pretty(&corpus.records)
                    .expect("Failed to serialize records");
                fs::write(&golden_path, json_output).expect("Failed to update golden file");
            } else {
                let expected = fs::read_to_string(&golden_path)
                    .expect("Failed to read golden file (run with UPDATE_GOLDEN=1 to create)");
                let expected: serde_json::Value =
                    serde_json::from_str(&expected).expect("Golden file is not JSON");
                let actual = serde_json::to_value(&corpus.records).unwrap();
                assert_eq!(actual, expected, "Golden test failed for {:?}", path);
            }
        }
    }
}
