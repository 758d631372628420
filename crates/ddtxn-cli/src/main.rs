use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ddtxn_log::{
    Config, Corpus, CorpusBuilder, FieldExtractor, MissingKeyPolicy, PointSet, Predicate,
    StatError, Summary, aggregate, reduce_points, sweep,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ddtxn")]
#[command(about = "Reduce ddtxn benchmark logs into plot-ready tables", long_about = None)]
struct Cli {
    /// JSON file overriding parse conventions and filter policy
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Selection {
    /// Benchmark log files, read in order; later runs supersede earlier ones
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Required field value, e.g. `--where sys=0` (repeatable)
    #[arg(long = "where", value_name = "KEY=VALUE", value_parser = parse_constraint)]
    constraints: Vec<(String, String)>,

    /// Exclude records that lack a constrained field
    #[arg(long)]
    reject_missing: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse benchmark logs and emit the corpus as JSON
    Parse {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// One row per x-axis value, latest run wins
    Points {
        #[command(flatten)]
        selection: Selection,
        /// Integer field used as the x axis
        #[arg(long, default_value = "nw")]
        x: String,
        /// Field printed for each point
        #[arg(long, default_value = "total/sec")]
        y: String,
        /// Emit the point set as JSON instead of TSV
        #[arg(long)]
        json: bool,
    },
    /// Mean, min and max of a field over matching runs
    Stat {
        #[command(flatten)]
        selection: Selection,
        #[arg(long, default_value = "total/sec")]
        field: String,
        /// Divide each value by N (e.g. the worker count)
        #[arg(long, value_name = "N")]
        per: Option<f64>,
    },
    /// Stat once per value of a swept field
    Sweep {
        #[command(flatten)]
        selection: Selection,
        /// Field being swept, e.g. `contention`
        #[arg(long)]
        over: String,
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<String>,
        #[arg(long, default_value = "total/sec")]
        field: String,
        #[arg(long, value_name = "N")]
        per: Option<f64>,
    },
}

fn parse_constraint(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}

fn load_corpus(files: &[PathBuf], config: &Config) -> anyhow::Result<Corpus> {
    let mut corpus = Corpus::default();
    for path in files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let part = CorpusBuilder::with_config(config.parse.clone()).build(&content);
        log::info!("{}: {} runs", path.display(), part.len());
        corpus.extend(part);
    }
    Ok(corpus)
}

fn predicate(selection: &Selection, config: &Config) -> Predicate {
    let policy = if selection.reject_missing {
        MissingKeyPolicy::Reject
    } else {
        config.missing_key
    };
    let predicate = selection
        .constraints
        .iter()
        .cloned()
        .collect::<Predicate>()
        .missing_key(policy);
    if predicate.is_empty() {
        log::info!("no --where constraints, selecting every run");
    }
    predicate
}

/// Tab-separated table with a `#x<TAB>y` header, one row per point.
fn points_table(points: &PointSet<'_>, y: &str) -> String {
    let mut table = format!("#{}\t{y}\n", points.axis());
    for (key, value) in points.rows(y) {
        table.push_str(&format!("{key}\t{}\n", value.unwrap_or("-")));
    }
    table
}

fn extractor(field: &str, per: Option<f64>) -> FieldExtractor {
    let extractor = FieldExtractor::new(field);
    match per {
        Some(n) => extractor.divided_by(n),
        None => extractor,
    }
}

fn summary_columns(result: &Result<Summary, StatError>) -> anyhow::Result<String> {
    match result {
        Ok(s) => Ok(format!("{}\t{}\t{}", s.mean, s.min, s.max)),
        Err(StatError::EmptyInput) => Ok("-\t-\t-".to_string()),
        Err(e) => Err(anyhow::anyhow!("{e}")),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Parse { files } => {
            let corpus = load_corpus(files, &config)?;
            println!("{}", serde_json::to_string_pretty(&corpus)?);
        }
        Commands::Points {
            selection,
            x,
            y,
            json,
        } => {
            let corpus = load_corpus(&selection.files, &config)?;
            let points = reduce_points(&corpus, x, &predicate(selection, &config));
            if *json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print!("{}", points_table(&points, y));
            }
        }
        Commands::Stat {
            selection,
            field,
            per,
        } => {
            let corpus = load_corpus(&selection.files, &config)?;
            let predicate = predicate(selection, &config);
            let matched = corpus.iter().filter(|r| predicate.matches(r));
            let result = aggregate(matched, &extractor(field, *per));
            println!("{}", summary_columns(&result)?);
        }
        Commands::Sweep {
            selection,
            over,
            values,
            field,
            per,
        } => {
            let corpus = load_corpus(&selection.files, &config)?;
            let rows = sweep(
                &corpus.records,
                &predicate(selection, &config),
                over,
                values,
                &extractor(field, *per),
            );
            for (value, result) in &rows {
                println!("{value}\t{}", summary_columns(result)?);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_syntax() {
        assert_eq!(
            parse_constraint("sys=0"),
            Ok(("sys".to_string(), "0".to_string()))
        );
        assert_eq!(
            parse_constraint("binary=a=b"),
            Ok(("binary".to_string(), "a=b".to_string()))
        );
        assert!(parse_constraint("sys").is_err());
        assert!(parse_constraint("=0").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn sweep_arguments() {
        let cli = Cli::try_parse_from([
            "ddtxn",
            "sweep",
            "single-data.out",
            "--over",
            "contention",
            "--values",
            "0,1,5",
            "--where",
            "sys=2",
            "--where",
            "atomic=True",
        ])
        .unwrap();
        match cli.command {
            Commands::Sweep {
                selection, values, ..
            } => {
                assert_eq!(values, vec!["0", "1", "5"]);
                let predicate = predicate(&selection, &Config::default());
                assert_eq!(predicate.constraints().len(), 2);
                assert_eq!(predicate.missing_key_policy(), MissingKeyPolicy::Pass);
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn points_table_has_axis_header() {
        let corpus = CorpusBuilder::new().build(
            "# ./buy -sys=0 -rr 50\ntotal/sec: 2\n# ./buy -sys=0 -rr 10\nnreads: 1\n",
        );
        let points = reduce_points(&corpus, "rr", &Predicate::new());
        assert_eq!(
            points_table(&points, "total/sec"),
            "#rr\ttotal/sec\n10\t-\n50\t2\n"
        );
    }

    #[test]
    fn no_constraints_selects_everything() {
        let cli = Cli::try_parse_from(["ddtxn", "stat", "buy-data.out"]).unwrap();
        match cli.command {
            Commands::Stat { selection, .. } => {
                assert!(predicate(&selection, &Config::default()).is_empty());
            }
            _ => panic!("expected stat"),
        }
    }

    #[test]
    fn empty_summary_prints_dashes() {
        assert_eq!(summary_columns(&Err(StatError::EmptyInput)).unwrap(), "-\t-\t-");
    }
}
