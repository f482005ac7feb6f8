use anyhow::anyhow;
use phrase_analysis::backend::HttpTextGenerator;
use phrase_analysis::config::{CONFIG_PATH_ENV, EngineConfig};
use phrase_analysis::engine::{AnalysisOutcome, PhraseEngine};
use phrase_analysis::nlp::LexideTagger;
use phrase_analysis::records::load_records;
use phrase_analysis::report::{records_table, write_artifacts};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut args: Vec<String> = std::env::args().collect();
    let config_path = take_flag(&mut args, "--config")?
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
        .map(PathBuf::from);

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "analyze" => {
            let Some(records_path) = args.get(2) else {
                eprintln!("Error: 'analyze' requires a records file");
                print_usage();
                return Err(anyhow!("Missing arguments for 'analyze' command"));
            };
            let output_dir = args
                .get(3)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./out"));

            let config = match &config_path {
                Some(path) => EngineConfig::from_file(path)?,
                None => EngineConfig::default(),
            };
            analyze(Path::new(records_path), &output_dir, &config).await?;
        }
        "table" => {
            let Some(records_path) = args.get(2) else {
                eprintln!("Error: 'table' requires a records file");
                print_usage();
                return Err(anyhow!("Missing arguments for 'table' command"));
            };
            let records = load_records(Path::new(records_path))?;
            println!("{}", records_table(&records));
        }
        command => {
            eprintln!("Error: Unknown command '{command}'");
            print_usage();
            return Err(anyhow!("Unknown command"));
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: phrase-analysis <command> [args...] [--config <path>]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  analyze <records.jsonl> [output_dir]  Analyze a batch and write the report");
    eprintln!("  table <records.jsonl>                 Print the records as a markdown table");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PHRASE_GENERATION_URL      text-generation endpoint (templates only if unset)");
    eprintln!("  PHRASE_GENERATION_API_KEY  bearer token for the generation endpoint");
    eprintln!("  LEXIDE_URL                 lexide server used to tag translations");
    eprintln!("  {CONFIG_PATH_ENV}       engine config file");
}

/// Remove `flag <value>` from the arguments, returning the value.
fn take_flag(args: &mut Vec<String>, flag: &str) -> anyhow::Result<Option<String>> {
    let Some(index) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        return Err(anyhow!("{flag} requires a value"));
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}

async fn analyze(records_path: &Path, output_dir: &Path, config: &EngineConfig) -> anyhow::Result<()> {
    let tagger = LexideTagger::from_env()?;
    let backend = HttpTextGenerator::from_env(config.backend_timeout());
    let mut engine = PhraseEngine::new(config, tagger, backend);

    for record in load_records(records_path)? {
        engine.accept(record);
    }
    println!("Collected {} phrases", engine.pending());

    match engine.finalize().await {
        AnalysisOutcome::NoData => {
            println!("No phrases were collected, nothing to analyze.");
        }
        AnalysisOutcome::Complete(analysis) => {
            let paths = write_artifacts(output_dir, &analysis.records, &analysis.report)?;
            println!(
                "Analysis of {} phrases written to {} ({:?} generation)",
                analysis.records.len(),
                paths.report.display(),
                analysis.report.summary.generation_path
            );
        }
    }

    Ok(())
}
