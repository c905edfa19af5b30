//! claimgraph CLI — builds the evidence graph for one (context, claim)
//! pair and prints a ranked sentence list.
//!
//! Usage:
//!   claimgraph run --input annotated.json [--config claimgraph.toml] [--rank-method frequency]

use claimgraph::annotate::AnnotatedInput;
use claimgraph::config::Config;
use claimgraph::embed::MockEmbedder;
use claimgraph::entity::MockEntityExtractor;
use claimgraph::graph::to_gexf;
use claimgraph::{Pipeline, RankMethod};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "claimgraph", version, about = "Evidence graph builder and beam-search ranker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over an annotated context/claim document
    Run {
        /// Path to an AnnotatedInput JSON document
        #[arg(long)]
        input: PathBuf,
        /// Path to a TOML config file; defaults are used for anything omitted
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = CliRankMethod::Frequency)]
        rank_method: CliRankMethod,
        /// Write the GEXF-equivalent graph export to this path
        #[arg(long)]
        export_graph: Option<PathBuf>,
        /// Write the path-export JSON document to this path
        #[arg(long)]
        export_paths: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum CliRankMethod {
    Frequency,
    AvgScore,
    MaxScore,
    TotalScore,
    Combined,
}

impl From<CliRankMethod> for RankMethod {
    fn from(m: CliRankMethod) -> Self {
        match m {
            CliRankMethod::Frequency => RankMethod::Frequency,
            CliRankMethod::AvgScore => RankMethod::AvgScore,
            CliRankMethod::MaxScore => RankMethod::MaxScore,
            CliRankMethod::TotalScore => RankMethod::TotalScore,
            CliRankMethod::Combined => RankMethod::Combined,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Run { input, config, rank_method, export_graph, export_paths } => {
            run(input, config, rank_method.into(), export_graph, export_paths)
        }
    };
    std::process::exit(code);
}

fn run(
    input_path: PathBuf,
    config_path: Option<PathBuf>,
    rank_method: RankMethod,
    export_graph: Option<PathBuf>,
    export_paths: Option<PathBuf>,
) -> i32 {
    let input_text = match std::fs::read_to_string(&input_path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", input_path.display());
            return 1;
        }
    };
    let input: AnnotatedInput = match serde_json::from_str(&input_text) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: could not parse annotated input: {err}");
            return 1;
        }
    };

    let config = match config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: could not load config: {err}");
                return 1;
            }
        },
        None => Config::default(),
    };

    // Real embedder/entity-extractor collaborators require external model
    // services; the CLI drives the pipeline with the deterministic mocks
    // by default so it runs standalone.
    let embedder = MockEmbedder::one_hot(768);
    let entity_extractor = MockEntityExtractor::with_entities(vec![]);
    let (beam_width, max_depth, max_paths) = (config.beam_width, config.max_depth, config.max_paths);

    let pipeline = Pipeline::new(config, &embedder, &entity_extractor);
    let result = match pipeline.run(&input, rank_method) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    println!("ranked sentences ({} total):", result.ranked_sentences.len());
    for (rank, sentence) in result.ranked_sentences.iter().enumerate() {
        println!(
            "{:>3}. [{}] freq={} avg={:.3} max={:.3} total={:.3} combined={:.3}  {}",
            rank + 1,
            sentence.sentence_id,
            sentence.frequency,
            sentence.avg_score,
            sentence.max_score,
            sentence.total_score,
            sentence.combined_score,
            sentence.text
        );
    }

    if let Some(path) = export_graph {
        if let Err(err) = std::fs::write(&path, to_gexf(&result.graph)) {
            eprintln!("warning: could not write graph export: {err}");
        }
    }
    if let Some(path) = export_paths {
        let export = claimgraph::graph::PathExport {
            claim: &input.claim.text,
            parameters: claimgraph::graph::PathExportParameters { beam_width, max_depth, max_paths },
            paths: result
                .paths
                .iter()
                .map(|p| claimgraph::graph::PathExportEntry {
                    nodes: p.nodes.iter().map(|n| n.to_string()).collect(),
                    edges: p
                        .edges
                        .iter()
                        .map(|(a, b, kind)| (a.to_string(), b.to_string(), format!("{kind:?}")))
                        .collect(),
                    score: p.final_score(),
                    reached_sentence: p.reached_sentence,
                    visited_entity: p.visited_entity,
                    pattern: p.pattern.clone(),
                })
                .collect(),
        };
        match serde_json::to_string_pretty(&export) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    eprintln!("warning: could not write path export: {err}");
                }
            }
            Err(err) => eprintln!("warning: could not serialize path export: {err}"),
        }
    }

    0
}
