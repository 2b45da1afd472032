//! cvmatch command-line entrypoint.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use cvmatch::config::Config;
use cvmatch::constants::{DEFAULT_RANK_TOP_K, DEFAULT_RECOMMEND_TOP_K};
use cvmatch::document::CvInput;
use cvmatch::hybrid::HybridOrchestrator;
use cvmatch::scoring::{DirectoryRanking, HybridScore, LocalScoringService, ScoreRecord};
use cvmatch::text::OfferInput;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[command(name = "cvmatch", version, about = "Score CVs against job offers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a CV against a single offer JSON.
    ScoreCvVsOffer {
        /// Path to a CV file (pdf/docx/txt) or raw text.
        #[arg(long)]
        cv: String,
        /// Path to the offer JSON file.
        #[arg(long)]
        offer_json: PathBuf,
        /// Let the remote LLM scorer override the local score.
        #[arg(long)]
        remote: bool,
    },
    /// Recommend the top-k offers for a CV from a JSON list.
    RecommendOffersForCv {
        /// Path to a CV file (pdf/docx/txt) or raw text.
        #[arg(long)]
        cv: String,
        /// Path to a JSON array of offers.
        #[arg(long)]
        offers_json: PathBuf,
        #[arg(long, default_value_t = DEFAULT_RECOMMEND_TOP_K, allow_negative_numbers = true)]
        top_k: i64,
    },
    /// Rank the CV files of a directory for a single offer.
    RankCandidatesForOffer {
        /// Path to the offer JSON file.
        #[arg(long)]
        offer_json: PathBuf,
        /// Directory containing CV files.
        #[arg(long)]
        cvs_dir: PathBuf,
        #[arg(long, default_value_t = DEFAULT_RANK_TOP_K, allow_negative_numbers = true)]
        top_k: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    let local = LocalScoringService::new(config.encoder_config())?;

    match cli.command {
        Command::ScoreCvVsOffer {
            cv,
            offer_json,
            remote,
        } => {
            let offer: OfferInput = read_json(&offer_json)?;
            let cv = CvInput::infer(&cv);

            if remote {
                let hybrid = HybridOrchestrator::from_config(&config, Arc::new(local));
                tracing::info!(stats = ?hybrid.stats(), "Hybrid scoring");
                let result = hybrid.score_cv_vs_offer(&cv, &offer).await?;
                print_json(&hybrid_view(&result))?;
            } else {
                let result = local.score_cv_vs_offer(&cv, &offer)?;
                print_json(&local_view(&result, "offer_id"))?;
            }
        }
        Command::RecommendOffersForCv {
            cv,
            offers_json,
            top_k,
        } => {
            let offers: Vec<OfferInput> = read_json(&offers_json)?;
            let results = local.recommend_offers_for_cv(&CvInput::infer(&cv), &offers, top_k)?;
            let payload: Vec<Value> = results.iter().map(|r| local_view(r, "offer_id")).collect();
            print_json(&payload)?;
        }
        Command::RankCandidatesForOffer {
            offer_json,
            cvs_dir,
            top_k,
        } => {
            let offer: OfferInput = read_json(&offer_json)?;
            match local.rank_candidates_in_dir(&offer, &cvs_dir, top_k)? {
                empty @ DirectoryRanking::NoCandidates { .. } => println!("{empty}"),
                DirectoryRanking::Ranked(results) => {
                    let payload: Vec<Value> = results
                        .iter()
                        .map(|r| local_view(r, "candidate_id"))
                        .collect();
                    print_json(&payload)?;
                }
            }
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn local_view(record: &ScoreRecord, id_key: &str) -> Value {
    let mut view = json!({
        "score_0_100": record.score,
        "similarity": record.similarity,
        "meta": record.metadata,
    });
    view[id_key] = json!(record.identifier);
    view
}

fn hybrid_view(record: &HybridScore) -> Value {
    json!({
        "score_0_100": record.score,
        "similarity": record.similarity,
        "remote_score": record.remote_score,
        "local_score": record.local_score,
        "method": record.method,
        "offer_id": record.identifier,
        "meta": record.metadata,
    })
}
