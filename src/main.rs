use clap::{Parser, Subcommand};
use resume_pipeline::core::config::PipelineConfig;
use resume_pipeline::core::resume::confidence;
use resume_pipeline::core::resume::llm::{HttpLlmExtractor, LlmExtractor, NullLlmExtractor};
use resume_pipeline::core::resume::store::{FsBlobStore, SqliteMetadataStore};
use resume_pipeline::ingest_resume;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "resume-pipeline", about = "Nursing resume ingestion and structured-extraction CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode and extract a resume from disk, persisting the result.
    Ingest {
        /// Path to the resume file (.pdf, .docx, or .doc).
        file: PathBuf,

        /// Subject identifier the resume belongs to.
        #[arg(long)]
        subject: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = PipelineConfig::default_path();
    let config = if config_path.exists() {
        PipelineConfig::load(&config_path).map_err(|e| anyhow::anyhow!(e.to_string()))?
    } else {
        tracing::info!(path = %config_path.display(), "no configuration file found, using defaults");
        PipelineConfig::default()
    };

    match cli.command {
        Command::Ingest { file, subject } => ingest(&config, &file, &subject).await,
    }
}

async fn ingest(config: &PipelineConfig, file: &std::path::Path, subject: &str) -> anyhow::Result<()> {
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid file path: {}", file.display()))?
        .to_string();
    let bytes = std::fs::read(file)?;

    let blobs = FsBlobStore::new(&config.blob_root);
    let metadata = SqliteMetadataStore::connect(std::path::Path::new(&config.database_path)).await?;
    let llm: Box<dyn LlmExtractor> = match &config.llm_endpoint {
        Some(endpoint) => Box::new(HttpLlmExtractor::new(
            endpoint.clone(),
            config.llm_model.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )),
        None => Box::new(NullLlmExtractor),
    };

    let outcome = ingest_resume(subject, &filename, &bytes, config, &blobs, &metadata, llm.as_ref()).await;

    match outcome {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if let Some(record) = &outcome.record {
                eprintln!("confidence score: {}", confidence::score(record, None));
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "ingestion failed");
            anyhow::bail!(err.user_message())
        }
    }
}
