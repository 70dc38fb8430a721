mod classifier;
mod config;
mod server;
mod text;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use classifier::{DecisionPolicy, EmotionClassifier, OnnxEncoder, DEFAULT_THRESHOLD};
use config::Config;
use server::AppState;

/// Multi-label emotion classification service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (defaults to ~/.moodtune/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the ONNX model file
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Path to the tokenizer.json file
    #[arg(short, long)]
    tokenizer: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of threads for ONNX inference
    #[arg(long)]
    threads: Option<usize>,

    /// Classify this text once, print the result and exit
    #[arg(long)]
    text: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command-line values win over the config file
    fn apply(&self, config: &mut Config) {
        if let Some(ref model) = self.model {
            config.model_path = Some(model.clone());
        }
        if let Some(ref tokenizer) = self.tokenizer {
            config.tokenizer_path = Some(tokenizer.clone());
        }
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(threads) = self.threads {
            config.n_threads = threads;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let mut config = Config::load(&config_path)?;
    args.apply(&mut config);
    config.validate()?;
    if config.threshold_overridden() {
        warn!(
            "Decision threshold overridden: {} (default {})",
            config.threshold, DEFAULT_THRESHOLD
        );
    }

    let encoder_config = config.encoder_config()?;
    info!("Loading emotion model...");
    info!("Model: {:?}", encoder_config.model_path);
    info!("Tokenizer: {:?}", encoder_config.tokenizer_path);

    let encoder = OnnxEncoder::new(&encoder_config).map_err(|e| {
        error!("Failed to load encoder: {}", e);
        e
    })?;
    let classifier = EmotionClassifier::new(
        Arc::new(encoder),
        DecisionPolicy::new(config.threshold),
    )
    .context("Failed to build text preprocessing")?;
    info!("Model loaded successfully");

    if let Some(ref text) = args.text {
        let prediction = classifier.classify(text)?;
        let output = serde_json::json!({ "emotions": prediction.emotions });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid host address: {}", config.host))?;
    let addr = SocketAddr::new(ip, config.port);

    let state = AppState {
        classifier: Arc::new(classifier),
    };
    server::serve(state, addr).await
}
