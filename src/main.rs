use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use vibecheck::config::Config;
use vibecheck::toxicity::gemini::GeminiModel;
use vibecheck::toxicity::models::{AnalysisRequest, ImageInput};
use vibecheck::toxicity::traits::ModelCapability;

/// Vibe Check: how toxic is this message?
///
/// Scores a message or a screenshot of a conversation from 0 to 100 and
/// breaks the result down into eight communication patterns.
#[derive(Parser)]
#[command(name = "vibecheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Check a single message or screenshot from the terminal
    Check {
        /// The message text to analyze
        message: Option<String>,

        /// Path to a screenshot (png, jpg, gif, webp)
        #[arg(long)]
        image: Option<PathBuf>,

        /// Also print the plain-text share card
        #[arg(long)]
        share: bool,
    },

    /// Print the JSON schema the model must answer with
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vibecheck=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            config.require_model()?;
            let model = create_model(&config)?;
            vibecheck::web::run_server(model, port, &bind).await?;
        }

        Commands::Check {
            message,
            image,
            share,
        } => {
            let config = Config::load()?;
            config.require_model()?;
            let model = create_model(&config)?;

            let image = match image {
                Some(path) => Some(load_image(&path)?.to_data_uri()),
                None => None,
            };
            let request = AnalysisRequest { message, image };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Checking the vibes...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = vibecheck::toxicity::handler::analyze(model.as_ref(), &request).await;
            spinner.finish_and_clear();

            let result = outcome?;
            vibecheck::output::terminal::display_result(&result);

            if share {
                println!("{}", vibecheck::output::share::share_text(&result));
            } else {
                println!("{}", "Run with --share to get a copyable summary.".dimmed());
            }
        }

        Commands::Schema => {
            let schema = vibecheck::toxicity::schema::output_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

/// Create the model client from configuration.
fn create_model(config: &Config) -> Result<Arc<dyn ModelCapability>> {
    info!(model = %config.model, "Using Gemini model");
    let model = GeminiModel::new(
        &config.gemini_api_url,
        &config.model,
        config.gemini_api_key.clone(),
        config.model_timeout,
    )?;
    Ok(Arc::new(model))
}

/// Read a screenshot from disk and encode it for the prompt.
fn load_image(path: &Path) -> Result<ImageInput> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    ImageInput::from_bytes(image_mime_type(path), &bytes)
        .with_context(|| format!("Unusable image: {}", path.display()))
}

fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
