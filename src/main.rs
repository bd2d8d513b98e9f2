//! Application entry point — Market Analyst.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse the command line; `--list-samples` prints and exits.
//! 3. Load `.env`, then [`AppConfig`] (default on first run), then apply the
//!    `FASTAPI_HOST` and `--base-url` overrides.
//! 4. Read the question recording (file or bundled sample).
//! 5. Create the [`tokio`] runtime (multi-thread, 2 workers).
//! 6. Spawn the console presenter on the event channel.
//! 7. Run the pipeline for the recording and wait for the presenter to drain.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use market_analyst::{
    cli::{AudioSource, Cli},
    client::HttpStageClient,
    config::AppConfig,
    market::audio::decode_data_url,
    pipeline::{PipelineEvent, PipelineOrchestrator, PipelineSettings},
    present::ConsolePresenter,
    prompts,
};

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Command line
    let cli = Cli::parse();
    if cli.list_samples {
        for (i, prompt) in prompts::SAMPLE_PROMPTS.iter().enumerate() {
            println!("{:>2}. {}", i + 1, prompt.label);
        }
        return Ok(());
    }

    // 3. Configuration
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded environment from {}", path.display());
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    config.apply_env();
    config.apply_base_url(cli.base_url.clone());
    if cli.html {
        config.ui.render_html = true;
    }

    // 4. Recording
    let audio = match cli.audio_source() {
        Some(AudioSource::File(path)) => std::fs::read(&path)
            .with_context(|| format!("failed to read recording {}", path.display()))?,
        Some(AudioSource::Sample(number)) => {
            println!("Sample prompt: {}\n", prompts::sample(number)?.label);
            prompts::load_sample(&config.prompts.prompts_dir, number)?
        }
        None => anyhow::bail!("no recording given; pass a WAV file or --sample N"),
    };

    log::info!(
        "Market analyst starting up (backend {})",
        config.service.base_url
    );

    // 5. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(run(config, audio, cli.save_audio))
}

async fn run(config: AppConfig, audio: Vec<u8>, save_audio: Option<PathBuf>) -> Result<()> {
    let client = Arc::new(HttpStageClient::from_config(&config.service));
    let orchestrator = PipelineOrchestrator::new(client, PipelineSettings::from_config(&config));

    // 6. Presenter
    let (events_tx, mut events_rx) = mpsc::channel::<PipelineEvent>(32);
    let presenter = ConsolePresenter::new(config.ui.clone());
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            if let Some(text) = presenter.render(&event) {
                println!("{text}\n");
            }
        }
    });

    // 7. Pipeline
    let result = orchestrator.process(audio, &events_tx).await;
    drop(events_tx);
    printer.await.context("presenter task failed")?;

    let answer = result?;

    if let (Some(path), Some(data_url)) = (save_audio, answer.audio.as_deref()) {
        let wav = decode_data_url(data_url).context("answer audio is not a usable data URL")?;
        std::fs::write(&path, wav)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved spoken answer to {}", path.display());
    }

    Ok(())
}
