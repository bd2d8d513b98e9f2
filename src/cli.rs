use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "market-analyst",
    version,
    about = "Ask a spoken market-research question and get an answer"
)]
pub struct Cli {
    #[arg(help = "WAV recording of the question")]
    pub audio: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "audio",
        help = "Use bundled sample prompt N (see --list-samples)"
    )]
    pub sample: Option<usize>,

    #[arg(long, help = "List the bundled sample prompts and exit")]
    pub list_samples: bool,

    #[arg(long, help = "Settings file (defaults to the platform config dir)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Backend base URL, overrides settings and FASTAPI_HOST")]
    pub base_url: Option<String>,

    #[arg(long, help = "Write the spoken answer to this WAV file")]
    pub save_audio: Option<PathBuf>,

    #[arg(long, help = "Render headlines as HTML snippets")]
    pub html: bool,
}

/// Where the question recording comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    File(PathBuf),
    Sample(usize),
}

impl Cli {
    /// The recording to send, if any was named.
    pub fn audio_source(&self) -> Option<AudioSource> {
        match (&self.audio, self.sample) {
            (Some(path), _) => Some(AudioSource::File(path.clone())),
            (None, Some(n)) => Some(AudioSource::Sample(n)),
            (None, None) => None,
        }
    }
}
