//! Bundled sample questions.
//!
//! Each sample is a pre-recorded WAV file under
//! [`PromptConfig::prompts_dir`](crate::config::PromptConfig).

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("no sample prompt #{0} (valid: 1-{max})", max = SAMPLE_PROMPTS.len())]
    Unknown(usize),

    #[error("failed to read sample prompt {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A sample question and the recording that asks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePrompt {
    pub label: &'static str,
    pub file_name: &'static str,
}

pub const SAMPLE_PROMPTS: [SamplePrompt; 6] = [
    SamplePrompt {
        label: "What is Nike's stock price today, and should I invest in it?",
        file_name: "prompt_1.wav",
    },
    SamplePrompt {
        label: "Summarize Apple's earnings and news highlights.",
        file_name: "prompt_2.wav",
    },
    SamplePrompt {
        label: "What's the sentiment around Tesla this month?",
        file_name: "prompt_3.wav",
    },
    SamplePrompt {
        label: "Compare Samsung and AMD for the past 3 months.",
        file_name: "prompt_4.wav",
    },
    SamplePrompt {
        label: "Show Google's risk analysis and key shareholders.",
        file_name: "prompt_5.wav",
    },
    SamplePrompt {
        label: "What is Microsoft's option chain insight?",
        file_name: "prompt_6.wav",
    },
];

/// Look up a sample by its 1-based number.
pub fn sample(number: usize) -> Result<&'static SamplePrompt, PromptError> {
    number
        .checked_sub(1)
        .and_then(|i| SAMPLE_PROMPTS.get(i))
        .ok_or(PromptError::Unknown(number))
}

/// Read the recording for sample `number` from `dir`.
pub fn load_sample(dir: &Path, number: usize) -> Result<Vec<u8>, PromptError> {
    let path = dir.join(sample(number)?.file_name);
    std::fs::read(&path).map_err(|source| PromptError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn numbering_is_one_based() {
        assert_eq!(sample(1).unwrap().file_name, "prompt_1.wav");
        assert_eq!(sample(6).unwrap().file_name, "prompt_6.wav");
        assert!(matches!(sample(0), Err(PromptError::Unknown(0))));
        assert!(matches!(sample(7), Err(PromptError::Unknown(7))));
    }

    #[test]
    fn loads_recording_from_dir() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("prompt_3.wav"), b"RIFFtesla").unwrap();

        assert_eq!(load_sample(dir.path(), 3).unwrap(), b"RIFFtesla");
    }

    #[test]
    fn missing_recording_reports_path() {
        let dir = tempdir().expect("temp dir");
        let err = load_sample(dir.path(), 2).unwrap_err();
        assert!(err.to_string().contains("prompt_2.wav"));
    }

    #[test]
    fn unknown_error_names_valid_range() {
        assert_eq!(
            PromptError::Unknown(9).to_string(),
            "no sample prompt #9 (valid: 1-6)"
        );
    }
}
