//! Spoken-answer payload helpers.
//!
//! The answer service returns its speech as a self-contained
//! `data:audio/wav;base64,…` URL.  Web front-ends embed it directly; the
//! terminal front-end decodes it to a file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use super::headlines::escape_html;

/// Errors raised while decoding an audio data URL.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio payload is not a data URL")]
    NotDataUrl,

    #[error("audio data URL is not base64-encoded")]
    NotBase64,

    #[error("invalid base64 audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// `<audio>` element embedding `src`.
pub fn audio_html(src: &str, autoplay: bool) -> String {
    let autoplay = if autoplay { " autoplay" } else { "" };
    format!(
        r#"<audio controls{autoplay} style="width:100%;outline:none;">
  <source src="{src}" type="audio/wav">
  Your browser does not support the audio element.
</audio>"#,
        src = escape_html(src),
    )
}

/// Media type declared by a data URL, e.g. `audio/wav`.
pub fn media_type(data_url: &str) -> Option<&str> {
    let rest = data_url.strip_prefix("data:")?;
    let (meta, _) = rest.split_once(',')?;
    meta.split(';').next().filter(|m| !m.is_empty())
}

/// Decode the bytes carried by a base64 data URL.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, AudioError> {
    let rest = data_url
        .trim()
        .strip_prefix("data:")
        .ok_or(AudioError::NotDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(AudioError::NotDataUrl)?;
    if !meta.split(';').any(|part| part == "base64") {
        return Err(AudioError::NotBase64);
    }
    Ok(STANDARD.decode(payload.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wav_data_url() {
        let url = format!("data:audio/wav;base64,{}", STANDARD.encode(b"RIFF1234WAVE"));
        assert_eq!(decode_data_url(&url).unwrap(), b"RIFF1234WAVE");
        assert_eq!(media_type(&url), Some("audio/wav"));
    }

    #[test]
    fn rejects_plain_urls() {
        assert!(matches!(
            decode_data_url("https://cdn.example.com/a.wav"),
            Err(AudioError::NotDataUrl)
        ));
        assert!(media_type("https://cdn.example.com/a.wav").is_none());
    }

    #[test]
    fn rejects_non_base64_data_url() {
        assert!(matches!(
            decode_data_url("data:audio/wav,RIFF"),
            Err(AudioError::NotBase64)
        ));
    }

    #[test]
    fn rejects_corrupt_payload() {
        assert!(matches!(
            decode_data_url("data:audio/wav;base64,@@@"),
            Err(AudioError::Decode(_))
        ));
    }

    #[test]
    fn audio_element_honours_autoplay() {
        assert!(audio_html("data:audio/wav;base64,AAAA", true).contains("<audio controls autoplay"));
        assert!(audio_html("data:audio/wav;base64,AAAA", false).contains("<audio controls style"));
    }
}
