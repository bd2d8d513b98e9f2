//! Terminal presentation of [`PipelineEvent`]s.
//!
//! [`ConsolePresenter::render`] turns each event into the text block to
//! print (or nothing); the binary owns the actual writing.

use crate::config::UiConfig;
use crate::market::audio::audio_html;
use crate::pipeline::{PipelineEvent, PipelineState};

pub const NO_AUDIO_NOTICE: &str = "No audio response available.";
pub const NO_ANSWER_NOTICE: &str = "No answer could be generated.";

pub struct ConsolePresenter {
    ui: UiConfig,
}

impl ConsolePresenter {
    pub fn new(ui: UiConfig) -> Self {
        Self { ui }
    }

    pub fn render(&self, event: &PipelineEvent) -> Option<String> {
        match event {
            PipelineEvent::State(state) => match state {
                PipelineState::Transcribing
                | PipelineState::FetchingMarketData
                | PipelineState::AwaitingAnswer => Some(format!("### {}…", state.label())),
                PipelineState::DataReady => Some("Market data retrieved successfully".into()),
                _ => None,
            },

            PipelineEvent::Understood {
                transcript,
                intent,
                ticker,
            } => {
                let intent = serde_json::to_string_pretty(intent).unwrap_or_default();
                Some(format!(
                    "You said:\n> {transcript}\n\nIntent ({ticker}):\n{intent}"
                ))
            }

            PipelineEvent::MarketData(data) if self.ui.show_market_data => {
                let raw = serde_json::to_string_pretty(data.as_value()).unwrap_or_default();
                Some(format!("Raw market data:\n{raw}"))
            }
            PipelineEvent::MarketData(_) => None,

            PipelineEvent::Headline(headline) => Some(if self.ui.render_html {
                headline.to_html()
            } else {
                format!("What's making headlines…\n{}", headline.to_text())
            }),

            PipelineEvent::HeadlinesCleared => None,

            PipelineEvent::Answer(answer) => {
                let mut out = format!("## {}'s Answer\n", self.ui.assistant_name);
                if answer.has_text() {
                    out.push_str(&answer.text);
                } else {
                    out.push_str(NO_ANSWER_NOTICE);
                }
                out.push('\n');
                match &answer.audio {
                    Some(src) if self.ui.render_html => {
                        out.push_str(&audio_html(src, self.ui.autoplay_audio));
                    }
                    Some(_) => out.push_str("Audio response available."),
                    None => out.push_str(NO_AUDIO_NOTICE),
                }
                Some(out)
            }

            PipelineEvent::Failed { stage, message } => {
                Some(format!("Error: the {stage} stage failed ({message})."))
            }

            PipelineEvent::Rejected { message } => Some(format!("Error: {message}.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Stage;
    use crate::market::{Article, Headline, Intent, MarketData};
    use crate::pipeline::FinalAnswer;
    use serde_json::json;

    fn presenter() -> ConsolePresenter {
        ConsolePresenter::new(UiConfig::default())
    }

    fn answer(text: &str, audio: Option<&str>) -> PipelineEvent {
        PipelineEvent::Answer(FinalAnswer {
            text: text.into(),
            audio: audio.map(str::to_string),
            failure: None,
        })
    }

    #[test]
    fn answer_without_audio_says_so() {
        let out = presenter().render(&answer("Buy NKE", None)).unwrap();
        assert!(out.starts_with("## V.E.R.O.N.I.C.A's Answer"));
        assert!(out.contains("Buy NKE"));
        assert!(out.contains(NO_AUDIO_NOTICE));
    }

    #[test]
    fn empty_answer_uses_fallback_text() {
        let out = presenter().render(&answer("", None)).unwrap();
        assert!(out.contains(NO_ANSWER_NOTICE));
    }

    #[test]
    fn html_mode_embeds_audio() {
        let ui = UiConfig {
            render_html: true,
            autoplay_audio: false,
            ..UiConfig::default()
        };
        let out = ConsolePresenter::new(ui)
            .render(&answer("Hold", Some("data:audio/wav;base64,UklGRg==")))
            .unwrap();
        assert!(out.contains(r#"<source src="data:audio/wav;base64,UklGRg==""#));
        assert!(!out.contains("autoplay"));
    }

    #[test]
    fn assistant_name_is_configurable() {
        let ui = UiConfig {
            assistant_name: "Analyst".into(),
            ..UiConfig::default()
        };
        let out = ConsolePresenter::new(ui).render(&answer("x", None)).unwrap();
        assert!(out.starts_with("## Analyst's Answer"));
    }

    #[test]
    fn headline_text_and_html() {
        let event = PipelineEvent::Headline(Headline {
            ticker: "TSLA".into(),
            article: Article::default(),
            position: 0,
            total: 1,
        });
        let text = presenter().render(&event).unwrap();
        assert!(text.contains("TSLA in the news: No Title"));

        let html = ConsolePresenter::new(UiConfig {
            render_html: true,
            ..UiConfig::default()
        })
        .render(&event)
        .unwrap();
        assert!(html.contains("<strong>TSLA in the news:</strong>"));
    }

    #[test]
    fn market_data_respects_toggle() {
        let event = PipelineEvent::MarketData(MarketData::new(json!({ "data": {} })));
        assert!(presenter().render(&event).is_some());

        let hidden = ConsolePresenter::new(UiConfig {
            show_market_data: false,
            ..UiConfig::default()
        });
        assert!(hidden.render(&event).is_none());
    }

    #[test]
    fn understood_shows_transcript_and_ticker() {
        let out = presenter()
            .render(&PipelineEvent::Understood {
                transcript: "How is Apple doing?".into(),
                intent: Intent::from_value(json!({ "ticker": "aapl" })),
                ticker: "AAPL".into(),
            })
            .unwrap();
        assert!(out.contains("> How is Apple doing?"));
        assert!(out.contains("Intent (AAPL)"));
        assert!(out.contains("\"ticker\": \"aapl\""));
    }

    #[test]
    fn failure_names_stage() {
        let out = presenter()
            .render(&PipelineEvent::Failed {
                stage: Stage::Transcribe,
                message: "transcribe service returned HTTP 500".into(),
            })
            .unwrap();
        assert!(out.contains("the transcribe stage failed"));
    }

    #[test]
    fn cleared_and_terminal_states_render_nothing() {
        assert!(presenter().render(&PipelineEvent::HeadlinesCleared).is_none());
        assert!(presenter()
            .render(&PipelineEvent::State(PipelineState::Complete))
            .is_none());
    }
}
