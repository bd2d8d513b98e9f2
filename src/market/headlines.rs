//! Headline carousel.
//!
//! [`next_headline`] is the pure selection step: it walks an already-fetched
//! article list cyclically and never re-fetches.  [`Headline`] is the record
//! handed to the presentation layer for each tick.

use serde::Serialize;

use super::types::Article;

/// Select the article for rotation step `index`.
///
/// Returns the article at `index mod len` together with `index + 1`, or
/// `None` when there is nothing to rotate through (the caller then shows no
/// headline box at all).
///
/// ```
/// use market_analyst::market::{next_headline, Article};
///
/// let articles = vec![Article::default(), Article::default()];
/// let (_, next) = next_headline(&articles, 0).unwrap();
/// assert_eq!(next, 1);
/// assert!(next_headline(&[], 0).is_none());
/// ```
pub fn next_headline(articles: &[Article], index: usize) -> Option<(&Article, usize)> {
    if articles.is_empty() {
        return None;
    }
    Some((&articles[index % articles.len()], index.wrapping_add(1)))
}

// ---------------------------------------------------------------------------
// Headline
// ---------------------------------------------------------------------------

/// One rendered carousel frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    /// Display ticker, already upper-cased.
    pub ticker: String,
    pub article: Article,
    /// Zero-based position of `article` within the list.
    pub position: usize,
    /// Number of articles being rotated.
    pub total: usize,
}

impl Headline {
    /// HTML snippet for web front-ends.
    pub fn to_html(&self) -> String {
        format!(
            r#"<h4 style="margin:0 0 6px 0;">What's making headlines…</h4>
<div style="padding:10px;border:1px solid #e1e1e1;border-radius:6px;">
  <strong>{ticker} in the news:</strong><br>
  <span style="color:#f39c12;font-size:18px;">{title}</span><br>
  <span style="font-size:14px;">{summary}</span><br>
  <a href="{url}" target="_blank">Read full article ↗︎</a>
</div>"#,
            ticker = escape_html(&self.ticker),
            title = escape_html(&self.article.title),
            summary = escape_html(&self.article.summary),
            url = escape_html(&self.article.url),
        )
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        format!(
            "[{}/{}] {} in the news: {}\n    {}\n    {}",
            self.position + 1,
            self.total,
            self.ticker,
            self.article.title,
            self.article.summary,
            self.article.url,
        )
    }
}

/// Minimal escaping for text interpolated into HTML attributes and bodies.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("headline {i}"),
                ..Article::default()
            })
            .collect()
    }

    #[test]
    fn empty_list_yields_nothing() {
        for index in [0, 1, 99] {
            assert!(next_headline(&[], index).is_none());
        }
    }

    #[test]
    fn wraps_back_to_first_after_full_cycle() {
        for n in 1..=5 {
            let list = articles(n);
            let mut index = 0;
            let mut seen = Vec::new();
            for _ in 0..=n {
                let (article, next) = next_headline(&list, index).unwrap();
                assert_eq!(next, index + 1);
                seen.push(article.title.clone());
                index = next;
            }
            assert_eq!(seen[n], seen[0], "cycle of length {n}");
        }
    }

    #[test]
    fn preserves_order() {
        let list = articles(3);
        let titles: Vec<_> = (0..6)
            .map(|i| next_headline(&list, i).unwrap().0.title.as_str())
            .collect();
        assert_eq!(
            titles,
            [
                "headline 0",
                "headline 1",
                "headline 2",
                "headline 0",
                "headline 1",
                "headline 2"
            ]
        );
    }

    #[test]
    fn html_contains_fields_escaped() {
        let h = Headline {
            ticker: "NKE".into(),
            article: Article {
                title: "Nike <surges>".into(),
                summary: "Q3 \"beat\"".into(),
                url: "https://news.example.com/nke?a=1&b=2".into(),
            },
            position: 0,
            total: 1,
        };
        let html = h.to_html();
        assert!(html.contains("NKE in the news:"));
        assert!(html.contains("Nike &lt;surges&gt;"));
        assert!(html.contains("Q3 &quot;beat&quot;"));
        assert!(html.contains(r#"href="https://news.example.com/nke?a=1&amp;b=2""#));
    }

    #[test]
    fn text_shows_position() {
        let h = Headline {
            ticker: "AAPL".into(),
            article: Article::default(),
            position: 1,
            total: 3,
        };
        assert!(h.to_text().starts_with("[2/3] AAPL in the news: No Title"));
    }
}
