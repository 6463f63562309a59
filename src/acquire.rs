//! Turning PDFs and web pages into plain menu text.
//!
//! PDF decoding needs the `pdf` feature, fetching and HTML cleaning the `web`
//! feature. Without them the entry points return
//! [`MenuError::CapabilityUnavailable`] instead of failing to compile callers.

use std::path::Path;
use std::time::Duration;

use crate::error::{MenuError, Result};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(feature = "web")]
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header"];

#[cfg(feature = "pdf")]
pub fn pdf_text_from_bytes(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)?;
    Ok(text)
}

#[cfg(not(feature = "pdf"))]
pub fn pdf_text_from_bytes(_bytes: &[u8]) -> Result<String> {
    Err(MenuError::CapabilityUnavailable("PDF extraction"))
}

pub async fn pdf_text_from_path(path: &Path) -> Result<String> {
    if !cfg!(feature = "pdf") {
        return Err(MenuError::CapabilityUnavailable("PDF extraction"));
    }
    let bytes = tokio::fs::read(path).await?;
    // Decoding is CPU-bound and may panic on malformed files; keep it off the runtime.
    tokio::task::spawn_blocking(move || pdf_text_from_bytes(&bytes)).await?
}

/// Downloads pages and reduces them to text lines.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    #[cfg(feature = "web")]
    client: reqwest::Client,
}

#[cfg(feature = "web")]
impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
            .no_proxy()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html_to_text(&html))
    }
}

#[cfg(not(feature = "web"))]
impl PageFetcher {
    pub fn new(_timeout: Duration) -> Result<Self> {
        Ok(Self {})
    }

    pub async fn fetch_text(&self, _url: &str) -> Result<String> {
        Err(MenuError::CapabilityUnavailable("Web scraping"))
    }
}

/// Visible text of an HTML document, one trimmed non-empty line per line.
#[cfg(feature = "web")]
pub fn html_to_text(html: &str) -> String {
    use scraper::{Html, Node};

    let doc = Html::parse_document(html);
    let mut lines = Vec::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => SKIPPED_ELEMENTS.contains(&element.name()),
            _ => false,
        });
        if hidden {
            continue;
        }
        lines.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "web")]
    #[test]
    fn html_to_text_drops_chrome_and_scripts() {
        let html = r#"<html><head><style>body { color: red; }</style></head>
            <body>
              <header>Reservieren</header>
              <nav><a href="/">Home</a></nav>
              <h1>Gasthaus Krone</h1>
              <div>
                Hauptgang
                <p>  Zürcher Geschnetzeltes 38.50  </p>
              </div>
              <script>var price = 99.00;</script>
              <footer>Impressum</footer>
            </body></html>"#;

        let text = html_to_text(html);
        assert_eq!(text, "Gasthaus Krone\nHauptgang\nZürcher Geschnetzeltes 38.50");
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn garbage_bytes_are_not_a_pdf() {
        assert!(pdf_text_from_bytes(b"definitely not a pdf").is_err());
    }

    #[tokio::test]
    async fn missing_pdf_file_is_an_io_error() {
        let err = pdf_text_from_path(Path::new("/nonexistent/menu.pdf"))
            .await
            .unwrap_err();
        if cfg!(feature = "pdf") {
            assert!(matches!(err, MenuError::Io(_)));
        } else {
            assert!(matches!(err, MenuError::CapabilityUnavailable(_)));
        }
    }
}
