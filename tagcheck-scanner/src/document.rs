use crate::error::{CheckError, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// A parsed HTML document that can be queried with CSS selectors.
///
/// Parsing is best-effort: malformed or partial markup is repaired the way a
/// browser would and never produces an error.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn parse(html: &str) -> Self {
        debug!("Parsing document ({} bytes)", html.len());
        Self {
            html: Html::parse_document(html),
        }
    }

    fn compile(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| CheckError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    /// All elements matched by `selector`, in document order
    pub fn query(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let compiled = Self::compile(selector)?;
        Ok(self.html.select(&compiled).collect())
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        let compiled = Self::compile(selector)?;
        Ok(self.html.select(&compiled).count())
    }

    /// True when `selector` matches at least one element
    pub fn contains(&self, selector: &str) -> Result<bool> {
        let compiled = Self::compile(selector)?;
        Ok(self.html.select(&compiled).next().is_some())
    }
}
