use crate::document::ParsedDocument;
use crate::error::Result;
use crate::result::ResultMap;
use tracing::debug;

/// Check every selector against `document`, in list order.
///
/// A selector with no matches records `false`; an unparsable selector aborts
/// the whole evaluation so that no partial map is ever reported.
pub fn evaluate(document: &ParsedDocument, selectors: &[String]) -> Result<ResultMap> {
    let mut results = ResultMap::with_capacity(selectors.len());

    for selector in selectors {
        let present = document.contains(selector)?;
        debug!("Selector {} -> {}", selector, present);
        results.insert(selector.as_str(), present);
    }

    Ok(results)
}
