use crate::model::{Page, ReportMetadata};
use crate::preprocess::{LayoutDecodeError, decode_alternate_layout};

/// Parses a navigation parameter into a page index.
///
/// Negative, non-numeric and empty parameters yield `None`, which views render as "no data".
pub fn parse_page_index(param: &str) -> Option<usize> {
    param.trim().parse::<usize>().ok()
}

/// Fallible variant of [`resolve_alternate_page`] for callers that want the decode failure.
///
/// `Ok(None)` means the layout decoded but has no page at `page_index`.
pub fn try_resolve_alternate_page(
    metadata: &ReportMetadata,
    page_index: usize,
) -> Result<Option<Page>, LayoutDecodeError> {
    let layout = decode_alternate_layout(&metadata.optimal_layout)?;
    Ok(layout.pages.into_iter().nth(page_index))
}

/// Returns the alternate layout's page at `page_index`, or `None` if the embedded layout is
/// malformed or has no such page. Decode failures are logged, never returned.
pub fn resolve_alternate_page(metadata: &ReportMetadata, page_index: usize) -> Option<Page> {
    match try_resolve_alternate_page(metadata, page_index) {
        Ok(Some(page)) => Some(page),
        Ok(None) => {
            tracing::debug!(page_index, "alternate layout has no page at this index");
            None
        }
        Err(err) => {
            tracing::warn!(page_index, error = %err, "failed to parse optimal layout");
            None
        }
    }
}
