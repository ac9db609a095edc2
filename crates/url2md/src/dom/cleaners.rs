// ABOUTME: Noise removal: structurally deletes every element matching the noise selector chain.
// ABOUTME: Selectors are independent, so removal order does not change the result.

use dom_query::Document;
use tracing::debug;

use crate::extractors::compiled::get_or_compile;

/// Removes every element matching any of `selectors` from `doc`.
///
/// Invalid selectors are skipped. Returns the number of removed subtrees.
pub fn remove_noise<'s, I>(doc: &Document, selectors: I) -> usize
where
    I: IntoIterator<Item = &'s str>,
{
    let mut removed = 0;
    for css in selectors {
        let Some(matcher) = get_or_compile(css) else {
            debug!(selector = css, "skipping invalid noise selector");
            continue;
        };
        let matched = doc.select_matcher(&matcher);
        let count = matched.length();
        if count > 0 {
            matched.remove();
            removed += count;
        }
    }
    removed
}
