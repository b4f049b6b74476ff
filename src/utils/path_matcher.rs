//! Path containment check between the requested and the loaded URL.
//!
//! Shops commonly answer a sold-out or invalid offer by redirecting to a
//! listing page. Comparing paths (not full URLs) catches that move while
//! tolerating query-string variants and extra trailing segments.

use url::Url;

use crate::domain::entities::VerificationResult;

/// Returns the path component of a URL.
///
/// Scheme, host, query and fragment are dropped. Input that does not parse
/// as an absolute URL (e.g. a bare `/p/x?variant=1`) is cut at the first
/// `?` or `#` and the remainder is treated as the path.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_path("https://shop.test/p/x?v=1#top"), "/p/x");
/// assert_eq!(extract_path("/p/x?v=1"), "/p/x");
/// ```
pub fn extract_path(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) => raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Strips a single trailing separator.
fn normalize(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Decides whether `current_url` still shows the product at `target_url`.
///
/// Verified iff the target path, minus one trailing `/`, is a substring of
/// the current path minus one trailing `/`.
///
/// Note: a sibling route that extends the target path also passes
/// (`/p/x` is contained in `/p/x-pro`).
pub fn verify(target_url: &str, current_url: &str) -> VerificationResult {
    let target_path = extract_path(target_url);
    let current_path = extract_path(current_url);

    if normalize(&current_path).contains(normalize(&target_path)) {
        VerificationResult::Verified
    } else {
        VerificationResult::Redirected
    }
}
