use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a scraped relative link against a base URL without letting it
/// escape the base URL's directory tree
///
/// # Resolution Steps
///
/// 1. Parse the base URL; reject if malformed
/// 2. Take the base directory: the base path up to and including its last `/`
/// 3. Split the relative link into path and query (fragments are dropped;
///    an absolute link only contributes its path and query)
/// 4. Count the `../` segments in the relative path; reject if there are more
///    than the base directory has levels
/// 5. Join the relative path onto `scheme://host/base-directory/`
/// 6. Set the query to the relative link's query (the base query is never
///    inherited)
///
/// # Arguments
///
/// * `base` - The page the link was found on
/// * `relative` - The link as written in the page
///
/// # Returns
///
/// * `Ok(Url)` - The resolved URL, always on the base URL's scheme and host
/// * `Err(UrlError::PathTraversal)` - The link climbs above the site root
/// * `Err(UrlError::Parse)` - The base or the joined URL could not be parsed
///
/// # Examples
///
/// ```
/// use catalog_crawl::url::resolve_within;
///
/// let url = resolve_within(
///     "https://books.toscrape.com/catalogue/category/books/travel_2/index.html",
///     "../../../its-only-the-himalayas_981/index.html",
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://books.toscrape.com/catalogue/its-only-the-himalayas_981/index.html"
/// );
///
/// assert!(resolve_within("https://example.com/a/page.html", "../../etc/passwd").is_err());
/// ```
pub fn resolve_within(base: &str, relative: &str) -> UrlResult<Url> {
    let base_url =
        Url::parse(base).map_err(|e| UrlError::Parse(format!("base '{}': {}", base, e)))?;

    let base_path = base_url.path();
    let base_dir = match base_path.rfind('/') {
        Some(idx) => &base_path[..=idx],
        None => "/",
    };

    let (rel_path, rel_query) = split_relative(relative);

    let available = base_dir.matches('/').count().saturating_sub(1);
    let traversals = rel_path.matches("../").count();
    if traversals > available {
        return Err(UrlError::PathTraversal {
            base: base.to_string(),
            relative: relative.to_string(),
        });
    }

    let mut root = base_url.clone();
    root.set_path(base_dir);
    root.set_query(None);
    root.set_fragment(None);

    let mut resolved = root
        .join(&rel_path)
        .map_err(|e| UrlError::Parse(format!("relative '{}': {}", relative, e)))?;
    resolved.set_query(rel_query.as_deref());
    resolved.set_fragment(None);

    Ok(resolved)
}

/// Splits a link into its path and non-empty query
fn split_relative(relative: &str) -> (String, Option<String>) {
    let relative = relative.trim();

    if let Ok(absolute) = Url::parse(relative) {
        return (
            absolute.path().to_string(),
            absolute.query().filter(|q| !q.is_empty()).map(str::to_string),
        );
    }

    let without_fragment = relative.split('#').next().unwrap_or_default();
    let (mut path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    };

    // Scheme-relative links ("//host/path") keep only their path
    if let Some(rest) = path.strip_prefix("//") {
        path = rest.find('/').map(|idx| &rest[idx..]).unwrap_or("/");
    }

    (
        path.to_string(),
        query.filter(|q| !q.is_empty()).map(str::to_string),
    )
}
