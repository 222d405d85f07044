//! URL handling module for Cinegraph
//!
//! Site links are root-relative (`/wiki/Title`), so turning an `href` into
//! an absolute URL is a plain join onto the site's base URL. Normalization is
//! only used to key the optional visited set.

mod normalize;

use url::Url;

pub use normalize::normalize_url;

/// Base URL of the site being crawled
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

/// Joins a root-relative `href` onto the site base URL
///
/// This is a string concatenation: the base URL carries no trailing slash
/// and site links start with `/`.
///
/// # Examples
///
/// ```
/// use cinegraph::url::resolve_href;
///
/// assert_eq!(
///     resolve_href("https://en.wikipedia.org", "/wiki/Heat_(1995_film)"),
///     "https://en.wikipedia.org/wiki/Heat_(1995_film)"
/// );
/// ```
pub fn resolve_href(base_url: &str, href: &str) -> String {
    format!("{}{}", base_url, href)
}

/// Returns true if `url` points at the same scheme, host and port as `base_url`
///
/// Unparsable URLs are never considered same-site.
pub fn is_same_site(base_url: &str, url: &str) -> bool {
    match (Url::parse(base_url), Url::parse(url)) {
        (Ok(base), Ok(url)) => {
            base.scheme() == url.scheme()
                && base
                    .host_str()
                    .zip(url.host_str())
                    .is_some_and(|(a, b)| a.eq_ignore_ascii_case(b))
                && base.port_or_known_default() == url.port_or_known_default()
        }
        _ => false,
    }
}
