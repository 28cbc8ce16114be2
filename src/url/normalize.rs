/// Normalizes a URL string to its canonical trailing-slash-stripped form
///
/// Two URLs are considered the same page iff their normalized forms are
/// string-equal. This is deliberately the only normalization performed:
/// no scheme, query, or case rewriting beyond it. All trailing slashes
/// are removed (not just one) so that the operation is idempotent and
/// `normalize_url(u) == normalize_url(&format!("{}/", u))` holds for
/// every input, including already-normalized ones.
///
/// The function is total over strings: it never fails, even on input
/// that is not a URL at all.
///
/// # Examples
///
/// ```
/// use shopscout::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/products/1/"), "https://example.com/products/1");
/// assert_eq!(normalize_url("https://example.com/products/1"), "https://example.com/products/1");
/// ```
pub fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
