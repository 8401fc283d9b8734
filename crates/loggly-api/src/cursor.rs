//! Continuation-token extraction from `next` URLs.

/// Pull the `next` token out of a continuation URL.
///
/// Splits on the first `?`, then on `&`, and returns the value of the first
/// parameter named exactly `next`. The value is returned as-is; no decoding
/// or URL validation happens here.
pub fn extract_next_token(next_url: &str) -> Option<String> {
    let (_, query) = next_url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("next="))
        .map(String::from)
}
