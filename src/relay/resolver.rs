//! Outbound request URL construction for the resolution API.

use crate::config::{RESOLVER_HOST, RESOLVER_KEY};

/// Builds the outbound API request URL for a raw share link.
///
/// Input that already targets the resolver host is treated as a pre-built
/// request and passed through unchanged. Anything else is form-urlencoded
/// (spaces become `+`) and substituted into the fixed template. The input is
/// deliberately not validated as a URL here; garbage surfaces as a fetch
/// failure downstream, which is the reply the user gets anyway.
#[must_use]
pub fn build_request_url(raw_link: &str) -> String {
    if raw_link.contains(RESOLVER_HOST) {
        return raw_link.to_string();
    }
    let encoded: String = url::form_urlencoded::byte_serialize(raw_link.as_bytes()).collect();
    format!("https://{RESOLVER_HOST}/?key={RESOLVER_KEY}&link={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_is_encoded_into_template() {
        let url = build_request_url("https://1024terabox.com/s/abc_DEF");
        assert_eq!(
            url,
            "https://teradl.tiiny.io/?key=RushVx&link=https%3A%2F%2F1024terabox.com%2Fs%2Fabc_DEF"
        );
    }

    #[test]
    fn test_prebuilt_request_passes_through() {
        let prebuilt = "https://teradl.tiiny.io/?key=RushVx&link=xyz";
        assert_eq!(build_request_url(prebuilt), prebuilt);
    }

    #[test]
    fn test_spaces_encode_as_plus() {
        let url = build_request_url("not a url");
        assert_eq!(url, "https://teradl.tiiny.io/?key=RushVx&link=not+a+url");
    }
}
