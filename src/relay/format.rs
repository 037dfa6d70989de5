//! Rendering of extracted items into a Telegram HTML reply.
//!
//! Title, URL, and size all come from the external API response, so every
//! one of them is escaped before being placed into markup. Skipping this
//! would let the API inject tags into our replies.

use crate::config::FOOTER;
use crate::relay::parser::DownloadItem;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Renders items as newline-separated HTML anchors followed by the
/// attribution footer.
///
/// Each line is `<a href="url">title</a>`, with an ` — size` suffix only
/// when the size label is non-empty. Items keep their input order.
#[must_use]
pub fn render(items: &[DownloadItem]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(items.len() + 2);
    for item in items {
        let mut line = format!(
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(&item.url),
            encode_text(&item.title)
        );
        if !item.size.is_empty() {
            line.push_str(" — ");
            line.push_str(&encode_text(&item.size));
        }
        lines.push(line);
    }
    lines.push(String::new());
    lines.push(FOOTER.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, url: &str, size: &str) -> DownloadItem {
        DownloadItem {
            title: title.to_string(),
            url: url.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn test_single_item_with_size() {
        let rendered = render(&[item("A", "https://x", "1MB")]);
        assert_eq!(
            rendered,
            "<a href=\"https://x\">A</a> — 1MB\n\n— Powered by @Regnis"
        );
    }

    #[test]
    fn test_empty_size_omits_suffix() {
        let rendered = render(&[item("A", "https://x", "")]);
        assert_eq!(rendered, "<a href=\"https://x\">A</a>\n\n— Powered by @Regnis");
    }

    #[test]
    fn test_markup_in_title_is_escaped() {
        let rendered = render(&[item("<b>x</b> & y", "https://x", "")]);
        assert!(rendered.contains("&lt;b&gt;x&lt;/b&gt; &amp; y"));
        assert!(!rendered.contains("<b>"));
    }

    #[test]
    fn test_quote_in_url_cannot_break_out_of_href() {
        let rendered = render(&[item("A", "https://x/\"><script>", "")]);
        assert!(!rendered.contains("\"><script>"));
    }

    #[test]
    fn test_items_rendered_in_order() {
        let rendered = render(&[item("one", "https://1", ""), item("two", "https://2", "")]);
        let one = rendered.find(">one<").expect("first item missing");
        let two = rendered.find(">two<").expect("second item missing");
        assert!(one < two);
    }

    #[test]
    fn test_footer_present_even_for_no_items() {
        assert_eq!(render(&[]), "\n— Powered by @Regnis");
    }
}
