//! Small text derivations shared by the model layer and the pages.

use pulldown_cmark::{Event, Parser, TagEnd};

pub const EXCERPT_LEN: usize = 160;
pub const WORDS_PER_MINUTE: usize = 200;

/// Flatten markdown to plain text, with block boundaries collapsed to
/// single spaces so adjacent blocks don't glue into one word.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `max_len` chars, snapping back to a word boundary
/// and appending an ellipsis. Short input comes back untouched.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    let snapped = match cut.rfind(char::is_whitespace) {
        Some(i) => cut[..i].trim_end(),
        None => cut.as_str(),
    };
    format!("{}...", snapped)
}

/// Reader-facing excerpt derived from a markdown body.
pub fn excerpt(markdown: &str, max_len: usize) -> String {
    truncate_text(&plain_text(markdown), max_len)
}

/// `"<n> min read"` at 200 words per minute, never less than a minute.
pub fn reading_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

/// `local@domain.tld` shape check; no whitespace, exactly one `@`, a dot
/// somewhere inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_markup() {
        let text = plain_text("# Heading\n\nSome **bold** text with a [link](https://x).");
        assert_eq!(text, "Heading Some bold text with a link.");
    }

    #[test]
    fn truncate_short_text_is_identity() {
        assert_eq!(truncate_text("short enough", 160), "short enough");
    }

    #[test]
    fn truncate_snaps_to_word_boundary() {
        // cutting at 10 chars lands inside "jumped"; the partial word goes
        let out = truncate_text("the fox jumped over", 10);
        assert_eq!(out, "the fox...");
    }

    #[test]
    fn truncate_without_whitespace_keeps_cut() {
        let out = truncate_text("abcdefghijklmnop", 5);
        assert_eq!(out, "abcde...");
    }

    #[test]
    fn excerpt_of_long_body_ends_with_ellipsis() {
        let body = "word ".repeat(100);
        let out = excerpt(&body, EXCERPT_LEN);
        assert!(out.ends_with("..."));
        assert!(out.chars().count() <= EXCERPT_LEN + 3);
    }

    #[test]
    fn reading_time_rounds_up() {
        let two_hundred = vec!["word"; 200].join(" ");
        assert_eq!(reading_time(&two_hundred), "1 min read");
        let two_hundred_one = vec!["word"; 201].join(" ");
        assert_eq!(reading_time(&two_hundred_one), "2 min read");
    }

    #[test]
    fn reading_time_of_empty_text_is_one_minute() {
        assert_eq!(reading_time(""), "1 min read");
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("trailing@dot."));
        assert!(!is_valid_email("@example.com"));
    }
}
