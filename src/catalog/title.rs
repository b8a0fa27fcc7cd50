use crate::types::ParsedEntry;
use once_cell::sync::Lazy;
use regex::Regex;

// Greedy name, then the last "(origin)" group reachable from the start of the title.
// Origins cannot contain ')', so nested parentheses in the origin never match.
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)\s\(([^)]+)\)").expect("title pattern is valid")
});

/// Split a listing title of the form `Name (Origin)`.
///
/// Returns `None` for titles without a parenthesized origin; callers skip those.
pub fn parse_title(title: &str) -> Option<ParsedEntry> {
    let caps = TITLE_RE.captures(title)?;
    Some(ParsedEntry {
        name: caps.get(1)?.as_str().to_string(),
        origin: caps.get(2)?.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, origin: &str) -> Option<ParsedEntry> {
        Some(ParsedEntry { name: name.to_string(), origin: origin.to_string() })
    }

    #[test]
    fn splits_name_and_origin() {
        assert_eq!(parse_title("Spider-Man (Earth-616)"), entry("Spider-Man", "Earth-616"));
    }

    #[test]
    fn title_without_origin_is_skipped() {
        assert_eq!(parse_title("Galactus"), None);
    }

    #[test]
    fn name_absorbs_earlier_parentheticals() {
        assert_eq!(
            parse_title("Iron Man (House of M) (Earth-9997)"),
            entry("Iron Man (House of M)", "Earth-9997")
        );
    }

    #[test]
    fn requires_whitespace_before_paren() {
        assert_eq!(parse_title("Thor(Earth-616)"), None);
    }

    #[test]
    fn empty_origin_does_not_match() {
        assert_eq!(parse_title("Nobody ()"), None);
    }

    #[test]
    fn unclosed_origin_does_not_match() {
        assert_eq!(parse_title("Loki (Earth-616"), None);
    }

    #[test]
    fn trailing_text_after_origin_is_ignored() {
        assert_eq!(parse_title("Hulk (Earth-616) draft"), entry("Hulk", "Earth-616"));
    }

    #[test]
    fn keeps_unicode_names() {
        assert_eq!(parse_title("Zoë Ashe (Earth-616)"), entry("Zoë Ashe", "Earth-616"));
    }
}
