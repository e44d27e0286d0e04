//! Slug helpers for document identifiers and heading anchors.

/// Convert text to kebab-case.
///
/// - a lowercase→uppercase boundary starts a new word
/// - runs of whitespace, `_` and `-` collapse to one `-`
/// - any other non-alphanumeric character is dropped
/// - the result is lowercase with no leading or trailing `-`
///
/// | Input                  | Output               |
/// |------------------------|----------------------|
/// | `releaseDate`          | `release-date`       |
/// | `Hello World_again`    | `hello-world-again`  |
/// | `2024-03-01T00:00:00Z` | `2024-03-01t000000z` |
pub fn kebab_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_lower = false;
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
            prev_lower = false;
            continue;
        }
        if !c.is_alphanumeric() {
            continue;
        }
        if c.is_uppercase() && prev_lower {
            pending_dash = true;
        }
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        prev_lower = c.is_lowercase();
        out.extend(c.to_lowercase());
    }

    out
}

/// Anchor slug for a heading, as rendered by the heading-anchor plugin.
///
/// Lowercases, drops punctuation and turns each space into `-`.
pub fn heading_slug(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strip the last extension from a file name: `intro.mdx` → `intro`.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_release_date() {
        assert_eq!(kebab_case("2024-03-01T00:00:00Z"), "2024-03-01t000000z");
    }

    #[test]
    fn test_kebab_case_plain_date() {
        assert_eq!(kebab_case("2024-03-01"), "2024-03-01");
    }

    #[test]
    fn test_kebab_case_camel() {
        assert_eq!(kebab_case("releaseDate"), "release-date");
        assert_eq!(kebab_case("myHTTPServer"), "my-httpserver");
    }

    #[test]
    fn test_kebab_case_separators() {
        assert_eq!(kebab_case("Hello World_again"), "hello-world-again");
        assert_eq!(kebab_case("  a -- b  "), "a-b");
        assert_eq!(kebab_case("--leading"), "leading");
    }

    #[test]
    fn test_kebab_case_drops_punctuation() {
        assert_eq!(kebab_case("v1.2.0 (beta)"), "v120-beta");
        assert_eq!(kebab_case("::"), "");
    }

    #[test]
    fn test_kebab_case_unicode() {
        assert_eq!(kebab_case("Größe Änderung"), "größe-änderung");
    }

    #[test]
    fn test_heading_slug() {
        assert_eq!(heading_slug("Getting Started"), "getting-started");
        assert_eq!(heading_slug("What's `new`?"), "whats-new");
        assert_eq!(heading_slug("  API_ref  "), "api_ref");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("intro.mdx"), "intro");
        assert_eq!(strip_extension("a.b.md"), "a.b");
        assert_eq!(strip_extension("README"), "README");
        assert_eq!(strip_extension(".mdx"), ".mdx");
    }
}
