//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! $ storefront-kit srcset https://res.cloudinary.com/demo/upload/a.jpg --width 800
//! https://res.cloudinary.com/demo/upload/w_800,q_auto,f_webp/a.jpg 1x
//! https://res.cloudinary.com/demo/upload/w_800,q_auto,f_jpg/a.jpg 2x
//! ```

use crate::catalog::RewriteRecord;

/// Placeholder printed when no responsive set is available.
pub const NO_SRCSET: &str = "(none)";

pub fn format_url(src: &str, url: &str) -> Vec<String> {
    let mut lines = vec![url.to_string()];
    if src == url {
        lines.push("    unchanged: not a recognized delivery URL".to_string());
    }
    lines
}

/// One candidate per line (`1x` then `2x`), or [`NO_SRCSET`].
pub fn format_srcset(candidates: Option<(&str, &str)>) -> Vec<String> {
    match candidates {
        Some((one_x, two_x)) => vec![format!("{one_x} 1x"), format!("{two_x} 2x")],
        None => vec![NO_SRCSET.to_string()],
    }
}

/// Summary line for a bulk rewrite, e.g. `3 references: 2 rewritten, 1 passed through`.
pub fn format_rewrite_summary(records: &[RewriteRecord]) -> Vec<String> {
    let rewritten = records.iter().filter(|r| r.src != r.url).count();
    let passed = records.len() - rewritten;
    let noun = if records.len() == 1 {
        "reference"
    } else {
        "references"
    };
    vec![format!(
        "{} {}: {} rewritten, {} passed through",
        records.len(),
        noun,
        rewritten,
        passed
    )]
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_url(src: &str, url: &str) {
    print_lines(format_url(src, url));
}

pub fn print_srcset(candidates: Option<(&str, &str)>) {
    print_lines(format_srcset(candidates));
}

/// Summary goes to stderr so stdout stays valid JSON.
pub fn print_rewrite_summary(records: &[RewriteRecord]) {
    for line in format_rewrite_summary(records) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn url_notes_pass_through() {
        let lines = format_url("https://example.com/a.jpg", "https://example.com/a.jpg");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("unchanged"));
    }

    #[test]
    fn rewritten_url_is_a_single_line() {
        let lines = format_url(
            "https://res.cloudinary.com/d/upload/a.jpg",
            "https://res.cloudinary.com/d/upload/w_400,q_auto,f_webp/a.jpg",
        );
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn srcset_prints_one_candidate_per_line() {
        let lines = format_srcset(Some(("a.webp", "a.jpg")));
        assert_eq!(lines, vec!["a.webp 1x", "a.jpg 2x"]);
    }

    #[test]
    fn srcset_candidate_with_comma_space_stays_on_one_line() {
        let webp = "https://res.cloudinary.com/d/upload/w_400,q_auto,f_webp/red, blue.jpg";
        let jpg = "https://res.cloudinary.com/d/upload/w_400,q_auto,f_jpg/red, blue.jpg";
        let lines = format_srcset(Some((webp, jpg)));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("{webp} 1x"));
        assert_eq!(lines[1], format!("{jpg} 2x"));
    }

    #[test]
    fn missing_srcset_prints_placeholder() {
        assert_eq!(format_srcset(None), vec!["(none)"]);
    }

    #[test]
    fn summary_counts_rewrites() {
        let records = vec![
            RewriteRecord {
                src: json!("a"),
                url: json!("b"),
                srcset: None,
            },
            RewriteRecord {
                src: Value::Null,
                url: Value::Null,
                srcset: None,
            },
        ];
        assert_eq!(
            format_rewrite_summary(&records),
            vec!["2 references: 1 rewritten, 1 passed through"]
        );
    }

    #[test]
    fn summary_singular() {
        let records = vec![RewriteRecord {
            src: json!(1),
            url: json!(1),
            srcset: None,
        }];
        assert_eq!(
            format_rewrite_summary(&records),
            vec!["1 reference: 0 rewritten, 1 passed through"]
        );
    }
}
