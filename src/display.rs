// Presentation of a fetched article: a banner with the centered title,
// followed by the extract wrapped to the terminal width.

use crate::api::Article;
use std::io::{self, Write};
use textwrap::{Options, WordSplitter, WrapAlgorithm};

pub const NO_CONTENT: &str = "No content found.";

/// Print an article, or the "no content" line when either part is absent
/// or empty.
pub fn display_content<W: Write>(
    out: &mut W,
    title: Option<&str>,
    body: Option<&str>,
    width: usize,
) -> io::Result<()> {
    let (title, body) = match (title, body) {
        (Some(t), Some(b)) if !t.is_empty() && !b.is_empty() => (t, b),
        _ => return writeln!(out, "{NO_CONTENT}"),
    };

    let border = "=".repeat(width);
    writeln!(out)?;
    writeln!(out, "{border}")?;
    writeln!(out, "{title:^width$}")?;
    writeln!(out, "{border}")?;
    writeln!(out)?;
    for line in wrap_body(body, width) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn display_article<W: Write>(out: &mut W, article: &Article, width: usize) -> io::Result<()> {
    display_content(out, article.title(), article.body(), width)
}

/// Greedy word wrap that never splits or hyphenates a word. Paragraph
/// breaks in the extract survive; runs of blank lines collapse to one.
fn wrap_body(body: &str, width: usize) -> Vec<String> {
    let options = Options::new(width)
        .break_words(false)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = true;
    for paragraph in body.lines() {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;
        lines.extend(
            textwrap::wrap(paragraph, &options)
                .into_iter()
                .map(|line| line.into_owned()),
        );
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(title: Option<&str>, body: Option<&str>, width: usize) -> String {
        let mut out = Vec::new();
        display_content(&mut out, title, body, width).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn missing_parts_print_only_the_notice() {
        assert_eq!(render(None, None, 80), "No content found.\n");
        assert_eq!(render(Some("Title"), None, 80), "No content found.\n");
        assert_eq!(render(None, Some("Body"), 80), "No content found.\n");
        assert_eq!(render(Some(""), Some("Body"), 80), "No content found.\n");
    }

    #[test]
    fn banner_is_exactly_width_wide() {
        let text = render(Some("Rust"), Some("A language."), 40);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(40));
        assert_eq!(lines[2].len(), 40);
        assert_eq!(lines[2].trim(), "Rust");
        assert_eq!(lines[3], "=".repeat(40));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "A language.");
        assert!(text.ends_with("A language.\n\n"));
    }

    #[test]
    fn title_is_centered() {
        let text = render(Some("ab"), Some("x"), 10);
        let title_line = text.lines().nth(2).unwrap();
        assert_eq!(title_line, "    ab    ");
    }

    #[test]
    fn wrapping_respects_width_and_word_boundaries() {
        let words: Vec<String> = (0..200).map(|i| format!("word{}", i % 37)).collect();
        let body = words.join(" ");
        let text = render(Some("Long"), Some(&body), 80);

        let body_lines: Vec<&str> = text.lines().skip(5).filter(|l| !l.is_empty()).collect();
        assert!(body_lines.len() > 1);
        for line in &body_lines {
            assert!(line.chars().count() <= 80, "line too long: {line:?}");
        }
        let rejoined: Vec<&str> = body_lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn long_words_are_not_split() {
        let long = "x".repeat(30);
        let lines = wrap_body(&format!("short {long} tail"), 20);
        assert_eq!(lines, vec!["short".to_string(), long, "tail".to_string()]);
    }

    #[test]
    fn paragraphs_are_kept_and_blank_runs_collapse() {
        let lines = wrap_body("\nFirst para.\n\n\n\n== History ==\nSecond.\n\n", 80);
        assert_eq!(lines, vec!["First para.", "", "== History ==", "Second."]);
    }

    #[test]
    fn article_wrapper_matches_parts() {
        let mut out = Vec::new();
        display_article(&mut out, &Article::NotFound, 80).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No content found.\n");
    }
}
