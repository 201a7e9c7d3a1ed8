use mcnpkit_utils::StringExt;

use super::Line;

/// Merge continuations and separate comments from card text
///
/// - blank lines are dropped
/// - full-line comments and `$` inline comments are held back and emitted
///   as [Line::Comment] entries just before the next new card
/// - a line with at least 4 leading spaces, or following a card that ends
///   in `&`, is appended to the current card
pub(crate) fn normalise(lines: &[&str]) -> Vec<Line> {
    let mut output = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut card: Option<String> = None;

    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        if is_comment(line) {
            pending.push(comment_text(line));
            continue;
        }

        let (text, inline) = match line.split_once('$') {
            Some((text, comment)) => (text, Some(comment.trim())),
            None => (*line, None),
        };

        // nothing but an inline comment
        if text.trim().is_empty() {
            pending.extend(inline.filter(|c| !c.is_empty()).map(String::from));
            continue;
        }

        let continues = line.leading_spaces() >= 4
            || card.as_ref().is_some_and(|c| c.trim_end().ends_with('&'));

        match card {
            Some(ref mut current) if continues => {
                let merged = current.trim_end().trim_end_matches('&').trim_end();
                *current = [merged, text.trim()].join(" ").trim().to_string();
            }
            _ => {
                if let Some(previous) = card.take() {
                    output.push(finish(previous));
                }
                output.extend(pending.drain(..).map(Line::Comment));
                card = Some(text.trim().to_string());
            }
        }

        if let Some(comment) = inline.filter(|c| !c.is_empty()) {
            pending.push(comment.to_string());
        }
    }

    if let Some(previous) = card {
        output.push(finish(previous));
    }
    output.extend(pending.into_iter().map(Line::Comment));
    output
}

/// First non-space character is `c`, followed by nothing, whitespace, or
/// anything that could not continue a keyword such as `cut:n`
pub(crate) fn is_comment(line: &str) -> bool {
    let mut chars = line.trim_start().chars();
    match (chars.next(), chars.next()) {
        (Some('c' | 'C'), None) => true,
        (Some('c' | 'C'), Some(next)) => !next.is_alphanumeric(),
        _ => false,
    }
}

fn comment_text(line: &str) -> String {
    line.trim()[1..].trim().to_string()
}

/// Drop any dangling continuation marker
fn finish(card: String) -> Line {
    Line::Card(card.trim_end().trim_end_matches('&').trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Line {
        Line::Card(s.to_string())
    }

    fn comment(s: &str) -> Line {
        Line::Comment(s.to_string())
    }

    #[test]
    fn comment_lines() {
        assert!(is_comment("c"));
        assert!(is_comment("C a comment"));
        assert!(is_comment("  c---- separator"));
        assert!(!is_comment("cut:n j 0.1"));
        assert!(!is_comment("ctme 10"));
        assert!(!is_comment("1 px 0"));
    }

    #[test]
    fn continuation_by_indent() {
        let lines = ["1 1 -7.8 -1 2", "     -3 imp:n=1", "2 0 3"];
        assert_eq!(
            normalise(&lines),
            vec![card("1 1 -7.8 -1 2 -3 imp:n=1"), card("2 0 3")]
        );
    }

    #[test]
    fn continuation_by_ampersand() {
        let lines = ["m1 1001 2 &", "8016 1", "m2 6000 1 &"];
        assert_eq!(normalise(&lines), vec![card("m1 1001 2 8016 1"), card("m2 6000 1")]);
    }

    #[test]
    fn short_indent_is_a_new_card() {
        let lines = ["1 px 0", "  2 py 0"];
        assert_eq!(normalise(&lines), vec![card("1 px 0"), card("2 py 0")]);
    }

    #[test]
    fn comments_precede_the_next_card() {
        let lines = [
            "c ---- planes ----",
            "1 px 0 $ origin",
            "",
            "c second",
            "2 py 0",
            "c trailing",
        ];
        assert_eq!(
            normalise(&lines),
            vec![
                comment("---- planes ----"),
                card("1 px 0"),
                comment("origin"),
                comment("second"),
                card("2 py 0"),
                comment("trailing"),
            ]
        );
    }

    #[test]
    fn inline_comment_only() {
        let lines = ["1 px 0", "$ second plane", "2 py 0"];
        assert_eq!(
            normalise(&lines),
            vec![card("1 px 0"), comment("second plane"), card("2 py 0")]
        );
    }

    #[test]
    fn comment_inside_continuation() {
        let lines = ["1 0 -1", "c note", "     2", "2 0 1"];
        assert_eq!(
            normalise(&lines),
            vec![card("1 0 -1 2"), comment("note"), card("2 0 1")]
        );
    }
}
