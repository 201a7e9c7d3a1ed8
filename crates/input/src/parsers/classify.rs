// nom parser combinators
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit1, one_of, space1};
use nom::combinator::{opt, recognize, verify};
use nom::number::complete::recognize_float;
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;

use crate::core::BlockKind;
use crate::parsers::token_end;

/// A line shape and the block it belongs to
struct Pattern {
    block: BlockKind,
    matches: fn(&str) -> bool,
}

/// Ordered line shapes, first match wins
static PATTERNS: &[Pattern] = &[
    Pattern {
        block: BlockKind::Surfaces,
        matches: is_transformed_surface,
    },
    Pattern {
        block: BlockKind::Surfaces,
        matches: is_plain_surface,
    },
    Pattern {
        block: BlockKind::Cells,
        matches: is_material_cell,
    },
    Pattern {
        block: BlockKind::Cells,
        matches: is_void_cell,
    },
    Pattern {
        block: BlockKind::Cells,
        matches: is_like_cell,
    },
    Pattern {
        block: BlockKind::Physics,
        matches: is_data_card,
    },
];

/// Guess which block a line of text belongs to from its shape alone
///
/// This looks at a single line without any surrounding context, which is what
/// an editor has when the cursor moves. Comments, blank lines and anything
/// unrecognised give `None`.
///
/// ```rust
/// # use mcnpkit_input::BlockKind;
/// # use mcnpkit_input::parsers::classify_line;
/// assert_eq!(classify_line("1 px 0.0"), Some(BlockKind::Surfaces));
/// assert_eq!(classify_line("2 3 c/z 0 0 1"), Some(BlockKind::Surfaces));
/// assert_eq!(classify_line("10 1 -7.8 -1 2 imp:n=1"), Some(BlockKind::Cells));
/// assert_eq!(classify_line("11 0 1 -2"), Some(BlockKind::Cells));
/// assert_eq!(classify_line("KCODE 1000 1.0 10 50"), Some(BlockKind::Physics));
/// assert_eq!(classify_line("c a comment"), None);
/// ```
pub fn classify_line(line: &str) -> Option<BlockKind> {
    let line = line.trim().to_lowercase();
    PATTERNS
        .iter()
        .find(|pattern| (pattern.matches)(&line))
        .map(|pattern| pattern.block)
}

fn is_transformed_surface(i: &str) -> bool {
    tuple((surface_id, space1, signed_integer, space1, mnemonic))(i).is_ok()
}

fn is_plain_surface(i: &str) -> bool {
    tuple((surface_id, space1, mnemonic))(i).is_ok()
}

fn is_material_cell(i: &str) -> bool {
    tuple((digit1, space1, digit1, space1, recognize_float, token_end))(i).is_ok()
}

fn is_void_cell(i: &str) -> bool {
    tuple((digit1, space1, char('0'), token_end))(i).is_ok()
}

fn is_like_cell(i: &str) -> bool {
    tuple((digit1, space1, tag("like"), space1, digit1, space1, tag("but"), token_end))(i).is_ok()
}

fn is_data_card(i: &str) -> bool {
    pair(data_card_name, token_end)(i).is_ok()
        || pair(tally_name, char(':'))(i).is_ok()
}

/// Surface number with an optional boundary prefix
fn surface_id(i: &str) -> IResult<&str, &str> {
    recognize(preceded(opt(one_of("*+")), digit1))(i)
}

fn signed_integer(i: &str) -> IResult<&str, &str> {
    recognize(preceded(opt(char('-')), digit1))(i)
}

/// Surface mnemonic such as `px` or `c/z`, never the `like` keyword
fn mnemonic(i: &str) -> IResult<&str, &str> {
    let (i, word) = verify(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '/'),
        |w: &str| w != "like",
    )(i)?;
    let (i, _) = token_end(i)?;
    Ok((i, word))
}

fn tally_name(i: &str) -> IResult<&str, &str> {
    recognize(tuple((opt(one_of("+*")), char('f'), digit1)))(i)
}

fn data_card_name(i: &str) -> IResult<&str, &str> {
    alt((
        tag("kcode"),
        tag("mode"),
        tag("nps"),
        tag("sdef"),
        recognize(pair(char('m'), digit1)),
        recognize(tuple((opt(char('*')), tag("tr"), digit1))),
        tally_name,
    ))(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces() {
        assert_eq!(classify_line("*1 px 0"), Some(BlockKind::Surfaces));
        assert_eq!(classify_line("+1 -2 px 0"), Some(BlockKind::Surfaces));
        assert_eq!(classify_line("5 rpp -1 1 -1 1 -1 1"), Some(BlockKind::Surfaces));
        assert_eq!(classify_line("   7 so 10"), Some(BlockKind::Surfaces));
    }

    #[test]
    fn cells() {
        assert_eq!(classify_line("2 like 1 but u=2"), Some(BlockKind::Cells));
        assert_eq!(classify_line("3 0 #1 #2"), Some(BlockKind::Cells));
        assert_eq!(classify_line("4 2 0.08 -5"), Some(BlockKind::Cells));
        assert_eq!(classify_line("4 2 -1e-1 -5"), Some(BlockKind::Cells));
    }

    #[test]
    fn like_cells() {
        assert!(is_like_cell("2 like 1 but u=2"));
        assert!(is_like_cell("12 like 3 but"));
        assert!(!is_like_cell("2 like 1 butter"));
        assert!(!is_like_cell("2 like x but"));
        assert!(!is_material_cell("2 like 1 but u=2"));
        assert!(!is_void_cell("2 like 1 but u=2"));
    }

    #[test]
    fn data_cards() {
        for line in [
            "mode n p",
            "nps 1e6",
            "sdef pos=0 0 0",
            "m1 1001 1",
            "tr1 0 0 1",
            "*tr1 0 0 1 90 0 90",
            "f4:n 1",
            "+f6 1",
        ] {
            assert_eq!(classify_line(line), Some(BlockKind::Physics), "{line}");
        }
    }

    #[test]
    fn unrecognised() {
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line("c cells"), None);
        assert_eq!(classify_line("phys:n 20"), None);
        assert_eq!(classify_line("simple test deck"), None);
    }
}
