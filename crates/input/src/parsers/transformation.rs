// nom parser combinators
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1};
use nom::combinator::opt;
use nom::sequence::{terminated, tuple};
use nom::IResult;

use mcnpkit_utils::StringExt;

use crate::core::Transformation;
use crate::diagnostic::{ErrorCode, ErrorEntry};
use crate::parsers::{token_end, token_u32, CardResult, Parsed};

/// Checks for a `*tr<n>` or `tr<n>` lead token
pub(crate) fn is_transformation(i: &str) -> bool {
    transformation_tag(i).is_ok()
}

/// Parse a transformation card
///
/// ```rust
/// # use mcnpkit_input::parsers::parse_transformation;
/// let tr = parse_transformation("*tr2  0 0 10   90 0 90", None).unwrap().item;
/// assert_eq!(tr.id, 2);
/// assert!(tr.is_angle_form);
/// assert_eq!(tr.parameters, "0 0 10 90 0 90");
/// ```
pub fn parse_transformation(line: &str, comment: Option<String>) -> CardResult<Transformation> {
    let (rest, (star, digits)) = transformation_tag(line.trim_start()).map_err(|_| invalid_id(line))?;
    let id = token_u32(digits).ok_or_else(|| invalid_id(line))?;

    Ok(Parsed::new(Transformation {
        id,
        parameters: rest.squeeze(),
        is_angle_form: star,
        comment,
    }))
}

fn invalid_id(line: &str) -> ErrorEntry {
    ErrorEntry::new(line, "transformation card has no valid number")
        .with_code(ErrorCode::TransformationInvalidId)
}

/// Angle form flag and digits of the card name
fn transformation_tag(i: &str) -> IResult<&str, (bool, &str)> {
    let (i, (star, _, digits)) = terminated(tuple((opt(char('*')), tag("tr"), digit1)), token_end)(i)?;
    Ok((i, (star.is_some(), digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_form() {
        let tr = parse_transformation("tr1 0 0 5", Some("shift".into())).unwrap().item;
        assert_eq!(tr.id, 1);
        assert!(!tr.is_angle_form);
        assert_eq!(tr.displacement(), Some([0.0, 0.0, 5.0]));
        assert_eq!(tr.comment.as_deref(), Some("shift"));
    }

    #[test]
    fn missing_parameters() {
        let tr = parse_transformation("tr7", None).unwrap().item;
        assert!(tr.parameters.is_empty());
        assert_eq!(tr.values(), Some(vec![]));
    }

    #[test]
    fn lead_token() {
        assert!(is_transformation("tr3 1 2 3"));
        assert!(is_transformation("*tr3 1 2 3"));
        assert!(!is_transformation("trcl 1"));
        assert!(!is_transformation("tr 1"));
        assert!(!is_transformation("tmp 1"));
    }
}
