// nom parser combinators
use nom::character::complete::one_of;
use nom::combinator::opt;
use nom::sequence::terminated;
use nom::IResult;

use crate::core::{Boundary, Surface};
use crate::diagnostic::{ErrorCode, ErrorEntry};
use crate::parsers::{token_end, token_i32, uint32, CardResult, Parsed};

/// Parse a surface card
///
/// The second token is a transformation number if it is an integer, in
/// which case the mnemonic follows it. Parameters are kept as raw text.
///
/// ```rust
/// # use mcnpkit_input::parsers::parse_surface;
/// let surface = parse_surface("1 px 0.0", None).unwrap().item;
/// assert_eq!(surface.id, 1);
/// assert_eq!(surface.kind, "px");
/// assert_eq!(surface.parameters, vec!["0.0"]);
/// assert_eq!(surface.transform, None);
/// ```
pub fn parse_surface(line: &str, comment: Option<String>) -> CardResult<Surface> {
    let (rest, (boundary, id)) = surface_number(line).map_err(|_| {
        ErrorEntry::new(line, "surface card has no valid surface number")
            .with_code(ErrorCode::SurfaceMissingId)
    })?;

    let mut tokens = rest.split_whitespace().peekable();
    let transform = tokens.peek().and_then(|t| token_i32(t));
    if transform.is_some() {
        tokens.next();
    }

    let kind = tokens.next().unwrap_or_default().to_string();
    let parameters = tokens.map(String::from).collect();

    Ok(Parsed::new(Surface {
        id,
        kind,
        parameters,
        transform,
        boundary,
        comment,
    }))
}

/// Surface number with the optional boundary condition prefix
fn surface_number(i: &str) -> IResult<&str, (Boundary, u32)> {
    let (i, prefix) = opt(one_of("*+"))(i.trim_start())?;
    let (i, id) = terminated(uint32, token_end)(i)?;

    let boundary = match prefix {
        Some('*') => Boundary::Reflecting,
        Some('+') => Boundary::White,
        _ => Boundary::None,
    };
    Ok((i, (boundary, id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_surface() {
        let parsed = parse_surface("3 s 0 0 1.5 10", Some("sphere".into())).unwrap();
        assert!(parsed.is_clean());

        let surface = parsed.item;
        assert_eq!(surface.id, 3);
        assert_eq!(surface.kind, "s");
        assert_eq!(surface.parameters_str(), "0 0 1.5 10");
        assert_eq!(surface.boundary, Boundary::None);
        assert_eq!(surface.comment.as_deref(), Some("sphere"));
    }

    #[test]
    fn transformed_surface() {
        let surface = parse_surface("*2 3 cz 10.0", None).unwrap().item;
        assert_eq!(surface.id, 2);
        assert_eq!(surface.transform, Some(3));
        assert_eq!(surface.kind, "cz");
        assert_eq!(surface.boundary, Boundary::Reflecting);

        let periodic = parse_surface("+5 -6 px 1", None).unwrap().item;
        assert_eq!(periodic.transform, Some(-6));
        assert_eq!(periodic.boundary, Boundary::White);
    }

    #[test]
    fn macrobody() {
        let surface = parse_surface("10 rpp -1 1 -2 2 -3 3", None).unwrap().item;
        assert_eq!(surface.kind, "rpp");
        assert_eq!(surface.parameters.len(), 6);
    }

    #[test]
    fn missing_type_is_kept() {
        let surface = parse_surface("7", None).unwrap().item;
        assert_eq!(surface.id, 7);
        assert!(surface.kind.is_empty());
        assert!(surface.parameters.is_empty());
    }

    #[test]
    fn missing_id() {
        let error = parse_surface("px 0.0", None).unwrap_err();
        assert_eq!(error.code, Some(ErrorCode::SurfaceMissingId));
        assert_eq!(error.source_text, "px 0.0");

        assert!(parse_surface("1.5 px 0.0", None).is_err());
    }
}
