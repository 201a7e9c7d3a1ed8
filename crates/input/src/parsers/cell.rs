// nom parser combinators
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{alpha1, char, digit0, space0, space1};
use nom::combinator::{opt, recognize};
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

use mcnpkit_utils::f;

use crate::core::{Cell, KeywordValue, Region};
use crate::diagnostic::{ErrorCode, ErrorEntry};
use crate::parsers::{cause, parse_f64, token_end, token_i64, token_u32, uint32, CardResult, Parsed};

/// Keywords allowed on cell cards, without any numeric suffix
const CELL_KEYWORDS: [&str; 20] = [
    "trcl", "*trcl", "fill", "*fill", "tmp", "u", "lat", "imp", "vol", "pwt", "ext", "fcl", "wwn",
    "dxc", "nonu", "pd", "elpt", "cosy", "bflcl", "unc",
];

/// Parse a cell card
///
/// Void cells (material 0) have no density. Everything after the density up
/// to the first keyword is geometry, the rest is `keyword[:particles]=value`
/// entries.
///
/// ```rust
/// # use mcnpkit_input::parsers::parse_cell;
/// let cell = parse_cell("11 0 1 -2 imp:n=1", None).unwrap().item;
/// assert_eq!(cell.id, 11);
/// assert_eq!(cell.material, 0);
/// assert_eq!(cell.density, 0.0);
/// assert_eq!(cell.region.surfaces(), &[1, 2]);
/// assert_eq!(cell.importance.get("n"), Some(&1.0));
/// ```
pub fn parse_cell(line: &str, comment: Option<String>) -> CardResult<Cell> {
    let fatal = |message: &str, code: ErrorCode| ErrorEntry::new(line, message).with_code(code);

    let (rest, id) = cell_integer(line)
        .map_err(|_| fatal("cell card has no valid cell number", ErrorCode::CellInvalidFormat))?;

    // like n but ... only records the reference
    if let Ok((_, like)) = like_but(rest) {
        return Ok(Parsed::new(Cell {
            id,
            like: Some(like),
            comment,
            ..Default::default()
        }));
    }

    let (rest, material) = cell_integer(rest).map_err(|_| {
        fatal("cell card has no valid material number", ErrorCode::CellInvalidFormat)
    })?;

    let (rest, density) = match material {
        0 => (rest, 0.0),
        _ => density(rest)
            .map_err(|_| fatal("non-void cell has no valid density", ErrorCode::CellInvalidDensity))?,
    };

    let mut cell = Cell {
        id,
        material,
        density,
        comment,
        ..Default::default()
    };
    let mut diagnostics = Vec::new();

    let (geometry, keywords) = rest.split_at(keyword_start(rest));

    let (region, invalid) = region(geometry);
    cell.region = region;
    if !invalid.is_empty() {
        diagnostics.push(
            ErrorEntry::new(
                line,
                f!("cell {id} has invalid geometry entries: {}", invalid.join(" ")),
            )
            .with_code(ErrorCode::CellInvalidGeometry),
        );
    }

    for problem in apply_keywords(&mut cell, keywords) {
        diagnostics.push(
            ErrorEntry::new(line, f!("cell {id} {problem}")).with_code(ErrorCode::CellInvalidKeyword),
        );
    }

    Ok(Parsed::with_diagnostics(cell, diagnostics))
}

/// Flatten a geometry segment into surface and complement references
///
/// Operators are dropped along with half-space signs and leading zeros.
/// Returns the region and any tokens that could not be interpreted.
pub(crate) fn region(geometry: &str) -> (Region, Vec<String>) {
    let cleaned = geometry
        .chars()
        .map(|c| if "-+:()".contains(c) { ' ' } else { c })
        .collect::<String>()
        .replace('#', " #");

    let mut region = Region::default();
    let mut invalid = Vec::new();

    for token in cleaned.split_whitespace() {
        match token.strip_prefix('#') {
            // complement of a bracketed region, the surfaces follow
            Some("") => continue,
            Some(cell) => match reference_id(cell) {
                Some(id) => region.add_excluded(id),
                None => invalid.push(token.to_string()),
            },
            None => match reference_id(token) {
                Some(id) => region.add_surface(id),
                None => invalid.push(token.to_string()),
            },
        }
    }

    (region, invalid)
}

/// Surface or cell number from a geometry token
///
/// Macrobody facets (`10.3`) refer back to the macrobody itself.
fn reference_id(token: &str) -> Option<u32> {
    let number = match token.split_once('.') {
        Some((body, facet)) if !facet.is_empty() && facet.bytes().all(|b| b.is_ascii_digit()) => {
            body
        }
        Some(_) => return None,
        None => token,
    };

    let trimmed = number.trim_start_matches('0');
    match trimmed.is_empty() && !number.is_empty() {
        true => Some(0),
        false => token_u32(trimmed),
    }
}

/// Byte index of the first keyword, or the end of the line
///
/// Keywords start with a letter, or `*` followed by a letter.
fn keyword_start(i: &str) -> usize {
    let bytes = i.as_bytes();
    (0..bytes.len())
        .find(|&n| {
            bytes[n].is_ascii_alphabetic()
                || (bytes[n] == b'*' && bytes.get(n + 1).is_some_and(|b| b.is_ascii_alphabetic()))
        })
        .unwrap_or(bytes.len())
}

/// Byte index of the next keyword preceded by whitespace
fn next_keyword(i: &str) -> usize {
    let bytes = i.as_bytes();
    (1..bytes.len())
        .find(|&n| bytes[n - 1].is_ascii_whitespace() && keyword_start(&i[n..]) == 0)
        .unwrap_or(bytes.len())
}

/// One `keyword[:particles][=]value` entry
///
/// The value runs up to the next keyword, so bracketed lists such as
/// `fill=1 (1 0 0)` are kept whole.
fn keyword_entry(i: &str) -> IResult<&str, (&str, Option<&str>, &str)> {
    let (i, name) = recognize(tuple((opt(char('*')), alpha1, digit0)))(i.trim_start())?;
    let (i, particles) = opt(preceded(
        char(':'),
        take_till1(|c: char| c == '=' || c.is_whitespace()),
    ))(i)?;
    let (i, (_, equals, _)) = tuple((space0, opt(char('=')), space0))(i)?;

    // without `=`, a keyword followed directly by another keyword has no value
    if equals.is_none() && keyword_start(i) == 0 && !i.is_empty() {
        return Ok((i, (name, particles, "")));
    }

    let end = next_keyword(i);
    Ok((&i[end..], (name, particles, i[..end].trim())))
}

/// Fill in importances and keywords, returning a description of each problem
fn apply_keywords(cell: &mut Cell, segment: &str) -> Vec<String> {
    let mut problems = Vec::new();
    let mut rest = segment.trim();

    while !rest.is_empty() {
        let (remaining, (name, particles, value)) = match keyword_entry(rest) {
            Ok(entry) => entry,
            Err(_) => {
                let end = next_keyword(rest);
                problems.push(f!("has an unreadable keyword entry \"{}\"", rest[..end].trim()));
                rest = rest[end..].trim_start();
                continue;
            }
        };
        rest = remaining.trim_start();

        let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
        if !CELL_KEYWORDS.contains(&base) {
            problems.push(f!("has an unknown keyword \"{name}\""));
            continue;
        }

        if value.is_empty() {
            problems.push(f!("has no value for keyword \"{name}\""));
            continue;
        }

        match (base, particles) {
            ("imp", Some(particles)) => match parse_f64(value) {
                Some(v) => {
                    for particle in particles.split(',').filter(|p| !p.is_empty()) {
                        cell.importance.insert(particle.to_string(), v);
                    }
                }
                None => problems.push(f!("has a non-numeric importance \"{value}\"")),
            },
            ("imp", None) => problems.push("has an importance without particle designators".into()),
            (_, Some(particles)) => {
                cell.keywords
                    .insert(f!("{name}:{particles}"), KeywordValue::Raw(value.to_string()));
            }
            (_, None) => match coerce(base, value) {
                Some(v) => {
                    cell.keywords.insert(name.to_string(), v);
                }
                None => problems.push(f!("has an invalid value for \"{name}\": \"{value}\"")),
            },
        }
    }

    problems
}

/// Type the value of keywords with a known type
fn coerce(keyword: &str, value: &str) -> Option<KeywordValue> {
    match keyword {
        "u" | "lat" => token_i64(value).map(KeywordValue::Integer),
        "vol" | "tmp" | "pwt" => parse_f64(value).map(KeywordValue::Float),
        _ => Some(KeywordValue::Raw(value.to_string())),
    }
}

/// Cell or material number, which must be followed by whitespace
fn cell_integer(i: &str) -> IResult<&str, u32> {
    terminated(uint32, token_end)(i)
}

/// Density literal, leaving the geometry untouched
fn density(i: &str) -> IResult<&str, f64> {
    let (i, value) = take_till1(|c: char| c.is_whitespace() || c == '(')(i.trim_start())?;
    match parse_f64(value) {
        Some(density) => Ok((i, density)),
        None => Err(cause("invalid density")),
    }
}

/// The `like n but` short form
fn like_but(i: &str) -> IResult<&str, u32> {
    let (i, _) = tuple((space0, tag("like"), space1))(i)?;
    let (i, like) = uint32(i)?;
    let (i, _) = tuple((space1, tag("but")))(i)?;
    Ok((i, like))
}
