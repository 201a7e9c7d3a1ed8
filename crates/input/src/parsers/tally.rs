// nom parser combinators
use nom::bytes::complete::{tag, take_till};
use nom::character::complete::{char, digit1, one_of};
use nom::combinator::opt;
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

use crate::core::Tally;
use crate::diagnostic::{ErrorCode, ErrorEntry};
use crate::parsers::{token_end, token_u32, CardResult, Parsed};

/// Checks for a `[+*]f<n>` lead token
pub(crate) fn is_tally(i: &str) -> bool {
    tally_tag(i).is_ok()
}

/// Checks for an `e<n>` lead token
pub(crate) fn is_tally_energy(i: &str) -> bool {
    energy_tag(i).is_ok()
}

/// Checks for an `fc<n>` lead token
pub(crate) fn is_tally_comment(i: &str) -> bool {
    comment_tag(i).is_ok()
}

/// Parse a standard tally card
///
/// ```rust
/// # use mcnpkit_input::parsers::parse_tally;
/// let tally = parse_tally("f14:n,p 10 12 (13 14) t", None).unwrap().item;
///
/// assert_eq!(tally.id, 14);
/// assert_eq!(tally.particles, Some(vec!["n".to_string(), "p".to_string()]));
/// assert_eq!(tally.entry_list().len(), 5);
/// assert!(!tally.collision_heating);
/// ```
pub fn parse_tally(line: &str, comment: Option<String>) -> CardResult<Tally> {
    let (rest, (modifier, digits)) = tally_tag(line.trim_start()).map_err(|_| invalid_id(line))?;
    let id = token_u32(digits).ok_or_else(|| invalid_id(line))?;

    let (rest, particles) = particle_list(rest).map_err(|_| invalid_id(line))?;
    let particles = particles.map(|p| {
        p.split(',')
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect::<Vec<String>>()
    });

    let entries = rest
        .split_whitespace()
        .map(String::from)
        .collect::<Vec<String>>();

    Ok(Parsed::new(Tally {
        id,
        particles: particles.filter(|p| !p.is_empty()),
        entries: (!entries.is_empty()).then_some(entries),
        energies: None,
        collision_heating: modifier == Some('+'),
        energy_weighted: modifier == Some('*'),
        comment,
    }))
}

/// Parse an `e<n>` energy bin card into the tally number and raw bins
///
/// ```rust
/// # use mcnpkit_input::parsers::parse_tally_energy;
/// let (id, bins) = parse_tally_energy("e4 0.1 1 20").unwrap().item;
/// assert_eq!(id, 4);
/// assert_eq!(bins, vec!["0.1", "1", "20"]);
/// ```
pub fn parse_tally_energy(line: &str) -> CardResult<(u32, Vec<String>)> {
    let (rest, digits) = energy_tag(line.trim_start()).map_err(|_| invalid_id(line))?;
    let id = token_u32(digits).ok_or_else(|| invalid_id(line))?;
    let bins = rest.split_whitespace().map(String::from).collect();
    Ok(Parsed::new((id, bins)))
}

/// Parse an `fc<n>` tally comment card into the tally number and text
pub fn parse_tally_comment(line: &str) -> CardResult<(u32, String)> {
    let (rest, digits) = comment_tag(line.trim_start()).map_err(|_| invalid_id(line))?;
    let id = token_u32(digits).ok_or_else(|| invalid_id(line))?;
    Ok(Parsed::new((id, rest.trim().to_string())))
}

fn invalid_id(line: &str) -> ErrorEntry {
    ErrorEntry::new(line, "tally card has no valid tally number").with_code(ErrorCode::TallyInvalidId)
}

/// Modifier and digits of the `[+*]f<n>` card name
fn tally_tag(i: &str) -> IResult<&str, (Option<char>, &str)> {
    let (rest, (modifier, _, digits)) = tuple((opt(one_of("+*")), char('f'), digit1))(i)?;

    // the particle list follows immediately, otherwise whitespace
    match rest.starts_with(':') {
        true => Ok((rest, (modifier, digits))),
        false => token_end(rest).map(|(rest, _)| (rest, (modifier, digits))),
    }
}

/// Optional `:p1,p2` particle designators
fn particle_list(i: &str) -> IResult<&str, Option<&str>> {
    opt(preceded(char(':'), take_till(char::is_whitespace)))(i)
}

/// Digits of the `e<n>` card name
fn energy_tag(i: &str) -> IResult<&str, &str> {
    terminated(preceded(char('e'), digit1), token_end)(i)
}

/// Digits of the `fc<n>` card name
fn comment_tag(i: &str) -> IResult<&str, &str> {
    terminated(preceded(tag("fc"), digit1), token_end)(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_heating() {
        let tally = parse_tally("+f4 1 100", None).unwrap().item;
        assert_eq!(tally.id, 4);
        assert!(tally.collision_heating);
        assert!(!tally.energy_weighted);
        assert_eq!(tally.particles, None);
        assert_eq!(tally.entries, Some(vec!["1".to_string(), "100".to_string()]));
    }

    #[test]
    fn energy_weighted() {
        let tally = parse_tally("*f8:p,e 5", None).unwrap().item;
        assert!(tally.energy_weighted);
        assert_eq!(tally.kind(), 8);
        assert_eq!(tally.particle_list(), &["p", "e"]);
    }

    #[test]
    fn missing_entries() {
        let tally = parse_tally("f6:n", None).unwrap().item;
        assert_eq!(tally.entries, None);
        assert_eq!(tally.particle_list(), &["n"]);

        let tally = parse_tally("f6:", None).unwrap().item;
        assert_eq!(tally.particles, None);
    }

    #[test]
    fn lead_tokens() {
        assert!(is_tally("f4:n 1"));
        assert!(is_tally("+f16 1"));
        assert!(!is_tally("fc4 comment"));
        assert!(!is_tally("fm4 1 1 -4"));
        assert!(!is_tally("fmesh4:n"));
        assert!(is_tally_energy("e0 1 2"));
        assert!(!is_tally_energy("elpt:n 1"));
        assert!(is_tally_comment("fc14 flux"));
    }

    #[test]
    fn companion_cards() {
        let (id, text) = parse_tally_comment("fc14 flux in cell 3").unwrap().item;
        assert_eq!(id, 14);
        assert_eq!(text, "flux in cell 3");

        let (id, bins) = parse_tally_energy("e0").unwrap().item;
        assert_eq!(id, 0);
        assert!(bins.is_empty());
    }
}
