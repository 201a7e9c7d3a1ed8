// nom parser combinators
use nom::character::complete::{char, digit1};
use nom::sequence::{preceded, terminated};
use nom::IResult;

use mcnpkit_utils::{f, StringExt};

use crate::core::{Isotope, Material};
use crate::diagnostic::{ErrorCode, ErrorEntry};
use crate::parsers::{parse_f64, token_end, token_u32, CardResult, Parsed};

/// Checks for an `m<n>` lead token
pub(crate) fn is_material(i: &str) -> bool {
    material_tag(i).is_ok()
}

/// Parse a material card
///
/// Tokens after the card name are `zzzaaa[.library] abundance` pairs, with
/// any `key=value` options set aside first. Problems with individual pairs
/// are recoverable, and the material keeps whatever isotopes did parse.
///
/// ```rust
/// # use mcnpkit_input::ErrorCode;
/// # use mcnpkit_input::parsers::parse_material;
/// let parsed = parse_material("m5 1001 0.5 8016", None).unwrap();
///
/// assert_eq!(parsed.item.id, 5);
/// assert_eq!(parsed.item.isotopes.len(), 1);
/// assert_eq!(parsed.item.isotopes[0].name(), "H-1");
/// assert_eq!(parsed.diagnostics.len(), 1);
/// assert_eq!(parsed.diagnostics[0].message, "uneven number of material entries");
/// assert_eq!(parsed.diagnostics[0].code, Some(ErrorCode::MaterialUnevenEntries));
/// ```
pub fn parse_material(line: &str, comment: Option<String>) -> CardResult<Material> {
    let (rest, digits) = material_tag(line.trim_start()).map_err(|_| invalid_id(line))?;
    let id = token_u32(digits).ok_or_else(|| invalid_id(line))?;

    let mut material = Material::new(id, comment);
    let mut diagnostics = Vec::new();

    // options may be written with spaces around the `=`
    let rest = rest.tighten_assignments();
    let mut tokens = Vec::new();
    for token in rest.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) => {
                material.options.insert(key.to_string(), value.to_string());
            }
            None => tokens.push(token),
        }
    }

    if tokens.len() % 2 != 0 {
        diagnostics.push(
            ErrorEntry::new(line, "uneven number of material entries")
                .with_code(ErrorCode::MaterialUnevenEntries),
        );
    }

    for pair in tokens.chunks_exact(2) {
        match isotope(pair[0], pair[1]) {
            Ok(isotope) => material.isotopes.push(isotope),
            Err((message, code)) => diagnostics.push(ErrorEntry::new(line, message).with_code(code)),
        }
    }

    Ok(Parsed::with_diagnostics(material, diagnostics))
}

/// Decode one `zzzaaa[.library] abundance` pair
fn isotope(zaid: &str, abundance: &str) -> Result<Isotope, (String, ErrorCode)> {
    let (zzzaaa, library) = match zaid.split_once('.') {
        Some((zzzaaa, library)) => (zzzaaa, Some(library)),
        None => (zaid, None),
    };

    let zzzaaa = token_u32(zzzaaa).ok_or_else(|| {
        (
            f!("invalid isotope identifier \"{zaid}\""),
            ErrorCode::MaterialInvalidZaid,
        )
    })?;

    let abundance = parse_f64(abundance).ok_or_else(|| {
        (
            f!("invalid abundance \"{abundance}\" for isotope {zaid}"),
            ErrorCode::MaterialInvalidAbundance,
        )
    })?;

    let library = library.filter(|l| !l.is_empty()).map(String::from);
    Ok(Isotope::from_zzzaaa(zzzaaa, abundance, library))
}

fn invalid_id(line: &str) -> ErrorEntry {
    ErrorEntry::new(line, "material card has no valid material number")
        .with_code(ErrorCode::MaterialInvalidId)
}

/// Digits of the `m<n>` card name
fn material_tag(i: &str) -> IResult<&str, &str> {
    terminated(preceded(char('m'), digit1), token_end)(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isotopes_and_options() {
        let parsed = parse_material(
            "m1 1001.80c 2 8016.80c 1 nlib = .80c gas=1",
            Some("water".into()),
        )
        .unwrap();
        assert!(parsed.is_clean());

        let material = parsed.item;
        assert_eq!(material.id, 1);
        assert_eq!(material.comment.as_deref(), Some("water"));
        assert_eq!(material.isotopes.len(), 2);
        assert_eq!(material.isotopes[0].zzzaaa(), 1001);
        assert_eq!(material.isotopes[0].library.as_deref(), Some("80c"));
        assert_eq!(material.isotopes[1].abundance, 1.0);
        assert_eq!(material.options.get("nlib").map(|s| s.as_str()), Some(".80c"));
        assert_eq!(material.options.get("gas").map(|s| s.as_str()), Some("1"));
    }

    #[test]
    fn natural_and_mass_fractions() {
        let material = parse_material("m2 6000 -0.5 26000.50c -0.5", None).unwrap().item;
        assert_eq!(material.isotopes[0].name(), "C-nat");
        assert!(material.isotopes[0].is_natural());
        assert_eq!(material.isotopes[1].abundance, -0.5);
    }

    #[test]
    fn recoverable_pairs() {
        let parsed = parse_material("m3 1001 x 8o16 1 92235 1.5-1", None).unwrap();
        let codes = parsed
            .diagnostics
            .iter()
            .filter_map(|d| d.code)
            .collect::<Vec<ErrorCode>>();

        assert_eq!(
            codes,
            vec![ErrorCode::MaterialInvalidAbundance, ErrorCode::MaterialInvalidZaid]
        );
        assert_eq!(parsed.item.isotopes.len(), 1);
        assert_eq!(parsed.item.isotopes[0].abundance, 0.15);
    }

    #[test]
    fn no_entries() {
        let parsed = parse_material("m4", None).unwrap();
        assert!(parsed.is_clean());
        assert!(parsed.item.isotopes.is_empty());
    }

    #[test]
    fn lead_token() {
        assert!(is_material("m10 1001 1"));
        assert!(is_material("m10"));
        assert!(!is_material("mode n"));
        assert!(!is_material("mt1 lwtr"));
        assert!(!is_material("m1:n 1"));

        let error = parse_material("m99999999999 1001 1", None).unwrap_err();
        assert_eq!(error.code, Some(ErrorCode::MaterialInvalidId));
    }
}
