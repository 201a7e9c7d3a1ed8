// nom parser combinators
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::sequence::terminated;
use nom::IResult;

use mcnpkit_utils::{f, StringExt};

use crate::diagnostic::{ErrorCode, ErrorEntry};
use crate::parsers::{parse_f64, token_end, CardResult, Parsed};

/// Run settings recognised in the data block
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    /// Raw `kcode` parameters
    Kcode(String),
    /// Particle designators on the `mode` card
    Mode(Vec<String>),
    /// Number of histories
    Nps(u64),
}

/// Checks for a `kcode`, `mode` or `nps` lead token
pub(crate) fn is_setting(i: &str) -> bool {
    setting_tag(i).is_ok()
}

/// Parse a run setting card
///
/// ```rust
/// # use mcnpkit_input::parsers::{parse_setting, Setting};
/// let mode = parse_setting("mode n,p e").unwrap().item;
/// assert_eq!(mode, Setting::Mode(vec!["n".into(), "p".into(), "e".into()]));
///
/// let nps = parse_setting("nps 1e6").unwrap().item;
/// assert_eq!(nps, Setting::Nps(1_000_000));
/// ```
pub fn parse_setting(line: &str) -> CardResult<Setting> {
    let (rest, name) = setting_tag(line.trim_start()).map_err(|_| {
        ErrorEntry::new(line, "not a recognised run setting")
    })?;

    let setting = match name {
        "kcode" => Setting::Kcode(rest.squeeze()),
        "mode" => Setting::Mode(
            rest.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        ),
        _ => Setting::Nps(histories(rest).ok_or_else(|| {
            ErrorEntry::new(line, f!("invalid number of histories \"{}\"", rest.trim()))
                .with_code(ErrorCode::PhysicsInvalidNps)
        })?),
    };

    Ok(Parsed::new(setting))
}

/// History count from the first `nps` entry, which may be written as a real
fn histories(i: &str) -> Option<u64> {
    let value = parse_f64(i.split_whitespace().next()?)?;
    match value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        true => Some(value as u64),
        false => None,
    }
}

/// Name of the setting card
fn setting_tag(i: &str) -> IResult<&str, &str> {
    terminated(alt((tag("kcode"), tag("mode"), tag("nps"))), token_end)(i)
}
