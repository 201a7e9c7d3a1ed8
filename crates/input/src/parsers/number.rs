// nom parser combinators
use nom::character::complete::{self, digit1, one_of};
use nom::combinator::{all_consuming, opt, recognize};
use nom::number::complete::double;
use nom::sequence::preceded;
use nom::IResult;

use mcnpkit_utils::f;

use crate::parsers::cause;

/// Unsigned 32-bit integer value, trimming preceding whitespace
pub(crate) fn uint32(i: &str) -> IResult<&str, u32> {
    let (i, value) = digit1(i.trim_start())?;
    let (_, v) = complete::u32(value)?;
    Ok((i, v))
}

/// Signed 32-bit integer value, trimming preceding whitespace
pub(crate) fn int32(i: &str) -> IResult<&str, i32> {
    let (i, value) = recognize(preceded(opt(one_of("+-")), digit1))(i.trim_start())?;
    let v = value.parse::<i32>().map_err(|_| cause("integer out of range"))?;
    Ok((i, v))
}

/// Signed 64-bit integer value, trimming preceding whitespace
pub(crate) fn int64(i: &str) -> IResult<&str, i64> {
    let (i, value) = recognize(preceded(opt(one_of("+-")), digit1))(i.trim_start())?;
    let v = value.parse::<i64>().map_err(|_| cause("integer out of range"))?;
    Ok((i, v))
}

/// Real number with the exponent marker dropped, e.g. `1.5-3`
///
/// Fortran writes these routinely and MCNP accepts them on input.
pub(crate) fn fortran_f64(i: &str) -> IResult<&str, f64> {
    let (i, value) = recognize(double)(i.trim_start())?;
    let (i, sign) = one_of("+-")(i)?;
    let (i, exponent) = digit1(i)?;

    let number = f!("{value}e{sign}{exponent}")
        .parse::<f64>()
        .map_err(|_| cause("invalid exponent"))?;
    Ok((i, number))
}

/// Whole token as an unsigned integer
pub(crate) fn token_u32(i: &str) -> Option<u32> {
    all_consuming(uint32)(i.trim()).ok().map(|(_, v)| v)
}

/// Whole token as a signed integer
pub(crate) fn token_i32(i: &str) -> Option<i32> {
    all_consuming(int32)(i.trim()).ok().map(|(_, v)| v)
}

/// Whole token as a signed 64-bit integer
pub(crate) fn token_i64(i: &str) -> Option<i64> {
    all_consuming(int64)(i.trim()).ok().map(|(_, v)| v)
}

/// Parse a numeric literal as written on a card
///
/// Accepts everything `double` does plus the Fortran exponent form without
/// the `e`. The whole string must be consumed.
///
/// ```rust
/// # use mcnpkit_input::parsers::parse_f64;
/// assert_eq!(parse_f64("-9.024"), Some(-9.024));
/// assert_eq!(parse_f64(" 1e6 "), Some(1e6));
/// assert_eq!(parse_f64("1.5-3"), Some(1.5e-3));
/// assert_eq!(parse_f64("2+2"), Some(200.0));
/// assert_eq!(parse_f64("1.0.0"), None);
/// assert_eq!(parse_f64(""), None);
/// ```
pub fn parse_f64(i: &str) -> Option<f64> {
    let i = i.trim();
    all_consuming(double::<&str, ()>)(i)
        .ok()
        .or_else(|| all_consuming(fortran_f64)(i).ok())
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(uint32("  12 px"), Ok((" px", 12)));
        assert!(uint32("-12").is_err());
        assert_eq!(int32("-4 cz"), Ok((" cz", -4)));
        assert_eq!(int32("+4"), Ok(("", 4)));
        assert_eq!(token_u32("0012"), Some(12));
        assert_eq!(token_u32("12a"), None);
        assert_eq!(token_u32("99999999999"), None);
        assert_eq!(token_i32("-3"), Some(-3));
        assert_eq!(token_i64("-40"), Some(-40));
    }

    #[test]
    fn fortran_reals() {
        assert_eq!(fortran_f64("8.15942-132"), Ok(("", 8.15942e-132)));
        assert_eq!(fortran_f64("1-3"), Ok(("", 1e-3)));
        assert!(fortran_f64("1.0").is_err());
    }

    #[test]
    fn reals() {
        assert_eq!(parse_f64("0.0"), Some(0.0));
        assert_eq!(parse_f64(".5"), Some(0.5));
        assert_eq!(parse_f64("-1.E+03"), Some(-1000.0));
        assert_eq!(parse_f64("1.0 2.0"), None);
        assert_eq!(parse_f64("abc"), None);
    }
}
