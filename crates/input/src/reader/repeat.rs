use log::warn;

use crate::parsers::{parse_f64, token_u32};

/// Largest `<n>r` count that is expanded, larger ones are left as written
const MAX_REPEATS: usize = 100_000;

/// Expand the `<value> <n>r` repeat shorthand
///
/// `<n>r` repeats the previous value `n` more times and a bare `r` repeats it
/// once. The previous token must be a number, anything else is left alone.
/// Counts above [MAX_REPEATS] are kept unexpanded for the card grammar to
/// report.
pub(crate) fn expand_repeats(card: &str) -> String {
    let mut tokens: Vec<&str> = Vec::new();

    for token in card.split_whitespace() {
        let previous = tokens.last().copied().filter(|t| parse_f64(t).is_some());
        match (previous, repeat_count(token)) {
            (Some(_), Some(count)) if count > MAX_REPEATS => {
                warn!("Repeat count {count} is too large to expand, keeping \"{token}\"");
                tokens.push(token)
            }
            (Some(value), Some(count)) => tokens.extend(std::iter::repeat(value).take(count)),
            _ => tokens.push(token),
        }
    }

    tokens.join(" ")
}

/// Number of repetitions for `r` or `<n>r`
fn repeat_count(token: &str) -> Option<usize> {
    match token.strip_suffix(['r', 'R'])? {
        "" => Some(1),
        digits => token_u32(digits).map(|n| n as usize),
    }
}
