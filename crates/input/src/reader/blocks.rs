use crate::core::BlockLocations;
use crate::error::{Error, Result};

/// Locate the message, cell, surface and data blocks from blank separators
///
/// A first line starting with `message` opens a message block that runs to
/// the first blank line. The cell block follows, then surfaces, and the data
/// block takes everything after the second separator of the deck proper.
pub(crate) fn locate_blocks(lines: &[&str]) -> Result<BlockLocations> {
    let blanks = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim().is_empty())
        .map(|(n, _)| n)
        .collect::<Vec<usize>>();

    let has_message = lines
        .first()
        .is_some_and(|line| line.trim_start().to_lowercase().starts_with("message"));

    let (message, separators) = match (has_message, blanks.split_first()) {
        (true, Some((end, rest))) => (Some(0..end + 1), rest),
        (true, None) => return Err(Error::MissingBlockSeparators { found: 0 }),
        (false, _) => (None, blanks.as_slice()),
    };

    let start = message.as_ref().map_or(0, |m| m.end);
    match separators {
        [first, second, ..] => Ok(BlockLocations {
            message,
            cells: start..first + 1,
            surfaces: first + 1..second + 1,
            physics: second + 1..lines.len(),
        }),
        _ => Err(Error::MissingBlockSeparators {
            found: separators.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_blocks() {
        let lines = ["title", "1 0 -1", "", "1 so 5", "", "nps 10"];
        let locations = locate_blocks(&lines).unwrap();

        assert_eq!(locations.message, None);
        assert_eq!(locations.cells, 0..3);
        assert_eq!(locations.surfaces, 3..5);
        assert_eq!(locations.physics, 5..6);
    }

    #[test]
    fn message_block() {
        let lines = [
            "message: outp=run.o",
            "",
            "title",
            "1 0 -1",
            "",
            "1 so 5",
            "",
            "nps 10",
            "",
            "trailing",
        ];
        let locations = locate_blocks(&lines).unwrap();

        assert_eq!(locations.message, Some(0..2));
        assert_eq!(locations.cells, 2..5);
        assert_eq!(locations.surfaces, 5..7);
        assert_eq!(locations.physics, 7..10);
    }

    #[test]
    fn missing_separators() {
        let lines = ["title", "1 0 -1", "", "1 so 5"];
        assert!(matches!(
            locate_blocks(&lines),
            Err(Error::MissingBlockSeparators { found: 1 })
        ));

        let lines = ["message: x", "", "title", "", "1 so 5"];
        assert!(matches!(
            locate_blocks(&lines),
            Err(Error::MissingBlockSeparators { found: 1 })
        ));
    }
}
