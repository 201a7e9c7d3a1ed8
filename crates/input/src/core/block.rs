use std::ops::Range;

/// The major sections of an input deck
///
/// Decks are split into cell, surface and data blocks by blank lines. The
/// data block holds materials, tallies, transformations and run settings, and
/// is called the physics block here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    /// Cell cards, starting with the title line
    Cells,
    /// Surface cards
    Surfaces,
    /// Everything after the second separator
    Physics,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            BlockKind::Cells => "cells",
            BlockKind::Surfaces => "surfaces",
            BlockKind::Physics => "physics",
        };
        write!(f, "{name}")
    }
}

/// Line ranges of each block in the original file
///
/// Ranges are half-open and zero-based. Each block ends just after the blank
/// line that terminates it, so the ranges are contiguous and ordered
/// `message < cells < surfaces < physics`, and together cover every line of
/// the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockLocations {
    /// Optional message block, including its blank separator
    pub message: Option<Range<usize>>,
    /// Title line and cell cards
    pub cells: Range<usize>,
    /// Surface cards
    pub surfaces: Range<usize>,
    /// Data cards through to the end of the file
    pub physics: Range<usize>,
}

impl BlockLocations {
    /// Range for a particular block
    pub fn range(&self, kind: BlockKind) -> &Range<usize> {
        match kind {
            BlockKind::Cells => &self.cells,
            BlockKind::Surfaces => &self.surfaces,
            BlockKind::Physics => &self.physics,
        }
    }

    /// Find the block containing a zero-based line number
    ///
    /// Lines in the message block, or past the end of the file, belong to no
    /// block.
    ///
    /// ```rust
    /// # use mcnpkit_input::{BlockKind, BlockLocations};
    /// let locations = BlockLocations {
    ///     message: None,
    ///     cells: 0..3,
    ///     surfaces: 3..6,
    ///     physics: 6..10,
    /// };
    ///
    /// assert_eq!(locations.classify(0), Some(BlockKind::Cells));
    /// assert_eq!(locations.classify(5), Some(BlockKind::Surfaces));
    /// assert_eq!(locations.classify(9), Some(BlockKind::Physics));
    /// assert_eq!(locations.classify(10), None);
    /// ```
    pub fn classify(&self, line_number: usize) -> Option<BlockKind> {
        [BlockKind::Cells, BlockKind::Surfaces, BlockKind::Physics]
            .into_iter()
            .find(|kind| self.range(*kind).contains(&line_number))
    }
}
