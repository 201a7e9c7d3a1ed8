//! Lexical preprocessing and assembly of the input model
//!
//! Raw text is split into blocks, continuation lines are merged, comments are
//! separated from card text, and the repeat shorthand is expanded in the data
//! block. The [Reader] then dispatches every card to its grammar and collects
//! the results into an [McnpInput].

mod assemble;
mod blocks;
mod normalise;
mod repeat;

use std::ops::Range;

use log::{debug, info};

use mcnpkit_utils::StringExt;

use crate::core::{BlockKind, BlockLocations};
use crate::diagnostic::ErrorCollection;
use crate::error::Result;
use crate::parsers::Card;
use crate::McnpInput;

use blocks::locate_blocks;
use normalise::normalise;
use repeat::expand_repeats;

/// One entry of a normalised block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Complete card text, continuations merged and comments removed
    Card(String),
    /// Comment text without the marker
    Comment(String),
}

/// Preprocessed deck, ready for card dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Line ranges of each block in the original text
    pub locations: BlockLocations,
    /// Title card, as written
    pub title: String,
    /// Message block text without the `message:` keyword
    pub message: Option<String>,
    /// Cell block, excluding the title
    pub cells: Vec<Line>,
    /// Surface block
    pub surfaces: Vec<Line>,
    /// Data block, with repeats expanded
    pub physics: Vec<Line>,
}

impl Deck {
    /// Normalised lines of a block
    pub fn lines(&self, kind: BlockKind) -> &[Line] {
        match kind {
            BlockKind::Cells => &self.cells,
            BlockKind::Surfaces => &self.surfaces,
            BlockKind::Physics => &self.physics,
        }
    }
}

/// Split raw deck text into normalised blocks
///
/// Fails only if the deck does not have the two blank line separators needed
/// to find the surface and data blocks.
///
/// ```rust
/// # use mcnpkit_input::{preprocess, Line};
/// let text = "Simple deck\n1 0 -1  $ inside\n\n1 so 5\n\nimp:n 1 r 0\n";
/// let deck = preprocess(text).unwrap();
///
/// assert_eq!(deck.title, "Simple deck");
/// assert_eq!(deck.cells, vec![Line::Card("1 0 -1".into()), Line::Comment("inside".into())]);
/// assert_eq!(deck.physics, vec![Line::Card("imp:n 1 1 0".into())]);
/// ```
pub fn preprocess(text: &str) -> Result<Deck> {
    let raw = text.lines().collect::<Vec<&str>>();
    let locations = locate_blocks(&raw)?;
    debug!("Block locations: {locations:?}");

    // case-insensitive from here on
    let lower = raw.iter().map(|l| l.to_lowercase()).collect::<Vec<String>>();
    let block = |range: Range<usize>| {
        lower
            .get(range)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect::<Vec<&str>>()
    };

    let title = raw
        .get(locations.cells.start)
        .map(|l| l.trim().to_string())
        .unwrap_or_default();

    let message = locations.message.clone().map(|range| {
        let text = raw[range].join(" ").squeeze();
        text[7.min(text.len())..].trim_start_matches(':').trim().to_string()
    });

    let cells = normalise(&block(locations.cells.start + 1..locations.cells.end));
    let surfaces = normalise(&block(locations.surfaces.clone()));
    let physics = normalise(&block(locations.physics.clone()))
        .into_iter()
        .map(|line| match line {
            Line::Card(card) => Line::Card(expand_repeats(&card)),
            comment => comment,
        })
        .collect::<Vec<Line>>();

    debug!(
        "Normalised {} cell, {} surface and {} data entries",
        cells.len(),
        surfaces.len(),
        physics.len()
    );

    Ok(Deck {
        locations,
        title,
        message,
        cells,
        surfaces,
        physics,
    })
}

/// Internal reader for the input deck
pub(crate) struct Reader<'a> {
    text: &'a str,
    input: McnpInput,
    errors: ErrorCollection,
    // energy and comment cards, attached once every tally is known
    companions: Vec<(String, Card)>,
}

// ! Internal API
impl<'a> Reader<'a> {
    /// Create a new reader for the text provided
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            input: McnpInput::new(),
            errors: ErrorCollection::new(),
            companions: Vec::new(),
        }
    }

    /// Build the input model and collect any card diagnostics
    pub(crate) fn read(mut self) -> Result<(McnpInput, ErrorCollection)> {
        info!("Reading input deck");
        let deck = preprocess(self.text)?;

        self.input.title = deck.title.clone();
        self.input.message = deck.message.clone();
        self.input.block_locations = deck.locations.clone();

        for kind in [BlockKind::Cells, BlockKind::Surfaces, BlockKind::Physics] {
            self.read_block(kind, deck.lines(kind));
        }
        self.attach_companions();

        info!(
            "Read {} cells, {} surfaces, {} materials, {} tallies, {} transformations",
            self.input.cells.len(),
            self.input.surfaces.len(),
            self.input.materials.len(),
            self.input.tallies.len(),
            self.input.transformations.len()
        );
        Ok((self.input, self.errors))
    }
}
