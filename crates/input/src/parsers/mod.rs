//! Card grammars, one per card family
//!
//! Every grammar takes a single normalised card (lower case, continuations
//! merged, comments removed) and the comment collected before it. The result
//! is either a [Parsed] entity, possibly carrying recoverable diagnostics, or
//! a fatal [ErrorEntry] that keeps the card out of the model entirely.
//!
//! Dispatch is table driven. Each block has a static, ordered list of
//! [Grammar]s and the first one whose lead token matches is used.

// All nom parsers split amoung files for organisation
mod cell;
mod classify;
mod material;
mod number;
mod physics;
mod surface;
mod tally;
mod transformation;

// Public grammar entry points
pub use cell::parse_cell;
pub use classify::classify_line;
pub use material::parse_material;
pub use number::parse_f64;
pub use physics::{parse_setting, Setting};
pub use surface::parse_surface;
pub use tally::{parse_tally, parse_tally_comment, parse_tally_energy};
pub use transformation::parse_transformation;

// Internal re-exports for convenience
pub(crate) use number::*;

use crate::core::{BlockKind, Cell, Material, Surface, Tally, Transformation};
use crate::diagnostic::ErrorEntry;

// nom parser combinators
use nom::branch::alt;
use nom::character::complete::space1;
use nom::combinator::{eof, peek};
use nom::error::{Error, ErrorKind};
use nom::IResult;

/// Entity built by a grammar, with any recoverable diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// The best-effort entity
    pub item: T,
    /// Recoverable problems found while building it
    pub diagnostics: Vec<ErrorEntry>,
}

impl<T> Parsed<T> {
    /// Entity without diagnostics
    pub fn new(item: T) -> Self {
        Self {
            item,
            diagnostics: Vec::new(),
        }
    }

    /// Entity with diagnostics
    pub fn with_diagnostics(item: T, diagnostics: Vec<ErrorEntry>) -> Self {
        Self { item, diagnostics }
    }

    /// True if nothing was flagged
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Convert the entity, keeping the diagnostics
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            item: f(self.item),
            diagnostics: self.diagnostics,
        }
    }
}

/// Outcome of a single grammar, `Err` is fatal for the card
pub type CardResult<T> = Result<Parsed<T>, ErrorEntry>;

/// Every kind of card the grammars produce
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    /// Surface card
    Surface(Surface),
    /// Cell card
    Cell(Cell),
    /// Material card
    Material(Material),
    /// Standard `F` tally
    Tally(Tally),
    /// Energy bins for tally `id`, `e0` applies to all tallies
    TallyEnergy {
        /// Tally number, 0 for the default card
        id: u32,
        /// Raw bin boundaries
        bins: Vec<String>,
    },
    /// Comment for tally `id`
    TallyComment {
        /// Tally number
        id: u32,
        /// Comment text
        text: String,
    },
    /// Transformation card
    Transformation(Transformation),
    /// Run setting (`kcode`, `mode`, `nps`)
    Setting(Setting),
}

/// A card grammar and the lead-token check used to select it
pub struct Grammar {
    /// Short name used in logs
    pub name: &'static str,
    matches: fn(&str) -> bool,
    parse: fn(&str, Option<String>) -> CardResult<Card>,
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Grammar").field("name", &self.name).finish()
    }
}

impl Grammar {
    /// True if the card's lead token belongs to this grammar
    pub fn matches(&self, line: &str) -> bool {
        (self.matches)(line)
    }

    /// Parse the card, or `None` if the lead token does not match
    pub fn try_parse(&self, line: &str, comment: Option<String>) -> Option<CardResult<Card>> {
        self.matches(line).then(|| (self.parse)(line, comment))
    }
}

/// Every card in the cell block is a cell
static CELL_GRAMMARS: &[Grammar] = &[Grammar {
    name: "cell",
    matches: any_card,
    parse: cell_card,
}];

/// Every card in the surface block is a surface
static SURFACE_GRAMMARS: &[Grammar] = &[Grammar {
    name: "surface",
    matches: any_card,
    parse: surface_card,
}];

/// Data cards of interest, anything else in the block is skipped
static PHYSICS_GRAMMARS: &[Grammar] = &[
    Grammar {
        name: "material",
        matches: material::is_material,
        parse: material_card,
    },
    Grammar {
        name: "transformation",
        matches: transformation::is_transformation,
        parse: transformation_card,
    },
    Grammar {
        name: "tally",
        matches: tally::is_tally,
        parse: tally_card,
    },
    Grammar {
        name: "tally energy",
        matches: tally::is_tally_energy,
        parse: tally_energy_card,
    },
    Grammar {
        name: "tally comment",
        matches: tally::is_tally_comment,
        parse: tally_comment_card,
    },
    Grammar {
        name: "setting",
        matches: physics::is_setting,
        parse: setting_card,
    },
];

/// Ordered grammar table for a block
pub fn grammars(block: BlockKind) -> &'static [Grammar] {
    match block {
        BlockKind::Cells => CELL_GRAMMARS,
        BlockKind::Surfaces => SURFACE_GRAMMARS,
        BlockKind::Physics => PHYSICS_GRAMMARS,
    }
}

/// Parse a card with the first matching grammar of its block
///
/// Returns `None` for cards that no grammar of the block recognises.
///
/// ```rust
/// # use mcnpkit_input::BlockKind;
/// # use mcnpkit_input::parsers::{dispatch, Card};
/// let card = dispatch(BlockKind::Physics, "tr1 0 0 5", None);
/// assert!(matches!(card, Some(Ok(p)) if matches!(p.item, Card::Transformation(_))));
///
/// assert!(dispatch(BlockKind::Physics, "sdef par=n erg=14", None).is_none());
/// ```
pub fn dispatch(block: BlockKind, line: &str, comment: Option<String>) -> Option<CardResult<Card>> {
    grammars(block)
        .iter()
        .find(|grammar| grammar.matches(line))
        .map(|grammar| (grammar.parse)(line, comment))
}

fn any_card(line: &str) -> bool {
    !line.trim().is_empty()
}

fn cell_card(line: &str, comment: Option<String>) -> CardResult<Card> {
    parse_cell(line, comment).map(|p| p.map(Card::Cell))
}

fn surface_card(line: &str, comment: Option<String>) -> CardResult<Card> {
    parse_surface(line, comment).map(|p| p.map(Card::Surface))
}

fn material_card(line: &str, comment: Option<String>) -> CardResult<Card> {
    parse_material(line, comment).map(|p| p.map(Card::Material))
}

fn transformation_card(line: &str, comment: Option<String>) -> CardResult<Card> {
    parse_transformation(line, comment).map(|p| p.map(Card::Transformation))
}

fn tally_card(line: &str, comment: Option<String>) -> CardResult<Card> {
    parse_tally(line, comment).map(|p| p.map(Card::Tally))
}

fn tally_energy_card(line: &str, _comment: Option<String>) -> CardResult<Card> {
    parse_tally_energy(line).map(|p| p.map(|(id, bins)| Card::TallyEnergy { id, bins }))
}

fn tally_comment_card(line: &str, _comment: Option<String>) -> CardResult<Card> {
    parse_tally_comment(line).map(|p| p.map(|(id, text)| Card::TallyComment { id, text }))
}

fn setting_card(line: &str, _comment: Option<String>) -> CardResult<Card> {
    parse_setting(line).map(|p| p.map(Card::Setting))
}

/// More convenient error creation for nom
pub(in crate::parsers) fn cause(s: &str) -> nom::Err<Error<&str>> {
    nom::Err::Error(Error::new(s, ErrorKind::Fail))
}

/// Succeeds without consuming anything at whitespace or the end of input
pub(in crate::parsers) fn token_end(i: &str) -> IResult<&str, &str> {
    peek(alt((space1, eof)))(i)
}
