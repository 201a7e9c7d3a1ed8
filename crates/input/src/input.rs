// internal modules
use crate::core::{
    BlockKind, BlockLocations, Cell, MaterialEntry, Physics, Surface, Tally, Transformation,
};
use crate::diagnostic::ErrorCollection;
use crate::error::Result;
use crate::reader::Reader;
use crate::validate::Validator;
use crate::vocabulary::Vocabulary;

// standard library
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

// mcnpkit modules
use mcnpkit_utils::f;

// external crates
use log::info;

/// Data structure to store the parsed input deck
///
/// This [McnpInput] is the primary data structure containing every card the
/// grammars recognised, keyed by id.
///
/// | Block    | Cards                                                   |
/// | -------- | ------------------------------------------------------- |
/// | cells    | [Cell] cards, including `like n but` stubs              |
/// | surfaces | [Surface] cards, including macrobodies                  |
/// | physics  | [Material], [Tally], [Transformation] and [Physics]     |
///
/// Entities only reference one another by id, so a cell's surfaces are found
/// by looking them up here. Material 0 is always present as
/// [MaterialEntry::Void].
///
/// [Material]: crate::Material
#[derive(Debug, Clone, PartialEq)]
pub struct McnpInput {
    /// Title card
    pub title: String,
    /// Message block text, if any
    pub message: Option<String>,
    /// Surfaces by id
    pub surfaces: BTreeMap<u32, Surface>,
    /// Cells by id
    pub cells: BTreeMap<u32, Cell>,
    /// Materials by id, always including void at 0
    pub materials: BTreeMap<u32, MaterialEntry>,
    /// Tallies by id
    pub tallies: BTreeMap<u32, Tally>,
    /// Transformations by id
    pub transformations: BTreeMap<u32, Transformation>,
    /// Run settings
    pub physics: Physics,
    /// Line ranges of each block in the original file
    pub block_locations: BlockLocations,
}

impl Default for McnpInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: None,
            surfaces: BTreeMap::new(),
            cells: BTreeMap::new(),
            materials: BTreeMap::from([(0, MaterialEntry::Void)]),
            tallies: BTreeMap::new(),
            transformations: BTreeMap::new(),
            physics: Physics::default(),
            block_locations: BlockLocations::default(),
        }
    }
}

impl McnpInput {
    /// Create an empty model with only the void material
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface by id
    pub fn get_surface(&self, id: u32) -> Option<&Surface> {
        self.surfaces.get(&id)
    }

    /// Cell by id
    pub fn get_cell(&self, id: u32) -> Option<&Cell> {
        self.cells.get(&id)
    }

    /// Material by id, `MaterialEntry::Void` for 0
    pub fn get_material(&self, id: u32) -> Option<&MaterialEntry> {
        self.materials.get(&id)
    }

    /// Tally by id
    pub fn get_tally(&self, id: u32) -> Option<&Tally> {
        self.tallies.get(&id)
    }

    /// Transformation by id
    pub fn get_transformation(&self, id: u32) -> Option<&Transformation> {
        self.transformations.get(&id)
    }

    /// Generic lookup used by editor views
    ///
    /// Never fails, missing entities come back as [Item::NotFound] which
    /// renders as a readable message.
    ///
    /// ```rust
    /// # use mcnpkit_input::{parse_input, Item, ItemKind};
    /// let text = "title\n1 0 -1\n\n1 so 5\n\nf4:n 1\n";
    /// let snapshot = parse_input(text).unwrap();
    ///
    /// let item = snapshot.input.get_item_by_kind(ItemKind::Surface, 1);
    /// assert!(matches!(item, Item::Surface(_)));
    ///
    /// let item = snapshot.input.get_item_by_kind("cell".parse().unwrap(), 2);
    /// assert_eq!(item.to_string(), "Cell 2: not recognised in this input");
    /// ```
    pub fn get_item_by_kind(&self, kind: ItemKind, id: u32) -> Item<'_> {
        let item = match kind {
            ItemKind::Surface => self.get_surface(id).map(Item::Surface),
            ItemKind::Cell => self.get_cell(id).map(Item::Cell),
            ItemKind::Material => self.get_material(id).map(Item::Material),
            ItemKind::Tally => self.get_tally(id).map(Item::Tally),
            ItemKind::Transformation => self.get_transformation(id).map(Item::Transformation),
        };
        item.unwrap_or(Item::NotFound { kind, id })
    }

    /// Block containing a zero-based line of the original file
    pub fn classify_block(&self, line_number: usize) -> Option<BlockKind> {
        self.block_locations.classify(line_number)
    }

    /// Cells using a surface in their geometry
    pub fn cells_using_surface(&self, surface: u32) -> impl Iterator<Item = &Cell> {
        self.cells
            .values()
            .filter(move |cell| cell.region.surfaces().contains(&surface))
    }

    /// Cells filled with a material
    pub fn cells_using_material(&self, material: u32) -> impl Iterator<Item = &Cell> {
        self.cells
            .values()
            .filter(move |cell| !cell.is_like_but() && cell.material == material)
    }
}

/// Kinds of entity that can be looked up by id
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// [Surface] cards
    Surface,
    /// [Cell] cards
    Cell,
    /// Material cards
    Material,
    /// [Tally] cards
    Tally,
    /// [Transformation] cards
    Transformation,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ItemKind::Surface => "Surface",
            ItemKind::Cell => "Cell",
            ItemKind::Material => "Material",
            ItemKind::Tally => "Tally",
            ItemKind::Transformation => "Transformation",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "surface" | "surfaces" => Ok(ItemKind::Surface),
            "cell" | "cells" => Ok(ItemKind::Cell),
            "material" | "materials" => Ok(ItemKind::Material),
            "tally" | "tallies" => Ok(ItemKind::Tally),
            "transformation" | "transformations" | "tr" => Ok(ItemKind::Transformation),
            _ => Err(f!("unknown item kind \"{s}\"")),
        }
    }
}

/// Result of a generic lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Item<'a> {
    /// Surface found
    Surface(&'a Surface),
    /// Cell found
    Cell(&'a Cell),
    /// Material found, possibly void
    Material(&'a MaterialEntry),
    /// Tally found
    Tally(&'a Tally),
    /// Transformation found
    Transformation(&'a Transformation),
    /// Nothing with this id
    NotFound {
        /// Kind that was requested
        kind: ItemKind,
        /// Id that was requested
        id: u32,
    },
}

impl Item<'_> {
    /// True if nothing was found
    pub fn is_not_found(&self) -> bool {
        matches!(self, Item::NotFound { .. })
    }
}

impl std::fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Item::Surface(surface) => write!(f, "{surface}"),
            Item::Cell(cell) => write!(f, "{cell}"),
            Item::Material(material) => write!(f, "{material}"),
            Item::Tally(tally) => write!(f, "{tally}"),
            Item::Transformation(transformation) => write!(f, "{transformation}"),
            Item::NotFound { kind, id } => write!(f, "{kind} {id}: not recognised in this input"),
        }
    }
}

/// Immutable result of one full parse and validation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The parsed model
    pub input: McnpInput,
    /// Every diagnostic from parsing and validation, in order
    pub errors: ErrorCollection,
}

/// Read and validate an input deck from a file
///
/// Uses the bundled [Vocabulary]. The whole file is read up front.
///
/// ```rust, no_run
/// # use mcnpkit_input::read_input;
/// let snapshot = read_input("path/to/deck.i").unwrap();
/// if snapshot.errors.is_not_empty() {
///     println!("{}", snapshot.errors);
/// }
/// ```
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    read_input_with(path, Vocabulary::bundled())
}

/// Read and validate an input deck from a file with a given vocabulary
pub fn read_input_with<P: AsRef<Path>>(path: P, vocabulary: &Vocabulary) -> Result<Snapshot> {
    info!("Reading {}", path.as_ref().display());
    let text = std::fs::read_to_string(path)?;
    parse_input_with(&text, vocabulary)
}

/// Parse and validate deck text with the bundled vocabulary
pub fn parse_input(text: &str) -> Result<Snapshot> {
    parse_input_with(text, Vocabulary::bundled())
}

/// Parse and validate deck text with a given vocabulary
///
/// Fails only for whole-document problems. Everything wrong with individual
/// cards ends up in [Snapshot::errors].
pub fn parse_input_with(text: &str, vocabulary: &Vocabulary) -> Result<Snapshot> {
    let (input, mut errors) = Reader::new(text).read()?;
    Validator::new(vocabulary).validate(&input, &mut errors);
    info!("Found {} diagnostics", errors.len());
    Ok(Snapshot { input, errors })
}
