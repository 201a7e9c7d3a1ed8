// internal
use super::{Line, Reader};
use crate::core::{BlockKind, MaterialEntry};
use crate::diagnostic::{ErrorCode, ErrorEntry};
use crate::parsers::{dispatch, Card, Setting};

// mcnpkit modules
use mcnpkit_utils::{f, StringExt};

// extrenal
use log::{debug, trace, warn};

impl Reader<'_> {
    /// Dispatch every card of a block, attaching the comments found before it
    pub(super) fn read_block(&mut self, block: BlockKind, lines: &[Line]) {
        debug!("Reading {block} block");
        let mut comments: Vec<String> = Vec::new();

        for line in lines {
            let card = match line {
                Line::Comment(text) => {
                    let squeezed = text.squeeze();
                    let text = squeezed.trim_separators();
                    if !text.is_empty() {
                        comments.push(text.to_string());
                    }
                    continue;
                }
                Line::Card(card) => card,
            };

            // comments only ever belong to the very next card
            let comment = (!comments.is_empty()).then(|| comments.join(" "));
            comments.clear();

            match dispatch(block, card, comment) {
                Some(Ok(parsed)) => {
                    self.errors.extend(parsed.diagnostics);
                    self.insert(card, parsed.item);
                }
                Some(Err(entry)) => {
                    warn!("Skipping {block} card \"{card}\": {}", entry.message);
                    self.errors.push(entry);
                }
                None => trace!("Unrecognised {block} card \"{card}\""),
            }
        }
    }

    /// Store a parsed card, later definitions replace earlier ones
    fn insert(&mut self, source: &str, card: Card) {
        match card {
            Card::Surface(surface) => {
                let id = surface.id;
                if self.input.surfaces.insert(id, surface).is_some() {
                    duplicate("surface", id);
                }
            }
            Card::Cell(cell) => {
                let id = cell.id;
                if self.input.cells.insert(id, cell).is_some() {
                    duplicate("cell", id);
                }
            }
            Card::Material(material) if material.id == 0 => {
                debug!("Material 0 is reserved for void, ignoring \"{source}\"");
            }
            Card::Material(material) => {
                let id = material.id;
                let entry = MaterialEntry::Defined(material);
                if self.input.materials.insert(id, entry).is_some() {
                    duplicate("material", id);
                }
            }
            Card::Tally(tally) => {
                let id = tally.id;
                if self.input.tallies.insert(id, tally).is_some() {
                    duplicate("tally", id);
                }
            }
            Card::Transformation(transformation) => {
                let id = transformation.id;
                if self.input.transformations.insert(id, transformation).is_some() {
                    duplicate("transformation", id);
                }
            }
            Card::Setting(setting) => match setting {
                Setting::Kcode(kcode) => self.input.physics.kcode = Some(kcode),
                Setting::Mode(mode) => self.input.physics.mode = mode,
                Setting::Nps(nps) => self.input.physics.nps = Some(nps),
            },
            companion @ (Card::TallyEnergy { .. } | Card::TallyComment { .. }) => {
                self.companions.push((source.to_string(), companion));
            }
        }
    }

    /// Attach `e<n>` and `fc<n>` cards to their tallies
    ///
    /// `e0` applies to every tally without its own energy card.
    pub(super) fn attach_companions(&mut self) {
        let mut default_bins = None;

        for (source, card) in std::mem::take(&mut self.companions) {
            match card {
                Card::TallyEnergy { id: 0, bins } => default_bins = Some(bins),
                Card::TallyEnergy { id, bins } => match self.input.tallies.get_mut(&id) {
                    Some(tally) => tally.add_energy_bins(bins),
                    None => self.unknown_reference(&source, id),
                },
                Card::TallyComment { id, text } => match self.input.tallies.get_mut(&id) {
                    Some(tally) => tally.add_comment(&text),
                    None => self.unknown_reference(&source, id),
                },
                _ => trace!("Not a tally companion card \"{source}\""),
            }
        }

        if let Some(bins) = default_bins {
            self.input
                .tallies
                .values_mut()
                .filter(|tally| tally.energies.is_none())
                .for_each(|tally| tally.add_energy_bins(bins.clone()));
        }
    }

    fn unknown_reference(&mut self, source: &str, id: u32) {
        warn!("Card \"{source}\" refers to undefined tally {id}");
        self.errors.push(
            ErrorEntry::new(source, f!("tally {id} is not defined"))
                .with_code(ErrorCode::TallyUnknownReference),
        );
    }
}

fn duplicate(kind: &str, id: u32) {
    warn!("Duplicate {kind} {id}, keeping the last definition");
}
