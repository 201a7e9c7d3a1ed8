//! Consistency rules applied to a parsed input model

// internal modules
use crate::core::{Cell, MaterialEntry, Physics, Surface, Tally, Transformation};
use crate::diagnostic::{ErrorCode, ErrorCollection, ErrorEntry};
use crate::vocabulary::Vocabulary;
use crate::McnpInput;

// mcnpkit modules
use mcnpkit_utils::f;

// external crates
use log::{debug, info};

/// Applies every rule to an [McnpInput]
///
/// Validation never modifies the model and never stops early. Every problem
/// is appended to the collection, one diagnostic per entity and rule.
///
/// ```rust
/// # use mcnpkit_input::{parse_input, ErrorCode};
/// let text = "title\n10 0 -1 2 -99\n\n1 px 0\n2 px 1\n3 px 2\n\nf4:n 10\n";
/// let snapshot = parse_input(text).unwrap();
///
/// let found = snapshot.errors.with_code(ErrorCode::CellInvalidSurfaces).collect::<Vec<_>>();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].message, "cell 10 references undefined surfaces: 99");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> Validator<'a> {
    /// Validator checking names against a vocabulary
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Run every pass, appending findings to `errors`
    pub fn validate(&self, input: &McnpInput, errors: &mut ErrorCollection) {
        info!("Validating input model");
        let before = errors.len();

        for surface in input.surfaces.values() {
            self.surface(surface, input, errors);
        }

        for cell in input.cells.values() {
            self.cell(cell, input, errors);
        }

        for entry in input.materials.values() {
            self.material(entry, errors);
        }

        for tally in input.tallies.values() {
            self.tally(tally, errors);
        }

        for transformation in input.transformations.values() {
            self.transformation(transformation, errors);
        }

        self.physics(&input.physics, errors);

        if input.tallies.is_empty() {
            errors.push(
                ErrorEntry::new("Tally Block", "No tallies present in the file")
                    .with_code(ErrorCode::TallyBlockEmpty),
            );
        }

        debug!("Validation added {} diagnostics", errors.len() - before);
    }

    fn surface(&self, surface: &Surface, input: &McnpInput, errors: &mut ErrorCollection) {
        let flag = |message: String, code| ErrorEntry::new(surface.to_string(), message).with_code(code);

        if !self.vocabulary.is_surface_type(&surface.kind) {
            errors.push(flag(
                f!("surface {} has unknown type \"{}\"", surface.id, surface.kind),
                ErrorCode::SurfaceInvalidType,
            ));
        }

        if let Some(transform) = surface.transform {
            if !input.transformations.contains_key(&transform.unsigned_abs()) {
                errors.push(flag(
                    f!("surface {} references undefined transformation {transform}", surface.id),
                    ErrorCode::SurfaceInvalidTransformation,
                ));
            }
        }
    }

    fn cell(&self, cell: &Cell, input: &McnpInput, errors: &mut ErrorCollection) {
        let flag = |message: String, code| ErrorEntry::new(cell.to_string(), message).with_code(code);

        // like-but stubs carry no geometry of their own
        if let Some(like) = cell.like {
            if !input.cells.contains_key(&like) {
                errors.push(flag(
                    f!("cell {} is like undefined cell {like}", cell.id),
                    ErrorCode::CellInvalidLike,
                ));
            }
            return;
        }

        if !input.materials.contains_key(&cell.material) {
            errors.push(flag(
                f!("cell {} references undefined material {}", cell.id, cell.material),
                ErrorCode::CellInvalidMaterial,
            ));
        }

        if cell.region.is_empty() {
            errors.push(flag(
                f!("cell {} has no surfaces", cell.id),
                ErrorCode::CellNoSurfaces,
            ));
        }

        let missing = cell
            .region
            .surfaces()
            .iter()
            .filter(|id| !input.surfaces.contains_key(id))
            .map(|id| id.to_string())
            .collect::<Vec<String>>();

        if !missing.is_empty() {
            errors.push(flag(
                f!("cell {} references undefined surfaces: {}", cell.id, missing.join(" ")),
                ErrorCode::CellInvalidSurfaces,
            ));
        }

        let missing = cell
            .region
            .excluded()
            .iter()
            .filter(|id| !input.cells.contains_key(id))
            .map(|id| id.to_string())
            .collect::<Vec<String>>();

        if !missing.is_empty() {
            errors.push(flag(
                f!("cell {} excludes undefined cells: {}", cell.id, missing.join(" ")),
                ErrorCode::CellInvalidComplement,
            ));
        }
    }

    fn material(&self, entry: &MaterialEntry, errors: &mut ErrorCollection) {
        let Some(material) = entry.material() else {
            return;
        };

        let unknown = material
            .unknown_isotopes()
            .map(|isotope| isotope.zzzaaa().to_string())
            .collect::<Vec<String>>();

        if !unknown.is_empty() {
            errors.push(
                ErrorEntry::new(
                    material.to_string(),
                    f!("material {} has isotopes with no known element: {}", material.id, unknown.join(" ")),
                )
                .with_code(ErrorCode::MaterialIsotopeError),
            );
        }
    }

    fn tally(&self, tally: &Tally, errors: &mut ErrorCollection) {
        let flag = |message: String, code| ErrorEntry::new(tally.to_string(), message).with_code(code);

        if !tally.has_valid_kind() {
            errors.push(flag(
                f!("tally {} ends in {}, which is not a tally type", tally.id, tally.kind()),
                ErrorCode::TallyInvalidType,
            ));
        }

        if tally.collision_heating {
            // collision heating sums over all particles
            if !tally.particle_list().is_empty() {
                errors.push(flag(
                    f!("collision heating tally {} cannot list particles", tally.id),
                    ErrorCode::TallyCollisionHeatingParticleConflict,
                ));
            }
        } else if tally.particle_list().is_empty() {
            errors.push(flag(
                f!("tally {} has no particle designators", tally.id),
                ErrorCode::TallyMissingParticle,
            ));
        } else {
            let invalid = self.unknown_particles(tally.particle_list());
            if !invalid.is_empty() {
                errors.push(flag(
                    f!("tally {} has unknown particles: {}", tally.id, invalid.join(" ")),
                    ErrorCode::TallyInvalidParticle,
                ));
            }
        }

        if tally.entry_list().is_empty() {
            errors.push(flag(
                f!("tally {} has no cells or surfaces", tally.id),
                ErrorCode::TallyMissingEntries,
            ));
        }
    }

    fn transformation(&self, transformation: &Transformation, errors: &mut ErrorCollection) {
        if transformation.parameters.trim().is_empty() {
            errors.push(
                ErrorEntry::new(
                    transformation.to_string(),
                    f!("transformation {} has no parameters", transformation.id),
                )
                .with_code(ErrorCode::TransformationMissingParameters),
            );
        }
    }

    fn physics(&self, physics: &Physics, errors: &mut ErrorCollection) {
        let invalid = self.unknown_particles(&physics.mode);
        if !invalid.is_empty() {
            errors.push(
                ErrorEntry::new(
                    f!("mode {}", physics.mode.join(" ")),
                    f!("mode card has unknown particles: {}", invalid.join(" ")),
                )
                .with_code(ErrorCode::PhysicsInvalidModeParticle),
            );
        }
    }

    fn unknown_particles<'p>(&self, particles: &'p [String]) -> Vec<&'p str> {
        particles
            .iter()
            .filter(|p| !self.vocabulary.is_particle(p))
            .map(|p| p.as_str())
            .collect()
    }
}
