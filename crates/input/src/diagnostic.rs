//! Diagnostics collected while parsing and validating a deck

use mcnpkit_utils::{f, OptionExt};

/// Machine-readable code attached to a diagnostic
///
/// The string form (see [ErrorCode::as_str]) is the stable identifier shown
/// to users, e.g. `CELL_INVALID_SURFACES`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Surface card without a usable id
    SurfaceMissingId,
    /// Surface mnemonic is neither a known surface nor a macrobody
    SurfaceInvalidType,
    /// Surface refers to a transformation that is not defined
    SurfaceInvalidTransformation,
    /// Cell card missing its leading id/material integers
    CellInvalidFormat,
    /// Cell card with a non-numeric density
    CellInvalidDensity,
    /// Geometry token that is neither a surface nor a complement
    CellInvalidGeometry,
    /// Unknown keyword, or a keyword value of the wrong type
    CellInvalidKeyword,
    /// Region references surfaces that are not defined
    CellInvalidSurfaces,
    /// Region references nothing at all
    CellNoSurfaces,
    /// Complement references cells that are not defined
    CellInvalidComplement,
    /// Cell material is not defined
    CellInvalidMaterial,
    /// `like n but` references a cell that is not defined
    CellInvalidLike,
    /// Material card without a usable id
    MaterialInvalidId,
    /// Odd number of isotope/abundance entries
    MaterialUnevenEntries,
    /// Isotope identifier that is not a zzzaaa number
    MaterialInvalidZaid,
    /// Abundance that is not a number
    MaterialInvalidAbundance,
    /// Isotope with an atomic number outside the periodic table
    MaterialIsotopeError,
    /// Tally card without a usable id
    TallyInvalidId,
    /// Collision heating tally with particle designators
    TallyCollisionHeatingParticleConflict,
    /// Unknown particle designator
    TallyInvalidParticle,
    /// Tally without particle designators
    TallyMissingParticle,
    /// Tally without cells/surfaces
    TallyMissingEntries,
    /// Tally number ending in a digit that is not a tally type
    TallyInvalidType,
    /// `e<n>`/`fc<n>` card for a tally that is not defined
    TallyUnknownReference,
    /// No tallies in the whole deck
    TallyBlockEmpty,
    /// Transformation card without a usable id
    TransformationInvalidId,
    /// Transformation card without parameters
    TransformationMissingParameters,
    /// `nps` card without a usable history count
    PhysicsInvalidNps,
    /// `mode` card listing an unknown particle designator
    PhysicsInvalidModeParticle,
}

impl ErrorCode {
    /// Stable string identifier for the code
    ///
    /// ```rust
    /// # use mcnpkit_input::ErrorCode;
    /// assert_eq!(ErrorCode::CellNoSurfaces.as_str(), "CELL_NO_SURFACES");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SurfaceMissingId => "SURFACE_MISSING_ID",
            Self::SurfaceInvalidType => "SURFACE_INVALID_TYPE",
            Self::SurfaceInvalidTransformation => "SURFACE_INVALID_TRANSFORMATION",
            Self::CellInvalidFormat => "CELL_INVALID_FORMAT",
            Self::CellInvalidDensity => "CELL_INVALID_DENSITY",
            Self::CellInvalidGeometry => "CELL_INVALID_GEOMETRY",
            Self::CellInvalidKeyword => "CELL_INVALID_KEYWORD",
            Self::CellInvalidSurfaces => "CELL_INVALID_SURFACES",
            Self::CellNoSurfaces => "CELL_NO_SURFACES",
            Self::CellInvalidComplement => "CELL_INVALID_COMPLEMENT",
            Self::CellInvalidMaterial => "CELL_INVALID_MATERIAL",
            Self::CellInvalidLike => "CELL_INVALID_LIKE",
            Self::MaterialInvalidId => "MATERIAL_INVALID_ID",
            Self::MaterialUnevenEntries => "MATERIAL_UNEVEN_ENTRIES",
            Self::MaterialInvalidZaid => "MATERIAL_INVALID_ZAID",
            Self::MaterialInvalidAbundance => "MATERIAL_INVALID_ABUNDANCE",
            Self::MaterialIsotopeError => "MATERIAL_ISOTOPE_ERROR",
            Self::TallyInvalidId => "TALLY_INVALID_ID",
            Self::TallyCollisionHeatingParticleConflict => {
                "TALLY_COLLISION_HEATING_PARTICLE_CONFLICT"
            }
            Self::TallyInvalidParticle => "TALLY_INVALID_PARTICLE",
            Self::TallyMissingParticle => "TALLY_MISSING_PARTICLE",
            Self::TallyMissingEntries => "TALLY_MISSING_ENTRIES",
            Self::TallyInvalidType => "TALLY_INVALID_TYPE",
            Self::TallyUnknownReference => "TALLY_UNKNOWN_REFERENCE",
            Self::TallyBlockEmpty => "TALLY_BLOCK_EMPTY",
            Self::TransformationInvalidId => "TRANSFORMATION_INVALID_ID",
            Self::TransformationMissingParameters => "TRANSFORMATION_MISSING_PARAMETERS",
            Self::PhysicsInvalidNps => "PHYSICS_INVALID_NPS",
            Self::PhysicsInvalidModeParticle => "PHYSICS_INVALID_MODE_PARTICLE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single diagnostic
///
/// Holds the card text (or entity summary) that triggered it, a human
/// readable message, and an optional [ErrorCode].
///
/// The `Display` form is the block rendered by editor views:
///
/// ```rust
/// # use mcnpkit_input::{ErrorCode, ErrorEntry};
/// let entry = ErrorEntry::new("m5 1001 0.5 8016", "uneven number of material entries")
///     .with_code(ErrorCode::MaterialUnevenEntries);
///
/// assert_eq!(
///     entry.to_string(),
///     "Error Code: MATERIAL_UNEVEN_ENTRIES\nMessage: uneven number of material entries\nCard: m5 1001 0.5 8016\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Card text or entity summary the diagnostic refers to
    pub source_text: String,
    /// Human readable description
    pub message: String,
    /// Machine-readable code, if any
    pub code: Option<ErrorCode>,
}

impl ErrorEntry {
    /// New diagnostic without a code
    pub fn new(source_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Attach an [ErrorCode]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }
}

impl std::fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Error Code: {}", self.code.display_or("N/A"))?;
        writeln!(f, "Message: {}", self.message)?;
        writeln!(f, "Card: {}", self.source_text)
    }
}

/// Ordered, append-only collection of diagnostics
///
/// Nothing is ever raised from here. Callers check
/// [is_not_empty()](ErrorCollection::is_not_empty) before rendering.
///
/// ```rust
/// # use mcnpkit_input::{ErrorCode, ErrorCollection, ErrorEntry};
/// let mut errors = ErrorCollection::new();
/// assert!(errors.is_empty());
///
/// errors.push(ErrorEntry::new("Tally Block", "No tallies present in the file")
///     .with_code(ErrorCode::TallyBlockEmpty));
///
/// assert!(errors.is_not_empty());
/// assert_eq!(errors.count(ErrorCode::TallyBlockEmpty), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorCollection {
    entries: Vec<ErrorEntry>,
}

impl ErrorCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic
    pub fn push(&mut self, entry: ErrorEntry) {
        self.entries.push(entry);
    }

    /// True if no diagnostics were collected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if at least one diagnostic was collected
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over diagnostics in the order they were collected
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorEntry> {
        self.entries.iter()
    }

    /// All diagnostics as a slice
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Diagnostics carrying a specific code
    pub fn with_code(&self, code: ErrorCode) -> impl Iterator<Item = &ErrorEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.code == Some(code))
    }

    /// Number of diagnostics carrying a specific code
    pub fn count(&self, code: ErrorCode) -> usize {
        self.with_code(code).count()
    }

    /// Render every diagnostic as one block of text
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| f!("{entry}"))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Extend<ErrorEntry> for ErrorCollection {
    fn extend<I: IntoIterator<Item = ErrorEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = &'a ErrorEntry;
    type IntoIter = std::slice::Iter<'a, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::fmt::Display for ErrorCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
