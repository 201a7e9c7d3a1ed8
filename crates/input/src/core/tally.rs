use mcnpkit_utils::{f, OptionExt};

/// Standard `F` tally card data
///
/// ```text
/// fc14 flux in the detector cells
/// f14:n,p  10 12 (13 14) t
/// e14  1e-5 1.0 14.0
/// ```
///
/// The `fc` comment and `e` energy bins are separate cards in the deck and
/// are attached to the matching tally once the whole data block is read.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tally {
    /// Tally number
    pub id: u32,
    /// Particle designators after the colon, if any
    pub particles: Option<Vec<String>>,
    /// Raw cell/surface entries
    pub entries: Option<Vec<String>>,
    /// Raw energy bin boundaries from the matching `e` card
    pub energies: Option<Vec<String>>,
    /// Leading `+` (collision heating)
    pub collision_heating: bool,
    /// Leading `*` (energy weighted)
    pub energy_weighted: bool,
    /// Comment associated with the card
    pub comment: Option<String>,
}

impl Tally {
    /// Tally type, the last digit of the tally number
    ///
    /// ```rust
    /// # use mcnpkit_input::Tally;
    /// let tally = Tally { id: 104, ..Default::default() };
    /// assert_eq!(tally.kind(), 4);
    /// ```
    pub fn kind(&self) -> u32 {
        self.id % 10
    }

    /// True if the tally number ends in a valid tally type
    pub fn has_valid_kind(&self) -> bool {
        matches!(self.kind(), 1 | 2 | 4 | 5 | 6 | 7 | 8)
    }

    /// Prepend a comment from a separate `fc` card
    pub fn add_comment(&mut self, comment: &str) {
        self.comment = match self.comment.take() {
            Some(existing) => Some(f!("{comment}\n{existing}")),
            None => Some(comment.to_string()),
        };
    }

    /// Energy bins from a separate `e` card
    pub fn add_energy_bins(&mut self, energies: Vec<String>) {
        self.energies = Some(energies);
    }

    /// Particle designators, empty if none were given
    pub fn particle_list(&self) -> &[String] {
        self.particles.as_deref().unwrap_or_default()
    }

    /// Entries, empty if none were given
    pub fn entry_list(&self) -> &[String] {
        self.entries.as_deref().unwrap_or_default()
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let entries = self.entries.as_ref().map(|e| e.join(" "));
        match &self.particles {
            Some(particles) => write!(
                f,
                "Tally {}:{} {}",
                self.id,
                particles.join(","),
                entries.display()
            ),
            None => write!(f, "Tally {}: {}", self.id, entries.display()),
        }
    }
}
