/// Run settings picked out of the data block
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Physics {
    /// Raw `kcode` card text
    pub kcode: Option<String>,
    /// Particle designators listed on the `mode` card
    pub mode: Vec<String>,
    /// Number of histories from the `nps` card
    pub nps: Option<u64>,
}

impl Physics {
    /// True for criticality problems
    pub fn is_criticality(&self) -> bool {
        self.kcode.is_some()
    }
}
