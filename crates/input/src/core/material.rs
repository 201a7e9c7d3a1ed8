use std::collections::BTreeMap;

use mcnpkit_utils::f;

use crate::core::element::{element_symbol, UNKNOWN_ELEMENT};
use crate::vocabulary::Vocabulary;

/// Isotope entry of a material card
///
/// Only `z`, `a`, the abundance and the library suffix are stored. The
/// element, display name and packed `zzzaaa` identifier are derived.
///
/// ```rust
/// # use mcnpkit_input::Isotope;
/// let iso = Isotope::from_zzzaaa(26056, 0.9, Some("80c".to_string()));
///
/// assert_eq!(iso.z, 26);
/// assert_eq!(iso.a, 56);
/// assert_eq!(iso.element(), "Fe");
/// assert_eq!(iso.name(), "Fe-56");
/// assert_eq!(iso.zzzaaa(), 26056);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Isotope {
    /// Atomic number
    pub z: u32,
    /// Mass number, 0 for natural abundance
    pub a: u32,
    /// Atom fraction (positive) or mass fraction (negative)
    pub abundance: f64,
    /// Cross section library suffix, e.g. `80c`
    pub library: Option<String>,
}

impl Isotope {
    /// Decode a packed `zzzaaa` identifier
    pub fn from_zzzaaa(zzzaaa: u32, abundance: f64, library: Option<String>) -> Self {
        Self {
            z: zzzaaa / 1000,
            a: zzzaaa % 1000,
            abundance,
            library,
        }
    }

    /// Packed `z * 1000 + a` identifier
    pub fn zzzaaa(&self) -> u32 {
        self.z * 1000 + self.a
    }

    /// Element symbol, or "Unknown Element"
    pub fn element(&self) -> &'static str {
        element_symbol(self.z).unwrap_or(UNKNOWN_ELEMENT)
    }

    /// True if `z` maps to a real element
    pub fn is_known_element(&self) -> bool {
        element_symbol(self.z).is_some()
    }

    /// True for natural abundance entries (`a = 0`)
    pub fn is_natural(&self) -> bool {
        self.a == 0
    }

    /// Display name such as `H-1`, or `C-nat` for natural entries
    pub fn name(&self) -> String {
        if self.is_natural() {
            f!("{}-nat", self.element())
        } else {
            f!("{}-{}", self.element(), self.a)
        }
    }

    /// Expand a natural abundance entry into its isotopes
    ///
    /// Table fractions are scaled by this entry's abundance and the library
    /// suffix is carried over. Entries that are not natural, or that have no
    /// table entry, come back unchanged.
    ///
    /// ```rust
    /// # use mcnpkit_input::{Isotope, Vocabulary};
    /// let vocabulary = Vocabulary::bundled();
    /// let carbon = Isotope::from_zzzaaa(6000, 2.0, None);
    ///
    /// let expanded = carbon.expand_natural(vocabulary);
    /// assert_eq!(expanded.len(), 2);
    /// assert_eq!(expanded[0].zzzaaa(), 6012);
    /// assert!((expanded[0].abundance - 2.0 * 0.9893).abs() < 1e-12);
    /// ```
    pub fn expand_natural(&self, vocabulary: &Vocabulary) -> Vec<Isotope> {
        if !self.is_natural() {
            return vec![self.clone()];
        }

        match vocabulary.natural_abundances(self.z) {
            Some(table) if !table.is_empty() => table
                .iter()
                .map(|(zzzaaa, fraction)| {
                    Isotope::from_zzzaaa(*zzzaaa, self.abundance * fraction, self.library.clone())
                })
                .collect(),
            _ => vec![self.clone()],
        }
    }
}

impl std::fmt::Display for Isotope {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:>4} {:>3} {:>3} {:.3e}",
            self.element(),
            self.z,
            self.a,
            self.abundance
        )
    }
}

/// Material card data
///
/// ```text
/// m1  1001.80c 2  8016.80c 1  nlib=.80c
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Material {
    /// Material number
    pub id: u32,
    /// Isotopes in card order
    pub isotopes: Vec<Isotope>,
    /// Keyword options such as `nlib`, `gas`
    pub options: BTreeMap<String, String>,
    /// Comment associated with the card
    pub comment: Option<String>,
}

impl Material {
    /// Create an empty material
    pub fn new(id: u32, comment: Option<String>) -> Self {
        Self {
            id,
            comment,
            ..Default::default()
        }
    }

    /// Isotopes with natural abundance entries expanded
    pub fn expanded_isotopes(&self, vocabulary: &Vocabulary) -> Vec<Isotope> {
        self.isotopes
            .iter()
            .flat_map(|isotope| isotope.expand_natural(vocabulary))
            .collect()
    }

    /// Isotopes whose atomic number is not a real element
    pub fn unknown_isotopes(&self) -> impl Iterator<Item = &Isotope> {
        self.isotopes.iter().filter(|i| !i.is_known_element())
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // only the five largest contributors are worth showing
        let mut sorted = self.isotopes.iter().collect::<Vec<&Isotope>>();
        sorted.sort_by(|a, b| b.abundance.abs().total_cmp(&a.abundance.abs()));

        let heading = if sorted.len() > 5 {
            "Top 5 Isotopes"
        } else {
            "Isotopes"
        };

        write!(f, "Material {}\n{heading}:\nName   Z   A Abundance", self.id)?;
        for isotope in sorted.iter().take(5) {
            write!(f, "\n{isotope}")?;
        }
        Ok(())
    }
}

/// Entry of the materials map
///
/// Material 0 is reserved for void and always present.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialEntry {
    /// Built-in void material
    Void,
    /// Material defined on an `m` card
    Defined(Material),
}

impl MaterialEntry {
    /// The material definition, if this is not the void entry
    pub fn material(&self) -> Option<&Material> {
        match self {
            MaterialEntry::Void => None,
            MaterialEntry::Defined(material) => Some(material),
        }
    }
}

impl std::fmt::Display for MaterialEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MaterialEntry::Void => write!(f, "Void"),
            MaterialEntry::Defined(material) => write!(f, "{material}"),
        }
    }
}
