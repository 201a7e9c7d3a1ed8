//! Static vocabularies used by the parsers and the validator
//!
//! Everything here is data: surface mnemonics, macrobody snippets, particle
//! designators and natural abundances. A [Vocabulary] is built once and
//! passed around by reference, so callers are free to supply their own
//! resources through [Vocabulary::from_json].

// internal modules
use crate::error::{Error, Result};

// standard library
use std::collections::BTreeMap;
use std::sync::OnceLock;

// external crates
use serde::{Deserialize, Serialize};

/// Particle designator table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleInfo {
    /// Designator used on cards, e.g. `N`
    pub designator: String,
    /// Rest mass (MeV)
    pub mass: f64,
    /// Default lower energy cutoff (MeV)
    #[serde(default)]
    pub lower_erg_limit: f64,
    /// Default upper energy cutoff (MeV)
    #[serde(default)]
    pub upper_erg_limit: f64,
}

/// Editor snippet, used here for the macrobody prefixes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    /// Trigger prefixes, the first one is the card mnemonic
    pub prefix: Vec<String>,
    /// Template lines
    pub body: Vec<String>,
    /// Short description
    #[serde(default)]
    pub description: String,
}

/// Collection of all the static lookup tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    /// Surface mnemonic to description
    pub surfaces: BTreeMap<String, String>,
    /// Snippet name to snippet
    pub snippets: BTreeMap<String, Snippet>,
    /// Particle name to designator info
    pub particles: BTreeMap<String, ParticleInfo>,
    /// Atomic number to `(zzzaaa, atom fraction)` pairs
    pub abundances: BTreeMap<u32, Vec<(u32, f64)>>,
}

// Only ever deserialise the bundled data once on first use
static BUNDLED: OnceLock<Vocabulary> = OnceLock::new();

impl Vocabulary {
    /// Vocabulary built from the resources bundled with the crate
    ///
    /// ```rust
    /// # use mcnpkit_input::Vocabulary;
    /// let vocabulary = Vocabulary::bundled();
    /// assert!(vocabulary.is_surface_type("px"));
    /// assert!(vocabulary.is_surface_type("rpp"));
    /// assert!(vocabulary.is_particle("n"));
    /// ```
    pub fn bundled() -> &'static Vocabulary {
        BUNDLED.get_or_init(|| {
            Self::from_json(
                include_str!("../data/vocabulary/surfaces.json"),
                include_str!("../data/vocabulary/macrobodies.json"),
                include_str!("../data/vocabulary/particles.json"),
                include_str!("../data/vocabulary/abundances.json"),
            )
            .expect("Bundled vocabulary resources should always decode")
        })
    }

    /// Build a vocabulary from JSON text for each table
    pub fn from_json(
        surfaces: &str,
        snippets: &str,
        particles: &str,
        abundances: &str,
    ) -> Result<Self> {
        Ok(Self {
            surfaces: decode("surfaces", surfaces)?,
            snippets: decode("snippets", snippets)?,
            particles: decode("particles", particles)?,
            abundances: decode("abundances", abundances)?,
        })
    }

    /// Description of a plain surface mnemonic
    pub fn surface_description(&self, kind: &str) -> Option<&str> {
        self.surfaces.get(kind).map(|s| s.as_str())
    }

    /// Macrobody snippet whose primary prefix is `kind`
    pub fn macrobody(&self, kind: &str) -> Option<&Snippet> {
        self.snippets
            .values()
            .find(|snippet| snippet.prefix.first().is_some_and(|p| p == kind))
    }

    /// True for plain surfaces and macrobodies
    pub fn is_surface_type(&self, kind: &str) -> bool {
        self.surface_description(kind).is_some() || self.macrobody(kind).is_some()
    }

    /// Particle info for a designator, case-insensitive
    pub fn particle(&self, designator: &str) -> Option<&ParticleInfo> {
        self.particles
            .values()
            .find(|p| p.designator.eq_ignore_ascii_case(designator))
    }

    /// True if the designator is a known particle
    pub fn is_particle(&self, designator: &str) -> bool {
        self.particle(designator).is_some()
    }

    /// Natural abundance table for an element
    pub fn natural_abundances(&self, z: u32) -> Option<&[(u32, f64)]> {
        self.abundances.get(&z).map(|v| v.as_slice())
    }
}

fn decode<T: serde::de::DeserializeOwned>(name: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::InvalidVocabulary {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_tables() {
        let vocabulary = Vocabulary::bundled();
        assert!(vocabulary.surface_description("c/z").is_some());
        assert!(vocabulary.macrobody("rcc").is_some());
        assert!(vocabulary.macrobody("xyz").is_none());
        assert!(!vocabulary.is_surface_type("pp"));
        assert_eq!(vocabulary.particle("P").map(|p| p.mass), Some(0.0));
        assert!(vocabulary.is_particle("#"));
        assert!(!vocabulary.is_particle("j"));
        assert_eq!(vocabulary.natural_abundances(92).map(|t| t.len()), Some(3));
    }

    #[test]
    fn custom_tables() {
        let vocabulary = Vocabulary::from_json(
            r#"{"px": "plane"}"#,
            "{}",
            r#"{"neutron": {"designator": "N", "mass": 939.6}}"#,
            r#"{"1": [[1001, 1.0]]}"#,
        )
        .unwrap();

        assert!(vocabulary.is_surface_type("px"));
        assert!(!vocabulary.is_surface_type("rpp"));
        assert!(vocabulary.is_particle("n"));
        assert_eq!(vocabulary.natural_abundances(1), Some(&[(1001, 1.0)][..]));
    }

    #[test]
    fn broken_tables() {
        let result = Vocabulary::from_json("{", "{}", "{}", "{}");
        assert!(matches!(result, Err(Error::InvalidVocabulary { .. })));
    }
}
