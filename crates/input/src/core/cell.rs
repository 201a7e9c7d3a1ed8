use std::collections::BTreeMap;

use mcnpkit_utils::f;

/// Flattened geometry references of a cell
///
/// Only the ids are kept, in first-seen order and without duplicates. The
/// half-space sign and the boolean structure are dropped, which is enough for
/// cross-referencing but not for evaluating geometry.
///
/// ```rust
/// # use mcnpkit_input::Region;
/// let mut region = Region::default();
/// region.add_surface(3);
/// region.add_surface(1);
/// region.add_surface(3);
/// region.add_excluded(7);
///
/// assert_eq!(region.surfaces(), &[3, 1]);
/// assert_eq!(region.excluded(), &[7]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Region {
    surfaces: Vec<u32>,
    excluded: Vec<u32>,
}

impl Region {
    /// Record a surface reference
    pub fn add_surface(&mut self, id: u32) {
        if !self.surfaces.contains(&id) {
            self.surfaces.push(id);
        }
    }

    /// Record a complemented cell (`#id`)
    pub fn add_excluded(&mut self, id: u32) {
        if !self.excluded.contains(&id) {
            self.excluded.push(id);
        }
    }

    /// Surface ids referenced by the region
    pub fn surfaces(&self) -> &[u32] {
        &self.surfaces
    }

    /// Cell ids excluded through the complement operator
    pub fn excluded(&self) -> &[u32] {
        &self.excluded
    }

    /// True if the region references neither surfaces nor cells
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty() && self.excluded.is_empty()
    }
}

/// Interpretation of the signed cell density
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Density {
    /// Negative density, g/cm3
    Mass(f64),
    /// Positive density, atoms/b-cm
    Atomic(f64),
    /// Void cells, or a zero density
    Undefined,
}

/// Value given to a cell keyword
///
/// Keywords with a known type are coerced, everything else is kept as
/// written (e.g. `fill=1 (1 0 0)`).
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordValue {
    /// Integer keywords such as `u` and `lat`
    Integer(i64),
    /// Real keywords such as `vol` and `tmp`
    Float(f64),
    /// Anything else, as written
    Raw(String),
}

impl std::fmt::Display for KeywordValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            KeywordValue::Integer(v) => write!(f, "{v}"),
            KeywordValue::Float(v) => write!(f, "{v}"),
            KeywordValue::Raw(v) => write!(f, "{v}"),
        }
    }
}

/// Cell card data
///
/// Surfaces and other cells are only referenced by id. They are resolved by
/// looking them up in the [McnpInput](crate::McnpInput) when needed.
///
/// ```text
/// 23 12 -9.024 (3 -4 101 -102) #2 imp:n=1 u=4 vol=106.478
/// ```
///
/// A `like n but` cell is kept as a stub with only the id and the `like`
/// reference filled in.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Cell {
    /// Cell number
    pub id: u32,
    /// Material number, 0 for void
    pub material: u32,
    /// Signed density, 0 for void
    pub density: f64,
    /// Geometry references
    pub region: Region,
    /// Importance by particle designator
    pub importance: BTreeMap<String, f64>,
    /// Remaining keywords, by keyword as written
    pub keywords: BTreeMap<String, KeywordValue>,
    /// Cell referenced by a `like n but` card
    pub like: Option<u32>,
    /// Comment associated with the card
    pub comment: Option<String>,
}

impl Cell {
    /// True for void cells (material 0)
    pub fn is_void(&self) -> bool {
        self.material == 0
    }

    /// True for `like n but` stubs
    pub fn is_like_but(&self) -> bool {
        self.like.is_some()
    }

    /// Interpretation of the density sign
    ///
    /// ```rust
    /// # use mcnpkit_input::{Cell, Density};
    /// let cell = Cell { id: 1, material: 3, density: -7.8, ..Default::default() };
    /// assert_eq!(cell.density_kind(), Density::Mass(7.8));
    /// ```
    pub fn density_kind(&self) -> Density {
        if self.density < 0.0 {
            Density::Mass(-self.density)
        } else if self.density > 0.0 {
            Density::Atomic(self.density)
        } else {
            Density::Undefined
        }
    }

    /// Universe number from the `u` keyword
    pub fn universe(&self) -> Option<i64> {
        match self.keywords.get("u")? {
            KeywordValue::Integer(u) => Some(*u),
            _ => None,
        }
    }

    /// Volume from the `vol` keyword
    pub fn volume(&self) -> Option<f64> {
        match self.keywords.get("vol")? {
            KeywordValue::Float(v) => Some(*v),
            KeywordValue::Integer(v) => Some(*v as f64),
            KeywordValue::Raw(_) => None,
        }
    }

    /// Raw fill specification, `fill` or `*fill`
    pub fn fill(&self) -> Option<String> {
        self.keywords
            .get("fill")
            .or_else(|| self.keywords.get("*fill"))
            .map(|v| v.to_string())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(like) = self.like {
            return write!(f, "Cell {}: like {} but ...", self.id, like);
        }

        let importance = self
            .importance
            .iter()
            .map(|(p, v)| f!("{p}: {v}"))
            .collect::<Vec<String>>()
            .join(", ");

        write!(
            f,
            "Cell {}: Material ID {}, Density {}, Surfaces {:?}, Cells {:?}, Importance {{{}}}",
            self.id,
            self.material,
            self.density,
            self.region.surfaces(),
            self.region.excluded(),
            importance
        )
    }
}
