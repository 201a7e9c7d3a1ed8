// Modules under core, split into files for convenience
mod block;
mod cell;
mod element;
mod material;
mod physics;
mod surface;
mod tally;
mod transformation;

// Re-exports of the key public data structures
pub use block::{BlockKind, BlockLocations};
pub use cell::{Cell, Density, KeywordValue, Region};
pub use element::{element_symbol, UNKNOWN_ELEMENT};
pub use material::{Isotope, Material, MaterialEntry};
pub use physics::Physics;
pub use surface::{Boundary, Surface};
pub use tally::Tally;
pub use transformation::Transformation;
