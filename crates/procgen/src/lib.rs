//! Procedural generation for the combat arena: the terrain height field and its render mesh.

pub mod terrain;

pub use terrain::*;
