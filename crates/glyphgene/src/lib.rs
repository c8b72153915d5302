//! Stroke geometry to genome encoding for Han characters.
//!
//! Converts an ordered set of 2D stroke paths (a parsed Han character
//! definition) into a base sequence over {T,C,A,G} that decodes, three
//! letters at a time, into movement vectors from a fixed 21-vector
//! palette. Coherent runs trace the strokes; incoherent runs carry the
//! pen between them, with the adjacency ("coherence") table enforced
//! exactly where intended.
//!
//! Pipeline: character definition → [`spec::GeneSpec`] (parameter
//! grammar, shaping, traversal order) → point segments →
//! [`fit`] (vector approximation) → [`assemble`] (coherence
//! enforcement, validation, serialization) → [`doc::GeneDoc`].
//!
//! The crate does no I/O; documents are plain values for an external
//! writer, and all randomness flows through caller-supplied RNGs
//! (see [`rand::SeedToken`]).

pub mod assemble;
pub mod codon;
pub mod doc;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod han;
pub mod rand;
pub mod spec;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports for the common build entry points.
pub use assemble::build_gene;
pub use doc::build_archetype;
pub use error::{Error, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::assemble::{build_gene, enforce, FittedSegment};
    pub use crate::codon::{
        coherent, decode, encode, Codon, Direction, LengthClass, Vector, VectorId, START_CODON,
    };
    pub use crate::doc::{build_archetype, ArchetypeDoc, GeneDoc, StrokeRef};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Line, PointDistance, Rect, Vec2};
    pub use crate::han::{Group, HanChar, Overlap, Stroke};
    pub use crate::rand::SeedToken;
    pub use crate::spec::{BuildCfg, GeneSpec, JoinSelect, Segment, Transform};
}
