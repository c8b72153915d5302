//! Output documents handed to the external writer.
//!
//! The core performs no file or network I/O: an archetype document
//! mirrors the consumed character definition verbatim (for caching),
//! and a gene document carries one generated base sequence with its
//! metadata. Both are plain serializable values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::geometry::{Rect, Vec2};
use crate::han::{Group, HanChar, Overlap, Stroke};

/// Tool tag stamped into generated documents.
pub const CREATION_TOOL: &str = concat!("glyphgene ", env!("CARGO_PKG_VERSION"));

/// Reusable geometric description of a character, mirrored from the
/// upstream definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchetypeDoc {
    pub uuid: Uuid,
    pub codepoint: String,
    pub created: DateTime<Utc>,
    pub tool: String,
    pub bounds: Rect,
    pub length: f64,
    pub min_stroke_length: f64,
    pub groups: Vec<Group>,
    pub strokes: Vec<Stroke>,
    pub overlaps: Vec<Overlap>,
}

/// Validate a character definition and mirror it for caching.
pub fn build_archetype(han: &HanChar) -> Result<ArchetypeDoc> {
    han.validate()?;
    Ok(ArchetypeDoc {
        uuid: Uuid::new_v4(),
        codepoint: han.codepoint.clone(),
        created: Utc::now(),
        tool: CREATION_TOOL.to_string(),
        bounds: han.bounds,
        length: han.length,
        min_stroke_length: han.min_stroke_length,
        groups: han.groups.clone(),
        strokes: han.strokes.clone(),
        overlaps: han.overlaps.clone(),
    })
}

/// Base range of one coherent segment and the source stroke it traces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeRef {
    /// 1-based first base of the segment's codons.
    pub base_first: usize,
    /// 1-based last base.
    pub base_last: usize,
    /// 1-based index of the corresponding Han stroke.
    pub han_stroke: usize,
}

/// One generated gene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneDoc {
    pub uuid: Uuid,
    pub author: Option<String>,
    pub created: DateTime<Utc>,
    pub tool: String,
    /// Canonical creation parameter string, or `default`.
    pub parameters: String,
    /// File-system-safe name derived from codepoint and parameters.
    pub name: String,
    /// Source character codepoint.
    pub codepoint: String,
    /// The full base sequence, start and stop codons included.
    pub bases: String,
    pub base_count: usize,
    /// Where the traced walk begins.
    pub origin: Vec2,
    /// One entry per coherent segment, in sequence order.
    pub strokes: Vec<StrokeRef>,
}
