//! Coherence enforcement and gene assembly.
//!
//! Per build, over the ordered segment stream:
//! 1. fit each segment from the accumulated end point (incoherent
//!    segments first snap their start onto it, so moves absorb tracing
//!    error);
//! 2. pad undersized incoherent segments with a closed 4-vector detour
//!    and splice canceling pairs wherever an incoherent segment would
//!    read coherent;
//! 3. bind segment boundaries that would register as unintentionally
//!    coherent, splicing onto the incoherent side;
//! 4. validate the whole stream against each segment's declared
//!    intent — a mismatch is a defect, reported, never corrected;
//! 5. serialize to bases (fixed start codon, random synonyms, random
//!    stop) and index each coherent segment's base range.

use rand::Rng;
use tracing::debug;

use crate::codon::{self, coherent, Direction, LengthClass, VectorId, START_CODON};
use crate::doc::{GeneDoc, StrokeRef, CREATION_TOOL};
use crate::error::{Error, Result};
use crate::fit;
use crate::han::HanChar;
use crate::spec::{BuildCfg, GeneSpec, JoinSelect, Segment};

/// Build one gene from a character and a parameter string.
///
/// `rng` drives every random draw (synonym choice, probabilistic join
/// selection); seed it for reproducible output.
pub fn build_gene<R: Rng + ?Sized>(
    han: &HanChar,
    params: &str,
    author: Option<&str>,
    cfg: &BuildCfg,
    select: JoinSelect,
    rng: &mut R,
) -> Result<GeneDoc> {
    han.validate()?;
    let spec = GeneSpec::parse(params, han, select, rng)?;
    let segments = spec.segments(han, cfg);
    let origin = segments[0].points[0];

    let fitted = enforce(&segments)?;

    // Serialize: start codon, one synonym per vector, stop codon.
    let vector_count: usize = fitted.iter().map(|s| s.vectors.len()).sum();
    let mut bases = String::with_capacity((vector_count + 2) * 3);
    bases.push_str(START_CODON.as_str());
    for seg in &fitted {
        for &id in &seg.vectors {
            bases.push_str(codon::encode(id, rng).as_str());
        }
    }
    bases.push_str(codon::encode(VectorId::STOP, rng).as_str());

    // 1-based base ranges; the first vector starts at base 4, right
    // after the start codon.
    let mut strokes = Vec::new();
    let mut position = 0usize;
    let mut base = 4usize;
    for seg in &fitted {
        if seg.coherent {
            strokes.push(StrokeRef {
                base_first: base,
                base_last: base + seg.vectors.len() * 3 - 1,
                han_stroke: spec.han_stroke(position) + 1,
            });
            position += 1;
        }
        base += seg.vectors.len() * 3;
    }

    debug!(
        codepoint = %han.codepoint,
        bases = bases.len(),
        strokes = strokes.len(),
        "assembled gene"
    );
    Ok(GeneDoc {
        uuid: uuid::Uuid::new_v4(),
        author: author.map(str::to_string),
        created: chrono::Utc::now(),
        tool: CREATION_TOOL.to_string(),
        parameters: spec.to_string(),
        name: spec.to_name(&han.codepoint),
        codepoint: han.codepoint.clone(),
        base_count: bases.len(),
        bases,
        origin,
        strokes,
    })
}

/// One fitted segment: declared intent plus its enforced vectors.
#[derive(Clone, Debug)]
pub struct FittedSegment {
    pub coherent: bool,
    pub vectors: Vec<VectorId>,
}

/// Fit and coherence-enforce the segment stream, then validate it.
pub fn enforce(segments: &[Segment]) -> Result<Vec<FittedSegment>> {
    if segments.is_empty() {
        return Ok(Vec::new());
    }
    let mut current = segments[0].points[0];
    let mut out: Vec<FittedSegment> = Vec::with_capacity(segments.len());

    for seg in segments {
        let mut points = seg.points.clone();
        if !seg.coherent && !points.is_empty() {
            // Moves absorb the tracing error accumulated so far.
            points[0] = current;
        }
        let (end, mut vectors) = fit::fit(current, seg.coherent, &points);
        current = end;

        if !seg.coherent {
            if vectors.len() < 3 {
                pad_incoherent(&mut vectors);
            } else {
                splice_incoherent(&mut vectors);
            }
        }

        if let Some(prev) = out.last_mut() {
            bind_boundary(&mut prev.vectors, prev.coherent, &mut vectors);
        }
        out.push(FittedSegment {
            coherent: seg.coherent,
            vectors,
        });
    }

    validate(&out)?;
    Ok(out)
}

/// Pad an undersized incoherent segment with four medium vectors
/// forming a closed detour: out-and-back on a direction guaranteed
/// incoherent with the last real vector (north when there is none),
/// then out-and-back on its perpendicular. Net displacement zero.
fn pad_incoherent(vectors: &mut Vec<VectorId>) {
    let first = match vectors.last() {
        Some(&id) => id.direction().add(3),
        None => Direction::North,
    };
    vectors.push(VectorId::new(first, LengthClass::Medium));
    vectors.push(VectorId::new(first.opposite(), LengthClass::Medium));
    let second = first.add(2);
    vectors.push(VectorId::new(second, LengthClass::Medium));
    vectors.push(VectorId::new(second.opposite(), LengthClass::Medium));
}

/// Break every coherent triple inside an incoherent segment by
/// splicing a canceling `(opposite, vector)` pair in front of it.
fn splice_incoherent(vectors: &mut Vec<VectorId>) {
    let mut i = 2;
    while i < vectors.len() {
        if coherent(vectors[i - 2], vectors[i - 1], vectors[i]) {
            let v = vectors[i];
            vectors.insert(i, v.opposite());
            vectors.insert(i + 1, v);
        }
        i += 1;
    }
}

/// Keep a segment boundary from registering as unintentionally
/// coherent: when either spanning triple reads coherent, splice a
/// closed binding run onto whichever side is incoherent.
fn bind_boundary(prev: &mut Vec<VectorId>, prev_coherent: bool, next: &mut Vec<VectorId>) {
    let spans_coherent = (prev.len() >= 2
        && !next.is_empty()
        && coherent(prev[prev.len() - 2], prev[prev.len() - 1], next[0]))
        || (!prev.is_empty()
            && next.len() >= 2
            && coherent(prev[prev.len() - 1], next[0], next[1]));
    if !spans_coherent {
        return;
    }
    let p = prev[prev.len() - 1];
    let n = next[0];
    let run = [p.opposite(), p, n, n.opposite()];
    if prev_coherent {
        next.splice(0..0, run);
    } else {
        prev.extend(run);
    }
}

/// Check every position's coherence-table verdict against its owning
/// segment's declared flag.
fn validate(segments: &[FittedSegment]) -> Result<()> {
    let flat: Vec<VectorId> = segments
        .iter()
        .flat_map(|s| s.vectors.iter().copied())
        .collect();
    let mut counts = vec![0u32; flat.len()];
    for i in 2..flat.len() {
        if coherent(flat[i - 2], flat[i - 1], flat[i]) {
            counts[i - 2] += 1;
            counts[i - 1] += 1;
            counts[i] += 1;
        }
    }

    let mut offset = 0usize;
    for (idx, seg) in segments.iter().enumerate() {
        let seg_counts = &counts[offset..offset + seg.vectors.len()];
        offset += seg.vectors.len();
        let violated = if seg.coherent {
            seg_counts.iter().any(|&c| c == 0)
        } else {
            seg_counts.iter().any(|&c| c != 0)
        };
        if violated {
            return Err(Error::Coherence {
                segment: idx + 1,
                coherent: seg.coherent,
                vectors: seg.vectors.iter().map(|v| v.name()).collect(),
                counts: seg_counts.to_vec(),
            });
        }
    }
    Ok(())
}
