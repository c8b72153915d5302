//! Upstream Han character model.
//!
//! The character definition arrives already parsed (retrieval and
//! document parsing live outside this crate) and is the sole upstream
//! input of a build: bounds and length for the whole glyph, per-stroke
//! forward/reverse point lists with fractional distances, stroke
//! groups, and declared overlaps.
//!
//! Invariant: a stroke's reverse point list is the mirror image of its
//! forward list. `validate` checks the structural invariants and
//! reports violations as `Error::UpstreamData`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{PointDistance, Rect, Vec2};

/// One pen stroke with a canonical forward direction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stroke {
    /// 1-based position within the character.
    pub index: usize,
    pub bounds: Rect,
    pub length: f64,
    pub forward: Vec<PointDistance>,
    pub reverse: Vec<PointDistance>,
}

impl Stroke {
    /// First forward point.
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.forward[0].point()
    }

    /// Last forward point.
    #[inline]
    pub fn end(&self) -> Vec2 {
        self.forward[self.forward.len() - 1].point()
    }

    /// Forward points stripped of their fractional distances.
    pub fn forward_points(&self) -> Vec<Vec2> {
        self.forward.iter().map(|pd| pd.point()).collect()
    }
}

/// Subset of strokes sharing a region, shaped together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub bounds: Rect,
    pub length: f64,
    pub weighted_center: Vec2,
    /// 0-based indices into the character's stroke list.
    pub contained: Vec<usize>,
}

/// Declared stroke overlap; carried through to the archetype document,
/// not consumed by the encoding core.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Overlap {
    /// 1-based stroke number.
    pub first: usize,
    /// 1-based stroke number.
    pub second: usize,
    pub required: bool,
}

/// A complete Han character definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HanChar {
    /// Hex codepoint, e.g. `"4E2D"`.
    pub codepoint: String,
    pub bounds: Rect,
    pub length: f64,
    pub min_stroke_length: f64,
    pub strokes: Vec<Stroke>,
    pub groups: Vec<Group>,
    pub overlaps: Vec<Overlap>,
}

impl HanChar {
    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Structural validation of the parsed definition.
    pub fn validate(&self) -> Result<()> {
        if self.codepoint.is_empty() {
            return Err(Error::upstream("empty codepoint"));
        }
        if self.strokes.is_empty() {
            return Err(Error::upstream(format!(
                "{} has no strokes",
                self.codepoint
            )));
        }
        for (i, stroke) in self.strokes.iter().enumerate() {
            if stroke.index != i + 1 {
                return Err(Error::upstream(format!(
                    "stroke at position {} carries index {}",
                    i + 1,
                    stroke.index
                )));
            }
            if stroke.forward.is_empty() {
                return Err(Error::upstream(format!("stroke {} has no points", i + 1)));
            }
            if stroke.reverse.len() != stroke.forward.len() {
                return Err(Error::upstream(format!(
                    "stroke {} forward/reverse length mismatch",
                    i + 1
                )));
            }
            let n = stroke.forward.len();
            for (j, rev) in stroke.reverse.iter().enumerate() {
                let fwd = &stroke.forward[n - 1 - j];
                if (rev.point() - fwd.point()).norm() > 1e-9 {
                    return Err(Error::upstream(format!(
                        "stroke {} reverse list is not the mirror of forward",
                        i + 1
                    )));
                }
            }
        }
        for (g, group) in self.groups.iter().enumerate() {
            if group.contained.is_empty() {
                return Err(Error::upstream(format!("group {} contains no strokes", g + 1)));
            }
            for &s in &group.contained {
                if s >= self.strokes.len() {
                    return Err(Error::upstream(format!(
                        "group {} references missing stroke {}",
                        g + 1,
                        s + 1
                    )));
                }
            }
        }
        for overlap in &self.overlaps {
            for s in [overlap.first, overlap.second] {
                if s == 0 || s > self.strokes.len() {
                    return Err(Error::upstream(format!(
                        "overlap references missing stroke {s}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    /// Stroke from bare points, with exact fractional distances and a
    /// mirrored reverse list.
    pub fn stroke(index: usize, points: &[(f64, f64)]) -> Stroke {
        let pts: Vec<Vec2> = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        let mut cumulative = vec![0.0];
        for w in pts.windows(2) {
            let last = *cumulative.last().unwrap();
            cumulative.push(last + (w[1] - w[0]).norm());
        }
        let total: f64 = *cumulative.last().unwrap();
        let frac = |d: f64| if total > 0.0 { d / total } else { 0.0 };
        let forward: Vec<PointDistance> = pts
            .iter()
            .zip(&cumulative)
            .map(|(&p, &d)| PointDistance::new(p, frac(d)))
            .collect();
        let reverse: Vec<PointDistance> = forward
            .iter()
            .rev()
            .map(|pd| PointDistance::new(pd.point(), 1.0 - pd.fractional))
            .collect();
        let bounds = Rect::around(pts.iter().copied()).unwrap();
        Stroke {
            index,
            bounds,
            length: total,
            forward,
            reverse,
        }
    }

    /// Minimal character around the given strokes' point lists.
    pub fn character(codepoint: &str, strokes: Vec<Stroke>) -> HanChar {
        let bounds = Rect::around(
            strokes
                .iter()
                .flat_map(|s| s.forward.iter().map(|pd| pd.point())),
        )
        .unwrap();
        let length = strokes.iter().map(|s| s.length).sum();
        let min_stroke_length = strokes
            .iter()
            .map(|s| s.length)
            .fold(f64::INFINITY, f64::min);
        HanChar {
            codepoint: codepoint.to_string(),
            bounds,
            length,
            min_stroke_length,
            strokes,
            groups: Vec::new(),
            overlaps: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::{character, stroke};
    use super::*;

    #[test]
    fn valid_character_passes() {
        let han = character(
            "4E00",
            vec![stroke(1, &[(0.0, 0.0), (10.0, 0.0)])],
        );
        han.validate().unwrap();
    }

    #[test]
    fn broken_mirror_is_rejected() {
        let mut han = character("4E00", vec![stroke(1, &[(0.0, 0.0), (10.0, 0.0)])]);
        han.strokes[0].reverse[0].x += 1.0;
        let err = han.validate().unwrap_err();
        assert!(matches!(err, Error::UpstreamData { .. }));
    }

    #[test]
    fn group_with_missing_stroke_is_rejected() {
        let mut han = character("4E00", vec![stroke(1, &[(0.0, 0.0), (10.0, 0.0)])]);
        han.groups.push(Group {
            bounds: han.bounds,
            length: han.length,
            weighted_center: Vec2::new(5.0, 0.0),
            contained: vec![3],
        });
        assert!(han.validate().is_err());
    }

    #[test]
    fn overlap_bounds_are_checked() {
        let mut han = character(
            "4E8C",
            vec![
                stroke(1, &[(0.0, 0.0), (10.0, 0.0)]),
                stroke(2, &[(0.0, 5.0), (10.0, 5.0)]),
            ],
        );
        han.overlaps.push(Overlap {
            first: 1,
            second: 2,
            required: true,
        });
        han.validate().unwrap();
        han.overlaps.push(Overlap {
            first: 0,
            second: 2,
            required: false,
        });
        assert!(han.validate().is_err());
    }
}
