//! Gene specification: the per-build parameter grammar and the shaped,
//! ordered point segments it produces.
//!
//! Grammar (colon-separated tokens; any unrecognized token fails the
//! whole parse):
//! - `o1r,3,...` / `ohan` / `omin` — stroke traversal order: explicit
//!   1-based list with optional per-stroke `r`eversal (partial lists
//!   auto-complete ascending, forward-facing), source order, or the
//!   regret-merge heuristic.
//! - `h<x>,<y>` / `t<x>,<y>` — incoherent head/tail extension with the
//!   given displacement.
//! - `sx2,sy50%,dx-3,dy1` (any 1–4 terms) — whole-gene shaping.
//! - `g<N>(...)` / `s<N>(...)` — shaping of one 1-based group/stroke.
//!
//! A parsed `GeneSpec` is immutable; `segments` applies the shaping and
//! ordering to a character and emits the alternating coherent
//! (stroke) / incoherent (connector, head, tail) point segments the
//! fitter consumes.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use crate::codon::MEDIUM_LEN;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Vec2};
use crate::han::HanChar;

mod order;

pub use order::JoinSelect;

const FLOAT: &str = r"[+-]?\d+(?:\.\d+)?";

static RE_ORDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^o(\d+r?(?:,\d+r?)*|han|min)$").unwrap());
static RE_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^h({FLOAT}),({FLOAT})$")).unwrap());
static RE_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^t({FLOAT}),({FLOAT})$")).unwrap());
static RE_TRANSFORM: Lazy<Regex> = Lazy::new(|| {
    let term = format!(r"(?:s[xy]{FLOAT}%?|d[xy]{FLOAT})");
    Regex::new(&format!(r"^{term}(?:,{term}){{0,3}}$")).unwrap()
});
static RE_GROUP: Lazy<Regex> = Lazy::new(|| {
    let term = format!(r"(?:s[xy]{FLOAT}%?|d[xy]{FLOAT})");
    Regex::new(&format!(r"^g(\d+)\(({term}(?:,{term}){{0,3}})\)$")).unwrap()
});
static RE_STROKE: Lazy<Regex> = Lazy::new(|| {
    let term = format!(r"(?:s[xy]{FLOAT}%?|d[xy]{FLOAT})");
    Regex::new(&format!(r"^s(\d+)\(({term}(?:,{term}){{0,3}})\)$")).unwrap()
});

/// Scale/translate applied to a point set.
///
/// Scaling is compensated around the shaped object's bounding-rectangle
/// center, so growing or shrinking does not also shift the shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub dx: f64,
    pub dy: f64,
    sx_pct: bool,
    sy_pct: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            sx: 1.0,
            sy: 1.0,
            dx: 0.0,
            dy: 0.0,
            sx_pct: false,
            sy_pct: false,
        }
    }
}

impl Transform {
    pub fn scale(sx: f64, sy: f64) -> Transform {
        Transform {
            sx,
            sy,
            ..Transform::default()
        }
    }

    pub fn translate(dx: f64, dy: f64) -> Transform {
        Transform {
            dx,
            dy,
            ..Transform::default()
        }
    }

    /// Parse one shaping token, e.g. `sx2,sy50%,dx-3`.
    fn parse(token: &str) -> Result<Transform> {
        if !RE_TRANSFORM.is_match(token) {
            return Err(Error::specification(token));
        }
        let mut xf = Transform::default();
        for term in token.split(',') {
            let axis = term.as_bytes()[1];
            let rest = &term[2..];
            if term.starts_with('s') {
                let pct = rest.ends_with('%');
                let value: f64 = rest.trim_end_matches('%').parse().unwrap();
                let value = if pct { value / 100.0 } else { value };
                if axis == b'x' {
                    xf.sx = value;
                    xf.sx_pct = pct;
                } else {
                    xf.sy = value;
                    xf.sy_pct = pct;
                }
            } else {
                let value: f64 = rest.parse().unwrap();
                if axis == b'x' {
                    xf.dx = value;
                } else {
                    xf.dy = value;
                }
            }
        }
        Ok(xf)
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.sx == 1.0 && self.sy == 1.0 && self.dx == 0.0 && self.dy == 0.0
    }

    /// Apply in place: translate, scale, and re-anchor on the bounds
    /// center when shaping a bounded object.
    pub fn apply(&self, points: &mut [Vec2], bounds: Option<&Rect>) {
        if self.is_identity() {
            return;
        }
        let comp = match bounds {
            Some(r) => {
                let c = r.center();
                Vec2::new(c.x - c.x * self.sx, c.y - c.y * self.sy)
            }
            None => Vec2::zeros(),
        };
        for p in points.iter_mut() {
            p.x = (p.x + self.dx) * self.sx + comp.x;
            p.y = (p.y + self.dy) * self.sy + comp.y;
        }
    }

    /// Compact name suffix, e.g. `sx2_00_dy3_50` (`pct` marks
    /// percentage scales).
    fn name(&self) -> String {
        fn num(v: f64) -> String {
            format!("{v:.2}").replace('.', "_")
        }
        let mut parts = Vec::new();
        if self.sx != 1.0 {
            let shown = if self.sx_pct { self.sx * 100.0 } else { self.sx };
            parts.push(format!("sx{}{}", num(shown), if self.sx_pct { "pct" } else { "" }));
        }
        if self.sy != 1.0 {
            let shown = if self.sy_pct { self.sy * 100.0 } else { self.sy };
            parts.push(format!("sy{}{}", num(shown), if self.sy_pct { "pct" } else { "" }));
        }
        if self.dx != 0.0 {
            parts.push(format!("dx{}", num(self.dx)));
        }
        if self.dy != 0.0 {
            parts.push(format!("dy{}", num(self.dy)));
        }
        parts.join("_")
    }

    /// Canonical parameter form, always spelling all four terms.
    fn param_str(&self) -> String {
        format!("sx{},sy{},dx{},dy{}", self.sx, self.sy, self.dx, self.dy)
    }
}

/// Build configuration, replacing process-wide defaults.
#[derive(Clone, Copy, Debug)]
pub struct BuildCfg {
    /// Default x scale merged into the gene transform.
    pub sx_default: f64,
    /// Default y scale merged into the gene transform.
    pub sy_default: f64,
}

impl Default for BuildCfg {
    fn default() -> Self {
        // Aim for about 50 medium vectors across a 500-unit source
        // grid. Genes are starting points for downstream evolution, so
        // this is a guess the user's own scaling can override for the
        // very small and the very large.
        let s = 50.0 * MEDIUM_LEN / 500.0;
        BuildCfg {
            sx_default: s,
            sy_default: s,
        }
    }
}

/// One run of points to trace, tagged with its coherence intent.
#[derive(Clone, Debug)]
pub struct Segment {
    pub coherent: bool,
    pub points: Vec<Vec2>,
}

/// Parsed, immutable per-gene build parameters.
#[derive(Clone, Debug)]
pub struct GeneSpec {
    /// Resolved traversal order: `(0-based stroke, reversed)`.
    order: Vec<(usize, bool)>,
    /// True when an order other than source order was requested.
    order_given: bool,
    head: Option<Vec2>,
    tail: Option<Vec2>,
    xf: Option<Transform>,
    group_xfs: Vec<Option<Transform>>,
    stroke_xfs: Vec<Option<Transform>>,
}

impl GeneSpec {
    /// Parse a parameter string against a character. Empty input and
    /// the literal `default` mean source order with no shaping. Any
    /// unrecognized token fails the parse with nothing applied.
    pub fn parse<R: Rng + ?Sized>(
        params: &str,
        han: &HanChar,
        select: JoinSelect,
        rng: &mut R,
    ) -> Result<GeneSpec> {
        let n = han.stroke_count();
        let mut explicit: Option<Vec<(usize, bool)>> = None;
        let mut use_min = false;
        let mut order_given = false;
        let mut spec = GeneSpec {
            order: Vec::new(),
            order_given: false,
            head: None,
            tail: None,
            xf: None,
            group_xfs: vec![None; han.groups.len()],
            stroke_xfs: vec![None; n],
        };

        let params = if params == "default" { "" } else { params };
        for token in params.split(':').filter(|t| !t.is_empty()) {
            if let Some(caps) = RE_ORDER.captures(token) {
                match &caps[1] {
                    "han" => {
                        order_given = false;
                        use_min = false;
                        explicit = None;
                    }
                    "min" => {
                        order_given = true;
                        use_min = true;
                    }
                    list => {
                        order_given = true;
                        explicit = Some(parse_order_list(list, n, token)?);
                    }
                }
            } else if let Some(caps) = RE_HEAD.captures(token) {
                spec.head = Some(Vec2::new(
                    caps[1].parse().unwrap(),
                    caps[2].parse().unwrap(),
                ));
            } else if let Some(caps) = RE_TAIL.captures(token) {
                spec.tail = Some(Vec2::new(
                    caps[1].parse().unwrap(),
                    caps[2].parse().unwrap(),
                ));
            } else if RE_TRANSFORM.is_match(token) {
                spec.xf = Some(Transform::parse(token)?);
            } else if let Some(caps) = RE_GROUP.captures(token) {
                let g: usize = caps[1].parse().map_err(|_| Error::specification(token))?;
                if g == 0 || g > han.groups.len() {
                    return Err(Error::specification(token));
                }
                spec.group_xfs[g - 1] = Some(Transform::parse(&caps[2])?);
            } else if let Some(caps) = RE_STROKE.captures(token) {
                let s: usize = caps[1].parse().map_err(|_| Error::specification(token))?;
                if s == 0 || s > n {
                    return Err(Error::specification(token));
                }
                spec.stroke_xfs[s - 1] = Some(Transform::parse(&caps[2])?);
            } else {
                return Err(Error::specification(token));
            }
        }

        spec.order_given = order_given;
        spec.order = match explicit {
            Some(order) => order,
            None if use_min => order::heuristic_order(han, select, rng),
            None => (0..n).map(|s| (s, false)).collect(),
        };
        Ok(spec)
    }

    /// Traversal order as `(0-based stroke, reversed)` pairs.
    #[inline]
    pub fn order(&self) -> &[(usize, bool)] {
        &self.order
    }

    /// Source (Han) stroke index for a traversal position. Both are
    /// 0-based.
    #[inline]
    pub fn han_stroke(&self, position: usize) -> usize {
        self.order[position].0
    }

    /// True when the spec is indistinguishable from an empty parameter
    /// string.
    pub fn is_default(&self) -> bool {
        !self.order_given
            && self.head.is_none()
            && self.tail.is_none()
            && self.xf.is_none()
            && self.group_xfs.iter().all(Option::is_none)
            && self.stroke_xfs.iter().all(Option::is_none)
    }

    /// File-system-safe gene name: the bare codepoint when default,
    /// else the codepoint plus one suffix per non-default option.
    pub fn to_name(&self, codepoint: &str) -> String {
        if self.is_default() {
            return codepoint.to_string();
        }
        let mut name = codepoint.to_string();
        if self.order_given {
            let order = self
                .order
                .iter()
                .map(|&(s, r)| format!("{}{}", s + 1, if r { "r" } else { "" }))
                .collect::<Vec<_>>()
                .join("_");
            name.push_str(&format!("-o{order}"));
        }
        if let Some(h) = self.head {
            name.push_str(&format!("-h{}_{}", h.x as i64, h.y as i64));
        }
        if let Some(t) = self.tail {
            name.push_str(&format!("-t{}_{}", t.x as i64, t.y as i64));
        }
        if let Some(xf) = &self.xf {
            name.push_str(&format!("-{}", xf.name()));
        }
        for (i, xf) in self.group_xfs.iter().enumerate() {
            if let Some(xf) = xf {
                name.push_str(&format!("-g{}_{}", i + 1, xf.name()));
            }
        }
        for (i, xf) in self.stroke_xfs.iter().enumerate() {
            if let Some(xf) = xf {
                name.push_str(&format!("-s{}_{}", i + 1, xf.name()));
            }
        }
        name
    }

    /// Shape, order, and segment a character's points.
    ///
    /// Produces the alternating segment stream: one coherent segment
    /// per stroke in traversal order, an incoherent connector between
    /// consecutive strokes, optional incoherent head/tail extensions,
    /// all translated so the first point sits at the origin offset by
    /// the gene transform's displacement.
    pub fn segments(&self, han: &HanChar, cfg: &BuildCfg) -> Vec<Segment> {
        let mut per_stroke: Vec<Vec<Vec2>> =
            han.strokes.iter().map(|s| s.forward_points()).collect();

        for (i, xf) in self.stroke_xfs.iter().enumerate() {
            if let Some(xf) = xf {
                xf.apply(&mut per_stroke[i], Some(&han.strokes[i].bounds));
            }
        }
        for (g, xf) in self.group_xfs.iter().enumerate() {
            if let Some(xf) = xf {
                let group = &han.groups[g];
                for &s in &group.contained {
                    xf.apply(&mut per_stroke[s], Some(&group.bounds));
                }
            }
        }

        // The user's gene shaping rides on top of the default scale.
        let user = self.xf.unwrap_or_default();
        let gene_xf = Transform {
            sx: user.sx * cfg.sx_default,
            sy: user.sy * cfg.sy_default,
            dx: user.dx,
            dy: user.dy,
            ..Transform::default()
        };
        for pts in &mut per_stroke {
            gene_xf.apply(pts, None);
        }

        let mut segments: Vec<Segment> = Vec::with_capacity(self.order.len() * 2 + 1);
        for &(s, reversed) in &self.order {
            let mut points = per_stroke[s].clone();
            if reversed {
                points.reverse();
            }
            if let Some(prev) = segments.last() {
                let from = *prev.points.last().unwrap();
                segments.push(Segment {
                    coherent: false,
                    points: vec![from, points[0]],
                });
            }
            segments.push(Segment {
                coherent: true,
                points,
            });
        }

        if let Some(h) = self.head {
            let start = segments[0].points[0];
            segments.insert(
                0,
                Segment {
                    coherent: false,
                    points: vec![start - h, start],
                },
            );
        }
        if let Some(t) = self.tail {
            let end = *segments.last().unwrap().points.last().unwrap();
            segments.push(Segment {
                coherent: false,
                points: vec![end, end + t],
            });
        }

        let first = segments[0].points[0];
        let shift = Vec2::new(user.dx, user.dy) - first;
        if shift != Vec2::zeros() {
            for seg in &mut segments {
                for p in &mut seg.points {
                    *p += shift;
                }
            }
        }

        tracing::debug!(
            strokes = self.order.len(),
            segments = segments.len(),
            "segmented character"
        );
        segments
    }
}

impl std::fmt::Display for GeneSpec {
    /// Canonical parameter string; `default` when nothing was asked.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_default() {
            return f.write_str("default");
        }
        let mut tokens = vec![format!(
            "o{}",
            self.order
                .iter()
                .map(|&(s, r)| format!("{}{}", s + 1, if r { "r" } else { "" }))
                .collect::<Vec<_>>()
                .join(",")
        )];
        if let Some(h) = self.head {
            tokens.push(format!("h{},{}", h.x, h.y));
        }
        if let Some(t) = self.tail {
            tokens.push(format!("t{},{}", t.x, t.y));
        }
        if let Some(xf) = &self.xf {
            tokens.push(xf.param_str());
        }
        for (i, xf) in self.group_xfs.iter().enumerate() {
            if let Some(xf) = xf {
                tokens.push(format!("g{}({})", i + 1, xf.param_str()));
            }
        }
        for (i, xf) in self.stroke_xfs.iter().enumerate() {
            if let Some(xf) = xf {
                tokens.push(format!("s{}({})", i + 1, xf.param_str()));
            }
        }
        f.write_str(&tokens.join(":"))
    }
}

/// Parse `1r,3,2`-style order lists; partial lists auto-complete with
/// the remaining strokes ascending, forward-facing.
fn parse_order_list(list: &str, n: usize, token: &str) -> Result<Vec<(usize, bool)>> {
    let mut order: Vec<(usize, bool)> = Vec::new();
    for item in list.split(',') {
        let reversed = item.ends_with('r');
        let number: usize = item
            .trim_end_matches('r')
            .parse()
            .map_err(|_| Error::specification(token))?;
        if number == 0 || number > n {
            return Err(Error::specification(token));
        }
        let stroke = number - 1;
        if order.iter().any(|&(s, _)| s == stroke) {
            return Err(Error::specification(token));
        }
        order.push((stroke, reversed));
    }
    for s in 0..n {
        if !order.iter().any(|&(o, _)| o == s) {
            order.push((s, false));
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::han::testutil::{character, stroke};
    use crate::han::Group;
    use crate::rand::SeedToken;

    fn two_strokes() -> HanChar {
        character(
            "4E8C",
            vec![
                stroke(1, &[(0.0, 0.0), (10.0, 0.0)]),
                stroke(2, &[(0.0, 5.0), (10.0, 5.0)]),
            ],
        )
    }

    fn parse(params: &str, han: &HanChar) -> Result<GeneSpec> {
        let mut rng = SeedToken { seed: 1, index: 1 }.to_rng();
        GeneSpec::parse(params, han, JoinSelect::Best, &mut rng)
    }

    #[test]
    fn empty_equals_explicit_han_order() {
        let han = two_strokes();
        let a = parse("", &han).unwrap();
        let b = parse("ohan", &han).unwrap();
        let c = parse("default", &han).unwrap();
        assert!(a.is_default() && b.is_default() && c.is_default());
        assert_eq!(a.order(), b.order());
        assert_eq!(a.order(), c.order());
        assert_eq!(a.to_name("4E8C"), "4E8C");
        assert_eq!(a.to_string(), "default");
    }

    #[test]
    fn unrecognized_tokens_fail() {
        let han = two_strokes();
        assert!(parse("q9", &han).is_err());
        assert!(parse("o1:bogus", &han).is_err());
        assert!(parse("h1", &han).is_err());
        assert!(parse("sz2", &han).is_err());
    }

    #[test]
    fn explicit_order_out_of_range_or_duplicated_fails() {
        let han = two_strokes();
        assert!(parse("o3", &han).is_err());
        assert!(parse("o0", &han).is_err());
        assert!(parse("o1,1r", &han).is_err());
    }

    #[test]
    fn partial_order_autocompletes_ascending() {
        let han = character(
            "4E09",
            vec![
                stroke(1, &[(0.0, 0.0), (10.0, 0.0)]),
                stroke(2, &[(0.0, 5.0), (10.0, 5.0)]),
                stroke(3, &[(0.0, 10.0), (10.0, 10.0)]),
            ],
        );
        let spec = parse("o2r", &han).unwrap();
        assert_eq!(spec.order(), &[(1, true), (0, false), (2, false)]);
        assert_eq!(spec.han_stroke(0), 1);
        assert_eq!(spec.han_stroke(1), 0);
    }

    #[test]
    fn head_tail_and_transform_tokens_parse() {
        let han = two_strokes();
        let spec = parse("h1,0:t-1,0:sx2,dy-3", &han).unwrap();
        assert_eq!(spec.head, Some(Vec2::new(1.0, 0.0)));
        assert_eq!(spec.tail, Some(Vec2::new(-1.0, 0.0)));
        let xf = spec.xf.unwrap();
        assert_eq!(xf.sx, 2.0);
        assert_eq!(xf.dy, -3.0);
        assert!(!spec.is_default());
    }

    #[test]
    fn percentage_scale_divides_by_100() {
        let han = two_strokes();
        let spec = parse("sx50%,sy200%", &han).unwrap();
        let xf = spec.xf.unwrap();
        assert_eq!(xf.sx, 0.5);
        assert_eq!(xf.sy, 2.0);
        assert!(spec.to_name("4E8C").contains("sx50_00pct"));
    }

    #[test]
    fn group_and_stroke_shaping_are_bounds_checked() {
        let mut han = two_strokes();
        assert!(parse("g1(sx2)", &han).is_err());
        han.groups.push(Group {
            bounds: han.bounds,
            length: han.length,
            weighted_center: Vec2::new(5.0, 2.5),
            contained: vec![0, 1],
        });
        assert!(parse("g1(sx2)", &han).is_ok());
        assert!(parse("s3(dx1)", &han).is_err());
        assert!(parse("s2(dx1)", &han).is_ok());
    }

    #[test]
    fn scaling_compensates_around_bounds_center() {
        // Doubling x around center 5 keeps the midpoint put.
        let mut points = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        let xf = Transform::scale(2.0, 1.0);
        let bounds = Rect::new(0.0, 0.0, 10.0, 0.0);
        xf.apply(&mut points, Some(&bounds));
        assert_eq!(points[0], Vec2::new(-5.0, 0.0));
        assert_eq!(points[1], Vec2::new(15.0, 0.0));
    }

    #[test]
    fn segments_interleave_connectors() {
        let han = two_strokes();
        let cfg = BuildCfg {
            sx_default: 1.0,
            sy_default: 1.0,
        };
        let spec = parse("", &han).unwrap();
        let segs = spec.segments(&han, &cfg);
        assert_eq!(segs.len(), 3);
        assert!(segs[0].coherent && !segs[1].coherent && segs[2].coherent);
        // Connector spans previous end to next start.
        assert_eq!(segs[1].points[0], *segs[0].points.last().unwrap());
        assert_eq!(segs[1].points[1], segs[2].points[0]);
        // First point re-origined.
        assert_eq!(segs[0].points[0], Vec2::zeros());
    }

    #[test]
    fn head_and_tail_segments_wrap_the_walk() {
        let han = character("4E00", vec![stroke(1, &[(0.0, 0.0), (10.0, 0.0)])]);
        let cfg = BuildCfg {
            sx_default: 1.0,
            sy_default: 1.0,
        };
        let spec = parse("h1,0:t-1,0", &han).unwrap();
        let segs = spec.segments(&han, &cfg);
        assert_eq!(segs.len(), 3);
        assert!(!segs[0].coherent && segs[1].coherent && !segs[2].coherent);
        // Head starts at the origin and displaces by (1, 0) into the
        // stroke start; tail displaces by (-1, 0) off the stroke end.
        assert_eq!(segs[0].points[0], Vec2::zeros());
        assert_eq!(segs[0].points[1], Vec2::new(1.0, 0.0));
        assert_eq!(segs[1].points[0], Vec2::new(1.0, 0.0));
        let end = *segs[1].points.last().unwrap();
        assert_eq!(segs[2].points[0], end);
        assert_eq!(segs[2].points[1], end + Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn displacement_offsets_the_origin() {
        let han = character("4E00", vec![stroke(1, &[(5.0, 5.0), (15.0, 5.0)])]);
        let cfg = BuildCfg {
            sx_default: 1.0,
            sy_default: 1.0,
        };
        let spec = parse("dx2,dy-1", &han).unwrap();
        let segs = spec.segments(&han, &cfg);
        assert_eq!(segs[0].points[0], Vec2::new(2.0, -1.0));
    }

    #[test]
    fn default_scale_shrinks_the_source_grid() {
        let han = character("4E00", vec![stroke(1, &[(0.0, 0.0), (500.0, 0.0)])]);
        let spec = parse("", &han).unwrap();
        let segs = spec.segments(&han, &BuildCfg::default());
        let end = *segs[0].points.last().unwrap();
        // 500 source units map onto about 50 medium vectors.
        assert!((end.x - 50.0 * MEDIUM_LEN).abs() < 1e-9);
        assert_eq!(end.y, 0.0);
    }

    #[test]
    fn canonical_string_reparses() {
        let han = two_strokes();
        let spec = parse("o2,1:h1,0:sx2", &han).unwrap();
        let rendered = spec.to_string();
        let reparsed = parse(&rendered, &han).unwrap();
        assert_eq!(reparsed.order(), spec.order());
        assert_eq!(reparsed.head, spec.head);
        assert_eq!(reparsed.to_string(), rendered);
    }
}
