//! Stroke traversal order via regret-guided chain merging.
//!
//! Purpose
//! - Choose an order (and per-stroke facing) that loosely minimizes the
//!   pen travel between strokes, i.e. the incoherent connector length.
//!
//! Model
//! - Every stroke starts as a two-ended chain (its endpoints). Each
//!   round scores, for every chain end, its cheapest join onto another
//!   chain's end, together with the join's regret: the gap between that
//!   end's best and second-best alternative. The join with the greatest
//!   regret is performed (reversing either chain as needed so the
//!   joined ends become adjacent) until a single chain remains, which
//!   reads off as the traversal order.
//! - `JoinSelect::Weighted` draws the join at random, weighted by
//!   regret, instead of always taking the maximum; repeated builds then
//!   vary unless the caller seeds the RNG.
//!
//! The candidate set shrinks by one chain per round, so the loop
//! terminates by construction. Equal regrets break deterministically on
//! the lowest (chain, end) pair.

use rand::Rng;

use crate::geometry::{dist, Vec2};
use crate::han::HanChar;

/// How a join is selected among the scored candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JoinSelect {
    /// Always the greatest-regret join (deterministic).
    #[default]
    Best,
    /// Random, weighted by regret.
    Weighted,
}

#[derive(Clone, Copy)]
struct Candidate {
    chain: usize,
    at_head: bool,
    target: usize,
    target_head: bool,
    cost: f64,
    regret: f64,
}

/// Traversal order as `(0-based stroke index, reversed)` pairs.
pub(crate) fn heuristic_order<R: Rng + ?Sized>(
    han: &HanChar,
    select: JoinSelect,
    rng: &mut R,
) -> Vec<(usize, bool)> {
    let n = han.stroke_count();
    if n <= 1 {
        return (0..n).map(|s| (s, false)).collect();
    }

    // Endpoint table: stroke s contributes ids 2s (start) and 2s+1 (end).
    let endpoints: Vec<Vec2> = han
        .strokes
        .iter()
        .flat_map(|s| [s.start(), s.end()])
        .collect();
    let cost = |a: usize, b: usize| dist(endpoints[a], endpoints[b]);

    // Chains hold endpoint ids in traversal order; strokes stay as
    // adjacent id pairs throughout.
    let mut chains: Vec<Vec<usize>> = (0..n).map(|s| vec![2 * s, 2 * s + 1]).collect();

    while chains.len() > 1 {
        let mut candidates: Vec<Candidate> = Vec::with_capacity((chains.len() - 1) * 2);
        for i in 0..chains.len() - 1 {
            for at_head in [true, false] {
                let src = if at_head {
                    chains[i][0]
                } else {
                    *chains[i].last().unwrap()
                };
                let mut best: Option<(f64, usize, bool)> = None;
                let mut second = f64::INFINITY;
                for (j, other) in chains.iter().enumerate().skip(i + 1) {
                    for target_head in [true, false] {
                        let tgt = if target_head {
                            other[0]
                        } else {
                            *other.last().unwrap()
                        };
                        let c = cost(src, tgt);
                        match best {
                            Some((bc, _, _)) if c < bc => {
                                second = bc;
                                best = Some((c, j, target_head));
                            }
                            Some(_) => second = second.min(c),
                            None => best = Some((c, j, target_head)),
                        }
                    }
                }
                // Every other chain exposes two ends, so both a best
                // and a runner-up exist.
                let (best_cost, target, target_head) = best.expect("at least one other chain");
                let regret = second - best_cost;
                candidates.push(Candidate {
                    chain: i,
                    at_head,
                    target,
                    target_head,
                    cost: best_cost,
                    regret,
                });
            }
        }

        // Greatest regret first; ties resolve to the cheaper join, then
        // the lowest chain index with the head end ahead of the tail.
        candidates.sort_by(|a, b| {
            b.regret
                .partial_cmp(&a.regret)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cost.partial_cmp(&b.cost).unwrap_or(std::cmp::Ordering::Equal))
                .then(a.chain.cmp(&b.chain))
                .then(b.at_head.cmp(&a.at_head))
        });

        let chosen = match select {
            JoinSelect::Best => candidates[0],
            JoinSelect::Weighted => weighted_pick(&candidates, rng),
        };
        tracing::trace!(
            chain = chosen.chain,
            target = chosen.target,
            regret = chosen.regret,
            "join"
        );

        // Reverse so the joined ends are adjacent, then splice.
        if chosen.at_head {
            chains[chosen.chain].reverse();
        }
        if !chosen.target_head {
            chains[chosen.target].reverse();
        }
        let tail = chains.remove(chosen.target); // target > chain
        chains[chosen.chain].extend(tail);
    }

    chains[0]
        .chunks(2)
        .map(|pair| (pair[0] >> 1, (pair[0] & 1) == 1))
        .collect()
}

fn weighted_pick<R: Rng + ?Sized>(candidates: &[Candidate], rng: &mut R) -> Candidate {
    let total: f64 = candidates.iter().map(|c| c.regret).sum();
    if total <= 0.0 {
        return candidates[0];
    }
    let mut remaining = rng.gen::<f64>() * total;
    for c in candidates {
        remaining -= c.regret;
        if remaining <= 0.0 {
            return *c;
        }
    }
    candidates[candidates.len() - 1]
}
