//! Top-level descent: decrement witnesses, index the candidates, keep the
//! witness classes, repeat.
//!
//! Starting from known `R(s, t, n)` witnesses, each level removes one vertex
//! in every possible way, deduplicates the candidates into isomorphism
//! classes, and keeps the class representatives that are still witnesses.
//! When no witness survives at some order `m`, the descent has shown that the
//! supplied family generates no `R(s, t, m)` witness; when the floor order is
//! reached with survivors, witnesses exist all the way down.

use crate::construct::{index_candidates, index_candidates_parallel};
use crate::decrement::decrement_all;
use crate::graph::Graph;
use crate::resolve::ResolveError;
use crate::witness::{is_witness, witness_classes};

// ============================================================================
// Configuration
// ============================================================================

/// Descent parameters.
#[derive(Clone, Debug)]
pub struct DescentConfig {
    /// Hashing method: `"triangle"`, `"sub_3"`, or `"vf2pp_iter"`.
    pub method: String,
    /// Optional class-count bound per indexing pass.
    pub early_stopping: Option<usize>,
    /// Index candidates on the rayon pool instead of sequentially.
    pub parallel: bool,
    /// Stop descending once this order is reached.
    pub floor_order: usize,
    /// Print a per-level progress line to stdout.
    pub report: bool,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            method: "triangle".to_string(),
            early_stopping: None,
            parallel: false,
            floor_order: 1,
            report: false,
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Statistics of one descent level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelReport {
    /// Order of the candidates at this level (`parent order - 1`).
    pub order: usize,
    /// Number of decremented candidates fed to the indexer.
    pub candidates: usize,
    /// Number of distinct isomorphism classes among them.
    pub classes: usize,
    /// Number of classes whose representative is still a witness.
    pub witnesses: usize,
}

/// Outcome of a full descent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Some level produced no surviving witness; no `R(s, t)` witness of
    /// that order arises from the supplied family.
    NoWitnessAtOrder(usize),
    /// Witnesses survived down to the floor order.
    WitnessesDownToFloor,
    /// The supplied starting graphs were not themselves witnesses.
    InvalidStart,
}

/// Full descent result.
#[derive(Clone, Debug)]
pub struct DescentReport {
    /// Per-level statistics, outermost first.
    pub levels: Vec<LevelReport>,
    /// Final outcome.
    pub verdict: Verdict,
}

// ============================================================================
// Driver
// ============================================================================

/// Runs the descent from `start` (witnesses on a common order) for the pair
/// `(s, t)`.
///
/// # Errors
/// Propagates [`ResolveError::InvalidMethod`] from the indexing passes.
pub fn descend(
    start: &[Graph],
    s: usize,
    t: usize,
    cfg: &DescentConfig,
) -> Result<DescentReport, ResolveError> {
    let mut report = DescentReport {
        levels: Vec::new(),
        verdict: Verdict::WitnessesDownToFloor,
    };

    if start.is_empty() || start.iter().any(|g| !is_witness(g, s, t)) {
        report.verdict = Verdict::InvalidStart;
        return Ok(report);
    }

    let mut frontier: Vec<Graph> = start.to_vec();
    while frontier[0].order() > cfg.floor_order {
        let order = frontier[0].order() - 1;
        let candidates: Vec<Graph> = decrement_all(frontier.iter())
            .into_iter()
            .map(|c| c.graph)
            .collect();
        let candidate_count = candidates.len();

        let dict = if cfg.parallel {
            index_candidates_parallel(candidates, &cfg.method, cfg.early_stopping)?
        } else {
            index_candidates(candidates, &cfg.method, cfg.early_stopping)?
        };

        let survivors: Vec<Graph> = witness_classes(&dict, s, t)
            .into_iter()
            .cloned()
            .collect();

        let level = LevelReport {
            order,
            candidates: candidate_count,
            classes: dict.len(),
            witnesses: survivors.len(),
        };
        if cfg.report {
            println!(
                "[n={}] candidates={} classes={} witnesses={}",
                level.order, level.candidates, level.classes, level.witnesses
            );
        }
        report.levels.push(level);

        if survivors.is_empty() {
            report.verdict = Verdict::NoWitnessAtOrder(order);
            return Ok(report);
        }
        frontier = survivors;
    }

    Ok(report)
}

// ============================================================================
// Tests
// ============================================================================
