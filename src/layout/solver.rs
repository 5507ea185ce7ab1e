//! Vertical chain spacing solver.
//!
//! Given the minimum heights of an ordered column of blocks and a vertical
//! budget, this computes one center line per block so that consecutive blocks
//! never overlap, clearance is preserved, and the spacing approaches the
//! caller's preferred gap as closely as the budget allows. When the chain
//! would overflow, designated gaps compress more aggressively than others via
//! per-gap compression factors.

use thiserror::Error;

/// Bisection is bounded regardless of input; 30 halvings of a `[0, target]`
/// interval are below f32 resolution for any realistic gap size.
const BISECTION_ITERATIONS: usize = 30;

#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    #[error("chain must contain at least one block")]
    EmptyChain,
    #[error("clearance margin must be non-negative, got {0}")]
    NegativeClearance(f32),
    #[error("expected {expected} compression factors for {blocks} blocks, got {got}")]
    FactorCountMismatch {
        blocks: usize,
        expected: usize,
        got: usize,
    },
}

/// Vertical bounds for a chain: where the first center sits, how far up it
/// may be pushed when space runs out, and the ceiling for the last center.
#[derive(Debug, Clone, Copy)]
pub struct ChainSpan {
    pub start_center: f32,
    pub max_center: f32,
    pub min_center_floor: f32,
}

/// Places `heights.len()` block centers inside `span`.
///
/// Each consecutive pair is separated by at least
/// `heights[k]/2 + heights[k+1]/2 + clearance_margin`. On top of that floor, a
/// single base step is solved by bisection so the chain consumes the available
/// span without exceeding `target_gap` per pair; `compression_factors[k]`
/// scales the base step for the gap below block `k`, letting sub-ranges of the
/// chain give up space first.
///
/// Never fails on numeric conditions: if the chain cannot fit even at minimum
/// spacing the tightest packing is returned and the last center lands past
/// `span.max_center`. Callers detect that with [`overflows`]. Negative heights
/// are clamped to zero, factors outside `(0, 1]` are clamped into range.
/// Errors are reserved for contract violations: an empty chain, a negative
/// clearance margin, or a factor list whose length is not `heights.len() - 1`.
pub fn solve_vertical_chain(
    heights: &[f32],
    target_gap: f32,
    clearance_margin: f32,
    compression_factors: &[f32],
    span: ChainSpan,
) -> Result<Vec<f32>, SolverError> {
    if heights.is_empty() {
        return Err(SolverError::EmptyChain);
    }
    if clearance_margin < 0.0 {
        return Err(SolverError::NegativeClearance(clearance_margin));
    }
    if compression_factors.len() != heights.len() - 1 {
        return Err(SolverError::FactorCountMismatch {
            blocks: heights.len(),
            expected: heights.len() - 1,
            got: compression_factors.len(),
        });
    }

    let heights: Vec<f32> = heights.iter().map(|h| h.max(0.0)).collect();
    let n = heights.len();
    if n == 1 {
        return Ok(vec![span.start_center]);
    }

    let required: Vec<f32> = (0..n - 1)
        .map(|k| heights[k] / 2.0 + heights[k + 1] / 2.0 + clearance_margin)
        .collect();
    let required_total: f32 = required.iter().sum();
    let factors: Vec<f32> = compression_factors
        .iter()
        .map(|f| f.clamp(0.0, 1.0))
        .collect();

    let half_last = heights[n - 1] / 2.0;
    let mut start_center = span.start_center;
    let mut available = span.max_center - half_last - start_center;
    if available < required_total {
        // Push the chain upward as far as the floor allows before giving up
        // extra spacing entirely.
        start_center = span
            .min_center_floor
            .max(span.max_center - half_last - required_total);
        available = span.max_center - half_last - start_center;
    }
    if available < required_total {
        // Even the floor cannot rescue the fit: settle for minimum packing
        // and let the caller report the overflow.
        available = required_total;
    }

    let total = |base: f32| -> f32 {
        required
            .iter()
            .zip(&factors)
            .map(|(req, factor)| req.max(base * factor))
            .sum()
    };

    // The caller's preferred gap is the natural ceiling for the base step:
    // no gap should ever open wider than requested.
    let target = target_gap.max(0.0);
    let base_step = if total(0.0) >= available {
        0.0
    } else if total(target) <= available {
        target
    } else {
        let mut lo = 0.0f32;
        let mut hi = target;
        for _ in 0..BISECTION_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            if total(mid) > available {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        lo
    };

    let mut centers = Vec::with_capacity(n);
    centers.push(start_center);
    for k in 0..n - 1 {
        let gap = required[k].max(base_step * factors[k]);
        centers.push(centers[k] + gap);
    }
    Ok(centers)
}

/// Re-checks the fit invariant after a solve. `true` means the chain could
/// not be packed inside the span and the caller should warn or re-layout.
pub fn overflows(centers: &[f32], max_center: f32) -> bool {
    centers
        .last()
        .is_some_and(|last| *last > max_center + f32::EPSILON * max_center.abs().max(1.0))
}
