//! Where to insert the next knot when the fitter stops improving.

use crate::curves::KnotVector;
use crate::error::{LineaError, Result};
use crate::numeric::from_f64;
use num_traits::Float;
use std::ops::Range;

/// A knot value and the span it falls into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnotSplit<F> {
    /// Span index `j` with `knots[j] < value < knots[j+1]`.
    pub span: usize,
    /// The new knot.
    pub value: F,
}

/// Samples with `knots[span] <= t <= knots[span+1]` for one non-empty span.
#[derive(Debug, Clone)]
struct Bucket<F> {
    span: usize,
    samples: Range<usize>,
    error: F,
}

fn buckets<'a, F: Float>(
    knots: &'a KnotVector<F>,
    params: &'a [F],
    norms: &'a [F],
) -> impl Iterator<Item = Bucket<F>> + 'a {
    knots
        .as_slice()
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] < w[1])
        .map(move |(span, w)| {
            // params are sorted, so the members form a contiguous range
            let start = params.partition_point(|&t| t < w[0]);
            let end = params.partition_point(|&t| t <= w[1]);
            let error = norms[start..end.max(start)]
                .iter()
                .fold(F::zero(), |acc, &e| acc + e);
            Bucket {
                span,
                samples: start..end.max(start),
                error,
            }
        })
}

/// Chooses the next knot from the current residual norms.
///
/// Among the knot spans of non-zero width holding at least two samples, the
/// one with the largest summed residual is split. Two samples are split at
/// their parameter midpoint. Otherwise the split goes after the first sample
/// whose prefix and suffix both carry at least half of the span's residual,
/// halfway to its successor (or predecessor, for the last sample).
///
/// Fails with [`LineaError::RefinementStalled`] when no span is eligible or
/// the midpoint does not fall strictly inside the span.
pub fn select_knot<F: Float>(
    knots: &KnotVector<F>,
    params: &[F],
    norms: &[F],
    iteration: usize,
) -> Result<KnotSplit<F>> {
    let stalled = || LineaError::RefinementStalled { iteration };
    let half: F = from_f64(0.5);

    let bucket = buckets(knots, params, norms)
        .filter(|b| b.samples.len() >= 2)
        .fold(None::<Bucket<F>>, |best, b| match best {
            Some(current) if !(b.error > current.error) => Some(current),
            _ => Some(b),
        })
        .ok_or_else(stalled)?;

    let members = bucket.samples.clone();
    let value = if members.len() == 2 {
        (params[members.start] + params[members.start + 1]) * half
    } else {
        let target = bucket.error * half;
        let mut prefix = F::zero();
        let mut split = None;
        for i in members.clone() {
            prefix = prefix + norms[i];
            let suffix = bucket.error - prefix + norms[i];
            if prefix >= target && suffix >= target {
                split = Some(i);
                break;
            }
        }
        let i = split.ok_or_else(stalled)?;
        if i + 1 == members.end {
            (params[i - 1] + params[i]) * half
        } else {
            (params[i] + params[i + 1]) * half
        }
    };

    let (lo, hi) = (knots[bucket.span], knots[bucket.span + 1]);
    if value > lo && value < hi {
        Ok(KnotSplit {
            span: bucket.span,
            value,
        })
    } else {
        Err(stalled())
    }
}
