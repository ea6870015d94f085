//! The cost-function algebra: piecewise-linear, convex functions of a starting column.
//!
//! A [`Solution`] is the central data structure of the optimizer. See the crate-level docs for
//! the invariants it must satisfy; this module provides the combinators (`with_rest_of_line`,
//! `v_sum`, `min_solution`, `plus_const`) that every block kind composes to build its own
//! solution from its children's.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::layout::{Layout, LayoutElement};

/// Tolerance used when comparing costs and slopes, to avoid spurious zero-width segments or
/// infinite crossing-detection loops caused by floating point noise.
const EPSILON: f64 = 1e-9;

static NEXT_SOLUTION_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NEXT_SOLUTION_ID.fetch_add(1, Ordering::Relaxed)
}

/// The cost of realizing a block (and everything to its right on the same line) as a function
/// of the starting column.
///
/// Represented as five parallel sequences indexed by knot. See the crate-level docs for the
/// exact meaning of each one. Every `Solution` carries a process-wide unique `id`, assigned at
/// construction, used to key memoization by continuation identity rather than by a structural
/// hash (see [`crate::block`]).
#[derive(Debug, Clone)]
pub struct Solution {
    id: u64,
    knots: Vec<u32>,
    spans: Vec<u32>,
    costs: Vec<f64>,
    slopes: Vec<f64>,
    layouts: Vec<Rc<Layout>>,
}

impl Solution {
    /// The process-wide unique id assigned to this solution at construction.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The index of the segment covering column `k`.
    fn segment_index(&self, k: u32) -> usize {
        match self.knots.binary_search(&k) {
            Ok(i) => i,
            Err(i) => i - 1,
        }
    }

    /// The cost of this solution when the block starts at column `k`.
    #[must_use]
    pub fn value_at(&self, k: u32) -> f64 {
        let i = self.segment_index(k);
        self.costs[i] + self.slopes[i] * f64::from(k - self.knots[i])
    }

    /// The slope of this solution's cost function at column `k`.
    #[must_use]
    pub fn slope_at(&self, k: u32) -> f64 {
        self.slopes[self.segment_index(k)]
    }

    /// The number of columns occupied past `k` on the last line of the layout witnessing
    /// column `k`.
    #[must_use]
    pub fn span_at(&self, k: u32) -> u32 {
        self.spans[self.segment_index(k)]
    }

    /// The layout that witnesses the cost at column `k`.
    #[must_use]
    pub fn layout_at(&self, k: u32) -> Rc<Layout> {
        Rc::clone(&self.layouts[self.segment_index(k)])
    }

    /// Horizontal composition: the cost of placing `self` followed immediately by `rest` on
    /// the same line. Returns `self` unchanged (well, a copy of it) if `rest` is `None`.
    #[must_use]
    pub fn with_rest_of_line(&self, rest: Option<&Solution>) -> Solution {
        let rest = match rest {
            None => return self.clone(),
            Some(rest) => rest,
        };
        let mut factory = SolutionFactory::new();
        for i in 0..self.knots.len() {
            let seg_start = self.knots[i];
            let seg_end = self.knots.get(i + 1).copied();
            let offset = self.spans[i];

            let mut breakpoints = vec![seg_start];
            for &rk in &rest.knots {
                if let Some(candidate) = rk.checked_sub(offset) {
                    if candidate > seg_start && seg_end.map_or(true, |end| candidate < end) {
                        breakpoints.push(candidate);
                    }
                }
            }
            breakpoints.sort_unstable();
            breakpoints.dedup();

            for k in breakpoints {
                let shifted = k + offset;
                let cost = self.value_at(k) + rest.value_at(shifted);
                let slope = self.slope_at(k) + rest.slope_at(shifted);
                let span = self.span_at(k) + rest.span_at(shifted);
                let layout = (*self.layout_at(k)).clone().concat((*rest.layout_at(shifted)).clone());
                factory.append(k, span, cost, slope, Rc::new(layout));
            }
        }
        factory.build()
    }

    /// Shift every cost value by a constant; knots, spans, slopes and layouts are unchanged.
    #[must_use]
    pub fn plus_const(&self, c: f64) -> Solution {
        Solution {
            id: next_id(),
            knots: self.knots.clone(),
            spans: self.spans.clone(),
            costs: self.costs.iter().map(|cost| cost + c).collect(),
            slopes: self.slopes.clone(),
            layouts: self.layouts.clone(),
        }
    }
}

/// Vertical composition: stack `solutions` as successive lines.
///
/// The second and subsequent lines start at column 0, so only their `value_at(0)` contributes
/// to the combined cost; the knots of `solutions[0]` become the knots of the result. Every
/// inserted newline carries indent 0 (see the crate-level design notes on why indentation is
/// never produced by the algebra itself).
///
/// # Panics
///
/// Panics if `solutions` is empty.
#[must_use]
pub fn v_sum(solutions: &[&Solution]) -> Solution {
    assert!(!solutions.is_empty(), "v_sum requires at least one solution");
    let first = solutions[0];
    if solutions.len() == 1 {
        return first.clone();
    }
    let extra_cost: f64 = solutions[1..].iter().map(|s| s.value_at(0)).sum();
    let span = solutions[solutions.len() - 1].span_at(0);

    let mut factory = SolutionFactory::new();
    for i in 0..first.knots.len() {
        let mut layout = (*first.layouts[i]).clone();
        for s in &solutions[1..] {
            layout.push(LayoutElement::NewLine(0));
            layout = layout.concat((*s.layout_at(0)).clone());
        }
        factory.append(
            first.knots[i],
            span,
            first.costs[i] + extra_cost,
            first.slopes[i],
            Rc::new(layout),
        );
    }
    factory.build()
}

/// Pointwise minimum (lower envelope) of `solutions`.
///
/// Each input is convex piecewise linear; the result need not be convex, but remains piecewise
/// linear. Computed by sweeping the merged knot set and solving for crossings between whichever
/// segment is currently cheapest and every other candidate's current segment, splitting the
/// result whenever the argmin changes. Ties are broken in favor of the earlier candidate.
///
/// # Panics
///
/// Panics if `solutions` is empty.
#[must_use]
pub fn min_solution(solutions: &[&Solution]) -> Solution {
    assert!(!solutions.is_empty(), "min_solution requires at least one solution");
    if solutions.len() == 1 {
        return solutions[0].clone();
    }

    let mut factory = SolutionFactory::new();
    let mut p: u32 = 0;
    loop {
        // The segments covering `p` remain valid (each candidate locally affine) only until
        // whichever candidate's own next knot comes first.
        let mut macro_end: Option<u32> = None;
        for s in solutions {
            let i = s.segment_index(p);
            if let Some(&next_knot) = s.knots.get(i + 1) {
                macro_end = Some(macro_end.map_or(next_knot, |m| m.min(next_knot)));
            }
        }

        let mut best = 0usize;
        let mut best_val = solutions[0].value_at(p);
        for (i, s) in solutions.iter().enumerate().skip(1) {
            let v = s.value_at(p);
            if v < best_val - EPSILON {
                best_val = v;
                best = i;
            }
        }
        let best_slope = solutions[best].slope_at(p);
        factory.append(
            p,
            solutions[best].span_at(p),
            best_val,
            best_slope,
            solutions[best].layout_at(p),
        );

        let mut next_p: Option<u32> = None;
        for (i, s) in solutions.iter().enumerate() {
            if i == best {
                continue;
            }
            let slope_j = s.slope_at(p);
            if (slope_j - best_slope).abs() < EPSILON {
                continue;
            }
            let cost_j = s.value_at(p);
            let t = f64::from(p) + (cost_j - best_val) / (best_slope - slope_j);
            if t <= f64::from(p) + EPSILON {
                continue;
            }
            if let Some(end) = macro_end {
                if t >= f64::from(end) - EPSILON {
                    continue;
                }
            }
            let candidate = (t.ceil() as u32).max(p + 1);
            next_p = Some(next_p.map_or(candidate, |c| c.min(candidate)));
        }

        match (next_p, macro_end) {
            (Some(np), _) => p = np,
            (None, Some(end)) => p = end,
            (None, None) => break,
        }
    }
    factory.build()
}

/// An append-only builder for [`Solution`]s with an analytically known cost function.
///
/// Used directly by [`TextBlock`](crate::block::TextBlock) and
/// [`VerbBlock`](crate::block::VerbBlock), whose cost functions can be written down knot by
/// knot without going through the combinators above.
#[derive(Debug, Default)]
pub struct SolutionFactory {
    knots: Vec<u32>,
    spans: Vec<u32>,
    costs: Vec<f64>,
    slopes: Vec<f64>,
    layouts: Vec<Rc<Layout>>,
}

impl SolutionFactory {
    /// An empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a knot. `knot` must be strictly greater than the previously appended knot (or
    /// exactly `0` for the first one); `slope` must be at least the previously appended slope.
    pub fn append(&mut self, knot: u32, span: u32, cost: f64, slope: f64, layout: Rc<Layout>) {
        if let Some(&last_knot) = self.knots.last() {
            debug_assert!(knot > last_knot, "knots must be strictly increasing");
        } else {
            debug_assert_eq!(knot, 0, "the first knot must be 0");
        }
        if let Some(&last_slope) = self.slopes.last() {
            debug_assert!(
                slope >= last_slope - EPSILON,
                "slopes must be non-decreasing"
            );
        }
        self.knots.push(knot);
        self.spans.push(span);
        self.costs.push(cost);
        self.slopes.push(slope);
        self.layouts.push(layout);
    }

    /// Finalize the solution under construction.
    ///
    /// # Panics
    ///
    /// Panics if no knot was ever appended.
    #[must_use]
    pub fn build(self) -> Solution {
        assert!(!self.knots.is_empty(), "a Solution must have at least one knot");
        Solution {
            id: next_id(),
            knots: self.knots,
            spans: self.spans,
            costs: self.costs,
            slopes: self.slopes,
            layouts: self.layouts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_knot(cost: f64, slope: f64, span: u32, text: &str) -> Solution {
        let mut factory = SolutionFactory::new();
        factory.append(0, span, cost, slope, Rc::new(Layout::text(text)));
        factory.build()
    }

    #[test]
    fn value_at_extrapolates_from_last_knot() {
        let s = single_knot(1.0, 0.5, 3, "abc");
        assert_eq!(s.value_at(0), 1.0);
        assert_eq!(s.value_at(4), 1.0 + 0.5 * 4.0);
    }

    #[test]
    fn plus_const_shifts_every_knot() {
        let s = single_knot(1.0, 0.5, 3, "abc").plus_const(2.0);
        assert_eq!(s.value_at(0), 3.0);
        assert_eq!(s.value_at(4), 3.0 + 0.5 * 4.0);
    }

    #[test]
    fn with_rest_of_line_none_is_identity() {
        let s = single_knot(1.0, 0.5, 3, "abc");
        let composed = s.with_rest_of_line(None);
        assert_eq!(composed.value_at(0), s.value_at(0));
        assert_eq!(composed.span_at(0), s.span_at(0));
    }

    #[test]
    fn with_rest_of_line_shifts_rest_by_span() {
        let left = single_knot(0.0, 1.0, 2, "ab");
        let right = single_knot(0.0, 2.0, 3, "xyz");
        let composed = left.with_rest_of_line(Some(&right));
        // At k=0: left costs 0 + 1*0 = 0, right is evaluated at k+span=0+2=2, costing 0+2*2=4.
        assert_eq!(composed.value_at(0), 0.0 + right.value_at(2));
        assert_eq!(composed.span_at(0), 2 + 3);
        assert_eq!(composed.layout_at(0).to_string_at_start(), "abxyz");
    }

    #[test]
    fn v_sum_second_line_evaluated_at_zero() {
        let a = single_knot(0.0, 1.0, 2, "ab");
        let b = single_knot(5.0, 3.0, 3, "xyz");
        let summed = v_sum(&[&a, &b]);
        assert_eq!(summed.value_at(0), a.value_at(0) + b.value_at(0));
        assert_eq!(summed.value_at(4), a.value_at(4) + b.value_at(0));
        assert_eq!(summed.span_at(0), b.span_at(0));
        assert_eq!(summed.layout_at(0).to_string_at_start(), "ab\nxyz");
    }

    #[test]
    fn min_solution_picks_pointwise_minimum() {
        // `a` is cheap for small k but grows fast; `b` is flat.
        let a = single_knot(0.0, 2.0, 0, "a");
        let b = single_knot(10.0, 0.0, 0, "b");
        let min = min_solution(&[&a, &b]);
        assert_eq!(min.value_at(0), 0.0);
        assert_eq!(min.value_at(10), b.value_at(10));
        for k in 0..20 {
            let expected = a.value_at(k).min(b.value_at(k));
            assert!((min.value_at(k) - expected).abs() < 1e-6, "k={k}");
        }
    }

    #[test]
    fn min_solution_single_input_is_identity() {
        let a = single_knot(0.0, 2.0, 0, "a");
        let min = min_solution(&[&a]);
        assert_eq!(min.value_at(3), a.value_at(3));
    }
}
