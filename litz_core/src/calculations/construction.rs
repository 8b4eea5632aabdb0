//! # Construction Resolver
//!
//! Decides how a bundle of `n` strands is built on bunching/stranding
//! machines. Each pass ("operation") multiplies the number of ends by a
//! factor inside the manufacturable range, so a construction is a
//! factorization of `n` into at most `max_operations` such factors.
//!
//! ## Search
//!
//! Iterative deepening over the operation count `k = 1, 2, …` up to the cap.
//! For each `k` a recursive search (depth at most `k`) enumerates
//! non-decreasing factor sequences whose product is exactly `n`. The first
//! `k` with any solution wins; among its solutions the most balanced one
//! (smallest largest-minus-smallest factor) is kept, ties going to the first
//! sequence found in ascending order.
//!
//! A pass on a given gauge takes at most the smaller of the configured
//! `max_factor` and that gauge's `max_ends`. Gauges whose limit falls below
//! `min_factor` are not bunched at all and resolve to an empty construction.
//!
//! When no exact factorization exists the result is reported with
//! `is_valid = false` and describes the nearest achievable strand count.
//! Achievable counts are indexed once per effective factor range as two
//! sorted product lists, so the nearest count costs a few binary searches
//! per list entry rather than one factor search per candidate.
//!
//! ## Example
//!
//! ```rust
//! use litz_core::calculations::construction::ConstructionResolver;
//! use litz_core::settings::ConstructionLimits;
//! use litz_core::tables::ReferenceTables;
//!
//! let tables = ReferenceTables::standard().unwrap();
//! let resolver = ConstructionResolver::new(tables, ConstructionLimits::default()).unwrap();
//!
//! let result = resolver.resolve(100, 40).unwrap();
//! assert_eq!(result.construction_type, "Type 2");
//! assert_eq!(result.operations, 2);
//! assert!(result.is_valid);
//! ```

use std::fmt;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::validate_strand_count;
use crate::errors::{CalcError, CalcResult};
use crate::settings::ConstructionLimits;
use crate::tables::ReferenceTables;

/// How a bundle is built.
///
/// ## JSON Example
///
/// ```json
/// {
///   "type": "Type 2",
///   "operations": 2,
///   "final_strand_count": 100,
///   "is_valid": true,
///   "factors": [10, 10],
///   "take_up_factor": 1.03,
///   "packing_factor": 1.236
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionResult {
    /// Construction label, "Type N" for N operations, "None" for a gauge
    /// that is not bunched
    #[serde(rename = "type")]
    pub construction_type: String,

    /// Number of bunching/stranding passes (0 when the gauge is not bunched)
    pub operations: u32,

    /// Strand count the construction produces; the requested count when valid
    pub final_strand_count: u32,

    /// True only when the requested count factors exactly within the cap
    pub is_valid: bool,

    /// Ends combined in each pass, ascending
    pub factors: Vec<u32>,

    /// Conductor length per unit bundle length (twist lay)
    pub take_up_factor: f64,

    /// Bundle diameter over √n × strand diameter
    pub packing_factor: f64,
}

impl ConstructionResult {
    /// Pass sequence as text, e.g. "10x10"
    pub fn designation(&self) -> String {
        self.factors
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("x")
    }
}

/// Outcome of the bounded factor search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Factorization {
    /// Exact factorization, ascending factors
    Valid { factors: Vec<u32> },
    /// No factorization within the operation cap
    Infeasible,
}

impl Factorization {
    pub fn is_valid(&self) -> bool {
        matches!(self, Factorization::Valid { .. })
    }
}

/// Factor `strand_count` into the fewest passes allowed by `limits`.
pub fn factorize(strand_count: u64, limits: &ConstructionLimits) -> Factorization {
    if strand_count == 0 {
        return Factorization::Infeasible;
    }
    for operations in 1..=limits.max_operations {
        let mut current = Vec::with_capacity(operations as usize);
        let mut best = None;
        search(
            strand_count,
            operations,
            limits.min_factor as u64,
            limits,
            &mut current,
            &mut best,
        );
        if let Some(factors) = best {
            tracing::trace!(strand_count, operations, ?factors, "Factorization found");
            return Factorization::Valid { factors };
        }
    }
    Factorization::Infeasible
}

/// Depth-first search over non-decreasing factor sequences.
///
/// Recursion depth is bounded by `slots`, which never exceeds the operation cap.
fn search(
    remaining: u64,
    slots: u32,
    min_next: u64,
    limits: &ConstructionLimits,
    current: &mut Vec<u32>,
    best: &mut Option<Vec<u32>>,
) {
    let max_factor = limits.max_factor as u64;

    if slots == 1 {
        if remaining >= min_next && remaining <= max_factor {
            current.push(remaining as u32);
            if best.as_ref().map_or(true, |b| spread(current) < spread(b)) {
                *best = Some(current.clone());
            }
            current.pop();
        }
        return;
    }

    let mut factor = min_next;
    while factor <= max_factor {
        // Every later factor is at least `factor`
        match factor.checked_pow(slots) {
            Some(floor) if floor <= remaining => {}
            _ => break,
        }
        if remaining % factor == 0 {
            current.push(factor as u32);
            search(remaining / factor, slots - 1, factor, limits, current, best);
            current.pop();
        }
        factor += 1;
    }
}

fn spread(factors: &[u32]) -> u32 {
    match (factors.first(), factors.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0,
    }
}

/// Most alternatives [`ConstructionResolver::nearby_counts`] returns
pub const NEARBY_COUNT_LIMIT: usize = 8;

/// Smallest half-width of the nearby-count window
const NEARBY_MIN_WINDOW: u64 = 50;

/// The window widens to one twentieth of the count for large counts
const NEARBY_WINDOW_DIVISOR: u64 = 20;

/// Sorted index of every strand count one set of limits can build.
///
/// A count is buildable when it is a product of at most `max_operations`
/// factors. `low` holds products of up to ⌊k/2⌋ factors and `high` products
/// of up to ⌈k/2⌉, both including the empty product 1, so every buildable
/// count is some `a × b` with `a` from `low` and `b` from `high`.
#[derive(Clone)]
struct BuildableCounts {
    low: Vec<u64>,
    high: Vec<u64>,
}

impl BuildableCounts {
    fn new(limits: &ConstructionLimits) -> Self {
        let low_depth = limits.max_operations / 2;
        BuildableCounts {
            low: products(limits, low_depth),
            high: products(limits, limits.max_operations - low_depth),
        }
    }

    /// Largest buildable count not above `n`
    fn at_or_below(&self, n: u64) -> Option<u64> {
        let mut best = None;
        for &a in self.low.iter().take_while(|&&a| a <= n) {
            let bound = n / a;
            let index = self.high.partition_point(|&b| b <= bound);
            if let Some(&b) = self.high[..index].last() {
                let product = a * b;
                if product > 1 && best.map_or(true, |best| product > best) {
                    best = Some(product);
                }
            }
        }
        best
    }

    /// Smallest buildable count not below `n`
    fn at_or_above(&self, n: u64) -> Option<u64> {
        let n = n.max(2);
        self.low
            .iter()
            .filter_map(|&a| {
                let target = n.div_ceil(a);
                let index = self.high.partition_point(|&b| b < target);
                self.high.get(index).map(|&b| a * b)
            })
            .min()
    }

    /// Closest buildable count to `n` that fits in a `u32`, ties to the lower
    fn nearest(&self, n: u64) -> Option<u64> {
        let below = self.at_or_below(n);
        let above = self.at_or_above(n).filter(|&c| c <= u32::MAX as u64);
        match (below, above) {
            (Some(b), Some(a)) if a - n < n - b => Some(a),
            (Some(b), _) => Some(b),
            (None, above) => above,
        }
    }

    /// Up to [`NEARBY_COUNT_LIMIT`] buildable counts around `n`, closest first.
    fn nearby(&self, n: u64, lowest: u64) -> Vec<u64> {
        let window = NEARBY_MIN_WINDOW.max(n / NEARBY_WINDOW_DIVISOR);
        let low_bound = n.saturating_sub(window).max(lowest);
        let high_bound = (n + window).min(u32::MAX as u64);

        let mut counts = Vec::with_capacity(2 * NEARBY_COUNT_LIMIT);
        let mut cursor = n;
        while counts.len() < NEARBY_COUNT_LIMIT {
            match self.at_or_below(cursor) {
                Some(count) if count >= low_bound => {
                    counts.push(count);
                    cursor = count - 1;
                }
                _ => break,
            }
        }
        let mut cursor = n + 1;
        for _ in 0..NEARBY_COUNT_LIMIT {
            match self.at_or_above(cursor) {
                Some(count) if count <= high_bound => {
                    counts.push(count);
                    cursor = count + 1;
                }
                _ => break,
            }
        }

        counts.sort_by_key(|&count| (count.abs_diff(n), count));
        counts.truncate(NEARBY_COUNT_LIMIT);
        counts
    }
}

impl fmt::Debug for BuildableCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildableCounts")
            .field("low", &self.low.len())
            .field("high", &self.high.len())
            .finish()
    }
}

/// Every product of at most `depth` factors in range, plus 1; sorted, unique.
fn products(limits: &ConstructionLimits, depth: u32) -> Vec<u64> {
    fn extend(start: u64, product: u64, depth: u32, max_factor: u64, out: &mut Vec<u64>) {
        if depth == 0 {
            return;
        }
        for factor in start..=max_factor {
            let next = product * factor;
            out.push(next);
            extend(factor, next, depth - 1, max_factor, out);
        }
    }

    let mut out = vec![1];
    extend(
        limits.min_factor as u64,
        1,
        depth,
        limits.max_factor as u64,
        &mut out,
    );
    out.sort_unstable();
    out.dedup();
    out
}

/// Resolves strand counts into constructions against one set of tables.
///
/// A clone keeps the indexes already built; indexes built afterwards are
/// not shared between clones.
#[derive(Debug, Clone)]
pub struct ConstructionResolver<'a> {
    tables: &'a ReferenceTables,
    limits: ConstructionLimits,
    /// Achievable-count indexes keyed by effective `max_factor`, built lazily
    indexes: Vec<(u32, OnceCell<BuildableCounts>)>,
}

impl<'a> ConstructionResolver<'a> {
    /// Create a resolver; every operation count up to the cap must have a
    /// construction-factor row.
    pub fn new(tables: &'a ReferenceTables, limits: ConstructionLimits) -> CalcResult<Self> {
        limits.validate()?;
        let tabulated = tables.construction.max_operations();
        if limits.max_operations > tabulated {
            return Err(CalcError::configuration(format!(
                "construction.max_operations is {} but factors are only tabulated up to {} operations",
                limits.max_operations, tabulated
            )));
        }

        let mut ceilings: Vec<u32> = tables
            .iter()
            .filter_map(|entry| limits.capped_at(entry.max_ends))
            .map(|capped| capped.max_factor)
            .collect();
        ceilings.sort_unstable();
        ceilings.dedup();

        Ok(ConstructionResolver {
            tables,
            limits,
            indexes: ceilings.into_iter().map(|c| (c, OnceCell::new())).collect(),
        })
    }

    /// Tables this resolver reads gauge limits and factors from
    pub fn tables(&self) -> &'a ReferenceTables {
        self.tables
    }

    /// Limits this resolver searches within
    pub fn limits(&self) -> &ConstructionLimits {
        &self.limits
    }

    /// Limits for passes on `gauge`; `None` when the gauge is not bunched.
    pub fn gauge_limits(&self, gauge: u32) -> CalcResult<Option<ConstructionLimits>> {
        let entry = self.tables.lookup(gauge)?;
        Ok(self.limits.capped_at(entry.max_ends))
    }

    fn buildable(&self, limits: &ConstructionLimits) -> CalcResult<&BuildableCounts> {
        let (_, cell) = self
            .indexes
            .iter()
            .find(|(ceiling, _)| *ceiling == limits.max_factor)
            .ok_or_else(|| {
                CalcError::configuration(format!(
                    "no achievable-count index for max factor {}",
                    limits.max_factor
                ))
            })?;
        Ok(cell.get_or_init(|| {
            let index = BuildableCounts::new(limits);
            tracing::debug!(
                max_factor = limits.max_factor,
                max_operations = limits.max_operations,
                ?index,
                "Achievable strand counts indexed"
            );
            index
        }))
    }

    /// Resolve the construction for `strand_count` strands of `gauge`.
    ///
    /// Infeasible counts are not an error; see [`ConstructionResult::is_valid`].
    pub fn resolve(&self, strand_count: u32, gauge: u32) -> CalcResult<ConstructionResult> {
        validate_strand_count(strand_count)?;
        let Some(limits) = self.gauge_limits(gauge)? else {
            return self.unbunched(strand_count, gauge);
        };

        let (final_strand_count, factors, is_valid) = match factorize(strand_count as u64, &limits) {
            Factorization::Valid { factors } => (strand_count, factors, true),
            Factorization::Infeasible => {
                let nearest = self
                    .buildable(&limits)?
                    .nearest(strand_count as u64)
                    .and_then(|count| u32::try_from(count).ok())
                    .ok_or_else(|| {
                        CalcError::configuration(format!("no achievable strand count for AWG {}", gauge))
                    })?;
                match factorize(nearest as u64, &limits) {
                    Factorization::Valid { factors } => (nearest, factors, false),
                    Factorization::Infeasible => {
                        return Err(CalcError::configuration(format!(
                            "indexed strand count {} does not factor for AWG {}",
                            nearest, gauge
                        )))
                    }
                }
            }
        };

        let operations = factors.len() as u32;
        let factor_table = &self.tables.construction;
        let take_up_factor = factor_table.take_up_factor(operations).ok_or_else(|| {
            CalcError::configuration(format!("no take-up factor for {} operations", operations))
        })?;
        let packing_factor = factor_table.packing_factor(operations, gauge).ok_or_else(|| {
            CalcError::configuration(format!("no packing factor for {} operations", operations))
        })?;

        let result = ConstructionResult {
            construction_type: format!("Type {}", operations),
            operations,
            final_strand_count,
            is_valid,
            factors,
            take_up_factor,
            packing_factor,
        };

        tracing::debug!(
            strand_count,
            gauge,
            operations,
            is_valid,
            designation = %result.designation(),
            "Construction resolved"
        );
        Ok(result)
    }

    /// Empty construction for a gauge no pass can bunch. Take-up and packing
    /// fall back to the single-operation row so downstream figures stay finite.
    fn unbunched(&self, strand_count: u32, gauge: u32) -> CalcResult<ConstructionResult> {
        let single = self
            .tables
            .construction
            .get(1)
            .ok_or_else(|| CalcError::configuration("no construction factors for 1 operation"))?;
        let packing_factor = self.tables.construction.packing_factor(1, gauge).unwrap_or(single.packing_factor);

        tracing::debug!(strand_count, gauge, "Gauge is not bunched");
        Ok(ConstructionResult {
            construction_type: "None".to_string(),
            operations: 0,
            final_strand_count: 0,
            is_valid: false,
            factors: Vec::new(),
            take_up_factor: single.take_up_factor,
            packing_factor,
        })
    }

    /// Achievable strand counts near `strand_count` on `gauge`, closest first
    /// (ties to the lower count), including `strand_count` itself when it is
    /// achievable. Empty for a gauge that is not bunched.
    pub fn nearby_counts(&self, strand_count: u32, gauge: u32) -> CalcResult<Vec<u32>> {
        validate_strand_count(strand_count)?;
        let Some(limits) = self.gauge_limits(gauge)? else {
            return Ok(Vec::new());
        };
        let counts = self
            .buildable(&limits)?
            .nearby(strand_count as u64, limits.min_factor as u64);
        Ok(counts.into_iter().filter_map(|c| u32::try_from(c).ok()).collect())
    }
}
