//! Property-based tests for the calculation engine using proptest.
//!
//! Covers: determinism, the equivalent-gauge lower bound, construction
//! search and nearest counts, N1 max floor semantics, temperature
//! monotonicity.

use litz_core::calculations::construction::{factorize, Factorization};
use litz_core::calculations::skin_effect::n1_max;
use litz_core::settings::ConstructionLimits;
use litz_core::{LitzEngine, ReferenceTables};
use once_cell::sync::Lazy;
use proptest::prelude::*;

static ENGINE: Lazy<LitzEngine<'static>> = Lazy::new(|| LitzEngine::standard().unwrap());

fn engine() -> &'static LitzEngine<'static> {
    &ENGINE
}

/// Per-pass limits on `gauge`, `None` when it is not bunched
fn gauge_limits(gauge: u32) -> Option<ConstructionLimits> {
    let entry = engine().lookup_gauge(gauge).unwrap();
    engine().settings().construction.capped_at(entry.max_ends)
}

fn gauge() -> impl Strategy<Value = u32> {
    10u32..=50
}

// ── Determinism ──────────────────────────────────────────────────────

proptest! {
    /// Identical arguments give bit-identical results.
    #[test]
    fn electrical_is_deterministic(
        strands in 1u32..5000,
        gauge in gauge(),
        temperature in -50.0f64..200.0,
        frequency in 1.0f64..1.0e6,
    ) {
        let engine = engine();
        let a = engine.compute_electrical_properties(strands, gauge, temperature, frequency).unwrap();
        let b = engine.compute_electrical_properties(strands, gauge, temperature, frequency).unwrap();
        prop_assert_eq!(a.dc_resistance.to_bits(), b.dc_resistance.to_bits());
        prop_assert_eq!(a.skin_depth_mils.to_bits(), b.skin_depth_mils.to_bits());
        prop_assert_eq!(a, b);
    }
}

// ── Equivalent Gauge ─────────────────────────────────────────────────

proptest! {
    /// The chosen row never exceeds the bundle area, and no larger row fits.
    #[test]
    fn equivalent_gauge_is_strict_lower_bound(total_cma in 0.98f64..20_000.0) {
        let tables = ReferenceTables::standard().unwrap();
        let chosen = tables.equivalent_gauge(total_cma).unwrap();
        prop_assert!(chosen.circular_mil_area <= total_cma);
        for entry in tables.iter() {
            if entry.circular_mil_area <= total_cma {
                prop_assert!(entry.circular_mil_area <= chosen.circular_mil_area);
            }
        }
    }

    /// Bundles thinner than the finest row are below range.
    #[test]
    fn below_smallest_row_is_reported(total_cma in 0.0f64..0.97) {
        let tables = ReferenceTables::standard().unwrap();
        prop_assert!(tables.equivalent_gauge(total_cma).is_err());
    }
}

// ── Construction Search ──────────────────────────────────────────────

proptest! {
    /// Valid factorizations multiply back to the count and respect the limits.
    #[test]
    fn factors_multiply_back(strands in 2u64..200_000) {
        let limits = ConstructionLimits::default();
        if let Factorization::Valid { factors } = factorize(strands, &limits) {
            prop_assert!(factors.len() as u32 <= limits.max_operations);
            prop_assert!(factors.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(factors.iter().all(|f| limits.allows_factor(*f as u64)));
            prop_assert_eq!(factors.iter().map(|f| *f as u64).product::<u64>(), strands);
        }
    }

    /// A valid result takes one operation exactly when the count is itself a
    /// factor the gauge allows. An infeasible result describes its nearest
    /// count the same way, so a single strand reports one pass of two.
    #[test]
    fn single_operation_rule(strands in 1u32..1000, gauge in gauge()) {
        let result = engine().resolve_construction(strands, gauge).unwrap();
        match gauge_limits(gauge) {
            None => prop_assert_eq!(result.operations, 0),
            Some(limits) => {
                let described = if result.is_valid { strands } else { result.final_strand_count };
                prop_assert_eq!(result.operations == 1, limits.allows_factor(described as u64));
            }
        }
    }

    /// Multiplying by one more manufacturable factor adds at most one operation.
    #[test]
    fn one_more_factor_one_more_operation(strands in 2u32..2000, extra in 2u32..=25) {
        let limits = ConstructionLimits::default();
        let base = factorize(strands as u64, &limits);
        let grown = factorize(strands as u64 * extra as u64, &limits);
        if let (Factorization::Valid { factors: a }, Factorization::Valid { factors: b }) = (&base, &grown) {
            prop_assert!(b.len() <= a.len() + 1);
        }
    }

    /// Infeasible counts report a buildable nearest count; gauges that are not
    /// bunched report none.
    #[test]
    fn nearest_count_is_buildable(strands in 1u32..100_000, gauge in gauge()) {
        let result = engine().resolve_construction(strands, gauge).unwrap();
        if result.is_valid {
            return Ok(());
        }
        match gauge_limits(gauge) {
            None => {
                prop_assert_eq!(result.final_strand_count, 0);
                prop_assert!(result.factors.is_empty());
            }
            Some(limits) => {
                prop_assert!(factorize(result.final_strand_count as u64, &limits).is_valid());
                prop_assert_eq!(
                    result.factors.iter().map(|f| *f as u64).product::<u64>(),
                    result.final_strand_count as u64
                );
                prop_assert!(result.factors.iter().all(|f| limits.allows_factor(*f as u64)));
            }
        }
    }

    /// No buildable count lies strictly closer than the reported nearest one.
    #[test]
    fn nearest_count_is_closest(strands in 2u32..3000, gauge in 17u32..=50) {
        let result = engine().resolve_construction(strands, gauge).unwrap();
        if let Some(limits) = gauge_limits(gauge) {
            let distance = result.final_strand_count.abs_diff(strands);
            for candidate in strands.saturating_sub(distance.saturating_sub(1)).max(1)..strands + distance {
                if candidate != strands {
                    prop_assert!(!factorize(candidate as u64, &limits).is_valid());
                }
            }
        }
    }

    /// Nearby counts are buildable, inside the window and ordered by distance.
    #[test]
    fn nearby_counts_are_buildable(strands in 1u32..50_000, gauge in 17u32..=50) {
        let counts = engine().nearby_counts(strands, gauge).unwrap();
        let limits = gauge_limits(gauge).unwrap();
        prop_assert!(counts.len() <= 8);
        for pair in counts.windows(2) {
            prop_assert!(pair[0].abs_diff(strands) <= pair[1].abs_diff(strands));
        }
        for count in counts {
            prop_assert!(factorize(count as u64, &limits).is_valid());
            prop_assert!(count.abs_diff(strands) <= 50.max(strands / 20));
        }
    }
}

// ── N1 Max ───────────────────────────────────────────────────────────

proptest! {
    /// N1 max is the floor of 4 (δ / d)², never rounded up.
    #[test]
    fn n1_max_is_floor(gauge in gauge(), frequency in 10.0f64..1.0e6, temperature in -20.0f64..150.0) {
        let result = engine().compute_n1_max(gauge, frequency, temperature).unwrap();
        let exact = 4.0 * result.skin_depth_mils.powi(2) / result.strand_diameter_mils.powi(2);
        prop_assert!(result.n1_max as f64 <= exact + 1e-6);
        prop_assert!(exact - (result.n1_max as f64) < 1.0 + 1e-6);
    }

    #[test]
    fn n1_max_helper_floors(delta in 0.0f64..10.0, diameter in 0.01f64..10.0) {
        let exact = 4.0 * delta * delta / (diameter * diameter);
        prop_assert_eq!(n1_max(delta, diameter), exact.floor() as u64);
    }
}

// ── Temperature ──────────────────────────────────────────────────────

proptest! {
    /// Resistivity, skin depth and DC resistance rise with temperature.
    #[test]
    fn temperature_monotonicity(
        gauge in gauge(),
        low in -50.0f64..150.0,
        rise in 0.5f64..100.0,
        frequency in 10.0f64..1.0e6,
    ) {
        let engine = engine();
        let high = low + rise;
        let cold = engine.compute_electrical_properties(100, gauge, low, frequency).unwrap();
        let hot = engine.compute_electrical_properties(100, gauge, high, frequency).unwrap();
        prop_assert!(hot.corrected_resistivity > cold.corrected_resistivity);
        prop_assert!(hot.skin_depth_mils > cold.skin_depth_mils);
        prop_assert!(hot.dc_resistance > cold.dc_resistance);
    }
}
