use std::f64::consts::TAU;

use pie3d_rs::core::{allocate_spans, percentage_to_radians, total_sweep};
use proptest::prelude::*;

proptest! {
    #[test]
    fn total_sweep_is_proportional_to_value_sum(
        values in prop::collection::vec(0.0f64..1_000.0, 0..24),
        denominator in 0.001f64..10_000.0
    ) {
        let spans = allocate_spans(values.iter().copied(), denominator).expect("allocate");
        let expected = TAU * values.iter().sum::<f64>() / denominator;
        prop_assert!((total_sweep(&spans) - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn spans_are_contiguous_and_start_at_zero(
        values in prop::collection::vec(0.0f64..100.0, 1..16)
    ) {
        let spans = allocate_spans(values.iter().copied(), 100.0).expect("allocate");
        prop_assert_eq!(spans[0].start_angle, 0.0);
        for pair in spans.windows(2) {
            prop_assert!((pair[1].start_angle - pair[0].end_angle()).abs() <= 1e-12);
        }
    }

    #[test]
    fn rotation_changes_starts_but_preserves_sweeps(
        values in prop::collection::vec(0.0f64..100.0, 2..12),
        shift in 1usize..11
    ) {
        let mut rotated = values.clone();
        let shift = shift % values.len();
        rotated.rotate_left(shift);

        let original = allocate_spans(values.iter().copied(), 100.0).expect("allocate");
        let permuted = allocate_spans(rotated.iter().copied(), 100.0).expect("allocate");
        for (index, span) in original.iter().enumerate() {
            let moved = (index + values.len() - shift) % values.len();
            prop_assert!((span.sweep_angle - permuted[moved].sweep_angle).abs() <= 1e-12);
        }
    }

    #[test]
    fn percentage_to_radians_is_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(percentage_to_radians(low) <= percentage_to_radians(high));
        prop_assert!(percentage_to_radians(high) <= TAU + 1e-12);
    }

    #[test]
    fn non_positive_denominator_never_yields_angles(
        values in prop::collection::vec(0.0f64..100.0, 0..8),
        denominator in -1_000.0f64..=0.0
    ) {
        prop_assert!(allocate_spans(values.iter().copied(), denominator).is_err());
    }
}

proptest! {
    #[test]
    fn allocated_angles_are_always_finite(
        values in prop::collection::vec(0.0f64..=f64::MAX, 1..6),
        denominator in 1e-300f64..1.0
    ) {
        if let Ok(spans) = allocate_spans(values.iter().copied(), denominator) {
            for span in spans {
                prop_assert!(span.start_angle.is_finite());
                prop_assert!(span.sweep_angle.is_finite());
            }
        }
    }
}
