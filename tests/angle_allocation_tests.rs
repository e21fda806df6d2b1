use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use pie3d_rs::api::{ChartAdvisory, check_total};
use pie3d_rs::core::{AngularSpan, allocate_spans, total_sweep};
use pie3d_rs::error::ChartError;

fn degrees(spans: &[AngularSpan]) -> Vec<(f64, f64)> {
    spans
        .iter()
        .map(|span| (span.start_degrees(), span.end_degrees()))
        .collect()
}

fn assert_spans_deg(spans: &[AngularSpan], expected: &[(f64, f64)]) {
    let actual = degrees(spans);
    assert_eq!(actual.len(), expected.len());
    for ((start, end), (expected_start, expected_end)) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*start, *expected_start, epsilon = 1e-9);
        assert_abs_diff_eq!(*end, *expected_end, epsilon = 1e-9);
    }
}

#[test]
fn reference_dataset_covers_234_degrees() {
    let spans = allocate_spans([25.0, 10.0, 30.0], 100.0).expect("allocate");
    assert_spans_deg(&spans, &[(0.0, 90.0), (90.0, 126.0), (126.0, 234.0)]);
    assert_abs_diff_eq!(total_sweep(&spans).to_degrees(), 234.0, epsilon = 1e-9);
    assert!(matches!(
        check_total(65.0, 100.0),
        Some(ChartAdvisory::InconsistentTotal { .. })
    ));
}

#[test]
fn second_dataset_covers_324_degrees() {
    let spans = allocate_spans([55.0, 25.0, 10.0], 100.0).expect("allocate");
    assert_spans_deg(&spans, &[(0.0, 198.0), (198.0, 288.0), (288.0, 324.0)]);
    assert!(check_total(90.0, 100.0).is_some());
}

#[test]
fn halves_cover_the_full_turn_without_advisory() {
    let spans = allocate_spans([50.0, 50.0], 100.0).expect("allocate");
    assert_spans_deg(&spans, &[(0.0, 180.0), (180.0, 360.0)]);
    assert_abs_diff_eq!(total_sweep(&spans), TAU, epsilon = 1e-12);
    assert!(check_total(100.0, 100.0).is_none());
}

#[test]
fn denominator_matching_the_data_closes_the_circle() {
    let spans = allocate_spans([25.0, 10.0, 30.0], 65.0).expect("allocate");
    assert_abs_diff_eq!(total_sweep(&spans), TAU, epsilon = 1e-12);
}

#[test]
fn zero_denominator_is_invalid_configuration() {
    let err = allocate_spans([25.0, 10.0], 0.0).expect_err("zero denominator");
    assert!(matches!(err, ChartError::InvalidConfiguration(_)));
}

#[test]
fn permutation_moves_starts_but_keeps_sweeps() {
    let forward = allocate_spans([25.0, 10.0, 30.0], 100.0).expect("allocate");
    let reversed = allocate_spans([30.0, 10.0, 25.0], 100.0).expect("allocate");

    assert_abs_diff_eq!(forward[0].sweep_angle, reversed[2].sweep_angle, epsilon = 1e-12);
    assert_abs_diff_eq!(forward[1].sweep_angle, reversed[1].sweep_angle, epsilon = 1e-12);
    assert_abs_diff_eq!(forward[2].sweep_angle, reversed[0].sweep_angle, epsilon = 1e-12);
    assert!((forward[1].start_angle - reversed[1].start_angle).abs() > 1e-3);
}
