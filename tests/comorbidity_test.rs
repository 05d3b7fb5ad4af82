//! Tests for the comorbidity matcher public API

use comorbid_core::algorithm::comorbidity::chunk_ranges;
use comorbid_core::utils::test::{reference_match, synthetic_map, synthetic_visits};
use comorbid_core::{
    ComorbidError, MatcherConfig, ResultMatrix, match_comorbidities, match_comorbidities_into,
    match_with,
};

#[test]
fn test_result_matches_set_intersection() {
    let visits = synthetic_visits(2_000, 20, 1_000, 101);
    let map = synthetic_map(25, 80, 1_000, 202);

    let result = match_comorbidities(&visits, &map, &MatcherConfig::default()).unwrap();
    assert_eq!(result, reference_match(&visits, &map));
}

#[test]
fn test_chunk_size_does_not_change_result() {
    let visits = synthetic_visits(777, 10, 300, 5);
    let map = synthetic_map(12, 30, 300, 6);
    let expected = match_with(&visits, &map, 1, None).unwrap();

    for chunk_size in [2, 7, 64, 776, 777, 778, 10_000] {
        let result = match_with(&visits, &map, chunk_size, None).unwrap();
        assert_eq!(result, expected, "chunk size {chunk_size}");
    }
}

#[test]
fn test_single_worker_matches_many_workers() {
    let visits = synthetic_visits(20_000, 8, 2_000, 9);
    let map = synthetic_map(30, 100, 2_000, 10);

    let single = match_with(&visits, &map, 3, Some(1)).unwrap();
    for threads in [2, 4, 8] {
        let many = match_with(&visits, &map, 3, Some(threads)).unwrap();
        assert_eq!(single, many, "{threads} threads");
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let visits = synthetic_visits(5_000, 6, 500, 21);
    let map = synthetic_map(8, 50, 500, 22);
    let config = MatcherConfig::new().with_chunk_size(5);

    let first = match_comorbidities(&visits, &map, &config).unwrap();
    for _ in 0..5 {
        let again = match_comorbidities(&visits, &map, &config).unwrap();
        assert_eq!(first.as_slice(), again.as_slice());
    }
}

#[test]
fn test_empty_visit_row_is_false() {
    let visits = vec![vec![1, 2, 3], vec![], vec![3]];
    let map = vec![vec![1], vec![2, 3]];

    let result = match_with(&visits, &map, 2, None).unwrap();
    assert_eq!(result.row(0), Some(&[true, true][..]));
    assert_eq!(result.row(1), Some(&[false, false][..]));
    assert_eq!(result.row(2), Some(&[false, true][..]));
}

#[test]
fn test_in_place_matches_allocating_form() {
    let visits = synthetic_visits(300, 10, 200, 31);
    let map = synthetic_map(7, 40, 200, 32);
    let config = MatcherConfig::new().with_chunk_size(16);

    let allocated = match_comorbidities(&visits, &map, &config).unwrap();

    let mut out = ResultMatrix::new_false(visits.len(), map.len())
        .unwrap()
        .into_vec();
    match_comorbidities_into(&visits, &map, &config, &mut out).unwrap();
    assert_eq!(allocated.into_vec(), out);
}

#[test]
fn test_invalid_configuration_fails_before_work() {
    let visits = vec![vec![1]];
    let map = vec![vec![1]];
    let mut out = vec![false; 1];

    let config = MatcherConfig::new().with_chunk_size(0);
    let err = match_comorbidities_into(&visits, &map, &config, &mut out).unwrap_err();
    assert!(matches!(err, ComorbidError::InvalidConfig(_)));
    assert_eq!(out, vec![false]);
}

#[test]
fn test_chunk_partition_covers_all_visits() {
    let ranges: Vec<_> = chunk_ranges(10, 4).collect();
    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].begin, 0);
    assert_eq!(ranges[2].end, 9);
    assert_eq!(ranges[2].end - ranges[2].begin + 1, 2);
    for pair in ranges.windows(2) {
        assert_eq!(pair[0].end + 1, pair[1].begin);
    }
}
