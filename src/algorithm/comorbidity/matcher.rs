//! Parallel comorbidity matcher
//!
//! This module splits the visit database into chunks and matches each chunk
//! on a rayon worker. Every task receives its own disjoint slice of the
//! output buffer, so results are written without any locking.

use std::time::Instant;

use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;

use crate::algorithm::comorbidity::chunk::{Chunk, ChunkRange};
use crate::config::MatcherConfig;
use crate::error::{ComorbidError, Result};
use crate::models::comorbidity::cell_count;
use crate::models::{DiagnosisCode, ResultMatrix};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
};

/// Match every visit against every comorbidity group and return the membership matrix
///
/// Each group in `map` must be sorted ascending. Row `v`, column `c` of the
/// result is true when visit `v` has at least one code in group `c`.
///
/// # Arguments
/// * `visits` - Diagnosis codes per visit, in any order
/// * `map` - Sorted diagnosis codes per comorbidity
/// * `config` - Chunk size, thread count and progress settings
///
/// # Returns
/// A `ResultMatrix` with `visits.len()` rows and `map.len()` columns
pub fn match_comorbidities<V, G>(
    visits: &[V],
    map: &[G],
    config: &MatcherConfig,
) -> Result<ResultMatrix>
where
    V: AsRef<[DiagnosisCode]> + Sync,
    G: AsRef<[DiagnosisCode]> + Sync,
{
    config.validate()?;

    let mut matrix = ResultMatrix::new_false(visits.len(), map.len())?;
    match_comorbidities_into(visits, map, config, matrix.as_mut_slice())?;
    Ok(matrix)
}

/// Match every visit against every comorbidity group, writing into `out`
///
/// `out` must hold exactly `visits.len() * map.len()` cells and is laid out
/// row-major by visit. Every cell is overwritten.
///
/// `Some(n)` in `config.parallelism` builds and tears down a pool of `n`
/// threads on every call. Callers matching repeatedly should leave it `None`
/// and run the calls inside their own `ThreadPool::install`.
pub fn match_comorbidities_into<V, G>(
    visits: &[V],
    map: &[G],
    config: &MatcherConfig,
    out: &mut [bool],
) -> Result<()>
where
    V: AsRef<[DiagnosisCode]> + Sync,
    G: AsRef<[DiagnosisCode]> + Sync,
{
    config.validate()?;

    let num_visits = visits.len();
    let num_comorbid = map.len();
    let expected = cell_count(num_visits, num_comorbid)?;
    if out.len() != expected {
        return Err(ComorbidError::BufferSize {
            expected,
            actual: out.len(),
        });
    }

    if expected == 0 {
        debug!("Nothing to match: {num_visits} visits, {num_comorbid} comorbidities");
        return Ok(());
    }

    debug_assert!(
        map.iter()
            .all(|group| group.as_ref().windows(2).all(|pair| pair[0] <= pair[1])),
        "comorbidity groups must be sorted ascending"
    );

    let start = Instant::now();
    let chunk_size = config.chunk_size.min(num_visits);
    let num_chunks = num_visits.div_ceil(chunk_size);

    log_operation_start(
        "Matching comorbidities",
        &format!("{num_visits} visits x {num_comorbid} comorbidities in {num_chunks} chunks"),
    );

    let progress = config
        .show_progress
        .then(|| create_main_progress_bar(num_chunks as u64, Some("Matching comorbidities")));

    match config.parallelism {
        Some(threads) => {
            debug!("Building dedicated pool with {threads} threads");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("comorbid-worker-{i}"))
                .build()?;
            pool.install(|| match_chunks(visits, map, chunk_size, out, progress.as_ref()));
        }
        None => {
            debug!(
                "Using global pool with {} threads",
                rayon::current_num_threads()
            );
            match_chunks(visits, map, chunk_size, out, progress.as_ref());
        }
    }

    if let Some(pb) = &progress {
        finish_progress_bar(pb, Some("Matching complete"));
    }

    log_operation_complete("matched", num_visits, Some(start.elapsed()));

    Ok(())
}

/// Positional form of [`match_comorbidities`]
pub fn match_with<V, G>(
    visits: &[V],
    map: &[G],
    chunk_size: usize,
    parallelism: Option<usize>,
) -> Result<ResultMatrix>
where
    V: AsRef<[DiagnosisCode]> + Sync,
    G: AsRef<[DiagnosisCode]> + Sync,
{
    let config = MatcherConfig::new()
        .with_chunk_size(chunk_size)
        .with_parallelism(parallelism);
    match_comorbidities(visits, map, &config)
}

/// Positional form of [`match_comorbidities_into`]
pub fn match_into_with<V, G>(
    visits: &[V],
    map: &[G],
    chunk_size: usize,
    parallelism: Option<usize>,
    out: &mut [bool],
) -> Result<()>
where
    V: AsRef<[DiagnosisCode]> + Sync,
    G: AsRef<[DiagnosisCode]> + Sync,
{
    let config = MatcherConfig::new()
        .with_chunk_size(chunk_size)
        .with_parallelism(parallelism);
    match_comorbidities_into(visits, map, &config, out)
}

/// Run one task per chunk on the current rayon pool
///
/// `chunk_size` must be in `1..=visits.len()`, `map` must be non-empty and
/// `out` must hold `visits.len() * map.len()` cells. Each chunk's range is
/// derived from the length of its output slice, so every slice is written.
fn match_chunks<V, G>(
    visits: &[V],
    map: &[G],
    chunk_size: usize,
    out: &mut [bool],
    progress: Option<&ProgressBar>,
) where
    V: AsRef<[DiagnosisCode]> + Sync,
    G: AsRef<[DiagnosisCode]> + Sync,
{
    let num_comorbid = map.len();
    let cells_per_slice = chunk_size * num_comorbid;

    out.par_chunks_mut(cells_per_slice)
        .enumerate()
        .for_each(|(index, dest)| {
            debug_assert_eq!(dest.len() % num_comorbid, 0, "partial visit row");
            let begin = index * chunk_size;
            let range = ChunkRange {
                begin,
                end: begin + dest.len() / num_comorbid - 1,
            };
            Chunk::compute(range, visits, map).merge_into(dest);

            if let Some(pb) = progress {
                pb.inc(1);
            }
        });
}
