use anyhow::{Context, ensure};
use comorbid_core::utils::test::{synthetic_map, synthetic_visits};
use comorbid_core::{MatcherConfig, match_comorbidities};
use log::info;
use std::time::Instant;

/// Read a positive size from the environment, falling back to `default`
fn env_size(name: &str, default: usize) -> anyhow::Result<usize> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{name} must be a positive integer, got '{value}'")),
        Err(_) => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let num_visits = env_size("COMORBID_VISITS", 100_000)?;
    let num_groups = env_size("COMORBID_GROUPS", 30)?;
    let chunk_size = env_size("COMORBID_CHUNK_SIZE", 256)?;

    info!("Generating {num_visits} synthetic visits and {num_groups} comorbidity groups");
    let visits = synthetic_visits(num_visits, 15, 20_000, 1);
    let map = synthetic_map(num_groups, 400, 20_000, 2);

    let config = MatcherConfig::new()
        .with_chunk_size(chunk_size)
        .with_parallelism(Some(num_cpus::get()))
        .with_progress(true);
    info!("{config}");

    let start = Instant::now();
    let parallel = match_comorbidities(&visits, &map, &config)?;
    let parallel_elapsed = start.elapsed();

    let start = Instant::now();
    let single = match_comorbidities(&visits, &map, &config.clone().with_parallelism(Some(1)))?;
    let single_elapsed = start.elapsed();

    ensure!(parallel == single, "parallel and single-threaded results differ");

    let hits = parallel.as_slice().iter().filter(|cell| **cell).count();
    info!(
        "{} threads: {parallel_elapsed:?}, 1 thread: {single_elapsed:?}, {hits} positive cells",
        config.effective_threads()
    );

    Ok(())
}
