use crate::cli::SampleArgs;
use crate::config::builder::build_sample_config;
use crate::error::Result;
use topical::core::io::table::write_pool_to_path;
use topical::engine::sampler::CandidateSampler;
use tracing::info;

pub fn run(args: SampleArgs) -> Result<()> {
    let config = build_sample_config(&args)?;
    let sampler = CandidateSampler::new(config.sampler)?;

    info!(
        pool_size = config.pool_size,
        seed = config.seed,
        "Sampling candidate pool."
    );
    let pool = sampler.generate(config.pool_size, config.seed);
    write_pool_to_path(&pool, &args.output)?;

    println!(
        "✓ Wrote {} candidates (seed {}) to {}",
        pool.len(),
        config.seed,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use topical::core::io::table::read_pool_from_path;

    #[test]
    fn writes_a_reproducible_pool() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");

        for output in [&first, &second] {
            run(SampleArgs {
                config: None,
                pool_size: Some(25),
                seed: Some(4),
                output: output.clone(),
            })
            .unwrap();
        }

        let pool = read_pool_from_path(&first).unwrap();
        assert_eq!(pool.len(), 25);
        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
    }
}
