use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileConstraintsConfig, FileDistribution};
use super::models::{AppConfig, EvidenceConfig, SampleConfig};
use crate::cli::{EvidenceArgs, RunArgs, SampleArgs};
use crate::error::{CliError, Result};
use std::collections::BTreeMap;
use std::str::FromStr;
use topical::core::models::features::FeatureName;
use topical::engine::config::{Constraints, ProposalConfigBuilder};
use topical::engine::policy::Policy;
use topical::engine::sampler::SamplerConfig;

/// Merges CLI arguments, `--set` overrides, the configuration file, and built-in defaults,
/// in that order of precedence.
pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let run_file = file_config.run.take().unwrap_or_default();
    let pool_size = args
        .pool_size
        .or(run_file.pool_size)
        .unwrap_or(defaults.pool_size);
    let seed = args.seed.or(run_file.seed).unwrap_or(defaults.seed);
    let top_n = args.top_n.or(run_file.top_n).unwrap_or(defaults.top_n);
    let policy = run_file
        .policy
        .as_deref()
        .map(Policy::from_str)
        .transpose()?
        .unwrap_or(defaults.policy);

    let constraints = merge_constraints(
        args,
        file_config.constraints.take().unwrap_or_default(),
        &defaults,
    )?;
    let sampler = merge_sampling(file_config.sampling.take())?;

    let proposal = ProposalConfigBuilder::new()
        .pool_size(pool_size)
        .seed(seed)
        .top_n(top_n)
        .constraints(constraints)
        .sampler(sampler)
        .build()?;

    let report_top_k = file_config
        .report
        .and_then(|r| r.top_k)
        .unwrap_or(defaults.report_top_k);

    Ok(AppConfig {
        proposal,
        policy,
        models_path: args.models.clone().or(file_config.models),
        report_top_k,
    })
}

pub fn build_sample_config(args: &SampleArgs) -> Result<SampleConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let run_file = file_config.run.take().unwrap_or_default();
    let sampler = merge_sampling(file_config.sampling.take())?;
    sampler.validate()?;

    Ok(SampleConfig {
        pool_size: args
            .pool_size
            .or(run_file.pool_size)
            .unwrap_or(defaults.pool_size),
        seed: args.seed.or(run_file.seed).unwrap_or(defaults.seed),
        sampler,
    })
}

pub fn build_evidence_config(args: &EvidenceArgs) -> Result<EvidenceConfig> {
    let defaults = DefaultsConfig::default();
    let file_evidence = match &args.config {
        Some(path) => FileConfig::from_file(path)?.evidence.unwrap_or_default(),
        None => Default::default(),
    };

    let top_n = args
        .top_n
        .or(file_evidence.top_n)
        .unwrap_or(defaults.evidence_top_n);
    if top_n == 0 {
        return Err(CliError::Config(
            "evidence top-n must be at least 1".to_string(),
        ));
    }
    Ok(EvidenceConfig { top_n })
}

fn merge_constraints(
    args: &RunArgs,
    file_val: FileConstraintsConfig,
    defaults: &DefaultsConfig,
) -> Result<Option<Constraints>> {
    if args.no_constraints {
        return Ok(None);
    }
    let use_defaults = file_val.enabled.unwrap_or(true);
    let pick = |cli: Option<f64>, file: Option<f64>, default: f64| {
        cli.or(file).or(use_defaults.then_some(default))
    };

    let mut builder = Constraints::builder();
    if let Some(value) = pick(
        args.max_irritation,
        file_val.max_irritation,
        defaults.max_irritation,
    ) {
        builder = builder.max_irritation(value);
    }
    if let Some(value) = pick(
        args.min_stability,
        file_val.min_stability,
        defaults.min_stability,
    ) {
        builder = builder.min_stability(value);
    }
    if let Some(value) = pick(
        args.max_fail_prob,
        file_val.max_fail_prob,
        defaults.max_fail_prob,
    ) {
        builder = builder.max_fail_probability(value);
    }

    let constraints = builder.build()?;
    Ok((!constraints.is_unconstrained()).then_some(constraints))
}

fn merge_sampling(file_val: Option<BTreeMap<String, FileDistribution>>) -> Result<SamplerConfig> {
    let mut sampler = SamplerConfig::default();
    for (name, distribution) in file_val.unwrap_or_default() {
        let feature: FeatureName = name
            .parse()
            .map_err(|e| CliError::Config(format!("[sampling.{}]: {}", name, e)))?;
        sampler = sampler.with_distribution(feature, distribution.into());
    }
    Ok(sampler)
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "models" => config.models = Some(value_str.into()),
            "run.pool-size" => {
                config.run.get_or_insert_with(Default::default).pool_size =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.seed" => {
                config.run.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.top-n" => {
                config.run.get_or_insert_with(Default::default).top_n =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.policy" => {
                config.run.get_or_insert_with(Default::default).policy =
                    Some(value_str.to_string());
            }
            "constraints.enabled" => {
                config.constraints.get_or_insert_with(Default::default).enabled =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "constraints.max-irritation" => {
                config
                    .constraints
                    .get_or_insert_with(Default::default)
                    .max_irritation = Some(parse_value(key, value_str, "float")?);
            }
            "constraints.min-stability" => {
                config
                    .constraints
                    .get_or_insert_with(Default::default)
                    .min_stability = Some(parse_value(key, value_str, "float")?);
            }
            "constraints.max-fail-prob" => {
                config
                    .constraints
                    .get_or_insert_with(Default::default)
                    .max_fail_prob = Some(parse_value(key, value_str, "float")?);
            }
            "report.top-k" => {
                config.report.get_or_insert_with(Default::default).top_k =
                    Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
