use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Topical R&D Decision Support Contributors",
    version,
    about = "Topical CLI - Decision support for topical formulation R&D: sample candidate formulations, predict their properties, rank the next experiments under a decision policy, and assemble traceable evidence packs from past experiments.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate ranked formulation proposals and optionally export them.
    Propose(ProposeArgs),
    /// Rank the same proposal set under two decision policies side by side.
    Compare(CompareArgs),
    /// List the available decision policies and their weights.
    Policies,
    /// Write a sampled candidate pool to a CSV file.
    Sample(SampleArgs),
    /// Build a prioritized evidence pack from historical experiments and development notes.
    Evidence(EvidenceArgs),
}

/// Options shared by every command that runs the proposal pipeline.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a surrogate model coefficient file in TOML format.
    /// The built-in coefficients are used when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub models: Option<PathBuf>,

    // --- Run Overrides ---
    /// Number of candidates to sample.
    #[arg(short = 'p', long, value_name = "INT")]
    pub pool_size: Option<usize>,

    /// Seed of the candidate sampler.
    #[arg(short, long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Number of proposals to keep after ranking.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top_n: Option<usize>,

    // --- Constraint Overrides ---
    /// Maximum predicted irritation, in [0, 1].
    #[arg(long, value_name = "FLOAT")]
    pub max_irritation: Option<f64>,

    /// Minimum predicted stability, in days.
    #[arg(long, value_name = "DAYS")]
    pub min_stability: Option<f64>,

    /// Maximum predicted QC failure probability, in [0, 1].
    #[arg(long, value_name = "FLOAT")]
    pub max_fail_prob: Option<f64>,

    /// Disable all constraint filtering, including bounds from the config file.
    #[arg(long, conflicts_with_all = ["max_irritation", "min_stability", "max_fail_prob"])]
    pub no_constraints: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S run.seed=11
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Arguments for the `propose` subcommand.
#[derive(Args, Debug)]
pub struct ProposeArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Decision policy used to order the proposals (balanced, speed_to_clinic, low_risk).
    #[arg(short = 'P', long, value_name = "NAME")]
    pub policy: Option<String>,

    /// Score this candidate pool CSV instead of sampling one.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write the policy-ranked proposals to a CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a Markdown recommendation summary to this file.
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Number of proposals included in the Markdown summary.
    #[arg(short = 'k', long, value_name = "INT")]
    pub top_k: Option<usize>,

    /// How to print the proposals to standard output.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// First policy of the comparison.
    #[arg(short = 'a', long, value_name = "NAME", default_value = "speed_to_clinic")]
    pub policy_a: String,

    /// Second policy of the comparison.
    #[arg(short = 'b', long, value_name = "NAME", default_value = "low_risk")]
    pub policy_b: String,

    /// Number of rows shown per policy.
    #[arg(short, long, value_name = "INT", default_value_t = 8)]
    pub top: usize,
}

/// Arguments for the `sample` subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of candidates to sample.
    #[arg(short = 'p', long, value_name = "INT")]
    pub pool_size: Option<usize>,

    /// Seed of the candidate sampler.
    #[arg(short, long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Destination CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `evidence` subcommand.
#[derive(Args, Debug)]
pub struct EvidenceArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Formulation table CSV with exp_id, stability_days, irritation_risk and qc_fail columns.
    #[arg(short = 'd', long, required = true, value_name = "PATH")]
    pub formulations: PathBuf,

    /// Development notes CSV with exp_id and observation columns.
    #[arg(short = 'N', long, value_name = "PATH")]
    pub notes: Option<PathBuf>,

    /// Number of experiments kept in the pack.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top_n: Option<usize>,

    /// Write the evidence pack to a CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the Markdown evidence pack narrative to this file.
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// How to print the pack to standard output.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn propose_parses_overrides_and_repeated_set_values() {
        let cli = Cli::parse_from([
            "topical",
            "-vv",
            "propose",
            "--pool-size",
            "300",
            "--max-irritation",
            "0.5",
            "-S",
            "run.seed=3",
            "-S",
            "report.top-k=4",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Propose(args) = cli.command else {
            panic!("Expected 'propose' subcommand");
        };
        assert_eq!(args.run.pool_size, Some(300));
        assert_eq!(args.run.max_irritation, Some(0.5));
        assert_eq!(args.run.set_values, vec!["run.seed=3", "report.top-k=4"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.policy.is_none());
    }

    #[test]
    fn compare_has_policy_defaults() {
        let cli = Cli::parse_from(["topical", "compare"]);
        let Commands::Compare(args) = cli.command else {
            panic!("Expected 'compare' subcommand");
        };
        assert_eq!(args.policy_a, "speed_to_clinic");
        assert_eq!(args.policy_b, "low_risk");
        assert_eq!(args.top, 8);
    }

    #[test]
    fn no_constraints_conflicts_with_explicit_bounds() {
        let result = Cli::try_parse_from([
            "topical",
            "propose",
            "--no-constraints",
            "--min-stability",
            "100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn evidence_requires_formulations_and_parses_options() {
        assert!(Cli::try_parse_from(["topical", "evidence"]).is_err());

        let cli = Cli::parse_from([
            "topical",
            "evidence",
            "-d",
            "formulations.csv",
            "-N",
            "notes.csv",
            "-n",
            "5",
            "--format",
            "csv",
        ]);
        let Commands::Evidence(args) = cli.command else {
            panic!("Expected 'evidence' subcommand");
        };
        assert_eq!(args.formulations, PathBuf::from("formulations.csv"));
        assert_eq!(args.notes, Some(PathBuf::from("notes.csv")));
        assert_eq!(args.top_n, Some(5));
        assert_eq!(args.format, OutputFormat::Csv);
    }

    #[test]
    fn sample_requires_an_output_path() {
        assert!(Cli::try_parse_from(["topical", "sample"]).is_err());
    }
}
