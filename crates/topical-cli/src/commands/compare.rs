use super::load_models;
use crate::cli::CompareArgs;
use crate::config::builder::build_config;
use crate::error::Result;
use crate::utils::format;
use crate::utils::progress::CliProgressHandler;
use topical::engine::policy::Policy;
use topical::engine::progress::ProgressReporter;
use topical::workflows::propose;
use topical::workflows::rank::compare_policies;

pub fn run(args: CompareArgs) -> Result<()> {
    let policy_a: Policy = args.policy_a.parse()?;
    let policy_b: Policy = args.policy_b.parse()?;
    let app = build_config(&args.run)?;
    let models = load_models(app.models_path.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let proposals = propose::run(&app.proposal, &models, &reporter)?;

    if proposals.is_empty() {
        eprintln!("No candidate satisfies the constraints. Nothing to compare.");
        return Ok(());
    }

    let comparison = compare_policies(&proposals, policy_a, policy_b);
    print!("{}", format::comparison_table(&comparison, args.top));
    Ok(())
}
