use super::load_models;
use crate::cli::{OutputFormat, ProposeArgs};
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::report::render_recommendations;
use crate::utils::format;
use crate::utils::progress::CliProgressHandler;
use chrono::Local;
use topical::core::io::table::{read_pool_from_path, write_records, write_records_to_path};
use topical::core::models::proposal::ProposalRecord;
use topical::engine::policy::{Policy, apply_policy};
use topical::engine::progress::ProgressReporter;
use topical::workflows::propose::{self, propose_from_pool};
use tracing::{info, warn};

pub fn run(args: ProposeArgs) -> Result<()> {
    let app = build_config(&args.run)?;
    let policy = match &args.policy {
        Some(name) => name.parse::<Policy>()?,
        None => app.policy,
    };
    let top_k = args.top_k.unwrap_or(app.report_top_k);
    let models = load_models(app.models_path.as_deref())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let proposals = match &args.input {
        Some(path) => {
            info!("Scoring candidate pool from {:?}", path);
            let pool = read_pool_from_path(path)?;
            propose_from_pool(
                &pool,
                app.proposal.constraints.as_ref(),
                app.proposal.top_n,
                &models,
                &reporter,
            )?
        }
        None => propose::run(&app.proposal, &models, &reporter)?,
    };

    if proposals.is_empty() {
        warn!("No candidate satisfies the constraints.");
        eprintln!("No candidate satisfies the constraints. Relax the bounds or enlarge the pool.");
    }

    let ranked = apply_policy(&proposals, policy);
    let records: Vec<ProposalRecord> = ranked.iter().map(ProposalRecord::from).collect();

    match args.format {
        OutputFormat::Table => print!("{}", format::proposal_table(&ranked)),
        OutputFormat::Csv => write_records(&records, std::io::stdout().lock())?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records)
                .map_err(|e| CliError::Other(e.into()))?;
            println!("{}", json);
        }
    }

    if let Some(path) = &args.output {
        write_records_to_path(&records, path)?;
        info!("Wrote {} ranked proposals to {:?}", records.len(), path);
        eprintln!("✓ Ranked proposals written to: {}", path.display());
    }

    if let Some(path) = &args.report {
        let markdown = render_recommendations(&ranked, policy, Local::now().date_naive(), top_k);
        std::fs::write(path, markdown)?;
        info!("Wrote recommendation summary ({} entries) to {:?}", top_k.min(ranked.len()), path);
        eprintln!("✓ Recommendation summary written to: {}", path.display());
    }

    Ok(())
}
