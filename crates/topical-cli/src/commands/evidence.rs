use crate::cli::{EvidenceArgs, OutputFormat};
use crate::config::builder::build_evidence_config;
use crate::error::{CliError, Result};
use crate::report::{EVIDENCE_PACK_TITLE, render_evidence_pack};
use crate::utils::format;
use crate::utils::progress::CliProgressHandler;
use chrono::Local;
use topical::core::io::table::{
    read_experiments_from_path, read_notes_from_path, write_evidence, write_evidence_to_path,
};
use topical::engine::progress::ProgressReporter;
use topical::workflows::evidence;
use tracing::{info, warn};

pub fn run(args: EvidenceArgs) -> Result<()> {
    let config = build_evidence_config(&args)?;

    info!("Reading experiment records from {:?}", args.formulations);
    let records = read_experiments_from_path(&args.formulations)?;
    let notes = match &args.notes {
        Some(path) => {
            info!("Reading development notes from {:?}", path);
            read_notes_from_path(path)?
        }
        None => {
            warn!("No development notes given; every experiment is reported without notes.");
            Vec::new()
        }
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let pack = evidence::assemble(&records, &notes, config.top_n, &reporter);

    if pack.is_empty() {
        warn!("The formulation table contains no experiments.");
        eprintln!("No experiments found in {}.", args.formulations.display());
    }

    match args.format {
        OutputFormat::Table => print!("{}", format::evidence_table(&pack)),
        OutputFormat::Csv => write_evidence(&pack, std::io::stdout().lock())?,
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&pack).map_err(|e| CliError::Other(e.into()))?;
            println!("{}", json);
        }
    }

    if let Some(path) = &args.output {
        write_evidence_to_path(&pack, path)?;
        info!("Wrote {} evidence items to {:?}", pack.len(), path);
        eprintln!("✓ Evidence pack written to: {}", path.display());
    }

    if let Some(path) = &args.report {
        let markdown = render_evidence_pack(&pack, EVIDENCE_PACK_TITLE, Local::now().date_naive());
        std::fs::write(path, markdown)?;
        info!("Wrote evidence pack narrative to {:?}", path);
        eprintln!("✓ Evidence pack narrative written to: {}", path.display());
    }

    Ok(())
}
