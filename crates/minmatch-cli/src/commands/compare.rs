use crate::cli::CompareArgs;
use crate::error::Result;
use crate::input;
use crate::report;
use crate::settings::Settings;
use crate::utils::progress::CliProgressHandler;
use minmatch::engine::progress::ProgressReporter;
use minmatch::engine::snapshot;
use minmatch::workflows::compare::{self, ComparisonReport};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn run(args: CompareArgs) -> Result<()> {
    let inputs = input::read_input_list(&args.input)?;
    info!(
        files = inputs.len(),
        reference = %inputs[0].path.display(),
        "Input list loaded"
    );

    let settings = match &args.settings {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let config = settings.into_config(args.threshold)?;

    let cache_path: PathBuf = args
        .cache
        .clone()
        .unwrap_or_else(|| args.output_dir.join("match.bin"));

    let result = if args.use_cache && cache_path.exists() {
        info!(snapshot = %cache_path.display(), "Reusing match snapshot");
        println!("Reusing match snapshot {}", cache_path.display());
        let set = snapshot::load(&cache_path)?;
        compare::analyze(&set)
    } else {
        if args.use_cache {
            warn!(
                snapshot = %cache_path.display(),
                "Snapshot not found; running the full matching stage"
            );
        }

        let progress_handler = CliProgressHandler::new();
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

        println!("Matching conformer minima across {} files...", inputs.len());
        let (set, result) = compare::run(&inputs, &config, &reporter)?;

        std::fs::create_dir_all(&args.output_dir)?;
        snapshot::save(&set, &cache_path)?;
        info!(snapshot = %cache_path.display(), "Match snapshot saved");
        result
    };

    if !args.summary_only {
        report::write_reports(&result, &args.output_dir)?;
        println!("✓ Reports written to {}", args.output_dir.display());
    }
    print_summary(&result);

    Ok(())
}

fn print_summary(report: &ComparisonReport) {
    for molecule in &report.molecules {
        println!(
            "\n{} (zero reference: conformer {})",
            molecule.title, molecule.zero_reference
        );
        println!(
            "  {:<32} {:>12} {:>12} {:>10}",
            "level of theory", "RMSE (kcal)", "time ratio", "stddev"
        );
        for (file, theory) in report.theories.iter().enumerate() {
            let ratio = &molecule.time_ratios[file];
            println!(
                "  {:<32} {:>12.4} {:>12.4} {:>10.4}",
                theory, molecule.rms_errors[file], ratio.mean, ratio.stddev
            );
        }
    }
}
