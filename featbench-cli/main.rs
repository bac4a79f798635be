use featbench_cli::{check_output_dir, BenchError, BenchResult, CliArgs, FeaturePipeline};
use featbench_detect::{select_detectors, DetectorConfig};
use std::process;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        if err.is_usage() {
            println!("{}", err);
        } else {
            eprintln!("{}", err);
        }
        process::exit(err.exit_code());
    }
}

fn run() -> BenchResult<()> {
    let args = CliArgs::parse(std::env::args())?;
    check_output_dir(&args.output)?;

    let detectors = select_detectors(&args.selector, &DetectorConfig::default()).map_err(BenchError::from)?;
    let mut pipeline = FeaturePipeline::new(detectors);

    let t0 = Instant::now();
    let report = pipeline.run(&args.input, &args.output)?;
    log::info!(
        "{} image(s) in {:.2?} with {}",
        report.processed.len(),
        t0.elapsed(),
        args.selector
    );
    Ok(())
}
