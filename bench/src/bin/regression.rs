//! Randomized regression sweep over `ddroute-core`, tracking `messages_sent / |E|` the way the
//! design notes ask of whoever investigates per-parent table bloat.

use clap::Parser;
use console::style;
use ddroute_bench::run_regression;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ddroute-regression", author, about = "Randomized regression sweep for ddroute-core")]
struct Args {
    /// Number of random graphs to sample.
    #[arg(short = 'i', long, default_value = "1000")]
    iterations: usize,
    /// Largest graph size to sample (smallest is always 3).
    #[arg(short = 'n', long, default_value = "10")]
    max_nodes: usize,
    /// Random seed, for reproducible sweeps.
    #[arg(short = 's', long, default_value = "42")]
    seed: u64,
    /// CSV file to write the per-sample records to.
    #[arg(short = 'o', long, default_value = "regression.csv")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let bar = ProgressBar::new(args.iterations as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} samples ({eta})")
            .unwrap(),
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let records = run_regression(&mut rng, args.iterations, args.max_nodes);
    bar.finish_and_clear();

    let mut writer = csv::Writer::from_path(&args.output)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let mean_ratio: f64 = records.iter().map(|r| r.ratio).sum::<f64>() / records.len().max(1) as f64;
    let max_ratio = records.iter().map(|r| r.ratio).fold(0.0_f64, f64::max);

    println!(
        "{} {} samples -> {}",
        style("wrote").green(),
        records.len(),
        args.output.display()
    );
    println!("mean messages_sent/|E|: {:.3}", mean_ratio);
    println!("max  messages_sent/|E|: {:.3}", max_ratio);
    if max_ratio > mean_ratio * 4.0 + 1.0 {
        println!(
            "{} a sample's ratio is well above the mean; this may be a propagation regression",
            style("warning:").yellow()
        );
    }

    Ok(())
}
