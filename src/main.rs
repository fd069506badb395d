//! pcb-coil-sim - capacitor discharge through a stacked PCB coil
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info pcb-coil-sim --config coil.json --csv-dir out/
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pcb_coil_sim::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Exact matrix-exponential propagation
    Exp,
    /// Trapezoidal rule
    Trapezoidal,
}

impl From<Method> for TransientMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Exp => Self::MatrixExponential,
            Method::Trapezoidal => Self::Trapezoidal,
        }
    }
}

/// PCB coil discharge simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration; omitted fields use the reference coil
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of time samples
    #[arg(short, long)]
    samples: Option<usize>,

    /// Simulated window in seconds
    #[arg(long)]
    horizon: Option<f64>,

    /// Integration scheme
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Directory for the field and current CSV files
    #[arg(long, value_name = "DIR")]
    csv_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CoilConfig::from_reader(File::open(path)?)?,
        None => CoilConfig::default(),
    };
    if let Some(samples) = args.samples {
        config.simulation.samples = samples;
    }
    if let Some(horizon) = args.horizon {
        config.simulation.horizon_s = horizon;
    }
    if let Some(method) = args.method {
        config = config.with_method(method.into());
    }

    let discharge = CoilDischarge::simulate(&config)?;
    println!("{}", discharge.diagnostics());

    if let Some(dir) = &args.csv_dir {
        std::fs::create_dir_all(dir)?;
        for series in discharge.summary.plot_series() {
            let file = File::create(dir.join(format!("{}.csv", series.identifier)))?;
            let mut sink = CsvSink::new(BufWriter::new(file));
            sink.emit(&series)?;
            sink.into_inner().flush()?;
        }
    }

    Ok(())
}
