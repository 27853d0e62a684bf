mod error;

use clap::{Parser, Subcommand, ValueEnum};
use datum_core::{Combination, Datum, normal_test, weighted_mean};
use datum_instruments::{Instrument, Quantity, Settings, measure};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "datum")]
#[command(about = "Datum CLI - propagate measurement uncertainty", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine two data with a binary operation
    Combine {
        op: BinaryOp,
        /// First operand, e.g. "10 +- 1"
        #[arg(allow_hyphen_values = true)]
        a: Datum,
        /// Second operand
        #[arg(allow_hyphen_values = true)]
        b: Datum,
        /// Worst-case (linear) combination instead of quadrature
        #[arg(long, conflicts_with = "covariance")]
        linear: bool,
        /// Covariance between the operands (quadrature only)
        #[arg(long, allow_hyphen_values = true)]
        covariance: Option<f64>,
    },
    /// Apply a single-argument function
    Apply {
        function: UnaryFn,
        #[arg(allow_hyphen_values = true)]
        x: Datum,
        /// Exponent for `powf`, base for `log`
        #[arg(long, allow_hyphen_values = true)]
        param: Option<f64>,
    },
    /// Normal compatibility test between two data
    Compat {
        #[arg(allow_hyphen_values = true)]
        a: Datum,
        #[arg(allow_hyphen_values = true)]
        b: Datum,
        /// Significance level
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,
    },
    /// Inverse-variance weighted mean
    Mean {
        #[arg(allow_hyphen_values = true)]
        data: Vec<Datum>,
        /// YAML list of `{ value, uncertainty }` records
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Convert an instrument reading into a datum
    Measure {
        /// e.g. agilent, keysight, amprobe, supertester
        instrument: Instrument,
        /// e.g. resistance, capacitance, vdc, iac
        quantity: Quantity,
        #[arg(allow_negative_numbers = true)]
        reading: f64,
        /// Test or signal frequency in Hz
        #[arg(long)]
        freq: Option<f64>,
        /// SuperTester x2 sensitivity switch
        #[arg(long)]
        x2: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// a raised to b
    Pow,
    /// log of a in base b
    Log,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnaryFn {
    Sqrt,
    Cbrt,
    Exp,
    Exp2,
    Ln,
    Log10,
    Log2,
    Log,
    Powf,
    Acos,
    Asin,
    Atan,
    Cos,
    Sin,
    Tan,
    Degrees,
    Radians,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Combine {
            op,
            a,
            b,
            linear,
            covariance,
        } => cmd_combine(op, a, b, combination(linear, covariance)),
        Commands::Apply { function, x, param } => cmd_apply(function, x, param),
        Commands::Compat { a, b, alpha } => cmd_compat(a, b, alpha),
        Commands::Mean { data, file } => cmd_mean(data, file.as_deref()),
        Commands::Measure {
            instrument,
            quantity,
            reading,
            freq,
            x2,
        } => cmd_measure(
            instrument,
            quantity,
            reading,
            Settings {
                frequency_hz: freq,
                x2_sensitivity: x2,
            },
        ),
    }
}

fn combination(linear: bool, covariance: Option<f64>) -> Combination {
    match (linear, covariance) {
        (true, _) => Combination::linear(),
        (false, Some(cov)) => Combination::correlated(cov),
        (false, None) => Combination::quadrature(),
    }
}

fn binary(op: BinaryOp, a: Datum, b: Datum, mode: Combination) -> Datum {
    match op {
        BinaryOp::Add => a.add_with(b, mode),
        BinaryOp::Sub => a.subtract_with(b, mode),
        BinaryOp::Mul => a.multiply_with(b, mode),
        BinaryOp::Div => a.divide_with(b, mode),
        BinaryOp::Pow => a.pow_with(b, mode),
        BinaryOp::Log => a.log_with(b, mode),
    }
}

fn unary(function: UnaryFn, x: Datum, param: Option<f64>) -> CliResult<Datum> {
    let needs = |function: &'static str| CliError::MissingParameter { function };
    Ok(match function {
        UnaryFn::Sqrt => x.sqrt(),
        UnaryFn::Cbrt => x.cbrt(),
        UnaryFn::Exp => x.exp(),
        UnaryFn::Exp2 => x.exp2(),
        UnaryFn::Ln => x.ln(),
        UnaryFn::Log10 => x.log10(),
        UnaryFn::Log2 => x.log2(),
        UnaryFn::Log => x.log(param.ok_or_else(|| needs("log"))?),
        UnaryFn::Powf => x.powf(param.ok_or_else(|| needs("powf"))?),
        UnaryFn::Acos => x.acos(),
        UnaryFn::Asin => x.asin(),
        UnaryFn::Atan => x.atan(),
        UnaryFn::Cos => x.cos(),
        UnaryFn::Sin => x.sin(),
        UnaryFn::Tan => x.tan(),
        UnaryFn::Degrees => x.to_degrees(),
        UnaryFn::Radians => x.to_radians(),
    })
}

fn print_datum(d: Datum) {
    println!("{d}");
    if d.value() != 0.0 && d.uncertainty().is_finite() {
        println!("  relative: {:.2}%", 100.0 * d.relative_uncertainty());
    }
}

fn cmd_combine(op: BinaryOp, a: Datum, b: Datum, mode: Combination) -> CliResult<()> {
    tracing::debug!(?op, %a, %b, ?mode, "combine");
    print_datum(binary(op, a, b, mode));
    Ok(())
}

fn cmd_apply(function: UnaryFn, x: Datum, param: Option<f64>) -> CliResult<()> {
    tracing::debug!(?function, %x, ?param, "apply");
    print_datum(unary(function, x, param)?);
    Ok(())
}

fn cmd_compat(a: Datum, b: Datum, alpha: f64) -> CliResult<()> {
    let test = normal_test(a, b);
    println!("z = {:.3}", test.z);
    println!("p = {:.4}", test.p_value);
    if test.is_compatible(alpha) {
        println!("✓ Compatible at alpha = {alpha}");
    } else {
        println!("✗ Not compatible at alpha = {alpha}");
    }
    Ok(())
}

fn load_data(path: &Path) -> CliResult<Vec<Datum>> {
    let text = fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::FileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_mean(mut data: Vec<Datum>, file: Option<&Path>) -> CliResult<()> {
    if let Some(path) = file {
        let loaded = load_data(path)?;
        tracing::info!(count = loaded.len(), path = %path.display(), "loaded data file");
        data.extend(loaded);
    }
    let mean = weighted_mean(&data)?;
    println!("Weighted mean of {} values:", data.len());
    print_datum(mean);
    Ok(())
}

fn cmd_measure(
    instrument: Instrument,
    quantity: Quantity,
    reading: f64,
    settings: Settings,
) -> CliResult<()> {
    let d = measure(instrument, quantity, reading, settings)?;
    println!("{instrument} {quantity}:");
    print_datum(d);
    Ok(())
}
