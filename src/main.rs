use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use numfmt::{fmt, indent, interpolant, Number, NumericFormatter, Value};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Indent every output line by this many spaces
    #[arg(long, global = true, default_value_t = 0)]
    indent: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format numbers with thousands separators and magnitude suffixes
    Fmt {
        /// Format all values as one comma separated sequence
        #[arg(long)]
        join: bool,
        #[command(flatten)]
        input: Input,
    },
    /// Format fractions as percentages
    Pc(Input),
    /// Format fractions as parts per thousand
    Pm(Input),
    /// Format fractions as parts per ten thousand
    P10k(Input),
    /// Linearly interpolate sample points
    Interp {
        /// Comma separated x coordinates, non-decreasing
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        xs: Vec<f64>,
        /// Comma separated y coordinates
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        ys: Vec<f64>,
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// Values to format; read from stdin when omitted
    #[arg(allow_hyphen_values = true)]
    values: Vec<String>,
}

impl Input {
    fn numbers(&self) -> Result<Vec<Number>> {
        let tokens = if self.values.is_empty() {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read values from stdin")?;
            buf.split_whitespace().map(str::to_string).collect()
        } else {
            self.values.clone()
        };
        debug!(count = tokens.len(), "parsing input values");

        tokens
            .iter()
            .map(|token| {
                token
                    .parse::<Number>()
                    .with_context(|| format!("Failed to parse {token:?} as a number"))
            })
            .collect()
    }
}

fn run(command: &Command) -> Result<Vec<String>> {
    let lines = match command {
        Command::Fmt { join: true, input } => {
            let values = input.numbers()?.into_iter().map(Value::from).collect::<Vec<_>>();
            vec![fmt(values)]
        }
        Command::Fmt { join: false, input } => {
            input.numbers()?.into_iter().map(|n| n.humanize()).collect()
        }
        Command::Pc(input) => input.numbers()?.into_iter().map(|n| n.humanize_pc()).collect(),
        Command::Pm(input) => input.numbers()?.into_iter().map(|n| n.humanize_pm()).collect(),
        Command::P10k(input) => input
            .numbers()?
            .into_iter()
            .map(|n| n.humanize_p10k())
            .collect(),
        Command::Interp { xs, ys, input } => {
            let f = interpolant(xs.iter().copied(), ys.iter().copied())
                .context("Invalid sample points")?;
            info!(domain = ?f.domain(), "interpolating");
            input
                .numbers()?
                .into_iter()
                .map(|t| f.call(t.as_f64()).humanize())
                .collect()
        }
    };
    Ok(lines)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let lines = run(&cli.command)?;
    let mut output = lines
        .iter()
        .map(|line| format!("{line}\n"))
        .collect::<String>();
    if cli.indent > 0 {
        output = indent(&output, cli.indent);
    }
    print!("{output}");

    Ok(())
}
