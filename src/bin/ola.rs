use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ola", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON script of timed writes and print the sampled trajectory.
    Sample(SampleArgs),
    /// Print a random walk: a new target in [0, 1) every 1300 ms.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sampling interval in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    step_ms: f64,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Seed for the random targets.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Length of the walk in milliseconds.
    #[arg(long, default_value_t = 10_000.0)]
    until_ms: f64,

    /// Sampling interval in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    step_ms: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn read_script_json(path: &Path) -> anyhow::Result<ola::Script> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let r = BufReader::new(f);
    let script: ola::Script = serde_json::from_reader(r).with_context(|| "parse script JSON")?;
    Ok(script)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let script = read_script_json(&args.in_path)?;
    let samples = script.run(args.step_ms)?;
    write_samples(&samples)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let script = ola::Script::random_walk(args.seed, args.until_ms)?;
    let samples = script.run(args.step_ms)?;
    write_samples(&samples)
}

fn write_samples(samples: &[ola::Sample]) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for s in samples {
        serde_json::to_writer(&mut out, s).with_context(|| "write sample")?;
        out.write_all(b"\n").with_context(|| "write sample")?;
    }
    out.flush().with_context(|| "flush stdout")?;
    Ok(())
}
