use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};

use nj::harness::{self, RunStats};
use nj::lines::build_line_index;
use nj::output::{OutputBuf, OutputMode};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "nj",
    about = "Filter NDJSON records on a numeric field, byte-exact and fast",
    version
)]
struct Cli {
    /// NDJSON input file (.gz / .zst decompressed transparently)
    file: String,

    /// Top-level numeric field to test
    #[arg(long, default_value = "age")]
    field: String,

    /// Keep records where FIELD is strictly greater than this value
    #[arg(long = "gt", value_name = "THRESHOLD", default_value_t = 30.0)]
    gt: f64,

    /// Print only the match count
    #[arg(long)]
    count: bool,

    /// Suppress all per-record output (pure filter throughput)
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Missing or invalid arguments exit 1, not clap's default 2; --help and
    // --version stay conventional.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let (buf, json_len) = nj::input::load_padded(&cli.file)
        .with_context(|| format!("failed to load input: {}", cli.file))?;
    let index = build_line_index(&buf[..json_len]);

    let mode = if cli.count {
        OutputMode::CountOnly
    } else if cli.quiet {
        OutputMode::Suppress
    } else {
        OutputMode::Emit
    };
    let mut out_buf = OutputBuf::new(mode);
    let stats = harness::filter_pass(&buf, json_len, &index, &cli.field, cli.gt, &mut out_buf)?;

    // The bulk write sits outside the timed interval.
    let stdout = io::stdout().lock();
    let mut out = BufWriter::with_capacity(128 * 1024, stdout);
    match mode {
        OutputMode::Emit => out_buf.flush_to(&mut out)?,
        OutputMode::CountOnly => writeln!(out, "{}", stats.matched)?,
        OutputMode::Suppress => {}
    }
    out.flush()?;

    report(&cli, mode, &stats, json_len);
    Ok(())
}

fn report(cli: &Cli, mode: OutputMode, stats: &RunStats, input_len: usize) {
    eprintln!(
        "nj {} | {} | field={} gt={}",
        env!("CARGO_PKG_VERSION"),
        mode.describe(),
        cli.field,
        cli.gt
    );
    eprintln!("  total={:<10}  matched={:<10}", stats.docs, stats.matched);
    eprintln!(
        "  time={:.3}s  throughput={:.2} GB/s",
        stats.elapsed.as_secs_f64(),
        stats.gb_per_sec(input_len)
    );
}
