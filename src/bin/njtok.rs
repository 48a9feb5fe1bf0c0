use anyhow::{Context, Result};
use clap::Parser;

use nj::harness;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "njtok",
    about = "NDJSON structural-tokenizer throughput benchmark",
    version
)]
struct Cli {
    /// NDJSON input file (.gz / .zst decompressed transparently)
    file: String,

    /// Timed iterations; one untimed warmup pass always runs first
    #[arg(default_value_t = 5)]
    iterations: usize,
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
    let iters = cli.iterations.max(1);

    let (buf, json_len) = nj::input::load_padded(&cli.file)
        .with_context(|| format!("failed to load input: {}", cli.file))?;
    eprintln!(
        "File loaded: {:.3} GB  ({} bytes)",
        json_len as f64 / 1e9,
        json_len
    );

    eprintln!("Running {iters} timed iteration(s)...");
    let runs = harness::run_tokenizer(&buf, json_len, iters)?;

    let docs = runs.first().map_or(0, |r| r.docs);
    let best = harness::best_elapsed(&runs);
    let avg = harness::avg_elapsed(&runs);
    let best_gbps = harness::gbps(json_len, best);
    let avg_gbps = harness::gbps(json_len, avg);

    eprintln!(
        "\nnj {}  ondemand stream  (framing + lazy sentinel lookup)",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("  file_size : {:.3} GB", json_len as f64 / 1e9);
    eprintln!("  iters     : {iters}");
    eprintln!("  docs/iter : {docs}");
    eprintln!("  best run  : {:.4}s  ({best_gbps:.2} GB/s)", best.as_secs_f64());
    eprintln!("  avg  run  : {:.4}s  ({avg_gbps:.2} GB/s)", avg.as_secs_f64());

    // Machine-readable line for comparison scripts.
    println!(
        "nj_gb_per_sec={best_gbps:.2} nj_best_sec={:.4} nj_docs={docs}",
        best.as_secs_f64()
    );
    Ok(())
}
