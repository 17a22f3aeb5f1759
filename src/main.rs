use devprobe_lib::{render, run, ProbeConfig, ProbeResult};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = probe() {
        tracing::error!("Device probe failed: {}", e);
        std::process::exit(1);
    }
}

fn probe() -> ProbeResult<()> {
    let config = ProbeConfig::load()?;
    let report = run(&config)?;
    let output = render(&report, config.format)?;
    println!("{}", output.trim_end());
    Ok(())
}
