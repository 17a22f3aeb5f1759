//! devprobe: reports which compute device this host would select.
//!
//! CUDA is preferred, then Metal, then the CPU.

pub mod config;
pub mod error;
pub mod hardware;
pub mod report;

pub use config::{OutputFormat, ProbeConfig};
pub use error::{ProbeError, ProbeResult};
pub use hardware::{select_device, SelectedDevice};
pub use report::ProbeReport;

use hardware::{detect_adapter, Host, SystemHost};
use report::SmokeCheck;

/// Probe the real host
pub fn run(config: &ProbeConfig) -> ProbeResult<ProbeReport> {
    run_with_host(&SystemHost::new(), config)
}

/// Select a device, then enrich the report with adapter details and the
/// optional smoke check
pub fn run_with_host(host: &dyn Host, config: &ProbeConfig) -> ProbeResult<ProbeReport> {
    let mut report = select_device(host)?;

    if report.selected == SelectedDevice::Cuda {
        report.adapter = detect_adapter();
    }
    if config.smoke {
        report.smoke = Some(SmokeCheck::run(report.selected, config.ordinal));
    }

    Ok(report)
}

/// Render a report in the configured format
pub fn render(report: &ProbeReport, format: OutputFormat) -> ProbeResult<String> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => report.to_json(),
    }
}
