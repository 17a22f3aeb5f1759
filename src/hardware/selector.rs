//! Device selection
//!
//! Fixed priority: CUDA, then Metal, then CPU. The host's primary probe is
//! the CUDA slot and its optional secondary probe is the Metal slot.

use crate::error::ProbeResult;
use crate::hardware::probe::Host;
use crate::hardware::SelectedDevice;
use crate::report::{ProbeReport, SecondaryStatus};

/// Probe the host and decide which device a caller would use.
///
/// Selection stops at CUDA when it is available; the secondary probe is
/// not consulted. A missing secondary capability check counts as
/// "unavailable". Every other error propagates.
pub fn select_device(host: &dyn Host) -> ProbeResult<ProbeReport> {
    let primary = host.primary();
    let cuda_available = primary.is_available()?;
    tracing::info!(backend = primary.backend(), available = cuda_available, "Capability probe");

    let metal = if cuda_available {
        SecondaryStatus::Skipped
    } else {
        probe_secondary(host)?
    };

    let selected = if cuda_available {
        SelectedDevice::Cuda
    } else if metal.is_available() {
        SelectedDevice::Metal
    } else {
        SelectedDevice::Cpu
    };
    tracing::info!(device = %selected, "Device selected");

    Ok(ProbeReport {
        cuda_available,
        metal,
        selected,
        adapter: None,
        smoke: None,
    })
}

fn probe_secondary(host: &dyn Host) -> ProbeResult<SecondaryStatus> {
    let Some(probe) = host.secondary() else {
        tracing::debug!("Secondary module not present");
        return Ok(SecondaryStatus::ModuleAbsent);
    };

    match probe.is_available() {
        Ok(true) => Ok(SecondaryStatus::Available),
        Ok(false) => Ok(SecondaryStatus::Unavailable),
        Err(e) if e.is_capability_missing() => {
            tracing::info!(backend = probe.backend(), "{}", e);
            Ok(SecondaryStatus::CheckMissing)
        }
        Err(e) => Err(e),
    }
}
