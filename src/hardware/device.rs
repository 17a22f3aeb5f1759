//! Selected compute device and its candle counterpart

use candle_core::Device;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProbeError, ProbeResult};

/// Device picked by the selector, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectedDevice {
    Cuda,
    Metal,
    Cpu,
}

impl SelectedDevice {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectedDevice::Cuda => "cuda",
            SelectedDevice::Metal => "metal",
            SelectedDevice::Cpu => "cpu",
        }
    }

    /// Human-facing backend name used in status lines
    pub fn backend_name(&self) -> &'static str {
        match self {
            SelectedDevice::Cuda => "CUDA",
            SelectedDevice::Metal => "Metal",
            SelectedDevice::Cpu => "CPU",
        }
    }

    /// Open the live candle device for this selection.
    ///
    /// Without the matching cargo feature candle reports that the backend
    /// was not compiled in; that surfaces as [`ProbeError::Backend`].
    pub fn open(&self, ordinal: usize) -> ProbeResult<Device> {
        let device = match self {
            SelectedDevice::Cuda => Device::new_cuda(ordinal),
            SelectedDevice::Metal => Device::new_metal(ordinal),
            SelectedDevice::Cpu => return Ok(Device::Cpu),
        };
        device.map_err(|e| ProbeError::backend(self.backend_name(), e.to_string()))
    }
}

impl fmt::Display for SelectedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
