//! Hardware Detection Module
//!
//! Probes the accelerator runtimes and picks the compute device.

pub mod device;
pub mod gpu;
pub mod probe;
pub mod selector;


pub use device::SelectedDevice;
pub use gpu::{detect_adapter, AdapterInfo};
pub use probe::{CapabilityProbe, Host, SystemHost};
pub use selector::select_device;
