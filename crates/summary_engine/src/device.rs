use std::fmt;

use candle_core::Device;
use serde::Serialize;

/// The compute resource inference runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Cpu,
    Cuda,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Cpu => f.write_str("cpu"),
            DeviceKind::Cuda => f.write_str("cuda"),
        }
    }
}

/// Explicit device selection policy, decided once at load time.
///
/// Kept as a capability query rather than library auto-detection so the
/// no-accelerator path can be exercised directly in tests.
#[derive(Debug, Clone, Copy)]
pub struct DevicePolicy {
    pub prefer_accelerator: bool,
}

impl Default for DevicePolicy {
    fn default() -> Self {
        Self {
            prefer_accelerator: true,
        }
    }
}

impl DevicePolicy {
    /// Pin inference to the CPU regardless of available hardware.
    pub fn cpu_only() -> Self {
        Self {
            prefer_accelerator: false,
        }
    }

    pub fn select(&self) -> (Device, DeviceKind) {
        if self.prefer_accelerator {
            match Device::cuda_if_available(0) {
                Ok(device) if device.is_cuda() => {
                    tracing::info!("CUDA accelerator detected, using GPU");
                    return (device, DeviceKind::Cuda);
                }
                Ok(_) => {
                    tracing::debug!("No CUDA accelerator available, using CPU");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to initialize CUDA, falling back to CPU");
                }
            }
        }
        (Device::Cpu, DeviceKind::Cpu)
    }
}
