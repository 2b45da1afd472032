use std::fmt;
use std::str::FromStr;

use candle_core::Device;
use tracing::{debug, warn};

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

use super::error::EmbeddingError;

/// Requested compute device for the model backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    #[default]
    Cpu,
    Cuda,
    Metal,
}

impl FromStr for DevicePreference {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "cuda" | "gpu" => Ok(Self::Cuda),
            "metal" | "mps" => Ok(Self::Metal),
            _ => Err(EmbeddingError::UnknownDevice {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DevicePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
            Self::Metal => "metal",
        };
        f.write_str(name)
    }
}

/// Selects the compute device for a preference (falls back to CPU).
///
/// A GPU is only used when the matching cargo feature is compiled in and the device opens.
pub fn select_device(preference: DevicePreference) -> Device {
    match preference {
        DevicePreference::Cpu => {
            debug!("Using CPU device");
            Device::Cpu
        }
        DevicePreference::Cuda => open_cuda().unwrap_or_else(|reason| cpu_fallback("cuda", reason)),
        DevicePreference::Metal => {
            open_metal().unwrap_or_else(|reason| cpu_fallback("metal", reason))
        }
    }
}

fn cpu_fallback(requested: &str, reason: String) -> Device {
    warn!(requested, reason = %reason, "Falling back to CPU device");
    Device::Cpu
}

#[cfg(feature = "cuda")]
fn open_cuda() -> Result<Device, String> {
    let device = Device::new_cuda(0).map_err(|e| e.to_string())?;
    info!("Using CUDA GPU acceleration");
    Ok(device)
}

#[cfg(not(feature = "cuda"))]
fn open_cuda() -> Result<Device, String> {
    Err("cuda backend not compiled".to_string())
}

#[cfg(feature = "metal")]
fn open_metal() -> Result<Device, String> {
    let device = Device::new_metal(0).map_err(|e| e.to_string())?;
    info!("Using Metal GPU acceleration");
    Ok(device)
}

#[cfg(not(feature = "metal"))]
fn open_metal() -> Result<Device, String> {
    Err("metal backend not compiled".to_string())
}
