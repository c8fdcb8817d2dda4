//! Compute device and batching configuration
//!
//! Providers that wrap a real model need to know where to run and how many
//! texts to push through at once. [`ComputeContext`] carries both; providers
//! that ignore one or the other (the hash embedder ignores the device) simply
//! read what they need.

use serde::{Deserialize, Serialize};

/// Default number of texts embedded per provider call
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Where embedding work runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComputeDevice {
    /// Host CPU; always available
    Cpu,
    /// NVIDIA GPU via the `cuda` feature
    Cuda,
    /// Apple GPU via the `metal` feature
    Metal,
}

impl ComputeDevice {
    /// Short device name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ComputeDevice::Cpu => "cpu",
            ComputeDevice::Cuda => "cuda",
            ComputeDevice::Metal => "metal",
        }
    }
}

/// Device and batch-size settings handed to providers at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeContext {
    /// Device embedding work runs on
    pub device: ComputeDevice,
    /// Number of texts embedded per call
    pub batch_size: usize,
}

impl Default for ComputeContext {
    fn default() -> Self {
        Self {
            device: ComputeDevice::Cpu,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ComputeContext {
    /// Context with the best device the build supports, preferring CUDA,
    /// then Metal, then CPU. Logs the selection once.
    pub fn auto() -> Self {
        let device = select_device();
        tracing::info!(
            target: "lodestone::embed",
            device = device.name(),
            "selected compute device"
        );
        Self {
            device,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the device
    pub fn with_device(mut self, device: ComputeDevice) -> Self {
        self.device = device;
        self
    }

    /// Override the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

fn select_device() -> ComputeDevice {
    if cfg!(feature = "cuda") {
        ComputeDevice::Cuda
    } else if cfg!(feature = "metal") {
        ComputeDevice::Metal
    } else {
        ComputeDevice::Cpu
    }
}
