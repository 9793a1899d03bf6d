use serde::{Deserialize, Serialize};

/// Seed used when `init` does not carry one
pub const DEFAULT_SEED: u64 = 12345;

/// Kernel configuration carried by the `init` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub perf_enabled: bool,
}

impl KernelConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            seed: DEFAULT_SEED,
            perf_enabled: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_perf(mut self, enabled: bool) -> Self {
        self.perf_enabled = enabled;
        self
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}
