use crate::{Kernel, SvmParams};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    Linear,
    Rbf,
}

impl FromStr for KernelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(KernelKind::Linear),
            "rbf" => Ok(KernelKind::Rbf),
            other => Err(format!("unknown kernel {:?}, expected linear or rbf", other)),
        }
    }
}

/// What to generate, how to train and how big to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_kernel")]
    pub kernel: KernelKind,
    /// Only used by the RBF kernel.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_c")]
    pub c: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_count() -> usize {
    200
}

fn default_size() -> u32 {
    512
}

fn default_seed() -> u64 {
    666
}

fn default_kernel() -> KernelKind {
    KernelKind::Linear
}

fn default_gamma() -> f64 {
    1e-4
}

fn default_c() -> f64 {
    0.1
}

fn default_epsilon() -> f64 {
    1e-3
}

fn default_max_iterations() -> usize {
    10_000_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            count: default_count(),
            width: default_size(),
            height: default_size(),
            seed: default_seed(),
            kernel: default_kernel(),
            gamma: default_gamma(),
            c: default_c(),
            epsilon: default_epsilon(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Settings {
    pub fn svm_params(&self) -> SvmParams {
        let kernel = match self.kernel {
            KernelKind::Linear => Kernel::Linear,
            KernelKind::Rbf => Kernel::Rbf { gamma: self.gamma },
        };
        SvmParams {
            kernel,
            c: self.c,
            epsilon: self.epsilon,
            max_iterations: self.max_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_names() {
        assert_eq!("linear".parse::<KernelKind>(), Ok(KernelKind::Linear));
        assert_eq!("RBF".parse::<KernelKind>(), Ok(KernelKind::Rbf));
        assert!("poly".parse::<KernelKind>().is_err());
    }

    #[test]
    fn defaults_match_the_classic_demo() {
        let params = Settings::default().svm_params();
        assert_eq!(params, SvmParams::default());
    }

    #[test]
    fn rbf_carries_gamma() {
        let settings = Settings {
            kernel: KernelKind::Rbf,
            gamma: 0.25,
            ..Default::default()
        };
        assert_eq!(settings.svm_params().kernel, Kernel::Rbf { gamma: 0.25 });
    }
}
