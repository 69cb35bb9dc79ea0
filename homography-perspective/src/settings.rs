use serde::{Deserialize, Serialize};

/// The tunables of the object location pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The detector response threshold used by AKAZE.
    #[serde(default = "default_akaze_threshold")]
    pub akaze_threshold: f64,
    /// Matches must be closer than this multiple of the smallest match distance.
    #[serde(default = "default_distance_factor")]
    pub distance_factor: f32,
    /// The reprojection error in pixels below which a match is a consensus inlier.
    #[serde(default = "default_consensus_threshold")]
    pub consensus_threshold: f64,
    /// Seed for the consensus sampler.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// The width of the outline drawn around the located object.
    #[serde(default = "default_outline_thickness")]
    pub outline_thickness: u32,
}

fn default_akaze_threshold() -> f64 {
    0.001
}

fn default_distance_factor() -> f32 {
    3.0
}

fn default_consensus_threshold() -> f64 {
    3.0
}

fn default_seed() -> u64 {
    0
}

fn default_outline_thickness() -> u32 {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            akaze_threshold: default_akaze_threshold(),
            distance_factor: default_distance_factor(),
            consensus_threshold: default_consensus_threshold(),
            seed: default_seed(),
            outline_thickness: default_outline_thickness(),
        }
    }
}
