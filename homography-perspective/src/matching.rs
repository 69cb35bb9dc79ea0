use bitarray::{BitArray, Hamming};
use log::*;
use space::{Knn, LinearKnn};

/// A goal feature paired with a scene feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Index into the goal keypoints.
    pub goal: usize,
    /// Index into the scene keypoints.
    pub scene: usize,
    pub distance: f32,
}

/// The smallest and largest distance seen while filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceStats {
    pub min: f32,
    pub max: f32,
}

/// The minimum reported for an empty set of matches.
pub const MIN_DISTANCE_SENTINEL: f32 = f32::MAX;

/// Pair every goal descriptor with the scene descriptor nearest in Hamming distance.
pub fn match_descriptors(goal: &[BitArray<64>], scene: &[BitArray<64>]) -> Vec<Match> {
    let knn_scene = LinearKnn {
        metric: Hamming,
        iter: scene.iter(),
    };
    goal.iter()
        .enumerate()
        .filter_map(|(goal_ix, g)| {
            knn_scene.knn(g, 1).first().map(|nearest| Match {
                goal: goal_ix,
                scene: nearest.index,
                distance: nearest.distance as f32,
            })
        })
        .collect()
}

/// Keep the matches whose distance is strictly below `factor` times the smallest distance.
///
/// Order is preserved. An empty input gives an empty result with a minimum of
/// [`MIN_DISTANCE_SENTINEL`].
pub fn good_matches(matches: &[Match], factor: f32) -> (Vec<Match>, DistanceStats) {
    let stats = matches.iter().fold(
        DistanceStats {
            min: MIN_DISTANCE_SENTINEL,
            max: 0.0,
        },
        |stats, m| DistanceStats {
            min: stats.min.min(m.distance),
            max: stats.max.max(m.distance),
        },
    );
    let threshold = factor * stats.min;
    trace!("Good match threshold {}", threshold);
    let good = matches
        .iter()
        .copied()
        .filter(|m| m.distance < threshold)
        .collect();
    (good, stats)
}
