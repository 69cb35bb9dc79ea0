//! Locate a goal object in a scene image.
//!
//! The pipeline is:
//!
//! 1. [`Features::extract`] runs AKAZE on both grayscale images.
//! 2. [`match_descriptors`] pairs every goal descriptor with its nearest scene descriptor.
//! 3. [`good_matches`] keeps matches closer than a multiple of the best match distance.
//! 4. [`find_homography`] fits a [`Homography`] to the good matches with ARRSAC.
//! 5. [`find_corners`] maps the goal image rectangle into the scene.
//!
//! [`locate`] runs steps 2 to 5 and [`render`] draws the result side by side.

mod corners;
mod draw;
mod features;
mod homography;
mod matching;
mod settings;

pub use corners::find_corners;
pub use draw::{draw_matches, draw_outline, side_by_side};
pub use features::Features;
pub use homography::{find_homography, Homography, HomographyEstimator, PointMatch};
pub use matching::{good_matches, match_descriptors, DistanceStats, Match, MIN_DISTANCE_SENTINEL};
pub use settings::Settings;

use cv_core::nalgebra::{Point2, Vector2};
use image::{Rgb, RgbImage};
use log::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("need at least 4 good matches to find a homography, got {0}")]
    TooFewMatches(usize),
    #[error("no homography is consistent with the good matches")]
    HomographyNotFound,
    #[error(transparent)]
    Common(#[from] demo_common::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where the goal was found in the scene, and the evidence for it.
#[derive(Debug, Clone)]
pub struct Location {
    pub matches: Vec<Match>,
    pub good: Vec<Match>,
    pub stats: DistanceStats,
    pub homography: Homography,
    /// Indices into `good` of the matches that agree with `homography`.
    pub inliers: Vec<usize>,
    /// Goal corners in the side-by-side rendering: top-left, top-right, bottom-right,
    /// bottom-left.
    pub corners: [Point2<f64>; 4],
}

/// Match, filter, fit and map corners.
pub fn locate(goal: &Features, scene: &Features, settings: &Settings) -> Result<Location> {
    let matches = match_descriptors(&goal.descriptors, &scene.descriptors);
    info!("Found {} matches", matches.len());
    let (good, stats) = good_matches(&matches, settings.distance_factor);
    info!(
        "Kept {} good matches (distance {} to {})",
        good.len(),
        stats.min,
        stats.max
    );
    let point_matches: Vec<PointMatch> = good
        .iter()
        .map(|m| PointMatch::new(goal.location(m.goal), scene.location(m.scene)))
        .collect();
    let (homography, inliers) = find_homography(&point_matches, settings)?;
    let (width, height) = goal.dimensions();
    // The scene is drawn to the right of the goal.
    let offset = Vector2::new(width as f64, 0.0);
    let corners = find_corners(width, height, &homography, offset);
    if corners.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        warn!("Degenerate homography maps corners to {:?}", corners);
    }
    Ok(Location {
        matches,
        good,
        stats,
        homography,
        inliers,
        corners,
    })
}

/// Draw the good matches and outline the located goal in green.
pub fn render(goal: &Features, scene: &Features, location: &Location, settings: &Settings) -> RgbImage {
    let mut canvas = draw_matches(goal, scene, &location.good);
    draw_outline(
        &mut canvas,
        &location.corners,
        Rgb([0, 255, 0]),
        settings.outline_thickness,
    );
    canvas
}
