use crate::Homography;
use cv_core::nalgebra::{Point2, Vector2};

/// Map the corners of a `width` by `height` goal image through `homography`, then shift them by
/// `offset`.
///
/// The corners come back as top-left, top-right, bottom-right, bottom-left. A degenerate
/// homography can send corners to infinity, which shows up as non-finite coordinates.
pub fn find_corners(
    width: u32,
    height: u32,
    homography: &Homography,
    offset: Vector2<f64>,
) -> [Point2<f64>; 4] {
    let (w, h) = (width as f64, height as f64);
    [
        Point2::new(0.0, 0.0),
        Point2::new(w, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ]
    .map(|corner| homography.project(corner) + offset)
}
