use crate::{Features, Match};
use cv_core::nalgebra::Point2;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing;
use itertools::Itertools;
use palette::{FromColor, Hsv, RgbHue, Srgb};

/// Coordinates further out than this are not drawn.
const DRAW_LIMIT: f64 = 1e5;

/// Place `goal` on the left and `scene` on the right of a black canvas.
pub fn side_by_side(goal: &RgbImage, scene: &RgbImage) -> RgbImage {
    let width = goal.width() + scene.width();
    let height = goal.height().max(scene.height());
    let mut canvas = RgbImage::new(width, height);
    let mut render_x_offset = |image: &RgbImage, x_offset: u32| {
        let (width, height) = image.dimensions();
        for (x, y) in (0..width).cartesian_product(0..height) {
            canvas.put_pixel(x + x_offset, y, *image.get_pixel(x, y));
        }
    };
    render_x_offset(goal, 0);
    render_x_offset(scene, goal.width());
    canvas
}

/// Rotate through the most saturated colors, one step per match.
fn match_color(ix: usize) -> Rgb<u8> {
    let hsv = Hsv::new(RgbHue::from_radians(ix as f64 * 0.1), 1.0, 1.0);
    let rgb = Srgb::from_color(hsv);
    Rgb([
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    ])
}

/// Draw the goal and scene side by side with a line and keypoint circles for every match.
pub fn draw_matches(goal: &Features, scene: &Features, matches: &[Match]) -> RgbImage {
    let gray_to_rgb = |features: &Features| DynamicImage::ImageLuma8(features.image.clone()).to_rgb8();
    let mut canvas = side_by_side(&gray_to_rgb(goal), &gray_to_rgb(scene));
    let x_offset = goal.image.width() as f32;

    for (ix, m) in matches.iter().enumerate() {
        let color = match_color(ix);
        let a = goal.key_points[m.goal];
        let b = scene.key_points[m.scene];
        let (ax, ay) = a.point;
        let (bx, by) = (b.point.0 + x_offset, b.point.1);
        drawing::draw_line_segment_mut(&mut canvas, (ax, ay), (bx, by), color);
        for (x, y, size) in [(ax, ay, a.size), (bx, by, b.size)] {
            let radius = (size * 0.5).round().max(1.0) as i32;
            drawing::draw_hollow_circle_mut(&mut canvas, (x as i32, y as i32), radius, color);
        }
    }
    canvas
}

/// Draw the closed quadrilateral through `corners` with lines `thickness` pixels wide.
///
/// Edges with a non-finite or far away end are skipped.
pub fn draw_outline(canvas: &mut RgbImage, corners: &[Point2<f64>; 4], color: Rgb<u8>, thickness: u32) {
    let drawable = |p: &Point2<f64>| p.coords.iter().all(|v| v.is_finite() && v.abs() < DRAW_LIMIT);
    let half = thickness.max(1) as i32 / 2;
    let offsets = (-half..=half).filter(|&d| thickness > 1 || d == 0).collect_vec();
    for (a, b) in corners.iter().circular_tuple_windows() {
        if !drawable(a) || !drawable(b) {
            continue;
        }
        for (&dx, &dy) in offsets.iter().cartesian_product(&offsets) {
            drawing::draw_line_segment_mut(
                canvas,
                (a.x as f32 + dx as f32, a.y as f32 + dy as f32),
                (b.x as f32 + dx as f32, b.y as f32 + dy as f32),
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_by_side_pads_the_shorter_image() {
        let goal = RgbImage::from_pixel(3, 2, Rgb([255, 0, 0]));
        let scene = RgbImage::from_pixel(4, 5, Rgb([0, 0, 255]));
        let canvas = side_by_side(&goal, &scene);
        assert_eq!(canvas.dimensions(), (7, 5));
        assert_eq!(canvas[(2, 1)], Rgb([255, 0, 0]));
        assert_eq!(canvas[(2, 4)], Rgb([0, 0, 0]));
        assert_eq!(canvas[(3, 4)], Rgb([0, 0, 255]));
    }

    #[test]
    fn first_match_is_red() {
        assert_eq!(match_color(0), Rgb([255, 0, 0]));
    }

    #[test]
    fn outline_is_drawn_thick() {
        let mut canvas = RgbImage::new(40, 40);
        let corners = [
            Point2::new(10.0, 10.0),
            Point2::new(30.0, 10.0),
            Point2::new(30.0, 30.0),
            Point2::new(10.0, 30.0),
        ];
        let green = Rgb([0, 255, 0]);
        draw_outline(&mut canvas, &corners, green, 4);
        assert_eq!(canvas[(20, 10)], green);
        assert_eq!(canvas[(20, 12)], green);
        assert_eq!(canvas[(20, 8)], green);
        assert_eq!(canvas[(10, 20)], green);
        assert_eq!(canvas[(20, 20)], Rgb([0, 0, 0]));
    }

    #[test]
    fn non_finite_corners_are_skipped() {
        let mut canvas = RgbImage::new(10, 10);
        let corners = [
            Point2::new(f64::NAN, 0.0),
            Point2::new(f64::INFINITY, 0.0),
            Point2::new(f64::NAN, f64::NAN),
            Point2::new(0.0, f64::NEG_INFINITY),
        ];
        draw_outline(&mut canvas, &corners, Rgb([0, 255, 0]), 4);
        assert!(canvas.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
