use crate::{Sample, Svm, FIRST_LABEL};
use image::{Rgb, RgbImage};
use imageproc::drawing;

const REGION_FIRST: Rgb<u8> = Rgb([0, 100, 0]);
const REGION_SECOND: Rgb<u8> = Rgb([0, 0, 100]);
const DATA_FIRST: Rgb<u8> = Rgb([0, 255, 0]);
const DATA_SECOND: Rgb<u8> = Rgb([0, 0, 255]);
const SUPPORT_VECTOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Color every pixel by the class `svm` predicts for it: dark green for the first label, dark
/// blue for the second.
pub fn draw_regions(image: &mut RgbImage, svm: &Svm) {
    let first = svm.labels()[0];
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let label = svm.predict(&[x as f32, y as f32]);
        *pixel = if label == first {
            REGION_FIRST
        } else {
            REGION_SECOND
        };
    }
}

/// Draw the training data as filled circles of radius 3, green for the first label and blue for
/// the second.
pub fn draw_data(image: &mut RgbImage, data: &[Sample], labels: &[f32]) {
    for (&[x, y], &label) in data.iter().zip(labels) {
        let color = if label == FIRST_LABEL {
            DATA_FIRST
        } else {
            DATA_SECOND
        };
        drawing::draw_filled_circle_mut(image, (x as i32, y as i32), 3, color);
    }
}

/// Circle the support vectors in red, radius 6 and two pixels thick.
pub fn draw_support_vectors(image: &mut RgbImage, svm: &Svm) {
    for &[x, y] in svm.support_vectors() {
        for radius in 5..=6 {
            drawing::draw_hollow_circle_mut(image, (x as i32, y as i32), radius, SUPPORT_VECTOR);
        }
    }
}

/// Regions, then data, then support vectors on a `width` by `height` canvas.
pub fn render(width: u32, height: u32, svm: &Svm, data: &[Sample], labels: &[f32]) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    draw_regions(&mut image, svm);
    draw_data(&mut image, data, labels);
    draw_support_vectors(&mut image, svm);
    image
}
