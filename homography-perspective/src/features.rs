use akaze::{Akaze, KeyPoint};
use bitarray::BitArray;
use cv_core::{nalgebra::Point2, ImagePoint};
use image::{DynamicImage, GrayImage};
use log::*;

/// The keypoints and descriptors found in a goal or scene image.
#[derive(Debug, Clone)]
pub struct Features {
    pub image: GrayImage,
    pub key_points: Vec<KeyPoint>,
    pub descriptors: Vec<BitArray<64>>,
}

impl Features {
    pub fn new(image: GrayImage, key_points: Vec<KeyPoint>, descriptors: Vec<BitArray<64>>) -> Self {
        Self {
            image,
            key_points,
            descriptors,
        }
    }

    /// Run AKAZE on the grayscale version of `image`.
    pub fn extract(image: &DynamicImage, akaze: &Akaze) -> Self {
        let gray = image.to_luma8();
        let (key_points, descriptors) = akaze.extract(&DynamicImage::ImageLuma8(gray.clone()));
        debug!(
            "{} keypoints in a {}x{} image",
            key_points.len(),
            gray.width(),
            gray.height()
        );
        Self::new(gray, key_points, descriptors)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The image location of keypoint `ix`.
    pub fn location(&self, ix: usize) -> Point2<f64> {
        self.key_points[ix].image_point()
    }
}
