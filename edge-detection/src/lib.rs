//! Sobel, Scharr and Laplacian edge operators built on `imageproc` filters.
//!
//! All operators take a blurred grayscale image (see [`blur_gray`]) and produce an 8-bit
//! magnitude image: derivatives are computed as `i16`, converted to absolute values saturated
//! to `u8` ([`convert_scale_abs`]), and the x/y parts are averaged ([`add_weighted`]).

use demo_common::Mosaic;
use image::{imageops, DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::{definitions::Image, filter, gradients};
use log::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("kernel size must be odd and positive, got {0}")]
    InvalidKernelSize(u32),
    #[error(transparent)]
    Common(#[from] demo_common::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Horizontal Scharr aperture.
pub const SCHARR_X: [i32; 9] = [-3, 0, 3, -10, 0, 10, -3, 0, 3];
/// Vertical Scharr aperture.
pub const SCHARR_Y: [i32; 9] = [-3, -10, -3, 0, 0, 0, 3, 10, 3];
/// The 3x3 Laplacian aperture.
pub const LAPLACIAN_3X3: [i32; 9] = [2, 0, 2, 0, -8, 0, 2, 0, 2];

/// Gaussian sigma for a `kernel_size` aperture when no sigma is given.
pub fn gaussian_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// The intermediate images shown before any edge operator runs.
#[derive(Debug, Clone)]
pub struct BlurGray {
    pub blurred: RgbImage,
    pub gray: GrayImage,
}

/// Normalized `kernel_size`-tap Gaussian with the sigma from [`gaussian_sigma`].
pub fn gaussian_kernel(kernel_size: u32) -> Vec<f32> {
    let sigma = gaussian_sigma(kernel_size);
    let half = (kernel_size / 2) as i32;
    let taps: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    taps.into_iter().map(|t| t / sum).collect()
}

/// Blur `image` with a `kernel_size` x `kernel_size` Gaussian and convert the result to grayscale.
///
/// The filter runs on `f32` channels and rounds once at the end, so flat regions keep their value.
pub fn blur_gray(image: &RgbImage, kernel_size: u32) -> Result<BlurGray> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(Error::InvalidKernelSize(kernel_size));
    }
    let kernel = gaussian_kernel(kernel_size);
    debug!("Gaussian blur with kernel {:?}", kernel);
    let (width, height) = image.dimensions();
    let float: Image<Rgb<f32>> = ImageBuffer::from_fn(width, height, |x, y| {
        let Rgb(c) = *image.get_pixel(x, y);
        Rgb(c.map(f32::from))
    });
    let smoothed = filter::separable_filter_equal(&float, &kernel);
    let blurred: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
        let Rgb(c) = *smoothed.get_pixel(x, y);
        Rgb(c.map(|v| v.round().clamp(0.0, 255.0) as u8))
    });
    let gray = imageops::grayscale(&blurred);
    Ok(BlurGray { blurred, gray })
}

/// Absolute value of every pixel, saturated to `u8`.
pub fn convert_scale_abs(image: &Image<Luma<i16>>) -> GrayImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let v = i32::from(image.get_pixel(x, y)[0]).abs();
        Luma([v.min(255) as u8])
    })
}

/// `a * alpha + b * beta + gamma` per pixel, rounded and saturated.
///
/// # Panics
///
/// If the images are not the same size.
pub fn add_weighted(a: &GrayImage, alpha: f32, b: &GrayImage, beta: f32, gamma: f32) -> GrayImage {
    assert_eq!(a.dimensions(), b.dimensions(), "image sizes differ");
    ImageBuffer::from_fn(a.width(), a.height(), |x, y| {
        let v = f32::from(a.get_pixel(x, y)[0]) * alpha
            + f32::from(b.get_pixel(x, y)[0]) * beta
            + gamma;
        Luma([v.round().clamp(0.0, 255.0) as u8])
    })
}

fn combine(gx: &Image<Luma<i16>>, gy: &Image<Luma<i16>>) -> GrayImage {
    add_weighted(&convert_scale_abs(gx), 0.5, &convert_scale_abs(gy), 0.5, 0.0)
}

pub fn sobel(gray: &GrayImage) -> GrayImage {
    combine(
        &gradients::horizontal_sobel(gray),
        &gradients::vertical_sobel(gray),
    )
}

pub fn scharr(gray: &GrayImage) -> GrayImage {
    combine(
        &gradients::horizontal_scharr(gray),
        &gradients::vertical_scharr(gray),
    )
}

/// Sobel with a Scharr aperture, built from the explicit kernels rather than the Scharr
/// gradient functions. Equal to [`scharr`].
pub fn sobel_scharr(gray: &GrayImage) -> GrayImage {
    combine(
        &filter::filter3x3::<_, i32, i16>(gray, &SCHARR_X),
        &filter::filter3x3::<_, i32, i16>(gray, &SCHARR_Y),
    )
}

pub fn laplacian(gray: &GrayImage) -> GrayImage {
    convert_scale_abs(&filter::filter3x3::<_, i32, i16>(gray, &LAPLACIAN_3X3))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOperator {
    Sobel,
    Scharr,
    SobelScharr,
    Laplacian,
}

impl EdgeOperator {
    pub fn title(self) -> &'static str {
        match self {
            EdgeOperator::Sobel => "Sobel Derivative",
            EdgeOperator::Scharr => "Scharr Derivative",
            EdgeOperator::SobelScharr => "Sobel (Scharr aperture) Derivative",
            EdgeOperator::Laplacian => "Laplacian",
        }
    }

    pub fn apply(self, gray: &GrayImage) -> GrayImage {
        match self {
            EdgeOperator::Sobel => sobel(gray),
            EdgeOperator::Scharr => scharr(gray),
            EdgeOperator::SobelScharr => sobel_scharr(gray),
            EdgeOperator::Laplacian => laplacian(gray),
        }
    }
}

/// Build the mosaic of the original, blurred and grayscale images followed by one pane per
/// operator.
pub fn edge_mosaic(
    image: &DynamicImage,
    kernel_size: u32,
    operators: &[EdgeOperator],
    across: u32,
) -> Result<Mosaic> {
    let original = image.to_rgb8();
    let BlurGray { blurred, gray } = blur_gray(&original, kernel_size)?;
    let mut mosaic = Mosaic::new(across);
    mosaic.push("Original", &DynamicImage::ImageRgb8(original));
    mosaic.push("Original Blur", &DynamicImage::ImageRgb8(blurred));
    mosaic.push(
        "Original Blurred Grayscale",
        &DynamicImage::ImageLuma8(gray.clone()),
    );
    for &operator in operators {
        info!("Applying {}", operator.title());
        let edges = operator.apply(&gray);
        mosaic.push(operator.title(), &DynamicImage::ImageLuma8(edges));
    }
    Ok(mosaic)
}
