use crate::{Error, Result};
use rand::Rng;

/// A training point as `[x, y]` in image coordinates.
pub type Sample = [f32; 2];

pub const FIRST_LABEL: f32 = 1.0;
pub const SECOND_LABEL: f32 = 2.0;

/// Scatter `count` points over a `width` by `height` image.
///
/// The x axis is split into three bands: the first 40% of the points fall in `[0, 0.4w)`, the
/// last 40% in `[0.6w, w)` and the 20% in between in `[0.4w, 0.6w)`. The y coordinate is
/// uniform over the whole height. With the labels from [`label_data`] the outer bands are
/// separable and the middle band is mixed.
pub fn make_data<R: Rng>(count: usize, width: u32, height: u32, rng: &mut R) -> Result<Vec<Sample>> {
    if count == 0 || width == 0 || height == 0 {
        return Err(Error::InvalidDataShape {
            count,
            width,
            height,
        });
    }
    let separable = (0.4 * count as f64) as usize;
    let (w, h) = (width as f32, height as f32);
    let band = |ix: usize| {
        if ix < separable {
            (0.0, 0.4 * w)
        } else if ix < count - separable {
            (0.4 * w, 0.6 * w)
        } else {
            (0.6 * w, w)
        }
    };
    let mut data: Vec<Sample> = (0..count)
        .map(|ix| {
            let (lo, hi) = band(ix);
            [rng.gen_range(lo..hi), 0.0]
        })
        .collect();
    for sample in &mut data {
        sample[1] = rng.gen_range(0.0..h);
    }
    Ok(data)
}

/// Label the first half of `count` points [`FIRST_LABEL`] and the rest [`SECOND_LABEL`].
pub fn label_data(count: usize) -> Vec<f32> {
    (0..count)
        .map(|ix| if ix < count / 2 { FIRST_LABEL } else { SECOND_LABEL })
        .collect()
}
