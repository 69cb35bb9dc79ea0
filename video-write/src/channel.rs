use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// The index of this channel in an RGBA pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }
}

/// Keep `channel` and alpha, zero the other color channels.
pub fn split_channel(frame: &RgbaImage, channel: Channel) -> RgbaImage {
    let keep = channel.index();
    let mut out = frame.clone();
    for pixel in out.pixels_mut() {
        for (ix, value) in pixel.0.iter_mut().take(3).enumerate() {
            if ix != keep {
                *value = 0;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn keeps_exactly_one_channel() {
        let frame = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 200]));
        assert_eq!(split_channel(&frame, Channel::Red)[(1, 1)], Rgba([10, 0, 0, 200]));
        assert_eq!(split_channel(&frame, Channel::Green)[(0, 0)], Rgba([0, 20, 0, 200]));
        assert_eq!(split_channel(&frame, Channel::Blue)[(2, 1)], Rgba([0, 0, 30, 200]));
    }

    #[test]
    fn channels_sum_to_the_frame() {
        let frame = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 50, y as u8 * 60, 7, 255]));
        let parts = Channel::ALL.map(|c| split_channel(&frame, c));
        for (x, y, pixel) in frame.enumerate_pixels() {
            for c in 0..3 {
                let sum: u8 = parts.iter().map(|p| p[(x, y)].0[c]).sum();
                assert_eq!(sum, pixel.0[c]);
            }
        }
    }
}
