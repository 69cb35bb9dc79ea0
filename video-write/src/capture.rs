use crate::{Error, Result, CODEC};
use image::{
    codecs::gif::GifDecoder, AnimationDecoder, Delay, Frame, Frames, ImageDecoder,
};
use log::*;
use std::{fmt, fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

/// Frame delay assumed when a GIF does not set one.
const DEFAULT_DELAY_MS: u32 = 100;

/// Reads the frames of an animated GIF one at a time.
pub struct VideoCapture {
    path: PathBuf,
    frames: Frames<'static>,
    /// The first frame, decoded early to learn the frame rate.
    pending: Option<Frame>,
    size: (u32, u32),
    delay: Delay,
    frames_read: usize,
}

impl fmt::Debug for VideoCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoCapture")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("delay", &self.delay)
            .field("frames_read", &self.frames_read)
            .finish()
    }
}

impl VideoCapture {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let file = File::open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        let decode_error = |source| Error::Decode {
            path: path.clone(),
            source,
        };
        let decoder = GifDecoder::new(BufReader::new(file)).map_err(decode_error)?;
        let size = decoder.dimensions();
        let mut frames = decoder.into_frames();
        let first = match frames.next() {
            Some(frame) => frame.map_err(decode_error)?,
            None => return Err(Error::NoFrames(path)),
        };
        let delay = match first.delay().numer_denom_ms() {
            (0, _) => Delay::from_saturating_duration(Duration::from_millis(DEFAULT_DELAY_MS.into())),
            _ => first.delay(),
        };
        info!("Opened {} ({}x{})", path.display(), size.0, size.1);
        Ok(Self {
            path,
            frames,
            pending: Some(first),
            size,
            delay,
            frames_read: 0,
        })
    }

    /// Width and height of every frame.
    pub fn frame_size(&self) -> (u32, u32) {
        self.size
    }

    /// The delay between frames, taken from the first frame.
    pub fn frame_delay(&self) -> Delay {
        self.delay
    }

    pub fn frames_per_second(&self) -> f64 {
        let (numer, denom) = self.delay.numer_denom_ms();
        1000.0 * denom as f64 / numer as f64
    }

    pub fn codec(&self) -> &'static str {
        CODEC
    }

    /// How many frames [`read`](Self::read) has returned so far.
    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    /// The next frame, or `None` at the end of the video.
    pub fn read(&mut self) -> Result<Option<Frame>> {
        let next = match self.pending.take() {
            Some(frame) => Some(frame),
            None => self.frames.next().transpose().map_err(|source| Error::Decode {
                path: self.path.clone(),
                source,
            })?,
        };
        if next.is_some() {
            self.frames_read += 1;
        } else {
            trace!("End of {}", self.path.display());
        }
        Ok(next)
    }
}
