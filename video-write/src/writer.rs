use crate::{Error, Result};
use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame, RgbaImage,
};
use log::*;
use std::{
    cell::Cell,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

/// Color quantization speed, from 1 (best) to 30 (fastest).
const QUANTIZE_SPEED: i32 = 10;

/// The output file, keeping the first error any write or flush hit.
///
/// The encoder writes the GIF trailer and the buffer is flushed when they are dropped, where
/// errors cannot be returned.
struct RecordingFile {
    file: File,
    error: Rc<Cell<Option<io::Error>>>,
}

impl RecordingFile {
    fn record<T>(&self, result: io::Result<T>) -> io::Result<T> {
        if let Err(e) = &result {
            let first = self
                .error
                .take()
                .unwrap_or_else(|| io::Error::new(e.kind(), e.to_string()));
            self.error.set(Some(first));
        }
        result
    }
}

impl Write for RecordingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let result = self.file.write(buf);
        self.record(result)
    }

    fn flush(&mut self) -> io::Result<()> {
        let result = self.file.flush();
        self.record(result)
    }
}

/// Writes frames of one size to a looping animated GIF.
pub struct VideoWriter {
    path: PathBuf,
    encoder: GifEncoder<BufWriter<RecordingFile>>,
    error: Rc<Cell<Option<io::Error>>>,
    size: (u32, u32),
    delay: Delay,
    frames_written: usize,
}

impl std::fmt::Debug for VideoWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoWriter")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("delay", &self.delay)
            .field("frames_written", &self.frames_written)
            .finish()
    }
}

impl VideoWriter {
    /// Create `path` for frames of `size` shown `delay` apart.
    pub fn create(path: impl AsRef<Path>, size: (u32, u32), delay: Delay) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let file = File::create(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        let error = Rc::new(Cell::new(None));
        let file = RecordingFile {
            file,
            error: error.clone(),
        };
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), QUANTIZE_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|source| Error::Encode {
                path: path.clone(),
                source,
            })?;
        debug!("Writing {} ({}x{})", path.display(), size.0, size.1);
        Ok(Self {
            path,
            encoder,
            error,
            size,
            delay,
            frames_written: 0,
        })
    }

    /// Append `image` with the writer's frame delay.
    pub fn write(&mut self, image: RgbaImage) -> Result<()> {
        let delay = self.delay;
        self.write_frame(Frame::from_parts(image, 0, 0, delay))
    }

    /// Append a frame, keeping its own delay.
    pub fn write_frame(&mut self, frame: Frame) -> Result<()> {
        let found = frame.buffer().dimensions();
        if found != self.size {
            return Err(Error::FrameSize {
                expected: self.size,
                found,
            });
        }
        self.encoder
            .encode_frame(frame)
            .map_err(|source| Error::Encode {
                path: self.path.clone(),
                source,
            })?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Write the trailer and flush the file, returning how many frames were written.
    pub fn finish(self) -> Result<usize> {
        let Self {
            path,
            encoder,
            error,
            frames_written,
            ..
        } = self;
        drop(encoder);
        if let Some(source) = error.take() {
            return Err(Error::Close { path, source });
        }
        debug!("Wrote {} frames to {}", frames_written, path.display());
        Ok(frames_written)
    }
}
