use crate::{Error, Mosaic, Result};
use image::{DynamicImage, GenericImageView};
use log::*;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

/// The display flags every rendering program accepts.
#[derive(Debug, Clone, Default, StructOpt)]
pub struct DisplayArgs {
    /// Write the rendered image to this path (the format follows the extension).
    #[structopt(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,
    /// Do not open the rendered image in the system viewer.
    #[structopt(long)]
    pub no_show: bool,
}

impl DisplayArgs {
    pub fn present(&self, image: &DynamicImage) -> Result<Option<PathBuf>> {
        present(image, self.output.as_deref(), !self.no_show)
    }

    /// Render `mosaic`, print which pane sits where, and present the canvas.
    pub fn present_mosaic(&self, mosaic: &Mosaic) -> Result<Option<PathBuf>> {
        let canvas = DynamicImage::ImageRgb8(mosaic.render()?);
        for line in mosaic.legend() {
            println!("{}", line);
        }
        self.present(&canvas)
    }
}

/// Open an image file, keeping the path in the error.
pub fn open_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| Error::OpenImage {
        path: path.to_owned(),
        source,
    })?;
    debug!(
        "Opened {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Save an image, picking the format from the extension of `path`.
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|source| Error::SaveImage {
        path: path.to_owned(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Write `image` to `output` if given and open it in the system viewer if `show` is set.
///
/// Without an `output`, showing goes through a kept temporary PNG file. Returns the path the
/// image ended up at, if it was written anywhere.
pub fn present(image: &DynamicImage, output: Option<&Path>, show: bool) -> Result<Option<PathBuf>> {
    let path = match output {
        Some(path) => {
            save_image(image, path)?;
            Some(path.to_owned())
        }
        None if show => {
            let path = tempfile::Builder::new()
                .prefix("demo-")
                .suffix(".png")
                .tempfile()?
                .into_temp_path()
                .keep()
                .map_err(|e| Error::Io(e.error))?;
            save_image(image, &path)?;
            Some(path)
        }
        None => None,
    };
    if show {
        if let Some(path) = &path {
            info!("Opening {} in the system viewer", path.display());
            open::that(path)?;
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn present_writes_output_without_showing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([1, 2, 3])));
        let written = present(&image, Some(&path), false).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));
        let back = open_image(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (4, 3));
        assert_eq!(back.get_pixel(2, 1), &Rgb([1, 2, 3]));
    }

    #[test]
    fn present_without_output_or_show_does_nothing() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(1, 1));
        assert_eq!(present(&image, None, false).unwrap(), None);
    }

    #[test]
    fn open_missing_image_reports_path() {
        let err = open_image("/nonexistent/missing.png").unwrap_err();
        assert!(matches!(err, Error::OpenImage { .. }));
        assert!(err.to_string().contains("missing.png"));
    }
}
