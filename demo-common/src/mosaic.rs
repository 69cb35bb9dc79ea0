use crate::{Error, Result};
use image::{DynamicImage, GenericImage, GenericImageView, RgbImage};
use log::*;

/// One titled image in a [`Mosaic`].
#[derive(Debug, Clone)]
pub struct Pane {
    pub title: String,
    pub image: RgbImage,
}

/// Tiles panes left to right, `across` per row, into a single canvas.
///
/// Each pane occupies a cell as large as the largest pane. Rows are separated by `gap` pixels,
/// which is where a window manager would put title bars.
#[derive(Debug, Clone)]
pub struct Mosaic {
    across: u32,
    gap: u32,
    panes: Vec<Pane>,
}

impl Mosaic {
    pub fn new(across: u32) -> Self {
        Self {
            across: across.max(1),
            gap: 50,
            panes: vec![],
        }
    }

    pub fn with_gap(self, gap: u32) -> Self {
        Self { gap, ..self }
    }

    pub fn push(&mut self, title: impl Into<String>, image: &DynamicImage) {
        let title = title.into();
        debug!(
            "Pane {} \"{}\" ({}x{})",
            self.panes.len(),
            title,
            image.width(),
            image.height()
        );
        self.panes.push(Pane {
            title,
            image: image.to_rgb8(),
        });
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    fn cell(&self) -> (u32, u32) {
        self.panes.iter().fold((0, 0), |(w, h), pane| {
            (w.max(pane.image.width()), h.max(pane.image.height()))
        })
    }

    /// The top-left corner of pane `ix` on the canvas.
    pub fn position(&self, ix: usize) -> (u32, u32) {
        let (width, height) = self.cell();
        let ix = ix as u32;
        (
            (ix % self.across) * width,
            (ix / self.across) * (height + self.gap),
        )
    }

    /// One line per pane naming where it sits on the canvas, in push order.
    pub fn legend(&self) -> Vec<String> {
        self.panes
            .iter()
            .enumerate()
            .map(|(ix, pane)| {
                let (x, y) = self.position(ix);
                let (w, h) = pane.image.dimensions();
                format!("{}: {}x{} at ({}, {})", pane.title, w, h, x, y)
            })
            .collect()
    }

    /// Draw all panes onto a black canvas.
    pub fn render(&self) -> Result<RgbImage> {
        if self.panes.is_empty() {
            return Err(Error::EmptyMosaic);
        }
        let (width, height) = self.cell();
        let count = self.panes.len() as u32;
        let columns = count.min(self.across);
        let rows = (count + self.across - 1) / self.across;
        let mut canvas = RgbImage::new(columns * width, rows * height + (rows - 1) * self.gap);
        for (ix, pane) in self.panes.iter().enumerate() {
            let (x, y) = self.position(ix);
            canvas.copy_from(&pane.image, x, y)?;
        }
        Ok(canvas)
    }
}
