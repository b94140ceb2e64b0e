//! Spectrogram image stored as a ring of columns.
//!
//! Pushing a column overwrites the oldest slot and advances `head` instead of
//! shifting the whole image. Logical column 0 is the oldest (left edge), the
//! last logical column is the newest (right edge).

use image::{Rgb, RgbImage};

pub struct ColumnRing {
    width: u32,
    height: u32,
    /// Column-major pixels, `width` slots of `height` pixels each.
    pixels: Vec<Rgb<u8>>,
    /// Physical slot the next column is written to, which is also the oldest column.
    head: usize,
    columns_written: u64,
}

impl ColumnRing {
    /// An all-black image. Both sizes are expected to be non-zero, see
    /// `SpectrogramConfig::validate`.
    pub fn new(width: u32, height: u32) -> Self {
        ColumnRing {
            width,
            height,
            pixels: vec![Rgb([0, 0, 0]); width as usize * height as usize],
            head: 0,
            columns_written: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of columns pushed, including those that have scrolled out.
    pub fn columns_written(&self) -> u64 {
        self.columns_written
    }

    /// Discards the oldest column and hands out the freed slot, which becomes
    /// the newest (rightmost) column. Rows are indexed from the top.
    pub fn next_column(&mut self) -> &mut [Rgb<u8>] {
        let height = self.height as usize;
        let slot = self.head;
        self.head = (self.head + 1) % (self.width as usize).max(1);
        self.columns_written += 1;
        &mut self.pixels[slot * height..(slot + 1) * height]
    }

    /// Column `x` counted from the left edge of the image.
    pub fn column(&self, x: u32) -> &[Rgb<u8>] {
        let height = self.height as usize;
        let slot = (self.head + x as usize) % (self.width as usize).max(1);
        &self.pixels[slot * height..(slot + 1) * height]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        self.column(x)[y as usize]
    }

    /// The image as displayed, oldest column on the left.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| self.pixel(x, y))
    }
}
