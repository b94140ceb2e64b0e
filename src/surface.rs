//! Paints the spectrogram into an `0x00RRGGBB` frame buffer.

use image::Rgb;

use crate::colour::to_xrgb;
use crate::history::ColumnRing;

/// Clears `target` to `background`, then draws `image` stretched over the
/// whole `width` x `height` target with nearest-neighbour sampling.
pub fn paint(image: &ColumnRing, target: &mut [u32], width: u32, height: u32, background: Rgb<u8>) {
    let background = to_xrgb(background);
    target.iter_mut().for_each(|p| *p = background);

    let (src_width, src_height) = (image.width() as u64, image.height() as u64);
    if width == 0 || height == 0 || src_width == 0 || src_height == 0 {
        return;
    }

    let row_len = width as usize;
    for x in 0..width {
        let src_x = (x as u64 * src_width / width as u64) as u32;
        let column = image.column(src_x);
        for y in 0..height {
            let src_y = (y as u64 * src_height / height as u64) as usize;
            if let Some(p) = target.get_mut(y as usize * row_len + x as usize) {
                *p = to_xrgb(column[src_y]);
            }
        }
    }
}
