// recorder.rs - Generations captured as frames, written out as one animated GIF

use std::fs;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops;
use image::{Delay, Frame, Rgba, RgbaImage};
use tracing::info;

use crate::error::RecordError;
use crate::grid::Grid;

/// Pixels per cell side in recorded frames.
pub const CELL_PIXELS: u32 = 4;

const LIVE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DEAD: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Frames are kept as plain rasters until `flush`, since the grid shape can
/// change mid-recording and the GIF canvas is sized from the first frame.
#[derive(Default)]
pub struct FrameRecorder {
    frames: Vec<(RgbaImage, Delay)>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Appends the current state of `grid` as a frame shown for `delay_ms`.
    pub fn capture(&mut self, grid: &Grid, delay_ms: u64) {
        let (w, h) = (grid.width() as u32 * CELL_PIXELS, grid.height() as u32 * CELL_PIXELS);
        let raster = RgbaImage::from_fn(w, h, |x, y| {
            if grid.get((y / CELL_PIXELS) as usize, (x / CELL_PIXELS) as usize) { LIVE } else { DEAD }
        });
        let delay = Delay::from_numer_denom_ms(u32::try_from(delay_ms).unwrap_or(u32::MAX), 1);
        self.frames.push((raster, delay));
    }

    /// Writes every captured frame, in order, to `path` and clears the buffer.
    /// Frames smaller than the largest one are padded with dead pixels on the
    /// right and bottom. Does nothing and returns `Ok(0)` when nothing was
    /// captured.
    pub fn flush(&mut self, path: impl AsRef<Path>) -> Result<usize, RecordError> {
        if self.frames.is_empty() {
            return Ok(0);
        }
        let path = path.as_ref();
        let frames = padded(std::mem::take(&mut self.frames));
        let count = frames.len();

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            encoder.set_repeat(Repeat::Infinite)?;
            encoder.encode_frames(frames)?;
        }
        fs::write(path, &bytes)
            .map_err(|source| RecordError::Io { path: path.to_path_buf(), source })?;

        info!(path = %path.display(), frames = count, bytes = bytes.len(), "wrote recording");
        Ok(count)
    }
}

fn padded(rasters: Vec<(RgbaImage, Delay)>) -> Vec<Frame> {
    let width = rasters.iter().map(|(raster, _)| raster.width()).max().unwrap_or(0);
    let height = rasters.iter().map(|(raster, _)| raster.height()).max().unwrap_or(0);
    rasters
        .into_iter()
        .map(|(raster, delay)| {
            let raster = if raster.dimensions() == (width, height) {
                raster
            } else {
                let mut canvas = RgbaImage::from_pixel(width, height, DEAD);
                imageops::replace(&mut canvas, &raster, 0, 0);
                canvas
            };
            Frame::from_parts(raster, 0, 0, delay)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn empty_recorder_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.gif");
        assert_eq!(FrameRecorder::new().flush(&path).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn flush_writes_all_frames_in_order_and_clears() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.gif");
        let mut recorder = FrameRecorder::new();
        let first = Grid::from_rows(&["O..", "...", "..."]).unwrap();
        let second = Grid::from_rows(&["...", "...", "..O"]).unwrap();
        recorder.capture(&first, 100);
        recorder.capture(&second, 100);
        assert_eq!(recorder.len(), 2);

        assert_eq!(recorder.flush(&path).unwrap(), 2);
        assert!(recorder.is_empty());

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
        let frames = GifDecoder::new(Cursor::new(bytes)).unwrap().into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 2);
        let first_frame = frames[0].buffer();
        assert_eq!(first_frame.dimensions(), (3 * CELL_PIXELS, 3 * CELL_PIXELS));
        assert_eq!(first_frame.get_pixel(0, 0)[0], 255);
        assert_eq!(frames[1].buffer().get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn frames_of_a_later_larger_grid_are_not_cropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.gif");
        let mut recorder = FrameRecorder::new();
        let small = Grid::from_rows(&["O..", "...", "..."]).unwrap();
        let mut large = Grid::new(10, 12).unwrap();
        large.set(9, 11, true).unwrap();
        recorder.capture(&small, 100);
        recorder.capture(&large, 100);
        assert_eq!(recorder.flush(&path).unwrap(), 2);

        let bytes = fs::read(&path).unwrap();
        let frames = GifDecoder::new(Cursor::new(bytes)).unwrap().into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 2);
        for frame in &frames {
            assert_eq!(frame.buffer().dimensions(), (12 * CELL_PIXELS, 10 * CELL_PIXELS));
        }
        let first = frames[0].buffer();
        assert_eq!(first.get_pixel(1, 1)[0], 255);
        assert_eq!(first.get_pixel(45, 37)[0], 0);
        let second = frames[1].buffer();
        assert_eq!(second.get_pixel(11 * CELL_PIXELS + 1, 9 * CELL_PIXELS + 1)[0], 255);
        assert_eq!(second.get_pixel(1, 1)[0], 0);
    }
}
