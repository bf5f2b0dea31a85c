/// Pixel-grid visualization: stacks rows of normalized values into an RGB
/// image file.
///
/// Each pushed row is normalized against a `[min, max]` range into `0..=255`
/// and tinted with a [`Channel`]; `save` writes the stacked rows out via the
/// `image` crate. Useful for eyeballing weight matrices or code activity over
/// time, one row per step.
use std::path::Path;

use crate::{AnnkitError, Result};

/// Color channel a row is rendered into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Grey,
    Red,
    Green,
    Blue,
}

impl Channel {
    fn rgb(self, v: u8) -> [u8; 3] {
        match self {
            Channel::Grey => [v, v, v],
            Channel::Red => [v, 0, 0],
            Channel::Green => [0, v, 0],
            Channel::Blue => [0, 0, v],
        }
    }
}

/// Row-stacked RGB image builder.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    min: f64,
    max: f64,
    width: Option<usize>,
    // Flat RGB8, rows appended top to bottom.
    data: Vec<u8>,
    rows: usize,
}

impl PixelGrid {
    /// `min` and `max` set the default normalization range for pushed rows.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(max > min) {
            return Err(AnnkitError::InvalidConfig(format!(
                "normalization range [{min}, {max}] is empty"
            )));
        }
        Ok(PixelGrid {
            min,
            max,
            width: None,
            data: Vec::new(),
            rows: 0,
        })
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Append one row, normalized against the grid's default range.
    pub fn push_row(&mut self, row: &[f64], channel: Channel) -> Result<()> {
        let (min, max) = (self.min, self.max);
        self.push_row_scaled(row, channel, min, max)
    }

    /// Append one row with an explicit normalization range.
    pub fn push_row_scaled(
        &mut self,
        row: &[f64],
        channel: Channel,
        min: f64,
        max: f64,
    ) -> Result<()> {
        if !(max > min) {
            return Err(AnnkitError::InvalidConfig(format!(
                "normalization range [{min}, {max}] is empty"
            )));
        }
        match self.width {
            None => self.width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(AnnkitError::ShapeMismatch {
                    expected: w,
                    got: row.len(),
                });
            }
            Some(_) => {}
        }
        for &x in row {
            let v = norm255(x, min, max);
            self.data.extend_from_slice(&channel.rgb(v));
        }
        self.rows += 1;
        Ok(())
    }

    /// Append every row of `rows` with one shared channel and range.
    pub fn push_rows<'a, I>(&mut self, rows: I, channel: Channel) -> Result<()>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        for row in rows {
            self.push_row(row, channel)?;
        }
        Ok(())
    }

    /// Write the stacked rows as an RGB8 image. The format follows the file
    /// extension (`.png`, `.bmp`, ...). Fails on an empty grid.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let width = match self.width {
            Some(w) if self.rows > 0 && w > 0 => w,
            _ => {
                return Err(AnnkitError::InvalidConfig(
                    "cannot save an empty pixel grid".into(),
                ));
            }
        };
        image::save_buffer(
            path.as_ref(),
            &self.data,
            width as u32,
            self.rows as u32,
            image::ColorType::Rgb8,
        )
        .map_err(|e| AnnkitError::Image(e.to_string()))
    }
}

/// Normalize `x` from `[min, max]` into `0..=255`, clamping overshoot.
fn norm255(x: f64, min: f64, max: f64) -> u8 {
    let scaled = 255.0 * (x - min) / (max - min);
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm255_bounds_and_clamping() {
        assert_eq!(norm255(0.0, 0.0, 1.0), 0);
        assert_eq!(norm255(1.0, 0.0, 1.0), 255);
        assert_eq!(norm255(0.5, 0.0, 1.0), 127);
        assert_eq!(norm255(-3.0, 0.0, 1.0), 0);
        assert_eq!(norm255(42.0, 0.0, 1.0), 255);
    }

    #[test]
    fn test_channel_tinting() {
        assert_eq!(Channel::Grey.rgb(200), [200, 200, 200]);
        assert_eq!(Channel::Red.rgb(10), [10, 0, 0]);
        assert_eq!(Channel::Green.rgb(10), [0, 10, 0]);
        assert_eq!(Channel::Blue.rgb(10), [0, 0, 10]);
    }

    #[test]
    fn test_row_width_locked_by_first_row() {
        let mut grid = PixelGrid::new(0.0, 1.0).unwrap();
        grid.push_row(&[0.0, 0.5, 1.0], Channel::Grey).unwrap();
        assert_eq!(grid.width(), Some(3));
        assert_eq!(
            grid.push_row(&[0.0, 1.0], Channel::Grey),
            Err(AnnkitError::ShapeMismatch {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(grid.rows(), 1);
    }

    #[test]
    fn test_rejects_empty_range() {
        assert!(PixelGrid::new(1.0, 1.0).is_err());
        let mut grid = PixelGrid::new(0.0, 1.0).unwrap();
        assert!(grid
            .push_row_scaled(&[0.0], Channel::Grey, 2.0, 2.0)
            .is_err());
    }

    #[test]
    fn test_save_empty_grid_fails() {
        let grid = PixelGrid::new(0.0, 1.0).unwrap();
        assert!(matches!(
            grid.save("unused.png"),
            Err(AnnkitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_save_roundtrip_to_temp_file() {
        let mut grid = PixelGrid::new(0.0, 1.0).unwrap();
        grid.push_row(&[0.0, 0.5, 1.0], Channel::Grey).unwrap();
        grid.push_row(&[1.0, 0.5, 0.0], Channel::Red).unwrap();

        let path = std::env::temp_dir().join("annkit_pixelgrid_test.png");
        grid.save(&path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }
}
