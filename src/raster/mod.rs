//! Raster primitives shared by the pattern builder and the output compositor

mod direction;
mod transform;

pub use direction::Direction;

use crate::io::error::{Result, WfcError, invalid_parameter};
use ndarray::{Array3, ArrayView3};

/// Tightly packed 8-bit raster with 1 to 4 components per pixel
///
/// Pixels live in an `(height, width, components)` array kept in standard
/// layout, so the logical byte order is row-major with no padding. All
/// rasters flowing through one solver share a single component count.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    data: Array3<u8>,
}

impl Raster {
    /// Create a zero-filled raster
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the component count
    /// is outside `1..=4`
    pub fn new(width: usize, height: usize, component_cnt: usize) -> Result<Self> {
        Self::validate(width, height, component_cnt)?;
        Ok(Self {
            data: Array3::zeros((height, width, component_cnt)),
        })
    }

    /// Create a raster from a tightly packed row-major byte buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the buffer length
    /// does not equal `width * height * component_cnt`
    pub fn from_raw(
        width: usize,
        height: usize,
        component_cnt: usize,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        Self::validate(width, height, component_cnt)?;
        let expected = width * height * component_cnt;
        if bytes.len() != expected {
            return Err(WfcError::InvalidSourceData {
                reason: format!(
                    "buffer holds {} bytes, {}x{}x{} needs {expected}",
                    bytes.len(),
                    width,
                    height,
                    component_cnt
                ),
            });
        }
        let data = Array3::from_shape_vec((height, width, component_cnt), bytes).map_err(|e| {
            WfcError::InvalidSourceData {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { data })
    }

    // Internal constructor for transforms that build standard-layout arrays
    pub(crate) const fn from_data(data: Array3<u8>) -> Self {
        Self { data }
    }

    fn validate(width: usize, height: usize, component_cnt: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{width}x{height}"),
                &"both dimensions must be at least 1",
            ));
        }
        if !(1..=4).contains(&component_cnt) {
            return Err(invalid_parameter(
                "component_cnt",
                &component_cnt,
                &"must be between 1 and 4",
            ));
        }
        Ok(())
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Components per pixel
    pub fn component_cnt(&self) -> usize {
        self.data.dim().2
    }

    /// One component of one pixel, or `None` when out of bounds
    pub fn component(&self, x: usize, y: usize, c: usize) -> Option<u8> {
        self.data.get((y, x, c)).copied()
    }

    /// Copy of a `width x height` window anchored at `(x, y)`
    ///
    /// Out-of-bounds samples read as zero; callers harvest windows that fit.
    pub fn window(&self, x: usize, y: usize, width: usize, height: usize) -> Self {
        let data = Array3::from_shape_fn((height, width, self.component_cnt()), |(wy, wx, c)| {
            self.data.get((y + wy, x + wx, c)).copied().unwrap_or(0)
        });
        Self { data }
    }

    /// The packed row-major byte buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    pub(crate) fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }
}
