//! Direction-aware raster transforms used to harvest and augment patterns

use super::{Direction, Raster};
use ndarray::{Array3, s};

impl Raster {
    /// Wrap-expanded copy of size `(width + xexp, height + yexp)`
    ///
    /// Pixel `(x, y)` of the result equals pixel `(x mod W, y mod H)` of the
    /// source, turning window harvesting into sampling on a torus.
    pub fn expand_wrap(&self, xexp: usize, yexp: usize) -> Self {
        let (height, width) = (self.height(), self.width());
        let data = Array3::from_shape_fn(
            (height + yexp, width + xexp, self.component_cnt()),
            |(y, x, c)| self.component(x % width, y % height, c).unwrap_or(0),
        );
        Self::from_data(data)
    }

    /// Mirror along the vertical axis
    pub fn flip_horizontal(&self) -> Self {
        let width = self.width();
        let data = Array3::from_shape_fn(self.view().raw_dim(), |(y, x, c)| {
            self.component(width - 1 - x, y, c).unwrap_or(0)
        });
        Self::from_data(data)
    }

    /// Mirror along the horizontal axis
    pub fn flip_vertical(&self) -> Self {
        let height = self.height();
        let data = Array3::from_shape_fn(self.view().raw_dim(), |(y, x, c)| {
            self.component(x, height - 1 - y, c).unwrap_or(0)
        });
        Self::from_data(data)
    }

    /// Clockwise rotation by `quarter_turns * 90` degrees
    ///
    /// Odd turn counts swap width and height.
    pub fn rotate90(&self, quarter_turns: u32) -> Self {
        let (height, width, component_cnt) = (self.height(), self.width(), self.component_cnt());
        match quarter_turns % 4 {
            1 => {
                let data = Array3::from_shape_fn((width, height, component_cnt), |(y, x, c)| {
                    self.component(y, height - 1 - x, c).unwrap_or(0)
                });
                Self::from_data(data)
            }
            2 => {
                let data = Array3::from_shape_fn((height, width, component_cnt), |(y, x, c)| {
                    self.component(width - 1 - x, height - 1 - y, c).unwrap_or(0)
                });
                Self::from_data(data)
            }
            3 => {
                let data = Array3::from_shape_fn((width, height, component_cnt), |(y, x, c)| {
                    self.component(width - 1 - y, x, c).unwrap_or(0)
                });
                Self::from_data(data)
            }
            _ => self.clone(),
        }
    }

    /// Whether shifting `self` one pixel toward `direction` makes it coincide
    /// byte-for-byte with `other` on their shared rectangle
    ///
    /// Tiles one pixel wide or tall have an empty shared rectangle in two of
    /// the directions; the empty comparison counts as a match.
    pub fn overlaps(&self, other: &Self, direction: Direction) -> bool {
        if self.width() != other.width()
            || self.height() != other.height()
            || self.component_cnt() != other.component_cnt()
        {
            return false;
        }

        let (a_x, a_y, b_x, b_y, width, height) = match direction {
            Direction::Up => (0, 0, 0, 1, self.width(), self.height() - 1),
            Direction::Down => (0, 1, 0, 0, self.width(), self.height() - 1),
            Direction::Left => (0, 0, 1, 0, self.width() - 1, self.height()),
            Direction::Right => (1, 0, 0, 0, self.width() - 1, self.height()),
        };

        self.view()
            .slice(s![a_y..a_y + height, a_x..a_x + width, ..])
            == other
                .view()
                .slice(s![b_y..b_y + height, b_x..b_x + width, ..])
    }
}
