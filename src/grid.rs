mod latlon;
mod rotated_ll;

use ndarray::Array2;

pub use self::{
    latlon::LatLonGrid,
    rotated_ll::{RotatedLatLonGrid, Rotation, Unrotate},
};
use crate::error::GribError;

/// Geometry of the grid a message's values are laid out on, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum GridDefinition {
    LatLon(LatLonGrid),
    RotatedLatLon(RotatedLatLonGrid),
}

impl GridDefinition {
    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        self.lat_lon().grid_shape()
    }

    /// Returns the number of grid points, failing with
    /// [`GribError::InvalidValue`] if `Ni * Nj` does not fit in `usize`.
    pub fn num_points(&self) -> Result<usize, GribError> {
        let (ni, nj) = self.grid_shape();
        self.lat_lon().num_points().ok_or_else(|| {
            GribError::InvalidValue(format!("grid of {ni} x {nj} points is too large"))
        })
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::LatLon(grid) => grid.short_name(),
            Self::RotatedLatLon(grid) => grid.short_name(),
        }
    }

    pub fn scanning_mode(&self) -> ScanningMode {
        self.lat_lon().scanning_mode
    }

    /// Returns an iterator over `(i, j)` of grid points, in the order their
    /// values are stored.
    pub fn ij(&self) -> GridPointIndexIterator {
        self.lat_lon().ij()
    }

    /// Longitudes and latitudes of the grid points in the frame the grid is
    /// defined in (the rotated frame for rotated grids).
    pub fn coordinates(&self) -> (Array2<f64>, Array2<f64>) {
        self.lat_lon().coordinates()
    }

    /// Longitudes and latitudes of the grid points on the geographic sphere.
    pub fn geographic_coordinates(&self) -> (Array2<f64>, Array2<f64>) {
        match self {
            Self::LatLon(grid) => grid.coordinates(),
            Self::RotatedLatLon(grid) => grid.geographic_coordinates(),
        }
    }

    /// Places values given in storage order into an `(Nj, Ni)` array.
    pub(crate) fn reshape(&self, values: Vec<f64>) -> Result<Array2<f64>, GribError> {
        let (ni, nj) = self.grid_shape();
        if values.len() < self.num_points()? {
            return Err(GribError::InvalidValue(format!(
                "{} values decoded for a grid of {ni} x {nj} points",
                values.len()
            )));
        }

        let mut array = Array2::from_elem((nj, ni), f64::NAN);
        for ((i, j), value) in self.ij().zip(values) {
            array[[j, i]] = value;
        }
        Ok(array)
    }

    fn lat_lon(&self) -> &LatLonGrid {
        match self {
            Self::LatLon(grid) => grid,
            Self::RotatedLatLon(grid) => &grid.rotated,
        }
    }
}

/// Order in which grid point values are stored (Flag Table 8 of edition 1,
/// Flag Table 3.4 of edition 2).
///
/// Rows of the arrays returned by [`Message`](crate::Message) accessors follow
/// the order in which rows are scanned, and columns follow the order in which
/// the points of the first row are scanned, so the flags for the i and j
/// directions only affect which way the coordinates run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanningMode(pub u8);

impl ScanningMode {
    pub fn scans_positively_for_i(&self) -> bool {
        self.0 & 0b10000000 == 0
    }

    pub fn scans_positively_for_j(&self) -> bool {
        self.0 & 0b01000000 != 0
    }

    pub fn is_consecutive_for_i(&self) -> bool {
        self.0 & 0b00100000 == 0
    }

    pub fn scans_alternating_rows(&self) -> bool {
        self.0 & 0b00010000 != 0
    }

    pub fn has_unsupported_flags(&self) -> bool {
        self.0 & 0b00001111 != 0
    }

    pub(crate) fn check_supported(&self) -> Result<(), GribError> {
        if self.has_unsupported_flags() {
            return Err(GribError::NotSupported(format!(
                "scanning mode {:#010b}",
                self.0
            )));
        }
        Ok(())
    }
}

/// An iterator over `(i, j)` array indices of grid points, in the order their
/// values are stored.
///
/// This `struct` is created by the [`ij`] method on [`GridDefinition`].
///
/// [`ij`]: GridDefinition::ij
#[derive(Debug, Clone)]
pub struct GridPointIndexIterator {
    major_len: usize,
    minor_len: usize,
    scanning_mode: ScanningMode,
    major_pos: usize,
    minor_pos: usize,
    increments: bool,
}

impl GridPointIndexIterator {
    pub(crate) fn new(i_size: usize, j_size: usize, scanning_mode: ScanningMode) -> Self {
        let (major_len, minor_len) = if scanning_mode.is_consecutive_for_i() {
            (j_size, i_size)
        } else {
            (i_size, j_size)
        };

        Self {
            major_len,
            minor_len,
            scanning_mode,
            major_pos: 0,
            minor_pos: 0,
            increments: true,
        }
    }
}

impl Iterator for GridPointIndexIterator {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.major_pos == self.major_len || self.minor_len == 0 {
            return None;
        }

        let minor_pos = if self.increments {
            self.minor_pos
        } else {
            self.minor_len - self.minor_pos - 1
        };
        let major_pos = self.major_pos;

        self.minor_pos += 1;
        if self.minor_pos == self.minor_len {
            self.major_pos += 1;
            self.minor_pos = 0;
            if self.scanning_mode.scans_alternating_rows() {
                self.increments = !self.increments;
            }
        }

        if self.scanning_mode.is_consecutive_for_i() {
            Some((minor_pos, major_pos))
        } else {
            Some((major_pos, minor_pos))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = if self.minor_len == 0 {
            0
        } else {
            (self.major_len - self.major_pos) * self.minor_len - self.minor_pos
        };
        (len, Some(len))
    }
}

/// `num` evenly spaced samples from `start` to `stop`, both inclusive.
pub(crate) fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|k| {
                    if k == num - 1 {
                        stop
                    } else {
                        start + k as f64 * step
                    }
                })
                .collect()
        }
    }
}
