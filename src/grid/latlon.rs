use ndarray::Array2;

use super::{GridPointIndexIterator, ScanningMode, linspace};

/// A regular latitude/longitude grid, with coordinates in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonGrid {
    pub ni: usize,
    pub nj: usize,
    pub first_point_lat: f64,
    pub first_point_lon: f64,
    pub last_point_lat: f64,
    pub last_point_lon: f64,
    pub scanning_mode: ScanningMode,
}

impl LatLonGrid {
    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    ///
    /// Examples
    ///
    /// ```
    /// let grid = gribkit::LatLonGrid {
    ///     ni: 2,
    ///     nj: 3,
    ///     first_point_lat: 0.0,
    ///     first_point_lon: 0.0,
    ///     last_point_lat: 2.0,
    ///     last_point_lon: 1.0,
    ///     scanning_mode: gribkit::ScanningMode(0b01000000),
    /// };
    /// assert_eq!(grid.grid_shape(), (2, 3));
    /// ```
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.ni, self.nj)
    }

    /// Returns the number of grid points, or `None` if `Ni * Nj` overflows.
    pub fn num_points(&self) -> Option<usize> {
        self.ni.checked_mul(self.nj)
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        "regular_ll"
    }

    /// Returns an iterator over `(i, j)` of grid points.
    ///
    /// Note that this is a low-level API and it is not checked that the number
    /// of iterator iterations is consistent with the number of grid points
    /// defined in the data.
    pub fn ij(&self) -> GridPointIndexIterator {
        GridPointIndexIterator::new(self.ni, self.nj, self.scanning_mode)
    }

    /// Latitudes of the `Nj` rows, in the order the rows are scanned.
    pub fn latitudes(&self) -> Vec<f64> {
        if !self.is_consistent_for_j() {
            log::warn!(
                "latitudes {} and {} of first and last grid points are inconsistent with scanning mode {:#010b}",
                self.first_point_lat,
                self.last_point_lat,
                self.scanning_mode.0
            );
        }
        linspace(self.first_point_lat, self.last_point_lat, self.nj)
    }

    /// Longitudes of the `Ni` columns, in the order the points of a row are
    /// scanned. A grid crossing the antimeridian yields longitudes running
    /// past 180 or 360 degrees rather than wrapping around.
    pub fn longitudes(&self) -> Vec<f64> {
        let (first, mut last) = (self.first_point_lon, self.last_point_lon);
        if self.scanning_mode.scans_positively_for_i() {
            if last < first {
                last += 360.0;
            }
        } else if last > first {
            last -= 360.0;
        }
        linspace(first, last, self.ni)
    }

    /// Returns 2D arrays of shape `(Nj, Ni)` with the longitudes and latitudes
    /// of the grid points.
    pub fn coordinates(&self) -> (Array2<f64>, Array2<f64>) {
        let lons = self.longitudes();
        let lats = self.latitudes();
        let shape = (self.nj, self.ni);
        (
            Array2::from_shape_fn(shape, |(_, i)| lons[i]),
            Array2::from_shape_fn(shape, |(j, _)| lats[j]),
        )
    }

    pub(crate) fn is_consistent_for_j(&self) -> bool {
        let lat_diff = self.last_point_lat - self.first_point_lat;
        lat_diff == 0.0 || (lat_diff > 0.0) == self.scanning_mode.scans_positively_for_j()
    }
}
