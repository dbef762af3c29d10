use ndarray::Array2;

use super::LatLonGrid;

/// A latitude/longitude grid defined on a sphere whose south pole has been
/// moved to [`Rotation`]'s pole.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedLatLonGrid {
    pub rotated: LatLonGrid,
    pub rotation: Rotation,
}

impl RotatedLatLonGrid {
    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        self.rotated.grid_shape()
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        "rotated_ll"
    }

    /// Returns 2D arrays of shape `(Nj, Ni)` with the geographic longitudes
    /// and latitudes of the grid points.
    pub fn geographic_coordinates(&self) -> (Array2<f64>, Array2<f64>) {
        let (mut lons, mut lats) = self.rotated.coordinates();
        let latlons = lats.iter().copied().zip(lons.iter().copied());
        let unrotated = Unrotate::new(latlons, &self.rotation).collect::<Vec<_>>();
        for ((lat, lon), (φ, λ)) in lats.iter_mut().zip(lons.iter_mut()).zip(unrotated) {
            *lat = φ;
            *lon = λ;
        }
        (lons, lats)
    }
}

/// Position of the rotated south pole and rotation angle about the new polar
/// axis, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    pub south_pole_lat: f64,
    pub south_pole_lon: f64,
    pub rot_angle: f64,
}

/// Converts `(lat, lon)` pairs in the rotated frame into geographic ones.
/// Longitudes are normalised to `[-180, 180)`.
#[derive(Clone)]
pub struct Unrotate<I> {
    latlons: I,
    sinφp: f64,
    cosφp: f64,
    λp: f64,
    gamma: f64,
}

impl<I> Unrotate<I> {
    pub fn new(latlons: I, rot: &Rotation) -> Self {
        let φp = rot.south_pole_lat.to_radians();
        let λp = rot.south_pole_lon.to_radians();
        let gamma = rot.rot_angle.to_radians();

        // south pole to north pole
        let φp = -φp;
        let λp = λp + std::f64::consts::PI;

        let (sinφp, cosφp) = φp.sin_cos();
        Self {
            latlons,
            sinφp,
            cosφp,
            λp,
            gamma,
        }
    }
}

impl<I> Iterator for Unrotate<I>
where
    I: Iterator<Item = (f64, f64)>,
{
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let (lat, lon) = self.latlons.next()?;
        let λr = lon.to_radians();
        let φr = lat.to_radians();

        let λr = λr - self.gamma;

        let (sinφr, cosφr) = φr.sin_cos();
        let (sinλr, cosλr) = λr.sin_cos();

        let sinφ = self.sinφp * sinφr + self.cosφp * cosφr * cosλr;
        let φ = sinφ.clamp(-1.0, 1.0).asin();

        let y = cosφr * sinλr;
        let x = self.cosφp * sinφr - self.sinφp * cosφr * cosλr;
        let λ = self.λp - y.atan2(x);

        let lon = (λ.to_degrees() + 180.0).rem_euclid(360.0) - 180.0;
        Some((φ.to_degrees(), lon))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.latlons.size_hint()
    }
}
