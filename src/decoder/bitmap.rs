use crate::{decoder::stream::NBitwiseIterator, error::GribError};

/// A bit per grid point, in scan order; a set bit marks a point with data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bitmap<'a> {
    bits: &'a [u8],
}

impl<'a> Bitmap<'a> {
    pub(crate) fn new(bits: &'a [u8]) -> Self {
        Self { bits }
    }

    /// Presence flags of the first `num_points` grid points.
    pub(crate) fn iter(&self, num_points: usize) -> impl Iterator<Item = bool> + 'a {
        NBitwiseIterator::new(self.bits, 1)
            .take(num_points)
            .map(|bit| bit == 1)
    }

    /// Counts grid points with data among the first `num_points`.
    pub(crate) fn num_present(&self, num_points: usize) -> Result<usize, GribError> {
        let num_bits = self.bits.len() * 8;
        if num_bits < num_points {
            return Err(GribError::InvalidValue(format!(
                "bitmap has {num_bits} bits but the grid has {num_points} points"
            )));
        }
        Ok(self.iter(num_points).filter(|present| *present).count())
    }
}

/// Spreads the decoded values over the grid points flagged as present and
/// yields NaN for the others.
pub(crate) struct BitmapDecodeIterator<B, I> {
    bitmap: B,
    values: I,
}

impl<B, I> BitmapDecodeIterator<B, I> {
    pub(crate) fn new(bitmap: B, values: I) -> Self {
        Self { bitmap, values }
    }
}

impl<B, I> Iterator for BitmapDecodeIterator<B, I>
where
    B: Iterator<Item = bool>,
    I: Iterator<Item = f64>,
{
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bitmap.next()? {
            self.values.next()
        } else {
            Some(f64::NAN)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bitmap.size_hint()
    }
}
