mod bitmap;
mod simple;
mod stream;

use self::{bitmap::BitmapDecodeIterator, simple::SimplePackingDecodeIteratorWrapper};
pub(crate) use self::{bitmap::Bitmap, simple::SimplePackingParam, stream::NBitwiseIterator};
use crate::error::GribError;

/// Inputs needed to decode the grid point values of one field.
pub(crate) struct DecodeTarget<'a> {
    pub(crate) param: SimplePackingParam,
    pub(crate) payload: &'a [u8],
    pub(crate) unused_bits: usize,
    pub(crate) bitmap: Option<Bitmap<'a>>,
    pub(crate) num_points: usize,
}

impl DecodeTarget<'_> {
    /// Decodes the values of all grid points in scan order. Points the bitmap
    /// marks as missing are NaN.
    pub(crate) fn decode(&self) -> Result<Vec<f64>, GribError> {
        let num_encoded = match &self.bitmap {
            Some(bitmap) => bitmap.num_present(self.num_points)?,
            None => self.num_points,
        };
        log::debug!(
            "decoding {num_encoded} of {} points with {} bits per value",
            self.num_points,
            self.param.nbit
        );

        let values: SimplePackingDecodeIteratorWrapper<_> =
            simple::decode(&self.param, self.payload, self.unused_bits, num_encoded)?;
        let values = match &self.bitmap {
            Some(bitmap) => {
                BitmapDecodeIterator::new(bitmap.iter(self.num_points), values).collect()
            }
            None => values.collect(),
        };
        Ok(values)
    }
}
