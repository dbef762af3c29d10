use num::ToPrimitive;

use crate::{
    decoder::stream::{FixedValueIterator, NBitwiseIterator},
    error::GribError,
};

/// Parameters of simple packing, shared by both editions.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimplePackingParam {
    pub(crate) ref_val: f64,
    pub(crate) exp: i16,
    pub(crate) dig: i16,
    pub(crate) nbit: u8,
}

impl SimplePackingParam {
    pub(crate) fn zero_bit_reference_value(&self) -> f64 {
        self.ref_val * 10_f64.powi(-i32::from(self.dig))
    }
}

pub(crate) enum SimplePackingDecodeIteratorWrapper<I> {
    // With no bits per value every grid point holds the reference value.
    FixedValue(FixedValueIterator<f64>),
    SimplePacking(SimplePackingDecodeIterator<I>),
}

impl<I, N> Iterator for SimplePackingDecodeIteratorWrapper<I>
where
    I: Iterator<Item = N>,
    N: ToPrimitive,
{
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::FixedValue(inner) => inner.next(),
            Self::SimplePacking(inner) => inner.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::FixedValue(inner) => inner.size_hint(),
            Self::SimplePacking(inner) => inner.size_hint(),
        }
    }
}

/// Creates an iterator over the first `num_encoded` physical values packed in
/// `payload`, whose last `unused_bits` bits are padding.
pub(crate) fn decode<'a>(
    param: &SimplePackingParam,
    payload: &'a [u8],
    unused_bits: usize,
    num_encoded: usize,
) -> Result<SimplePackingDecodeIteratorWrapper<impl Iterator<Item = u32> + 'a>, GribError> {
    if param.nbit == 0 {
        return Ok(SimplePackingDecodeIteratorWrapper::FixedValue(
            FixedValueIterator::new(param.zero_bit_reference_value(), num_encoded),
        ));
    }
    if param.nbit > 32 {
        return Err(GribError::NotSupported(format!(
            "{} bits per value",
            param.nbit
        )));
    }

    let nbit = usize::from(param.nbit);
    let available = (payload.len() * 8).saturating_sub(unused_bits) / nbit;
    if available < num_encoded {
        return Err(GribError::InvalidValue(format!(
            "data section holds {available} values but {num_encoded} are required"
        )));
    }

    let iter = NBitwiseIterator::new(payload, nbit).take(num_encoded);
    Ok(SimplePackingDecodeIteratorWrapper::SimplePacking(
        SimplePackingDecodeIterator::new(iter, param),
    ))
}

/// Applies `(R + X * 2^E) * 10^-D` to each packed integer `X`.
pub(crate) struct SimplePackingDecodeIterator<I> {
    iter: I,
    ref_val: f64,
    exp: i32,
    dig: i32,
}

impl<I> SimplePackingDecodeIterator<I> {
    pub(crate) fn new(iter: I, param: &SimplePackingParam) -> Self {
        Self {
            iter,
            ref_val: param.ref_val,
            exp: param.exp.into(),
            dig: param.dig.into(),
        }
    }
}

impl<I: Iterator<Item = N>, N: ToPrimitive> Iterator for SimplePackingDecodeIterator<I> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let encoded = self.iter.next()?.to_f64()?;
        let diff = encoded * 2_f64.powi(self.exp);
        let dig_factor = 10_f64.powi(-self.dig);
        Some((self.ref_val + diff) * dig_factor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
