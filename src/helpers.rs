/// Conversion of GRIB's sign-and-magnitude integers.
///
/// GRIB stores signed quantities (scale factors, coordinates) with the most
/// significant bit as a sign flag and the remaining bits as the magnitude,
/// which differs from two's complement.
pub(crate) trait GribInt<I> {
    fn as_grib_int(&self) -> I;
}

macro_rules! add_impl_for_ints {
    ($(($ty_src:ty, $ty_dst:ty),)*) => ($(
        impl GribInt<$ty_dst> for $ty_src {
            fn as_grib_int(&self) -> $ty_dst {
                if self.leading_zeros() == 0 {
                    let abs = (self << 1 >> 1) as $ty_dst;
                    -abs
                } else {
                    *self as $ty_dst
                }
            }
        }
    )*);
}

add_impl_for_ints! {
    (u8, i8),
    (u16, i16),
    (u32, i32),
    (u64, i64),
}

/// Interprets the lowest `n_bytes` bytes of `value` as a sign-and-magnitude
/// integer of that width.
pub(crate) fn sign_magnitude(value: u64, n_bytes: usize) -> i64 {
    let bits = n_bytes * 8;
    let sign_bit = 1_u64 << (bits - 1);
    let magnitude = (value & (sign_bit - 1)) as i64;
    if value & sign_bit != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Converts an IBM System/360 single precision float into an `f64`.
///
/// The layout is a sign bit, a 7-bit base-16 exponent in excess-64 notation
/// and a 24-bit fraction. Edition 1 stores reference values and rotation
/// angles in this format.
pub fn ibm_to_f64(bytes: [u8; 4]) -> f64 {
    let sign = if bytes[0] & 0x80 != 0 { -1.0 } else { 1.0 };
    let exponent = i32::from(bytes[0] & 0x7f) - 64;
    let mantissa = u32::from_be_bytes([0, bytes[1], bytes[2], bytes[3]]);
    if mantissa == 0 {
        return 0.0;
    }
    sign * f64::from(mantissa) * 2_f64.powi(-24) * 16_f64.powi(exponent)
}
