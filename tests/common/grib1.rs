use super::sign_magnitude;

/// An edition 1 message under construction.
#[derive(Debug, Clone)]
pub struct Grib1Message {
    pub centre: u8,
    pub century: u8,
    pub year_of_century: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub decimal_scale_factor: i16,
    pub gds: Option<Vec<u8>>,
    pub bms: Option<Vec<u8>>,
    pub bds: Vec<u8>,
    /// Overrides the `totalLength` written to the Indicator Section.
    pub total_length: Option<u32>,
}

impl Grib1Message {
    pub fn new(gds: Option<Vec<u8>>, bds: Vec<u8>) -> Self {
        Self {
            centre: 34,
            century: 21,
            year_of_century: 6,
            month: 12,
            day: 5,
            hour: 12,
            minute: 0,
            decimal_scale_factor: 0,
            gds,
            bms: None,
            bds,
            total_length: None,
        }
    }

    pub fn pds(&self) -> Vec<u8> {
        let mut buf = vec![0_u8; 28];
        buf[..3].copy_from_slice(&28_u32.to_be_bytes()[1..]);
        buf[3] = 3;
        buf[4] = self.centre;
        buf[5] = 96;
        buf[6] = 255;
        buf[7] = match (&self.gds, &self.bms) {
            (Some(_), Some(_)) => 0b11000000,
            (Some(_), None) => 0b10000000,
            (None, Some(_)) => 0b01000000,
            (None, None) => 0,
        };
        buf[8] = 11;
        buf[9] = 105;
        buf[10..12].copy_from_slice(&2_u16.to_be_bytes());
        buf[12..17].copy_from_slice(&[
            self.year_of_century,
            self.month,
            self.day,
            self.hour,
            self.minute,
        ]);
        buf[17] = 1;
        buf[24] = self.century;
        buf[26..28].copy_from_slice(&sign_magnitude(self.decimal_scale_factor.into(), 2));
        buf
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = self.pds();
        if let Some(gds) = &self.gds {
            body.extend_from_slice(gds);
        }
        if let Some(bms) = &self.bms {
            body.extend_from_slice(bms);
        }
        body.extend_from_slice(&self.bds);
        body.extend_from_slice(b"7777");

        let total_length = self.total_length.unwrap_or(body.len() as u32 + 8);
        let mut buf = b"GRIB".to_vec();
        buf.extend_from_slice(&total_length.to_be_bytes()[1..]);
        buf.push(1);
        buf.extend(body);
        buf
    }
}

/// Latitudes and longitudes in millidegrees.
pub fn lat_lon_gds(ni: u16, nj: u16, first: (i32, i32), last: (i32, i32), scan: u8) -> Vec<u8> {
    let mut buf = vec![0, 0, 32, 0, 255, 0];
    buf.extend_from_slice(&ni.to_be_bytes());
    buf.extend_from_slice(&nj.to_be_bytes());
    buf.extend(sign_magnitude(first.0.into(), 3));
    buf.extend(sign_magnitude(first.1.into(), 3));
    buf.push(0x80);
    buf.extend(sign_magnitude(last.0.into(), 3));
    buf.extend(sign_magnitude(last.1.into(), 3));
    buf.extend_from_slice(&2000_u16.to_be_bytes());
    buf.extend_from_slice(&2000_u16.to_be_bytes());
    buf.push(scan);
    buf.extend_from_slice(&[0; 4]);
    buf
}

/// A rotated latitude/longitude grid whose southern pole is given in
/// millidegrees and whose rotation angle is an IBM float.
pub fn rotated_lat_lon_gds(
    ni: u16,
    nj: u16,
    first: (i32, i32),
    last: (i32, i32),
    south_pole: (i32, i32),
    angle: [u8; 4],
) -> Vec<u8> {
    let mut buf = lat_lon_gds(ni, nj, first, last, 0b01000000);
    buf[2] = 42;
    buf[5] = 10;
    buf.extend(sign_magnitude(south_pole.0.into(), 3));
    buf.extend(sign_magnitude(south_pole.1.into(), 3));
    buf.extend_from_slice(&angle);
    buf
}

/// A grid description of a data representation type other than (rotated)
/// latitude/longitude, with an opaque body.
pub fn other_gds(data_representation_type: u8, body: &[u8]) -> Vec<u8> {
    let length = (6 + body.len()) as u32;
    let mut buf = length.to_be_bytes()[1..].to_vec();
    buf.extend_from_slice(&[0, 255, data_representation_type]);
    buf.extend_from_slice(body);
    buf
}

pub fn bms(bitmap: &[u8], unused_bits: u8, table_reference: u16) -> Vec<u8> {
    let length = (6 + bitmap.len()) as u32;
    let mut buf = length.to_be_bytes()[1..].to_vec();
    buf.push(unused_bits);
    buf.extend_from_slice(&table_reference.to_be_bytes());
    buf.extend_from_slice(bitmap);
    buf
}

/// Binary Data Section; `flags` holds the upper four bits of the data flag.
pub fn bds(
    flags: u8,
    unused_bits: u8,
    binary_scale_factor: i16,
    reference_value: [u8; 4],
    bits_per_value: u8,
    payload: &[u8],
) -> Vec<u8> {
    let length = (11 + payload.len()) as u32;
    let mut buf = length.to_be_bytes()[1..].to_vec();
    buf.push((flags & 0xf0) | (unused_bits & 0x0f));
    buf.extend(sign_magnitude(binary_scale_factor.into(), 2));
    buf.extend_from_slice(&reference_value);
    buf.push(bits_per_value);
    buf.extend_from_slice(payload);
    buf
}

/// Binary Data Section of a constant field.
pub fn constant_bds(reference_value: [u8; 4]) -> Vec<u8> {
    bds(0, 8, 0, reference_value, 0, &[0])
}
