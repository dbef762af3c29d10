use crate::{
    error::ParseError,
    helpers::{GribInt, ibm_to_f64, sign_magnitude},
};

/// A forward cursor over an immutable byte buffer.
///
/// All integers are big-endian. Every read either consumes exactly the bytes
/// it decodes or fails with [`ParseError::TruncatedInput`] without moving the
/// cursor.
///
/// # Examples
///
/// ```
/// use gribkit::ByteReader;
///
/// let mut reader = ByteReader::new(&[0x00, 0x00, 0x66, 0x80, 0x11]);
/// assert_eq!(reader.read_uint(3), Ok(102));
/// assert_eq!(reader.read_scaled_signed(2), Ok(-17));
/// assert_eq!(reader.tell(), 5);
/// assert!(reader.read_uint(1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current absolute position.
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Number of bytes left after the current position.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Moves the cursor to an absolute position. Seeking to the very end of
    /// the buffer is allowed, seeking past it is not.
    pub fn seek(&mut self, offset: usize) -> Result<(), ParseError> {
        if offset > self.buf.len() {
            return Err(ParseError::TruncatedInput {
                offset: self.pos,
                requested: offset - self.pos,
                available: self.remaining(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Returns the next `n_bytes` bytes without advancing.
    pub fn peek_bytes(&self, n_bytes: usize) -> Result<&'a [u8], ParseError> {
        let end = self.pos.checked_add(n_bytes).filter(|end| *end <= self.buf.len());
        match end {
            Some(end) => Ok(&self.buf[self.pos..end]),
            None => Err(ParseError::TruncatedInput {
                offset: self.pos,
                requested: n_bytes,
                available: self.remaining(),
            }),
        }
    }

    pub fn read_bytes(&mut self, n_bytes: usize) -> Result<&'a [u8], ParseError> {
        let bytes = self.peek_bytes(n_bytes)?;
        self.pos += n_bytes;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut array = [0; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Reads an unsigned integer of `n_bytes` bytes (at most 8).
    pub fn read_uint(&mut self, n_bytes: usize) -> Result<u64, ParseError> {
        debug_assert!(n_bytes <= 8);
        let bytes = self.read_bytes(n_bytes)?;
        Ok(bytes
            .iter()
            .fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte)))
    }

    /// Reads a sign-and-magnitude integer of `n_bytes` bytes (at most 8): the
    /// most significant bit is the sign and the rest is the magnitude.
    pub fn read_scaled_signed(&mut self, n_bytes: usize) -> Result<i64, ParseError> {
        let value = self.read_uint(n_bytes)?;
        Ok(sign_magnitude(value, n_bytes))
    }

    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        Ok(u8::from_be_bytes(self.read_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16, ParseError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u24(&mut self) -> Result<u32, ParseError> {
        let [a, b, c] = self.read_array()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, ParseError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub fn read_i8(&mut self) -> Result<i8, ParseError> {
        Ok(self.read_u8()?.as_grib_int())
    }

    pub fn read_i16(&mut self) -> Result<i16, ParseError> {
        Ok(self.read_u16()?.as_grib_int())
    }

    pub fn read_i24(&mut self) -> Result<i32, ParseError> {
        let value = self.read_scaled_signed(3)?;
        // 23 bits of magnitude always fit
        Ok(value as i32)
    }

    pub fn read_i32(&mut self) -> Result<i32, ParseError> {
        Ok(self.read_u32()?.as_grib_int())
    }

    /// Reads an IBM single precision float (edition 1).
    pub fn read_ibm_f32(&mut self) -> Result<f64, ParseError> {
        Ok(ibm_to_f64(self.read_array()?))
    }

    /// Reads an IEEE 754 single precision float (edition 2).
    pub fn read_ieee_f32(&mut self) -> Result<f32, ParseError> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    /// Starts decoding a section at the current position.
    pub(crate) fn begin_section(&self, name: &'static str) -> SectionBounds {
        SectionBounds {
            name,
            start: self.pos,
        }
    }

    /// Finishes a section by seeking to `start + declared_length`, skipping
    /// reserved bytes and sub-structures that were not decoded.
    pub(crate) fn end_section(
        &mut self,
        bounds: &SectionBounds,
        declared_length: usize,
    ) -> Result<(), ParseError> {
        let end = bounds.start + declared_length;
        if end < self.pos {
            return Err(ParseError::malformed(
                bounds.name,
                format!(
                    "declared length {declared_length} is shorter than the {} octets of its fields",
                    self.pos - bounds.start
                ),
            ));
        }
        self.seek(end)?;
        log::debug!(
            "decoded {} at offset {} ({} octets)",
            bounds.name,
            bounds.start,
            declared_length
        );
        Ok(())
    }
}

/// Start position and name of the section being decoded.
pub(crate) struct SectionBounds {
    pub(crate) name: &'static str,
    pub(crate) start: usize,
}

impl SectionBounds {
    /// Bytes between the current position of `reader` and the declared end.
    pub(crate) fn rest<'a>(
        &self,
        reader: &mut ByteReader<'a>,
        declared_length: usize,
    ) -> Result<&'a [u8], ParseError> {
        let end = self.start + declared_length;
        let len = end.checked_sub(reader.tell()).ok_or_else(|| {
            ParseError::malformed(
                self.name,
                format!("declared length {declared_length} is too short"),
            )
        })?;
        reader.read_bytes(len)
    }
}
