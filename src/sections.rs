//! Section structures of both editions.
//!
//! Every section is decoded eagerly from a [`ByteReader`] positioned at its
//! first octet. Decoding a section either consumes exactly its declared
//! length or fails.

pub mod edition1;
pub mod edition2;

use crate::{
    datatypes::grib_section,
    error::ParseError,
    reader::ByteReader,
};

pub(crate) const GRIB_MAGIC: &[u8; 4] = b"GRIB";
pub(crate) const END_MAGIC: &[u8; 4] = b"7777";

/// Reads the `GRIB` literal opening every message.
pub(crate) fn read_identifier(reader: &mut ByteReader<'_>) -> Result<[u8; 4], ParseError> {
    if reader.peek_bytes(4)? != GRIB_MAGIC {
        return Err(ParseError::NotGrib);
    }
    reader.read_array()
}

grib_section! {
    /// End Section, identical in both editions.
    pub struct EndSection("End Section") {
        end_of_message: [u8; 4] => "endOfMessage",
    }
}

impl EndSection {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let bounds = reader.begin_section("End Section");
        let end_of_message = reader.read_array()?;
        if &end_of_message != END_MAGIC {
            return Err(ParseError::malformed(
                bounds.name,
                format!("expected b\"7777\", found {end_of_message:02x?}"),
            ));
        }
        reader.end_section(&bounds, 4)?;
        Ok(Self { end_of_message })
    }
}

grib_section! {
    /// Template octets of a template this crate does not decode.
    pub struct RawTemplate("Raw Template") {}
    extra {
        bytes: Box<[u8]>,
    }
}

impl RawTemplate {
    pub(crate) fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
