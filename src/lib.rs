//! Decoder for single GRIB edition 1 and edition 2 messages.
//!
//! [`parse`] splits a buffer holding one message into typed sections whose
//! fields can be inspected by their GRIB key names, and the resulting
//! [`Message`] derives the reference time, the longitude/latitude grid and
//! the decoded values of the field.
//!
//! ```no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let buf = std::fs::read("testdata/constant_field.grib1")?;
//!     let message = gribkit::parse(&buf)?;
//!
//!     println!("edition {}, {}", message.edition(), message.get_time()?);
//!     let (lons, lats) = message.get_coordinates()?;
//!     let values = message.get_values()?;
//!     assert_eq!(values.shape(), lons.shape());
//!     assert_eq!(values.shape(), lats.shape());
//!     Ok(())
//! }
//! ```
//!
//! Only regular and rotated latitude/longitude grids with simple packing are
//! decoded; other grids and packing schemes are kept as raw template bytes
//! and make the derived accessors fail with [`GribError::NotSupported`].

pub mod codetables;
mod datatypes;
mod decoder;
mod error;
mod grid;
mod helpers;
mod message;
mod parser;
mod reader;
pub mod sections;
mod time;

pub use crate::{
    datatypes::{FieldValue, PackedValues, Section},
    error::*,
    grid::{
        GridDefinition, GridPointIndexIterator, LatLonGrid, RotatedLatLonGrid, Rotation,
        ScanningMode, Unrotate,
    },
    helpers::ibm_to_f64,
    message::{Message, MessageSections},
    parser::{LengthCheck, ParseOptions, Parser, parse},
    reader::ByteReader,
    sections::{EndSection, RawTemplate, edition1, edition2},
};
