use chrono::NaiveDateTime;
use ndarray::Array2;

use crate::{
    datatypes::{PackedValues, Section},
    decoder::{Bitmap, DecodeTarget, SimplePackingParam},
    error::GribError,
    grid::GridDefinition,
    sections::{
        edition1::Grib1Sections,
        edition2::{BITMAP_NOT_APPLIED, Grib2Sections},
    },
    time::{create_date_time, full_year},
};

/// Sections of a message, by edition.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageSections {
    Edition1(Grib1Sections),
    Edition2(Grib2Sections),
}

/// One decoded GRIB message.
///
/// A `Message` is immutable once [`parse`](crate::parse) returns it. The
/// derived accessors ([`get_time`](Self::get_time),
/// [`get_coordinates`](Self::get_coordinates) and
/// [`get_values`](Self::get_values)) are pure functions of the decoded
/// sections, so calling them repeatedly yields identical results and a
/// failure leaves the message untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    sections: MessageSections,
}

impl Message {
    pub(crate) fn new(sections: MessageSections) -> Self {
        Self { sections }
    }

    pub fn edition(&self) -> u8 {
        match &self.sections {
            MessageSections::Edition1(sections) => sections.is.edition_number,
            MessageSections::Edition2(sections) => sections.is.edition_number,
        }
    }

    /// Total length of the message as declared in the Indicator Section.
    pub fn total_length(&self) -> u64 {
        match &self.sections {
            MessageSections::Edition1(sections) => u64::from(sections.is.total_length),
            MessageSections::Edition2(sections) => sections.is.total_length,
        }
    }

    pub fn sections(&self) -> &MessageSections {
        &self.sections
    }

    pub fn as_edition1(&self) -> Option<&Grib1Sections> {
        match &self.sections {
            MessageSections::Edition1(sections) => Some(sections),
            MessageSections::Edition2(_) => None,
        }
    }

    pub fn as_edition2(&self) -> Option<&Grib2Sections> {
        match &self.sections {
            MessageSections::Edition1(_) => None,
            MessageSections::Edition2(sections) => Some(sections),
        }
    }

    /// Returns a section by its short name, e.g. `"pds"` or `"bds"`. Optional
    /// sections absent from this message yield `None`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let buf = std::fs::read("testdata/constant_field.grib1")?;
    ///     let message = gribkit::parse(&buf)?;
    ///     let pds = message.section("pds").ok_or("no PDS")?;
    ///     for name in pds.fieldnames() {
    ///         println!("{name} = {:?}", pds.field(name));
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn section(&self, name: &str) -> Option<&dyn Section> {
        match &self.sections {
            MessageSections::Edition1(sections) => sections.section(name),
            MessageSections::Edition2(sections) => sections.section(name),
        }
    }

    /// Short names of the sections present in this message, in stream order.
    pub fn section_names(&self) -> Vec<&'static str> {
        let names = match &self.sections {
            MessageSections::Edition1(_) => Grib1Sections::SECTION_NAMES,
            MessageSections::Edition2(_) => Grib2Sections::SECTION_NAMES,
        };
        names
            .iter()
            .copied()
            .filter(|name| self.section(name).is_some())
            .collect()
    }

    /// Returns the reference time of the data.
    pub fn get_time(&self) -> Result<NaiveDateTime, GribError> {
        match &self.sections {
            MessageSections::Edition1(sections) => {
                let pds = sections.pds.standard();
                let year = full_year(pds.century_of_reference_time_of_data, pds.year_of_century);
                create_date_time(
                    year,
                    pds.month.into(),
                    pds.day.into(),
                    pds.hour.into(),
                    pds.minute.into(),
                    0,
                )
            }
            MessageSections::Edition2(sections) => {
                let ids = &sections.ids;
                create_date_time(
                    ids.year.into(),
                    ids.month.into(),
                    ids.day.into(),
                    ids.hour.into(),
                    ids.minute.into(),
                    ids.second.into(),
                )
            }
        }
    }

    /// Returns the geometry of the grid, or fails with
    /// [`GribError::NotSupported`] for grids this crate does not decode.
    pub fn grid_definition(&self) -> Result<GridDefinition, GribError> {
        match &self.sections {
            MessageSections::Edition1(sections) => sections
                .gds
                .as_ref()
                .ok_or_else(|| {
                    GribError::NotSupported(format!(
                        "predefined grid {} without Grid Description Section",
                        sections.pds.standard().grid_definition
                    ))
                })?
                .grid_definition(),
            MessageSections::Edition2(sections) => sections.gds.grid_definition(),
        }
    }

    /// Returns longitudes and latitudes of shape `(Nj, Ni)`, element `[[j, i]]`
    /// being the location of `get_values()[[j, i]]`.
    ///
    /// For rotated grids these are coordinates in the rotated frame; see
    /// [`get_geographic_coordinates`](Self::get_geographic_coordinates).
    pub fn get_coordinates(&self) -> Result<(Array2<f64>, Array2<f64>), GribError> {
        Ok(self.grid_definition()?.coordinates())
    }

    /// Returns longitudes and latitudes of shape `(Nj, Ni)` on the geographic
    /// sphere.
    pub fn get_geographic_coordinates(&self) -> Result<(Array2<f64>, Array2<f64>), GribError> {
        Ok(self.grid_definition()?.geographic_coordinates())
    }

    /// Returns decoded values of shape `(Nj, Ni)`. Points missing according to
    /// the bit map are NaN.
    pub fn get_values(&self) -> Result<Array2<f64>, GribError> {
        let grid = self.grid_definition()?;
        let target = self.decode_target(grid.num_points()?)?;
        grid.reshape(target.decode()?)
    }

    fn decode_target(&self, num_points: usize) -> Result<DecodeTarget<'_>, GribError> {
        match &self.sections {
            MessageSections::Edition1(sections) => {
                let bds = &sections.bds;
                if !bds.data_flag.is_simple_grid_point_packing() {
                    return Err(GribError::NotSupported(format!(
                        "packing with data flag {:?}",
                        bds.data_flag
                    )));
                }

                let bitmap = match &sections.bms {
                    Some(bms) => Some(Bitmap::new(bms.bitmap().ok_or_else(|| {
                        GribError::NotSupported(format!(
                            "predefined bit map {}",
                            bms.table_reference
                        ))
                    })?)),
                    None => None,
                };

                Ok(DecodeTarget {
                    param: SimplePackingParam {
                        ref_val: bds.reference_value,
                        exp: bds.binary_scale_factor,
                        dig: sections.pds.standard().decimal_scale_factor,
                        nbit: bds.bits_per_value,
                    },
                    payload: bds
                        .values
                        .as_ref()
                        .map(PackedValues::payload)
                        .unwrap_or_default(),
                    unused_bits: usize::from(bds.data_flag.unused_bits_at_end),
                    bitmap,
                    num_points,
                })
            }
            MessageSections::Edition2(sections) => {
                let template = sections.drs.simple_packing()?;
                if template.type_of_original_field_values > 1 {
                    return Err(GribError::NotSupported(format!(
                        "type of original field values {}",
                        template.type_of_original_field_values
                    )));
                }

                let bitmap_section = &sections.bitmap;
                let bitmap = match bitmap_section.bit_map_indicator {
                    BITMAP_NOT_APPLIED => None,
                    indicator => Some(Bitmap::new(bitmap_section.bitmap().ok_or_else(|| {
                        GribError::NotSupported(format!("bit map indicator {indicator}"))
                    })?)),
                };

                Ok(DecodeTarget {
                    param: SimplePackingParam {
                        ref_val: f64::from(template.reference_value),
                        exp: template.binary_scale_factor,
                        dig: template.decimal_scale_factor,
                        nbit: template.bits_per_value,
                    },
                    payload: sections.data.payload(),
                    unused_bits: 0,
                    bitmap,
                    num_points,
                })
            }
        }
    }
}
