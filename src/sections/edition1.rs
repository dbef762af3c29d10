//! Sections of GRIB edition 1 messages.

use super::{EndSection, RawTemplate, read_identifier};
use crate::{
    codetables::{DataRepresentationType, describe},
    datatypes::{
        AsFieldValue, FieldValue, PackedValues, Section, grib_section, impl_section_for_pair,
        impl_section_for_variants,
    },
    error::{GribError, ParseError},
    grid::{GridDefinition, LatLonGrid, RotatedLatLonGrid, Rotation, ScanningMode},
    reader::ByteReader,
};

const INDICATOR_SECTION: &str = "Indicator Section";
const PRODUCT_DEFINITION_SECTION: &str = "Product Definition Section";
const GRID_DESCRIPTION_SECTION: &str = "Grid Description Section";
const BIT_MAP_SECTION: &str = "Bit Map Section";
const BINARY_DATA_SECTION: &str = "Binary Data Section";

/// Flag of `section1Flags` telling that a Grid Description Section follows.
pub const FLAG_GDS_INCLUDED: u8 = 0b10000000;
/// Flag of `section1Flags` telling that a Bit Map Section follows.
pub const FLAG_BMS_INCLUDED: u8 = 0b01000000;

/// Centre whose Product Definition Sections carry a local definition after
/// octet 40 (ECMWF).
const LOCAL_DEFINITION_CENTRE: u8 = 98;
const LOCAL_DEFINITION_OFFSET: usize = 40;

grib_section! {
    /// Indicator Section (Section 0).
    pub struct Indicator("Indicator Section") {
        identifier: [u8; 4] => "identifier",
        /// Total length of GRIB message in octets (including Section 0)
        total_length: u32 => "totalLength",
        edition_number: u8 => "editionNumber",
    }
}

impl Indicator {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let bounds = reader.begin_section(INDICATOR_SECTION);
        let identifier = read_identifier(reader)?;
        let total_length = reader.read_u24()?;
        let edition_number = reader.read_u8()?;
        reader.end_section(&bounds, 8)?;
        Ok(Self {
            identifier,
            total_length,
            edition_number,
        })
    }
}

grib_section! {
    /// Product Definition Section (Section 1).
    pub struct ProductDefinitionSection("Product Definition Section") {
        section1_length: u32 => "section1Length",
        /// GRIB tables Version No. (currently 3 for international exchange)
        table2_version: u8 => "table2Version",
        /// Identification of originating/generating centre (see Table 0)
        centre: u8 => "centre",
        generating_process_identifier: u8 => "generatingProcessIdentifier",
        /// Grid definition (number of grid used, from catalogue defined by the
        /// originating centre)
        grid_definition: u8 => "gridDefinition",
        /// Flag specifying the presence or absence of a GDS or a BMS (see
        /// Table 1)
        section1_flags: u8 => "section1Flags",
        indicator_of_parameter: u8 => "indicatorOfParameter",
        indicator_of_type_of_level: u8 => "indicatorOfTypeOfLevel",
        level: u16 => "level",
        year_of_century: u8 => "yearOfCentury",
        month: u8 => "month",
        day: u8 => "day",
        hour: u8 => "hour",
        minute: u8 => "minute",
        unit_of_time_range: u8 => "unitOfTimeRange",
        p1: u8 => "P1",
        p2: u8 => "P2",
        time_range_indicator: u8 => "timeRangeIndicator",
        number_included_in_average: u16 => "numberIncludedInAverage",
        number_missing_from_averages_or_accumulations: u8 => "numberMissingFromAveragesOrAccumulations",
        /// Century of Initial (Reference) time (=20 until Jan. 1, 2001)
        century_of_reference_time_of_data: u8 => "centuryOfReferenceTimeOfData",
        sub_centre: u8 => "subCentre",
        /// Units decimal scale factor (D)
        decimal_scale_factor: i16 => "decimalScaleFactor",
    }
}

impl ProductDefinitionSection {
    pub fn has_gds(&self) -> bool {
        self.section1_flags & FLAG_GDS_INCLUDED != 0
    }

    pub fn has_bms(&self) -> bool {
        self.section1_flags & FLAG_BMS_INCLUDED != 0
    }

    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            section1_length: reader.read_u24()?,
            table2_version: reader.read_u8()?,
            centre: reader.read_u8()?,
            generating_process_identifier: reader.read_u8()?,
            grid_definition: reader.read_u8()?,
            section1_flags: reader.read_u8()?,
            indicator_of_parameter: reader.read_u8()?,
            indicator_of_type_of_level: reader.read_u8()?,
            level: reader.read_u16()?,
            year_of_century: reader.read_u8()?,
            month: reader.read_u8()?,
            day: reader.read_u8()?,
            hour: reader.read_u8()?,
            minute: reader.read_u8()?,
            unit_of_time_range: reader.read_u8()?,
            p1: reader.read_u8()?,
            p2: reader.read_u8()?,
            time_range_indicator: reader.read_u8()?,
            number_included_in_average: reader.read_u16()?,
            number_missing_from_averages_or_accumulations: reader.read_u8()?,
            century_of_reference_time_of_data: reader.read_u8()?,
            sub_centre: reader.read_u8()?,
            decimal_scale_factor: reader.read_i16()?,
        })
    }
}

grib_section! {
    /// Local extension of the Product Definition Section.
    pub struct LocalDefinition("Local Definition") {
        local_definition_number: u8 => "localDefinitionNumber",
    }
}

/// Product Definition Section followed by a centre-specific local extension.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalProductDefinitionSection {
    pub standard: ProductDefinitionSection,
    pub local: LocalDefinition,
}

impl_section_for_pair!(LocalProductDefinitionSection { standard, local });

/// The Product Definition Section in either of its layouts.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductDefinition {
    Standard(ProductDefinitionSection),
    Local(LocalProductDefinitionSection),
}

impl_section_for_variants!(ProductDefinition { Standard, Local });

impl ProductDefinition {
    /// Fields common to both layouts.
    pub fn standard(&self) -> &ProductDefinitionSection {
        match self {
            Self::Standard(pds) => pds,
            Self::Local(pds) => &pds.standard,
        }
    }

    pub fn local_definition_number(&self) -> Option<u8> {
        match self {
            Self::Standard(_) => None,
            Self::Local(pds) => Some(pds.local.local_definition_number),
        }
    }

    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let bounds = reader.begin_section(PRODUCT_DEFINITION_SECTION);
        let standard = ProductDefinitionSection::decode_fields(reader)?;
        let length = standard.section1_length as usize;

        let pds = if standard.centre == LOCAL_DEFINITION_CENTRE
            && length > LOCAL_DEFINITION_OFFSET
        {
            reader.seek(bounds.start + LOCAL_DEFINITION_OFFSET)?;
            let local = LocalDefinition {
                local_definition_number: reader.read_u8()?,
            };
            Self::Local(LocalProductDefinitionSection { standard, local })
        } else {
            Self::Standard(standard)
        };

        reader.end_section(&bounds, length)?;
        Ok(pds)
    }
}

grib_section! {
    /// Octets 1-6 of the Grid Description Section (Section 2).
    pub struct GridDescriptionHeader("Grid Description Section") {
        section2_length: u32 => "section2Length",
        number_of_vertical_coordinate_values: u8 => "numberOfVerticalCoordinateValues",
        pvl_location: u8 => "pvlLocation",
        /// Data representation type (see Table 6)
        data_representation_type: u8 => "dataRepresentationType",
    }
}

grib_section! {
    /// Octets 7-28 of a latitude/longitude grid description. Angles are in
    /// millidegrees.
    pub struct LatLonGridBody("Latitude/Longitude Grid") {
        ni: u16 => "Ni",
        nj: u16 => "Nj",
        latitude_of_first_grid_point: i32 => "latitudeOfFirstGridPoint",
        longitude_of_first_grid_point: i32 => "longitudeOfFirstGridPoint",
        resolution_and_component_flags: u8 => "resolutionAndComponentFlags",
        latitude_of_last_grid_point: i32 => "latitudeOfLastGridPoint",
        longitude_of_last_grid_point: i32 => "longitudeOfLastGridPoint",
        i_direction_increment: u16 => "iDirectionIncrement",
        j_direction_increment: u16 => "jDirectionIncrement",
        /// Scanning mode flags (see Flag/Code table 8)
        scanning_mode: u8 => "scanningMode",
    }
}

impl LatLonGridBody {
    const RESERVED_SCANNING_MODE_BITS: u8 = 0b00011111;

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let body = Self {
            ni: reader.read_u16()?,
            nj: reader.read_u16()?,
            latitude_of_first_grid_point: reader.read_i24()?,
            longitude_of_first_grid_point: reader.read_i24()?,
            resolution_and_component_flags: reader.read_u8()?,
            latitude_of_last_grid_point: reader.read_i24()?,
            longitude_of_last_grid_point: reader.read_i24()?,
            i_direction_increment: reader.read_u16()?,
            j_direction_increment: reader.read_u16()?,
            scanning_mode: reader.read_u8()?,
        };
        if body.scanning_mode & Self::RESERVED_SCANNING_MODE_BITS != 0 {
            return Err(ParseError::malformed(
                GRID_DESCRIPTION_SECTION,
                format!(
                    "reserved bits of scanning mode {:#010b} are set",
                    body.scanning_mode
                ),
            ));
        }
        // reserved
        reader.read_bytes(4)?;
        Ok(body)
    }

    /// The grid with coordinates converted to degrees.
    pub fn grid(&self) -> LatLonGrid {
        LatLonGrid {
            ni: usize::from(self.ni),
            nj: usize::from(self.nj),
            first_point_lat: millidegrees(self.latitude_of_first_grid_point),
            first_point_lon: millidegrees(self.longitude_of_first_grid_point),
            last_point_lat: millidegrees(self.latitude_of_last_grid_point),
            last_point_lon: millidegrees(self.longitude_of_last_grid_point),
            scanning_mode: ScanningMode(self.scanning_mode),
        }
    }
}

fn millidegrees(value: i32) -> f64 {
    f64::from(value) / 1e3
}

grib_section! {
    /// Octets 33-42 of a rotated latitude/longitude grid description.
    pub struct RotationBody("Rotation") {
        latitude_of_southern_pole: i32 => "latitudeOfSouthernPole",
        longitude_of_southern_pole: i32 => "longitudeOfSouthernPole",
        angle_of_rotation_in_degrees: f64 => "angleOfRotationInDegrees",
    }
}

impl RotationBody {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            latitude_of_southern_pole: reader.read_i24()?,
            longitude_of_southern_pole: reader.read_i24()?,
            angle_of_rotation_in_degrees: reader.read_ibm_f32()?,
        })
    }

    pub fn rotation(&self) -> Rotation {
        Rotation {
            south_pole_lat: millidegrees(self.latitude_of_southern_pole),
            south_pole_lon: millidegrees(self.longitude_of_southern_pole),
            rot_angle: self.angle_of_rotation_in_degrees,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotatedLatLonGridBody {
    pub lat_lon: LatLonGridBody,
    pub rotation: RotationBody,
}

impl_section_for_pair!(RotatedLatLonGridBody { lat_lon, rotation });

/// Grid-type-specific part of the Grid Description Section.
#[derive(Debug, Clone, PartialEq)]
pub enum GridDescriptionTemplate {
    LatLon(LatLonGridBody),
    RotatedLatLon(RotatedLatLonGridBody),
    /// Any other data representation type, kept undecoded.
    Other(RawTemplate),
}

impl_section_for_variants!(GridDescriptionTemplate {
    LatLon,
    RotatedLatLon,
    Other
});

#[derive(Debug, Clone, PartialEq)]
pub struct GridDescriptionSection {
    pub header: GridDescriptionHeader,
    pub template: GridDescriptionTemplate,
}

impl_section_for_pair!(GridDescriptionSection { header, template });

impl GridDescriptionSection {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let bounds = reader.begin_section(GRID_DESCRIPTION_SECTION);
        let header = GridDescriptionHeader {
            section2_length: reader.read_u24()?,
            number_of_vertical_coordinate_values: reader.read_u8()?,
            pvl_location: reader.read_u8()?,
            data_representation_type: reader.read_u8()?,
        };
        let length = header.section2_length as usize;

        let template = match DataRepresentationType::try_from(header.data_representation_type) {
            Ok(DataRepresentationType::LatLon) => {
                GridDescriptionTemplate::LatLon(LatLonGridBody::decode(reader)?)
            }
            Ok(DataRepresentationType::RotatedLatLon) => {
                let lat_lon = LatLonGridBody::decode(reader)?;
                let rotation = RotationBody::decode(reader)?;
                GridDescriptionTemplate::RotatedLatLon(RotatedLatLonGridBody { lat_lon, rotation })
            }
            _ => GridDescriptionTemplate::Other(RawTemplate::new(bounds.rest(reader, length)?)),
        };

        reader.end_section(&bounds, length)?;
        Ok(Self { header, template })
    }

    /// Returns the grid geometry, or fails with [`GribError::NotSupported`]
    /// for grid types other than (rotated) latitude/longitude.
    pub fn grid_definition(&self) -> Result<GridDefinition, GribError> {
        match &self.template {
            GridDescriptionTemplate::LatLon(body) => Ok(GridDefinition::LatLon(body.grid())),
            GridDescriptionTemplate::RotatedLatLon(body) => {
                Ok(GridDefinition::RotatedLatLon(RotatedLatLonGrid {
                    rotated: body.lat_lon.grid(),
                    rotation: body.rotation.rotation(),
                }))
            }
            GridDescriptionTemplate::Other(_) => Err(GribError::NotSupported(format!(
                "data representation type {}",
                describe::<DataRepresentationType, u8>(self.header.data_representation_type)
            ))),
        }
    }
}

grib_section! {
    /// Bit Map Section (Section 3).
    pub struct BitMapSection("Bit Map Section") {
        section3_length: u32 => "section3Length",
        number_of_unused_bits_at_end_of_section3: u8 => "numberOfUnusedBitsAtEndOfSection3",
        /// Zero if a bit map follows, otherwise the number of a predefined
        /// bit map
        table_reference: u16 => "tableReference",
    }
    extra {
        bitmap: Box<[u8]>,
    }
}

impl BitMapSection {
    /// The bit map following the header, one bit per grid point. `None` if
    /// the section refers to a predefined bit map.
    pub fn bitmap(&self) -> Option<&[u8]> {
        (self.table_reference == 0).then_some(&self.bitmap[..])
    }

    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let bounds = reader.begin_section(BIT_MAP_SECTION);
        let section3_length = reader.read_u24()?;
        let number_of_unused_bits_at_end_of_section3 = reader.read_u8()?;
        let table_reference = reader.read_u16()?;
        let length = section3_length as usize;
        let bitmap = bounds.rest(reader, length)?.into();
        reader.end_section(&bounds, length)?;
        Ok(Self {
            section3_length,
            number_of_unused_bits_at_end_of_section3,
            table_reference,
            bitmap,
        })
    }
}

grib_section! {
    /// Octet 4 of the Binary Data Section (see Table 11).
    pub struct DataFlag("Data Flag") {
        spherical_harmonics: u8 => "sphericalHarmonics",
        complex_packing: u8 => "complexPacking",
        integer_point_values: u8 => "integerPointValues",
        additional_flags_present: u8 => "additionalFlagsPresent",
        unused_bits_at_end: u8 => "unusedBitsAtEnd",
    }
}

impl DataFlag {
    pub fn from_octet(octet: u8) -> Self {
        Self {
            spherical_harmonics: (octet >> 7) & 1,
            complex_packing: (octet >> 6) & 1,
            integer_point_values: (octet >> 5) & 1,
            additional_flags_present: (octet >> 4) & 1,
            unused_bits_at_end: octet & 0b1111,
        }
    }

    /// Whether the data are grid point values with simple packing.
    pub fn is_simple_grid_point_packing(&self) -> bool {
        self.spherical_harmonics == 0 && self.complex_packing == 0
    }
}

impl AsFieldValue for DataFlag {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Nested(self)
    }
}

grib_section! {
    /// Binary Data Section (Section 4).
    pub struct BinaryDataSection("Binary Data Section") {
        section4_length: u32 => "section4Length",
        data_flag: DataFlag => "dataFlag",
        /// Scale factor (E)
        binary_scale_factor: i16 => "binaryScaleFactor",
        /// Reference value (minimum of packed values)
        reference_value: f64 => "referenceValue",
        bits_per_value: u8 => "bitsPerValue",
        /// Packed values; `None` for a constant field.
        values: Option<PackedValues> => "values",
    }
}

impl BinaryDataSection {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let bounds = reader.begin_section(BINARY_DATA_SECTION);
        let section4_length = reader.read_u24()?;
        let data_flag = DataFlag::from_octet(reader.read_u8()?);
        let binary_scale_factor = reader.read_i16()?;
        let reference_value = reader.read_ibm_f32()?;
        let bits_per_value = reader.read_u8()?;
        let length = section4_length as usize;
        let payload = bounds.rest(reader, length)?;
        reader.end_section(&bounds, length)?;

        let values = (bits_per_value != 0).then(|| {
            PackedValues::new(
                payload.into(),
                bits_per_value,
                usize::from(data_flag.unused_bits_at_end),
            )
        });
        Ok(Self {
            section4_length,
            data_flag,
            binary_scale_factor,
            reference_value,
            bits_per_value,
            values,
        })
    }
}

/// All sections of an edition 1 message.
#[derive(Debug, Clone, PartialEq)]
pub struct Grib1Sections {
    pub is: Indicator,
    pub pds: ProductDefinition,
    pub gds: Option<GridDescriptionSection>,
    pub bms: Option<BitMapSection>,
    pub bds: BinaryDataSection,
    pub end: EndSection,
}

impl Grib1Sections {
    pub const SECTION_NAMES: &'static [&'static str] = &["is", "pds", "gds", "bms", "bds", "end"];

    /// Looks a section up by its short name; see [`Self::SECTION_NAMES`].
    pub fn section(&self, name: &str) -> Option<&dyn Section> {
        match name {
            "is" => Some(&self.is),
            "pds" => Some(&self.pds),
            "gds" => self.gds.as_ref().map(|s| s as &dyn Section),
            "bms" => self.bms.as_ref().map(|s| s as &dyn Section),
            "bds" => Some(&self.bds),
            "end" => Some(&self.end),
            _ => None,
        }
    }
}
