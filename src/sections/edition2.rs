//! Sections of GRIB edition 2 messages.

use super::{EndSection, RawTemplate, read_identifier};
use crate::{
    codetables::{
        DataRepresentationTemplateNumber, GridDefinitionTemplateNumber,
        ProductDefinitionTemplateNumber, describe,
    },
    datatypes::{Section, grib_section, impl_section_for_pair, impl_section_for_variants},
    error::{GribError, ParseError},
    grid::{GridDefinition, LatLonGrid, ScanningMode},
    reader::{ByteReader, SectionBounds},
};

const INDICATOR_SECTION: &str = "Indicator Section";
const IDENTIFICATION_SECTION: &str = "Identification Section";
const LOCAL_USE_SECTION: &str = "Local Use Section";
const GRID_DEFINITION_SECTION: &str = "Grid Definition Section";
const PRODUCT_DEFINITION_SECTION: &str = "Product Definition Section";
const DATA_REPRESENTATION_SECTION: &str = "Data Representation Section";
const BITMAP_SECTION: &str = "Bit-Map Section";
const DATA_SECTION: &str = "Data Section";

/// Reads the length and number common to sections 1 to 7 and checks that the
/// number is the expected one.
fn begin_numbered_section(
    reader: &mut ByteReader<'_>,
    name: &'static str,
    expected: u8,
) -> Result<(SectionBounds, u32, u8), ParseError> {
    let bounds = reader.begin_section(name);
    let length = reader.read_u32()?;
    let number = reader.read_u8()?;
    if number != expected {
        return Err(ParseError::malformed(
            name,
            format!("numberOfSection is {number} where {expected} is expected"),
        ));
    }
    Ok((bounds, length, number))
}

grib_section! {
    /// Indicator Section (Section 0).
    pub struct Indicator("Indicator Section") {
        identifier: [u8; 4] => "identifier",
        /// Discipline - GRIB Master Table Number (see Code Table 0.0)
        discipline: u8 => "discipline",
        edition_number: u8 => "editionNumber",
        /// Total length of GRIB message in octets (including Section 0)
        total_length: u64 => "totalLength",
    }
}

impl Indicator {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let bounds = reader.begin_section(INDICATOR_SECTION);
        let identifier = read_identifier(reader)?;
        // reserved
        reader.read_bytes(2)?;
        let discipline = reader.read_u8()?;
        let edition_number = reader.read_u8()?;
        let total_length = reader.read_u64()?;
        reader.end_section(&bounds, 16)?;
        Ok(Self {
            identifier,
            discipline,
            edition_number,
            total_length,
        })
    }
}

grib_section! {
    /// Identification Section (Section 1).
    pub struct IdentificationSection("Identification Section") {
        section1_length: u32 => "section1Length",
        number_of_section: u8 => "numberOfSection",
        /// Identification of originating/generating centre (see Common Code
        /// Table C-1)
        centre: u16 => "centre",
        /// Identification of originating/generating sub-centre (allocated by
        /// originating/ generating centre)
        sub_centre: u16 => "subCentre",
        /// GRIB Master Tables Version Number (see Code Table 1.0)
        tables_version: u8 => "tablesVersion",
        /// GRIB Local Tables Version Number (see Code Table 1.1)
        local_tables_version: u8 => "localTablesVersion",
        /// Significance of Reference Time (see Code Table 1.2)
        significance_of_reference_time: u8 => "significanceOfReferenceTime",
        year: u16 => "year",
        month: u8 => "month",
        day: u8 => "day",
        hour: u8 => "hour",
        minute: u8 => "minute",
        second: u8 => "second",
        /// Production status of processed data in this GRIB message
        /// (see Code Table 1.3)
        production_status_of_processed_data: u8 => "productionStatusOfProcessedData",
        /// Type of processed data in this GRIB message (see Code Table 1.4)
        type_of_processed_data: u8 => "typeOfProcessedData",
    }
}

impl IdentificationSection {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let (bounds, section1_length, number_of_section) =
            begin_numbered_section(reader, IDENTIFICATION_SECTION, 1)?;
        let section = Self {
            section1_length,
            number_of_section,
            centre: reader.read_u16()?,
            sub_centre: reader.read_u16()?,
            tables_version: reader.read_u8()?,
            local_tables_version: reader.read_u8()?,
            significance_of_reference_time: reader.read_u8()?,
            year: reader.read_u16()?,
            month: reader.read_u8()?,
            day: reader.read_u8()?,
            hour: reader.read_u8()?,
            minute: reader.read_u8()?,
            second: reader.read_u8()?,
            production_status_of_processed_data: reader.read_u8()?,
            type_of_processed_data: reader.read_u8()?,
        };
        reader.end_section(&bounds, section1_length as usize)?;
        Ok(section)
    }
}

grib_section! {
    /// Local Use Section (Section 2).
    pub struct LocalUseSection("Local Use Section") {
        section2_length: u32 => "section2Length",
        number_of_section: u8 => "numberOfSection",
    }
    extra {
        payload: Box<[u8]>,
    }
}

impl LocalUseSection {
    /// Centre-specific content of the section.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let (bounds, section2_length, number_of_section) =
            begin_numbered_section(reader, LOCAL_USE_SECTION, 2)?;
        let length = section2_length as usize;
        let payload = bounds.rest(reader, length)?.into();
        reader.end_section(&bounds, length)?;
        Ok(Self {
            section2_length,
            number_of_section,
            payload,
        })
    }
}

grib_section! {
    /// Octets 1-14 of the Grid Definition Section (Section 3).
    pub struct GridDefinitionHeader("Grid Definition Section") {
        section3_length: u32 => "section3Length",
        number_of_section: u8 => "numberOfSection",
        /// Source of grid definition (see Code Table 3.0)
        source_of_grid_definition: u8 => "sourceOfGridDefinition",
        number_of_data_points: u32 => "numberOfDataPoints",
        number_of_octets_for_number_of_points: u8 => "numberOfOctetsForNumberOfPoints",
        interpretation_of_number_of_points: u8 => "interpretationOfNumberOfPoints",
        /// Grid Definition Template Number (see Code Table 3.1)
        grid_definition_template_number: u16 => "gridDefinitionTemplateNumber",
    }
}

grib_section! {
    /// Grid Definition Template 3.0: latitude/longitude.
    pub struct LatLonTemplate("Grid Definition Template 3.0") {
        /// Shape of the Earth (see Code Table 3.2)
        shape_of_the_earth: u8 => "shapeOfTheEarth",
        scale_factor_of_radius_of_spherical_earth: u8 => "scaleFactorOfRadiusOfSphericalEarth",
        scaled_value_of_radius_of_spherical_earth: u32 => "scaledValueOfRadiusOfSphericalEarth",
        scale_factor_of_earth_major_axis: u8 => "scaleFactorOfEarthMajorAxis",
        scaled_value_of_earth_major_axis: u32 => "scaledValueOfEarthMajorAxis",
        scale_factor_of_earth_minor_axis: u8 => "scaleFactorOfEarthMinorAxis",
        scaled_value_of_earth_minor_axis: u32 => "scaledValueOfEarthMinorAxis",
        ni: u32 => "Ni",
        nj: u32 => "Nj",
        basic_angle_of_the_initial_production_domain: u32 => "basicAngleOfTheInitialProductionDomain",
        subdivisions_of_basic_angle: u32 => "subdivisionsOfBasicAngle",
        latitude_of_first_grid_point: i32 => "latitudeOfFirstGridPoint",
        longitude_of_first_grid_point: i32 => "longitudeOfFirstGridPoint",
        /// Resolution and component flags (see Flag Table 3.3)
        resolution_and_component_flags: u8 => "resolutionAndComponentFlags",
        latitude_of_last_grid_point: i32 => "latitudeOfLastGridPoint",
        longitude_of_last_grid_point: i32 => "longitudeOfLastGridPoint",
        i_direction_increment: u32 => "iDirectionIncrement",
        j_direction_increment: u32 => "jDirectionIncrement",
        /// Scanning mode (flags - see Flag Table 3.4)
        scanning_mode: u8 => "scanningMode",
    }
}

impl LatLonTemplate {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            shape_of_the_earth: reader.read_u8()?,
            scale_factor_of_radius_of_spherical_earth: reader.read_u8()?,
            scaled_value_of_radius_of_spherical_earth: reader.read_u32()?,
            scale_factor_of_earth_major_axis: reader.read_u8()?,
            scaled_value_of_earth_major_axis: reader.read_u32()?,
            scale_factor_of_earth_minor_axis: reader.read_u8()?,
            scaled_value_of_earth_minor_axis: reader.read_u32()?,
            ni: reader.read_u32()?,
            nj: reader.read_u32()?,
            basic_angle_of_the_initial_production_domain: reader.read_u32()?,
            subdivisions_of_basic_angle: reader.read_u32()?,
            latitude_of_first_grid_point: reader.read_i32()?,
            longitude_of_first_grid_point: reader.read_i32()?,
            resolution_and_component_flags: reader.read_u8()?,
            latitude_of_last_grid_point: reader.read_i32()?,
            longitude_of_last_grid_point: reader.read_i32()?,
            i_direction_increment: reader.read_u32()?,
            j_direction_increment: reader.read_u32()?,
            scanning_mode: reader.read_u8()?,
        })
    }

    /// Size in degrees of one unit of the angle fields: 10^-6 degrees unless
    /// a basic angle and its subdivisions are given.
    pub fn angle_unit(&self) -> f64 {
        match (
            self.basic_angle_of_the_initial_production_domain,
            self.subdivisions_of_basic_angle,
        ) {
            (0 | u32::MAX, _) | (_, 0 | u32::MAX) => 1e-6,
            (basic_angle, subdivisions) => f64::from(basic_angle) / f64::from(subdivisions),
        }
    }

    /// The grid with coordinates converted to degrees.
    pub fn grid(&self) -> LatLonGrid {
        let unit = self.angle_unit();
        LatLonGrid {
            ni: self.ni as usize,
            nj: self.nj as usize,
            first_point_lat: f64::from(self.latitude_of_first_grid_point) * unit,
            first_point_lon: f64::from(self.longitude_of_first_grid_point) * unit,
            last_point_lat: f64::from(self.latitude_of_last_grid_point) * unit,
            last_point_lon: f64::from(self.longitude_of_last_grid_point) * unit,
            scanning_mode: ScanningMode(self.scanning_mode),
        }
    }
}

/// Template part of the Grid Definition Section.
#[derive(Debug, Clone, PartialEq)]
pub enum GridDefinitionTemplate {
    LatLon(LatLonTemplate),
    Unsupported(RawTemplate),
}

impl_section_for_variants!(GridDefinitionTemplate {
    LatLon,
    Unsupported
});

#[derive(Debug, Clone, PartialEq)]
pub struct GridDefinitionSection {
    pub header: GridDefinitionHeader,
    pub template: GridDefinitionTemplate,
}

impl_section_for_pair!(GridDefinitionSection { header, template });

impl GridDefinitionSection {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let (bounds, section3_length, number_of_section) =
            begin_numbered_section(reader, GRID_DEFINITION_SECTION, 3)?;
        let header = GridDefinitionHeader {
            section3_length,
            number_of_section,
            source_of_grid_definition: reader.read_u8()?,
            number_of_data_points: reader.read_u32()?,
            number_of_octets_for_number_of_points: reader.read_u8()?,
            interpretation_of_number_of_points: reader.read_u8()?,
            grid_definition_template_number: reader.read_u16()?,
        };
        let length = section3_length as usize;

        let template =
            match GridDefinitionTemplateNumber::try_from(header.grid_definition_template_number) {
                Ok(GridDefinitionTemplateNumber::LatLon) => {
                    GridDefinitionTemplate::LatLon(LatLonTemplate::decode(reader)?)
                }
                _ => GridDefinitionTemplate::Unsupported(RawTemplate::new(
                    bounds.rest(reader, length)?,
                )),
            };

        reader.end_section(&bounds, length)?;
        Ok(Self { header, template })
    }

    /// Returns the grid geometry, or fails with [`GribError::NotSupported`]
    /// for grids this crate does not decode.
    pub fn grid_definition(&self) -> Result<GridDefinition, GribError> {
        let header = &self.header;
        if header.source_of_grid_definition != 0 {
            return Err(GribError::NotSupported(format!(
                "source of grid definition {}",
                header.source_of_grid_definition
            )));
        }
        if header.number_of_octets_for_number_of_points != 0 {
            return Err(GribError::NotSupported(
                "grids with a list of numbers of points".to_owned(),
            ));
        }

        match &self.template {
            GridDefinitionTemplate::LatLon(template) => {
                let grid = template.grid();
                grid.scanning_mode.check_supported()?;
                if grid.num_points() != Some(header.number_of_data_points as usize) {
                    return Err(GribError::InvalidValue(format!(
                        "grid of {} x {} points does not match numberOfDataPoints {}",
                        template.ni, template.nj, header.number_of_data_points
                    )));
                }
                Ok(GridDefinition::LatLon(grid))
            }
            GridDefinitionTemplate::Unsupported(_) => Err(GribError::NotSupported(format!(
                "grid definition template {}",
                describe::<GridDefinitionTemplateNumber, u16>(
                    header.grid_definition_template_number
                )
            ))),
        }
    }
}

grib_section! {
    /// Octets 1-9 of the Product Definition Section (Section 4).
    pub struct ProductDefinitionHeader("Product Definition Section") {
        section4_length: u32 => "section4Length",
        number_of_section: u8 => "numberOfSection",
        /// Number of coordinate values after template
        nv: u16 => "NV",
        /// Product definition template number (see Code Table 4.0)
        product_definition_template_number: u16 => "productDefinitionTemplateNumber",
    }
}

grib_section! {
    /// Product Definition Template 4.0: analysis or forecast at a horizontal
    /// level or in a horizontal layer at a point in time.
    pub struct AnalysisOrForecastTemplate("Product Definition Template 4.0") {
        /// Parameter category (see Code Table 4.1)
        parameter_category: u8 => "parameterCategory",
        /// Parameter number (see Code Table 4.2)
        parameter_number: u8 => "parameterNumber",
        type_of_generating_process: u8 => "typeOfGeneratingProcess",
        background_process: u8 => "backgroundProcess",
        generating_process_identifier: u8 => "generatingProcessIdentifier",
        hours_after_data_cutoff: u16 => "hoursAfterDataCutoff",
        minutes_after_data_cutoff: u8 => "minutesAfterDataCutoff",
        /// Indicator of unit of time range (see Code Table 4.4)
        indicator_of_unit_of_time_range: u8 => "indicatorOfUnitOfTimeRange",
        forecast_time: u32 => "forecastTime",
        type_of_first_fixed_surface: u8 => "typeOfFirstFixedSurface",
        scale_factor_of_first_fixed_surface: i8 => "scaleFactorOfFirstFixedSurface",
        scaled_value_of_first_fixed_surface: i32 => "scaledValueOfFirstFixedSurface",
        type_of_second_fixed_surface: u8 => "typeOfSecondFixedSurface",
        scale_factor_of_second_fixed_surface: i8 => "scaleFactorOfSecondFixedSurface",
        scaled_value_of_second_fixed_surface: i32 => "scaledValueOfSecondFixedSurface",
    }
}

impl AnalysisOrForecastTemplate {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            parameter_category: reader.read_u8()?,
            parameter_number: reader.read_u8()?,
            type_of_generating_process: reader.read_u8()?,
            background_process: reader.read_u8()?,
            generating_process_identifier: reader.read_u8()?,
            hours_after_data_cutoff: reader.read_u16()?,
            minutes_after_data_cutoff: reader.read_u8()?,
            indicator_of_unit_of_time_range: reader.read_u8()?,
            forecast_time: reader.read_u32()?,
            type_of_first_fixed_surface: reader.read_u8()?,
            scale_factor_of_first_fixed_surface: reader.read_i8()?,
            scaled_value_of_first_fixed_surface: reader.read_i32()?,
            type_of_second_fixed_surface: reader.read_u8()?,
            scale_factor_of_second_fixed_surface: reader.read_i8()?,
            scaled_value_of_second_fixed_surface: reader.read_i32()?,
        })
    }
}

/// Template part of the Product Definition Section.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductDefinitionTemplate {
    AnalysisOrForecast(AnalysisOrForecastTemplate),
    Unsupported(RawTemplate),
}

impl_section_for_variants!(ProductDefinitionTemplate {
    AnalysisOrForecast,
    Unsupported
});

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDefinitionSection {
    pub header: ProductDefinitionHeader,
    pub template: ProductDefinitionTemplate,
}

impl_section_for_pair!(ProductDefinitionSection { header, template });

impl ProductDefinitionSection {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let (bounds, section4_length, number_of_section) =
            begin_numbered_section(reader, PRODUCT_DEFINITION_SECTION, 4)?;
        let header = ProductDefinitionHeader {
            section4_length,
            number_of_section,
            nv: reader.read_u16()?,
            product_definition_template_number: reader.read_u16()?,
        };
        let length = section4_length as usize;

        let template = match ProductDefinitionTemplateNumber::try_from(
            header.product_definition_template_number,
        ) {
            Ok(ProductDefinitionTemplateNumber::AnalysisOrForecast) => {
                ProductDefinitionTemplate::AnalysisOrForecast(AnalysisOrForecastTemplate::decode(
                    reader,
                )?)
            }
            _ => ProductDefinitionTemplate::Unsupported(RawTemplate::new(
                bounds.rest(reader, length)?,
            )),
        };

        reader.end_section(&bounds, length)?;
        Ok(Self { header, template })
    }
}

grib_section! {
    /// Octets 1-11 of the Data Representation Section (Section 5).
    pub struct DataRepresentationHeader("Data Representation Section") {
        section5_length: u32 => "section5Length",
        number_of_section: u8 => "numberOfSection",
        /// Number of data points where one or more values are specified in
        /// Section 7 when a bit map is present, total number of data points
        /// when a bit map is absent
        number_of_values: u32 => "numberOfValues",
        /// Data representation template number (see Code Table 5.0)
        data_representation_template_number: u16 => "dataRepresentationTemplateNumber",
    }
}

grib_section! {
    /// Data Representation Template 5.0: grid point data, simple packing.
    pub struct SimplePackingTemplate("Data Representation Template 5.0") {
        /// Reference value (R)
        reference_value: f32 => "referenceValue",
        /// Binary scale factor (E)
        binary_scale_factor: i16 => "binaryScaleFactor",
        /// Decimal scale factor (D)
        decimal_scale_factor: i16 => "decimalScaleFactor",
        bits_per_value: u8 => "bitsPerValue",
        /// Type of original field values (see Code Table 5.1)
        type_of_original_field_values: u8 => "typeOfOriginalFieldValues",
    }
}

impl SimplePackingTemplate {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            reference_value: reader.read_ieee_f32()?,
            binary_scale_factor: reader.read_i16()?,
            decimal_scale_factor: reader.read_i16()?,
            bits_per_value: reader.read_u8()?,
            type_of_original_field_values: reader.read_u8()?,
        })
    }
}

/// Template part of the Data Representation Section.
#[derive(Debug, Clone, PartialEq)]
pub enum DataRepresentationTemplate {
    SimplePacking(SimplePackingTemplate),
    Unsupported(RawTemplate),
}

impl_section_for_variants!(DataRepresentationTemplate {
    SimplePacking,
    Unsupported
});

#[derive(Debug, Clone, PartialEq)]
pub struct DataRepresentationSection {
    pub header: DataRepresentationHeader,
    pub template: DataRepresentationTemplate,
}

impl_section_for_pair!(DataRepresentationSection { header, template });

impl DataRepresentationSection {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let (bounds, section5_length, number_of_section) =
            begin_numbered_section(reader, DATA_REPRESENTATION_SECTION, 5)?;
        let header = DataRepresentationHeader {
            section5_length,
            number_of_section,
            number_of_values: reader.read_u32()?,
            data_representation_template_number: reader.read_u16()?,
        };
        let length = section5_length as usize;

        let template = match DataRepresentationTemplateNumber::try_from(
            header.data_representation_template_number,
        ) {
            Ok(DataRepresentationTemplateNumber::SimplePacking) => {
                DataRepresentationTemplate::SimplePacking(SimplePackingTemplate::decode(reader)?)
            }
            _ => DataRepresentationTemplate::Unsupported(RawTemplate::new(
                bounds.rest(reader, length)?,
            )),
        };

        reader.end_section(&bounds, length)?;
        Ok(Self { header, template })
    }

    /// Returns the simple packing parameters, or fails with
    /// [`GribError::NotSupported`] for other packing schemes.
    pub fn simple_packing(&self) -> Result<&SimplePackingTemplate, GribError> {
        match &self.template {
            DataRepresentationTemplate::SimplePacking(template) => Ok(template),
            DataRepresentationTemplate::Unsupported(_) => Err(GribError::NotSupported(format!(
                "data representation template {}",
                describe::<DataRepresentationTemplateNumber, u16>(
                    self.header.data_representation_template_number
                )
            ))),
        }
    }
}

/// Value of `bitMapIndicator` meaning that no bit map applies.
pub const BITMAP_NOT_APPLIED: u8 = 255;
/// Value of `bitMapIndicator` meaning that a bit map follows.
pub const BITMAP_INCLUDED: u8 = 0;
/// Value of `bitMapIndicator` referring to a bit map of an earlier field.
pub const BITMAP_PREVIOUSLY_DEFINED: u8 = 254;

grib_section! {
    /// Bit-Map Section (Section 6).
    pub struct BitmapSection("Bit-Map Section") {
        section6_length: u32 => "section6Length",
        number_of_section: u8 => "numberOfSection",
        /// Bit-map indicator (see Code Table 6.0)
        bit_map_indicator: u8 => "bitMapIndicator",
    }
    extra {
        bitmap: Box<[u8]>,
    }
}

impl BitmapSection {
    /// The bit map of this section, one bit per grid point. `None` unless
    /// `bitMapIndicator` is 0.
    pub fn bitmap(&self) -> Option<&[u8]> {
        (self.bit_map_indicator == BITMAP_INCLUDED).then_some(&self.bitmap[..])
    }

    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let (bounds, section6_length, number_of_section) =
            begin_numbered_section(reader, BITMAP_SECTION, 6)?;
        let bit_map_indicator = reader.read_u8()?;
        let length = section6_length as usize;
        let bitmap = bounds.rest(reader, length)?.into();
        reader.end_section(&bounds, length)?;
        Ok(Self {
            section6_length,
            number_of_section,
            bit_map_indicator,
            bitmap,
        })
    }
}

grib_section! {
    /// Data Section (Section 7).
    pub struct DataSection("Data Section") {
        section7_length: u32 => "section7Length",
        number_of_section: u8 => "numberOfSection",
    }
    extra {
        payload: Box<[u8]>,
    }
}

impl DataSection {
    /// Packed data, laid out as the Data Representation Section specifies.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ParseError> {
        let (bounds, section7_length, number_of_section) =
            begin_numbered_section(reader, DATA_SECTION, 7)?;
        let length = section7_length as usize;
        let payload = bounds.rest(reader, length)?.into();
        reader.end_section(&bounds, length)?;
        Ok(Self {
            section7_length,
            number_of_section,
            payload,
        })
    }
}

/// All sections of an edition 2 message holding a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Grib2Sections {
    pub is: Indicator,
    pub ids: IdentificationSection,
    pub loc: Option<LocalUseSection>,
    pub gds: GridDefinitionSection,
    pub pds: ProductDefinitionSection,
    pub drs: DataRepresentationSection,
    pub bitmap: BitmapSection,
    pub data: DataSection,
    pub end: EndSection,
}

impl Grib2Sections {
    pub const SECTION_NAMES: &'static [&'static str] =
        &["is", "ids", "loc", "gds", "pds", "drs", "bitmap", "data", "end"];

    /// Looks a section up by its short name; see [`Self::SECTION_NAMES`].
    pub fn section(&self, name: &str) -> Option<&dyn Section> {
        match name {
            "is" => Some(&self.is),
            "ids" => Some(&self.ids),
            "loc" => self.loc.as_ref().map(|s| s as &dyn Section),
            "gds" => Some(&self.gds),
            "pds" => Some(&self.pds),
            "drs" => Some(&self.drs),
            "bitmap" => Some(&self.bitmap),
            "data" => Some(&self.data),
            "end" => Some(&self.end),
            _ => None,
        }
    }
}
