mod common;

use float_cmp::assert_approx_eq;
use gribkit::{
    GribError, LengthCheck, ParseError, Parser,
    edition2::{DataRepresentationTemplate, GridDefinitionTemplate},
};

use crate::common::{
    IBM_270_466796875, bitmap,
    grib1::{self, Grib1Message},
    grib2, pack_bits,
};

/// Sections 1 to 7 of a 16 x 31 field from 60N 0E to 0N 30E, scanned from
/// north to south, with values (270.5 + k % 256) / 10.
fn lat_lon_sections() -> Vec<Vec<u8>> {
    let values = (0..496).map(|k| k % 256).collect::<Vec<u32>>();
    let (payload, _) = pack_bits(&values, 8);
    vec![
        grib2::ids(2008, 2, 6, 12, 0, 0),
        grib2::lat_lon_gds(16, 31, (60_000_000, 0), (0, 30_000_000), 0),
        grib2::pds(),
        grib2::drs_simple(496, 270.5, 0, 1, 8),
        grib2::no_bitmap(),
        grib2::data(&payload),
    ]
}

fn lat_lon_message() -> Vec<u8> {
    grib2::message(&lat_lon_sections())
}

/// A message with a small grid, the given scanning mode and values 0 to 5 in
/// stream order.
fn scanned_message(ni: u32, nj: u32, scan: u8) -> Vec<u8> {
    let (payload, _) = pack_bits(&[0, 1, 2, 3, 4, 5], 8);
    grib2::message(&[
        grib2::ids(2008, 2, 6, 12, 0, 0),
        grib2::lat_lon_gds(ni, nj, (0, 0), (1_000_000, 2_000_000), scan),
        grib2::pds(),
        grib2::drs_simple(6, 0.0, 0, 0, 8),
        grib2::no_bitmap(),
        grib2::data(&payload),
    ])
}

macro_rules! test_unsigned_fields {
    ($(($name:ident, $section:expr, $key:expr, $expected:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let buf = lat_lon_message();
            let message = gribkit::parse(&buf)?;
            let section = message.section($section).ok_or("section not found")?;
            let value = section.field($key).and_then(|v| v.as_u64());
            assert_eq!(value, Some($expected));
            Ok(())
        }
    )*);
}

test_unsigned_fields! {
    (discipline, "is", "discipline", 0),
    (edition_number, "is", "editionNumber", 2),
    (section1_length, "ids", "section1Length", 21),
    (ids_number_of_section, "ids", "numberOfSection", 1),
    (centre, "ids", "centre", 34),
    (year, "ids", "year", 2008),
    (type_of_processed_data, "ids", "typeOfProcessedData", 1),
    (section3_length, "gds", "section3Length", 72),
    (number_of_data_points, "gds", "numberOfDataPoints", 496),
    (grid_definition_template_number, "gds", "gridDefinitionTemplateNumber", 0),
    (ni, "gds", "Ni", 16),
    (nj, "gds", "Nj", 31),
    (latitude_of_first_grid_point, "gds", "latitudeOfFirstGridPoint", 60_000_000),
    (section4_length, "pds", "section4Length", 34),
    (nv, "pds", "NV", 0),
    (forecast_time, "pds", "forecastTime", 6),
    (section5_length, "drs", "section5Length", 21),
    (number_of_values, "drs", "numberOfValues", 496),
    (bits_per_value, "drs", "bitsPerValue", 8),
    (section6_length, "bitmap", "section6Length", 6),
    (bit_map_indicator, "bitmap", "bitMapIndicator", 255),
    (section7_length, "data", "section7Length", 501),
}

#[test]
fn literal_fields_and_total_length() -> Result<(), Box<dyn std::error::Error>> {
    let buf = lat_lon_message();
    let message = gribkit::parse(&buf)?;
    assert_eq!(message.edition(), 2);
    assert_eq!(message.total_length(), buf.len() as u64);

    let is = message.section("is").ok_or("no IS")?;
    assert_eq!(
        is.fieldnames(),
        vec!["identifier", "discipline", "editionNumber", "totalLength"]
    );
    assert_eq!(
        is.field("identifier").and_then(|v| v.as_bytes()),
        Some(&b"GRIB"[..])
    );
    assert_eq!(
        is.field("totalLength").and_then(|v| v.as_u64()),
        Some(buf.len() as u64)
    );
    let end = message.section("end").ok_or("no end section")?;
    assert_eq!(
        end.field("endOfMessage").and_then(|v| v.as_bytes()),
        Some(&b"7777"[..])
    );
    Ok(())
}

#[test]
fn section_names() -> Result<(), Box<dyn std::error::Error>> {
    let buf = lat_lon_message();
    let message = gribkit::parse(&buf)?;
    assert_eq!(
        message.section_names(),
        vec!["is", "ids", "gds", "pds", "drs", "bitmap", "data", "end"]
    );
    assert!(message.section("loc").is_none());
    assert!(message.as_edition1().is_none());

    let ids = message.section("ids").ok_or("no IDS")?;
    assert_eq!(ids.fieldnames().len(), 15);
    let data = message.section("data").ok_or("no data section")?;
    assert_eq!(data.fieldnames(), vec!["section7Length", "numberOfSection"]);
    Ok(())
}

#[test]
fn local_use_section() -> Result<(), Box<dyn std::error::Error>> {
    let mut sections = lat_lon_sections();
    sections.insert(1, grib2::local_use(&[1, 2, 3, 4]));
    let buf = grib2::message(&sections);
    let message = gribkit::parse(&buf)?;
    assert_eq!(
        message.section_names(),
        vec!["is", "ids", "loc", "gds", "pds", "drs", "bitmap", "data", "end"]
    );
    let sections = message.as_edition2().ok_or("not edition 2")?;
    let loc = sections.loc.as_ref().ok_or("no local use section")?;
    assert_eq!(loc.section2_length, 9);
    assert_eq!(loc.payload(), &[1, 2, 3, 4]);
    Ok(())
}

#[test]
fn time() -> Result<(), Box<dyn std::error::Error>> {
    let buf = lat_lon_message();
    let message = gribkit::parse(&buf)?;
    assert_eq!(message.get_time()?.to_string(), "2008-02-06 12:00:00");
    Ok(())
}

#[test]
fn coordinates() -> Result<(), Box<dyn std::error::Error>> {
    let buf = lat_lon_message();
    let message = gribkit::parse(&buf)?;
    let grid = message.grid_definition()?;
    assert_eq!(grid.short_name(), "regular_ll");
    assert_eq!(grid.grid_shape(), (16, 31));

    let (lons, lats) = message.get_coordinates()?;
    assert_eq!(lons.shape(), &[31, 16]);
    for ((j, i), lon) in lons.indexed_iter() {
        assert_approx_eq!(f64, *lon, 2.0 * i as f64, epsilon = 1e-9);
        assert_approx_eq!(f64, lats[[j, i]], 60.0 - 2.0 * j as f64, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn values() -> Result<(), Box<dyn std::error::Error>> {
    let buf = lat_lon_message();
    let message = gribkit::parse(&buf)?;
    let values = message.get_values()?;
    assert_eq!(values.shape(), &[31, 16]);
    for ((j, i), value) in values.indexed_iter() {
        let k = (j * 16 + i) % 256;
        assert_approx_eq!(f64, *value, (270.5 + k as f64) / 10.0, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn north_south_scanning_flips_rows() -> Result<(), Box<dyn std::error::Error>> {
    let grib2_buf = lat_lon_message();
    let grib2_message = gribkit::parse(&grib2_buf)?;

    let gds = grib1::lat_lon_gds(16, 31, (0, 0), (60000, 30000), 0b01000000);
    let grib1_buf = Grib1Message::new(Some(gds), grib1::constant_bds(IBM_270_466796875)).build();
    let grib1_message = gribkit::parse(&grib1_buf)?;

    let (lons2, lats2) = grib2_message.get_coordinates()?;
    let (lons1, lats1) = grib1_message.get_coordinates()?;
    let flipped_lats1 = lats1.slice(ndarray::s![..;-1, ..]);
    let flipped_lons1 = lons1.slice(ndarray::s![..;-1, ..]);
    for ((index, lat2), lon2) in lats2.indexed_iter().zip(lons2.iter()) {
        assert_approx_eq!(f64, *lat2, flipped_lats1[index], epsilon = 0.0005);
        assert_approx_eq!(f64, *lon2, flipped_lons1[index], epsilon = 0.0005);
    }
    Ok(())
}

macro_rules! test_scanning_order {
    ($(($name:ident, $ni:expr, $nj:expr, $scan:expr, $expected:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let buf = scanned_message($ni, $nj, $scan);
            let message = gribkit::parse(&buf)?;
            let values = message.get_values()?;
            let expected: ndarray::Array2<f64> = $expected;
            assert_eq!(values, expected);
            Ok(())
        }
    )*);
}

test_scanning_order! {
    (
        scanning_i_consecutive,
        3,
        2,
        0b01000000,
        ndarray::array![[0., 1., 2.], [3., 4., 5.]]
    ),
    (
        scanning_j_consecutive,
        2,
        3,
        0b01100000,
        ndarray::array![[0., 3.], [1., 4.], [2., 5.]]
    ),
    (
        scanning_alternating_rows,
        3,
        2,
        0b01010000,
        ndarray::array![[0., 1., 2.], [5., 4., 3.]]
    ),
    (
        scanning_alternating_columns,
        2,
        3,
        0b01110000,
        ndarray::array![[0., 5.], [1., 4.], [2., 3.]]
    ),
}

#[test]
fn unsupported_scanning_mode() -> Result<(), Box<dyn std::error::Error>> {
    let buf = scanned_message(3, 2, 0b01000001);
    let message = gribkit::parse(&buf)?;
    assert!(matches!(
        message.get_coordinates(),
        Err(GribError::NotSupported(_))
    ));
    Ok(())
}

#[test]
fn values_with_bitmap() -> Result<(), Box<dyn std::error::Error>> {
    let present = [true, false, false, true, true, false];
    let (payload, _) = pack_bits(&[7, 8, 9], 8);
    let buf = grib2::message(&[
        grib2::ids(2008, 2, 6, 12, 0, 0),
        grib2::lat_lon_gds(3, 2, (0, 0), (1_000_000, 2_000_000), 0b01000000),
        grib2::pds(),
        grib2::drs_simple(3, 0.0, 0, 0, 8),
        grib2::bitmap(0, &bitmap(&present)),
        grib2::data(&payload),
    ]);
    let message = gribkit::parse(&buf)?;
    let values = message.get_values()?;
    assert_eq!(values[[0, 0]], 7.0);
    assert!(values[[0, 1]].is_nan());
    assert!(values[[0, 2]].is_nan());
    assert_eq!(values[[1, 0]], 8.0);
    assert_eq!(values[[1, 1]], 9.0);
    assert!(values[[1, 2]].is_nan());
    Ok(())
}

#[test]
fn previously_defined_bitmap_is_not_supported() -> Result<(), Box<dyn std::error::Error>> {
    let mut sections = lat_lon_sections();
    sections[4] = grib2::bitmap(254, &[]);
    let buf = grib2::message(&sections);
    let message = gribkit::parse(&buf)?;
    assert!(message.get_coordinates().is_ok());
    assert_eq!(
        message.get_values(),
        Err(GribError::NotSupported("bit map indicator 254".to_owned()))
    );
    Ok(())
}

#[test]
fn constant_field() -> Result<(), Box<dyn std::error::Error>> {
    let mut sections = lat_lon_sections();
    sections[3] = grib2::drs_simple(496, 1.5, 0, 0, 0);
    sections[5] = grib2::data(&[]);
    let buf = grib2::message(&sections);
    let message = gribkit::parse(&buf)?;
    let values = message.get_values()?;
    assert_eq!(values.shape(), &[31, 16]);
    assert!(values.iter().all(|v| *v == 1.5));
    Ok(())
}

#[test]
fn unsupported_grid_template() -> Result<(), Box<dyn std::error::Error>> {
    let mut sections = lat_lon_sections();
    sections[1] = grib2::gds_template(40, 496, &[0; 58]);
    let buf = grib2::message(&sections);
    let message = gribkit::parse(&buf)?;

    let gds = message.as_edition2().ok_or("not edition 2")?.gds.clone();
    assert!(matches!(
        gds.template,
        GridDefinitionTemplate::Unsupported(ref raw) if raw.bytes().len() == 58
    ));

    let before = message.clone();
    assert!(matches!(
        message.get_coordinates(),
        Err(GribError::NotSupported(_))
    ));
    assert!(matches!(
        message.get_values(),
        Err(GribError::NotSupported(_))
    ));
    assert_eq!(message, before);
    assert!(message.get_time().is_ok());
    Ok(())
}

#[test]
fn unsupported_data_representation_template() -> Result<(), Box<dyn std::error::Error>> {
    let mut sections = lat_lon_sections();
    sections[3] = grib2::drs_template(496, 3, &[0; 38]);
    let buf = grib2::message(&sections);
    let message = gribkit::parse(&buf)?;

    let sections = message.as_edition2().ok_or("not edition 2")?;
    assert!(matches!(
        sections.drs.template,
        DataRepresentationTemplate::Unsupported(_)
    ));
    assert!(message.get_coordinates().is_ok());
    assert_eq!(
        message.get_values(),
        Err(GribError::NotSupported(
            "data representation template ComplexPackingWithSpatialDifferencing (3)".to_owned()
        ))
    );
    Ok(())
}

#[test]
fn too_few_values_for_grid() -> Result<(), Box<dyn std::error::Error>> {
    let mut sections = lat_lon_sections();
    sections[5] = grib2::data(&[0; 100]);
    let buf = grib2::message(&sections);
    let message = gribkit::parse(&buf)?;
    assert!(matches!(
        message.get_values(),
        Err(GribError::InvalidValue(_))
    ));
    Ok(())
}

#[test]
fn grid_larger_than_number_of_data_points_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let mut sections = lat_lon_sections();
    let template = grib2::lat_lon_template(
        u32::MAX,
        u32::MAX,
        (60_000_000, 0),
        (0, 30_000_000),
        0,
    );
    sections[1] = grib2::gds_template(0, 496, &template);
    sections[3] = grib2::drs_simple(496, 1.5, 0, 0, 0);
    sections[5] = grib2::data(&[]);
    let buf = grib2::message(&sections);
    let message = gribkit::parse(&buf)?;

    assert!(matches!(
        message.get_values(),
        Err(GribError::InvalidValue(_))
    ));
    assert!(matches!(
        message.get_coordinates(),
        Err(GribError::InvalidValue(_))
    ));
    assert!(matches!(
        message.get_geographic_coordinates(),
        Err(GribError::InvalidValue(_))
    ));
    Ok(())
}

#[test]
fn accessors_are_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let buf = lat_lon_message();
    let message = gribkit::parse(&buf)?;
    assert_eq!(message.get_time()?, message.get_time()?);
    assert_eq!(message.get_coordinates()?, message.get_coordinates()?);
    assert_eq!(message.get_values()?, message.get_values()?);
    Ok(())
}

#[test]
fn truncated_messages_fail() {
    let buf = lat_lon_message();
    for len in 0..buf.len() {
        assert!(
            matches!(
                gribkit::parse(&buf[..len]),
                Err(ParseError::TruncatedInput { .. })
            ),
            "truncated to {len} bytes"
        );
    }
}

#[test]
fn second_field_is_malformed() {
    let mut sections = lat_lon_sections();
    let repeated = sections[1..].to_vec();
    sections.extend(repeated);
    let buf = grib2::message(&sections);
    assert!(matches!(
        gribkit::parse(&buf),
        Err(ParseError::MalformedSection {
            section: "End Section",
            ..
        })
    ));
}

#[test]
fn sections_out_of_order_are_malformed() {
    let mut sections = lat_lon_sections();
    sections.swap(2, 3);
    let buf = grib2::message(&sections);
    assert!(matches!(
        gribkit::parse(&buf),
        Err(ParseError::MalformedSection {
            section: "Product Definition Section",
            ..
        })
    ));
}

#[test]
fn total_length_mismatch() {
    let sections = lat_lon_sections();
    let actual = lat_lon_message().len() as u64;
    let buf = grib2::message_with_total_length(&sections, actual + 2);

    testing_logger::setup();
    assert!(gribkit::parse(&buf).is_ok());
    testing_logger::validate(|captured_logs| {
        assert!(
            captured_logs
                .iter()
                .any(|log| log.level == log::Level::Warn && log.body.contains("totalLength"))
        );
    });

    let parser = Parser::new().length_check(LengthCheck::Strict);
    assert_eq!(
        parser.parse(&buf),
        Err(ParseError::TotalLengthMismatch {
            declared: actual + 2,
            actual
        })
    );
}
