use super::sign_magnitude;

/// Wraps `sections` into a message with a correct `totalLength`.
pub fn message(sections: &[Vec<u8>]) -> Vec<u8> {
    let body_len: usize = sections.iter().map(Vec::len).sum();
    message_with_total_length(sections, (16 + body_len + 4) as u64)
}

pub fn message_with_total_length(sections: &[Vec<u8>], total_length: u64) -> Vec<u8> {
    let mut buf = b"GRIB".to_vec();
    buf.extend_from_slice(&[0xff, 0xff, 0, 2]);
    buf.extend_from_slice(&total_length.to_be_bytes());
    for section in sections {
        buf.extend_from_slice(section);
    }
    buf.extend_from_slice(b"7777");
    buf
}

pub fn section(number: u8, body: &[u8]) -> Vec<u8> {
    let length = (5 + body.len()) as u32;
    let mut buf = length.to_be_bytes().to_vec();
    buf.push(number);
    buf.extend_from_slice(body);
    buf
}

pub fn ids(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Vec<u8> {
    let mut body = vec![0, 34, 0, 0, 5, 1, 1];
    body.extend_from_slice(&year.to_be_bytes());
    body.extend_from_slice(&[month, day, hour, minute, second, 0, 1]);
    section(1, &body)
}

pub fn local_use(payload: &[u8]) -> Vec<u8> {
    section(2, payload)
}

/// Grid Definition Section with template 3.0. Latitudes and longitudes are in
/// microdegrees.
pub fn lat_lon_gds(ni: u32, nj: u32, first: (i32, i32), last: (i32, i32), scan: u8) -> Vec<u8> {
    gds_template(0, ni * nj, &lat_lon_template(ni, nj, first, last, scan))
}

/// Octets 15-72 of template 3.0.
pub fn lat_lon_template(
    ni: u32,
    nj: u32,
    first: (i32, i32),
    last: (i32, i32),
    scan: u8,
) -> Vec<u8> {
    let mut template = vec![6];
    template.extend_from_slice(&[0; 15]);
    template.extend_from_slice(&ni.to_be_bytes());
    template.extend_from_slice(&nj.to_be_bytes());
    template.extend_from_slice(&[0; 8]);
    template.extend(sign_magnitude(first.0.into(), 4));
    template.extend(sign_magnitude(first.1.into(), 4));
    template.push(0x30);
    template.extend(sign_magnitude(last.0.into(), 4));
    template.extend(sign_magnitude(last.1.into(), 4));
    template.extend_from_slice(&2_000_000_u32.to_be_bytes());
    template.extend_from_slice(&2_000_000_u32.to_be_bytes());
    template.push(scan);
    template
}

pub fn gds_template(template_number: u16, num_points: u32, template: &[u8]) -> Vec<u8> {
    let mut body = vec![0];
    body.extend_from_slice(&num_points.to_be_bytes());
    body.extend_from_slice(&[0, 0]);
    body.extend_from_slice(&template_number.to_be_bytes());
    body.extend_from_slice(template);
    section(3, &body)
}

/// Product Definition Section with template 4.0: 2 m temperature forecast.
pub fn pds() -> Vec<u8> {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(&[0, 0, 2, 0, 96, 0, 0, 0, 1, 0, 0, 0, 6]);
    body.extend_from_slice(&[103, 0, 0, 0, 0, 2, 255, 0xff, 0xff, 0xff, 0xff, 0xff]);
    section(4, &body)
}

/// Data Representation Section with template 5.0.
pub fn drs_simple(
    num_values: u32,
    reference_value: f32,
    binary_scale_factor: i16,
    decimal_scale_factor: i16,
    bits_per_value: u8,
) -> Vec<u8> {
    let mut template = reference_value.to_be_bytes().to_vec();
    template.extend(sign_magnitude(binary_scale_factor.into(), 2));
    template.extend(sign_magnitude(decimal_scale_factor.into(), 2));
    template.extend_from_slice(&[bits_per_value, 0]);
    drs_template(num_values, 0, &template)
}

pub fn drs_template(num_values: u32, template_number: u16, template: &[u8]) -> Vec<u8> {
    let mut body = num_values.to_be_bytes().to_vec();
    body.extend_from_slice(&template_number.to_be_bytes());
    body.extend_from_slice(template);
    section(5, &body)
}

pub fn bitmap(indicator: u8, bits: &[u8]) -> Vec<u8> {
    let mut body = vec![indicator];
    body.extend_from_slice(bits);
    section(6, &body)
}

pub fn no_bitmap() -> Vec<u8> {
    bitmap(255, &[])
}

pub fn data(payload: &[u8]) -> Vec<u8> {
    section(7, payload)
}
