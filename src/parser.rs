use crate::{
    error::ParseError,
    message::{Message, MessageSections},
    reader::ByteReader,
    sections::{
        END_MAGIC, EndSection, GRIB_MAGIC,
        edition1::{self, Grib1Sections},
        edition2::{self, Grib2Sections},
    },
};

/// Octet of the Indicator Section holding the edition number, common to both
/// editions.
const EDITION_NUMBER_OFFSET: usize = 7;

/// What to do when the `totalLength` declared in the Indicator Section differs
/// from the number of bytes actually decoded.
///
/// Some legacy producers round message lengths to even byte boundaries, so a
/// mismatch is tolerated by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LengthCheck {
    /// Log a warning and accept the message.
    #[default]
    Warn,
    /// Fail with [`ParseError::TotalLengthMismatch`].
    Strict,
    /// Accept the message silently.
    Ignore,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub length_check: LengthCheck,
}

/// A configurable GRIB message parser.
///
/// # Examples
///
/// ```
/// use gribkit::{LengthCheck, ParseError, Parser};
///
/// let parser = Parser::new().length_check(LengthCheck::Strict);
/// assert_eq!(parser.parse(b"BUFR\x00\x00\x00\x04"), Err(ParseError::NotGrib));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn length_check(mut self, length_check: LengthCheck) -> Self {
        self.options.length_check = length_check;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decodes the single GRIB message held by `buf`.
    pub fn parse(&self, buf: &[u8]) -> Result<Message, ParseError> {
        let mut reader = ByteReader::new(buf);
        if reader.peek_bytes(GRIB_MAGIC.len())? != GRIB_MAGIC {
            return Err(ParseError::NotGrib);
        }

        let edition = reader.peek_bytes(EDITION_NUMBER_OFFSET + 1)?[EDITION_NUMBER_OFFSET];
        log::debug!("decoding GRIB edition {edition} message of {} bytes", buf.len());
        let (sections, declared_length) = match edition {
            1 => {
                let sections = parse_edition1(&mut reader)?;
                let length = u64::from(sections.is.total_length);
                (MessageSections::Edition1(sections), length)
            }
            2 => {
                let sections = parse_edition2(&mut reader)?;
                let length = sections.is.total_length;
                (MessageSections::Edition2(sections), length)
            }
            _ => return Err(ParseError::UnsupportedEdition(edition)),
        };

        self.check_total_length(declared_length, reader.tell() as u64)?;
        Ok(Message::new(sections))
    }

    fn check_total_length(&self, declared: u64, actual: u64) -> Result<(), ParseError> {
        if declared == actual {
            return Ok(());
        }
        match self.options.length_check {
            LengthCheck::Warn => {
                log::warn!(
                    "totalLength in Indicator Section is {declared} but {actual} bytes were decoded"
                );
                Ok(())
            }
            LengthCheck::Strict => Err(ParseError::TotalLengthMismatch { declared, actual }),
            LengthCheck::Ignore => Ok(()),
        }
    }
}

/// Decodes the single GRIB message held by `buf` with default options.
///
/// See [`Parser`] for configurable parsing.
pub fn parse(buf: &[u8]) -> Result<Message, ParseError> {
    Parser::new().parse(buf)
}

fn parse_edition1(reader: &mut ByteReader<'_>) -> Result<Grib1Sections, ParseError> {
    let is = edition1::Indicator::decode(reader)?;
    let pds = edition1::ProductDefinition::decode(reader)?;
    let gds = if pds.standard().has_gds() {
        Some(edition1::GridDescriptionSection::decode(reader)?)
    } else {
        None
    };
    let bms = if pds.standard().has_bms() {
        Some(edition1::BitMapSection::decode(reader)?)
    } else {
        None
    };
    let bds = edition1::BinaryDataSection::decode(reader)?;
    let end = EndSection::decode(reader)?;
    Ok(Grib1Sections {
        is,
        pds,
        gds,
        bms,
        bds,
        end,
    })
}

fn parse_edition2(reader: &mut ByteReader<'_>) -> Result<Grib2Sections, ParseError> {
    let is = edition2::Indicator::decode(reader)?;
    let ids = edition2::IdentificationSection::decode(reader)?;
    let loc = if next_section_number(reader)? == Some(2) {
        Some(edition2::LocalUseSection::decode(reader)?)
    } else {
        None
    };
    let gds = edition2::GridDefinitionSection::decode(reader)?;
    let pds = edition2::ProductDefinitionSection::decode(reader)?;
    let drs = edition2::DataRepresentationSection::decode(reader)?;
    let bitmap = edition2::BitmapSection::decode(reader)?;
    let data = edition2::DataSection::decode(reader)?;
    if let Some(number) = next_section_number(reader)? {
        return Err(ParseError::malformed(
            "End Section",
            format!("found Section {number}; messages with more than one field are not supported"),
        ));
    }
    let end = EndSection::decode(reader)?;
    Ok(Grib2Sections {
        is,
        ids,
        loc,
        gds,
        pds,
        drs,
        bitmap,
        data,
        end,
    })
}

/// Returns the number of the section starting at the current position, or
/// `None` at the End Section.
fn next_section_number(reader: &ByteReader<'_>) -> Result<Option<u8>, ParseError> {
    if reader.peek_bytes(END_MAGIC.len())? == END_MAGIC {
        return Ok(None);
    }
    let header = reader.peek_bytes(5)?;
    Ok(Some(header[4]))
}
