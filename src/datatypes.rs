use std::{
    fmt::{self, Debug, Display, Formatter},
    io::{self, Write},
};

use crate::decoder::NBitwiseIterator;

/// A decoded section of a GRIB message.
///
/// Each section type has a fixed, enumerable set of field names (the GRIB key
/// names such as `"section1Length"` or `"Ni"`); for template-dependent
/// sections the set is fixed per template.
pub trait Section: Debug {
    /// Human-readable name of the section, e.g. `"Product Definition Section"`.
    fn name(&self) -> &'static str;

    /// Names of all fields of this section, in octet order.
    fn fieldnames(&self) -> Vec<&'static str>;

    /// Returns the value of the field named `name`, or `None` if this section
    /// has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Writes one `name = value` line per field. Fields of nested structures
    /// are written with a `parent.child` prefix.
    fn dump(&self, output: &mut dyn Write) -> io::Result<()> {
        dump_fields(self, None, output)
    }
}

fn dump_fields<S: Section + ?Sized>(
    section: &S,
    parent: Option<&str>,
    output: &mut dyn Write,
) -> io::Result<()> {
    for name in section.fieldnames() {
        let qualified = match parent {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_owned(),
        };
        match section.field(name) {
            Some(FieldValue::Nested(nested)) => dump_fields(nested, Some(&qualified), output)?,
            Some(value) => writeln!(output, "{qualified} = {value}")?,
            None => {}
        }
    }
    Ok(())
}

/// Value of a single section field.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    /// Fixed-length literal such as `b"GRIB"` or `b"7777"`.
    Bytes(&'a [u8]),
    /// A field that decomposes into sub-fields.
    Nested(&'a dyn Section),
    /// Packed grid values, decoded on demand.
    Packed(&'a PackedValues),
    /// The field exists but holds no value (e.g. `values` of a constant field).
    Absent,
}

impl<'a> FieldValue<'a> {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Unsigned(v) => Some(*v),
            Self::Signed(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Unsigned(v) => i64::try_from(*v).ok(),
            Self::Signed(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Unsigned(v) => Some(*v as f64),
            Self::Signed(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&'a dyn Section> {
        match self {
            Self::Nested(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_packed(&self) -> Option<&'a PackedValues> {
        match self {
            Self::Packed(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl Display for FieldValue<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Signed(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bytes(v) if v.iter().all(|b| b.is_ascii_graphic()) => {
                write!(f, "b\"{}\"", String::from_utf8_lossy(v))
            }
            Self::Bytes(v) => write!(f, "{v:02x?}"),
            Self::Nested(v) => write!(f, "<{}>", v.name()),
            Self::Packed(v) => write!(
                f,
                "<{} values packed in {} bits>",
                v.len(),
                v.bits_per_value()
            ),
            Self::Absent => write!(f, "None"),
        }
    }
}

/// Conversion of a struct member into a [`FieldValue`].
pub(crate) trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue<'_>;
}

macro_rules! add_impl_for_field_types {
    ($variant:ident as $target:ty: $($ty:ty,)*) => ($(
        impl AsFieldValue for $ty {
            fn as_field_value(&self) -> FieldValue<'_> {
                FieldValue::$variant(<$target>::from(*self))
            }
        }
    )*);
}

add_impl_for_field_types!(Unsigned as u64: u8, u16, u32, u64,);
add_impl_for_field_types!(Signed as i64: i8, i16, i32, i64,);
add_impl_for_field_types!(Float as f64: f32, f64,);

impl<const N: usize> AsFieldValue for [u8; N] {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bytes(self)
    }
}

impl AsFieldValue for Option<PackedValues> {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(values) => FieldValue::Packed(values),
            None => FieldValue::Absent,
        }
    }
}

/// Defines a section struct whose public members map one-to-one onto GRIB
/// field names, and implements [`Section`] for it.
///
/// Members listed in the optional `extra` block are kept private and are not
/// exposed as fields.
macro_rules! grib_section {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($section_name:literal) {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty => $key:literal,
            )*
        }
        $(extra {
            $(
                $(#[$extra_meta:meta])*
                $extra:ident: $extra_ty:ty,
            )*
        })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
            $($(
                $(#[$extra_meta])*
                pub(crate) $extra: $extra_ty,
            )*)?
        }

        impl $name {
            pub const FIELDNAMES: &'static [&'static str] = &[$($key),*];
        }

        impl $crate::datatypes::Section for $name {
            fn name(&self) -> &'static str {
                $section_name
            }

            fn fieldnames(&self) -> Vec<&'static str> {
                Self::FIELDNAMES.to_vec()
            }

            fn field(&self, name: &str) -> Option<$crate::datatypes::FieldValue<'_>> {
                match name {
                    $($key => Some($crate::datatypes::AsFieldValue::as_field_value(&self.$field)),)*
                    _ => None,
                }
            }
        }
    };
}
pub(crate) use grib_section;

/// Implements [`Section`] for a struct made of two sections, whose fields are
/// those of the first followed by those of the second.
macro_rules! impl_section_for_pair {
    ($name:ident { $first:ident, $second:ident }) => {
        impl $crate::datatypes::Section for $name {
            fn name(&self) -> &'static str {
                $crate::datatypes::Section::name(&self.$first)
            }

            fn fieldnames(&self) -> Vec<&'static str> {
                let mut names = $crate::datatypes::Section::fieldnames(&self.$first);
                names.extend($crate::datatypes::Section::fieldnames(&self.$second));
                names
            }

            fn field(&self, name: &str) -> Option<$crate::datatypes::FieldValue<'_>> {
                $crate::datatypes::Section::field(&self.$first, name)
                    .or_else(|| $crate::datatypes::Section::field(&self.$second, name))
            }
        }
    };
}
pub(crate) use impl_section_for_pair;

/// Implements [`Section`] for an enum whose variants each wrap a section.
macro_rules! impl_section_for_variants {
    ($name:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::datatypes::Section for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(inner) => $crate::datatypes::Section::name(inner),)*
                }
            }

            fn fieldnames(&self) -> Vec<&'static str> {
                match self {
                    $(Self::$variant(inner) => $crate::datatypes::Section::fieldnames(inner),)*
                }
            }

            fn field(&self, name: &str) -> Option<$crate::datatypes::FieldValue<'_>> {
                match self {
                    $(Self::$variant(inner) => $crate::datatypes::Section::field(inner, name),)*
                }
            }
        }
    };
}
pub(crate) use impl_section_for_variants;

/// A stream of fixed-width unsigned integers, one per encoded grid point.
///
/// The payload is kept packed; values are extracted on iteration.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PackedValues {
    payload: Box<[u8]>,
    bits_per_value: u8,
    num_values: usize,
}

impl PackedValues {
    /// Creates a stream over `payload`, whose last `unused_bits` bits are
    /// padding.
    pub(crate) fn new(payload: Box<[u8]>, bits_per_value: u8, unused_bits: usize) -> Self {
        let available_bits = (payload.len() * 8).saturating_sub(unused_bits);
        let num_values = available_bits / usize::from(bits_per_value.max(1));
        Self {
            payload,
            bits_per_value,
            num_values,
        }
    }

    pub fn bits_per_value(&self) -> u8 {
        self.bits_per_value
    }

    pub(crate) fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Number of complete values held in the payload.
    pub fn len(&self) -> usize {
        self.num_values
    }

    pub fn is_empty(&self) -> bool {
        self.num_values == 0
    }

    /// Returns an iterator over the packed integers.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        NBitwiseIterator::new(&self.payload[..], usize::from(self.bits_per_value))
            .take(self.num_values)
    }
}

impl Debug for PackedValues {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("PackedValues")
            .field("bits_per_value", &self.bits_per_value)
            .field("num_values", &self.num_values)
            .finish_non_exhaustive()
    }
}
