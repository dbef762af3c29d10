//! Code tables the decoder dispatches on.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Edition 1, Table 6: data representation type of the Grid Description
/// Section.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DataRepresentationType {
    LatLon = 0,
    Mercator,
    Gnomonic,
    LambertConformal,
    Gaussian,
    PolarStereographic,
    UniversalTransverseMercator,
    SimplePolyconic,
    AlbersEqualArea,
    MillerCylindrical,
    RotatedLatLon,
    ObliqueLambertConformal = 13,
    RotatedGaussian,
    StretchedLatLon = 20,
    StretchedGaussian = 24,
    StretchedRotatedLatLon = 30,
    StretchedRotatedGaussian = 34,
    SphericalHarmonic = 50,
    RotatedSphericalHarmonic = 60,
    StretchedSphericalHarmonic = 70,
    StretchedRotatedSphericalHarmonic = 80,
    SpaceView = 90,
}

/// Edition 2, Code Table 3.1: grid definition template number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum GridDefinitionTemplateNumber {
    LatLon = 0,
    RotatedLatLon,
    StretchedLatLon,
    StretchedRotatedLatLon,
    VariableResolutionLatLon,
    VariableResolutionRotatedLatLon,
    Mercator = 10,
    TransverseMercator = 12,
    PolarStereographic = 20,
    LambertConformal = 30,
    AlbersEqualArea = 31,
    Gaussian = 40,
    RotatedGaussian,
    StretchedGaussian,
    StretchedRotatedGaussian,
    SphericalHarmonic = 50,
    SpaceView = 90,
    TriangularGrid = 100,
    UnstructuredGrid = 101,
    Missing = 65535,
}

/// Edition 2, Code Table 4.0: product definition template number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum ProductDefinitionTemplateNumber {
    AnalysisOrForecast = 0,
    IndividualEnsembleForecast,
    DerivedEnsembleForecast,
    Probability = 5,
    Percentile,
    AnalysisError,
    StatisticallyProcessed,
    Missing = 65535,
}

/// Edition 2, Code Table 5.0: data representation template number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum DataRepresentationTemplateNumber {
    SimplePacking = 0,
    MatrixSimplePacking,
    ComplexPacking,
    ComplexPackingWithSpatialDifferencing,
    IeeeFloatingPoint,
    Jpeg2000 = 40,
    Png,
    Ccsds,
    SpectralSimplePacking = 50,
    SpectralComplexPacking,
    RunLength = 200,
    Missing = 65535,
}

/// Describes a code for error messages: the table entry name if known,
/// otherwise the raw number.
pub(crate) fn describe<T, N>(code: N) -> String
where
    T: TryFrom<N> + std::fmt::Debug,
    N: Copy + std::fmt::Display,
{
    match T::try_from(code) {
        Ok(entry) => format!("{entry:?} ({code})"),
        Err(_) => format!("unknown ({code})"),
    }
}
