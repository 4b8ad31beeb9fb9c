//! Physical units attached to keywords and columns.
//!
//! Units come in two flavours. The angle, wavelength and frequency
//! families carry a reference unit and conversion factors; the
//! remaining units (time, proper motion) are advisory display tokens
//! with no reference, for which [`Unit::convert`] is a pass-through.

use crate::error::{Error, Result};

/// Speed of light in vacuum (m/s), used by the frequency-to-wavelength
/// conversions.
pub const C_LIGHT: f64 = 299_792_458.0;

/// A physical unit recognised in OIFITS headers and tables.
///
/// All values exist once, at compile time, and are immutable. Parsing
/// is alias-based and case-insensitive: `"deg"`, `"degree"` and
/// `"DEGREES"` all resolve to [`Unit::Degree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// No unit associated.
    NoUnit,
    /// Angle in radians (reference of the angle family).
    Radian,
    /// Angle in degrees.
    Degree,
    /// Angle in arcminutes.
    ArcMinute,
    /// Angle in arcseconds.
    ArcSecond,
    /// Wavelength in meters (reference of the wavelength family).
    Meter,
    /// Wavelength in micrometers.
    MicroMeter,
    /// Wavelength in nanometers.
    NanoMeter,
    /// Frequency in hertz; converts to meters through `c / f`.
    Hertz,
    /// Frequency in kilohertz.
    KiloHertz,
    /// Frequency in megahertz.
    MegaHertz,
    /// Frequency in gigahertz.
    GigaHertz,
    /// Time in seconds.
    Second,
    /// Modified Julian Date expressed in days.
    Day,
    /// Time in years.
    Year,
    /// Time in hours.
    Hour,
    /// Velocity in meters per second.
    MeterPerSecond,
    /// Proper motion in degrees per year.
    DegreePerYear,
}

/// All units, in alias-lookup order.
const ALL_UNITS: [Unit; 18] = [
    Unit::NoUnit,
    Unit::Radian,
    Unit::Degree,
    Unit::ArcMinute,
    Unit::ArcSecond,
    Unit::Meter,
    Unit::MicroMeter,
    Unit::NanoMeter,
    Unit::Hertz,
    Unit::KiloHertz,
    Unit::MegaHertz,
    Unit::GigaHertz,
    Unit::Second,
    Unit::Day,
    Unit::Year,
    Unit::Hour,
    Unit::MeterPerSecond,
    Unit::DegreePerYear,
];

impl Unit {
    /// Accepted string tokens for this unit. The first token is the
    /// canonical symbol returned by [`Unit::symbol`].
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            Unit::NoUnit => &[""],
            Unit::Radian => &["rad", "radian", "radians"],
            Unit::Degree => &["deg", "degree", "degrees"],
            Unit::ArcMinute => &["arcmin", "arcmins"],
            Unit::ArcSecond => &["arcsec", "arcsecs"],
            Unit::Meter => &["m", "meter", "meters"],
            Unit::MicroMeter => &["micron", "microns", "micrometer", "micrometers"],
            Unit::NanoMeter => &["nm", "nanometer", "nanometers"],
            Unit::Hertz => &["hz", "hertz"],
            Unit::KiloHertz => &["khz", "kilohertz"],
            Unit::MegaHertz => &["mhz", "megahertz"],
            Unit::GigaHertz => &["ghz", "gigahertz"],
            Unit::Second => &["s", "sec", "second", "seconds"],
            Unit::Day => &["day", "days"],
            Unit::Year => &["yr", "year", "years"],
            Unit::Hour => &["h", "hour", "hours"],
            Unit::MeterPerSecond => &[
                "m/s",
                "m / s",
                "meter per second",
                "meters per second",
                "meter/second",
                "meters/second",
                "meter / second",
                "meters / second",
            ],
            Unit::DegreePerYear => &[
                "deg/yr",
                "deg / yr",
                "deg/year",
                "deg / year",
                "degree/yr",
                "degrees/yr",
                "degree/year",
                "degrees/year",
            ],
        }
    }

    /// The canonical symbol, i.e. the first accepted token.
    pub fn symbol(self) -> &'static str {
        self.tokens()[0]
    }

    /// The reference unit this unit converts into, if any.
    pub fn reference(self) -> Option<Unit> {
        match self {
            Unit::Degree | Unit::ArcMinute | Unit::ArcSecond => Some(Unit::Radian),
            Unit::MicroMeter
            | Unit::NanoMeter
            | Unit::Hertz
            | Unit::KiloHertz
            | Unit::MegaHertz
            | Unit::GigaHertz => Some(Unit::Meter),
            _ => None,
        }
    }

    /// Linear factor applied last when converting to the reference.
    fn factor(self) -> f64 {
        match self {
            Unit::Degree => core::f64::consts::PI / 180.0,
            Unit::ArcMinute => core::f64::consts::PI / 180.0 / 60.0,
            Unit::ArcSecond => core::f64::consts::PI / 180.0 / 3600.0,
            Unit::MicroMeter => 1e-6,
            Unit::NanoMeter => 1e-9,
            Unit::Hertz | Unit::KiloHertz | Unit::MegaHertz | Unit::GigaHertz => C_LIGHT,
            _ => 1.0,
        }
    }

    /// Exponent of the power law applied before the linear factor.
    fn power(self) -> Option<f64> {
        match self {
            Unit::Hertz | Unit::KiloHertz | Unit::MegaHertz | Unit::GigaHertz => Some(-1.0),
            _ => None,
        }
    }

    /// Pre-multiplier applied to the value before raising to the power.
    fn power_factor(self) -> Option<f64> {
        match self {
            Unit::KiloHertz => Some(1e3),
            Unit::MegaHertz => Some(1e6),
            Unit::GigaHertz => Some(1e9),
            _ => None,
        }
    }

    /// Case-insensitive alias lookup across all units.
    ///
    /// An empty token resolves to [`Unit::NoUnit`]; an unknown token
    /// fails with [`Error::UnsupportedUnit`].
    pub fn parse(token: &str) -> Result<Unit> {
        if token.is_empty() {
            return Ok(Unit::NoUnit);
        }
        for unit in ALL_UNITS {
            if unit.matches(token) {
                return Ok(unit);
            }
        }
        Err(Error::UnsupportedUnit(token.into()))
    }

    /// Returns `true` if `token` is one of this unit's aliases.
    pub fn matches(self, token: &str) -> bool {
        self.tokens().iter().any(|t| t.eq_ignore_ascii_case(token))
    }

    /// Convert `value` expressed in this unit into `target`.
    ///
    /// A unit with no reference returns `value` unchanged whatever the
    /// target: the no-reference family has nothing to convert and the
    /// permissive pass-through is intentional. With a reference, the
    /// conversion applies the optional power law first, then the
    /// linear factor; requesting any target other than the reference
    /// fails with [`Error::IncompatibleUnits`].
    pub fn convert(self, value: f64, target: Unit) -> Result<f64> {
        let Some(reference) = self.reference() else {
            return Ok(value);
        };
        if reference != target {
            return Err(Error::IncompatibleUnits {
                from: self.symbol(),
                to: target.symbol(),
            });
        }
        let mut output = value;
        if let Some(power) = self.power() {
            if let Some(pre) = self.power_factor() {
                output *= pre;
            }
            output = output.powf(power);
        }
        Ok(self.factor() * output)
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}
