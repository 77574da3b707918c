//! Station identity types.

use std::fmt;

use super::DomainError;

/// Longest station code we accept.
const MAX_CODE_LEN: usize = 5;

/// Shortest station code we accept.
const MIN_CODE_LEN: usize = 2;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid station code, 2 to 5 uppercase ASCII letters.
///
/// Codes such as `MAS`, `MV` or `CBE` identify stations in the registry.
/// This type guarantees that any `StationCode` value is well formed by
/// construction; whether it names a known station is the registry's concern.
///
/// # Examples
///
/// ```
/// use journey_server::domain::StationCode;
///
/// let mas = StationCode::parse("MAS").unwrap();
/// assert_eq!(mas.as_str(), "MAS");
///
/// // Two-letter codes are fine
/// assert!(StationCode::parse("MV").is_ok());
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("mas").is_err());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("M").is_err());
/// assert!(StationCode::parse("CHENNAI").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode {
    bytes: [u8; MAX_CODE_LEN],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 2 to 5 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&bytes.len()) {
            return Err(InvalidStationCode {
                reason: "must be 2 to 5 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        let mut code = [0u8; MAX_CODE_LEN];
        code[..bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            bytes: code,
            len: bytes.len() as u8,
        })
    }

    /// Parse user input, tolerating surrounding whitespace and lowercase.
    ///
    /// ```
    /// use journey_server::domain::StationCode;
    ///
    /// assert_eq!(StationCode::parse_normalized(" tpj ").unwrap().as_str(), "TPJ");
    /// ```
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates(
                "latitude must be between -90 and 90",
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates(
                "longitude must be between -180 and 180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A station known to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub coordinates: Coordinates,
}

impl Station {
    pub fn new(code: StationCode, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            code,
            name: name.into(),
            coordinates,
        }
    }
}
