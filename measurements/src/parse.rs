//! Scanner that turns a `"(x,y)"` string back into a [`Location`].
//!
//! The rules are deliberately narrow:
//!
//! 1. skip everything up to the first ASCII digit,
//! 2. take digits and `.` for the x field,
//! 3. skip up to the next ASCII digit,
//! 4. take digits and `.` for the y field,
//! 5. parse both fields as `f64`.
//!
//! A `-` is just another separator, so negative coordinates come back
//! positive. End of input finishes whichever field is being read.

use std::error::Error;
use std::fmt;
use std::num::ParseFloatError;

use crate::location::Location;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Why a string could not be read as a [`Location`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseLocationError {
    /// The input ran out before a digit was found for this field.
    MissingField { axis: Axis },
    /// A field was found but is not a valid number, e.g. `1.2.3`.
    InvalidNumber {
        axis: Axis,
        text: String,
        source: ParseFloatError,
    },
}

impl ParseLocationError {
    pub fn axis(&self) -> Axis {
        match self {
            ParseLocationError::MissingField { axis } => *axis,
            ParseLocationError::InvalidNumber { axis, .. } => *axis,
        }
    }
}

impl fmt::Display for ParseLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseLocationError::MissingField { axis } => {
                write!(f, "malformed input: no numeric field found for {}", axis)
            }
            ParseLocationError::InvalidNumber { axis, text, .. } => {
                write!(f, "malformed input: {} field '{}' is not a number", axis, text)
            }
        }
    }
}

impl Error for ParseLocationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseLocationError::MissingField { .. } => None,
            ParseLocationError::InvalidNumber { source, .. } => Some(source),
        }
    }
}

#[inline(always)]
fn is_field_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// Finds the next field at or after `from`.
/// Returns the byte range of the field, or `None` if no digit is left.
fn next_field(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let start = from + bytes.get(from..)?.iter().position(u8::is_ascii_digit)?;
    let len = bytes[start..].iter().take_while(|&&b| is_field_byte(b)).count();
    Some((start, start + len))
}

/// Locates the raw x and y fields without converting them.
///
/// The returned slices borrow from `text`. Both are guaranteed to start with a
/// digit and contain only digits and periods.
pub fn scan_fields(text: &str) -> Result<(&str, &str), ParseLocationError> {
    let bytes = text.as_bytes();
    let (x_start, x_end) =
        next_field(bytes, 0).ok_or(ParseLocationError::MissingField { axis: Axis::X })?;
    // The byte that ended the x field is never a digit, so the search can start right after it.
    let (y_start, y_end) = next_field(bytes, x_end + 1)
        .ok_or(ParseLocationError::MissingField { axis: Axis::Y })?;
    // Field bytes are ASCII, so these are valid char boundaries.
    Ok((&text[x_start..x_end], &text[y_start..y_end]))
}

fn parse_field(axis: Axis, field: &str) -> Result<f64, ParseLocationError> {
    field
        .parse::<f64>()
        .map_err(|source| ParseLocationError::InvalidNumber {
            axis,
            text: field.to_string(),
            source,
        })
}

/// Reads the first two numeric fields of `text` as `(x, y)`.
pub fn parse_location(text: &str) -> Result<Location, ParseLocationError> {
    let (x_field, y_field) = scan_fields(text)?;
    log::trace!("Scanned location fields x='{}' y='{}' from '{}'", x_field, y_field, text);
    let x = parse_field(Axis::X, x_field)?;
    let y = parse_field(Axis::Y, y_field)?;
    Ok(Location::new(x, y))
}
