//! Command grammar
//!
//! Parses one framed line into a [`Command`]. Everything is validated before
//! a command is returned, so a caller that applies the result can never see
//! a half-valid update.

use core::fmt::Write;

use crate::TUBE_COUNT;

/// Wire value hosts send for a blank tube
pub const BLANK_DIGIT: u8 = 10;

/// Number of comma-separated fields after the `N` directive
const UPDATE_FIELDS: usize = 6;

/// Why an `N` line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The directive was not followed by a comma
    MissingSeparator,
    /// Wrong number of fields
    FieldCount,
    /// A field was not a decimal integer
    InvalidNumber,
    /// Tube index outside the chain
    IndexOutOfRange,
}

/// Validated tube update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TubeUpdate {
    /// Tube index, always `< TUBE_COUNT`
    pub index: u8,
    /// Digit to show, `None` for blank
    pub digit: Option<u8>,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Dim level, 0 = brightest
    pub dim: u8,
}

impl TubeUpdate {
    /// Whether the update energizes a cathode
    ///
    /// Only digits 0-9 light the tube; anything else on the wire is a blank.
    pub fn lit(&self) -> bool {
        self.digit.is_some()
    }

    /// Parse the part of an `N` line after the directive letter
    fn parse_fields(rest: &[u8]) -> Result<Self, ParseError> {
        let fields = match rest.split_first() {
            Some((b',', fields)) => fields,
            _ => return Err(ParseError::MissingSeparator),
        };

        let mut values = [0i64; UPDATE_FIELDS];
        let mut count = 0;
        for token in fields.split(|&b| b == b',') {
            if count == UPDATE_FIELDS {
                return Err(ParseError::FieldCount);
            }
            values[count] = parse_int(token)?;
            count += 1;
        }
        if count != UPDATE_FIELDS {
            return Err(ParseError::FieldCount);
        }

        let [index, digit, red, green, blue, dim] = values;

        if !(0..TUBE_COUNT as i64).contains(&index) {
            return Err(ParseError::IndexOutOfRange);
        }

        Ok(Self {
            index: index as u8,
            digit: if (0..=9).contains(&digit) {
                Some(digit as u8)
            } else {
                None
            },
            red: saturate(red),
            green: saturate(green),
            blue: saturate(blue),
            // Dim is not range checked; the low byte is what reaches the driver
            dim: dim as u8,
        })
    }
}

/// A command received from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `N,...` - update one tube
    Update(TubeUpdate),
    /// `A` - return to the attract animation
    ResumeAttract,
    /// `42` - diagnostic probe
    Probe,
}

impl Command {
    /// Parse a framed line
    ///
    /// Surrounding whitespace is ignored and the directive letter is
    /// case-insensitive. Returns `Ok(None)` for lines that are not commands
    /// at all; only a line that starts with `N` but is otherwise malformed
    /// produces an error.
    pub fn parse(line: &[u8]) -> Result<Option<Self>, ParseError> {
        let line = line.trim_ascii();
        match line {
            b"42" => return Ok(Some(Command::Probe)),
            b"A" | b"a" => return Ok(Some(Command::ResumeAttract)),
            _ => {}
        }

        match line.split_first() {
            Some((b'N' | b'n', rest)) => TubeUpdate::parse_fields(rest).map(|u| Some(Command::Update(u))),
            _ => Ok(None),
        }
    }

    /// Encode the command in its wire form, including the trailing newline
    ///
    /// This is what a host sends; blank digits go out as [`BLANK_DIGIT`].
    pub fn write_line<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        match self {
            Command::Update(u) => writeln!(
                out,
                "N,{},{},{},{},{},{}",
                u.index,
                u.digit.unwrap_or(BLANK_DIGIT),
                u.red,
                u.green,
                u.blue,
                u.dim
            ),
            Command::ResumeAttract => writeln!(out, "A"),
            Command::Probe => writeln!(out, "42"),
        }
    }
}

/// Parse a decimal field, saturating at the `i64` limits
///
/// Any run of digits is a number, however long; only the syntax can fail.
fn parse_int(token: &[u8]) -> Result<i64, ParseError> {
    let token = token.trim_ascii();
    let (negative, digits) = match token.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(ParseError::InvalidNumber);
    }

    let magnitude = digits.iter().fold(0i64, |acc, &d| {
        acc.saturating_mul(10).saturating_add((d - b'0') as i64)
    });
    Ok(if negative { -magnitude } else { magnitude })
}

fn saturate(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}
