use crate::error::IngestError;
use crate::spreadsheet::reference::index_to_reference;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Timelike;
use std::fmt::Display;

/// Content types a worksheet cell can declare.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Plain numeric values
    Number,
    /// Date/time values stored as serial numbers from the 1900 epoch
    NumberDateTime1900,
    /// Date values stored as serial numbers from the 1900 epoch
    NumberDate1900,
    /// Time values stored as serial numbers from the 1900 epoch
    NumberTime1900,
    /// Date/time values stored as serial numbers from the 1904 epoch
    NumberDateTime1904,
    /// Date values stored as serial numbers from the 1904 epoch
    NumberDate1904,
    /// Time values stored as serial numbers from the 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Strings resolved from the shared string table
    SharedString,
    /// Error values (#DIV/0!, #N/A, ...)
    Error,
}

impl CellType {
    /// Maps built-in Excel number format ids to date/time cell types.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Scans a custom number format code for date/time patterns.
    /// Escaped characters, quoted literals and color blocks do not count.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' if !is_escaped => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_literal && !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_color && !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        if is_date && is_time {
            if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }
        } else if is_date {
            if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }
        } else if is_time {
            if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }
        } else {
            Self::Number
        }
    }

    /// Whether the cell's number format marks it as a date or time value.
    pub(crate) fn is_date_format(&self) -> bool {
        matches!(
            self,
            Self::NumberDateTime1900
                | Self::NumberDate1900
                | Self::NumberTime1900
                | Self::NumberDateTime1904
                | Self::NumberDate1904
                | Self::NumberTime1904
                | Self::IsoDateTime
        )
    }

    fn is_1904(&self) -> bool {
        matches!(
            self,
            Self::NumberDateTime1904 | Self::NumberDate1904 | Self::NumberTime1904
        )
    }
}

/// One typed cell value, as seen by callers.
///
/// Blank covers empty, error and unrecognized cells alike; it renders as the
/// empty string, so extracted rows never distinguish the three.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDateTime),
    /// The literal formula expression, never its evaluated result
    Formula(String),
    Blank,
}

impl CellValue {
    /// Whether the value renders as the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Number(number) => write!(f, "{}", number),
            CellValue::Boolean(boolean) => write!(f, "{}", boolean),
            CellValue::Date(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Formula(formula) => write!(f, "{}", formula),
            CellValue::Blank => Ok(()),
        }
    }
}

/// A single worksheet cell: position, declared type, raw text and the
/// formula expression when one is attached.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Declared content type, refined by the number format
    pub(crate) kind: CellType,
    /// Raw cell content as stored in the worksheet part
    pub(crate) value: String,
    /// Literal formula text when the cell carries one
    pub(crate) formula: Option<String>,
}

impl Cell {
    /// Returns the A1-style cell reference (e.g. "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Classifies the cell into one tagged value.
    ///
    /// Formula cells surface their expression unless the number format marks
    /// them as dates, in which case the cached result is read as a date.
    /// Error and unrecognized cells come back Blank. A numeric cell whose raw
    /// content does not parse is reported as a recoverable read failure.
    pub fn resolve(&self, sheet: &str) -> Result<CellValue, IngestError> {
        if let Some(formula) = &self.formula {
            if self.kind.is_date_format() {
                let datetime = self.to_datetime().ok_or_else(|| self.read_error(sheet))?;
                return Ok(CellValue::Date(datetime));
            }
            return Ok(CellValue::Formula(formula.trim().to_owned()));
        }

        match self.kind {
            CellType::Empty => Ok(CellValue::Blank),
            CellType::InlineString | CellType::SharedString => {
                Ok(CellValue::Text(self.value.trim().to_owned()))
            }
            CellType::Number => self
                .to_double()
                .map(CellValue::Number)
                .ok_or_else(|| self.read_error(sheet)),
            CellType::Boolean => Ok(CellValue::Boolean(self.to_boolean())),
            CellType::NumberDateTime1900
            | CellType::NumberDate1900
            | CellType::NumberTime1900
            | CellType::NumberDateTime1904
            | CellType::NumberDate1904
            | CellType::NumberTime1904
            | CellType::IsoDateTime => self
                .to_datetime()
                .map(CellValue::Date)
                .ok_or_else(|| self.read_error(sheet)),
            CellType::Error => Ok(CellValue::Blank),
        }
    }

    /// Renders the cell the way a spreadsheet application would display it.
    /// Used by the streaming pass, which emits formatted text per cell;
    /// formula cells format their cached result here.
    pub(crate) fn formatted(&self, sheet: &str) -> Result<String, IngestError> {
        match self.kind {
            CellType::Empty | CellType::Error => Ok(String::new()),
            CellType::InlineString | CellType::SharedString => Ok(self.value.to_owned()),
            CellType::Number => Ok(self.value.to_owned()),
            CellType::Boolean => Ok(if self.to_boolean() { "true" } else { "false" }.to_owned()),
            CellType::NumberDate1900 | CellType::NumberDate1904 => {
                let datetime = self.to_datetime().ok_or_else(|| self.read_error(sheet))?;
                Ok(datetime.format("%Y-%m-%d").to_string())
            }
            CellType::NumberTime1900 | CellType::NumberTime1904 => {
                let datetime = self.to_datetime().ok_or_else(|| self.read_error(sheet))?;
                Ok(format_time(datetime.time()))
            }
            CellType::NumberDateTime1900 | CellType::NumberDateTime1904 => {
                let datetime = self.to_datetime().ok_or_else(|| self.read_error(sheet))?;
                Ok(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            CellType::IsoDateTime => Ok(self.value.replace('T', " ")),
        }
    }

    /// Converts the raw content to a boolean ("1" is true, anything else false).
    pub(crate) fn to_boolean(&self) -> bool {
        self.value == "1"
    }

    /// Parses the raw content as a double, if it is one.
    pub(crate) fn to_double(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }

    /// Converts the raw content to a date/time value, honoring the serial
    /// number epoch (1900 or 1904) or the ISO string form.
    pub(crate) fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self.kind {
            CellType::IsoDateTime => parse_iso_datetime(&self.value),
            _ => serial_to_datetime(self.to_double()?, self.kind.is_1904()),
        }
    }

    fn read_error(&self, sheet: &str) -> IngestError {
        IngestError::CellRead {
            sheet: sheet.to_owned(),
            reference: self.reference(),
            value: self.value.to_owned(),
        }
    }
}

/// Converts an Excel serial number to a date/time value.
/// Serial day 0 is 1899-12-30 (1900 epoch) or 1904-01-01 (1904 epoch); days
/// below 60 shift by one to absorb the Lotus 1-2-3 leap-year bug.
pub(crate) fn serial_to_datetime(value: f64, is_1904: bool) -> Option<NaiveDateTime> {
    let days = value.trunc() as i64;
    let days = days
        + if is_1904 {
            1462
        } else if days < 60 {
            1
        } else {
            0
        };
    let date = NaiveDate::from_ymd_opt(1899, 12, 30)? + Duration::days(days);
    let microseconds = (value.fract() * 86_400_000_000f64).round() as i64;
    Some(date.and_time(NaiveTime::MIN) + Duration::microseconds(microseconds))
}

/// Parses an ISO 8601 cell value, with or without a time component.
fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    }
}

/// Formats a time of day, appending milliseconds only when present.
fn format_time(time: NaiveTime) -> String {
    if time.nanosecond() == 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%H:%M:%S%.3f").to_string()
    }
}
