//! Fixed-width array layout: header grammar, row wrapping and field codecs
//!
//! An array block body starts with a header line such as
//!
//! ```text
//! 7         (6E14.6)
//! ```
//!
//! declaring the element count, the number of fields per row, the element
//! type letter (`A`, `E` or `I`), the field width and, for floats, the number
//! of fractional digits. The values follow in `count / columns` full rows and
//! one shorter row holding the remainder, if any. Each field is a fixed-width
//! slice of its line; fields are never delimiter-separated.

use crate::ado::lines::Location;
use crate::ado::value::{ArrayValues, ElementKind};
use crate::error::Error;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Default number of fields per row
pub const DEFAULT_COLUMN_COUNT: usize = 6;
/// Default field width in characters
pub const DEFAULT_FIELD_WIDTH: usize = 14;
/// Default number of fractional digits for floats
pub const DEFAULT_PRECISION: usize = 6;

/// Width of the left-justified count field in array headers
const COUNT_FIELD_WIDTH: usize = 10;

/// Upper bound on buffers sized from a declared element count
pub(crate) const PREALLOCATE_LIMIT: usize = 4096;

#[allow(clippy::expect_used)] // Literal pattern, covered by tests
static ARRAY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<count>\d+)\s*\((?P<ncols>\d+)(?P<atype>[A-Za-z])(?P<width>\d+)(?:\.(?P<precision>\d+))?\)\s*$",
    )
    .expect("array header pattern is valid")
});

/// Errors from the pure layout codec, lifted into [`Error`] by the reader
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Header line does not follow the `<N>(<ncols><T><width>[.<p>])` grammar
    #[error("malformed array header {line:?}: {reason}")]
    MalformedHeader {
        /// Offending header line
        line: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// Header type letter is not A, E or I
    #[error("unsupported array element type '{0}'")]
    UnsupportedElement(char),

    /// Data row is narrower than the fields it must hold
    #[error("array row {row} has {found} characters, expected at least {expected}")]
    RowTooShort {
        /// 0-based row index within the array
        row: usize,
        /// Characters present
        found: usize,
        /// Characters required
        expected: usize,
    },

    /// A field could not be parsed as its element kind
    #[error("invalid {kind} value {value:?} in array row {row}, column {column}")]
    InvalidValue {
        /// 0-based row index within the array
        row: usize,
        /// 0-based column index within the row
        column: usize,
        /// Element kind expected
        kind: ElementKind,
        /// Raw field text
        value: String,
    },

    /// Fewer rows were supplied than the header requires
    #[error("array ended after {found} rows, expected {expected}")]
    MissingRows {
        /// Rows required
        expected: usize,
        /// Rows supplied
        found: usize,
    },

    /// Decoded element count differs from the declared count
    #[error("decoded {found} values, header declared {expected}")]
    CountMismatch {
        /// Count from the header
        expected: usize,
        /// Count decoded
        found: usize,
    },

    /// Formatted element is wider than its field
    #[error("value {value} does not fit in a field of width {width}")]
    FieldOverflow {
        /// Formatted element
        value: String,
        /// Field width
        width: usize,
    },
}

impl LayoutError {
    /// 0-based row index the error refers to, if any
    pub const fn row(&self) -> Option<usize> {
        match self {
            Self::RowTooShort { row, .. } | Self::InvalidValue { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Attach a location, producing a crate error
    pub fn at(self, location: Location) -> Error {
        match self {
            Self::UnsupportedElement(element) => Error::UnsupportedElementType { location, element },
            Self::FieldOverflow { value, width } => Error::FieldOverflow { value, width },
            other => Error::Format {
                location,
                reason: other.to_string(),
            },
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        err.at(Location::new("<array>", 0))
    }
}

/// Caller-supplied options for encoding arrays
///
/// Only array blocks are affected; scalars always use their fixed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Fields per row
    pub column_count: usize,
    /// Characters per field
    pub field_width: usize,
    /// Fractional digits for float elements
    pub precision: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            column_count: DEFAULT_COLUMN_COUNT,
            field_width: DEFAULT_FIELD_WIDTH,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl LayoutOptions {
    /// Set the number of fields per row
    #[must_use]
    pub const fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }

    /// Set the field width
    #[must_use]
    pub const fn with_field_width(mut self, field_width: usize) -> Self {
        self.field_width = field_width;
        self
    }

    /// Set the float precision
    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Check that the options describe a usable layout
    pub fn validate(&self) -> Result<(), Error> {
        if self.column_count == 0 {
            return Err(Error::InvalidLayout(
                "column count must be at least 1".to_string(),
            ));
        }
        if self.field_width == 0 {
            return Err(Error::InvalidLayout(
                "field width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Array layout descriptor parsed from, or written to, an array header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayFormat {
    /// Fields per row, at least 1
    pub column_count: usize,
    /// Element type
    pub element_kind: ElementKind,
    /// Characters per field, at least 1
    pub field_width: usize,
    /// Fractional digits; only floats carry one
    pub precision: Option<usize>,
}

impl ArrayFormat {
    /// Layout for encoding elements of `kind` with the given options
    pub const fn for_kind(kind: ElementKind, options: &LayoutOptions) -> Self {
        let precision = match kind {
            ElementKind::Float => Some(options.precision),
            ElementKind::Int | ElementKind::Text => None,
        };
        Self {
            column_count: options.column_count,
            element_kind: kind,
            field_width: options.field_width,
            precision,
        }
    }

    /// Parse an array header line into the element count and layout
    ///
    /// # Examples
    ///
    /// ```
    /// use adoflo_formats::ado::{ArrayFormat, ElementKind};
    ///
    /// let (count, format) = ArrayFormat::parse_header("7         (6E14.6)")?;
    /// assert_eq!(count, 7);
    /// assert_eq!(format.column_count, 6);
    /// assert_eq!(format.element_kind, ElementKind::Float);
    /// assert_eq!(format.field_width, 14);
    /// assert_eq!(format.precision, Some(6));
    /// # Ok::<(), adoflo_formats::ado::LayoutError>(())
    /// ```
    pub fn parse_header(line: &str) -> Result<(usize, Self), LayoutError> {
        let malformed = |reason| LayoutError::MalformedHeader {
            line: line.to_string(),
            reason,
        };

        let caps = ARRAY_HEADER
            .captures(line)
            .ok_or_else(|| malformed("expected <count>(<columns><type><width>[.<precision>])"))?;
        let number = |name: &str| -> Result<Option<usize>, LayoutError> {
            caps.name(name)
                .map(|m| m.as_str().parse::<usize>())
                .transpose()
                .map_err(|_| malformed("number out of range"))
        };

        let count = number("count")?.ok_or_else(|| malformed("missing count"))?;
        let column_count = number("ncols")?.ok_or_else(|| malformed("missing column count"))?;
        let field_width = number("width")?.ok_or_else(|| malformed("missing field width"))?;
        let precision = number("precision")?;

        let letter = caps
            .name("atype")
            .and_then(|m| m.as_str().chars().next())
            .ok_or_else(|| malformed("missing element type"))?
            .to_ascii_uppercase();
        let element_kind =
            ElementKind::from_code(letter).ok_or(LayoutError::UnsupportedElement(letter))?;

        if column_count == 0 {
            return Err(malformed("column count must be at least 1"));
        }
        if field_width == 0 {
            return Err(malformed("field width must be at least 1"));
        }
        if column_count.checked_mul(field_width).is_none() {
            return Err(malformed("row width out of range"));
        }
        if precision.is_some() && element_kind != ElementKind::Float {
            return Err(malformed("only float arrays carry a precision"));
        }

        Ok((
            count,
            Self {
                column_count,
                element_kind,
                field_width,
                precision,
            },
        ))
    }

    /// Header line for an array of `count` elements in this layout
    pub fn header_line(&self, count: usize) -> String {
        format!("{count:<width$}{self}", width = COUNT_FIELD_WIDTH)
    }

    /// Number of data rows an array of `count` elements occupies
    pub const fn row_count(&self, count: usize) -> usize {
        count.div_ceil(self.column_count)
    }

    /// Field counts of each data row: full rows, then the remainder row
    pub fn row_lengths(&self, count: usize) -> impl Iterator<Item = usize> {
        let full_rows = count / self.column_count;
        let remainder = count % self.column_count;
        std::iter::repeat_n(self.column_count, full_rows).chain((remainder > 0).then_some(remainder))
    }

    /// Decode the data rows of an array of `count` elements
    ///
    /// Exactly [`row_count`](Self::row_count) rows are taken from `rows`.
    pub fn decode_rows<'a, I>(&self, count: usize, rows: I) -> Result<ArrayValues, LayoutError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values =
            ArrayValues::with_capacity(self.element_kind, count.min(PREALLOCATE_LIMIT));
        let mut rows = rows.into_iter();
        let expected_rows = self.row_count(count);

        for (row, fields) in self.row_lengths(count).enumerate() {
            let line = rows.next().ok_or(LayoutError::MissingRows {
                expected: expected_rows,
                found: row,
            })?;
            self.decode_row(line, row, fields, &mut values)?;
        }

        if values.len() != count {
            return Err(LayoutError::CountMismatch {
                expected: count,
                found: values.len(),
            });
        }
        Ok(values)
    }

    /// Decode `fields` fixed-width fields from one data row
    ///
    /// Field widths count characters, not bytes.
    pub fn decode_row(
        &self,
        line: &str,
        row: usize,
        fields: usize,
        values: &mut ArrayValues,
    ) -> Result<(), LayoutError> {
        let width = self.field_width;
        let expected = fields.saturating_mul(width);
        let found = line.chars().count();
        if found < expected {
            return Err(LayoutError::RowTooShort {
                row,
                found,
                expected,
            });
        }

        let mut rest = line;
        for column in 0..fields {
            let end = rest
                .char_indices()
                .nth(width)
                .map_or(rest.len(), |(offset, _)| offset);
            let (field, tail) = rest.split_at(end);
            rest = tail;
            let invalid = || LayoutError::InvalidValue {
                row,
                column,
                kind: self.element_kind,
                value: field.to_string(),
            };
            match values {
                ArrayValues::Int(out) => {
                    out.push(field.trim().parse::<i64>().map_err(|_| invalid())?);
                }
                ArrayValues::Float(out) => {
                    out.push(parse_float(field).ok_or_else(invalid)?);
                }
                ArrayValues::Text(out) => out.push(field.trim().to_string()),
            }
        }
        Ok(())
    }

    /// Encode array elements as data rows, one `\n`-terminated line per row
    pub fn encode_rows(&self, values: &ArrayValues) -> Result<String, LayoutError> {
        let width = self.field_width;
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        match values {
            ArrayValues::Int(items) => {
                self.encode_with(items, |value| format!("{value:>width$}"))
            }
            ArrayValues::Float(items) => self.encode_with(items, |value| {
                format!("{:>width$}", format_scientific(*value, precision))
            }),
            ArrayValues::Text(items) => {
                self.encode_with(items, |value| format!("{value:<width$}"))
            }
        }
    }

    fn encode_with<T>(
        &self,
        items: &[T],
        format_field: impl Fn(&T) -> String,
    ) -> Result<String, LayoutError> {
        let row_width = self
            .column_count
            .saturating_mul(self.field_width)
            .saturating_add(1);
        let mut body = String::with_capacity(
            self.row_count(items.len())
                .saturating_mul(row_width)
                .min(PREALLOCATE_LIMIT * DEFAULT_FIELD_WIDTH),
        );
        for row in items.chunks(self.column_count) {
            for item in row {
                let field = format_field(item);
                if field.chars().count() > self.field_width {
                    return Err(LayoutError::FieldOverflow {
                        value: field.trim().to_string(),
                        width: self.field_width,
                    });
                }
                body.push_str(&field);
            }
            body.push('\n');
        }
        Ok(body)
    }
}

impl fmt::Display for ArrayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{}{}",
            self.column_count,
            self.element_kind.code(),
            self.field_width
        )?;
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        f.write_str(")")
    }
}

/// Parse a float field, accepting Fortran `D` exponents
fn parse_float(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(['D', 'd'], "E").parse::<f64>().ok())
}

/// Format a float as `+d.dddddE+XX`: explicit sign, two-digit minimum exponent
///
/// # Examples
///
/// ```
/// use adoflo_formats::ado::format_scientific;
///
/// assert_eq!(format_scientific(12.3456, 6), "+1.234560E+01");
/// assert_eq!(format_scientific(-0.00025, 3), "-2.500E-04");
/// assert_eq!(format_scientific(0.0, 6), "+0.000000E+00");
/// ```
pub fn format_scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "+NAN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "+INF" } else { "-INF" }.to_string();
    }

    let formatted = format!("{value:+.precision$e}");
    let parts = formatted
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));
    match parts {
        Some((mantissa, exponent)) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
        }
        None => formatted,
    }
}
