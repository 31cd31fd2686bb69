use std::fmt;

/// Money is stored as integer cents to avoid floating-point drift in the
/// running revenue aggregates. R$ 50,00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a decimal currency string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse a decimal currency string into cents. Accepts both `.` and `,` as
/// the decimal separator ("50.00", "50,00", "50"), with at most two decimal
/// digits (extra digits are truncated).
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let negative = input.starts_with('-');
    let input = input.trim_start_matches('-').replace(',', ".");

    let parts: Vec<&str> = input.split('.').collect();
    let cents = match parts.as_slice() {
        [units] => {
            let units: i64 = units.parse().map_err(|_| ParseCentsError::InvalidFormat)?;
            units * 100
        }
        [units, decimals] => {
            let units: i64 = if units.is_empty() {
                0
            } else {
                units.parse().map_err(|_| ParseCentsError::InvalidFormat)?
            };
            let decimal_cents: i64 = match decimals.len() {
                0 => 0,
                1 => {
                    decimals
                        .parse::<i64>()
                        .map_err(|_| ParseCentsError::InvalidFormat)?
                        * 10
                }
                2 => decimals.parse().map_err(|_| ParseCentsError::InvalidFormat)?,
                _ => decimals[..2]
                    .parse()
                    .map_err(|_| ParseCentsError::InvalidFormat)?,
            };
            units * 100 + decimal_cents
        }
        _ => return Err(ParseCentsError::InvalidFormat),
    };

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
