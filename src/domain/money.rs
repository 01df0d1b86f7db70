use std::fmt;

/// Amounts are held as integer cents so balances replay exactly.
/// 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Render cents with exactly two decimals: 6000 -> "60.00", -5 -> "-0.05".
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}

/// Parse a user-entered decimal amount into cents.
///
/// Accepts `"100"`, `"12.5"`, `".50"` and a leading sign. Digits past the
/// second decimal place are truncated, so `"100.999"` is 10099 cents.
/// The sign is kept: rejecting non-positive amounts is the ledger's job.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseCentsError::TooLarge)?
    };

    let mut fraction_cents = 0;
    for (position, digit) in fraction.bytes().take(2).enumerate() {
        let value = i64::from(digit - b'0');
        fraction_cents += if position == 0 { value * 10 } else { value };
    }

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction_cents))
        .ok_or(ParseCentsError::TooLarge)?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    TooLarge,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid amount format, use '50.00' or '50'"),
            ParseCentsError::TooLarge => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
