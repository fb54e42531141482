//! Lenient value parsing shared by inference and coercion.

use chrono::NaiveDate;

/// Date patterns probed in order. ISO first, then the common regional
/// spreadsheet formats.
pub const DATE_PATTERNS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
];

/// Currency symbols recognized by the currency detector and coercion.
pub const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// A parsed numeric value plus the formatting observed on the way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedNumber {
    pub value: f64,
    /// True when `,` acted as the decimal separator.
    pub decimal_comma: bool,
    /// True when the string carried thousands grouping.
    pub grouped: bool,
}

/// Parses a numeric string, tolerating thousands separators and either
/// decimal separator.
///
/// Grouping is only honored when the digits actually group in threes
/// ("1,234,567"); a lone "3,5" reads as a decimal comma instead.
pub fn parse_number(raw: &str) -> Option<ParsedNumber> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
        return None;
    }

    let has_comma = body.contains(',');
    let has_dot = body.contains('.');

    let (normalized, decimal_comma, grouped) = if has_comma && has_dot {
        // The later separator is the decimal one.
        let last_comma = body.rfind(',').unwrap_or(0);
        let last_dot = body.rfind('.').unwrap_or(0);
        if last_dot > last_comma {
            (body.replace(',', ""), false, true)
        } else {
            (body.replace('.', "").replace(',', "."), true, true)
        }
    } else if has_comma {
        if groups_in_threes(body, ',') {
            (body.replace(',', ""), false, true)
        } else if body.matches(',').count() == 1 {
            (body.replace(',', "."), true, false)
        } else {
            return None;
        }
    } else if has_dot && groups_in_threes(body, '.') {
        (body.replace('.', ""), false, true)
    } else {
        (body.to_string(), false, false)
    };

    normalized.parse::<f64>().ok().map(|value| ParsedNumber {
        value: sign * value,
        decimal_comma,
        grouped,
    })
}

/// True when `sep` splits the integer part into a leading group of one
/// to three digits followed by groups of exactly three.
fn groups_in_threes(body: &str, sep: char) -> bool {
    let groups: Vec<&str> = body.split(sep).collect();
    if groups.len() < 2 {
        return false;
    }
    let first_ok = !groups[0].is_empty()
        && groups[0].len() <= 3
        && groups[0].chars().all(|c| c.is_ascii_digit());
    first_ok
        && groups[1..]
            .iter()
            .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

/// Parses a percentage string ("45%", "3,5 %") into its numeric part.
/// The caller decides whether to keep percent points or a fraction.
pub fn parse_percentage(raw: &str) -> Option<ParsedNumber> {
    let trimmed = raw.trim();
    let body = trimmed.strip_suffix('%')?;
    parse_number(body)
}

/// Parses a currency string, returning the value and the symbol seen.
///
/// The symbol may lead ("$1,200.50") or trail ("1.200,50 €"); plain
/// grouped numbers without a symbol are not accepted here.
pub fn parse_currency(raw: &str) -> Option<(ParsedNumber, char)> {
    let trimmed = raw.trim();
    for symbol in CURRENCY_SYMBOLS {
        let Some(body) = trimmed
            .strip_prefix(symbol)
            .or_else(|| trimmed.strip_suffix(symbol))
        else {
            continue;
        };
        if let Some(parsed) = parse_number(body) {
            return Some((parsed, symbol));
        }
    }
    None
}

/// Tries each known pattern in order; returns the date and the pattern
/// that matched.
pub fn parse_date(raw: &str) -> Option<(NaiveDate, &'static str)> {
    let trimmed = raw.trim();
    for pattern in DATE_PATTERNS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, pattern) {
            return Some((date, pattern));
        }
    }
    None
}

/// Parses a date with a preferred pattern first, falling back to the
/// full pattern set. Used during coercion with the recorded hint.
pub fn parse_date_with_hint(raw: &str, hint: Option<&str>) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Some(pattern) = hint
        && let Ok(date) = NaiveDate::parse_from_str(trimmed, pattern)
    {
        return Some(date);
    }
    parse_date(trimmed).map(|(date, _)| date)
}
