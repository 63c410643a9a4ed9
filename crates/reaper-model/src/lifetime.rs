//! Parsing of lifetime declarations.
//!
//! A raw lifetime value is interpreted with an ordered rule, first match wins:
//! 1. an integer is a count of whole minutes;
//! 2. otherwise a duration expression such as `"2h"`, `"90s"`, `"1h30m"` or `"1.5h"`;
//! 3. otherwise the value is unparsable and its lifetime is zero.
//!
//! The parse result keeps the three cases apart so callers never have to guess whether a zero
//! came from `"0"` or from garbage. Only a strictly positive lifetime is usable.
use std::fmt;

use time::Duration;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Parsed form of an instance's lifetime metadata value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeDeclaration {
    /// The raw value was an integer, read as minutes.
    Minutes(i64),
    /// The raw value was a duration expression.
    Expression(Duration),
    /// Neither rule matched.
    Unparsable,
}

impl LifetimeDeclaration {
    /// Parse a raw metadata value.
    pub fn parse(raw: &str) -> Self {
        if let Ok(minutes) = raw.parse::<i64>() {
            return match minutes.checked_mul(60) {
                Some(_) => Self::Minutes(minutes),
                None => Self::Unparsable,
            };
        }
        match parse_expression(raw) {
            Some(d) => Self::Expression(d),
            None => Self::Unparsable,
        }
    }

    /// Declared lifetime; zero when unparsable.
    pub fn lifetime(&self) -> Duration {
        match *self {
            Self::Minutes(m) => Duration::seconds(m.saturating_mul(60)),
            Self::Expression(d) => d,
            Self::Unparsable => Duration::ZERO,
        }
    }

    /// Returns `true` if the lifetime is strictly positive.
    ///
    /// Zero and negative lifetimes mean the declaration is incorrectly specified.
    pub fn is_valid(&self) -> bool {
        self.lifetime().is_positive()
    }

    /// Short name of the matched rule, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Minutes(_) => "minutes",
            Self::Expression(_) => "expression",
            Self::Unparsable => "unparsable",
        }
    }
}

impl fmt::Display for LifetimeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minutes(m) => write!(f, "{m}m"),
            Self::Expression(d) => write!(f, "{d}"),
            Self::Unparsable => f.write_str("<unparsable>"),
        }
    }
}

/// Parse a duration expression: `[-+]` then one or more `<decimal><unit>` terms.
///
/// Units: `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m`, `h`. The bare string `"0"` is accepted.
/// Returns `None` on syntax errors or when the total overflows `i64` nanoseconds.
fn parse_expression(s: &str) -> Option<Duration> {
    let mut rest = s;
    let mut negative = false;
    if let Some(r) = rest.strip_prefix('-') {
        negative = true;
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
    }
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let int_len = leading_digits(rest);
        let (int_part, after) = rest.split_at(int_len);
        rest = after;

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = leading_digits(after_dot);
            frac_part = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after) = rest.split_at(unit_len);
        rest = after;
        let scale = unit_nanos(unit)?;

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let mut term = whole.checked_mul(scale)?;
        term = term.checked_add(fraction_nanos(frac_part, scale))?;

        total = total.checked_add(term)?;
        if total > i64::MAX as u64 {
            return None;
        }
    }

    let nanos = total as i64;
    Some(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Nanoseconds contributed by the fractional digits of a term.
///
/// Digits past the 18th are ignored; they cannot change the result by a whole nanosecond for
/// any supported unit.
fn fraction_nanos(digits: &str, scale: u64) -> u64 {
    let mut numer: u64 = 0;
    let mut denom: u64 = 1;
    for b in digits.bytes().take(18) {
        numer = numer * 10 + u64::from(b - b'0');
        denom *= 10;
    }
    if numer == 0 {
        return 0;
    }
    (numer as f64 * (scale as f64 / denom as f64)) as u64
}
