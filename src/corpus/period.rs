// src/corpus/period.rs
//
// Fiscal period inference from free-form report filenames. This is a
// heuristic: rules are tried in a fixed precedence order and the first rule
// that matches anywhere in the name wins, regardless of where a lower-ranked
// token sits in the string.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A tagged filename pattern together with how its match becomes a year.
pub struct PeriodRule {
    pub name: &'static str,
    pattern: Regex,
    to_year: fn(&Captures) -> Option<u32>,
}

impl PeriodRule {
    fn new(name: &'static str, pattern: &str, to_year: fn(&Captures) -> Option<u32>) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("period rule pattern must compile"),
            to_year,
        }
    }

    /// Applies this rule alone; leftmost match in the filename.
    pub fn apply(&self, filename: &str) -> Option<u32> {
        self.pattern
            .captures(filename)
            .and_then(|caps| (self.to_year)(&caps))
    }
}

fn verbatim_year(caps: &Captures) -> Option<u32> {
    caps.get(0)?.as_str().parse().ok()
}

fn two_digit_suffix(caps: &Captures) -> Option<u32> {
    caps.get(1)?.as_str().parse::<u32>().ok().map(|yy| 2000 + yy)
}

/// Rules in precedence order.
pub static PERIOD_RULES: Lazy<Vec<PeriodRule>> = Lazy::new(|| {
    vec![
        PeriodRule::new("four_digit_year", r"(?:19|20)\d{2}", verbatim_year),
        PeriodRule::new("fiscal_year", r"FY(\d{2})", two_digit_suffix),
        PeriodRule::new("fiscal_quarter", r"F[1-4]Q(\d{2})", two_digit_suffix),
        PeriodRule::new("quarter_year", r"Q(\d{2})", two_digit_suffix),
    ]
});

/// Infers a four-digit fiscal year from a filename, or `None` if no rule matches.
pub fn infer_year(filename: &str) -> Option<u32> {
    PERIOD_RULES.iter().find_map(|rule| {
        let year = rule.apply(filename)?;
        tracing::trace!("{}: rule '{}' -> {}", filename, rule.name, year);
        Some(year)
    })
}

static FISCAL_QUARTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"F([1-4])Q").expect("Failed to compile FISCAL_QUARTER_RE"));
static BARE_QUARTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Q([1-4])(?:\D|$)").expect("Failed to compile BARE_QUARTER_RE"));

/// Loose quarter hint (1-4) for diagnostics. Never used for grouping.
pub fn infer_quarter(filename: &str) -> Option<u8> {
    [&*FISCAL_QUARTER_RE, &*BARE_QUARTER_RE]
        .iter()
        .find_map(|re| re.captures(filename))
        .and_then(|caps| caps.get(1)?.as_str().parse().ok())
}
