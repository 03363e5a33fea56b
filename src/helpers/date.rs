//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM D, YYYY") // -> "August 7, 2021"
/// format_date(&date, "YYYY-MM-DD")   // -> "2021-08-07"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Format a date in ISO 8601 form for `datetime` attributes and meta tags
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Convert a Moment.js format to a chrono format.
///
/// The format is scanned as runs of the same letter so `D` and `DD` can
/// coexist with `DDDD` without one replacement eating another.
fn moment_to_chrono_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut result = String::with_capacity(format.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let token = match (c, run) {
            ('Y', 4) => Some("%Y"),
            ('Y', 2) => Some("%y"),
            ('M', 4) => Some("%B"),
            ('M', 3) => Some("%b"),
            ('M', 2) => Some("%m"),
            ('M', 1) => Some("%-m"),
            ('D', 4) => Some("%j"),
            ('D', 2) => Some("%d"),
            ('D', 1) => Some("%-d"),
            ('d', 4) => Some("%A"),
            ('d', 3) => Some("%a"),
            ('H', 2) => Some("%H"),
            ('H', 1) => Some("%-H"),
            ('h', 2) => Some("%I"),
            ('h', 1) => Some("%-I"),
            ('m', 2) => Some("%M"),
            ('s', 2) => Some("%S"),
            ('S', 3) => Some("%3f"),
            ('A', 1) => Some("%p"),
            ('a', 1) => Some("%P"),
            ('Z', 2) => Some("%z"),
            ('Z', 1) => Some("%:z"),
            _ => None,
        };

        match token {
            Some(spec) => result.push_str(spec),
            None => {
                for _ in 0..run {
                    if c == '%' {
                        result.push_str("%%");
                    } else {
                        result.push(c);
                    }
                }
            }
        }

        i += run;
    }

    result
}
