//! Human readable sizes, durations and script section titles

use crate::error::{Error, Result};
use std::str::FromStr;

const BINARY_PREFIXES: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];
const COMPACT_PREFIXES: [&str; 8] = ["", "k", "M", "G", "T", "P", "E", "Z"];

/// Format `num` with binary (base 1024) prefixes and one decimal place.
///
/// ```
/// use rutils::format::sizeof_fmt;
///
/// assert_eq!(sizeof_fmt(0.0, "B"), "0.0 B");
/// assert_eq!(sizeof_fmt(1536.0, "B"), "1.5 KiB");
/// ```
pub fn sizeof_fmt(num: f64, suffix: &str) -> String {
    let mut num = num;
    for unit in BINARY_PREFIXES {
        if num.abs() < 1024.0 {
            return format!("{num:3.1} {unit}{suffix}");
        }
        num /= 1024.0;
    }
    format!("{num:.1} Yi{suffix}")
}

/// Compact size format used by progress bars: three significant digits and
/// no space between number and unit (`1.50kB`, `12.3MB`, `999kB`).
pub fn format_sizeof(num: f64, suffix: &str, divisor: f64) -> String {
    let mut num = num;
    for unit in COMPACT_PREFIXES {
        if num.abs() < 999.5 {
            if num.abs() < 99.95 {
                if num.abs() < 9.995 {
                    return format!("{num:1.2}{unit}{suffix}");
                }
                return format!("{num:2.1}{unit}{suffix}");
            }
            return format!("{num:3.0}{unit}{suffix}");
        }
        num /= divisor;
    }
    format!("{num:3.1}Y{suffix}")
}

/// Format a byte count, optionally prefixed with `"{msg}: "`.
///
/// With `echo` set the result is printed and `None` is returned, otherwise
/// the formatted string is handed back to the caller.
pub fn format_bytes(num_bytes: u64, msg: Option<&str>, echo: bool) -> Option<String> {
    let formatted = with_message(msg, format_sizeof(num_bytes as f64, "B", 1024.0));
    if echo {
        println!("{formatted}");
        None
    } else {
        Some(formatted)
    }
}

/// `[H:]MM:SS` with whole seconds
pub fn format_interval(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (mins, secs) = (total / 60, total % 60);
    let (hours, mins) = (mins / 60, mins % 60);
    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}

/// Sub-second durations keep four decimals, longer ones use [`format_interval`]
pub fn format_elapsed(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{seconds:.4}")
    } else {
        format_interval(seconds)
    }
}

pub(crate) fn with_message(msg: Option<&str>, text: String) -> String {
    match msg {
        Some(msg) => format!("{msg}: {text}"),
        None => text,
    }
}

/// What [`make_section_title`] does with the title it builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleOutput {
    /// Print the title and return nothing
    #[default]
    Echo,
    /// Return the title as a single string
    Return,
    /// Return the individual lines
    ReturnLines,
}

impl FromStr for TitleOutput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "echo" => Ok(TitleOutput::Echo),
            "return" => Ok(TitleOutput::Return),
            "return_lines" => Ok(TitleOutput::ReturnLines),
            other => Err(Error::invalid_argument(format!(
                "title output must be one of echo, return, return_lines (got {other:?})"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionTitle {
    Text(String),
    Lines(Vec<String>),
}

/// Banner for separating sections of a script's output:
/// two `#` rules, the padded title centred with `fill`, two more rules.
pub fn section_title_lines(title: &str, width: usize, fill: char) -> Vec<String> {
    let rule = "#".repeat(width);
    let label = format!(" {title} ");
    let padding = width.saturating_sub(label.chars().count());
    let left = padding / 2;
    let right = padding - left;

    let mut middle = String::with_capacity(width.max(label.len()));
    middle.extend(std::iter::repeat_n(fill, left));
    middle.push_str(&label);
    middle.extend(std::iter::repeat_n(fill, right));

    vec![rule.clone(), rule.clone(), middle, rule.clone(), rule]
}

pub fn make_section_title(
    title: &str,
    width: usize,
    fill: char,
    output: TitleOutput,
) -> Option<SectionTitle> {
    let lines = section_title_lines(title, width, fill);
    match output {
        TitleOutput::Echo => {
            println!("{}", lines.join("\n"));
            None
        }
        TitleOutput::Return => Some(SectionTitle::Text(lines.join("\n"))),
        TitleOutput::ReturnLines => Some(SectionTitle::Lines(lines)),
    }
}
