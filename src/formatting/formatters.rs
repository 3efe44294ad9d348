//! pt-BR display formatters.
//!
//! Used as column renderers and by hosts that format values themselves. None of
//! these functions fail: input that cannot be interpreted is returned as-is.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATE_TIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";
const FILE_SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats an amount in Brazilian reais, e.g. `R$ 1.234,56`.
///
/// ```
/// use planboard::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.5), "R$ 1.234,50");
/// assert_eq!(format_currency(-2.0), "-R$ 2,00");
/// ```
#[must_use]
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}R$ {},{frac_part}", group_thousands(int_part))
}

/// Formats a number with `.` grouping, `,` decimals and at most three fraction digits.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let grouped = group_thousands(int_part);
    let sign = if grouped == "0" && frac_part.is_empty() { "" } else { sign };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}

/// Formats a percentage with a fixed number of decimals, e.g. `78.5%`.
#[must_use]
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Parses the date and date-time shapes found in row data.
///
/// Accepts RFC 3339 (converted to local time), `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM:SS` and plain `YYYY-MM-DD` (midnight).
#[must_use]
pub fn parse_date_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a date as `dd/mm/yyyy`.
///
/// ```
/// use planboard::formatting::format_date;
///
/// assert_eq!(format_date("2024-03-15"), "15/03/2024");
/// assert_eq!(format_date("amanhã"), "amanhã");
/// ```
#[must_use]
pub fn format_date(input: &str) -> String {
    parse_date_time(input).map_or_else(|| input.to_string(), |dt| dt.format(DATE_FORMAT).to_string())
}

/// Formats a date-time as `dd/mm/yyyy, HH:MM:SS`.
#[must_use]
pub fn format_date_time(input: &str) -> String {
    parse_date_time(input)
        .map_or_else(|| input.to_string(), |dt| dt.format(DATE_TIME_FORMAT).to_string())
}

/// Describes how long ago `input` was relative to `now`.
///
/// Less than a minute reads `Agora`, then minutes, hours and up to six days;
/// anything older falls back to [`format_date`].
#[must_use]
pub fn format_time_ago(input: &str, now: NaiveDateTime) -> String {
    let Some(then) = parse_date_time(input) else {
        return input.to_string();
    };

    let minutes = (now - then).num_minutes();
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if minutes < 1 {
        "Agora".to_string()
    } else if minutes < 60 {
        format!("{minutes} min atrás")
    } else if hours < 24 {
        format!("{hours}h atrás")
    } else if days < 7 {
        let plural = if days > 1 { "s" } else { "" };
        format!("{days} dia{plural} atrás")
    } else {
        then.format(DATE_FORMAT).to_string()
    }
}

/// Formats a byte count with binary units, e.g. `1.5 KB`.
#[must_use]
pub fn format_file_size(bytes: f64) -> String {
    if bytes <= 0.0 || !bytes.is_finite() {
        return "0 Bytes".to_string();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let unit = (bytes.ln() / 1024_f64.ln()).floor().clamp(0.0, 4.0) as usize;
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let scaled = bytes / 1024_f64.powi(unit as i32);
    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", FILE_SIZE_UNITS[unit])
}

/// Formats a duration given in minutes, e.g. `1h 30min`.
#[must_use]
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}min");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {rest}min")
    }
}

/// Up to two upper-case initials, e.g. `Ana Costa` → `AC`.
#[must_use]
pub fn format_initials(name: &str) -> String {
    name.split(' ')
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a Brazilian phone number: `(11) 98765-4321` or `(11) 3456-7890`.
///
/// Inputs without 10 or 11 digits are returned unchanged.
#[must_use]
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}

/// Formats a CPF as `000.000.000-00`.
///
/// Non-digits are dropped; fewer than 11 digits are returned as bare digits.
#[must_use]
pub fn format_cpf(cpf: &str) -> String {
    let digits = digits_only(cpf);
    if digits.len() < 11 {
        return digits;
    }
    format!(
        "{}.{}.{}-{}{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11],
        &digits[11..]
    )
}

/// Formats a CNPJ as `00.000.000/0000-00`.
///
/// Non-digits are dropped; fewer than 14 digits are returned as bare digits.
#[must_use]
pub fn format_cnpj(cnpj: &str) -> String {
    let digits = digits_only(cnpj);
    if digits.len() < 14 {
        return digits;
    }
    format!(
        "{}.{}.{}/{}-{}{}",
        &digits[..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14],
        &digits[14..]
    )
}

/// Cuts `text` to `max_chars` characters and appends `...` if it was longer.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect()
    })
}

/// Applies [`capitalize_first`] to every space-separated word.
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    text.split(' ').map(capitalize_first).collect::<Vec<_>>().join(" ")
}
