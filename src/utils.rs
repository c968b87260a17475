use chrono::{DateTime, Local, TimeZone, Utc};
use uuid::Uuid;

pub const SUPPORTED_LANGUAGES: [&str; 2] = ["es", "en"];
pub const DEFAULT_LANGUAGE: &str = "es";

const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Format byte count as human-readable string, base 1024.
///
/// Trailing zeros of the fraction are dropped: `1536` is `1.5 KB`,
/// `1048576` is `1 MB`.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.decimals$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    format!("{trimmed} {}", UNITS[unit])
}

/// Format byte count with two decimals, the form used across the views.
pub fn format_size(bytes: u64) -> String {
    format_bytes(bytes, 2)
}

/// Group thousands with commas.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Describe how long ago `date` was relative to `now`, in `language`
/// (`es` or `en`; anything else reads as the default language).
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>, language: &str) -> String {
    let spanish = normalize_language(language) == "es";
    let secs = (now - date).num_seconds().max(0);
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;
    let weeks = days / 7;
    let months = days / 30;

    let ago = |n: i64, (en, es): (&str, &str), es_plural: &str| {
        if spanish {
            format!("Hace {n} {}", if n == 1 { es } else { es_plural })
        } else if n == 1 {
            format!("1 {en} ago")
        } else {
            format!("{n} {en}s ago")
        }
    };

    if secs < 60 {
        let phrase = if spanish { "Hace un momento" } else { "just now" };
        phrase.to_string()
    } else if mins < 60 {
        ago(mins, ("minute", "minuto"), "minutos")
    } else if hours < 24 {
        ago(hours, ("hour", "hora"), "horas")
    } else if days < 7 {
        ago(days, ("day", "día"), "días")
    } else if weeks < 4 {
        ago(weeks, ("week", "semana"), "semanas")
    } else if months < 12 {
        ago(months, ("month", "mes"), "meses")
    } else if spanish {
        date.with_timezone(&Local).format("%-d/%m/%Y").to_string()
    } else {
        date.with_timezone(&Local).format("%b %-d, %Y").to_string()
    }
}

/// Long-form date, e.g. `Monday, March 10, 2025`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%A, %B %-d, %Y").to_string()
}

/// Date and time in the user's zone, for schedule "next run" labels.
pub fn format_local_datetime(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%a %b %-d, %H:%M")
        .to_string()
}

pub fn format_percentage(value: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", value as f64 / total as f64 * 100.0)
}

pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Reduce a locale tag to a supported language code (`en-US` -> `en`).
pub fn normalize_language(code: &str) -> &'static str {
    let primary = code
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|lang| *lang == primary)
        .unwrap_or(DEFAULT_LANGUAGE)
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;

    #[test]
    fn bytes_format_trims_trailing_zeros() {
        assert_eq!(format_bytes(0, 2), "0 Bytes");
        assert_eq!(format_bytes(512, 2), "512 Bytes");
        assert_eq!(format_bytes(1536, 2), "1.5 KB");
        assert_eq!(format_bytes(1_048_576, 2), "1 MB");
        assert_eq!(format_bytes(5 * 1_073_741_824, 2), "5 GB");
        assert_eq!(format_bytes(1_234_567_890, 2), "1.15 GB");
        assert_eq!(format_bytes(1_234_567_890, 0), "1 GB");
    }

    #[test]
    fn bytes_format_stops_at_petabytes() {
        let eb = 1024u64.pow(6);
        assert_eq!(format_bytes(eb, 2), "1024 PB");
    }

    #[test]
    fn number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rel = |d: Duration| format_relative_time(now - d, now, "en");
        assert_eq!(rel(Duration::seconds(10)), "just now");
        assert_eq!(rel(Duration::minutes(1)), "1 minute ago");
        assert_eq!(rel(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(rel(Duration::hours(3)), "3 hours ago");
        assert_eq!(rel(Duration::days(2)), "2 days ago");
        assert_eq!(rel(Duration::days(14)), "2 weeks ago");
        assert_eq!(rel(Duration::days(65)), "2 months ago");
        assert!(rel(Duration::days(400)).ends_with("2024"));
    }

    #[test]
    fn future_dates_read_as_just_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(now + Duration::hours(1), now, "en"), "just now");
    }

    #[test]
    fn relative_time_follows_language() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rel = |d: Duration, lang: &str| format_relative_time(now - d, now, lang);
        assert_eq!(rel(Duration::seconds(5), "es"), "Hace un momento");
        assert_eq!(rel(Duration::minutes(1), "es"), "Hace 1 minuto");
        assert_eq!(rel(Duration::days(3), "es"), "Hace 3 días");
        assert_eq!(rel(Duration::days(35), "es"), "Hace 1 mes");
        assert_eq!(rel(Duration::days(70), "es"), "Hace 2 meses");
        assert_eq!(rel(Duration::days(3), "en-US"), "3 days ago");
        // unsupported tags fall back to the default language
        assert_eq!(rel(Duration::hours(2), "fr"), "Hace 2 horas");
    }

    #[test]
    fn long_date() {
        let d = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(format_date(&d), "Monday, March 10, 2025");
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(format_percentage(5, 0), "0%");
        assert_eq!(format_percentage(1, 3), "33.3%");
        assert_eq!(format_percentage(120, 256), "46.9%");
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(150, 0, 100), 100);
        assert_eq!(clamp(-3, 0, 100), 0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn language_normalization() {
        assert_eq!(normalize_language("en-US"), "en");
        assert_eq!(normalize_language("ES"), "es");
        assert_eq!(normalize_language("fr"), "es");
        assert_eq!(normalize_language(""), "es");
    }
}
