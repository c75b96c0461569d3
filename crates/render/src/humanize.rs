//! Compact human-friendly durations and byte sizes.

const SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// `250` → `250ms`, `1200` → `1.2s`, `61000` → `1m 1s`.
///
/// Below one second the value is shown in milliseconds. Above it, zero
/// components are skipped and seconds are floored to one decimal.
/// Years are the largest unit and are not capped, so huge inputs give long
/// strings such as `292471208y 247d 7h 12m 55.8s`.
pub fn duration_ms(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();

    if ms < MS_PER_SECOND {
        return format!("{sign}{ms}ms");
    }

    let days = ms / MS_PER_DAY;
    let mut parts = Vec::new();
    for (value, unit) in [
        (days / 365, "y"),
        (days % 365, "d"),
        ((ms / MS_PER_HOUR) % 24, "h"),
        ((ms / MS_PER_MINUTE) % 60, "m"),
    ] {
        if value != 0 {
            parts.push(format!("{value}{unit}"));
        }
    }

    let tenths = (ms % MS_PER_MINUTE) / 100;
    if tenths != 0 {
        let (whole, frac) = (tenths / 10, tenths % 10);
        if frac == 0 {
            parts.push(format!("{whole}s"));
        } else {
            parts.push(format!("{whole}.{frac}s"));
        }
    }

    format!("{sign}{}", parts.join(" "))
}

/// Decimal byte size with no space between value and unit: `1500` → `1.5KB`.
pub fn byte_size(bytes: i64) -> String {
    let sign = if bytes < 0 { "-" } else { "" };
    let bytes = bytes.unsigned_abs();

    let mut exponent = 0;
    let mut scale: u64 = 1;
    while exponent < SIZE_UNITS.len() - 1 && bytes / scale >= 1000 {
        scale *= 1000;
        exponent += 1;
    }

    let value = bytes as f64 / scale as f64;
    let unit = SIZE_UNITS[exponent];
    if value >= 10.0 || value.fract() == 0.0 {
        format!("{sign}{value:.0}{unit}")
    } else {
        format!("{sign}{value:.1}{unit}")
    }
}
