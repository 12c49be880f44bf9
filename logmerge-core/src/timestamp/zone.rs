const HOUR: i32 = 3600;

const ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("Z", 0),
    ("WET", 0),
    ("WEST", HOUR),
    ("BST", HOUR),
    ("CET", HOUR),
    ("CEST", 2 * HOUR),
    ("EET", 2 * HOUR),
    ("EEST", 3 * HOUR),
    ("MSK", 3 * HOUR),
    ("IST", 5 * HOUR + 30 * 60),
    ("SGT", 8 * HOUR),
    ("HKT", 8 * HOUR),
    ("JST", 9 * HOUR),
    ("KST", 9 * HOUR),
    ("AEST", 10 * HOUR),
    ("AEDT", 11 * HOUR),
    ("HST", -10 * HOUR),
    ("AKST", -9 * HOUR),
    ("AKDT", -8 * HOUR),
    ("PST", -8 * HOUR),
    ("PDT", -7 * HOUR),
    ("MST", -7 * HOUR),
    ("MDT", -6 * HOUR),
    ("CST", -6 * HOUR),
    ("CDT", -5 * HOUR),
    ("EST", -5 * HOUR),
    ("EDT", -4 * HOUR),
];

/// Offset east of UTC, in seconds, for a zone token.
///
/// Known abbreviations map to their offset and `+HHMM`/`-HHMM` is read literally. Any other
/// all-letter abbreviation of three to five letters is taken as UTC.
pub(crate) fn offset_seconds(zone: &str) -> Option<i32> {
    if let Some(offset) = numeric_offset(zone) {
        return Some(offset);
    }

    if let Some((_, offset)) = ABBREVIATIONS.iter().find(|(name, _)| *name == zone) {
        return Some(*offset);
    }

    let unknown_abbreviation =
        (3..=5).contains(&zone.len()) && zone.bytes().all(|b| b.is_ascii_uppercase());
    unknown_abbreviation.then_some(0)
}

fn numeric_offset(zone: &str) -> Option<i32> {
    let bytes = zone.as_bytes();
    if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };

    let hours: i32 = zone[1..3].parse().ok()?;
    let minutes: i32 = zone[3..5].parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    Some(sign * (hours * HOUR + minutes * 60))
}
