/// ISO-8601 duration parsing for flight leg durations (`PT2H30M`, `P1DT4H`).
///
/// Durations are compared by total minutes. Comparing the raw strings orders
/// `PT10H` before `PT2H`, so anything that sorts durations must go through
/// here first.
pub fn duration_to_minutes(raw: &str) -> Option<u32> {
    let rest = raw.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => (d, t),
        None => (rest, ""),
    };

    let mut minutes: u32 = 0;

    for (part, in_time) in [(date_part, false), (time_part, true)] {
        let mut digits = String::new();
        for c in part.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let value: u32 = digits.parse().ok()?;
            digits.clear();
            let factor = match (c, in_time) {
                ('D', false) => 24 * 60,
                ('H', true) => 60,
                ('M', true) => 1,
                // Seconds never appear in leg durations; ignore rather than reject.
                ('S', true) => 0,
                _ => return None,
            };
            minutes = minutes.checked_add(value.checked_mul(factor)?)?;
        }
        if !digits.is_empty() {
            return None;
        }
    }

    Some(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(duration_to_minutes("PT2H30M"), Some(150));
        assert_eq!(duration_to_minutes("PT45M"), Some(45));
        assert_eq!(duration_to_minutes("PT10H"), Some(600));
    }

    #[test]
    fn test_days_component() {
        assert_eq!(duration_to_minutes("P1DT4H"), Some(28 * 60));
    }

    #[test]
    fn test_ten_hours_exceeds_two_hours() {
        // The lexicographic comparison this replaces got this backwards.
        let ten = duration_to_minutes("PT10H").unwrap();
        let two = duration_to_minutes("PT2H").unwrap();
        assert!(ten > two);
        assert!("PT10H" < "PT2H");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(duration_to_minutes(""), None);
        assert_eq!(duration_to_minutes("2h30m"), None);
        assert_eq!(duration_to_minutes("PT2X"), None);
        assert_eq!(duration_to_minutes("PT2"), None);
    }
}
