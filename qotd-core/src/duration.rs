use std::time::Duration;

use crate::error::DurationError;

/// Парсит длительность вида `30s`, `5m`, `1h30m`, `500ms`.
///
/// Единицы: `ms`, `s`, `m`, `h`; термы складываются. Голый `0` означает
/// нулевую длительность (у флагов сервера это "выключено").
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DurationError::Empty);
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total = Duration::ZERO;
    let mut rest = s;

    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| DurationError::MissingUnit(s.to_string()))?;
        if digits_end == 0 {
            return Err(DurationError::MissingValue(s.to_string()));
        }

        let (num, tail) = rest.split_at(digits_end);
        let value: u64 = num
            .parse()
            .map_err(|_| DurationError::BadValue(num.to_string()))?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);

        let term = match unit {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.saturating_mul(60)),
            "h" => Duration::from_secs(value.saturating_mul(3600)),
            other => return Err(DurationError::UnknownUnit(other.to_string())),
        };

        total = total
            .checked_add(term)
            .ok_or_else(|| DurationError::BadValue(s.to_string()))?;

        rest = next;
    }

    Ok(total)
}
