//! Compile-time checks on field tags.
//!
//! The runtime parses tags itself; this only rejects tags that could never
//! decode, so the mistake is reported at the attribute instead of on the
//! first request.

/// Check the `min`/`max` options of a tag.
///
/// Both must be base-10 `i64` literals when present, and `min` may not exceed
/// `max`.
pub fn validate_tag(tag: &str) -> Result<(), String> {
    let Some((_, options)) = tag.split_once(',') else {
        return Ok(());
    };

    let mut min = None;
    let mut max = None;

    for option in options.split(',') {
        let (key, value) = option.split_once(':').unwrap_or((option, ""));
        let slot = match key {
            "min" => &mut min,
            "max" => &mut max,
            _ => continue,
        };
        let bound = value
            .parse::<i64>()
            .map_err(|_| format!("`{}` bound must be an integer, found {:?}", key, value))?;
        *slot = Some(bound);
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(format!("`min` ({}) is greater than `max` ({})", min, max));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_tags() {
        assert!(validate_tag("").is_ok());
        assert!(validate_tag("username").is_ok());
        assert!(validate_tag(",omitempty").is_ok());
        assert!(validate_tag("email,omitempty,format:email").is_ok());
        assert!(validate_tag("age,min:13,max:99").is_ok());
        assert!(validate_tag("delta,min:-5").is_ok());
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert_eq!(
            validate_tag("age,min:thirteen").unwrap_err(),
            "`min` bound must be an integer, found \"thirteen\""
        );
        assert!(validate_tag("age,max").is_err());
        assert!(validate_tag("age,max:1.5").is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert_eq!(
            validate_tag("age,min:10,max:5").unwrap_err(),
            "`min` (10) is greater than `max` (5)"
        );
        assert!(validate_tag("age,min:5,max:5").is_ok());
    }
}
