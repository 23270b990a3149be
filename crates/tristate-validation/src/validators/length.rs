//! Length rules: `length(min|max)` counts bytes, `stringlength(min|max)` counts characters

/// Pattern for the `length(min|max)` token
pub const LENGTH_PATTERN: &str = r"^length\((\d+)\|(\d+)\)$";

/// Pattern for the `stringlength(min|max)` token
pub const STRING_LENGTH_PATTERN: &str = r"^stringlength\((\d+)\|(\d+)\)$";

/// Byte length within an inclusive range. Anything but two parameters fails.
pub fn byte_length(value: &str, params: &[&str]) -> bool {
    within(value.len(), params)
}

/// Unicode scalar count within an inclusive range. Anything but two parameters fails.
pub fn string_length(value: &str, params: &[&str]) -> bool {
    within(value.chars().count(), params)
}

fn within(length: usize, params: &[&str]) -> bool {
    match params {
        [min, max] => {
            let length = i64::try_from(length).unwrap_or(i64::MAX);
            length >= to_int(min) && length <= to_int(max)
        }
        _ => false,
    }
}

/// Parse a rule parameter; anything unparsable counts as zero
fn to_int(param: &str) -> i64 {
    param.trim().parse().unwrap_or(0)
}
