use uuid::Uuid;

/// Returns true if `s` parses into a 128-bit unique identifier.
///
/// The string is only checked, never normalised, so callers keep the original
/// casing and formatting in their output.
pub fn is_guid(s: &str) -> bool {
    Uuid::try_parse(s).is_ok()
}
