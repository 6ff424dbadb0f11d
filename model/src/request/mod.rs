//! Request bodies.

pub mod account;
pub mod stat;

/// Rejects a string field that was left out or left empty.
///
/// Fields using this should be `#[serde(default)]` so a missing field
/// deserializes to the empty string and is caught here instead.
pub fn required(value: &str, _context: &()) -> garde::Result {
    if value.is_empty() {
        Err(garde::Error::new("is required"))
    } else {
        Ok(())
    }
}
