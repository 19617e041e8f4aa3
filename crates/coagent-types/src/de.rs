//! Deserialization helpers shared by the wire types.

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as an absent field.
///
/// The platform serializes empty collections inconsistently: some snapshots
/// send `"copilot_confirmations": null`, others `[]` or nothing at all.
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
