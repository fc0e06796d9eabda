//! JSON serialization contracts.
//!
//! Serializers only read what a container already exposes (its in-order
//! walk); deserializers rebuild by clearing and re-inserting. Neither side
//! knows anything about the container's internal layout.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

/// Outputs the JSON representation of a container's elements.
pub trait JsonSerializer {
    fn to_json(&self) -> anyhow::Result<String>;
}

/// Populates a container from a JSON representation.
///
/// On error the container is left unchanged.
pub trait JsonDeserializer {
    fn from_json(&mut self, data: &str) -> anyhow::Result<()>;
}

/// The pairs of a JSON object, in document order.
///
/// Keys are decoded with the object-key rules of `serde_json`, so integer keys
/// written as `"1"` decode into integer types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entries<K, V>(pub Vec<(K, V)>);

impl<'de, K, V> Deserialize<'de> for Entries<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
        where
            K: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = Entries<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of key/value pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Decodes a JSON object into its pairs.
pub fn entries_from_json<K, V>(data: &str) -> anyhow::Result<Vec<(K, V)>>
where
    K: for<'de> Deserialize<'de>,
    V: for<'de> Deserialize<'de>,
{
    let Entries(entries): Entries<K, V> = serde_json::from_str(data)
        .map_err(|e| anyhow::anyhow!("JSON deserialization failed: {}", e))?;
    Ok(entries)
}

/// Decodes a JSON array into its elements.
pub fn elements_from_json<T>(data: &str) -> anyhow::Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(data).map_err(|e| anyhow::anyhow!("JSON deserialization failed: {}", e))
}
