//! Serde bridges so serde-based format crates can read and write documents.
//!
//! Deserialisation preserves mapping order, rejects duplicate keys and
//! stringifies non-string mapping keys. Serialisation skips `Absent` entries.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Document, Mapping, Scalar};

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mapping(map) => {
                let len = map.values().filter(|value| !value.is_absent()).count();
                let mut state = serializer.serialize_map(Some(len))?;
                for (key, value) in map.iter().filter(|(_, value)| !value.is_absent()) {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Self::Sequence(items) => {
                serializer.collect_seq(items.iter().filter(|item| !item.is_absent()))
            }
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Absent => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping, sequence or scalar")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Document, E> {
        Ok(Document::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Document, E> {
        Ok(Document::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Document, E> {
        i64::try_from(value)
            .map(Document::from)
            .map_err(|_| E::custom(format!("integer {value} exceeds the signed 64-bit range")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Document, E> {
        Ok(Document::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Document, E> {
        Ok(Document::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Document, E> {
        Ok(Document::from(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Document, D::Error> {
        Document::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Document, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Document>()? {
            items.push(item);
        }
        Ok(Document::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Document, A::Error> {
        let mut entries = Mapping::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(MapKey(key)) = access.next_key::<MapKey>()? {
            if entries.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate mapping key `{key}`")));
            }
            let value = access.next_value::<Document>()?;
            entries.insert(key, value);
        }
        Ok(Document::Mapping(entries))
    }
}

/// Mapping key accepting any scalar and storing its text form.
struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

struct MapKeyVisitor;

impl Visitor<'_> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<MapKey, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<MapKey, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<MapKey, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<MapKey, E> {
        Ok(MapKey(Scalar::Float(value).to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<MapKey, E> {
        Ok(MapKey(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<MapKey, E> {
        Ok(MapKey(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MapKey, E> {
        Ok(MapKey("null".to_owned()))
    }
}
