use crate::prelude::*;
use ark_std::fmt;
use serde::de::{SeqAccess, Visitor};

/// The byte encoding used by serde for scalars and group elements.
pub trait FromToBytes: Sized {
    /// Convert into bytes.
    fn to_serialized_bytes(&self) -> Vec<u8>;
    /// Reconstruct from bytes.
    fn from_serialized_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError>;
}

/// The visitor collecting a byte string, or a base64 string in human-readable formats.
pub struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a valid byte encoding")
    }

    fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Vec<u8>, E>
    where
        E: serde::de::Error,
    {
        Ok(v.to_vec())
    }

    fn visit_str<E>(self, v: &str) -> core::result::Result<Vec<u8>, E>
    where
        E: serde::de::Error,
    {
        b64dec(v).map_err(serde::de::Error::custom)
    }

    fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut vec: Vec<u8> = vec![];
        while let Some(x) = seq.next_element()? {
            vec.push(x);
        }
        Ok(vec)
    }
}

/// Implement serde through [`FromToBytes`].
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                use $crate::serialization::FromToBytes;
                if serializer.is_human_readable() {
                    serializer.serialize_str(&$crate::utils::b64enc(&self.to_serialized_bytes()))
                } else {
                    serializer.serialize_bytes(&self.to_serialized_bytes())
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use $crate::serialization::FromToBytes;
                let bytes = if deserializer.is_human_readable() {
                    deserializer.deserialize_str($crate::serialization::BytesVisitor)?
                } else {
                    deserializer.deserialize_bytes($crate::serialization::BytesVisitor)?
                };
                $t::from_serialized_bytes(bytes.as_slice()).map_err(serde::de::Error::custom)
            }
        }
    };
}
