use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                lenient_i64(deserializer).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Account identifier.
    AccountId
);
entity_id!(
    /// Campaign identifier.
    CampaignId
);
entity_id!(
    /// Ad group identifier.
    AdGroupId
);
entity_id!(
    /// Keyword identifier.
    KeywordId
);

/// Parse a raw option value (as carried by a selector list) into a numeric id.
///
/// Surrounding whitespace is ignored. Returns `None` for the empty
/// "no value" option and for anything that is not an integer.
pub fn coerce_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Deserialize an integer that may arrive as a JSON number or a numeric string.
pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct LenientI64;

    impl Visitor<'_> for LenientI64 {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom(format!("id {v} out of range")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.fract() == 0.0 && v.is_finite() {
                Ok(v as i64)
            } else {
                Err(E::custom(format!("expected integer, got {v}")))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            coerce_id(v).ok_or_else(|| E::custom(format!("invalid numeric string: {v:?}")))
        }
    }

    deserializer.deserialize_any(LenientI64)
}

/// Deserialize a float that may arrive as a JSON number or a numeric string.
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct LenientF64;

    impl Visitor<'_> for LenientF64 {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid numeric string: {v:?}")))
        }
    }

    deserializer.deserialize_any(LenientF64)
}

/// Deserialize an unsigned count that may arrive as a number or a numeric string.
pub fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = lenient_i64(deserializer)?;
    u64::try_from(value).map_err(|_| de::Error::custom(format!("expected non-negative, got {value}")))
}

/// Optional variant of [`lenient_i64`] for foreign-key fields that may be absent or null.
pub fn lenient_opt_i64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "lenient_i64")] i64);

    Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(v)| v))
}
