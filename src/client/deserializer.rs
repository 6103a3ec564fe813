use serde::{
    de::{Error, Unexpected, Visitor},
    Deserializer,
};
use std::fmt;

struct IntVisitor;

impl<'de> Visitor<'de> for IntVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("integer or string of decimal digits")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(v)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        i64::try_from(v).map_err(|_| Error::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        // some endpoints have been seen sending "" for an absent number
        if v.is_empty() {
            return Ok(0);
        }
        v.parse()
            .map_err(|_| Error::invalid_value(Unexpected::Str(v), &self))
    }
}

/// Accepts `7200` as well as `"7200"`.
pub fn int_from_val<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntVisitor)
}
