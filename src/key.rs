use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{
    de::{Deserialize, Deserializer, Error as DeError},
    ser::{Serialize, Serializer},
};
use serde_bytes::{ByteBuf, Bytes};

/// Length of an account key, in bytes.
pub const KEY_LEN: usize = 32;

/// A 32-byte account key, as stored inline in account data.
///
/// Keys are kept as raw bytes while decoding. They're rendered as base58 text only at the output
/// boundary: through `Display`, or when serialized with a human-readable serializer like JSON.
/// Compact serializers get the raw 32 bytes instead.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key([u8; KEY_LEN]);

/// A string or byte sequence couldn't be turned into a [`Key`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadKey(String);

impl fmt::Display for BadKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid key: {}", self.0)
    }
}

impl std::error::Error for BadKey {}

impl Key {
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Key(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }
}

impl From<[u8; KEY_LEN]> for Key {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Key(bytes)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = BadKey;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != KEY_LEN {
            return Err(BadKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                value.len()
            )));
        }
        let mut arr = [0u8; KEY_LEN];
        arr.copy_from_slice(value);
        Ok(Key(arr))
    }
}

impl FromStr for Key {
    type Err = BadKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| BadKey(e.to_string()))?;
        Key::try_from(bytes.as_ref())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.to_base58())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base58())
        } else {
            Bytes::new(&self.0).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(D::Error::custom)
        } else {
            let bytes = ByteBuf::deserialize(deserializer)?;
            Key::try_from(bytes.as_ref()).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_key_is_system_program() {
        assert_eq!(Key::default().to_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn parse_base58() {
        let text = "FJ8myMh9dRcgc2n8xBrWTbCrFYAbHQZCPtMzhhmvNo4M";
        let key: Key = text.parse().unwrap();
        assert_eq!(key.to_string(), text);
    }

    #[test]
    fn reject_wrong_length() {
        assert!("3yZe7d".parse::<Key>().is_err());
        assert!("not base58 0OIl".parse::<Key>().is_err());
        assert!(Key::try_from(&[1u8; 31][..]).is_err());
    }

    #[test]
    fn json_is_base58() {
        let key = Key::new([7u8; KEY_LEN]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key.to_base58()));
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
