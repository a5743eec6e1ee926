//! Raw account data, as handed over by whatever fetched it.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Undecoded account data paired with the address of the account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBlob {
    pub address: String,
    pub data: Vec<u8>,
}

impl RawBlob {
    pub fn new(address: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            address: address.into(),
            data: data.into(),
        }
    }

    /// Build from base64-encoded account data.
    pub fn from_base64(address: impl Into<String>, payload: &str) -> Result<Self> {
        Ok(Self::new(address, STANDARD.decode(payload)?))
    }

    /// Build from account data in the `[payload, encoding]` form RPC nodes return.
    pub fn from_account_data(address: impl Into<String>, data: &AccountData) -> Result<Self> {
        Ok(Self::new(address, data.decode()?))
    }
}

/// Account data as returned over JSON-RPC: a payload string and the name of its encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData(pub String, pub String);

impl AccountData {
    pub fn payload(&self) -> &str {
        &self.0
    }

    pub fn encoding(&self) -> &str {
        &self.1
    }

    /// Decode the payload into raw bytes. Only `base64` and `base58` are understood.
    pub fn decode(&self) -> Result<Vec<u8>> {
        match self.encoding() {
            "base64" => Ok(STANDARD.decode(self.payload())?),
            "base58" => Ok(bs58::decode(self.payload()).into_vec()?),
            other => Err(Error::BadAccountData(format!(
                "unsupported encoding \"{}\"",
                other
            ))),
        }
    }
}
