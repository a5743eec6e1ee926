//! Decoded account records.
//!
//! Each account type gets its own struct, and [`DecodedRecord`] ties them together under the
//! account's leading tag byte. Records own all their data; nothing borrows from the account
//! buffer once decoding is done.

use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::Error, key::Key, timestamp::Expiry};

/// The leading discriminator byte of an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Credential,
    Schema,
    Attestation,
}

impl Tag {
    pub fn to_u8(self) -> u8 {
        match self {
            Tag::Credential => 0,
            Tag::Schema => 1,
            Tag::Attestation => 2,
        }
    }

    /// Try to read a byte as a Tag. Fails if it's not a recognized account type.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Tag::Credential),
            1 => Some(Tag::Schema),
            2 => Some(Tag::Attestation),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Credential => "Credential",
            Tag::Schema => "Schema",
            Tag::Attestation => "Attestation",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Tag::from_u8(v).ok_or(Error::UnknownTag(v))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An issuing authority and the keys allowed to sign attestations on its behalf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub authority: Key,
    pub name: String,
    pub authorized_signers: Vec<Key>,
}

/// A data layout that attestations under a credential follow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub credential: Key,
    pub name: String,
    pub description: String,
    pub layout: String,
    pub field_names: String,
    pub is_paused: bool,
    pub version: u8,
}

/// A signed statement about some subject, following a schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attestation {
    pub nonce: Key,
    pub credential: Key,
    pub schema: Key,
    pub data: String,
    pub signer: Key,
    pub expiry: Expiry,
    /// ISO-8601 rendering of `expiry`, absent when the attestation never expires.
    pub expiry_date: Option<String>,
    pub token_account: Key,
}

/// Any decoded account, tagged by type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecodedRecord {
    Credential(Credential),
    Schema(Schema),
    Attestation(Attestation),
}

impl DecodedRecord {
    pub fn tag(&self) -> Tag {
        match self {
            DecodedRecord::Credential(_) => Tag::Credential,
            DecodedRecord::Schema(_) => Tag::Schema,
            DecodedRecord::Attestation(_) => Tag::Attestation,
        }
    }

    pub fn as_credential(&self) -> Option<&Credential> {
        match self {
            DecodedRecord::Credential(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            DecodedRecord::Schema(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_attestation(&self) -> Option<&Attestation> {
        match self {
            DecodedRecord::Attestation(a) => Some(a),
            _ => None,
        }
    }
}

impl From<Credential> for DecodedRecord {
    fn from(v: Credential) -> Self {
        DecodedRecord::Credential(v)
    }
}

impl From<Schema> for DecodedRecord {
    fn from(v: Schema) -> Self {
        DecodedRecord::Schema(v)
    }
}

impl From<Attestation> for DecodedRecord {
    fn from(v: Attestation) -> Self {
        DecodedRecord::Attestation(v)
    }
}

/// A decoded record along with the address of the account it came from.
///
/// Serializes as a flat object: the address under `pubkey`, then `type`, then the record fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressedRecord {
    pub pubkey: String,
    #[serde(flatten)]
    pub record: DecodedRecord,
}
