//! sas-decode turns the raw data of attestation-service accounts into structured records.
//!
//! The program owns three kinds of accounts: credentials, schemas, and attestations. Each is a
//! tagged, variable-length byte blob; this crate reads the tag, walks the fields with a
//! bounds-checked [`Cursor`], and produces a [`DecodedRecord`]. Fetching account data and storing
//! the results are left to the caller: hand in [`RawBlob`]s, get back records.
//!
//! - [`decode_record`] decodes a single account.
//! - [`BatchDecoder`] decodes many accounts, optionally on several threads, and reports every
//!     failure without stopping the batch.
//! - [`DecodeIter`] and [`DecodeStream`] decode accounts one at a time as an iterator or an
//!     asynchronous stream produces them.
//! - [`encode_record`] produces account data from a record, mainly for tests and tooling.
//!
//! Decoded records serialize to JSON with keys rendered as base58 and attestation expiries as
//! decimal strings:
//!
//! ```
//! # use sas_decode::*;
//! let record = Credential {
//!     authority: Key::default(),
//!     name: "Identity".to_string(),
//!     authorized_signers: Vec::new(),
//! };
//! let data = encode_record(&record.into());
//! let decoded = decode_record(&data).unwrap();
//! let json = serde_json::to_string(&decoded).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"type":"Credential","authority":"11111111111111111111111111111111","name":"Identity","authorizedSigners":[]}"#
//! );
//! ```
//!
//! The account byte layout is documented in [`layout`].

pub mod batch;
pub mod blob;
pub mod cursor;
pub mod decode;
pub mod encode;
pub mod error;
pub mod key;
pub mod layout;
pub mod record;
pub mod stream;
pub mod timestamp;

pub use batch::{decode_blob, BatchDecoder, BatchReport, DecodeFailure, Summary};
pub use blob::{AccountData, RawBlob};
pub use cursor::Cursor;
pub use decode::{decode_record, peek_tag};
pub use encode::encode_record;
pub use error::{Error, ErrorKind, Result};
pub use key::{Key, KEY_LEN};
pub use record::{AddressedRecord, Attestation, Credential, DecodedRecord, Schema, Tag};
pub use stream::{DecodeIter, DecodeStream};
pub use timestamp::Expiry;
