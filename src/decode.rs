//! Account decoding.
//!
//! Every account starts with a one-byte [`Tag`], followed by the fields of that account type in a
//! fixed order. See [`layout`][crate::layout] for the byte-level format. [`decode_record`] reads
//! the tag and hands the rest of the buffer to the matching decoder. The per-type decoders take a
//! cursor already positioned just past the tag.
//!
//! Bytes left over after the last field are ignored.

use crate::{
    cursor::Cursor,
    error::{Error, Result},
    record::{Attestation, Credential, DecodedRecord, Schema, Tag},
    timestamp::Expiry,
};

/// Read the tag of an account without decoding anything else.
pub fn peek_tag(buf: &[u8]) -> Result<Tag> {
    let tag = *buf.first().ok_or(Error::EmptyBuffer)?;
    Tag::from_u8(tag).ok_or(Error::UnknownTag(tag))
}

/// Decode a complete account, dispatching on its leading tag byte.
pub fn decode_record(buf: &[u8]) -> Result<DecodedRecord> {
    let tag = peek_tag(buf)?;
    let mut cur = Cursor::at(buf, 1)?;
    Ok(match tag {
        Tag::Credential => DecodedRecord::Credential(decode_credential(&mut cur)?),
        Tag::Schema => DecodedRecord::Schema(decode_schema(&mut cur)?),
        Tag::Attestation => DecodedRecord::Attestation(decode_attestation(&mut cur)?),
    })
}

pub fn decode_credential(cur: &mut Cursor) -> Result<Credential> {
    let authority = cur.read_key("credential authority")?;
    let name = cur.read_string("credential name")?;
    let authorized_signers = cur.read_vec_of_keys("credential authorized signers")?;
    Ok(Credential {
        authority,
        name,
        authorized_signers,
    })
}

pub fn decode_schema(cur: &mut Cursor) -> Result<Schema> {
    let credential = cur.read_key("schema credential")?;
    let name = cur.read_string("schema name")?;
    let description = cur.read_string("schema description")?;
    let layout = cur.read_string("schema layout")?;
    let field_names = cur.read_string("schema field names")?;
    // Only an exact 1 counts as paused.
    let is_paused = cur.read_u8("schema is_paused")? == 1;
    let version = cur.read_u8("schema version")?;
    Ok(Schema {
        credential,
        name,
        description,
        layout,
        field_names,
        is_paused,
        version,
    })
}

pub fn decode_attestation(cur: &mut Cursor) -> Result<Attestation> {
    let nonce = cur.read_key("attestation nonce")?;
    let credential = cur.read_key("attestation credential")?;
    let schema = cur.read_key("attestation schema")?;
    let data = cur.read_string("attestation data")?;
    let signer = cur.read_key("attestation signer")?;
    let expiry = Expiry::from_secs(cur.read_i64_le("attestation expiry")?);
    let token_account = cur.read_key("attestation token account")?;
    let expiry_date = expiry.to_iso8601()?;
    Ok(Attestation {
        nonce,
        credential,
        schema,
        data,
        signer,
        expiry,
        expiry_date,
        token_account,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        encode::encode_record,
        error::ErrorKind,
        key::{Key, KEY_LEN},
    };
    use rand::Rng;

    fn prefixed(s: &str) -> Vec<u8> {
        let mut v = (s.len() as u32).to_le_bytes().to_vec();
        v.extend_from_slice(s.as_bytes());
        v
    }

    fn rand_key<R: Rng>(rng: &mut R) -> Key {
        Key::new(rng.gen())
    }

    fn rand_string<R: Rng>(rng: &mut R) -> String {
        let len = rng.gen_range(0..40);
        (0..len).map(|_| rng.gen::<char>()).collect()
    }

    fn sample_records() -> Vec<DecodedRecord> {
        let mut rng = rand::thread_rng();
        let mut records = Vec::new();
        for signers in [0usize, 1, 5] {
            records.push(DecodedRecord::Credential(Credential {
                authority: rand_key(&mut rng),
                name: rand_string(&mut rng),
                authorized_signers: (0..signers).map(|_| rand_key(&mut rng)).collect(),
            }));
        }
        for (is_paused, version) in [(false, 0u8), (true, 1), (false, 255)] {
            records.push(DecodedRecord::Schema(Schema {
                credential: rand_key(&mut rng),
                name: rand_string(&mut rng),
                description: rand_string(&mut rng),
                layout: rand_string(&mut rng),
                field_names: rand_string(&mut rng),
                is_paused,
                version,
            }));
        }
        for secs in [0i64, 1_700_000_000, 4_102_444_800, -86_400] {
            let expiry = Expiry::from_secs(secs);
            records.push(DecodedRecord::Attestation(Attestation {
                nonce: rand_key(&mut rng),
                credential: rand_key(&mut rng),
                schema: rand_key(&mut rng),
                data: rand_string(&mut rng),
                signer: rand_key(&mut rng),
                expiry,
                expiry_date: expiry.to_iso8601().unwrap(),
                token_account: rand_key(&mut rng),
            }));
        }
        records
    }

    #[test]
    fn roundtrip() {
        for (index, record) in sample_records().iter().enumerate() {
            println!("Test #{}: {} record", index, record.tag());
            let enc = encode_record(record);
            assert_eq!(peek_tag(&enc).unwrap(), record.tag());
            let decoded = decode_record(&enc).unwrap();
            assert_eq!(&decoded, record);
        }
    }

    #[test]
    fn too_short() {
        // Every proper prefix that still has the tag must fail as out of bounds.
        for record in sample_records() {
            let enc = encode_record(&record);
            for len in 1..enc.len() {
                let err = decode_record(&enc[..len]).unwrap_err();
                assert_eq!(
                    err.kind(),
                    ErrorKind::OutOfBounds,
                    "{} record cut to {} of {} bytes",
                    record.tag(),
                    len,
                    enc.len()
                );
            }
        }
    }

    #[test]
    fn trailing_bytes_ignored() {
        for record in sample_records() {
            let mut enc = encode_record(&record);
            enc.extend_from_slice(&[0xAA; 17]);
            assert_eq!(decode_record(&enc).unwrap(), record);
        }
    }

    #[test]
    fn empty() {
        assert_eq!(decode_record(&[]).unwrap_err(), Error::EmptyBuffer);
        assert_eq!(peek_tag(&[]).unwrap_err(), Error::EmptyBuffer);
    }

    #[test]
    fn unknown_tags() {
        for record in sample_records() {
            let mut enc = encode_record(&record);
            for tag in 3..=u8::MAX {
                enc[0] = tag;
                assert_eq!(decode_record(&enc).unwrap_err(), Error::UnknownTag(tag));
            }
        }
    }

    #[test]
    fn tag_only() {
        for tag in 0..3u8 {
            let err = decode_record(&[tag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        }
    }

    #[test]
    fn schema_scenario() {
        let mut buf = vec![1u8];
        buf.extend_from_slice(&[0u8; KEY_LEN]);
        buf.extend(prefixed("Age"));
        buf.extend(prefixed(""));
        buf.extend(prefixed("[]"));
        buf.extend(prefixed("[]"));
        buf.push(0);
        buf.push(1);
        let record = decode_record(&buf).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Schema",
                "credential": "11111111111111111111111111111111",
                "name": "Age",
                "description": "",
                "layout": "[]",
                "fieldNames": "[]",
                "isPaused": false,
                "version": 1,
            })
        );
    }

    #[test]
    fn credential_scenario() {
        let authority = Key::new([9u8; KEY_LEN]);
        let mut buf = vec![0u8];
        buf.extend_from_slice(authority.as_bytes());
        buf.extend(prefixed("Identity"));
        buf.extend_from_slice(&0u32.to_le_bytes());
        let record = decode_record(&buf).unwrap();
        assert_eq!(
            record,
            DecodedRecord::Credential(Credential {
                authority,
                name: "Identity".into(),
                authorized_signers: Vec::new(),
            })
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["authority"], authority.to_string());
        assert_eq!(json["authorizedSigners"], serde_json::json!([]));
    }

    #[test]
    fn paused_is_exactly_one() {
        let mut schema = Schema {
            credential: Key::default(),
            name: "n".into(),
            description: "d".into(),
            layout: "l".into(),
            field_names: "f".into(),
            is_paused: true,
            version: 3,
        };
        let mut enc = encode_record(&schema.clone().into());
        let paused_at = enc.len() - 2;
        for (byte, expected) in [(0u8, false), (1, true), (2, false), (255, false)] {
            enc[paused_at] = byte;
            schema.is_paused = expected;
            assert_eq!(decode_record(&enc).unwrap(), DecodedRecord::Schema(schema.clone()));
        }
    }

    #[test]
    fn bad_utf8_fails_record() {
        let mut buf = vec![0u8];
        buf.extend_from_slice(&[3u8; KEY_LEN]);
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&[0xc3, 0x28]);
        buf.extend_from_slice(&0u32.to_le_bytes());
        let err = decode_record(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
    }

    #[test]
    fn expiry_dates() {
        let attestation = |secs: i64| {
            DecodedRecord::Attestation(Attestation {
                nonce: Key::default(),
                credential: Key::default(),
                schema: Key::default(),
                data: String::new(),
                signer: Key::default(),
                expiry: Expiry::from_secs(secs),
                expiry_date: None,
                token_account: Key::default(),
            })
        };

        let decoded = decode_record(&encode_record(&attestation(0))).unwrap();
        assert_eq!(decoded.as_attestation().unwrap().expiry_date, None);

        let decoded = decode_record(&encode_record(&attestation(4_102_444_800))).unwrap();
        assert_eq!(
            decoded.as_attestation().unwrap().expiry_date.as_deref(),
            Some("2100-01-01T00:00:00.000Z")
        );

        let err = decode_record(&encode_record(&attestation(i64::MAX))).unwrap_err();
        assert_eq!(err, Error::ExpiryOutOfRange(i64::MAX));
    }
}
