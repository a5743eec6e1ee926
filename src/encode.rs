//! Account encoding.
//!
//! The exact inverse of [`decode`][crate::decode]: writes the tag byte, then each field in
//! order. Attestation expiry dates are derived on decode, so `expiry_date` is never written.

use crate::{
    key::Key,
    record::{Attestation, Credential, DecodedRecord, Schema, Tag},
};

/// Encode a record into a new byte vector. For extending an existing byte vector, see
/// [`encode_record_vec`].
pub fn encode_record(record: &DecodedRecord) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_record_vec(record, &mut buf);
    buf
}

pub fn encode_record_vec(record: &DecodedRecord, buf: &mut Vec<u8>) {
    buf.push(record.tag().to_u8());
    match record {
        DecodedRecord::Credential(v) => encode_credential(v, buf),
        DecodedRecord::Schema(v) => encode_schema(v, buf),
        DecodedRecord::Attestation(v) => encode_attestation(v, buf),
    }
}

/// Encode a credential's fields. Doesn't write the tag.
pub fn encode_credential(v: &Credential, buf: &mut Vec<u8>) {
    write_key(buf, &v.authority);
    write_str(buf, &v.name);
    write_len(buf, v.authorized_signers.len());
    for signer in v.authorized_signers.iter() {
        write_key(buf, signer);
    }
}

/// Encode a schema's fields. Doesn't write the tag.
pub fn encode_schema(v: &Schema, buf: &mut Vec<u8>) {
    write_key(buf, &v.credential);
    write_str(buf, &v.name);
    write_str(buf, &v.description);
    write_str(buf, &v.layout);
    write_str(buf, &v.field_names);
    buf.push(v.is_paused as u8);
    buf.push(v.version);
}

/// Encode an attestation's fields. Doesn't write the tag.
pub fn encode_attestation(v: &Attestation, buf: &mut Vec<u8>) {
    write_key(buf, &v.nonce);
    write_key(buf, &v.credential);
    write_key(buf, &v.schema);
    write_str(buf, &v.data);
    write_key(buf, &v.signer);
    buf.extend_from_slice(&v.expiry.secs().to_le_bytes());
    write_key(buf, &v.token_account);
}

/// Encode a bare tag byte followed by nothing. Mostly useful for building malformed accounts.
pub fn encode_tag(tag: Tag, buf: &mut Vec<u8>) {
    buf.push(tag.to_u8());
}

fn write_key(buf: &mut Vec<u8>, key: &Key) {
    buf.extend_from_slice(key.as_bytes());
}

fn write_len(buf: &mut Vec<u8>, len: usize) {
    assert!(len <= (u32::MAX as usize));
    buf.extend_from_slice(&(len as u32).to_le_bytes());
}

fn write_str(buf: &mut Vec<u8>, s: &str) {
    write_len(buf, s.len());
    buf.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{key::KEY_LEN, timestamp::Expiry};

    #[test]
    fn credential_bytes() {
        let record = DecodedRecord::Credential(Credential {
            authority: Key::new([0xAB; KEY_LEN]),
            name: "Id".into(),
            authorized_signers: vec![Key::new([0x01; KEY_LEN])],
        });
        let enc = encode_record(&record);
        let mut expected = vec![0u8];
        expected.extend_from_slice(&[0xAB; KEY_LEN]);
        expected.extend_from_slice(&[2, 0, 0, 0, b'I', b'd']);
        expected.extend_from_slice(&[1, 0, 0, 0]);
        expected.extend_from_slice(&[0x01; KEY_LEN]);
        assert_eq!(enc, expected);
    }

    #[test]
    fn attestation_length() {
        let record = DecodedRecord::Attestation(Attestation {
            nonce: Key::default(),
            credential: Key::default(),
            schema: Key::default(),
            data: "abc".into(),
            signer: Key::default(),
            expiry: Expiry::from_secs(-1),
            expiry_date: Some("ignored".into()),
            token_account: Key::default(),
        });
        let enc = encode_record(&record);
        assert_eq!(enc.len(), 1 + 3 * KEY_LEN + 4 + 3 + KEY_LEN + 8 + KEY_LEN);
        assert_eq!(enc[0], 2);
        let expiry_at = 1 + 4 * KEY_LEN + 4 + 3;
        assert_eq!(&enc[expiry_at..expiry_at + 8], &[0xff; 8]);
    }
}
