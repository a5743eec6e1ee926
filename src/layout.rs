/*!

The byte layout of attestation-service accounts.

Every account begins with a single tag byte naming its type, followed immediately by that type's
fields. There is no padding, no alignment, and no length for the account as a whole. Anything after
the last field is ignored by the decoder.

# Field Encodings

- **Key**: 32 raw bytes. Rendered as base58 text when written out as JSON.
- **String**: a 4-byte little-endian length `L`, then `L` bytes of UTF-8. Invalid UTF-8 fails the
    whole account.
- **Vector of keys**: a 4-byte little-endian count `C`, then `C` keys back to back.
- **u8**: one byte.
- **i64**: 8 bytes, little-endian, two's complement.

# Tags

| Tag | Account     |
|-----|-------------|
| 0   | Credential  |
| 1   | Schema      |
| 2   | Attestation |

Any other tag byte is rejected.

# Credential

| Field              | Encoding       |
|--------------------|----------------|
| authority          | Key            |
| name               | String         |
| authorized signers | Vector of keys |

# Schema

| Field       | Encoding |
|-------------|----------|
| credential  | Key      |
| name        | String   |
| description | String   |
| layout      | String   |
| field names | String   |
| is paused   | u8       |
| version     | u8       |

`is paused` is true only when the byte is exactly 1.

# Attestation

| Field         | Encoding |
|---------------|----------|
| nonce         | Key      |
| credential    | Key      |
| schema        | Key      |
| data          | String   |
| signer        | Key      |
| expiry        | i64      |
| token account | Key      |

`expiry` counts seconds since the Unix epoch, with 0 meaning the attestation never expires. When
nonzero, decoding also derives an ISO-8601 date for it, which must fall within 100,000,000 days of
the epoch. Expiries outside that range fail the account rather than produce a date.

Credentials and attestations carry no version byte. If the program ever changes either layout,
these decoders need a matching change.

*/
