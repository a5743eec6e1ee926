//! Decoding many accounts at once.
//!
//! A batch never stops on a bad account. Each account either lands in the report's `successes`,
//! in the same relative order it was handed in, or in `failures` with the reason it couldn't be
//! decoded. Large batches are split into contiguous chunks and decoded on worker threads; chunk
//! results are stitched back together in chunk order, so the output order doesn't depend on
//! which worker finished first.

use std::fmt;
use std::io;
use std::iter::FromIterator;

use educe::Educe;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    blob::{AccountData, RawBlob},
    decode::decode_record,
    error::{Error, ErrorKind},
    record::AddressedRecord,
};

/// An account that couldn't be decoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeFailure {
    pub address: String,
    pub error_kind: ErrorKind,
    pub message: String,
}

impl DecodeFailure {
    pub fn new(address: impl Into<String>, err: &Error) -> Self {
        Self {
            address: address.into(),
            error_kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.address, self.message)
    }
}

/// Decode a single account, consuming it.
pub fn decode_blob(blob: RawBlob) -> Result<AddressedRecord, DecodeFailure> {
    match decode_record(&blob.data) {
        Ok(record) => {
            debug!(address = %blob.address, kind = %record.tag(), "decoded account");
            Ok(AddressedRecord {
                pubkey: blob.address,
                record,
            })
        }
        Err(err) => {
            debug!(address = %blob.address, %err, "failed to decode account");
            Err(DecodeFailure::new(blob.address, &err))
        }
    }
}

/// Counts of decoded and failed accounts in a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub decoded: usize,
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "decoded {} records, {} failures",
            self.decoded, self.failed
        )
    }
}

/// The outcome of decoding a batch of accounts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub successes: Vec<AddressedRecord>,
    pub failures: Vec<DecodeFailure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one account's outcome to the end of the report.
    pub fn push(&mut self, result: Result<AddressedRecord, DecodeFailure>) {
        match result {
            Ok(record) => self.successes.push(record),
            Err(failure) => {
                warn!(
                    address = %failure.address,
                    kind = %failure.error_kind,
                    "{}",
                    failure.message
                );
                self.failures.push(failure);
            }
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            decoded: self.successes.len(),
            failed: self.failures.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Write the decoded records as a pretty-printed JSON array.
    pub fn write_json<W: io::Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.successes)
    }

    /// Write the failures as a pretty-printed JSON array.
    pub fn write_failures_json<W: io::Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.failures)
    }

    /// The decoded records as a pretty-printed JSON array.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.successes)
    }
}

impl Extend<Result<AddressedRecord, DecodeFailure>> for BatchReport {
    fn extend<T: IntoIterator<Item = Result<AddressedRecord, DecodeFailure>>>(&mut self, iter: T) {
        for result in iter {
            self.push(result);
        }
    }
}

impl FromIterator<Result<AddressedRecord, DecodeFailure>> for BatchReport {
    fn from_iter<T: IntoIterator<Item = Result<AddressedRecord, DecodeFailure>>>(iter: T) -> Self {
        let mut report = BatchReport::new();
        report.extend(iter);
        report
    }
}

/// Decodes batches of accounts, optionally across several threads.
///
/// ```
/// # use sas_decode::*;
/// let blobs = vec![RawBlob::new("a", vec![0u8]), RawBlob::new("b", Vec::new())];
/// let report = BatchDecoder::new().parallelism(1).decode(blobs);
/// assert_eq!(report.summary(), Summary { decoded: 0, failed: 2 });
/// ```
#[derive(Educe, Clone)]
#[educe(Debug, Default)]
pub struct BatchDecoder {
    #[educe(Default(expression = num_cpus::get()))]
    parallelism: usize,
    #[educe(Default = 64)]
    min_parallel_batch: usize,
}

impl BatchDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of worker threads. 1 decodes everything on the calling thread. 0 is
    /// treated as 1.
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers.max(1);
        self
    }

    /// Batches with fewer accounts than this are always decoded on the calling thread.
    pub fn min_parallel_batch(mut self, len: usize) -> Self {
        self.min_parallel_batch = len;
        self
    }

    /// Decode every blob, consuming them.
    pub fn decode(&self, blobs: Vec<RawBlob>) -> BatchReport {
        self.decode_items(blobs.into_iter().map(Ok).collect())
    }

    /// Decode accounts still in their RPC `[payload, encoding]` form. Accounts whose payload
    /// can't be turned into bytes are reported as failures alongside the ones that don't decode.
    pub fn decode_accounts<I>(&self, accounts: I) -> BatchReport
    where
        I: IntoIterator<Item = (String, AccountData)>,
    {
        let items = accounts
            .into_iter()
            .map(|(address, data)| match data.decode() {
                Ok(bytes) => Ok(RawBlob::new(address, bytes)),
                Err(err) => Err(DecodeFailure::new(address, &err)),
            })
            .collect();
        self.decode_items(items)
    }

    fn workers_for(&self, len: usize) -> usize {
        if len < self.min_parallel_batch.max(2) {
            1
        } else {
            self.parallelism.max(1).min(len)
        }
    }

    fn decode_items(&self, items: Vec<Result<RawBlob, DecodeFailure>>) -> BatchReport {
        let total = items.len();
        let workers = self.workers_for(total);
        debug!(total, workers, "decoding batch");

        let report: BatchReport = if workers <= 1 {
            items.into_iter().map(|item| item.and_then(decode_blob)).collect()
        } else {
            let chunk_size = (total + workers - 1) / workers;
            let mut chunks = Vec::with_capacity(workers);
            let mut items = items.into_iter();
            loop {
                let chunk: Vec<_> = items.by_ref().take(chunk_size).collect();
                if chunk.is_empty() {
                    break;
                }
                chunks.push(chunk);
            }
            std::thread::scope(|s| {
                let handles: Vec<_> = chunks
                    .into_iter()
                    .map(|chunk| {
                        s.spawn(move || {
                            chunk
                                .into_iter()
                                .map(|item| item.and_then(decode_blob))
                                .collect::<Vec<_>>()
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .flat_map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                    .collect::<BatchReport>()
            })
        };

        let summary = report.summary();
        info!(decoded = summary.decoded, failed = summary.failed, "batch complete");
        report
    }
}
