//! Adapters for decoding accounts as they arrive.
//!
//! [`DecodeIter`] wraps any iterator of [`RawBlob`]s, and [`DecodeStream`] does the same for an
//! asynchronous Stream, such as one fed by paged RPC responses. Both yield one result per blob
//! and keep going after a failure.

use std::{
    fmt,
    pin::Pin,
    task::{Context, Poll},
};

use futures_core::{ready, FusedStream, Stream};
use pin_project_lite::pin_project;

use crate::{
    batch::{decode_blob, BatchReport, DecodeFailure},
    blob::RawBlob,
    record::AddressedRecord,
};

/// An iterator adapter that decodes each blob from the inner iterator.
///
/// For the asynchronous version that works on streams, see [`DecodeStream`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct DecodeIter<I> {
    inner: I,
}

impl<I> DecodeIter<I>
where
    I: Iterator<Item = RawBlob>,
{
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Decode everything left in the iterator and gather the results.
    pub fn decode_all(self) -> BatchReport {
        self.collect()
    }
}

impl<I> Iterator for DecodeIter<I>
where
    I: Iterator<Item = RawBlob>,
{
    type Item = Result<AddressedRecord, DecodeFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(decode_blob)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pin_project! {
    /// A stream adapter that decodes each blob from the inner stream.
    ///
    /// For the synchronous version that works on iterators, see [`DecodeIter`].
    #[must_use = "streams do nothing unless polled"]
    pub struct DecodeStream<St> {
        #[pin]
        stream: St,
        decoded: usize,
        failed: usize,
    }
}

impl<St> fmt::Debug for DecodeStream<St>
where
    St: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DecodeStream")
            .field("stream", &self.stream)
            .field("decoded", &self.decoded)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<St> DecodeStream<St>
where
    St: Stream<Item = RawBlob>,
{
    pub fn new(stream: St) -> Self {
        Self {
            stream,
            decoded: 0,
            failed: 0,
        }
    }

    /// How many accounts have decoded successfully so far.
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// How many accounts have failed to decode so far.
    pub fn failed(&self) -> usize {
        self.failed
    }
}

impl<St> FusedStream for DecodeStream<St>
where
    St: Stream<Item = RawBlob> + FusedStream,
{
    fn is_terminated(&self) -> bool {
        self.stream.is_terminated()
    }
}

impl<St> Stream for DecodeStream<St>
where
    St: Stream<Item = RawBlob>,
{
    type Item = Result<AddressedRecord, DecodeFailure>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let blob = match ready!(this.stream.poll_next(cx)) {
            Some(blob) => blob,
            None => return Poll::Ready(None),
        };
        let result = decode_blob(blob);
        match result {
            Ok(_) => *this.decoded += 1,
            Err(_) => *this.failed += 1,
        }
        Poll::Ready(Some(result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}
