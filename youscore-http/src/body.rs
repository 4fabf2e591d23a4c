//! Replayable HTTP bodies.
//!
//! Request and response bodies are single-read streams. Fingerprinting a
//! request and snapshotting a response both need the full bytes, and the
//! request must still reach the transport intact afterwards, so a drained body
//! is put back as a buffered copy:
//!
//! ```text
//! Passthrough(stream) --collect()--> bytes --> Complete(Some(bytes))
//! ```
//!
//! ## Body States
//!
//! - **Complete**: Body was fully read and buffered; yields its bytes once
//! - **Passthrough**: Body was not read at all (zero overhead)

use bytes::{Buf, Bytes};
use http_body::{Body as HttpBody, Frame};
use pin_project::pin_project;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A body wrapper that is either untouched or fully buffered.
#[pin_project(project = BufferedBodyProj)]
pub enum BufferedBody<B>
where
    B: HttpBody,
{
    /// Body was fully read and buffered.
    ///
    /// The `Option` is used to yield the data once, then return `None` on subsequent polls.
    Complete(Option<Bytes>),

    /// Body was passed through without reading (untouched).
    Passthrough(#[pin] B),
}

impl<B> BufferedBody<B>
where
    B: HttpBody,
{
    /// A buffered body holding `bytes`.
    pub fn complete(bytes: Bytes) -> Self {
        BufferedBody::Complete(Some(bytes))
    }

    /// Collects the entire body into bytes.
    ///
    /// A `Complete` body returns its buffer without touching any stream.
    pub async fn collect(self) -> Result<Bytes, B::Error> {
        use http_body_util::BodyExt;

        match self {
            BufferedBody::Complete(Some(bytes)) => Ok(bytes),
            BufferedBody::Complete(None) => Ok(Bytes::new()),
            BufferedBody::Passthrough(body) => Ok(body.collect().await?.to_bytes()),
        }
    }
}

impl<B> HttpBody for BufferedBody<B>
where
    B: HttpBody,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.project() {
            BufferedBodyProj::Complete(data) => {
                if let Some(bytes) = data.take() {
                    Poll::Ready(Some(Ok(Frame::data(bytes))))
                } else {
                    Poll::Ready(None)
                }
            }

            BufferedBodyProj::Passthrough(body) => {
                // Delegate to the inner body and convert Data type
                match body.poll_frame(cx) {
                    Poll::Ready(Some(Ok(frame))) => {
                        let frame = frame.map_data(|mut data| data.copy_to_bytes(data.remaining()));
                        Poll::Ready(Some(Ok(frame)))
                    }
                    Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
                    Poll::Ready(None) => Poll::Ready(None),
                    Poll::Pending => Poll::Pending,
                }
            }
        }
    }

    fn size_hint(&self) -> http_body::SizeHint {
        match self {
            BufferedBody::Complete(Some(bytes)) => {
                let len = bytes.len() as u64;
                http_body::SizeHint::with_exact(len)
            }
            BufferedBody::Complete(None) => http_body::SizeHint::with_exact(0),

            BufferedBody::Passthrough(body) => body.size_hint(),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            BufferedBody::Complete(None) => true,
            BufferedBody::Complete(Some(_)) => false,

            BufferedBody::Passthrough(body) => body.is_end_stream(),
        }
    }
}

impl<B> fmt::Debug for BufferedBody<B>
where
    B: HttpBody,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferedBody::Complete(Some(bytes)) => f
                .debug_tuple("Complete")
                .field(&format!("{} bytes", bytes.len()))
                .finish(),
            BufferedBody::Complete(None) => f.debug_tuple("Complete").field(&"consumed").finish(),
            BufferedBody::Passthrough(_) => f.debug_tuple("Passthrough").field(&"...").finish(),
        }
    }
}
