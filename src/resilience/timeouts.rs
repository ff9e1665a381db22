//! Read deadline enforcement.
//!
//! [`DeadlineReader`] wraps any `AsyncRead` with an absolute deadline. Once
//! the deadline has passed every read fails with `io::ErrorKind::TimedOut`,
//! including reads that would otherwise have returned buffered data. A read
//! that is pending when the deadline fires is woken and fails the same way.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, ReadBuf};
use tokio::time::Sleep;

/// An `AsyncRead` that refuses to read past a fixed point in time.
#[derive(Debug)]
pub struct DeadlineReader<R> {
    inner: R,
    timeout: Duration,
    sleep: Pin<Box<Sleep>>,
}

impl<R> DeadlineReader<R> {
    /// Arm a deadline `timeout` from now.
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self {
            inner,
            timeout,
            sleep: Box::pin(tokio::time::sleep(timeout)),
        }
    }

    fn timed_out(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::TimedOut,
            format!("read deadline of {}s exceeded", self.timeout.as_secs()),
        )
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for DeadlineReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        if this.sleep.as_mut().poll(cx).is_ready() {
            return Poll::Ready(Err(this.timed_out()));
        }

        Pin::new(&mut this.inner).poll_read(cx, buf)
    }
}
