use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll, Waker};

/// Poll a future once, expecting it to be immediately ready.
///
/// This is a convenience for synchronous contexts (editor UI, CLI tools,
/// tests) where the provider does blocking I/O (e.g.
/// [`DirectProvider`](crate::DirectProvider),
/// [`FileTransport`](crate::FileTransport),
/// [`MemoryTransport`](crate::MemoryTransport)) and the future completes
/// on the first poll.
///
/// # Panics
///
/// Panics if the future returns `Poll::Pending`. This should not happen
/// with blocking providers but would indicate a transport that requires
/// a real async runtime (e.g. [`HttpTransport`](crate::HttpTransport)).
pub fn poll_now<T>(fut: impl Future<Output = T>) -> T {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    match fut.as_mut().poll(&mut cx) {
        Poll::Ready(val) => val,
        Poll::Pending => panic!("asset future returned Pending, run it on an async runtime"),
    }
}
