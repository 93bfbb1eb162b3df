use md5::digest::Update;
use pin_project_lite::pin_project;
use std::io::Result as IoResult;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::io::{AsyncRead, ReadBuf};

pin_project! {
    /// An [`AsyncRead`] decorator that feeds everything it returns into `H`.
    ///
    /// Async equivalent of [`TeeReader`](crate::TeeReader).
    pub struct AsyncTeeReader<R, H> {
        #[pin]
        reader: R,
        hasher: H,
    }
}

impl<R: AsyncRead, H: Update> AsyncTeeReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self { reader, hasher }
    }

    pub fn into_parts(self) -> (R, H) {
        (self.reader, self.hasher)
    }
}

impl<R: AsyncRead, H: Update> AsyncRead for AsyncTeeReader<R, H> {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<IoResult<()>> {
        let this = self.project();
        let before = buf.filled().len();
        ready!(this.reader.poll_read(cx, buf))?;
        this.hasher.update(&buf.filled()[before..]);
        Poll::Ready(Ok(()))
    }
}
