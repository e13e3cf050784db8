//! Blocking terminal reads moved off the async runtime.
//!
//! Each read runs on its own OS thread and hands its result over a channel.
//! A read still in flight when the runtime shuts down is simply left behind,
//! so exiting never waits for the user to press Enter.

use std::io::{self, BufRead};
use std::sync::mpsc as std_mpsc;
use std::thread;

use tokio::sync::{mpsc, oneshot};

/// Line source backed by a reader thread.
///
/// The thread only reads when a line is asked for, so nothing consumes
/// terminal input while the password prompt is up.
#[derive(Debug)]
pub struct LineReader {
    request: std_mpsc::Sender<()>,
    lines: mpsc::Receiver<io::Result<String>>,
    pending: bool,
}

impl LineReader {
    /// Start the reader thread over `reader`.
    pub fn spawn<R>(mut reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (request, requests) = std_mpsc::channel::<()>();
        let (tx, lines) = mpsc::channel(1);
        thread::Builder::new()
            .name("khctl-stdin".into())
            .spawn(move || {
                while requests.recv().is_ok() {
                    let mut line = String::new();
                    let read = match reader.read_line(&mut line) {
                        Ok(0) => break,
                        Ok(_) => Ok(strip_newline(line)),
                        Err(err) => Err(err),
                    };
                    let failed = read.is_err();
                    if tx.blocking_send(read).is_err() || failed {
                        break;
                    }
                }
                tracing::debug!("stdin reader exiting");
            })?;
        Ok(Self {
            request,
            lines,
            pending: false,
        })
    }

    /// Next line without its newline, or `None` at end of input.
    ///
    /// Cancel safe: a read started by a cancelled call is picked up by the
    /// next one.
    pub async fn next_line(&mut self) -> Option<io::Result<String>> {
        if !self.pending {
            self.request.send(()).ok()?;
            self.pending = true;
        }
        let line = self.lines.recv().await;
        self.pending = false;
        line
    }
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Prompt for a password without echo on the controlling terminal.
pub fn spawn_password_prompt(prompt: String) -> io::Result<oneshot::Receiver<io::Result<String>>> {
    let (tx, rx) = oneshot::channel();
    thread::Builder::new()
        .name("khctl-password".into())
        .spawn(move || {
            // Nobody waits for the answer after Ctrl-C.
            let _ = tx.send(rpassword::prompt_password(prompt));
        })?;
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use super::*;

    /// Source that never returns from `read`, like an idle terminal.
    struct Stalled;

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            loop {
                thread::park();
            }
        }
    }

    /// Counts the `read` calls reaching the underlying source.
    struct Counting {
        inner: Cursor<&'static str>,
        reads: Arc<AtomicUsize>,
    }

    impl Read for Counting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read(buf)
        }
    }

    #[tokio::test]
    async fn should_forward_lines_until_end_of_input() {
        let mut reader = LineReader::spawn(Cursor::new("start learning\n:map\r\n\nnext")).unwrap();

        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().await {
            lines.push(line.unwrap());
        }

        assert_eq!(lines, ["start learning", ":map", "", "next"]);
    }

    #[tokio::test]
    async fn should_stop_after_read_error() {
        let source = Cursor::new(vec![b'o', b'k', b'\n', 0xff, b'\n', b'x', b'\n']);
        let mut reader = LineReader::spawn(source).unwrap();

        assert_eq!(reader.next_line().await.unwrap().unwrap(), "ok");
        let err = reader.next_line().await.unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(reader.next_line().await.is_none());
    }

    #[tokio::test]
    async fn should_not_read_ahead_of_requests() {
        let reads = Arc::new(AtomicUsize::new(0));
        // Unbuffered so every line costs at least one read.
        let source = io::BufReader::with_capacity(
            1,
            Counting {
                inner: Cursor::new("a\nb\n"),
                reads: Arc::clone(&reads),
            },
        );
        let mut reader = LineReader::spawn(source).unwrap();

        assert_eq!(reader.next_line().await.unwrap().unwrap(), "a");
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn should_not_hold_runtime_shutdown_on_pending_read() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let mut reader = LineReader::spawn(io::BufReader::new(Stalled)).unwrap();
            let pending = tokio::time::timeout(Duration::from_millis(20), reader.next_line()).await;
            assert!(pending.is_err());
        });

        let started = Instant::now();
        drop(runtime);

        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
