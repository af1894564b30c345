// src/exec/output.rs

//! Feeding stdin, draining stdout/stderr and waiting for a child.
//!
//! Shared by the execution core and the activation-aware path. Streams are
//! read as raw bytes on their own tasks while we wait, so a chatty child can't
//! block on a full pipe. Decoding into text happens afterwards with an
//! explicit replace-invalid-sequences policy.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Child;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How long to keep draining pipes after killing a cancelled child.
///
/// Grandchildren that inherited the pipes can keep them open indefinitely.
const DRAIN_AFTER_KILL: Duration = Duration::from_millis(500);

/// Raw result of a finished child.
#[derive(Debug)]
pub(crate) struct Collected {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Decode captured bytes as UTF-8, substituting U+FFFD for invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Write `input` to the child's stdin (if piped), drain its output pipes and
/// wait for it to exit.
///
/// If `cancel_rx` fires first the child is killed and its kill status is
/// returned instead.
pub(crate) async fn communicate(
    child: &mut Child,
    input: Option<String>,
    mut cancel_rx: oneshot::Receiver<()>,
    command: &str,
) -> io::Result<Collected> {
    let stdout_task = child.stdout.take().map(|s| tokio::spawn(read_all(s)));
    let stderr_task = child.stderr.take().map(|s| tokio::spawn(read_all(s)));

    let stdin_task = child.stdin.take().map(|mut stdin| {
        tokio::spawn(async move {
            if let Some(input) = input {
                stdin.write_all(input.as_bytes()).await?;
            }
            stdin.flush().await?;
            // `stdin` is dropped here, closing the pipe so the child sees EOF.
            Ok::<(), io::Error>(())
        })
    });

    let mut killed = false;
    let status = tokio::select! {
        status = child.wait() => status?,

        cancel = &mut cancel_rx => {
            match cancel {
                Ok(()) => {
                    info!(command, "cancellation requested; killing process");
                    if let Err(e) = child.kill().await {
                        warn!(command, error = %e, "failed to kill child process on cancellation");
                    }
                    killed = true;
                }
                Err(_) => {
                    debug!(command, "cancel channel closed without explicit cancellation");
                }
            }
            child.wait().await?
        }
    };

    if let Some(task) = stdin_task {
        if killed {
            task.abort();
        } else {
            match join(task).await {
                Ok(()) => {}
                // The child exited (or closed stdin) without reading everything.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!(command, "child closed stdin before all input was written");
                }
                Err(e) => return Err(e),
            }
        }
    }

    let limit = killed.then_some(DRAIN_AFTER_KILL);
    let stdout = drain(stdout_task, limit, command).await?;
    let stderr = drain(stderr_task, limit, command).await?;

    Ok(Collected {
        status,
        stdout,
        stderr,
    })
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

async fn drain(
    task: Option<JoinHandle<io::Result<Vec<u8>>>>,
    limit: Option<Duration>,
    command: &str,
) -> io::Result<Vec<u8>> {
    let Some(mut task) = task else {
        return Ok(Vec::new());
    };
    let Some(limit) = limit else {
        return join(task).await;
    };

    match tokio::time::timeout(limit, &mut task).await {
        Ok(res) => res.map_err(io::Error::other)?,
        Err(_) => {
            task.abort();
            debug!(command, "output pipe still open after kill; discarding");
            Ok(Vec::new())
        }
    }
}

async fn join<T>(task: JoinHandle<io::Result<T>>) -> io::Result<T> {
    task.await.map_err(io::Error::other)?
}
