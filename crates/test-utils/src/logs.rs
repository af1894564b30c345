use std::io;
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt;

/// Log lines captured by [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let guard = self.buf.lock().unwrap();
        String::from_utf8_lossy(&guard).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture log output on the current thread until the guard is dropped.
///
/// Works with `#[tokio::test]` (current-thread runtime), since every task
/// then runs on the thread that installed the subscriber.
pub fn capture_logs(level: tracing::Level) -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let buf = Arc::clone(&logs.buf);

    let subscriber = fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || CapturedWriter(Arc::clone(&buf)))
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
