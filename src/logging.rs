use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Mutex;

/// Append-only sink for per-record rejection reasons. Held by the
/// pipeline for the lifetime of a run; the log is diagnostic only and
/// write failures are ignored.
pub struct RejectLog {
    writer: Mutex<BufWriter<File>>,
}

impl RejectLog {
    pub fn create(path: &str) -> io::Result<Self> {
        Ok(Self {
            writer: Mutex::new(BufWriter::new(File::create(path)?)),
        })
    }

    pub fn log(&self, message: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", message);
        }
    }
}
