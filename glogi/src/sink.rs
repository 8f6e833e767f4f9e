//! Output destination shared by every handler derived from one logger.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// A cloneable, serialized writer.
///
/// Each line is written and flushed under one lock, so lines from concurrent
/// callers never interleave.
#[derive(Clone)]
pub struct Sink(Arc<Mutex<Box<dyn Write + Send>>>);

impl Sink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Box::new(writer))))
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.0.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stdout()
    }
}

/// Lets a [`Sink`] back a `tracing_subscriber` fmt layer.
impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Sink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter {
            sink: self.clone(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one formatted event and hands it to the sink in a single locked write on drop.
pub struct SinkWriter {
    sink: Sink,
    buf: Vec<u8>,
}

impl Write for SinkWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let mut writer = self.sink.0.lock();
        writer.write_all(&self.buf)?;
        self.buf.clear();
        writer.flush()
    }
}

impl Drop for SinkWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
