//! Output targets and scoped capture of printed script text

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;
use tracing::debug;

type Sink = Box<dyn Write>;

struct Shared {
    sink: Sink,
    /// Active captures, innermost last
    captures: Vec<CaptureBuffer>,
}

/// Where printed output goes
///
/// Clones share the same underlying target, so a capture installed through
/// one handle is seen by every handle. Output goes to the innermost active
/// capture, or to the sink when none is active.
#[derive(Clone)]
pub struct OutputTarget {
    shared: Rc<RefCell<Shared>>,
}

impl OutputTarget {
    /// Print to the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn new<W: Write + 'static>(writer: W) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                sink: Box::new(writer),
                captures: Vec::new(),
            })),
        }
    }

    /// Write text to the current target
    pub fn print(&self, text: &str) -> io::Result<()> {
        self.write_with(|w| w.write_all(text.as_bytes()))
    }

    pub fn println(&self, text: &str) -> io::Result<()> {
        self.write_with(|w| {
            w.write_all(text.as_bytes())?;
            w.write_all(b"\n")
        })
    }

    pub fn flush(&self) -> io::Result<()> {
        self.write_with(|w| w.flush())
    }

    /// Redirect output into a fresh buffer until the guard is dropped
    pub fn capture(&self) -> CaptureGuard {
        let buffer = CaptureBuffer::default();
        self.shared.borrow_mut().captures.push(buffer.clone());
        debug!("Output capture started");

        CaptureGuard {
            target: self.clone(),
            buffer,
        }
    }

    /// Run `block` with output captured, returning its result and the text
    pub fn with_capture<T, F>(&self, block: F) -> (T, String)
    where
        F: FnOnce() -> T,
    {
        let guard = self.capture();
        let value = block();
        (value, guard.finish())
    }

    /// Number of captures currently active
    pub fn capture_depth(&self) -> usize {
        self.shared.borrow().captures.len()
    }

    fn write_with<F>(&self, write: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut shared = self.shared.borrow_mut();
        let Shared { sink, captures } = &mut *shared;
        match captures.last_mut() {
            Some(buffer) => write(buffer as &mut dyn Write),
            None => write(sink.as_mut()),
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputTarget")
            .field("capture_depth", &self.capture_depth())
            .finish_non_exhaustive()
    }
}

/// Shared in-memory buffer
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered bytes as text
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    fn is_same(&self, other: &CaptureBuffer) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Ends one capture when dropped, on every exit path.
///
/// Only this guard's own buffer is removed, so guards may be dropped in any
/// order and output always returns to the innermost capture still active.
pub struct CaptureGuard {
    target: OutputTarget,
    buffer: CaptureBuffer,
}

impl CaptureGuard {
    /// Text captured so far
    pub fn contents(&self) -> String {
        self.buffer.contents()
    }

    /// End the capture and return the captured text
    pub fn finish(self) -> String {
        self.contents()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        // Never panic in drop, even if the cell is still borrowed.
        if let Ok(mut shared) = self.target.shared.try_borrow_mut() {
            shared.captures.retain(|b| !b.is_same(&self.buffer));
            debug!(depth = shared.captures.len(), "Output capture ended");
        }
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("captured_bytes", &self.buffer.bytes.borrow().len())
            .finish()
    }
}
