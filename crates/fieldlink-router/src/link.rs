//! The byte-channel seam between the router and the bridge process.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use std::sync::mpsc::{self, Receiver};

use fieldlink_frame::Frame;

/// A connected bridge link — one non-blocking inbound byte channel, one
/// outbound frame channel.
///
/// The inbound and outbound sides are independent; nothing is shared
/// between them, so a poll and a write can never race.
pub trait Link {
    /// One inbound byte if any is ready; never blocks.
    fn try_read_byte(&mut self) -> Option<u8>;

    /// Write a frame's 8 bytes as a single contiguous write and flush.
    fn write_frame(&mut self, frame: &Frame) -> io::Result<()>;

    /// Whether the remote end of the link is still there.
    fn is_alive(&mut self) -> bool;
}

/// [`Link`] over an already-spawned bridge process.
///
/// Takes ownership of the child's piped stdin (outbound) and stdout
/// (inbound). A pump thread forwards stdout bytes into an mpsc channel so
/// the polling side can drain them without blocking; a second thread
/// forwards stderr lines, when piped, into tracing. Spawning, health
/// checking, and restarting the process remain the caller's job.
pub struct ChildLink {
    child: Child,
    stdin: ChildStdin,
    inbound: Receiver<u8>,
}

impl ChildLink {
    /// Wire up an already-spawned child whose stdin and stdout are piped.
    pub fn new(mut child: Child) -> io::Result<Self> {
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("bridge process stdin is not piped"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("bridge process stdout is not piped"))?;

        let (tx, inbound) = mpsc::channel();
        std::thread::spawn(move || pump_bytes(stdout, tx));
        if let Some(stderr) = child.stderr.take() {
            std::thread::spawn(move || forward_stderr(stderr));
        }

        Ok(Self {
            child,
            stdin,
            inbound,
        })
    }

    /// Pid of the bridge process.
    pub fn pid(&self) -> u32 {
        self.child.id()
    }
}

impl Link for ChildLink {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.inbound.try_recv().ok()
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.stdin.write_all(frame.as_ref())?;
        self.stdin.flush()
    }

    fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

impl std::fmt::Debug for ChildLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildLink")
            .field("pid", &self.child.id())
            .finish()
    }
}

/// Forward bridge stdout into the inbound channel, byte by byte.
///
/// Exits when the pipe closes or the receiving side is dropped.
fn pump_bytes(stdout: ChildStdout, tx: mpsc::Sender<u8>) {
    for byte in BufReader::new(stdout).bytes() {
        match byte {
            Ok(byte) => {
                if tx.send(byte).is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::debug!(%err, "bridge stdout closed");
                break;
            }
        }
    }
}

/// Forward bridge stderr lines into the log stream.
fn forward_stderr(stderr: ChildStderr) {
    for line in BufReader::new(stderr).lines() {
        match line {
            Ok(line) => tracing::info!(target: "bridge", "{line}"),
            Err(_) => break,
        }
    }
}
