//! Routing between logical field devices and the serial-bridge process.
//!
//! The bridge executable owns the electrical layer; this crate owns its
//! pipes. Outbound, encoded request frames are written to the bridge's
//! stdin as single contiguous 8-byte writes. Inbound, the bridge's stdout
//! is drained non-blockingly, resynchronized into frames, decoded, and
//! dispatched to whichever device registered the response's id.

pub mod error;
pub mod link;
pub mod router;

pub use error::{Result, RouterError};
pub use link::{ChildLink, Link};
pub use router::{Router, RouterConfig};
