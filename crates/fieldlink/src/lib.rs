//! Fixed-frame protocol layer for field devices.
//!
//! fieldlink exchanges 8-byte CRC-checked frames with field devices (VFDs,
//! joystick controllers) through a serial-bridge subprocess and routes
//! decoded responses back to the logical device that requested them.
//!
//! # Crate Structure
//!
//! - [`frame`] — CRC engine, frame codec, stream resynchronizer
//! - [`router`] — bridge-process pipes, device registry, response dispatch

/// Re-export frame types.
pub mod frame {
    pub use fieldlink_frame::*;
}

/// Re-export router types.
pub mod router {
    pub use fieldlink_router::*;
}
