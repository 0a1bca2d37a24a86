//! 8-byte frame codec and stream resynchronization for field devices.
//!
//! Every message on the wire is exactly one fixed-length frame:
//!
//! ```text
//! ┌──────┬──────┬──────────┬───────┬───────┬───────┬────────┬────────┐
//! │ ID   │ KIND │ FUNCTION │ DATA1 │ DATA2 │ DATA3 │ CRC_LO │ CRC_HI │
//! │ 0-247│ 1-4  │          │       │       │       │        │        │
//! └──────┴──────┴──────────┴───────┴───────┴───────┴────────┴────────┘
//! ```
//!
//! The last two bytes are the Modbus CRC-16 of the first six. There is no
//! start delimiter; receivers recover frame alignment from a noisy or
//! mid-frame stream with [`Resynchronizer`], which slides a one-byte window
//! until a CRC-valid candidate appears.

pub mod codec;
pub mod crc;
pub mod error;
pub mod ident;
pub mod resync;

pub use codec::{Frame, Request, Response, FRAME_LEN};
pub use crc::crc16;
pub use error::{FrameError, Result};
pub use ident::{DeviceFamily, DeviceId, FrameKind, Function, JoystickFunction, VfdFunction};
pub use resync::Resynchronizer;
