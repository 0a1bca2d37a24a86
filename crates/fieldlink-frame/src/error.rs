use crate::ident::{DeviceFamily, FrameKind, Function};

/// Errors that can occur during frame encoding/decoding.
///
/// Encode and decode are total over their input domain — every failure is
/// one of these values, never a panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// A raw frame is not exactly 8 bytes long.
    #[error("wrong frame length ({len} bytes, expected 8)")]
    Length { len: usize },

    /// The trailing CRC bytes do not match the CRC of the first six.
    #[error("CRC mismatch (computed {expected:02x?}, frame carries {found:02x?})")]
    Crc { expected: [u8; 2], found: [u8; 2] },

    /// Byte 0 is not an addressable device id (0-247).
    #[error("byte 0 ({0}) is not an addressable device id")]
    InvalidId(u8),

    /// Byte 1 is not a recognized frame kind code.
    #[error("unknown frame kind code {0}")]
    UnknownKind(u8),

    /// A response frame carries a request kind.
    #[error("{0:?} is a request kind, responses must carry a response kind")]
    KindNotResponse(FrameKind),

    /// An outbound request carries a response kind.
    #[error("{0:?} is a response kind, requests must carry a request kind")]
    KindNotRequest(FrameKind),

    /// Byte 2 is not a recognized function code for the kind's family.
    #[error("unknown {family:?} function code {code}")]
    UnknownFunction { family: DeviceFamily, code: u8 },

    /// The request's function belongs to a different device family than its kind.
    #[error("function {function:?} does not belong to the {kind:?} family")]
    FamilyMismatch { kind: FrameKind, function: Function },

    /// Run and Stop acknowledge silently; they never appear in a response.
    #[error("function {0:?} never appears in a response")]
    UnexpectedFunction(Function),

    /// Byte 3 must be a sign flag: 0 (positive) or 1 (negative).
    #[error("invalid sign flag {0} (expected 0 or 1)")]
    InvalidSign(u8),

    /// The magnitude in bytes 4-5 does not fit the signed 16-bit value range.
    #[error("value magnitude {0} exceeds 32767")]
    ValueOutOfRange(u16),
}

pub type Result<T> = std::result::Result<T, FrameError>;
