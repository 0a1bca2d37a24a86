//! Typed requests/responses and their 8-byte wire encoding.
//!
//! Requests travel outbound only, responses inbound only; the two are never
//! encode/decode-interchangeable. Only a VFD Run request carries payload
//! bytes (sign flag + big-endian magnitude of the frequency reference in
//! 0.01 Hz steps); every other function leaves bytes 3-5 zero.

use crate::crc::crc16;
use crate::error::{FrameError, Result};
use crate::ident::{DeviceId, Function, FrameKind, JoystickFunction, VfdFunction};

/// Wire size of every frame.
pub const FRAME_LEN: usize = 8;

/// A complete, CRC-valid 8-byte wire frame.
///
/// `[id, kind, function, data1, data2, data3, crc_lo, crc_hi]` where the
/// trailing two bytes are the CRC-16 of the first six. The constructors are
/// the only way to obtain one, so holding a `Frame` implies the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Validate `raw` as a complete frame: exactly 8 bytes whose trailing
    /// CRC matches the leading six.
    pub fn from_wire(raw: &[u8]) -> Result<Self> {
        let bytes: [u8; FRAME_LEN] = raw
            .try_into()
            .map_err(|_| FrameError::Length { len: raw.len() })?;
        let expected = crc16(&bytes[..FRAME_LEN - 2]);
        let found = [bytes[6], bytes[7]];
        if expected != found {
            return Err(FrameError::Crc { expected, found });
        }
        Ok(Self(bytes))
    }

    /// Seal `body` (bytes 0-5) with its CRC.
    fn seal(body: [u8; FRAME_LEN - 2]) -> Self {
        let crc = crc16(&body);
        let mut bytes = [0u8; FRAME_LEN];
        bytes[..FRAME_LEN - 2].copy_from_slice(&body);
        bytes[6] = crc[0];
        bytes[7] = crc[1];
        Self(bytes)
    }

    /// The raw wire bytes.
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Consume into the raw wire bytes.
    pub fn into_bytes(self) -> [u8; FRAME_LEN] {
        self.0
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An outbound command for a field device.
///
/// Freely constructible; validity (a request kind, a function of the
/// matching family) is checked by [`Request::is_valid`] and enforced by
/// [`Request::encode`] — an invalid request never produces a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    id: DeviceId,
    kind: FrameKind,
    function: Function,
    payload: [u8; 3],
}

impl Request {
    pub fn new(id: DeviceId, kind: FrameKind, function: Function, payload: [u8; 3]) -> Self {
        Self {
            id,
            kind,
            function,
            payload,
        }
    }

    /// Command a VFD to run at `hertz` (negative reverses), encoded at
    /// 0.01 Hz resolution: scaled by 100, rounded to nearest, clamped to
    /// `[-32767, 32767]`, then split into sign flag + big-endian magnitude.
    pub fn vfd_run(id: DeviceId, hertz: f64) -> Self {
        let reference = (hertz * 100.0).round().clamp(-32767.0, 32767.0) as i16;
        let sign = u8::from(reference < 0);
        let magnitude = reference.unsigned_abs();
        Self::new(
            id,
            FrameKind::VfdRequest,
            Function::Vfd(VfdFunction::Run),
            [sign, (magnitude >> 8) as u8, (magnitude & 0x00ff) as u8],
        )
    }

    /// Command a VFD to stop.
    pub fn vfd_stop(id: DeviceId) -> Self {
        Self::new(
            id,
            FrameKind::VfdRequest,
            Function::Vfd(VfdFunction::Stop),
            [0; 3],
        )
    }

    /// Ask a VFD for its current status.
    pub fn vfd_status(id: DeviceId) -> Self {
        Self::new(
            id,
            FrameKind::VfdRequest,
            Function::Vfd(VfdFunction::Status),
            [0; 3],
        )
    }

    /// Poll one joystick channel (axis, thumb axis, or button).
    pub fn joystick(id: DeviceId, function: JoystickFunction) -> Self {
        Self::new(
            id,
            FrameKind::JoystickRequest,
            Function::Joystick(function),
            [0; 3],
        )
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn function(&self) -> Function {
        self.function
    }

    /// True when this request can encode: a request kind carrying a
    /// function of its own family.
    pub fn is_valid(&self) -> bool {
        self.kind.is_request() && self.function.family() == self.kind.family()
    }

    /// Encode into a wire frame. Never partially succeeds: either every
    /// byte is produced and sealed with the CRC, or a typed error explains
    /// why the request is not encodable.
    pub fn encode(&self) -> Result<Frame> {
        if !self.kind.is_request() {
            return Err(FrameError::KindNotRequest(self.kind));
        }
        if self.function.family() != self.kind.family() {
            return Err(FrameError::FamilyMismatch {
                kind: self.kind,
                function: self.function,
            });
        }

        let mut body = [0u8; FRAME_LEN - 2];
        body[0] = self.id.get();
        body[1] = self.kind.code();
        body[2] = self.function.code();
        // Only a VFD Run carries payload; all other functions transmit zeros.
        if self.kind == FrameKind::VfdRequest && self.function == Function::Vfd(VfdFunction::Run) {
            body[3..6].copy_from_slice(&self.payload);
        }
        Ok(Frame::seal(body))
    }
}

/// A decoded reading reported by a field device.
///
/// Normally obtained from [`Response::decode`]; manual construction exists
/// for tests and callbacks, which is why [`Response::is_valid`] stands on
/// its own rather than being folded into the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    id: DeviceId,
    kind: FrameKind,
    function: Function,
    value: i16,
}

impl Response {
    pub fn new(id: DeviceId, kind: FrameKind, function: Function, value: i16) -> Self {
        Self {
            id,
            kind,
            function,
            value,
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn function(&self) -> Function {
        self.function
    }

    /// The reported reading: sign-magnitude decoded, e.g. 0.01 Hz steps for
    /// a VFD status, raw axis position for a joystick.
    pub fn value(&self) -> i16 {
        self.value
    }

    /// True when the value is well-formed as a response: a response kind
    /// carrying a function of its own family.
    pub fn is_valid(&self) -> bool {
        self.kind.is_response() && self.function.family() == self.kind.family()
    }

    /// Decode a raw byte sequence as a response frame.
    ///
    /// Fails on: wrong length, CRC mismatch, unaddressable id, unknown or
    /// request-kind byte 1, unknown function for the kind's family, Run/Stop
    /// functions (they never report a value), a sign flag other than 0/1,
    /// or a magnitude that does not fit the signed 16-bit range.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let frame = Frame::from_wire(raw)?;
        let bytes = frame.as_bytes();

        let id = DeviceId::new(bytes[0]).ok_or(FrameError::InvalidId(bytes[0]))?;
        let kind = FrameKind::from_code(bytes[1]).ok_or(FrameError::UnknownKind(bytes[1]))?;
        if kind.is_request() {
            return Err(FrameError::KindNotResponse(kind));
        }
        let function =
            Function::from_code(kind.family(), bytes[2]).ok_or(FrameError::UnknownFunction {
                family: kind.family(),
                code: bytes[2],
            })?;
        if let Function::Vfd(VfdFunction::Run | VfdFunction::Stop) = function {
            return Err(FrameError::UnexpectedFunction(function));
        }

        let sign = bytes[3];
        if sign > 1 {
            return Err(FrameError::InvalidSign(sign));
        }
        let magnitude = (u16::from(bytes[4]) << 8) | u16::from(bytes[5]);
        if magnitude > i16::MAX as u16 {
            return Err(FrameError::ValueOutOfRange(magnitude));
        }
        let mut value = magnitude as i16;
        if sign == 1 {
            value = -value;
        }

        let response = Self::new(id, kind, function, value);
        // Re-checked through the standalone predicate on purpose: the same
        // check guards manually constructed values outside this path.
        if !response.is_valid() {
            return Err(FrameError::KindNotResponse(kind));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::DeviceFamily;

    fn id(value: u8) -> DeviceId {
        DeviceId::new(value).expect("addressable id")
    }

    fn sealed(body: [u8; 6]) -> Vec<u8> {
        let mut raw = body.to_vec();
        raw.extend_from_slice(&crc16(&body));
        raw
    }

    #[test]
    fn encode_vfd_run_with_explicit_payload() {
        let request = Request::new(
            id(3),
            FrameKind::VfdRequest,
            Function::Vfd(VfdFunction::Run),
            [1, 0x13, 0x88],
        );
        let frame = request.encode().expect("valid request encodes");
        assert_eq!(frame.as_bytes(), &[3, 1, 1, 1, 0x13, 0x88, 96, 130]);
    }

    #[test]
    fn encode_vfd_stop_zeroes_payload() {
        // A stray payload on a Stop must not reach the wire.
        let request = Request::new(
            id(3),
            FrameKind::VfdRequest,
            Function::Vfd(VfdFunction::Stop),
            [1, 2, 3],
        );
        let frame = request.encode().expect("valid request encodes");
        assert_eq!(frame.as_bytes(), &[3, 1, 2, 0, 0, 0, 60, 80]);
    }

    #[test]
    fn vfd_run_converts_frequency() {
        let forward = Request::vfd_run(id(3), 50.00).encode().unwrap();
        assert_eq!(forward.as_bytes(), &[3, 1, 1, 0, 19, 136, 49, 66]);

        let reverse = Request::vfd_run(id(3), -50.00).encode().unwrap();
        assert_eq!(reverse.as_bytes(), &[3, 1, 1, 1, 19, 136, 96, 130]);
    }

    #[test]
    fn vfd_run_clamps_out_of_range_frequency() {
        let maxed = Request::vfd_run(id(3), 1e6);
        let frame = maxed.encode().unwrap();
        // 32767 = 0x7fff
        assert_eq!(&frame.as_bytes()[3..6], &[0, 0x7f, 0xff]);

        let floored = Request::vfd_run(id(3), -1e6).encode().unwrap();
        assert_eq!(&floored.as_bytes()[3..6], &[1, 0x7f, 0xff]);
    }

    #[test]
    fn vfd_stop_and_status_constructors() {
        assert_eq!(
            Request::vfd_stop(id(3)).encode().unwrap().as_bytes(),
            &[3, 1, 2, 0, 0, 0, 60, 80]
        );
        assert_eq!(
            Request::vfd_status(id(3)).encode().unwrap().as_bytes(),
            &[3, 1, 3, 0, 0, 0, 61, 172]
        );
    }

    #[test]
    fn joystick_poll_encodes_zero_payload() {
        let frame = Request::joystick(id(5), JoystickFunction::Button)
            .encode()
            .unwrap();
        assert_eq!(&frame.as_bytes()[..6], &[5, 3, 3, 0, 0, 0]);
    }

    #[test]
    fn response_kind_request_does_not_encode() {
        let request = Request::new(
            id(3),
            FrameKind::VfdResponse,
            Function::Vfd(VfdFunction::Status),
            [0; 3],
        );
        assert!(!request.is_valid());
        assert_eq!(
            request.encode(),
            Err(FrameError::KindNotRequest(FrameKind::VfdResponse))
        );
    }

    #[test]
    fn family_mismatch_does_not_encode() {
        let request = Request::new(
            id(3),
            FrameKind::VfdRequest,
            Function::Joystick(JoystickFunction::XPos),
            [0; 3],
        );
        assert!(!request.is_valid());
        assert!(matches!(
            request.encode(),
            Err(FrameError::FamilyMismatch { .. })
        ));
    }

    #[test]
    fn decode_vfd_status_response() {
        let raw = sealed([3, 2, 3, 0, 0x13, 0x88]);
        let response = Response::decode(&raw).expect("valid response decodes");
        assert_eq!(response.id(), id(3));
        assert_eq!(response.kind(), FrameKind::VfdResponse);
        assert_eq!(response.function(), Function::Vfd(VfdFunction::Status));
        assert_eq!(response.value(), 5000);
    }

    #[test]
    fn decode_negative_value() {
        let raw = sealed([4, 2, 3, 1, 0x01, 0xf4]);
        let response = Response::decode(&raw).unwrap();
        assert_eq!(response.value(), -500);
    }

    #[test]
    fn decode_joystick_axis_response() {
        let raw = sealed([5, 4, 1, 0, 0x10, 0x20]);
        let response = Response::decode(&raw).unwrap();
        assert_eq!(response.id(), id(5));
        assert_eq!(response.kind(), FrameKind::JoystickResponse);
        assert_eq!(response.function(), Function::Joystick(JoystickFunction::XPos));
        assert_eq!(response.value(), 4128);
    }

    #[test]
    fn decode_rejects_wrong_crc() {
        let raw = [3, 2, 3, 0, 0x13, 0x88, 0x00, 0x00];
        assert!(matches!(
            Response::decode(&raw),
            Err(FrameError::Crc { .. })
        ));
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let raw = [3, 2, 3, 0, 0x13, 0x88];
        assert_eq!(
            Response::decode(&raw),
            Err(FrameError::Length { len: 6 })
        );
        assert_eq!(
            Response::decode(&[]),
            Err(FrameError::Length { len: 0 })
        );
    }

    #[test]
    fn decode_rejects_request_kinds() {
        // A request frame is never decodable as a response, even with a
        // valid CRC.
        let frame = Request::vfd_status(id(3)).encode().unwrap();
        assert_eq!(
            Response::decode(frame.as_ref()),
            Err(FrameError::KindNotResponse(FrameKind::VfdRequest))
        );

        let frame = Request::joystick(id(5), JoystickFunction::YThumb)
            .encode()
            .unwrap();
        assert_eq!(
            Response::decode(frame.as_ref()),
            Err(FrameError::KindNotResponse(FrameKind::JoystickRequest))
        );
    }

    #[test]
    fn decode_rejects_unknown_kind() {
        let raw = sealed([3, 9, 3, 0, 0, 0]);
        assert_eq!(Response::decode(&raw), Err(FrameError::UnknownKind(9)));
    }

    #[test]
    fn decode_rejects_unknown_function() {
        let raw = sealed([3, 2, 99, 0, 0x13, 0x88]);
        assert_eq!(
            Response::decode(&raw),
            Err(FrameError::UnknownFunction {
                family: DeviceFamily::Vfd,
                code: 99
            })
        );
    }

    #[test]
    fn decode_rejects_run_and_stop_responses() {
        let run = sealed([3, 2, 1, 0, 0, 0]);
        assert!(matches!(
            Response::decode(&run),
            Err(FrameError::UnexpectedFunction(Function::Vfd(
                VfdFunction::Run
            )))
        ));
        let stop = sealed([3, 2, 2, 0, 0, 0]);
        assert!(matches!(
            Response::decode(&stop),
            Err(FrameError::UnexpectedFunction(Function::Vfd(
                VfdFunction::Stop
            )))
        ));
    }

    #[test]
    fn decode_rejects_bad_sign_flag() {
        let raw = sealed([3, 2, 3, 2, 0x13, 0x88]);
        assert_eq!(Response::decode(&raw), Err(FrameError::InvalidSign(2)));
    }

    #[test]
    fn decode_rejects_reserved_id() {
        let raw = sealed([250, 2, 3, 0, 0, 0]);
        assert_eq!(Response::decode(&raw), Err(FrameError::InvalidId(250)));
    }

    #[test]
    fn decode_rejects_oversized_magnitude() {
        // 0x8000 = 32768: one past the representable magnitude.
        let raw = sealed([3, 2, 3, 0, 0x80, 0x00]);
        assert_eq!(
            Response::decode(&raw),
            Err(FrameError::ValueOutOfRange(0x8000))
        );
    }

    #[test]
    fn validity_predicate_stands_alone() {
        let good = Response::new(
            id(3),
            FrameKind::VfdResponse,
            Function::Vfd(VfdFunction::Status),
            100,
        );
        assert!(good.is_valid());

        let request_kind = Response::new(
            id(3),
            FrameKind::VfdRequest,
            Function::Vfd(VfdFunction::Status),
            100,
        );
        assert!(!request_kind.is_valid());

        let wrong_family = Response::new(
            id(3),
            FrameKind::JoystickResponse,
            Function::Vfd(VfdFunction::Status),
            100,
        );
        assert!(!wrong_family.is_valid());
    }

    #[test]
    fn frame_from_wire_checks_crc() {
        let body = [3u8, 2, 3, 0, 0x13, 0x88];
        let raw = sealed(body);
        let frame = Frame::from_wire(&raw).expect("sealed frame validates");
        assert_eq!(frame.as_ref(), raw.as_slice());

        let mut corrupted = raw.clone();
        corrupted[4] ^= 0x01;
        assert!(matches!(
            Frame::from_wire(&corrupted),
            Err(FrameError::Crc { .. })
        ));
    }
}
