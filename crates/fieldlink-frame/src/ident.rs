//! Wire identifiers: device ids, frame kinds, and function codes.
//!
//! Device ids 0-247 are addressable; 248-255 are reserved on the bus and
//! never valid as an address. Function codes are scoped
//! to a device family — VFD and joystick codes overlap numerically and are
//! disambiguated by the frame kind.

/// Highest addressable device id.
pub const DEVICE_ID_MAX: u8 = 247;

/// First reserved id (248-255 are reserved/broadcast).
pub const RESERVED_START: u8 = 248;

/// Address of a field device, valid range 0-247.
///
/// An out-of-range value has no `DeviceId` representation; construction
/// returns `None` instead of carrying a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(u8);

impl DeviceId {
    /// Create a device id, rejecting the reserved range.
    pub fn new(value: u8) -> Option<Self> {
        if value <= DEVICE_ID_MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The raw wire value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The device family a frame kind or function code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFamily {
    Vfd,
    Joystick,
}

/// Whether a frame is a VFD/joystick request or response (wire byte 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    VfdRequest,
    VfdResponse,
    JoystickRequest,
    JoystickResponse,
}

impl FrameKind {
    /// The wire code for this kind.
    pub fn code(self) -> u8 {
        match self {
            FrameKind::VfdRequest => 1,
            FrameKind::VfdResponse => 2,
            FrameKind::JoystickRequest => 3,
            FrameKind::JoystickResponse => 4,
        }
    }

    /// Decode a wire code into a kind.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(FrameKind::VfdRequest),
            2 => Some(FrameKind::VfdResponse),
            3 => Some(FrameKind::JoystickRequest),
            4 => Some(FrameKind::JoystickResponse),
            _ => None,
        }
    }

    /// True for the *_REQUEST kinds.
    pub fn is_request(self) -> bool {
        matches!(self, FrameKind::VfdRequest | FrameKind::JoystickRequest)
    }

    /// True for the *_RESPONSE kinds.
    pub fn is_response(self) -> bool {
        !self.is_request()
    }

    /// The device family this kind addresses.
    pub fn family(self) -> DeviceFamily {
        match self {
            FrameKind::VfdRequest | FrameKind::VfdResponse => DeviceFamily::Vfd,
            FrameKind::JoystickRequest | FrameKind::JoystickResponse => DeviceFamily::Joystick,
        }
    }
}

/// Operation selector within the VFD family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VfdFunction {
    Run,
    Stop,
    Status,
}

impl VfdFunction {
    pub fn code(self) -> u8 {
        match self {
            VfdFunction::Run => 1,
            VfdFunction::Stop => 2,
            VfdFunction::Status => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(VfdFunction::Run),
            2 => Some(VfdFunction::Stop),
            3 => Some(VfdFunction::Status),
            _ => None,
        }
    }
}

/// Operation selector within the joystick family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoystickFunction {
    XPos,
    YPos,
    Button,
    XThumb,
    YThumb,
}

impl JoystickFunction {
    pub fn code(self) -> u8 {
        match self {
            JoystickFunction::XPos => 1,
            JoystickFunction::YPos => 2,
            JoystickFunction::Button => 3,
            JoystickFunction::XThumb => 4,
            JoystickFunction::YThumb => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(JoystickFunction::XPos),
            2 => Some(JoystickFunction::YPos),
            3 => Some(JoystickFunction::Button),
            4 => Some(JoystickFunction::XThumb),
            5 => Some(JoystickFunction::YThumb),
            _ => None,
        }
    }
}

/// A function code together with the family that scopes it (wire byte 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Vfd(VfdFunction),
    Joystick(JoystickFunction),
}

impl Function {
    /// The wire code, meaningful only within [`Function::family`].
    pub fn code(self) -> u8 {
        match self {
            Function::Vfd(f) => f.code(),
            Function::Joystick(f) => f.code(),
        }
    }

    /// Decode a wire code within the given family's namespace.
    pub fn from_code(family: DeviceFamily, code: u8) -> Option<Self> {
        match family {
            DeviceFamily::Vfd => VfdFunction::from_code(code).map(Function::Vfd),
            DeviceFamily::Joystick => JoystickFunction::from_code(code).map(Function::Joystick),
        }
    }

    pub fn family(self) -> DeviceFamily {
        match self {
            Function::Vfd(_) => DeviceFamily::Vfd,
            Function::Joystick(_) => DeviceFamily::Joystick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_accepts_addressable_range() {
        assert_eq!(DeviceId::new(0).map(DeviceId::get), Some(0));
        assert_eq!(DeviceId::new(10).map(DeviceId::get), Some(10));
        assert_eq!(DeviceId::new(247).map(DeviceId::get), Some(247));
    }

    #[test]
    fn device_id_rejects_reserved_range() {
        assert_eq!(DeviceId::new(248), None);
        assert_eq!(DeviceId::new(255), None);
    }

    #[test]
    fn kind_codes_roundtrip() {
        for kind in [
            FrameKind::VfdRequest,
            FrameKind::VfdResponse,
            FrameKind::JoystickRequest,
            FrameKind::JoystickResponse,
        ] {
            assert_eq!(FrameKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(FrameKind::from_code(0), None);
        assert_eq!(FrameKind::from_code(5), None);
    }

    #[test]
    fn kind_request_response_split() {
        assert!(FrameKind::VfdRequest.is_request());
        assert!(FrameKind::JoystickRequest.is_request());
        assert!(FrameKind::VfdResponse.is_response());
        assert!(FrameKind::JoystickResponse.is_response());
    }

    #[test]
    fn function_codes_are_family_scoped() {
        // Code 1 means Run for a VFD and XPos for a joystick.
        assert_eq!(
            Function::from_code(DeviceFamily::Vfd, 1),
            Some(Function::Vfd(VfdFunction::Run))
        );
        assert_eq!(
            Function::from_code(DeviceFamily::Joystick, 1),
            Some(Function::Joystick(JoystickFunction::XPos))
        );
        // Joystick codes extend past the VFD namespace.
        assert_eq!(Function::from_code(DeviceFamily::Vfd, 4), None);
        assert_eq!(
            Function::from_code(DeviceFamily::Joystick, 4),
            Some(Function::Joystick(JoystickFunction::XThumb))
        );
        assert_eq!(Function::from_code(DeviceFamily::Joystick, 6), None);
    }

    #[test]
    fn vfd_function_codes() {
        assert_eq!(VfdFunction::Run.code(), 1);
        assert_eq!(VfdFunction::Stop.code(), 2);
        assert_eq!(VfdFunction::Status.code(), 3);
        assert_eq!(VfdFunction::from_code(99), None);
    }

    #[test]
    fn joystick_function_codes() {
        assert_eq!(JoystickFunction::XPos.code(), 1);
        assert_eq!(JoystickFunction::YThumb.code(), 5);
        assert_eq!(JoystickFunction::from_code(0), None);
    }
}
