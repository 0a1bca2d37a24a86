use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use fieldlink_frame::{Frame, FrameKind, Function, Response};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    hex: String,
    id: u8,
    kind: &'a str,
    function: &'a str,
    data: [u8; 3],
    crc: [u8; 2],
}

#[derive(Serialize)]
struct ResponseOutput<'a> {
    id: u8,
    kind: &'a str,
    function: &'a str,
    value: i16,
}

pub fn print_frame(frame: &Frame, format: OutputFormat) {
    let bytes = frame.as_bytes();
    let kind = kind_name(bytes[1]);
    let function = function_name(bytes[1], bytes[2]);
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                hex: to_hex(bytes),
                id: bytes[0],
                kind,
                function,
                data: [bytes[3], bytes[4], bytes[5]],
                crc: [bytes[6], bytes[7]],
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "KIND", "FUNCTION", "DATA", "CRC", "HEX"])
                .add_row(vec![
                    bytes[0].to_string(),
                    kind.to_string(),
                    function.to_string(),
                    to_hex(&bytes[3..6]),
                    to_hex(&bytes[6..8]),
                    to_hex(bytes),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "id={} kind={} function={} data={} crc={} hex={}",
                bytes[0],
                kind,
                function,
                to_hex(&bytes[3..6]),
                to_hex(&bytes[6..8]),
                to_hex(bytes)
            );
        }
    }
}

pub fn print_response(response: &Response, format: OutputFormat) {
    let kind = kind_name(response.kind().code());
    let function = function_name(response.kind().code(), response.function().code());
    match format {
        OutputFormat::Json => {
            let out = ResponseOutput {
                id: response.id().get(),
                kind,
                function,
                value: response.value(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "KIND", "FUNCTION", "VALUE"])
                .add_row(vec![
                    response.id().to_string(),
                    kind.to_string(),
                    function.to_string(),
                    response.value().to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "id={} kind={} function={} value={}",
                response.id(),
                kind,
                function,
                response.value()
            );
        }
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn kind_name(code: u8) -> &'static str {
    match FrameKind::from_code(code) {
        Some(FrameKind::VfdRequest) => "VFD_REQUEST",
        Some(FrameKind::VfdResponse) => "VFD_RESPONSE",
        Some(FrameKind::JoystickRequest) => "JOYSTICK_REQUEST",
        Some(FrameKind::JoystickResponse) => "JOYSTICK_RESPONSE",
        None => "UNKNOWN",
    }
}

fn function_name(kind_code: u8, function_code: u8) -> &'static str {
    let Some(kind) = FrameKind::from_code(kind_code) else {
        return "UNKNOWN";
    };
    match Function::from_code(kind.family(), function_code) {
        Some(Function::Vfd(f)) => match f {
            fieldlink_frame::VfdFunction::Run => "RUN",
            fieldlink_frame::VfdFunction::Stop => "STOP",
            fieldlink_frame::VfdFunction::Status => "STATUS",
        },
        Some(Function::Joystick(f)) => match f {
            fieldlink_frame::JoystickFunction::XPos => "X_POS",
            fieldlink_frame::JoystickFunction::YPos => "Y_POS",
            fieldlink_frame::JoystickFunction::Button => "BUTTON",
            fieldlink_frame::JoystickFunction::XThumb => "X_THUMB",
            fieldlink_frame::JoystickFunction::YThumb => "Y_THUMB",
        },
        None => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_unpadded() {
        assert_eq!(to_hex(&[0x03, 0x01, 0xff]), "0301ff");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn kind_names_cover_wire_codes() {
        assert_eq!(kind_name(1), "VFD_REQUEST");
        assert_eq!(kind_name(2), "VFD_RESPONSE");
        assert_eq!(kind_name(3), "JOYSTICK_REQUEST");
        assert_eq!(kind_name(4), "JOYSTICK_RESPONSE");
        assert_eq!(kind_name(9), "UNKNOWN");
    }

    #[test]
    fn function_names_are_family_scoped() {
        assert_eq!(function_name(1, 1), "RUN");
        assert_eq!(function_name(4, 1), "X_POS");
        assert_eq!(function_name(2, 99), "UNKNOWN");
    }
}
