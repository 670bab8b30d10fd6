//! # XSens MT Frame Records
//!
//! The hub logs every frame exchanged with the motion tracker as a
//! comma-separated list of hex bytes, e.g. `fa,ff,30,00,d1`. The first two
//! fields are the packet preamble and the bus id; the rest is the message id,
//! a length byte, the data bytes and a trailing checksum byte.
//!
//! The checksum byte is chosen so that all bytes after the preamble sum to
//! zero modulo 256. A logged record drops the `0xFF` bus id, so the bytes
//! that remain must sum to 1 modulo 256 instead.

use crate::error::FrameError;
use bytes::Bytes;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt;
use strum_macros::Display;

/// First byte of every frame on the wire.
pub const PACKET_START: u8 = 0xFA;
/// Bus id addressing the master device.
pub const SYS_COMMAND: u8 = 0xFF;

/// Message id, length byte and checksum byte.
pub const FRAME_OVERHEAD: usize = 3;
/// Value the payload bytes must sum to modulo 256.
pub const CHECKSUM_RESIDUE: u8 = 1;

/// Message identifiers from the MT communication protocol.
///
/// Not interpreted by validation; exposed so operators can see which
/// message a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum MessageId {
    ReqDid = 0x00,
    DeviceId = 0x01,
    Initbus = 0x02,
    InitBusResults = 0x03,
    GotoMeasurement = 0x10,
    GotoMeasurementAck = 0x11,
    ReqFirmwareRevision = 0x12,
    FirmwareRevision = 0x13,
    ReqProductCode = 0x1C,
    ProductCode = 0x1D,
    GotoConfig = 0x30,
    GotoConfigAck = 0x31,
    MtData2 = 0x36,
    Wakeup = 0x3E,
    WakeupAck = 0x3F,
    Reset = 0x40,
    ResetAck = 0x41,
    Error = 0x42,
    SetOptionFlags = 0x48,
    SetOptionFlagsAck = 0x49,
    SetOutputConfiguration = 0xC0,
    SetOutputConfigurationAck = 0xC1,

    #[num_enum(catch_all)]
    #[strum(to_string = "Unknown ({0})")]
    Unknown(u8),
}

/// One logged frame record: two opaque header fields plus the decoded
/// payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: [String; 2],
    payload: Bytes,
}

impl Frame {
    /// The two reserved header fields, exactly as they appeared in the record.
    pub fn header(&self) -> &[String; 2] {
        &self.header
    }

    pub fn payload(&self) -> Bytes {
        self.payload.clone()
    }

    pub fn message_id(&self) -> MessageId {
        MessageId::from_primitive(self.payload[0])
    }

    /// The length byte: how many data bytes the frame claims to carry.
    pub fn declared_len(&self) -> u8 {
        self.payload[1]
    }

    /// Data bytes between the length byte and the checksum byte.
    pub fn data(&self) -> &[u8] {
        if self.payload.len() > FRAME_OVERHEAD {
            &self.payload[2..self.payload.len() - 1]
        } else {
            &[]
        }
    }

    pub fn checksum(&self) -> u8 {
        self.payload[self.payload.len() - 1]
    }

    /// Check the declared length against the actual payload length, then the
    /// checksum residue. Stops at the first failure: a frame with a wrong
    /// length byte never gets its checksum evaluated.
    pub fn validate(&self) -> Result<(), FrameError> {
        let declared = self.declared_len() as usize + FRAME_OVERHEAD;
        if declared != self.payload.len() {
            return Err(FrameError::LengthMismatch {
                declared,
                actual: self.payload.len(),
            });
        }
        let sum: u32 = self.payload.iter().map(|&b| u32::from(b)).sum();
        let computed = (sum % 256) as u8;
        if computed != CHECKSUM_RESIDUE {
            return Err(FrameError::ChecksumMismatch { computed });
        }
        Ok(())
    }
}

impl TryFrom<&str> for Frame {
    type Error = FrameError;

    fn try_from(record: &str) -> Result<Self, Self::Error> {
        let fields: Vec<&str> = record.split(',').collect();
        if fields.len() < 2 {
            return Err(FrameError::InvalidFormat(format!(
                "expected two header fields, got {} field(s)",
                fields.len()
            )));
        }
        let payload = fields[2..]
            .iter()
            .map(|field| {
                u8::from_str_radix(field.trim(), 16)
                    .map_err(|_| FrameError::InvalidFormat(format!("not a hex byte: {field:?}")))
            })
            .collect::<Result<Vec<u8>, FrameError>>()?;
        if payload.len() < 2 {
            return Err(FrameError::InvalidFormat(format!(
                "payload needs at least a length byte and a checksum byte, got {} byte(s)",
                payload.len()
            )));
        }
        Ok(Frame {
            header: [fields[0].to_string(), fields[1].to_string()],
            payload: Bytes::from(payload),
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} len={} data={} checksum={:#04x}",
            self.message_id(),
            self.declared_len(),
            hex::encode(self.data()),
            self.checksum()
        )
    }
}

/// Decode one record and run both checks. This is the single-shot entry
/// point the command line tool uses.
pub fn validate_record(record: &str) -> Result<Frame, FrameError> {
    let frame = Frame::try_from(record)?;
    frame.validate()?;
    Ok(frame)
}
