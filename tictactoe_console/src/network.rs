use std::fmt;
use std::io;

use serde::{Serialize, de};


pub const DEFAULT_PORT: u16 = 38613;


#[derive(Debug)]
pub enum CommunicationError {
    Io(io::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommunicationError::Io(err) => write!(f, "channel failure: {err}"),
            CommunicationError::Serde(err) => write!(f, "malformed message: {err}"),
        }
    }
}

// Messages are framed as a 4-byte little-endian length prefix followed by a
// JSON payload.

pub fn write_obj(
    writer: &mut impl io::Write, obj: &impl Serialize,
) -> Result<(), CommunicationError> {
    let serialized = serde_json::to_string(obj).map_err(CommunicationError::Serde)?;
    writer
        .write_all(&(serialized.len() as u32).to_le_bytes())
        .map_err(CommunicationError::Io)?;
    writer.write_all(serialized.as_bytes()).map_err(CommunicationError::Io)?;
    writer.flush().map_err(CommunicationError::Io)
}

pub fn read_obj<T: de::DeserializeOwned>(
    reader: &mut impl io::Read,
) -> Result<T, CommunicationError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).map_err(CommunicationError::Io)?;
    let len = u32::from_le_bytes(len_buf);
    let mut content_buf = vec![0; len as usize];
    reader.read_exact(&mut content_buf).map_err(CommunicationError::Io)?;
    serde_json::from_slice(&content_buf).map_err(CommunicationError::Serde)
}
