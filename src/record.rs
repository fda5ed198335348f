//! Sensor record flowing through the relay

use std::borrow::Cow;
use std::fmt;

/// One line of sensor output with its terminator stripped
///
/// Records carry no sequence number; arrival order is the loop order.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Record {
    bytes: Vec<u8>,
}

impl Record {
    /// Build a record from a raw line, stripping a trailing `\n` or `\r\n`
    pub fn from_line(mut line: Vec<u8>) -> Self {
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Self { bytes: line }
    }

    /// Raw payload bytes (no terminator)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Payload as text, replacing invalid UTF-8
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl From<&[u8]> for Record {
    fn from(bytes: &[u8]) -> Self {
        Self::from_line(bytes.to_vec())
    }
}

impl From<&str> for Record {
    fn from(line: &str) -> Self {
        Self::from(line.as_bytes())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({:?})", self.to_string_lossy())
    }
}
