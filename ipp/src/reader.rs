//!
//! IPP reader
//!
use bytes::{Buf, Bytes};

use crate::{
    model::IppVersion,
    parser::{FramingError, IppParseError},
    IppHeader,
};

/// IPP reader is a bounds-checked cursor over an in-memory IPP message.
/// A failed fixed-size read consumes nothing. `read_name` and `read_value` consume the
/// two-byte length before reading the data, so a truncated name or value leaves the cursor
/// just past its length field.
#[derive(Debug, Clone)]
pub struct IppReader {
    inner: Bytes,
    offset: usize,
}

impl IppReader {
    /// Create IppReader from a byte buffer
    pub fn new<B>(inner: B) -> Self
    where
        B: Into<Bytes>,
    {
        IppReader {
            inner: inner.into(),
            offset: 0,
        }
    }

    /// Number of bytes consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<(), FramingError> {
        if self.inner.remaining() < needed {
            Err(FramingError::Truncated {
                offset: self.offset,
                needed,
                available: self.inner.remaining(),
            })
        } else {
            Ok(())
        }
    }

    fn read_bytes(&mut self, len: usize) -> Result<Bytes, FramingError> {
        self.ensure(len)?;
        self.offset += len;
        Ok(self.inner.split_to(len))
    }

    fn read_u16(&mut self) -> Result<u16, FramingError> {
        self.ensure(2)?;
        self.offset += 2;
        Ok(self.inner.get_u16())
    }

    /// Read tag, `None` if the input is exhausted
    pub fn read_tag(&mut self) -> Option<u8> {
        if self.inner.has_remaining() {
            self.offset += 1;
            Some(self.inner.get_u8())
        } else {
            None
        }
    }

    /// Read IPP name from [len; name] element. Additional values have an empty name.
    pub fn read_name(&mut self) -> Result<String, IppParseError> {
        let name_len = self.read_u16()? as usize;
        let offset = self.offset;
        let name = self.read_bytes(name_len)?;
        String::from_utf8(name.to_vec()).map_err(|_| IppParseError::InvalidName(offset))
    }

    /// Read IPP value from [len; value] element
    pub fn read_value(&mut self) -> Result<Bytes, IppParseError> {
        let value_len = self.read_u16()? as usize;
        Ok(self.read_bytes(value_len)?)
    }

    /// Read IPP header
    pub fn read_header(&mut self) -> Result<IppHeader, IppParseError> {
        if self.inner.remaining() < IppHeader::LEN {
            return Err(IppParseError::MalformedHeader(self.inner.remaining()));
        }
        self.offset += IppHeader::LEN;

        let version = IppVersion::new(self.inner.get_u8(), self.inner.get_u8());
        let operation_or_status = self.inner.get_u16();
        let request_id = self.inner.get_i32();

        Ok(IppHeader::new(version, operation_or_status, request_id))
    }

    /// Convert the remaining bytes into the message payload
    pub fn into_payload(self) -> Bytes {
        self.inner
    }
}

impl From<Bytes> for IppReader {
    fn from(b: Bytes) -> Self {
        IppReader::new(b)
    }
}

impl From<Vec<u8>> for IppReader {
    fn from(v: Vec<u8>) -> Self {
        IppReader::new(v)
    }
}

impl From<&'static [u8]> for IppReader {
    fn from(s: &'static [u8]) -> Self {
        IppReader::new(s)
    }
}
