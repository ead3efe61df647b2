//!
//! IPP wire format implementation for Rust: encoder and decoder for the binary message
//! encoding defined in [RFC 8010](https://tools.ietf.org/html/rfc8010).
//!
//! The crate converts between an in-memory message (header, ordered attribute groups,
//! typed attribute values and an opaque payload) and its exact byte representation.
//! HTTP transport, request-id allocation and operation semantics are left to the caller.
//!
//! The following feature flags are supported:
//! * `serde` - derive `Serialize` and `Deserialize` for the message model
//!
//! Implementation notes:
//! * all RFC 8010 value syntaxes are supported except collections.
//! * multi-valued attributes are encoded as one named value followed by additional values.
//! * decoding is strict: fixed-width values with a wrong length and truncated fields are rejected.
//! * encoding fails for models without a wire form: empty attribute names, end-of-attributes
//!   used as a group tag, names or values longer than 65535 bytes.
//! * text and name values are kept as raw bytes in the message charset.
//! * whether `operation_or_status` is an operation id or a status code depends on the message
//!   direction, which only the caller knows.
//!
//! Usage example:
//!
//!```rust
//! use ipp_codec::prelude::*;
//!
//! let mut req = IppMessage::new_request(IppVersion::v1_1(), Operation::PrintJob, 1);
//! req.add_attribute(
//!     DelimiterTag::OperationAttributes,
//!     IppAttribute::ATTRIBUTES_CHARSET,
//!     IppValue::Charset("utf-8".to_owned()),
//! );
//! req.set_payload(&b"%!PS"[..]);
//!
//! let bytes = ipp_codec::encode(&req)?;
//! let decoded = ipp_codec::decode(bytes)?;
//! assert_eq!(decoded, req);
//! # Ok::<(), ipp_codec::error::IppError>(())
//!```

use bytes::{BufMut, Bytes, BytesMut};
use num_traits::FromPrimitive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::IppEncodeError,
    message::IppMessage,
    model::{IppVersion, Operation, StatusCode},
    parser::{IppParseError, IppParser},
};

pub mod attribute;
pub mod error;
pub mod message;
pub mod model;
pub mod parser;
pub mod reader;
pub mod value;

pub mod prelude {
    //!
    //! Common imports
    //!
    pub use num_traits::FromPrimitive as _;

    pub use crate::{
        attribute::{IppAttribute, IppAttributeGroup, IppAttributes},
        message::IppMessage,
        model::*,
        parser::{FramingError, IppParseError, IppParser},
        value::IppValue,
    };

    pub use super::error::{IppEncodeError, IppError};

    pub use super::IppHeader;
}

/// IPP request and response header
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IppHeader {
    /// IPP protocol version
    pub version: IppVersion,
    /// Operation id for requests, status code for responses
    pub operation_or_status: u16,
    /// ID of the request, echoed back in the response
    pub request_id: i32,
}

impl IppHeader {
    /// Encoded header size
    pub const LEN: usize = 8;

    /// Create IPP header
    pub fn new(version: IppVersion, operation_or_status: u16, request_id: i32) -> IppHeader {
        IppHeader {
            version,
            operation_or_status,
            request_id,
        }
    }

    /// Write header to the buffer
    pub fn write_to(&self, buffer: &mut BytesMut) {
        buffer.put_u8(self.version.major);
        buffer.put_u8(self.version.minor);
        buffer.put_u16(self.operation_or_status);
        buffer.put_i32(self.request_id);
    }

    /// Write header to byte array
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(IppHeader::LEN);
        self.write_to(&mut buffer);
        buffer.freeze()
    }

    /// Interpret the header as a request and decode the operation
    pub fn operation(&self) -> Option<Operation> {
        Operation::from_u16(self.operation_or_status)
    }

    /// Interpret the header as a response and decode the status code
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.operation_or_status).unwrap_or(StatusCode::UnknownStatusCode)
    }
}

/// Encode IPP message including payload
pub fn encode(message: &IppMessage) -> Result<Bytes, IppEncodeError> {
    message.to_bytes()
}

/// Decode IPP message from a complete byte buffer
pub fn decode<B>(data: B) -> Result<IppMessage, IppParseError>
where
    B: Into<Bytes>,
{
    IppParser::new(data.into()).parse()
}
