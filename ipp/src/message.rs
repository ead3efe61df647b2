//!
//! IPP message
//!
use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    attribute::{IppAttribute, IppAttributes},
    error::IppEncodeError,
    model::{DelimiterTag, IppVersion, Operation, StatusCode},
    value::IppValue,
    IppHeader,
};

/// IPP request or response: header, attribute groups and the opaque trailing payload
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IppMessage {
    pub(crate) header: IppHeader,
    pub(crate) attributes: IppAttributes,
    pub(crate) payload: Bytes,
}

impl IppMessage {
    /// Create an empty message with a given header
    pub fn new(header: IppHeader) -> IppMessage {
        IppMessage {
            header,
            attributes: IppAttributes::new(),
            payload: Bytes::new(),
        }
    }

    /// Create new IPP request for the operation. The request id is chosen by the caller.
    pub fn new_request(version: IppVersion, operation: Operation, request_id: i32) -> IppMessage {
        IppMessage::new(IppHeader::new(version, operation as u16, request_id))
    }

    /// Create response from status and the request id of the original request
    pub fn new_response(version: IppVersion, status: StatusCode, request_id: i32) -> IppMessage {
        IppMessage::new(IppHeader::new(version, status as u16, request_id))
    }

    /// Get IPP header
    pub fn header(&self) -> &IppHeader {
        &self.header
    }

    /// Get mutable IPP header
    pub fn header_mut(&mut self) -> &mut IppHeader {
        &mut self.header
    }

    /// Get attributes
    pub fn attributes(&self) -> &IppAttributes {
        &self.attributes
    }

    /// Get mutable attributes
    pub fn attributes_mut(&mut self) -> &mut IppAttributes {
        &mut self.attributes
    }

    /// Add a single-valued attribute to a given group
    pub fn add_attribute<S>(&mut self, group: DelimiterTag, name: S, value: IppValue)
    where
        S: AsRef<str>,
    {
        self.attributes.add(group, IppAttribute::new(name, value));
    }

    /// Add a complete, possibly multi-valued attribute to a given group
    pub fn append_attribute(&mut self, group: DelimiterTag, attribute: IppAttribute) {
        self.attributes.add(group, attribute);
    }

    /// Get payload
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Replace payload
    pub fn set_payload<B>(&mut self, payload: B)
    where
        B: Into<Bytes>,
    {
        self.payload = payload.into();
    }

    /// Consume message and return a payload
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Size of the encoded message including payload
    pub fn encoded_length(&self) -> usize {
        IppHeader::LEN + self.attributes.encoded_length() + self.payload.len()
    }

    /// Write message to byte array including payload
    pub fn to_bytes(&self) -> Result<Bytes, IppEncodeError> {
        let mut buffer = BytesMut::with_capacity(self.encoded_length());
        self.header.write_to(&mut buffer);
        self.attributes.write_to(&mut buffer)?;
        debug!("IPP header size: {}, payload size: {}", buffer.len(), self.payload.len());

        buffer.put_slice(&self.payload);
        Ok(buffer.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::IppParser;

    #[test]
    fn test_new_request() {
        let mut req = IppMessage::new_request(IppVersion::v2_0(), Operation::GetJobs, 0x123);
        req.add_attribute(
            DelimiterTag::OperationAttributes,
            IppAttribute::ATTRIBUTES_CHARSET,
            IppValue::Charset("utf-8".to_owned()),
        );

        assert_eq!(req.header().operation(), Some(Operation::GetJobs));
        assert_eq!(
            req.to_bytes().unwrap().as_ref(),
            &[
                0x02, 0x00, 0x00, 0x0a, 0x00, 0x00, 0x01, 0x23, 0x01, 0x47, 0x00, 0x12, b'a', b't', b't', b'r', b'i',
                b'b', b'u', b't', b'e', b's', b'-', b'c', b'h', b'a', b'r', b's', b'e', b't', 0x00, 0x05, b'u', b't',
                b'f', b'-', b'8', 0x03
            ]
        );
    }

    #[test]
    fn test_new_response() {
        let resp = IppMessage::new_response(IppVersion::v1_1(), StatusCode::ClientErrorNotFound, 77);
        assert_eq!(resp.header().status_code(), StatusCode::ClientErrorNotFound);
        assert_eq!(resp.header().request_id, 77);
        assert_eq!(resp.to_bytes().unwrap().as_ref(), &[1, 1, 0x04, 0x06, 0, 0, 0, 77, 3]);
    }

    #[test]
    fn test_append_multi_valued_attribute() {
        let mut req = IppMessage::new_request(IppVersion::v1_1(), Operation::GetPrinterAttributes, 1);
        let mut attr = IppAttribute::new(
            IppAttribute::REQUESTED_ATTRIBUTES,
            IppValue::Keyword("printer-state".to_owned()),
        );
        attr.add_value(IppValue::Keyword("printer-state-reasons".to_owned()));
        req.append_attribute(DelimiterTag::OperationAttributes, attr.clone());

        let parsed = IppParser::new(req.to_bytes().unwrap()).parse().unwrap();
        assert_eq!(parsed.attributes().groups()[0].attributes(), &[attr]);
    }

    #[test]
    fn test_payload() {
        let mut req = IppMessage::new_request(IppVersion::v1_1(), Operation::PrintJob, 5);
        req.set_payload(&b"%PDF-1.4"[..]);

        let bytes = req.to_bytes().unwrap();
        assert_eq!(bytes.len(), req.encoded_length());
        assert!(bytes.ends_with(b"\x03%PDF-1.4"));
        assert_eq!(req.into_payload().as_ref(), b"%PDF-1.4");
    }

    #[test]
    fn test_invalid_model_is_not_encoded() {
        let mut req = IppMessage::new_request(IppVersion::v1_1(), Operation::PrintJob, 5);
        req.add_attribute(DelimiterTag::JobAttributes, "a", IppValue::Integer(1));
        req.add_attribute(DelimiterTag::JobAttributes, "", IppValue::Integer(2));
        assert_eq!(req.to_bytes(), Err(IppEncodeError::EmptyName));

        let mut req = IppMessage::new_request(IppVersion::v1_1(), Operation::PrintJob, 6);
        req.add_attribute(DelimiterTag::EndOfAttributes, "a", IppValue::Integer(1));
        assert_eq!(
            req.to_bytes(),
            Err(IppEncodeError::InvalidGroupTag(DelimiterTag::EndOfAttributes))
        );
    }
}
