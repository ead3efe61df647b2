//!
//! IPP message parser
//!
use bytes::Bytes;
use log::{debug, trace, warn};

use crate::{
    attribute::{IppAttribute, IppAttributeGroup, IppAttributes},
    message::IppMessage,
    model::{DelimiterTag, Tag, ValueTag},
    reader::IppReader,
    value::IppValue,
    IppHeader,
};

/// Errors in the attribute framing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    #[error("Input ended before end-of-attributes tag")]
    MissingEndOfAttributes,

    #[error("Truncated field at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Value at offset {offset} precedes the first attribute group")]
    ValueOutsideGroup { offset: usize },

    #[error("Additional value at offset {offset} has no attribute to belong to")]
    OrphanAdditionalValue { offset: usize },
}

/// Parse error enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IppParseError {
    #[error("Malformed header: need 8 bytes, {0} available")]
    MalformedHeader(usize),

    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error("Invalid length for {tag:?}: expected {expected}, got {actual}")]
    SyntaxLengthMismatch {
        tag: ValueTag,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown value syntax: {0:#04x}")]
    UnknownSyntax(u8),

    #[error("Unknown delimiter tag: {0:#04x}")]
    UnknownDelimiter(u8),

    #[error("Invalid string data for {0:?}")]
    InvalidString(ValueTag),

    #[error("Invalid boolean value: {0:#04x}")]
    InvalidBoolean(u8),

    #[error("Invalid attribute name at offset {0}")]
    InvalidName(usize),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ParserStage {
    ExpectGroupTag,
    ExpectAttributeOrGroupTag,
    Done,
}

struct ParserState {
    stage: ParserStage,
    current_group: Option<IppAttributeGroup>,
    current_attribute: Option<IppAttribute>,
    attributes: IppAttributes,
}

impl ParserState {
    fn new() -> Self {
        ParserState {
            stage: ParserStage::ExpectGroupTag,
            current_group: None,
            current_attribute: None,
            attributes: IppAttributes::new(),
        }
    }

    fn add_last_attribute(&mut self) {
        if let Some(attr) = self.current_attribute.take() {
            if let Some(ref mut group) = self.current_group {
                group.add(attr);
            }
        }
    }

    fn parse_delimiter(&mut self, tag: DelimiterTag) {
        trace!("Delimiter tag: {tag:?}");

        self.add_last_attribute();

        if let Some(group) = self.current_group.take() {
            self.attributes.push_group(group);
        }

        if tag.is_group_start() {
            self.current_group = Some(IppAttributeGroup::new(tag));
            self.stage = ParserStage::ExpectAttributeOrGroupTag;
        } else {
            self.stage = ParserStage::Done;
        }
    }

    fn check_in_group(&self, offset: usize) -> Result<(), IppParseError> {
        if self.stage == ParserStage::ExpectGroupTag {
            Err(FramingError::ValueOutsideGroup { offset }.into())
        } else {
            Ok(())
        }
    }

    fn parse_value(&mut self, offset: usize, tag: u8, name: String, value: Bytes) -> Result<(), IppParseError> {
        let ipp_value = IppValue::parse(tag, value)?;

        trace!("Value tag: {tag:0x}: {name}: {ipp_value}");

        if !name.is_empty() {
            // new attribute, the previous one is complete
            self.add_last_attribute();
            self.current_attribute = Some(IppAttribute::new(name, ipp_value));
        } else if let Some(ref mut attr) = self.current_attribute {
            attr.add_value(ipp_value);
        } else {
            return Err(FramingError::OrphanAdditionalValue { offset }.into());
        }
        Ok(())
    }
}

/// IPP parser for messages fully resident in memory
pub struct IppParser {
    reader: IppReader,
    state: ParserState,
}

impl IppParser {
    /// Create IPP parser from IppReader or a byte buffer
    pub fn new<T>(reader: T) -> IppParser
    where
        T: Into<IppReader>,
    {
        IppParser {
            reader: reader.into(),
            state: ParserState::new(),
        }
    }

    fn parse_value(&mut self, offset: usize, tag: u8) -> Result<(), IppParseError> {
        self.state.check_in_group(offset)?;

        let name = self.reader.read_name()?;
        let value = self.reader.read_value()?;

        self.state.parse_value(offset, tag, name, value)
    }

    fn parse_header_attributes(&mut self) -> Result<IppHeader, IppParseError> {
        let header = self.reader.read_header()?;
        trace!("IPP header: {header:?}");

        while self.state.stage != ParserStage::Done {
            let offset = self.reader.offset();
            let tag = self.reader.read_tag().ok_or(FramingError::MissingEndOfAttributes)?;

            match Tag::classify(tag) {
                Tag::Delimiter(delimiter) => self.state.parse_delimiter(delimiter),
                Tag::Value(_) => self.parse_value(offset, tag)?,
                Tag::Unknown(tag) if Tag::is_delimiter_range(tag) => {
                    return Err(IppParseError::UnknownDelimiter(tag));
                }
                Tag::Unknown(tag) => return Err(IppParseError::UnknownSyntax(tag)),
            }
        }

        Ok(header)
    }

    /// Parse IPP message and return its parts: header, attributes and the trailing payload
    pub fn parse_parts(mut self) -> Result<(IppHeader, IppAttributes, Bytes), IppParseError> {
        match self.parse_header_attributes() {
            Ok(header) => {
                debug!("IPP attributes parsed, payload size: {}", self.reader.remaining());
                Ok((header, self.state.attributes, self.reader.into_payload()))
            }
            Err(e) => {
                warn!("IPP parse error at offset {}: {e}", self.reader.offset());
                Err(e)
            }
        }
    }

    /// Parse IPP message
    pub fn parse(self) -> Result<IppMessage, IppParseError> {
        let (header, attributes, payload) = self.parse_parts()?;

        Ok(IppMessage {
            header,
            attributes,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::model::IppVersion;

    use super::*;

    const HEADER: [u8; 8] = [1, 1, 0, 0, 0, 0, 0, 0];

    fn message(body: &[u8]) -> Vec<u8> {
        let mut data = HEADER.to_vec();
        data.extend_from_slice(body);
        data
    }

    fn parse(body: &[u8]) -> Result<IppMessage, IppParseError> {
        IppParser::new(message(body)).parse()
    }

    #[test]
    fn test_parse_no_attributes() {
        let res = parse(&[3]).unwrap();
        assert!(res.attributes().groups().is_empty());
        assert!(res.payload().is_empty());
    }

    #[test]
    fn test_parse_empty_group() {
        let res = parse(&[1, 3]).unwrap();
        let groups = res.attributes().groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tag(), DelimiterTag::OperationAttributes);
        assert!(groups[0].is_empty());
    }

    #[test]
    fn test_parse_consecutive_delimiters() {
        let res = parse(&[1, 5, 0, 8, 3]).unwrap();
        let tags = res.attributes().groups().iter().map(|g| g.tag()).collect::<Vec<_>>();
        assert_eq!(
            tags,
            vec![
                DelimiterTag::OperationAttributes,
                DelimiterTag::UnsupportedAttributes,
                DelimiterTag::Reserved,
                DelimiterTag::ResourceAttributes
            ]
        );
        assert!(res.attributes().groups().iter().all(|g| g.is_empty()));
    }

    #[test]
    fn test_parse_single_value() {
        let res = parse(&[
            4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3,
        ])
        .unwrap();

        let attrs = res
            .attributes()
            .groups_of(DelimiterTag::PrinterAttributes)
            .next()
            .unwrap()
            .attributes();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name(), "test");
        assert_eq!(attrs[0].value().as_integer(), Some(&0x1234_5678));
    }

    #[test]
    fn test_parse_additional_values() {
        let res = parse(&[
            4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 0x21, 0x00, 0x00, 0x00,
            0x04, 0x77, 0x65, 0x43, 0x21, 0x13, 0x00, 0x00, 0x00, 0x00, 3,
        ])
        .unwrap();

        let group = &res.attributes().groups()[0];
        assert_eq!(group.attributes().len(), 1);
        assert_eq!(
            group.get("test").unwrap().values(),
            &[
                IppValue::Integer(0x1234_5678),
                IppValue::Integer(0x7765_4321),
                IppValue::NoValue
            ]
        );
    }

    #[test]
    fn test_parser_with_payload() {
        let res = parse(&[
            4, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x12, 0x34, 0x56, 0x78, 3, b'f', b'o', b'o',
        ])
        .unwrap();

        assert_eq!(res.header().version, IppVersion::v1_1());
        assert_eq!(res.payload().as_ref(), b"foo");
    }

    #[test]
    fn test_parse_parts() {
        let data = message(&[4, 3, 3, 0xff]);

        let (header, attributes, payload) = IppParser::new(data).parse_parts().unwrap();
        assert_eq!(header.version, IppVersion::v1_1());
        assert_eq!(attributes.groups().len(), 1);
        // bytes after the first end-of-attributes tag are opaque
        assert_eq!(payload.as_ref(), &[3, 0xff]);
    }

    #[test]
    fn test_parse_groups() {
        let data = vec![
            0x02, 0x00, 0x00, 0x0b, 0x00, 0x00, 0x00, 0x01, 0x01, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04,
            0x12, 0x34, 0x56, 0x78, 0x21, 0x00, 0x05, b't', b'e', b's', b't', b'2', 0x00, 0x04, 0x12, 0x34, 0x56, 0xFF,
            0x04, 0x21, 0x00, 0x04, b't', b'e', b's', b't', 0x00, 0x04, 0x87, 0x65, 0x43, 0x21, 0x03,
        ];

        let res = IppParser::new(data).parse().unwrap();

        assert_eq!(res.header().version, IppVersion::v2_0());
        assert_eq!(res.header().operation_or_status, 0x000b);
        assert_eq!(res.header().request_id, 1);
        assert_eq!(2, res.attributes().groups()[0].attributes().len());
        assert_eq!(1, res.attributes().groups()[1].attributes().len());
        assert_eq!(
            res.attributes().groups()[1].attributes()[0].value(),
            &IppValue::Integer(0x8765_4321u32 as i32)
        );
    }

    #[test]
    fn test_parse_negative_request_id() {
        let res = IppParser::new(vec![1, 1, 0, 2, 0xff, 0xff, 0xff, 0xfe, 3]).parse().unwrap();
        assert_eq!(res.header().request_id, -2);
    }

    #[test]
    fn test_missing_end_of_attributes() {
        assert_eq!(
            parse(&[]).unwrap_err(),
            IppParseError::Framing(FramingError::MissingEndOfAttributes)
        );
        assert_eq!(
            parse(&[1, 0x22, 0x00, 0x01, b'a', 0x00, 0x01, 0x01]).unwrap_err(),
            IppParseError::Framing(FramingError::MissingEndOfAttributes)
        );
    }

    #[test]
    fn test_truncated_value() {
        assert_eq!(
            parse(&[1, 0x44, 0x00, 0x01, b'a', 0x00, 0x05, b'a', b'b', 3]).unwrap_err(),
            IppParseError::Framing(FramingError::Truncated {
                offset: 15,
                needed: 5,
                available: 3
            })
        );
        assert!(matches!(
            parse(&[1, 0x44, 0x00, 0x09, b'a']).unwrap_err(),
            IppParseError::Framing(FramingError::Truncated { needed: 9, .. })
        ));
    }

    #[test]
    fn test_short_header() {
        assert_eq!(
            IppParser::new(vec![1, 1, 0]).parse().unwrap_err(),
            IppParseError::MalformedHeader(3)
        );
    }

    #[test]
    fn test_value_outside_group() {
        assert_eq!(
            parse(&[0x21, 0x00, 0x01, b'a', 0x00, 0x04, 0, 0, 0, 1, 3]).unwrap_err(),
            IppParseError::Framing(FramingError::ValueOutsideGroup { offset: 8 })
        );
    }

    #[test]
    fn test_orphan_additional_value() {
        assert_eq!(
            parse(&[1, 0x21, 0x00, 0x00, 0x00, 0x04, 0, 0, 0, 1, 3]).unwrap_err(),
            IppParseError::Framing(FramingError::OrphanAdditionalValue { offset: 9 })
        );
        // the pending attribute does not carry over into the next group
        assert_eq!(
            parse(&[
                1, 0x22, 0x00, 0x01, b'a', 0x00, 0x01, 0x01, 2, 0x22, 0x00, 0x00, 0x00, 0x01, 0x00, 3
            ])
            .unwrap_err(),
            IppParseError::Framing(FramingError::OrphanAdditionalValue { offset: 17 })
        );
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(parse(&[0x0a, 3]).unwrap_err(), IppParseError::UnknownDelimiter(0x0a));
        assert_eq!(
            parse(&[1, 0x34, 0x00, 0x01, b'c', 0x00, 0x00, 3]).unwrap_err(),
            IppParseError::UnknownSyntax(0x34)
        );
    }

    #[test]
    fn test_fixed_width_violation() {
        assert_eq!(
            parse(&[1, 0x22, 0x00, 0x01, b'a', 0x00, 0x02, 0x00, 0x01, 3]).unwrap_err(),
            IppParseError::SyntaxLengthMismatch {
                tag: ValueTag::Boolean,
                expected: 1,
                actual: 2
            }
        );
        assert_eq!(
            parse(&[1, 0x23, 0x00, 0x01, b'e', 0x00, 0x02, 0x00, 0x03, 3]).unwrap_err(),
            IppParseError::SyntaxLengthMismatch {
                tag: ValueTag::Enum,
                expected: 4,
                actual: 2
            }
        );
    }
}
