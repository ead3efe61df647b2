//!
//! Attribute-related structs
//!
use bytes::{BufMut, Bytes, BytesMut};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::IppEncodeError, model::DelimiterTag, value::IppValue};

macro_rules! define_attributes {
    ($($name:ident => $value:literal),* $(,)?) => {
        $(pub const $name: &'static str = $value;)*
    };
}

/// `IppAttribute` represents a named IPP attribute with one or more values.
///
/// Only the first value carries the attribute name on the wire,
/// additional values are written with a zero name length.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IppAttribute {
    /// Attribute name
    name: String,
    /// Attribute values, never empty
    values: Vec<IppValue>,
}

impl IppAttribute {
    define_attributes! {
        ATTRIBUTES_CHARSET => "attributes-charset",
        ATTRIBUTES_NATURAL_LANGUAGE => "attributes-natural-language",
        COPIES => "copies",
        DOCUMENT_FORMAT => "document-format",
        DOCUMENT_NAME => "document-name",
        JOB_ID => "job-id",
        JOB_NAME => "job-name",
        JOB_STATE => "job-state",
        JOB_STATE_REASONS => "job-state-reasons",
        JOB_URI => "job-uri",
        LAST_DOCUMENT => "last-document",
        PRINTER_NAME => "printer-name",
        PRINTER_STATE => "printer-state",
        PRINTER_STATE_REASONS => "printer-state-reasons",
        PRINTER_URI => "printer-uri",
        REQUESTED_ATTRIBUTES => "requested-attributes",
        REQUESTING_USER_NAME => "requesting-user-name",
        SIDES => "sides",
        STATUS_MESSAGE => "status-message",
    }

    /// Create new instance of the attribute with a single value
    ///
    /// * `name` - Attribute name, an empty name is rejected at encoding time<br/>
    /// * `value` - Attribute value<br/>
    pub fn new<S>(name: S, value: IppValue) -> IppAttribute
    where
        S: AsRef<str>,
    {
        IppAttribute {
            name: name.as_ref().to_owned(),
            values: vec![value],
        }
    }

    /// Create new instance of the attribute from a list of values, `None` if the list is empty
    pub fn with_values<S, I>(name: S, values: I) -> Option<IppAttribute>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = IppValue>,
    {
        let mut values = values.into_iter();
        let mut attr = IppAttribute::new(name, values.next()?);
        attr.values.extend(values);
        Some(attr)
    }

    /// Append an additional value. Additional values never carry a name of their own.
    pub fn add_value(&mut self, value: IppValue) {
        self.values.push(value);
    }

    /// Return attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the first attribute value
    pub fn value(&self) -> &IppValue {
        &self.values[0]
    }

    /// Return all attribute values
    pub fn values(&self) -> &[IppValue] {
        &self.values
    }

    /// Consume this attribute and return the values
    pub fn into_values(self) -> Vec<IppValue> {
        self.values
    }

    /// Total size of all framed values: tag, name length, name, value length and value
    pub fn encoded_length(&self) -> usize {
        self.name.len() + self.values.iter().map(|v| 5 + v.encoded_len()).sum::<usize>()
    }

    /// Write attribute to the buffer. Fails for an empty or oversized name and for oversized values.
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<(), IppEncodeError> {
        if self.name.is_empty() {
            return Err(IppEncodeError::EmptyName);
        }
        let name_len = u16::try_from(self.name.len()).map_err(|_| IppEncodeError::NameTooLong(self.name.len()))?;

        for (i, value) in self.values.iter().enumerate() {
            buffer.put_u8(value.to_tag() as u8);
            if i == 0 {
                buffer.put_u16(name_len);
                buffer.put_slice(self.name.as_bytes());
            } else {
                buffer.put_u16(0);
            }
            value.write_to(buffer)?;
        }
        Ok(())
    }

    /// Write attribute to byte array
    pub fn to_bytes(&self) -> Result<Bytes, IppEncodeError> {
        let mut buffer = BytesMut::with_capacity(self.encoded_length());
        self.write_to(&mut buffer)?;
        Ok(buffer.freeze())
    }
}

/// Attribute group
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IppAttributeGroup {
    tag: DelimiterTag,
    attributes: Vec<IppAttribute>,
}

impl IppAttributeGroup {
    /// Create new attribute group of a given type
    pub fn new(tag: DelimiterTag) -> IppAttributeGroup {
        IppAttributeGroup {
            tag,
            attributes: Vec::new(),
        }
    }

    /// Return group type tag
    pub fn tag(&self) -> DelimiterTag {
        self.tag
    }

    /// Return read-only attributes in wire order
    pub fn attributes(&self) -> &[IppAttribute] {
        &self.attributes
    }

    /// Return mutable attributes
    pub fn attributes_mut(&mut self) -> &mut Vec<IppAttribute> {
        &mut self.attributes
    }

    /// Consume this group and return attributes
    pub fn into_attributes(self) -> Vec<IppAttribute> {
        self.attributes
    }

    /// Find the first attribute with a given name
    pub fn get(&self, name: &str) -> Option<&IppAttribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Append attribute to the end of the group
    pub fn add(&mut self, attribute: IppAttribute) {
        self.attributes.push(attribute);
    }

    /// Returns true if the group has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Size of the group including its delimiter tag
    pub fn encoded_length(&self) -> usize {
        1 + self.attributes.iter().map(IppAttribute::encoded_length).sum::<usize>()
    }

    /// Write group to the buffer. A group tagged with end-of-attributes cannot be written.
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<(), IppEncodeError> {
        if !self.tag.is_group_start() {
            return Err(IppEncodeError::InvalidGroupTag(self.tag));
        }

        buffer.put_u8(self.tag as u8);
        for attr in &self.attributes {
            attr.write_to(buffer)?;
        }
        Ok(())
    }

    /// Write group to byte array
    pub fn to_bytes(&self) -> Result<Bytes, IppEncodeError> {
        let mut buffer = BytesMut::with_capacity(self.encoded_length());
        self.write_to(&mut buffer)?;
        Ok(buffer.freeze())
    }
}

/// Attribute list
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IppAttributes {
    groups: Vec<IppAttributeGroup>,
}

impl IppAttributes {
    /// Create attribute list
    pub fn new() -> IppAttributes {
        IppAttributes { ..Default::default() }
    }

    /// Get all groups
    pub fn groups(&self) -> &[IppAttributeGroup] {
        &self.groups
    }

    /// Get all mutable groups
    pub fn groups_mut(&mut self) -> &mut Vec<IppAttributeGroup> {
        &mut self.groups
    }

    /// Consume this attribute list and return all attribute groups
    pub fn into_groups(self) -> Vec<IppAttributeGroup> {
        self.groups
    }

    /// Get a list of attribute groups matching a given delimiter tag
    pub fn groups_of(&self, tag: DelimiterTag) -> impl Iterator<Item = &IppAttributeGroup> {
        self.groups.iter().filter(move |g| g.tag == tag)
    }

    /// Add attribute to the last group if it has the given tag, otherwise start a new group
    pub fn add(&mut self, tag: DelimiterTag, attribute: IppAttribute) {
        match self.groups.last_mut() {
            Some(group) if group.tag() == tag => group.add(attribute),
            _ => {
                let mut new_group = IppAttributeGroup::new(tag);
                new_group.add(attribute);
                self.groups.push(new_group);
            }
        }
    }

    /// Append a complete group, empty groups included
    pub fn push_group(&mut self, group: IppAttributeGroup) {
        self.groups.push(group);
    }

    /// Size of all groups including the end-of-attributes tag
    pub fn encoded_length(&self) -> usize {
        1 + self.groups.iter().map(IppAttributeGroup::encoded_length).sum::<usize>()
    }

    /// Write attribute list to the buffer, terminated with end-of-attributes tag
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<(), IppEncodeError> {
        for group in &self.groups {
            group.write_to(buffer)?;
        }
        buffer.put_u8(DelimiterTag::EndOfAttributes as u8);
        Ok(())
    }

    /// Write attribute list to byte array
    pub fn to_bytes(&self) -> Result<Bytes, IppEncodeError> {
        let mut buffer = BytesMut::with_capacity(self.encoded_length());
        self.write_to(&mut buffer)?;
        Ok(buffer.freeze())
    }
}
