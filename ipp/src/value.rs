//!
//! IPP value
//!
use std::{convert::Infallible, fmt, str::FromStr};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use enum_as_inner::EnumAsInner;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::IppEncodeError,
    model::{ResolutionUnit, ValueTag},
    parser::IppParseError,
    FromPrimitive as _,
};

/// IPP attribute values as defined in [RFC 8010](https://tools.ietf.org/html/rfc8010)
///
/// Text and name values hold the raw bytes in the charset of the message
/// (`attributes-charset`), so they are not required to be UTF-8.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, EnumAsInner)]
pub enum IppValue {
    Unsupported,
    Unknown,
    NoValue,
    Integer(i32),
    Boolean(bool),
    Enum(i32),
    OctetString(Bytes),
    DateTime {
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minutes: u8,
        seconds: u8,
        deci_seconds: u8,
        /// `b'+'` or `b'-'`
        utc_dir: u8,
        utc_hours: u8,
        utc_mins: u8,
    },
    Resolution {
        cross_feed: i32,
        feed: i32,
        units: i8,
    },
    RangeOfInteger {
        min: i32,
        max: i32,
    },
    TextWithLanguage {
        language: String,
        text: Bytes,
    },
    NameWithLanguage {
        language: String,
        name: Bytes,
    },
    TextWithoutLanguage(Bytes),
    NameWithoutLanguage(Bytes),
    Keyword(String),
    Uri(String),
    UriScheme(String),
    Charset(String),
    NaturalLanguage(String),
    MimeMediaType(String),
}

fn parse_string(tag: ValueTag, data: &[u8]) -> Result<String, IppParseError> {
    String::from_utf8(data.to_vec()).map_err(|_| IppParseError::InvalidString(tag))
}

// language and text are each prefixed with their own two-byte length
fn parse_with_language(tag: ValueTag, mut data: Bytes) -> Result<(String, Bytes), IppParseError> {
    let actual = data.len();
    let mismatch = |expected| IppParseError::SyntaxLengthMismatch { tag, expected, actual };

    if data.remaining() < 2 {
        return Err(mismatch(4));
    }
    let lang_len = data.get_u16() as usize;
    if data.remaining() < lang_len + 2 {
        return Err(mismatch(4 + lang_len));
    }
    let language = data.split_to(lang_len);
    let text_len = data.get_u16() as usize;
    if data.remaining() != text_len {
        return Err(mismatch(4 + lang_len + text_len));
    }

    Ok((parse_string(tag, &language)?, data))
}

// both parts fit into u16 once the whole value does
fn put_with_language(buffer: &mut BytesMut, language: &str, text: &[u8]) {
    buffer.put_u16(language.len() as u16);
    buffer.put_slice(language.as_bytes());
    buffer.put_u16(text.len() as u16);
    buffer.put_slice(text);
}

impl IppValue {
    /// Convert to binary tag
    pub fn to_tag(&self) -> ValueTag {
        match *self {
            IppValue::Unsupported => ValueTag::Unsupported,
            IppValue::Unknown => ValueTag::Unknown,
            IppValue::NoValue => ValueTag::NoValue,
            IppValue::Integer(_) => ValueTag::Integer,
            IppValue::Boolean(_) => ValueTag::Boolean,
            IppValue::Enum(_) => ValueTag::Enum,
            IppValue::OctetString(_) => ValueTag::OctetStringUnspecified,
            IppValue::DateTime { .. } => ValueTag::DateTime,
            IppValue::Resolution { .. } => ValueTag::Resolution,
            IppValue::RangeOfInteger { .. } => ValueTag::RangeOfInteger,
            IppValue::TextWithLanguage { .. } => ValueTag::TextWithLanguage,
            IppValue::NameWithLanguage { .. } => ValueTag::NameWithLanguage,
            IppValue::TextWithoutLanguage(_) => ValueTag::TextWithoutLanguage,
            IppValue::NameWithoutLanguage(_) => ValueTag::NameWithoutLanguage,
            IppValue::Keyword(_) => ValueTag::Keyword,
            IppValue::Uri(_) => ValueTag::Uri,
            IppValue::UriScheme(_) => ValueTag::UriScheme,
            IppValue::Charset(_) => ValueTag::Charset,
            IppValue::NaturalLanguage(_) => ValueTag::NaturalLanguage,
            IppValue::MimeMediaType(_) => ValueTag::MimeMediaType,
        }
    }

    /// Returns true for the out-of-band values which carry no data
    pub fn is_out_of_band(&self) -> bool {
        matches!(self, IppValue::Unsupported | IppValue::Unknown | IppValue::NoValue)
    }

    /// Length of the value field, excluding value length and tag
    pub fn encoded_len(&self) -> usize {
        match *self {
            IppValue::Unsupported | IppValue::Unknown | IppValue::NoValue => 0,
            IppValue::Boolean(_) => 1,
            IppValue::Integer(_) | IppValue::Enum(_) => 4,
            IppValue::RangeOfInteger { .. } => 8,
            IppValue::Resolution { .. } => 9,
            IppValue::DateTime { .. } => 11,
            IppValue::OctetString(ref b) => b.len(),
            IppValue::TextWithLanguage {
                ref language,
                text: ref s,
            }
            | IppValue::NameWithLanguage {
                ref language,
                name: ref s,
            } => 4 + language.len() + s.len(),
            IppValue::TextWithoutLanguage(ref s) | IppValue::NameWithoutLanguage(ref s) => s.len(),
            IppValue::Keyword(ref s)
            | IppValue::Uri(ref s)
            | IppValue::UriScheme(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s)
            | IppValue::MimeMediaType(ref s) => s.len(),
        }
    }

    /// Parse value from byte array which does not include the value length field
    pub fn parse(value_tag: u8, mut data: Bytes) -> Result<IppValue, IppParseError> {
        let ipp_tag = ValueTag::from_u8(value_tag).ok_or(IppParseError::UnknownSyntax(value_tag))?;

        if let Some(expected) = ipp_tag.fixed_len() {
            if data.len() != expected {
                return Err(IppParseError::SyntaxLengthMismatch {
                    tag: ipp_tag,
                    expected,
                    actual: data.len(),
                });
            }
        }

        let value = match ipp_tag {
            ValueTag::Unsupported => IppValue::Unsupported,
            ValueTag::Unknown => IppValue::Unknown,
            ValueTag::NoValue => IppValue::NoValue,
            ValueTag::Integer => IppValue::Integer(data.get_i32()),
            ValueTag::Enum => IppValue::Enum(data.get_i32()),
            ValueTag::Boolean => match data.get_u8() {
                0x00 => IppValue::Boolean(false),
                0x01 => IppValue::Boolean(true),
                other => return Err(IppParseError::InvalidBoolean(other)),
            },
            ValueTag::OctetStringUnspecified => IppValue::OctetString(data),
            ValueTag::DateTime => IppValue::DateTime {
                year: data.get_u16(),
                month: data.get_u8(),
                day: data.get_u8(),
                hour: data.get_u8(),
                minutes: data.get_u8(),
                seconds: data.get_u8(),
                deci_seconds: data.get_u8(),
                utc_dir: data.get_u8(),
                utc_hours: data.get_u8(),
                utc_mins: data.get_u8(),
            },
            ValueTag::Resolution => IppValue::Resolution {
                cross_feed: data.get_i32(),
                feed: data.get_i32(),
                units: data.get_i8(),
            },
            ValueTag::RangeOfInteger => IppValue::RangeOfInteger {
                min: data.get_i32(),
                max: data.get_i32(),
            },
            ValueTag::TextWithLanguage => {
                let (language, text) = parse_with_language(ipp_tag, data)?;
                IppValue::TextWithLanguage { language, text }
            }
            ValueTag::NameWithLanguage => {
                let (language, name) = parse_with_language(ipp_tag, data)?;
                IppValue::NameWithLanguage { language, name }
            }
            ValueTag::TextWithoutLanguage => IppValue::TextWithoutLanguage(data),
            ValueTag::NameWithoutLanguage => IppValue::NameWithoutLanguage(data),
            ValueTag::Keyword => IppValue::Keyword(parse_string(ipp_tag, &data)?),
            ValueTag::Uri => IppValue::Uri(parse_string(ipp_tag, &data)?),
            ValueTag::UriScheme => IppValue::UriScheme(parse_string(ipp_tag, &data)?),
            ValueTag::Charset => IppValue::Charset(parse_string(ipp_tag, &data)?),
            ValueTag::NaturalLanguage => IppValue::NaturalLanguage(parse_string(ipp_tag, &data)?),
            ValueTag::MimeMediaType => IppValue::MimeMediaType(parse_string(ipp_tag, &data)?),
        };
        Ok(value)
    }

    /// Write value to the buffer, including leading value length field, excluding value tag.
    /// Values longer than 65535 bytes cannot be represented and are rejected.
    pub fn write_to(&self, buffer: &mut BytesMut) -> Result<(), IppEncodeError> {
        let len = self.encoded_len();
        let len = u16::try_from(len).map_err(|_| IppEncodeError::ValueTooLong { tag: self.to_tag(), len })?;

        buffer.put_u16(len);

        match *self {
            IppValue::Unsupported | IppValue::Unknown | IppValue::NoValue => {}
            IppValue::Integer(i) | IppValue::Enum(i) => buffer.put_i32(i),
            IppValue::Boolean(b) => buffer.put_u8(b as u8),
            IppValue::OctetString(ref data) => buffer.put_slice(data),
            IppValue::DateTime {
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir,
                utc_hours,
                utc_mins,
            } => {
                buffer.put_u16(year);
                buffer.put_u8(month);
                buffer.put_u8(day);
                buffer.put_u8(hour);
                buffer.put_u8(minutes);
                buffer.put_u8(seconds);
                buffer.put_u8(deci_seconds);
                buffer.put_u8(utc_dir);
                buffer.put_u8(utc_hours);
                buffer.put_u8(utc_mins);
            }
            IppValue::Resolution {
                cross_feed,
                feed,
                units,
            } => {
                buffer.put_i32(cross_feed);
                buffer.put_i32(feed);
                buffer.put_i8(units);
            }
            IppValue::RangeOfInteger { min, max } => {
                buffer.put_i32(min);
                buffer.put_i32(max);
            }
            IppValue::TextWithLanguage {
                ref language,
                text: ref s,
            }
            | IppValue::NameWithLanguage {
                ref language,
                name: ref s,
            } => put_with_language(buffer, language, s),
            IppValue::TextWithoutLanguage(ref s) | IppValue::NameWithoutLanguage(ref s) => buffer.put_slice(s),
            IppValue::Keyword(ref s)
            | IppValue::Uri(ref s)
            | IppValue::UriScheme(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s)
            | IppValue::MimeMediaType(ref s) => buffer.put_slice(s.as_bytes()),
        }
        Ok(())
    }

    /// Write value to byte array, including leading value length field, excluding value tag
    pub fn to_bytes(&self) -> Result<Bytes, IppEncodeError> {
        let mut buffer = BytesMut::with_capacity(2 + self.encoded_len());
        self.write_to(&mut buffer)?;
        Ok(buffer.freeze())
    }
}

/// Implement Display trait to print the value
impl fmt::Display for IppValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IppValue::Unsupported => write!(f, "unsupported"),
            IppValue::Unknown => write!(f, "unknown"),
            IppValue::NoValue => write!(f, "no-value"),
            IppValue::Integer(i) | IppValue::Enum(i) => write!(f, "{}", i),
            IppValue::Boolean(b) => write!(f, "{}", if b { "true" } else { "false" }),
            IppValue::OctetString(ref data) => write!(f, "{:?}", data),
            IppValue::DateTime {
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir,
                utc_hours,
                utc_mins,
            } => write!(
                f,
                "{}-{:02}-{:02},{:02}:{:02}:{:02}.{},{}{:02}{:02}utc",
                year,
                month,
                day,
                hour,
                minutes,
                seconds,
                deci_seconds,
                utc_dir as char,
                utc_hours,
                utc_mins
            ),
            IppValue::Resolution {
                cross_feed,
                feed,
                units,
            } => match ResolutionUnit::from_i8(units) {
                Some(ResolutionUnit::DotsPerInch) => write!(f, "{}x{}dpi", cross_feed, feed),
                Some(ResolutionUnit::DotsPerCentimeter) => write!(f, "{}x{}dpcm", cross_feed, feed),
                None => write!(f, "{}x{} ({})", cross_feed, feed, units),
            },
            IppValue::RangeOfInteger { min, max } => write!(f, "{}..{}", min, max),
            IppValue::TextWithLanguage {
                ref language,
                text: ref s,
            }
            | IppValue::NameWithLanguage {
                ref language,
                name: ref s,
            } => write!(f, "{} [{}]", String::from_utf8_lossy(s), language),
            IppValue::TextWithoutLanguage(ref s) | IppValue::NameWithoutLanguage(ref s) => {
                write!(f, "{}", String::from_utf8_lossy(s))
            }
            IppValue::Keyword(ref s)
            | IppValue::Uri(ref s)
            | IppValue::UriScheme(ref s)
            | IppValue::Charset(ref s)
            | IppValue::NaturalLanguage(ref s)
            | IppValue::MimeMediaType(ref s) => write!(f, "{}", s),
        }
    }
}

fn parse_resolution(s: &str) -> Option<IppValue> {
    let (dims, units) = if let Some(dims) = s.strip_suffix("dpcm") {
        (dims, ResolutionUnit::DotsPerCentimeter)
    } else {
        (s.strip_suffix("dpi")?, ResolutionUnit::DotsPerInch)
    };
    let (cross_feed, feed) = dims.split_once('x')?;
    Some(IppValue::Resolution {
        cross_feed: cross_feed.parse().ok()?,
        feed: feed.parse().ok()?,
        units: units as i8,
    })
}

fn parse_range(s: &str) -> Option<IppValue> {
    let (min, max) = s.split_once("..")?;
    Some(IppValue::RangeOfInteger {
        min: min.parse().ok()?,
        max: max.parse().ok()?,
    })
}

impl FromStr for IppValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s {
            "true" => IppValue::Boolean(true),
            "false" => IppValue::Boolean(false),
            other => {
                if let Ok(iv) = other.parse::<i32>() {
                    IppValue::Integer(iv)
                } else if let Some(range) = parse_range(other) {
                    range
                } else if let Some(resolution) = parse_resolution(other) {
                    resolution
                } else {
                    IppValue::Keyword(other.to_owned())
                }
            }
        };
        Ok(value)
    }
}
