//!
//! Base IPP definitions and tags
//!
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use enum_primitive_derive::Primitive;
use num_traits::FromPrimitive;

use crate::error::IppError;

/// IPP protocol version, encoded as two separate bytes on the wire
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct IppVersion {
    pub major: u8,
    pub minor: u8,
}

impl IppVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        IppVersion { major, minor }
    }
    pub const fn v1_0() -> Self {
        IppVersion::new(1, 0)
    }
    pub const fn v1_1() -> Self {
        IppVersion::new(1, 1)
    }
    pub const fn v2_0() -> Self {
        IppVersion::new(2, 0)
    }
    pub const fn v2_1() -> Self {
        IppVersion::new(2, 1)
    }
    pub const fn v2_2() -> Self {
        IppVersion::new(2, 2)
    }
}

impl Default for IppVersion {
    fn default() -> Self {
        IppVersion::v1_1()
    }
}

impl fmt::Display for IppVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for IppVersion {
    type Err = IppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s.split_once('.').ok_or_else(|| IppError::InvalidVersion(s.to_owned()))?;
        match (major.parse(), minor.parse()) {
            (Ok(major), Ok(minor)) => Ok(IppVersion::new(major, minor)),
            _ => Err(IppError::InvalidVersion(s.to_owned())),
        }
    }
}

/// IPP operation constants
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Operation {
    PrintJob = 0x0002,
    PrintUri = 0x0003,
    ValidateJob = 0x0004,
    CreateJob = 0x0005,
    SendDocument = 0x0006,
    SendUri = 0x0007,
    CancelJob = 0x0008,
    GetJobAttributes = 0x0009,
    GetJobs = 0x000A,
    GetPrinterAttributes = 0x000B,
    HoldJob = 0x000C,
    ReleaseJob = 0x000D,
    RestartJob = 0x000E,
    PausePrinter = 0x0010,
    ResumePrinter = 0x0011,
    PurgeJobs = 0x0012,
    SetPrinterAttributes = 0x0013,
    SetJobAttributes = 0x0014,
    GetPrinterSupportedValues = 0x0015,
    CreatePrinterSubscriptions = 0x0016,
    CreateJobSubscriptions = 0x0017,
    GetSubscriptionAttributes = 0x0018,
    GetSubscriptions = 0x0019,
    RenewSubscription = 0x001A,
    CancelSubscription = 0x001B,
    GetNotifications = 0x001C,
    SendNotifications = 0x001D,
    GetPrintSupportFiles = 0x0021,
    EnablePrinter = 0x0022,
    DisablePrinter = 0x0023,
    PausePrinterAfterCurrentJob = 0x0024,
    HoldNewJobs = 0x0025,
    ReleaseHeldNewJobs = 0x0026,
    DeactivatePrinter = 0x0027,
    ActivatePrinter = 0x0028,
    RestartPrinter = 0x0029,
    ShutdownPrinter = 0x002A,
    StartupPrinter = 0x002B,
    ReprocessJob = 0x002C,
    CancelCurrentJob = 0x002D,
    SuspendCurrentJob = 0x002E,
    ResumeJob = 0x002F,
    PromoteJob = 0x0030,
    ScheduleJobAfter = 0x0031,

    CupsGetDefault = 0x4001,
    CupsGetPrinters = 0x4002,
    CupsAddModifyPrinter = 0x4003,
    CupsDeletePrinter = 0x4004,
    CupsGetClasses = 0x4005,
    CupsAddModifyClass = 0x4006,
    CupsDeleteClass = 0x4007,
    CupsAcceptJobs = 0x4008,
    CupsRejectJobs = 0x4009,
    CupsSetDefault = 0x400A,
    CupsGetDevices = 0x400B,
    CupsGetPPDs = 0x400C,
    CupsMoveJob = 0x400D,
    CupsAuthenticateJob = 0x400E,
    CupsGetPPD = 0x400F,
    CupsGetDocument = 0x4027,
    CupsCreateLocalPrinter = 0x4028,
}

/// printer-state constants
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrinterState {
    Idle = 3,
    Processing = 4,
    Stopped = 5,
}

/// paper orientation constants
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Orientation {
    Portrait = 3,
    Landscape = 4,
    ReverseLandscape = 5,
    ReversePortrait = 6,
}

/// print-quality constants
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrintQuality {
    Draft = 3,
    Normal = 4,
    High = 5,
}

/// finishings constants
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Finishings {
    None = 3,
    Staple = 4,
    Punch = 5,
    Cover = 6,
    Bind = 7,
    SaddleStitch = 8,
    EdgeStitch = 9,
    Fold = 10,
    Trim = 11,
    Bale = 12,
    BookletMaker = 13,
    JobOffset = 14,
    StapleTopLeft = 20,
    StapleBottomLeft = 21,
    StapleTopRight = 22,
    StapleBottomRight = 23,
    EdgeStitchLeft = 24,
    EdgeStitchTop = 25,
    EdgeStitchRight = 26,
    EdgeStitchBottom = 27,
    StapleDualLeft = 28,
    StapleDualTop = 29,
    StapleDualRight = 30,
    StapleDualBottom = 31,
    BindLeft = 50,
    BindTop = 51,
    BindRight = 52,
    BindBottom = 53,
}

/// job-state constants
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum JobState {
    Pending = 3,
    PendingHeld = 4,
    Processing = 5,
    ProcessingStopped = 6,
    Canceled = 7,
    Aborted = 8,
    Completed = 9,
}

/// Units of the resolution syntax
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResolutionUnit {
    DotsPerInch = 3,
    DotsPerCentimeter = 4,
}

/// group delimiter tags
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, PartialEq, Hash, Eq)]
pub enum DelimiterTag {
    Reserved = 0x00,
    OperationAttributes = 0x01,
    JobAttributes = 0x02,
    EndOfAttributes = 0x03,
    PrinterAttributes = 0x04,
    UnsupportedAttributes = 0x05,
    SubscriptionAttributes = 0x06,
    EventNotificationAttributes = 0x07,
    ResourceAttributes = 0x08,
    DocumentAttributes = 0x09,
}

impl DelimiterTag {
    /// Every tag except end-of-attributes opens an attribute group
    pub fn is_group_start(&self) -> bool {
        *self != DelimiterTag::EndOfAttributes
    }
}

/// IPP value tags
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ValueTag {
    Unsupported = 0x10,
    Unknown = 0x12,
    NoValue = 0x13,
    Integer = 0x21,
    Boolean = 0x22,
    Enum = 0x23,
    OctetStringUnspecified = 0x30,
    DateTime = 0x31,
    Resolution = 0x32,
    RangeOfInteger = 0x33,
    TextWithLanguage = 0x35,
    NameWithLanguage = 0x36,
    TextWithoutLanguage = 0x41,
    NameWithoutLanguage = 0x42,
    Keyword = 0x44,
    Uri = 0x45,
    UriScheme = 0x46,
    Charset = 0x47,
    NaturalLanguage = 0x48,
    MimeMediaType = 0x49,
}

impl ValueTag {
    /// Required value length for the fixed-width syntaxes, `None` for variable-length ones
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            ValueTag::Unsupported | ValueTag::Unknown | ValueTag::NoValue => Some(0),
            ValueTag::Boolean => Some(1),
            ValueTag::Integer | ValueTag::Enum => Some(4),
            ValueTag::RangeOfInteger => Some(8),
            ValueTag::Resolution => Some(9),
            ValueTag::DateTime => Some(11),
            _ => None,
        }
    }
}

/// Classification of a single tag byte
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tag {
    Delimiter(DelimiterTag),
    Value(ValueTag),
    Unknown(u8),
}

impl Tag {
    /// Upper bound of the delimiter tag range
    pub const MAX_DELIMITER: u8 = 0x0f;

    /// Classify a tag byte. Delimiter and value tags are disjoint.
    pub fn classify(tag: u8) -> Tag {
        if tag <= Tag::MAX_DELIMITER {
            DelimiterTag::from_u8(tag).map_or(Tag::Unknown(tag), Tag::Delimiter)
        } else {
            ValueTag::from_u8(tag).map_or(Tag::Unknown(tag), Tag::Value)
        }
    }

    /// Returns true if the byte falls into the delimiter range, assigned or not
    pub fn is_delimiter_range(tag: u8) -> bool {
        tag <= Tag::MAX_DELIMITER
    }
}

impl From<u8> for Tag {
    fn from(tag: u8) -> Self {
        Tag::classify(tag)
    }
}

/// IPP status codes
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Primitive, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StatusCode {
    SuccessfulOk = 0x0000,
    SuccessfulOkIgnoredOrSubstitutedAttributes = 0x0001,
    SuccessfulOkConflictingAttributes = 0x0002,
    SuccessfulOkIgnoredSubscriptions = 0x0003,
    SuccessfulOkTooManyEvents = 0x0005,
    SuccessfulOkEventsComplete = 0x0007,
    ClientErrorBadRequest = 0x0400,
    ClientErrorForbidden = 0x0401,
    ClientErrorNotAuthenticated = 0x0402,
    ClientErrorNotAuthorized = 0x0403,
    ClientErrorNotPossible = 0x0404,
    ClientErrorTimeout = 0x0405,
    ClientErrorNotFound = 0x0406,
    ClientErrorGone = 0x0407,
    ClientErrorRequestEntityTooLong = 0x0408,
    ClientErrorRequestValueTooLong = 0x0409,
    ClientErrorDocumentFormatNotSupported = 0x040A,
    ClientErrorAttributesOrValuesNotSupported = 0x040B,
    ClientErrorUriSchemeNotSupported = 0x040C,
    ClientErrorCharsetNotSupported = 0x040D,
    ClientErrorConflictingAttributes = 0x040E,
    ClientErrorCompressionNotSupported = 0x040F,
    ClientErrorCompressionError = 0x0410,
    ClientErrorDocumentFormatError = 0x0411,
    ClientErrorDocumentAccessError = 0x0412,
    ClientErrorIgnoredAllSubscriptions = 0x0414,
    ClientErrorTooManySubscriptions = 0x0415,
    ServerErrorInternalError = 0x0500,
    ServerErrorOperationNotSupported = 0x0501,
    ServerErrorServiceUnavailable = 0x0502,
    ServerErrorVersionNotSupported = 0x0503,
    ServerErrorDeviceError = 0x0504,
    ServerErrorTemporaryError = 0x0505,
    ServerErrorNotAcceptingJobs = 0x0506,
    ServerErrorBusy = 0x0507,
    ServerErrorJobCanceled = 0x0508,
    ServerErrorMultipleDocumentJobsNotSupported = 0x0509,
    UnknownStatusCode = 0xffff,
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        (*self as u16) < 0x0100
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatusCode::SuccessfulOk => write!(f, "No error"),
            StatusCode::SuccessfulOkIgnoredOrSubstitutedAttributes => write!(f, "Ignored or substituted attributes"),
            StatusCode::SuccessfulOkConflictingAttributes => write!(f, "Conflicting attributes"),
            StatusCode::SuccessfulOkIgnoredSubscriptions => write!(f, "Ignored subscriptions"),
            StatusCode::SuccessfulOkTooManyEvents => write!(f, "Too many events"),
            StatusCode::SuccessfulOkEventsComplete => write!(f, "Events complete"),
            StatusCode::ClientErrorBadRequest => write!(f, "Bad request"),
            StatusCode::ClientErrorForbidden => write!(f, "Forbidden"),
            StatusCode::ClientErrorNotAuthenticated => write!(f, "Not authenticated"),
            StatusCode::ClientErrorNotAuthorized => write!(f, "Not authorized"),
            StatusCode::ClientErrorNotPossible => write!(f, "Not possible"),
            StatusCode::ClientErrorTimeout => write!(f, "Timeout"),
            StatusCode::ClientErrorNotFound => write!(f, "Not found"),
            StatusCode::ClientErrorGone => write!(f, "Gone"),
            StatusCode::ClientErrorRequestEntityTooLong => write!(f, "Entity too long"),
            StatusCode::ClientErrorRequestValueTooLong => write!(f, "Request value too long"),
            StatusCode::ClientErrorDocumentFormatNotSupported => write!(f, "Document format not supported"),
            StatusCode::ClientErrorAttributesOrValuesNotSupported => write!(f, "Attributes or values not supported"),
            StatusCode::ClientErrorUriSchemeNotSupported => write!(f, "Uri scheme not supported"),
            StatusCode::ClientErrorCharsetNotSupported => write!(f, "Charset not supported"),
            StatusCode::ClientErrorConflictingAttributes => write!(f, "Conflicting attributes"),
            StatusCode::ClientErrorCompressionNotSupported => write!(f, "Compression not supported"),
            StatusCode::ClientErrorCompressionError => write!(f, "Compression error"),
            StatusCode::ClientErrorDocumentFormatError => write!(f, "Document format error"),
            StatusCode::ClientErrorDocumentAccessError => write!(f, "Document access error"),
            StatusCode::ClientErrorIgnoredAllSubscriptions => write!(f, "Ignored all subscriptions"),
            StatusCode::ClientErrorTooManySubscriptions => write!(f, "Too many subscriptions"),
            StatusCode::ServerErrorInternalError => write!(f, "Internal error"),
            StatusCode::ServerErrorOperationNotSupported => write!(f, "Operation not supported"),
            StatusCode::ServerErrorServiceUnavailable => write!(f, "Service unavailable"),
            StatusCode::ServerErrorVersionNotSupported => write!(f, "Version not supported"),
            StatusCode::ServerErrorDeviceError => write!(f, "Device error"),
            StatusCode::ServerErrorTemporaryError => write!(f, "Temporary error"),
            StatusCode::ServerErrorNotAcceptingJobs => write!(f, "Not accepting jobs"),
            StatusCode::ServerErrorBusy => write!(f, "Busy"),
            StatusCode::ServerErrorJobCanceled => write!(f, "Job canceled"),
            StatusCode::ServerErrorMultipleDocumentJobsNotSupported => {
                write!(f, "Multiple document jobs not supported")
            }
            StatusCode::UnknownStatusCode => write!(f, "Unknown status code"),
        }
    }
}
