use bytes::Bytes;
use ipp_codec::prelude::*;
use proptest::{collection::vec, prelude::*};

// text and name values are raw bytes in the message charset
fn text() -> impl Strategy<Value = Bytes> {
    vec(any::<u8>(), 0..24).prop_map(Bytes::from)
}

fn ascii() -> impl Strategy<Value = String> {
    "[a-z0-9.:/-]{0,24}"
}

fn ipp_value() -> impl Strategy<Value = IppValue> {
    prop_oneof![
        Just(IppValue::Unsupported),
        Just(IppValue::Unknown),
        Just(IppValue::NoValue),
        any::<i32>().prop_map(IppValue::Integer),
        any::<bool>().prop_map(IppValue::Boolean),
        any::<i32>().prop_map(IppValue::Enum),
        vec(any::<u8>(), 0..32).prop_map(|v| IppValue::OctetString(Bytes::from(v))),
        (
            any::<u16>(),
            1u8..=12,
            1u8..=31,
            0u8..24,
            0u8..60,
            0u8..61,
            0u8..10,
            any::<u8>(),
            0u8..14,
            0u8..60
        )
            .prop_map(
                |(year, month, day, hour, minutes, seconds, deci_seconds, utc_dir, utc_hours, utc_mins)| {
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
                    }
                }
            ),
        (any::<i32>(), any::<i32>(), prop_oneof![Just(3i8), Just(4i8)]).prop_map(|(cross_feed, feed, units)| {
            IppValue::Resolution {
                cross_feed,
                feed,
                units,
            }
        }),
        (any::<i32>(), any::<i32>()).prop_map(|(min, max)| IppValue::RangeOfInteger { min, max }),
        (ascii(), text()).prop_map(|(language, text)| IppValue::TextWithLanguage { language, text }),
        (ascii(), text()).prop_map(|(language, name)| IppValue::NameWithLanguage { language, name }),
        text().prop_map(IppValue::TextWithoutLanguage),
        text().prop_map(IppValue::NameWithoutLanguage),
        ascii().prop_map(IppValue::Keyword),
        ascii().prop_map(IppValue::Uri),
        ascii().prop_map(IppValue::UriScheme),
        ascii().prop_map(IppValue::Charset),
        ascii().prop_map(IppValue::NaturalLanguage),
        ascii().prop_map(IppValue::MimeMediaType),
    ]
}

fn ipp_attribute() -> impl Strategy<Value = IppAttribute> {
    ("[a-z][a-z-]{0,30}", vec(ipp_value(), 1..4))
        .prop_filter_map("attribute needs a value", |(name, values)| {
            IppAttribute::with_values(name, values)
        })
}

fn group_tag() -> impl Strategy<Value = DelimiterTag> {
    prop_oneof![
        Just(DelimiterTag::OperationAttributes),
        Just(DelimiterTag::JobAttributes),
        Just(DelimiterTag::PrinterAttributes),
        Just(DelimiterTag::UnsupportedAttributes),
        Just(DelimiterTag::SubscriptionAttributes),
        Just(DelimiterTag::EventNotificationAttributes),
        Just(DelimiterTag::ResourceAttributes),
        Just(DelimiterTag::DocumentAttributes),
    ]
}

fn ipp_group() -> impl Strategy<Value = IppAttributeGroup> {
    (group_tag(), vec(ipp_attribute(), 0..5)).prop_map(|(tag, attributes)| {
        let mut group = IppAttributeGroup::new(tag);
        for attribute in attributes {
            group.add(attribute);
        }
        group
    })
}

fn ipp_message() -> impl Strategy<Value = IppMessage> {
    (
        any::<u8>(),
        any::<u8>(),
        any::<u16>(),
        any::<i32>(),
        vec(ipp_group(), 0..4),
        vec(any::<u8>(), 0..64),
    )
        .prop_map(|(major, minor, operation_or_status, request_id, groups, payload)| {
            let mut message = IppMessage::new(IppHeader::new(
                IppVersion::new(major, minor),
                operation_or_status,
                request_id,
            ));
            for group in groups {
                message.attributes_mut().push_group(group);
            }
            message.set_payload(payload);
            message
        })
}

proptest! {
    #[test]
    fn decode_inverts_encode(message in ipp_message()) {
        let bytes = ipp_codec::encode(&message).unwrap();
        prop_assert_eq!(bytes.len(), message.encoded_length());
        prop_assert_eq!(ipp_codec::decode(bytes).unwrap(), message);
    }

    #[test]
    fn encode_is_stable_after_decode(message in ipp_message()) {
        let bytes = ipp_codec::encode(&message).unwrap();
        let decoded = ipp_codec::decode(bytes.clone()).unwrap();
        prop_assert_eq!(ipp_codec::encode(&decoded).unwrap(), bytes);
    }

    #[test]
    fn truncated_input_never_panics(message in ipp_message(), cut in any::<prop::sample::Index>()) {
        let bytes = ipp_codec::encode(&message).unwrap();
        let header_and_attrs = bytes.len() - message.payload().len();
        let len = cut.index(header_and_attrs);
        prop_assert!(ipp_codec::decode(bytes.slice(..len)).is_err());
    }
}
