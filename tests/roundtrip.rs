//! Property-based tests for the laws in the testable-properties section of the design doc:
//! encode/decode round-tripping, the semi-octet/septet bijections, and VP bucket stability.
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use sms_pdu::gsm7::{decode_7bit, encode_septets, pack_septets, unpack_septets};
use sms_pdu::pdu::{Message, MessageEncoding, MessageType, VpFormat};
use sms_pdu::semi_octet::{decode_digits, decode_semi_octets, encode_digits, encode_semi_octets};
use sms_pdu::validity::ValidityPeriod;
use sms_pdu::PhoneNumber;

// GSM 7-bit default-alphabet characters only (no extension escapes), so septet count lines up
// with character count for the pack/unpack law below.
fn gsm7_text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::range('0', 'z'), 0..160)
        .prop_filter_map("must encode cleanly", |chars: Vec<char>| {
            let s: String = chars.into_iter().collect();
            encode_septets(&s).ok().map(|_| s)
        })
}

fn ucs2_text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::range('\u{0020}', '\u{FFFD}'), 0..70)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn semi_octets_roundtrip_any_even_sequence(values in proptest::collection::vec(0u8..100, 0..20)) {
        let encoded = encode_semi_octets(&values);
        prop_assert_eq!(decode_semi_octets(&encoded), values);
    }

    #[test]
    fn digit_pairs_roundtrip_given_explicit_count(digits in proptest::collection::vec(0u8..10, 0..20)) {
        let encoded = encode_digits(&digits);
        let mut decoded = decode_digits(&encoded).unwrap();
        decoded.truncate(digits.len());
        prop_assert_eq!(decoded, digits);
    }

    #[test]
    fn septet_pack_unpack_is_a_bijection(septets in proptest::collection::vec(0u8..128, 0..200)) {
        let packed = pack_septets(&septets);
        prop_assert_eq!(packed.len(), (septets.len() * 7 + 7) / 8);
        let unpacked = unpack_septets(&packed, septets.len());
        prop_assert_eq!(unpacked, septets);
    }

    #[test]
    fn gsm7_text_roundtrips(text in gsm7_text_strategy()) {
        let septets = encode_septets(&text).unwrap();
        let packed = pack_septets(&septets);
        let decoded = decode_7bit(&packed, septets.len() as u8).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn phone_number_toa_matches_leading_plus(digits in "[0-9]{1,12}", international in any::<bool>()) {
        let input = if international { format!("+{}", digits) } else { digits.clone() };
        let num = PhoneNumber::new(&input).unwrap();
        let expected_toa = if international { 0x91 } else { 0xA1 };
        prop_assert_eq!(num.type_of_address(), expected_toa);
    }

    #[test]
    fn phone_number_roundtrips_through_wire_bytes(digits in "[0-9]{1,12}") {
        let input = format!("+{}", digits);
        let num = PhoneNumber::new(&input).unwrap();
        let (count, bytes) = num.encode();
        let decoded = PhoneNumber::decode(bytes[0], &bytes[1..], count).unwrap();
        prop_assert_eq!(decoded.display(), input);
    }

    #[test]
    fn validity_period_octet_roundtrip_is_identity_on_full_range(octet in 0u8..=255) {
        let vp = ValidityPeriod::from_octet(octet);
        prop_assert_eq!(ValidityPeriod::from_octet(vp.to_octet()).to_octet(), vp.to_octet());
    }

    #[test]
    fn validity_period_encode_never_undershoots_within_representable_range(minutes in 0u32..=635_040) {
        let vp = ValidityPeriod::from_duration(chrono::Duration::minutes(minutes as i64));
        prop_assert!(vp.duration().num_minutes() as u32 >= minutes);
    }

    #[test]
    fn submit_message_roundtrips_over_gsm7_text(text in gsm7_text_strategy(), digits in "[0-9]{5,12}", reference in any::<u8>()) {
        let msg = Message {
            message_type: MessageType::Submit,
            encoding: MessageEncoding::Gsm7Bit,
            vp_format: VpFormat::Relative,
            vp: Some(ValidityPeriod::from_octet(0xA7)),
            service_center_time: None,
            service_center_address: None,
            address: PhoneNumber::new(&format!("+{}", digits)).unwrap(),
            text: text.clone(),
            message_reference: Some(reference),
            reply_path: false,
            udh_indicator: false,
            status_report_indication: false,
            status_report_request: false,
            more_messages_to_send: true,
            loop_prevention: false,
            reject_duplicates: false,
        };
        let (_, bytes) = msg.encode().unwrap();
        let (consumed, decoded) = Message::decode(&bytes).unwrap();
        prop_assert_eq!(consumed, bytes.len());
        prop_assert_eq!(decoded.text, text);
        prop_assert_eq!(decoded.message_reference, Some(reference));
    }

    #[test]
    fn submit_message_roundtrips_over_ucs2_text(text in ucs2_text_strategy(), digits in "[0-9]{5,12}") {
        let msg = Message {
            message_type: MessageType::Submit,
            encoding: MessageEncoding::Ucs2,
            vp_format: VpFormat::NotPresent,
            vp: None,
            service_center_time: None,
            service_center_address: None,
            address: PhoneNumber::new(&format!("+{}", digits)).unwrap(),
            text: text.clone(),
            message_reference: Some(0),
            reply_path: false,
            udh_indicator: false,
            status_report_indication: false,
            status_report_request: false,
            more_messages_to_send: true,
            loop_prevention: false,
            reject_duplicates: false,
        };
        let (_, bytes) = msg.encode().unwrap();
        let (consumed, decoded) = Message::decode(&bytes).unwrap();
        prop_assert_eq!(consumed, bytes.len());
        prop_assert_eq!(decoded.text, text);
    }

    #[test]
    fn deliver_message_roundtrips_timestamp_to_second_resolution(
        year in 0i32..100, month in 1u32..=12, day in 1u32..=28,
        hour in 0u32..24, minute in 0u32..60, second in 0u32..60,
        quarter_hours in -40i8..40,
    ) {
        let instant = Utc.with_ymd_and_hms(2000 + year, month, day, hour, minute, second).unwrap();
        let msg = Message {
            message_type: MessageType::Deliver,
            encoding: MessageEncoding::Gsm7Bit,
            vp_format: VpFormat::NotPresent,
            vp: None,
            service_center_time: Some(sms_pdu::Timestamp::new(instant, quarter_hours)),
            service_center_address: None,
            address: PhoneNumber::new("+1555123").unwrap(),
            text: "hi".to_string(),
            message_reference: None,
            reply_path: false,
            udh_indicator: false,
            status_report_indication: false,
            status_report_request: false,
            more_messages_to_send: true,
            loop_prevention: false,
            reject_duplicates: false,
        };
        let (_, bytes) = msg.encode().unwrap();
        let (_, decoded) = Message::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.service_center_time.unwrap().instant(), instant);
    }
}
