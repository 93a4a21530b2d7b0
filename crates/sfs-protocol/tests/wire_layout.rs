// crates/sfs-protocol/tests/wire_layout.rs
use sfs_core::{
    Clause, FindUsersRequest, MatchExpression, NumberMatch, Request, SearchScope, SfsArray,
    SfsObject, SfsValue,
};
use sfs_protocol::wire_types::MAX_DEPTH;
use sfs_protocol::{decode_message, decode_object, encode_object, encode_request, ProtocolError};

fn age_over_29() -> MatchExpression {
    MatchExpression::new(Clause::number("age", NumberMatch::GreaterThan, 29))
}

#[test]
fn find_users_envelope_matches_reference_bytes() {
    let request = FindUsersRequest::new(Some(age_over_29()), SearchScope::Room(42), 500);
    let msg = request.build().expect("valid request");

    let mut actual = Vec::new();
    encode_request(&msg, &mut actual).unwrap();

    let mut expected: Vec<u8> = vec![
        18, 0, 3, // envelope object, 3 keys
        0, 1, b'c', 2, 0, // c: byte 0 (system controller)
        0, 1, b'a', 3, 0, 28, // a: short 28 (FindUsers)
        0, 1, b'p', 18, 0, 3, // p: object, 3 keys
        0, 1, b'e', 17, 0, 1, // e: array, 1 clause
        17, 0, 5, // clause array, 5 items
        0, // no logic operator on the first clause
        8, 0, 3, b'a', b'g', b'e', // var name
        2, 1, // number condition
        8, 0, 1, b'>', // symbol
        7, // double follows
    ];
    expected.extend_from_slice(&29f64.to_be_bytes());
    expected.extend_from_slice(&[0, 1, b'r', 4, 0, 0, 0, 42]); // r: int 42
    expected.extend_from_slice(&[0, 1, b'l', 3, 0x01, 0xF4]); // l: short 500

    assert_eq!(actual, expected);
}

/// Object `{x: [[...[]...]]}` holding `arrays` nested arrays.
fn nested_arrays_payload(arrays: usize) -> Vec<u8> {
    let mut buf = vec![18u8, 0, 1, 0, 1, b'x'];
    for _ in 1..arrays {
        buf.extend_from_slice(&[17, 0, 1]);
    }
    buf.extend_from_slice(&[17, 0, 0]);
    buf
}

#[test]
fn nesting_up_to_the_limit_is_accepted() {
    // the outer object is one level
    let buf = nested_arrays_payload(MAX_DEPTH - 1);
    assert!(decode_object(&buf).is_ok());

    let buf = nested_arrays_payload(MAX_DEPTH);
    assert_eq!(decode_object(&buf), Err(ProtocolError::DepthExceeded(MAX_DEPTH)));
}

#[test]
fn deeply_nested_payload_is_rejected_without_exhausting_the_stack() {
    let buf = nested_arrays_payload(300_000);
    assert_eq!(decode_object(&buf), Err(ProtocolError::DepthExceeded(MAX_DEPTH)));
    assert_eq!(decode_message(&buf), Err(ProtocolError::DepthExceeded(MAX_DEPTH)));
}

#[test]
fn repeated_key_is_rejected() {
    // object, 2 entries: "g": "vips", "g": "mods"
    let buf = [
        18u8, 0, 2, //
        0, 1, b'g', 8, 0, 4, b'v', b'i', b'p', b's', //
        0, 1, b'g', 8, 0, 4, b'm', b'o', b'd', b's',
    ];
    assert_eq!(decode_object(&buf), Err(ProtocolError::DuplicateKey("g".to_string())));
}

#[test]
fn nested_structures_survive_a_round_trip() {
    let mut user = SfsObject::new();
    user.put_int("id", 7);
    user.put_utf_string("name", "Mario");
    user.put("tags", SfsValue::UtfStringArray(vec!["vip".into(), "beta".into()]));
    user.put("avatar", SfsValue::ByteArray(vec![0xDE, 0xAD]));
    user.put("bio", SfsValue::Text("long text".into()));

    let mut list = SfsArray::new();
    list.add_object(user);
    list.add_null();

    let mut obj = SfsObject::new();
    obj.put_array("fu", list);
    obj.put_long("ts", -1);

    let mut buf = Vec::new();
    encode_object(&obj, &mut buf).unwrap();

    assert_eq!(decode_object(&buf).unwrap(), obj);
}

#[test]
fn truncated_and_trailing_buffers_are_rejected() {
    let mut obj = SfsObject::new();
    obj.put_utf_string("g", "vips");

    let mut buf = Vec::new();
    encode_object(&obj, &mut buf).unwrap();

    assert_eq!(decode_object(&buf[..buf.len() - 1]), Err(ProtocolError::Truncated));

    buf.push(0);
    assert_eq!(decode_object(&buf), Err(ProtocolError::TrailingBytes(1)));
}

#[test]
fn unknown_type_ids_are_rejected() {
    // object, 1 entry, key "x", type 99
    let buf = [18u8, 0, 1, 0, 1, b'x', 99];
    assert_eq!(decode_object(&buf), Err(ProtocolError::UnknownType(99)));

    // array where an object is expected
    let buf = [17u8, 0, 0];
    assert_eq!(
        decode_object(&buf),
        Err(ProtocolError::UnexpectedType { expected: 18, got: 17 })
    );
}

#[test]
fn inbound_envelope_is_unpacked() {
    let mut params = SfsObject::new();
    params.put_array("fu", SfsArray::new());

    let mut envelope = SfsObject::new();
    envelope.put_byte("c", 0);
    envelope.put_short("a", 28);
    envelope.put_object("p", params.clone());

    let mut buf = Vec::new();
    encode_object(&envelope, &mut buf).unwrap();

    let msg = decode_message(&buf).unwrap();
    assert_eq!(msg.controller, 0);
    assert_eq!(msg.action, 28);
    assert_eq!(msg.params, params);
}

#[test]
fn inbound_envelope_fields_are_checked() {
    let mut envelope = SfsObject::new();
    envelope.put_byte("c", 0);
    envelope.put_object("p", SfsObject::new());

    let mut buf = Vec::new();
    encode_object(&envelope, &mut buf).unwrap();
    assert_eq!(decode_message(&buf), Err(ProtocolError::MissingField("a")));

    let mut envelope = SfsObject::new();
    envelope.put_byte("c", 0);
    envelope.put_int("a", 28);
    envelope.put_object("p", SfsObject::new());

    let mut buf = Vec::new();
    encode_object(&envelope, &mut buf).unwrap();
    assert_eq!(decode_message(&buf), Err(ProtocolError::WrongFieldType("a")));
}
