// crates/sfs-core/tests/find_users_scenarios.rs
use std::sync::Mutex;

use sfs_core::find_users::{KEY_EXPRESSION, KEY_GROUP, KEY_LIMIT, KEY_ROOM};
use sfs_core::{
    BoolMatch, Clause, FindUsersRequest, Logger, MatchExpression, NumberMatch, Request,
    RequestType, SearchScope, SfsValue, StringMatch,
};
use sfs_protocol::encode_request;

/// Keeps every warning so tests can count them.
#[derive(Default)]
struct RecordingLogger {
    warnings: Mutex<Vec<String>>,
}

impl RecordingLogger {
    fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

fn expr() -> MatchExpression {
    MatchExpression::new(Clause::number("age", NumberMatch::GreaterThan, 29))
        .and(Clause::string("country", StringMatch::Equals, "Italy"))
}

#[test]
fn present_expression_validates() {
    let req = FindUsersRequest::new(Some(expr()), SearchScope::Zone, 0);
    assert!(req.validate().is_ok());
}

#[test]
fn missing_expression_fails_with_single_failure() {
    let req = FindUsersRequest::new(None, SearchScope::Room(3), 10);

    let err = req.validate().unwrap_err();
    assert_eq!(err.message(), "FindUsers request error");
    assert_eq!(err.failures(), ["Missing Match Expression".to_string()]);
    assert_eq!(err.code(), 0);
    assert_eq!(err.to_string(), "FindUsers request error: Missing Match Expression");

    // build refuses before producing anything
    assert_eq!(req.build().unwrap_err(), err);
}

#[test]
fn expression_is_always_emitted() {
    let req = FindUsersRequest::new(Some(expr()), SearchScope::Zone, 0);
    let msg = req.build().unwrap();

    assert_eq!(msg.request_type, RequestType::FindUsers);
    let e = msg.params.get_array(KEY_EXPRESSION).expect("expression array");
    assert_eq!(e, &expr().to_sfs_array());
}

#[test]
fn room_scope_emits_room_id_only() {
    let params = FindUsersRequest::new(Some(expr()), SearchScope::Room(42), 0).execute();

    assert_eq!(params.get_int(KEY_ROOM), Some(42));
    assert!(!params.contains_key(KEY_GROUP));
}

#[test]
fn group_scope_emits_group_name_only() {
    let params = FindUsersRequest::new(Some(expr()), SearchScope::group("vips"), 0).execute();

    assert_eq!(params.get_utf_string(KEY_GROUP), Some("vips"));
    assert!(!params.contains_key(KEY_ROOM));
}

#[test]
fn zone_scope_emits_neither_target() {
    let params = FindUsersRequest::in_zone(expr()).execute();

    assert!(!params.contains_key(KEY_ROOM));
    assert!(!params.contains_key(KEY_GROUP));
    assert_eq!(params.keys().collect::<Vec<_>>(), vec![KEY_EXPRESSION]);
}

#[test]
fn unsupported_dynamic_target_warns_once_and_is_dropped() {
    let logger = RecordingLogger::default();
    let req = FindUsersRequest::from_dynamic(Some(expr()), &SfsValue::Bool(true), 0, &logger);

    let params = req.build().unwrap().params;
    assert!(!params.contains_key(KEY_ROOM));
    assert!(!params.contains_key(KEY_GROUP));

    let warnings = logger.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("bool"), "warning names the value: {}", warnings[0]);
}

#[test]
fn dynamic_targets_resolve_to_typed_scopes() {
    let logger = RecordingLogger::default();

    assert_eq!(SearchScope::from_dynamic(&SfsValue::Null, &logger), SearchScope::Zone);
    assert_eq!(SearchScope::from_dynamic(&SfsValue::Int(42), &logger), SearchScope::Room(42));
    assert_eq!(SearchScope::from_dynamic(&SfsValue::Short(7), &logger), SearchScope::Room(7));
    assert_eq!(
        SearchScope::from_dynamic(&SfsValue::from("vips"), &logger),
        SearchScope::group("vips")
    );
    assert!(logger.warnings().is_empty());

    // a long that does not fit a room id is not a room id
    let scope = SearchScope::from_dynamic(&SfsValue::Long(i64::MAX), &logger);
    assert_eq!(scope, SearchScope::Zone);
    assert_eq!(logger.warnings().len(), 1);
}

#[test]
fn byte_and_fitting_long_targets_are_room_ids() {
    let logger = RecordingLogger::default();

    assert_eq!(SearchScope::from_dynamic(&SfsValue::Byte(5), &logger), SearchScope::Room(5));
    assert_eq!(
        SearchScope::from_dynamic(&SfsValue::Long(1234), &logger),
        SearchScope::Room(1234)
    );

    let req = FindUsersRequest::from_dynamic(Some(expr()), &SfsValue::Long(1234), 0, &logger);
    let params = req.build().unwrap().params;
    assert_eq!(params.get_int(KEY_ROOM), Some(1234));
    assert!(!params.contains_key(KEY_GROUP));

    assert!(logger.warnings().is_empty());
}

#[test]
fn text_and_floating_targets_warn_once_each_and_send_no_target() {
    let targets = [
        SfsValue::Text("vips".into()),
        SfsValue::Float(1.5),
        SfsValue::Double(2.0),
    ];

    for target in &targets {
        let logger = RecordingLogger::default();
        let req = FindUsersRequest::from_dynamic(Some(expr()), target, 0, &logger);
        assert_eq!(req.scope(), &SearchScope::Zone);

        let params = req.build().unwrap().params;
        assert!(!params.contains_key(KEY_ROOM), "{} must not become a room", target.type_name());
        assert!(!params.contains_key(KEY_GROUP), "{} must not become a group", target.type_name());

        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1, "one warning for {}", target.type_name());
        assert!(warnings[0].contains(target.type_name()), "warning names the type: {}", warnings[0]);
    }
}

#[test]
fn zero_limit_is_omitted() {
    let params = FindUsersRequest::new(Some(expr()), SearchScope::Zone, 0).execute();
    assert!(!params.contains_key(KEY_LIMIT));
}

#[test]
fn positive_limit_is_sent_as_short() {
    let params = FindUsersRequest::new(Some(expr()), SearchScope::Zone, 500).execute();
    assert_eq!(params.get(KEY_LIMIT), Some(&SfsValue::Short(500)));

    let params = FindUsersRequest::new(Some(expr()), SearchScope::Zone, 32767).execute();
    assert_eq!(params.get_short(KEY_LIMIT), Some(i16::MAX));
}

#[test]
fn limit_beyond_short_range_fails_validation() {
    let req = FindUsersRequest::new(Some(expr()), SearchScope::Zone, 40_000);

    let err = req.build().unwrap_err();
    assert_eq!(err.failures(), ["Limit must not exceed 32767".to_string()]);

    // never wrapped into a negative short
    assert!(!req.execute().contains_key(KEY_LIMIT));
}

#[test]
fn every_failure_is_reported_in_order() {
    let req = FindUsersRequest::new(None, SearchScope::Zone, 70_000);

    let err = req.validate().unwrap_err();
    assert_eq!(
        err.failures(),
        ["Missing Match Expression".to_string(), "Limit must not exceed 32767".to_string()]
    );
}

#[test]
fn expression_array_layout() {
    let expr = MatchExpression::new(Clause::boolean("online", BoolMatch::Equals, true))
        .or(Clause::string("nick", StringMatch::StartsWith, "Ma"));
    let arr = expr.to_sfs_array();

    assert_eq!(arr.len(), 2);

    let first = arr.get(0).and_then(SfsValue::as_array).unwrap();
    let first: Vec<&SfsValue> = first.iter().collect();
    assert_eq!(
        first,
        vec![
            &SfsValue::Null,
            &SfsValue::from("online"),
            &SfsValue::Byte(0),
            &SfsValue::from("=="),
            &SfsValue::Bool(true),
        ]
    );

    let second = arr.get(1).and_then(SfsValue::as_array).unwrap();
    let second: Vec<&SfsValue> = second.iter().collect();
    assert_eq!(
        second,
        vec![
            &SfsValue::from("OR"),
            &SfsValue::from("nick"),
            &SfsValue::Byte(2),
            &SfsValue::from("startsWith"),
            &SfsValue::from("Ma"),
        ]
    );
}

#[test]
fn encoding_the_same_request_twice_is_byte_identical() {
    let req = FindUsersRequest::new(Some(expr()), SearchScope::group("vips"), 25);

    let mut first = Vec::new();
    encode_request(&req.build().unwrap(), &mut first).unwrap();

    let mut second = Vec::new();
    encode_request(&req.build().unwrap(), &mut second).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}
