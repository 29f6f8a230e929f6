use super::*;

#[test]
fn test_success_envelope() {
    let response = ApiResponse::success(vec![1u64, 2, 3]);
    assert!(response.is_success());
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["code"], 200);
    assert_eq!(json["message"], "success");
    assert_eq!(json["data"][2], 3);
}

#[test]
fn test_failure_envelope_has_null_data() {
    let response: ApiResponse<u64> = ApiResponse::failure(CODE_INTERNAL, "boom");
    assert!(!response.is_success());
    let json = serde_json::to_value(&response).unwrap();
    assert!(json["data"].is_null());
    assert_eq!(json["message"], "boom");
}

#[test]
fn test_invalid_range_maps_to_bad_request() {
    let err = AnalyticsError::invalid_range("start after end");
    let response: ApiResponse<()> = ApiResponse::from(&err);
    assert_eq!(response.code, CODE_BAD_REQUEST);
    assert!(response.message.contains("start after end"));
}

#[test]
fn test_other_errors_map_to_internal() {
    for err in [
        AnalyticsError::configuration("bad table"),
        AnalyticsError::insufficient_data("empty"),
        AnalyticsError::invariant("leak"),
    ] {
        let response: ApiResponse<()> = ApiResponse::from(&err);
        assert_eq!(response.code, CODE_INTERNAL);
        assert_eq!(response.message, err.to_string());
    }
}

#[test]
fn test_envelope_round_trips_payload() {
    let payload = UserInsightData {
        user_segmentation: vec![NamedValue {
            name: "High Value".into(),
            value: 15_757,
        }],
    };
    let json = serde_json::to_string(&ApiResponse::success(payload.clone())).unwrap();
    let back: ApiResponse<UserInsightData> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.data, Some(payload));
}
