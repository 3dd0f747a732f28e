use serde_json::Value;

/// Segment kinds of a generation report, in track order
pub fn segment_kinds(report: &Value) -> Vec<String> {
    report
        .get("segments")
        .and_then(|v| v.as_array())
        .expect("Missing segments field")
        .iter()
        .map(|s| s["kind"].as_str().expect("Missing segment kind").to_string())
        .collect()
}

/// Asserts that segments are contiguous and that their lengths add up to the
/// reported track duration
pub fn assert_segments_cover_track(report: &Value) {
    let segments = report["segments"].as_array().expect("Missing segments field");

    let mut cursor = 0;
    for (index, segment) in segments.iter().enumerate() {
        let start = segment["start_ms"].as_u64().expect("Missing start_ms");
        let duration = segment["duration_ms"].as_u64().expect("Missing duration_ms");
        // Each segment length is floored to whole milliseconds
        assert!(
            start.abs_diff(cursor) <= index as u64,
            "Segment starts at {} but previous ended at {}",
            start,
            cursor
        );
        cursor = start + duration;
    }

    let total = report["duration_ms"].as_u64().expect("Missing duration_ms");
    assert!(
        total.abs_diff(cursor) <= segments.len() as u64,
        "Segments end at {} but track lasts {} ms",
        cursor,
        total
    );
}

pub fn assert_token_response(response: &Value) {
    assert!(
        response.get("token").and_then(|v| v.as_str()).is_some(),
        "Missing token field"
    );
    assert!(
        response.get("expires_in").and_then(|v| v.as_i64()).is_some(),
        "Missing expires_in field"
    );
}

pub fn assert_file_report(report: &Value, name: &str, status: &str, count: u64) {
    assert_eq!(report["name"].as_str(), Some(name), "File name mismatch");
    assert_eq!(report["status"].as_str(), Some(status), "Status mismatch for {}", name);
    assert_eq!(report["count"].as_u64(), Some(count), "Count mismatch for {}", name);
}
