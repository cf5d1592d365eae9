//! Response contract checks.
//!
//! A response that misses an expected field is rejected whole; nothing is
//! parsed partially.

use serde_json::Value;

use crate::remote::service::{HealthReport, RemoteError, RemotePayload};

/// Parse a `GET /health` body.
pub fn parse_health(body: &[u8]) -> Result<HealthReport, RemoteError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RemoteError::Contract(format!("health body is not JSON: {e}")))?;

    match value.get("status").and_then(Value::as_str) {
        Some(status) => Ok(HealthReport {
            status: status.to_string(),
        }),
        None => Err(RemoteError::Contract(
            "health body has no string 'status' field".to_string(),
        )),
    }
}

/// Parse a `POST /analyze` body.
pub fn parse_analysis_body(body: &[u8]) -> Result<RemotePayload, RemoteError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RemoteError::Contract(format!("analysis body is not JSON: {e}")))?;
    check_analysis(value)
}

/// Parse a `POST /batch-analyze` body into its ordered results.
pub fn parse_batch_body(body: &[u8]) -> Result<Vec<RemotePayload>, RemoteError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RemoteError::Contract(format!("batch body is not JSON: {e}")))?;

    let Value::Object(mut map) = value else {
        return Err(RemoteError::Contract("batch body is not a JSON object".to_string()));
    };
    let Some(Value::Array(results)) = map.remove("results") else {
        return Err(RemoteError::Contract("batch body has no 'results' array".to_string()));
    };

    results
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            check_analysis(item).map_err(|e| match e {
                RemoteError::Contract(msg) => RemoteError::Contract(format!("results[{i}]: {msg}")),
                other => other,
            })
        })
        .collect()
}

/// Field the client adds to every result to mark its provenance.
pub const MODE_FIELD: &str = "mode";

/// Reject a payload that already carries the provenance field.
pub fn check_untagged(payload: &RemotePayload) -> Result<(), RemoteError> {
    if payload.contains_key(MODE_FIELD) {
        return Err(RemoteError::Contract(format!(
            "analysis carries the reserved '{MODE_FIELD}' field"
        )));
    }
    Ok(())
}

/// Validate one analysis object.
pub fn check_analysis(value: Value) -> Result<RemotePayload, RemoteError> {
    let Value::Object(map) = value else {
        return Err(RemoteError::Contract("analysis is not a JSON object".to_string()));
    };

    if map.get("success") == Some(&Value::Bool(false)) {
        let reason = map
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("no error message");
        return Err(RemoteError::Contract(format!("service reported failure: {reason}")));
    }

    if !map.get("diseaseDetection").is_some_and(Value::is_object) {
        return Err(RemoteError::Contract(
            "analysis has no 'diseaseDetection' object".to_string(),
        ));
    }

    check_untagged(&map)?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn contract_message(result: Result<impl std::fmt::Debug, RemoteError>) -> String {
        match result {
            Err(RemoteError::Contract(msg)) => msg,
            other => panic!("expected contract error, got {other:?}"),
        }
    }

    #[test]
    fn test_health_status_extracted() {
        let report = parse_health(br#"{"status":"healthy","version":"1.0.0"}"#).unwrap();
        assert_eq!(report.status, "healthy");
    }

    #[test]
    fn test_health_requires_status() {
        contract_message(parse_health(br#"{"service":"AI"}"#));
        contract_message(parse_health(b"<html>"));
    }

    #[test]
    fn test_analysis_passes_payload_through() {
        let body = json!({
            "success": true,
            "diseaseDetection": { "detected": false, "diseases": [], "overallHealthScore": 91 },
            "analysisMethod": "basic_color_analysis"
        });
        let payload = parse_analysis_body(body.to_string().as_bytes()).unwrap();
        assert_eq!(Value::Object(payload), body);
    }

    #[test]
    fn test_analysis_rejects_reported_failure() {
        let body = json!({
            "success": false,
            "error": "cannot load image",
            "diseaseDetection": { "detected": false }
        });
        let msg = contract_message(check_analysis(body));
        assert!(msg.contains("cannot load image"));
    }

    #[test]
    fn test_analysis_requires_disease_detection() {
        contract_message(check_analysis(json!({ "success": true })));
        contract_message(check_analysis(json!({ "diseaseDetection": 3 })));
        contract_message(check_analysis(json!([1, 2])));
    }

    #[test]
    fn test_analysis_rejects_reserved_mode_field() {
        let body = json!({ "mode": "fallback", "diseaseDetection": {} });
        let msg = contract_message(check_analysis(body));
        assert!(msg.contains("'mode'"));

        let body = json!({ "results": [{ "diseaseDetection": {}, "mode": "remote" }] });
        let msg = contract_message(parse_batch_body(body.to_string().as_bytes()));
        assert!(msg.starts_with("results[0]"));
    }

    #[test]
    fn test_batch_results_in_order() {
        let body = json!({
            "success": true,
            "total": 2,
            "results": [
                { "filename": "a.jpg", "diseaseDetection": {} },
                { "filename": "b.jpg", "diseaseDetection": {} }
            ]
        });
        let results = parse_batch_body(body.to_string().as_bytes()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["filename"], "a.jpg");
        assert_eq!(results[1]["filename"], "b.jpg");
    }

    #[test]
    fn test_batch_rejects_bad_entry() {
        let body = json!({ "results": [{ "diseaseDetection": {} }, { "filename": "b.jpg" }] });
        let msg = contract_message(parse_batch_body(body.to_string().as_bytes()));
        assert!(msg.starts_with("results[1]"));
    }

    #[test]
    fn test_batch_requires_results_array() {
        contract_message(parse_batch_body(br#"{"success":true}"#));
        contract_message(parse_batch_body(br#"{"results":{}}"#));
    }
}
