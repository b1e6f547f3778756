use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CreosonError;

/// JSON wrapper shared by every request.
///
/// `sessionId` is omitted entirely for the initial connect call and present
/// (possibly empty) on everything else. `data` is only serialized when at
/// least one parameter was supplied.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct RequestEnvelope<'a> {
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub(crate) session_id: Option<&'a str>,
    pub(crate) command: &'a str,
    pub(crate) function: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<Map<String, Value>>,
}

/// Payload of a successful response: the `data` mapping when the server
/// sent one, plus the top-level `sessionId` only `connection/connect`
/// returns.
#[derive(Debug)]
pub(crate) struct Payload {
    pub(crate) data: Option<Map<String, Value>>,
    pub(crate) session_id: Option<String>,
}

/// Unwrap the `status`/`data` envelope into a payload or an error.
///
/// Each envelope key that is absent maps to its own `MissingField` error so
/// a malformed server is distinguishable from a server-reported failure.
pub(crate) fn unwrap_response(body: Value) -> Result<Payload, CreosonError> {
    let Value::Object(mut body) = body else {
        return Err(CreosonError::Decode {
            reason: "response is not a JSON object".to_string(),
        });
    };

    let status = body.remove("status").ok_or_else(|| missing("status"))?;
    let error = match status.get("error") {
        None => return Err(missing("status.error")),
        Some(Value::Bool(error)) => *error,
        Some(other) => {
            return Err(CreosonError::Decode {
                reason: format!("`status.error` is not a boolean: {other}"),
            });
        }
    };

    if error {
        let message = status
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(CreosonError::Api { message });
    }

    let data = match body.remove("data") {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(other) => {
            return Err(CreosonError::Decode {
                reason: format!("`data` is not a JSON object: {other}"),
            });
        }
    };

    let session_id = body
        .remove("sessionId")
        .and_then(|value| value.as_str().map(str::to_string));

    Ok(Payload { data, session_id })
}

/// Pull one required field out of `data` and deserialize it.
pub(crate) fn require_field<T: DeserializeOwned>(
    data: Option<Map<String, Value>>,
    key: &str,
) -> Result<T, CreosonError> {
    let mut map = data.ok_or_else(|| missing(key))?;
    let value = map.remove(key).ok_or_else(|| missing(key))?;
    decode_value(value, key)
}

/// Pull one optional field out of `data`. Absent data, absent key and
/// explicit null all map to `None`.
pub(crate) fn optional_field<T: DeserializeOwned>(
    data: Option<Map<String, Value>>,
    key: &str,
) -> Result<Option<T>, CreosonError> {
    let Some(mut map) = data else {
        return Ok(None);
    };

    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode_value(value, key).map(Some),
    }
}

/// Deserialize the whole `data` mapping into one model type.
pub(crate) fn whole_data<T: DeserializeOwned>(
    data: Option<Map<String, Value>>,
) -> Result<T, CreosonError> {
    let map = data.ok_or_else(|| missing("data"))?;
    decode_value(Value::Object(map), "data")
}

fn decode_value<T: DeserializeOwned>(value: Value, key: &str) -> Result<T, CreosonError> {
    serde_json::from_value(value).map_err(|err| CreosonError::Decode {
        reason: format!("field `{key}`: {err}"),
    })
}

fn missing(field: &str) -> CreosonError {
    CreosonError::MissingField {
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{optional_field, require_field, unwrap_response, whole_data};
    use crate::error::CreosonError;

    #[test]
    fn unwrap_response_passes_data_through_on_success() {
        let payload = unwrap_response(json!({
            "status": {"error": false},
            "data": {"exists": true}
        }))
        .expect("successful envelope should unwrap");

        let data = payload.data.expect("data should be present");
        assert_eq!(data.get("exists"), Some(&json!(true)));
        assert!(payload.session_id.is_none());
    }

    #[test]
    fn unwrap_response_treats_missing_data_as_empty_success() {
        let payload = unwrap_response(json!({"status": {"error": false}}))
            .expect("no-data success should not be an error");
        assert!(payload.data.is_none());
    }

    #[test]
    fn unwrap_response_carries_server_message_verbatim() {
        let err = unwrap_response(json!({
            "status": {"error": true, "message": "File not found"}
        }))
        .expect_err("error=true should raise");

        match err {
            CreosonError::Api { message } => assert_eq!(message, "File not found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn unwrap_response_defaults_to_empty_message() {
        let err = unwrap_response(json!({"status": {"error": true}}))
            .expect_err("error=true should raise");

        match err {
            CreosonError::Api { message } => assert_eq!(message, ""),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn unwrap_response_flags_missing_status() {
        let err = unwrap_response(json!({"data": {}})).expect_err("status is required");
        assert!(matches!(err, CreosonError::MissingField { field } if field == "status"));
    }

    #[test]
    fn unwrap_response_flags_missing_error_flag() {
        let err = unwrap_response(json!({"status": {"message": "hmm"}}))
            .expect_err("status.error is required");
        assert!(matches!(err, CreosonError::MissingField { field } if field == "status.error"));
    }

    #[test]
    fn unwrap_response_surfaces_connect_session_id() {
        let payload = unwrap_response(json!({
            "status": {"error": false},
            "sessionId": "123456"
        }))
        .expect("connect envelope should unwrap");

        assert_eq!(payload.session_id.as_deref(), Some("123456"));
    }

    #[test]
    fn require_field_extracts_and_decodes() {
        let payload = unwrap_response(json!({
            "status": {"error": false},
            "data": {"files": ["box.prt", "bracket.prt"]}
        }))
        .expect("envelope should unwrap");

        let files: Vec<String> =
            require_field(payload.data, "files").expect("files should decode");
        assert_eq!(files, vec!["box.prt", "bracket.prt"]);
    }

    #[test]
    fn require_field_flags_absent_key() {
        let payload = unwrap_response(json!({
            "status": {"error": false},
            "data": {}
        }))
        .expect("envelope should unwrap");

        let err = require_field::<bool>(payload.data, "exists")
            .expect_err("absent key should be a protocol-shape error");
        assert!(matches!(err, CreosonError::MissingField { field } if field == "exists"));
    }

    #[test]
    fn optional_field_tolerates_absence_and_null() {
        let absent = optional_field::<String>(None, "material").expect("no data is fine");
        assert!(absent.is_none());

        let payload = unwrap_response(json!({
            "status": {"error": false},
            "data": {"material": null}
        }))
        .expect("envelope should unwrap");
        let null = optional_field::<String>(payload.data, "material").expect("null is fine");
        assert!(null.is_none());

        let payload = unwrap_response(json!({
            "status": {"error": false},
            "data": {"material": "STEEL"}
        }))
        .expect("envelope should unwrap");
        let present = optional_field::<String>(payload.data, "material").expect("should decode");
        assert_eq!(present.as_deref(), Some("STEEL"));
    }

    #[test]
    fn whole_data_decodes_the_full_mapping() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Info {
            dirname: String,
            file: String,
        }

        let payload = unwrap_response(json!({
            "status": {"error": false},
            "data": {"dirname": "C:/work", "file": "box.prt"}
        }))
        .expect("envelope should unwrap");

        let info: Info = whole_data(payload.data).expect("data should decode");
        assert_eq!(
            info,
            Info {
                dirname: "C:/work".to_string(),
                file: "box.prt".to_string()
            }
        );
    }
}
