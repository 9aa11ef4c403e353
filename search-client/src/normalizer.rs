//! Response normalization across server generations.

use serde_json::Value;

use crate::config::EsVersion;
use crate::errors::ClientError;
use crate::types::RawResponse;

/// Extract the response payload from a generation-specific response.
///
/// A 7.x response already is the payload. An 8.x response carries the
/// payload under `body`. A response whose shape does not match `version`
/// is an error rather than being coerced.
pub fn normalize(raw: RawResponse, version: EsVersion) -> Result<Value, ClientError> {
    match (version, raw) {
        (EsVersion::V7, RawResponse::Body(body)) => Ok(body),
        (EsVersion::V8, RawResponse::Api(response)) => Ok(response.body),
        (version, raw) => Err(ClientError::normalization(format!(
            "Unexpected {} response for a version {} client",
            raw.shape(),
            version
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiResponse, ResponseMeta};
    use serde_json::json;

    #[test]
    fn test_version_7_returns_raw_unchanged() {
        let payload = json!({"hits": {"total": {"value": 2}}});

        let result = normalize(RawResponse::Body(payload.clone()), EsVersion::V7).unwrap();

        assert_eq!(result, payload);
    }

    #[test]
    fn test_version_8_extracts_body() {
        let payload = json!({"cluster_name": "docker-cluster"});
        let raw = RawResponse::Api(ApiResponse {
            meta: ResponseMeta {
                status: 200,
                ..Default::default()
            },
            body: payload.clone(),
        });

        assert_eq!(normalize(raw, EsVersion::V8).unwrap(), payload);
    }

    #[test]
    fn test_shape_mismatch_fails() {
        let result = normalize(RawResponse::Body(json!({})), EsVersion::V8);
        assert!(matches!(result, Err(ClientError::NormalizationError(_))));

        let raw = RawResponse::Api(ApiResponse {
            meta: ResponseMeta::default(),
            body: json!(null),
        });
        let result = normalize(raw, EsVersion::V7);
        assert!(matches!(result, Err(ClientError::NormalizationError(_))));
    }
}
