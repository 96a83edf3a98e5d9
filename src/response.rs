//! Response bodies: write acknowledgements and the JSON writer.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Message carried by a forced-rollback acknowledgement.
pub const ROLLBACK_MESSAGE: &str = "forced to rollback";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AckResult {
    Executed,
    RolledBack,
}

/// Body returned by every write route.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct WriteAck {
    pub result: AckResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub rows_affected: u64,
}

impl WriteAck {
    pub fn executed(rows_affected: u64) -> Self {
        WriteAck {
            result: AckResult::Executed,
            message: None,
            rows_affected,
        }
    }

    pub fn rolled_back(rows_affected: u64) -> Self {
        WriteAck {
            result: AckResult::RolledBack,
            message: Some(ROLLBACK_MESSAGE.to_string()),
            rows_affected,
        }
    }

    pub fn is_rollback(&self) -> bool {
        self.result == AckResult::RolledBack
    }
}

/// Success body, optionally pretty-printed. Error bodies are always compact.
pub struct ApiJson<T> {
    pub status: StatusCode,
    pub data: T,
    pub pretty: bool,
}

impl<T: Serialize> ApiJson<T> {
    pub fn ok(data: T, pretty: bool) -> Self {
        ApiJson {
            status: StatusCode::OK,
            data,
            pretty,
        }
    }

    pub fn with_status(status: StatusCode, data: T, pretty: bool) -> Self {
        ApiJson { status, data, pretty }
    }
}

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        if !self.pretty {
            return (self.status, Json(self.data)).into_response();
        }
        match serde_json::to_vec_pretty(&self.data) {
            Ok(body) => (
                self.status,
                [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "response serialization failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executed_ack_omits_message() {
        let v = serde_json::to_value(WriteAck::executed(1)).unwrap();
        assert_eq!(v, serde_json::json!({"result": "executed", "rows_affected": 1}));
    }

    #[test]
    fn rollback_ack_carries_message() {
        let ack = WriteAck::rolled_back(1);
        assert!(ack.is_rollback());
        let v = serde_json::to_value(ack).unwrap();
        assert_eq!(v["result"], "rolled_back");
        assert_eq!(v["message"], ROLLBACK_MESSAGE);
    }
}
