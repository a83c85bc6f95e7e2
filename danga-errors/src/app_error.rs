use serde::{Deserialize, Serialize};
use std::str::FromStr;

const VALIDATION_PREFIX: &str = "입력값 오류";
const UNAUTHORIZED_PREFIX: &str = "로그인 필요";
const FORBIDDEN_PREFIX: &str = "권한 없음";
const NOT_FOUND_PREFIX: &str = "찾을 수 없음";
const CONFLICT_PREFIX: &str = "요청 충돌";
const NETWORK_PREFIX: &str = "네트워크 오류";
const INTERNAL_PREFIX: &str = "서버 오류";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("입력값 오류: {0}")]
    Validation(String),

    #[error("로그인 필요: {0}")]
    Unauthorized(String),

    #[error("권한 없음: {0}")]
    Forbidden(String),

    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    #[error("요청 충돌: {0}")]
    Conflict(String),

    #[error("네트워크 오류: {0}")]
    Network(String),

    #[error("서버 오류: {0}")]
    Internal(String),
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    /// Inverse of `Display`, used to recover a failure that crossed the
    /// server-function boundary as a plain string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = |prefix: &str| {
            s.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix(": "))
                .map(str::to_string)
        };

        if let Some(msg) = split(VALIDATION_PREFIX) {
            Ok(AppError::Validation(msg))
        } else if let Some(msg) = split(UNAUTHORIZED_PREFIX) {
            Ok(AppError::Unauthorized(msg))
        } else if let Some(msg) = split(FORBIDDEN_PREFIX) {
            Ok(AppError::Forbidden(msg))
        } else if let Some(msg) = split(NOT_FOUND_PREFIX) {
            Ok(AppError::NotFound(msg))
        } else if let Some(msg) = split(CONFLICT_PREFIX) {
            Ok(AppError::Conflict(msg))
        } else if let Some(msg) = split(NETWORK_PREFIX) {
            Ok(AppError::Network(msg))
        } else if let Some(msg) = split(INTERNAL_PREFIX) {
            Ok(AppError::Internal(msg))
        } else {
            Ok(AppError::Internal(s.to_string()))
        }
    }
}

impl AppError {
    /// The message carried by the variant, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Network(msg)
            | Self::Internal(msg) => msg,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// True when no server answer was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(_) => "입력한 내용을 다시 확인해주세요.",
            Self::Unauthorized(_) => "로그인이 필요합니다.",
            Self::Forbidden(_) => "이 작업을 할 권한이 없습니다.",
            Self::NotFound(_) => "대상을 찾을 수 없습니다.",
            Self::Conflict(_) => "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.",
            Self::Network(_) => "네트워크 연결을 확인해주세요.",
            Self::Internal(_) => "서버에 문제가 생겼습니다. 잠시 후 다시 시도해주세요.",
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        ok: bool,
        message: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                AppError::Forbidden(_) => StatusCode::FORBIDDEN,
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                AppError::Conflict(_) => StatusCode::CONFLICT,
                AppError::Network(_) => StatusCode::BAD_GATEWAY,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let body = ErrorResponse {
                ok: false,
                message: self.message().to_string(),
            };
            (status, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        let err = AppError::Unauthorized("좋아요는 로그인 후 사용할 수 있습니다.".to_string());
        let parsed: AppError = err.to_string().parse().unwrap();
        assert_eq!(parsed, err);
        assert!(parsed.is_unauthorized());
        assert_eq!(parsed.message(), "좋아요는 로그인 후 사용할 수 있습니다.");
    }

    #[test]
    fn test_message_containing_separator_is_kept_whole() {
        let err = AppError::Validation("a: b: c".to_string());
        let parsed: AppError = err.to_string().parse().unwrap();
        assert_eq!(parsed.message(), "a: b: c");
    }

    #[test]
    fn test_unknown_string_becomes_internal() {
        let parsed: AppError = "connection reset".parse().unwrap();
        assert_eq!(parsed, AppError::Internal("connection reset".to_string()));
        assert!(!parsed.is_transport());
    }

    #[test]
    fn test_network_is_transport() {
        assert!(AppError::Network("timeout".to_string()).is_transport());
        assert!(!AppError::Internal("boom".to_string()).is_transport());
    }
}
