//! Error types for mixin-foundation
//!
//! 모든 에러를 중앙에서 관리
//!
//! 합성(composition) 경로는 잘못된 입력을 에러로 올리지 않고 no-op 으로 처리하므로,
//! 여기 있는 에러는 대부분 사용자 코드(initializer, producer, handler)나
//! 명시적 메서드 호출(`Instance::call`)에서 발생합니다.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// 합성 엔진 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 메서드 호출 관련
    // ========================================================================
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Not callable: {0}")]
    NotCallable(String),

    #[error("Invalid argument for {method}: {message}")]
    InvalidArgument { method: String, message: String },

    // ========================================================================
    // 사용자 코드 관련
    // ========================================================================
    #[error("Mixin initializer failed: {0}")]
    Mixin(String),

    #[error("Event handler failed: {event} - {message}")]
    Handler { event: String, message: String },

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::MethodNotFound(_)
                | Error::NotCallable(_)
                | Error::InvalidArgument { .. }
                | Error::Config(_)
        )
    }

    /// 잘못된 인자 에러 생성 헬퍼
    pub fn invalid_argument(method: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            method: method.into(),
            message: message.into(),
        }
    }

    /// 핸들러 에러 생성 헬퍼
    pub fn handler(event: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Handler {
            event: event.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("fire", "event must be a string");
        assert_eq!(
            err.to_string(),
            "Invalid argument for fire: event must be a string"
        );

        let err = Error::handler("app:ready", "boom");
        assert_eq!(err.to_string(), "Event handler failed: app:ready - boom");
    }

    #[test]
    fn test_user_facing() {
        assert!(Error::MethodNotFound("greet".into()).is_user_facing());
        assert!(!Error::Mixin("init".into()).is_user_facing());
        assert!(!Error::handler("x", "boom").is_user_facing());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!Error::from(io).is_user_facing());
    }
}
