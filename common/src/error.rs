//! エラー型定義

use thiserror::Error;

/// API呼び出しエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 送信前の入力チェックで弾かれた（ネットワーク未使用）
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// ユーザー向けメッセージ
    ///
    /// サーバーが返したメッセージを優先し、なければ`fallback`を使う。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Server { message: Some(msg), .. } if !msg.is_empty() => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::Server {
            status: 400,
            message: Some("No plate found in image".to_string()),
        };
        assert_eq!(err.user_message("generic"), "No plate found in image");
    }

    #[test]
    fn test_user_message_fallback() {
        let errors = vec![
            ApiError::Server { status: 500, message: None },
            ApiError::Server { status: 500, message: Some(String::new()) },
            ApiError::Transport("connection refused".to_string()),
            ApiError::NotFound("/plates/9/".to_string()),
            ApiError::Decode("expected value".to_string()),
        ];

        for err in errors {
            assert_eq!(err.user_message("generic"), "generic", "{:?}", err);
        }
    }

    #[test]
    fn test_error_display_server() {
        let err = ApiError::Server { status: 502, message: None };
        assert_eq!(format!("{}", err), "Server error (502): no message");
    }

    #[test]
    fn test_error_display_storage() {
        let error = Error::Storage("quota exceeded".to_string());
        assert_eq!(format!("{}", error), "Storage error: quota exceeded");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_from_api_is_transparent() {
        let error: Error = ApiError::NotFound("/plates/1/".to_string()).into();
        assert_eq!(format!("{}", error), "Not found: /plates/1/");
    }
}
