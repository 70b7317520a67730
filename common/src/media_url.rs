//! メディアURLの正規化
//!
//! バックエンドが返す相対パス（例: "/media/a.jpg"）を
//! APIのオリジンを付けた絶対URLに変換する。

/// スキーム付き（または`//`始まり）のURLか判定
///
/// `http:`, `https:`, `blob:`, `data:` などを絶対URLとみなす。
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("//") || url::Url::parse(url).is_ok()
}

/// ベースURLからAPIパス（末尾の`/api`）を取り除いたオリジン
pub fn api_origin(base_url: &str) -> &str {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed)
}

/// 相対パスならオリジンを前置、絶対URLならそのまま
pub fn absolutize(url: &str, origin: &str) -> String {
    if url.is_empty() || is_absolute(url) {
        return url.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else {
        format!("{}/{}", origin, url)
    }
}

/// Option<String>のURLフィールドをその場で正規化
pub fn absolutize_field(field: &mut Option<String>, origin: &str) {
    if let Some(url) = field.as_mut() {
        *url = absolutize(url, origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://localhost:8000/media/a.jpg"));
        assert!(is_absolute("https://cdn.example.com/a.jpg"));
        assert!(is_absolute("blob:http://localhost/1234"));
        assert!(is_absolute("data:image/png;base64,AAAA"));
        assert!(is_absolute("//cdn.example.com/a.jpg"));

        assert!(!is_absolute("/media/a.jpg"));
        assert!(!is_absolute("media/a.jpg"));
        assert!(!is_absolute("/media/12:30.jpg"));
        assert!(!is_absolute(""));
    }

    #[test]
    fn test_api_origin() {
        assert_eq!(api_origin("http://localhost:8000/api"), "http://localhost:8000");
        assert_eq!(api_origin("http://localhost:8000/api/"), "http://localhost:8000");
        assert_eq!(api_origin("https://plates.example.com"), "https://plates.example.com");
        assert_eq!(
            api_origin("https://example.com/apiary"),
            "https://example.com/apiary"
        );
        assert_eq!(api_origin("https://example.com/v1/api"), "https://example.com/v1");
    }

    #[test]
    fn test_absolutize_relative() {
        assert_eq!(
            absolutize("/media/a.jpg", "http://localhost:8000"),
            "http://localhost:8000/media/a.jpg"
        );
        assert_eq!(
            absolutize("media/a.jpg", "http://localhost:8000/"),
            "http://localhost:8000/media/a.jpg"
        );
    }

    #[test]
    fn test_absolutize_keeps_absolute() {
        let url = "https://cdn.example.com/a_out.jpg";
        assert_eq!(absolutize(url, "http://localhost:8000"), url);
    }

    #[test]
    fn test_absolutize_field() {
        let mut field = Some("/media/a.jpg".to_string());
        absolutize_field(&mut field, "http://h");
        assert_eq!(field.as_deref(), Some("http://h/media/a.jpg"));

        let mut empty: Option<String> = None;
        absolutize_field(&mut empty, "http://h");
        assert!(empty.is_none());
    }
}
