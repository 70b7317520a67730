//! クライアント側ルーティング
//!
//! `/` → Home, `/history` → History, `/about` → About, `/details/:id` → Detail

use crate::types::DetectionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    History,
    About,
    Detail(DetectionId),
    NotFound,
}

impl Route {
    /// URLパスからルートを決定（クエリ・フラグメント・末尾スラッシュは無視）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["history"] => Route::History,
            ["about"] => Route::About,
            ["details", id] => match urlencoding::decode(id) {
                Ok(id) => Route::Detail(DetectionId::new(id.into_owned())),
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::History => "/history".to_string(),
            Route::About => "/about".to_string(),
            Route::Detail(id) => format!("/details/{}", urlencoding::encode(id.as_str())),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// ナビゲーションバーに出すルート
    pub fn nav_items() -> [(Route, &'static str); 3] {
        [
            (Route::Home, "Home"),
            (Route::History, "History"),
            (Route::About, "About"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/history"), Route::History);
        assert_eq!(Route::from_path("/history/"), Route::History);
        assert_eq!(Route::from_path("/about?ref=nav"), Route::About);
        assert_eq!(Route::from_path("/details/42"), Route::Detail("42".into()));
        assert_eq!(Route::from_path("/details/42#top"), Route::Detail("42".into()));
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Route::from_path("/details"), Route::NotFound);
        assert_eq!(Route::from_path("/details/1/extra"), Route::NotFound);
        assert_eq!(Route::from_path("/settings"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::Home,
            Route::History,
            Route::About,
            Route::Detail("abc-1".into()),
            Route::Detail("plate 7".into()),
            Route::Detail("a/b".into()),
        ] {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }

    #[test]
    fn test_detail_id_is_decoded_once() {
        let route = Route::from_path("/details/plate%207");
        assert_eq!(route, Route::Detail("plate 7".into()));
        assert_eq!(Route::Detail("a/b".into()).path(), "/details/a%2Fb");

        let Route::Detail(id) = route else {
            panic!("expected detail route");
        };
        assert_eq!(Endpoint::Detection(id).path(), "/plates/plate%207/");
    }

    #[test]
    fn test_invalid_utf8_id_is_not_found() {
        assert_eq!(Route::from_path("/details/%FF"), Route::NotFound);
    }
}
