//! URL construction helpers for the femorph API.
//!
//! Pure functions so every call site builds paths the same way. Path
//! segments supplied by the server (user ids, artifact ids) are
//! percent-encoded.

use femorph_core::{ArtifactId, ArtifactKind};
use url::Url;

/// Append encoded path segments to a base URL.
fn build_url(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();

    let tail = segments
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{tail}"));

    url
}

/// `GET /health`
pub fn build_health_url(base: &Url) -> Url {
    build_url(base, &["health"])
}

/// `POST /auth`
pub fn build_auth_url(base: &Url) -> Url {
    build_url(base, &["auth"])
}

/// `POST /users/{user_id}/{fems|surfaces}`
pub fn build_upload_url(base: &Url, user_id: &str, kind: ArtifactKind) -> Url {
    build_url(base, &["users", user_id, kind.endpoint()])
}

/// `POST /users/{user_id}/fems/{fem_id}/morph`
pub fn build_morph_url(base: &Url, user_id: &str, fem: &ArtifactId) -> Url {
    build_url(base, &["users", user_id, "fems", fem.as_str(), "morph"])
}

/// `GET /users/{user_id}/fems/{fem_id}/nblock`
pub fn build_nblock_url(base: &Url, user_id: &str, fem: &ArtifactId) -> Url {
    build_url(base, &["users", user_id, "fems", fem.as_str(), "nblock"])
}

/// `POST /users/{user_id}/create`
pub fn build_create_user_url(base: &Url, user_id: &str) -> Url {
    build_url(base, &["users", user_id, "create"])
}

/// `DELETE /users/{user_id}/data`
pub fn build_user_data_url(base: &Url, user_id: &str) -> Url {
    build_url(base, &["users", user_id, "data"])
}

/// `ws://{host}/ws/subscribe/{user_id}`
pub fn build_subscribe_url(ws_base: &Url, user_id: &str) -> Url {
    build_url(ws_base, &[user_id])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.femorph.com").unwrap()
    }

    #[test]
    fn test_simple_endpoints() {
        assert_eq!(
            build_health_url(&base()).as_str(),
            "https://api.femorph.com/health"
        );
        assert_eq!(
            build_auth_url(&base()).as_str(),
            "https://api.femorph.com/auth"
        );
    }

    #[test]
    fn test_upload_urls() {
        assert_eq!(
            build_upload_url(&base(), "u1", ArtifactKind::Fem).as_str(),
            "https://api.femorph.com/users/u1/fems"
        );
        assert_eq!(
            build_upload_url(&base(), "u1", ArtifactKind::Surface).as_str(),
            "https://api.femorph.com/users/u1/surfaces"
        );
    }

    #[test]
    fn test_fem_urls() {
        let fem = ArtifactId::new("f-42");
        assert_eq!(
            build_morph_url(&base(), "u1", &fem).as_str(),
            "https://api.femorph.com/users/u1/fems/f-42/morph"
        );
        assert_eq!(
            build_nblock_url(&base(), "u1", &fem).as_str(),
            "https://api.femorph.com/users/u1/fems/f-42/nblock"
        );
    }

    #[test]
    fn test_user_urls() {
        assert_eq!(
            build_create_user_url(&base(), "u1").as_str(),
            "https://api.femorph.com/users/u1/create"
        );
        assert_eq!(
            build_user_data_url(&base(), "u1").as_str(),
            "https://api.femorph.com/users/u1/data"
        );
    }

    #[test]
    fn test_base_with_path_prefix() {
        let base = Url::parse("http://localhost:8000/api/").unwrap();
        assert_eq!(
            build_health_url(&base).as_str(),
            "http://localhost:8000/api/health"
        );
    }

    #[test]
    fn test_subscribe_url() {
        let ws = Url::parse("ws://api.femorph.com/ws/subscribe").unwrap();
        assert_eq!(
            build_subscribe_url(&ws, "user-7").as_str(),
            "ws://api.femorph.com/ws/subscribe/user-7"
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        let ws = Url::parse("ws://api.femorph.com/ws/subscribe").unwrap();
        assert_eq!(
            build_subscribe_url(&ws, "a b/c").as_str(),
            "ws://api.femorph.com/ws/subscribe/a%20b%2Fc"
        );
    }
}
