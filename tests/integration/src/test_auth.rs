//! Auth echo integration tests.

#[cfg(test)]
mod tests {
    use echohub_model::AuthResponse;

    use crate::{client, spawn_server};

    #[tokio::test]
    async fn test_should_authorize_correct_basic_credentials() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/auth/basic/mehdi/whatever"))
            .basic_auth("mehdi", Some("whatever"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: AuthResponse = resp.json().await.expect("parse body");
        assert!(body.authorized);
        assert_eq!(body.user, "mehdi");
        assert!(body.token.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_wrong_basic_credentials() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/auth/basic/mehdi/whatever"))
            .basic_auth("wrong-username", Some("wrong-passwd"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        let body: AuthResponse = resp.json().await.expect("parse body");
        assert!(!body.authorized);
        assert!(body.user.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_absent_basic_credentials() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/auth/basic/mehdi/whatever"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key("www-authenticate"));
    }

    #[tokio::test]
    async fn test_should_not_challenge_on_hidden_basic_route() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/auth/basic-hidden/mehdi/whatever"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
        assert!(!resp.headers().contains_key("www-authenticate"));
    }

    #[tokio::test]
    async fn test_should_echo_bearer_token() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/auth/bearer"))
            .header("authorization", "Bearer super secret")
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: AuthResponse = resp.json().await.expect("parse body");
        assert!(body.authorized);
        assert_eq!(body.token, "super secret");
        assert!(body.user.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_missing_bearer_token() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/auth/bearer"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        let body: AuthResponse = resp.json().await.expect("parse body");
        assert!(!body.authorized);
    }
}
