//! Status, response-header, and cache endpoint integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, spawn_server};

    #[tokio::test]
    async fn test_should_return_requested_status_code() {
        let base = spawn_server().await;

        for code in [200u16, 204, 302, 404, 503] {
            let resp = client()
                .get(format!("{base}/status/{code}"))
                .send()
                .await
                .expect("request");
            assert_eq!(resp.status().as_u16(), code);
        }
    }

    #[tokio::test]
    async fn test_should_reject_invalid_status_code() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/status/teapot"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_should_echo_requested_response_headers() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/response-headers?x-powered-by=echohub"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("x-powered-by")
                .and_then(|v| v.to_str().ok()),
            Some("echohub"),
        );

        let body: serde_json::Value = resp.json().await.expect("parse body");
        assert_eq!(body["x-powered-by"], "echohub");
    }

    #[tokio::test]
    async fn test_should_serve_cache_miss_with_validators() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/cache"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert!(resp.headers().contains_key("last-modified"));
        assert!(resp.headers().contains_key("etag"));
    }

    #[tokio::test]
    async fn test_should_return_304_for_conditional_request() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/cache"))
            .header("if-none-match", "\"abc\"")
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_MODIFIED);
    }
}
