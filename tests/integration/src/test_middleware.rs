//! Middleware chain integration tests: fault recovery, CORS, content
//! negotiation.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use echohub_http::{EchoHttpService, Handler};

    use crate::{client, spawn_server, spawn_service};

    #[tokio::test]
    async fn test_should_recover_panicking_handler_and_keep_serving() {
        let faulty: Handler = Arc::new(|_req| Box::pin(async { panic!("injected fault") }));
        let base = spawn_service(EchoHttpService::from_handler(faulty)).await;

        let resp = client()
            .get(format!("{base}/anything"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = resp.json().await.expect("parse body");
        assert_eq!(body["message"], "internal server error");

        // The server must survive the fault and answer the next request.
        let resp = client()
            .get(format!("{base}/anything"))
            .send()
            .await
            .expect("request after fault");
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_should_carry_cors_headers_on_every_response() {
        let base = spawn_server().await;

        // Success, client error, and recovered responses all carry CORS.
        for path in ["/get", "/unknown-route", "/status/503"] {
            let resp = client()
                .get(format!("{base}{path}"))
                .send()
                .await
                .expect("request");
            assert_eq!(
                resp.headers()
                    .get("access-control-allow-origin")
                    .and_then(|v| v.to_str().ok()),
                Some("*"),
                "missing CORS header on {path}",
            );
            assert!(
                resp.headers()
                    .contains_key("access-control-allow-methods"),
                "missing CORS methods header on {path}",
            );
        }
    }

    #[tokio::test]
    async fn test_should_carry_json_content_type_on_every_response() {
        let base = spawn_server().await;

        for path in ["/get", "/unknown-route"] {
            let resp = client()
                .get(format!("{base}{path}"))
                .send()
                .await
                .expect("request");
            assert_eq!(
                resp.headers()
                    .get("content-type")
                    .and_then(|v| v.to_str().ok()),
                Some("application/json"),
                "wrong content type on {path}",
            );
        }
    }

    #[tokio::test]
    async fn test_should_answer_options_preflight() {
        let base = spawn_server().await;

        let resp = client()
            .request(reqwest::Method::OPTIONS, format!("{base}/post"))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*"),
        );
        assert!(resp.headers().contains_key("access-control-max-age"));
    }
}
