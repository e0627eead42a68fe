//! Method echo and request inspection integration tests.

#[cfg(test)]
mod tests {
    use echohub_model::EchoResponse;

    use crate::{client, spawn_server};

    #[tokio::test]
    async fn test_should_echo_single_query_arg_as_scalar() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/get?x=1"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: EchoResponse = resp.json().await.expect("parse body");
        assert_eq!(body.args["x"], "1");
        assert!(body.method.is_empty());
        assert!(body.json.is_null());
        assert!(body.form.is_empty());
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_should_echo_repeated_query_args_as_ordered_array() {
        let base = spawn_server().await;

        let body: EchoResponse = client()
            .get(format!("{base}/get?k=a&k=b&k=c"))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        assert_eq!(body.args["k"], serde_json::json!(["a", "b", "c"]));
    }

    #[tokio::test]
    async fn test_should_echo_json_body_verbatim() {
        let base = spawn_server().await;
        let payload = serde_json::json!({"name": "echo", "tags": ["a", "b"]});

        let body: EchoResponse = client()
            .post(format!("{base}/post"))
            .json(&payload)
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        assert_eq!(body.json, payload);
        assert!(body.form.is_empty());
        assert!(body.data.is_empty());
        assert_eq!(body.method, "POST");
    }

    #[tokio::test]
    async fn test_should_echo_form_body_flattened() {
        let base = spawn_server().await;

        let body: EchoResponse = client()
            .put(format!("{base}/put"))
            .header("content-type", "application/x-www-form-urlencoded")
            .body("a=1&a=2&b=3")
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        assert_eq!(body.form["a"], serde_json::json!(["1", "2"]));
        assert_eq!(body.form["b"], "3");
        assert!(body.json.is_null());
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_should_echo_unknown_content_type_as_raw_data() {
        let base = spawn_server().await;

        let body: EchoResponse = client()
            .patch(format!("{base}/patch"))
            .header("content-type", "text/plain")
            .body("plain payload")
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        assert_eq!(body.data, "plain payload");
        assert!(body.json.is_null());
        assert!(body.form.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_malformed_json_with_400() {
        let base = spawn_server().await;

        let resp = client()
            .post(format!("{base}/post"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = resp.json().await.expect("parse body");
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|m| m.contains("malformed JSON body"))
        );
    }

    #[tokio::test]
    async fn test_should_omit_body_fields_for_empty_body() {
        let base = spawn_server().await;

        let body: serde_json::Value = client()
            .delete(format!("{base}/delete"))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        let obj = body.as_object().expect("object body");
        assert!(!obj.contains_key("json"));
        assert!(!obj.contains_key("form"));
        assert!(!obj.contains_key("data"));
        assert_eq!(body["method"], "DELETE");
    }

    #[tokio::test]
    async fn test_should_echo_method_on_any_route() {
        let base = spawn_server().await;

        for method in [
            reqwest::Method::GET,
            reqwest::Method::POST,
            reqwest::Method::DELETE,
        ] {
            let body: EchoResponse = client()
                .request(method.clone(), format!("{base}/any"))
                .send()
                .await
                .expect("request")
                .json()
                .await
                .expect("parse body");
            assert_eq!(body.method, method.as_str());
        }
    }

    #[tokio::test]
    async fn test_should_produce_identical_documents_for_identical_requests() {
        let base = spawn_server().await;
        let url = format!("{base}/get?x=1&y=2");

        let first = client()
            .get(&url)
            .send()
            .await
            .expect("request")
            .bytes()
            .await
            .expect("read body");
        let second = client()
            .get(&url)
            .send()
            .await
            .expect("request")
            .bytes()
            .await
            .expect("read body");

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_should_serve_partial_echoes() {
        let base = spawn_server().await;

        let headers: serde_json::Value = client()
            .get(format!("{base}/headers"))
            .header("x-probe", "42")
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");
        assert_eq!(headers["headers"]["x-probe"], "42");
        assert!(headers.get("url").is_none());

        let ua: serde_json::Value = client()
            .get(format!("{base}/user-agent"))
            .header("user-agent", "echohub-test/1.0")
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");
        assert_eq!(ua["user-agent"], "echohub-test/1.0");

        let ip: serde_json::Value = client()
            .get(format!("{base}/ip"))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");
        assert_eq!(ip["origin"], "127.0.0.1");
    }

    #[tokio::test]
    async fn test_should_respect_forwarded_for_in_origin() {
        let base = spawn_server().await;

        let ip: serde_json::Value = client()
            .get(format!("{base}/ip"))
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");
        assert_eq!(ip["origin"], "203.0.113.7");
    }

    #[tokio::test]
    async fn test_should_serve_full_request_echo() {
        let base = spawn_server().await;

        let body: EchoResponse = client()
            .get(format!("{base}/request?probe=1"))
            .header("user-agent", "echohub-test/1.0")
            .header("cookie", "session=abc")
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        assert_eq!(body.method, "GET");
        assert_eq!(body.args["probe"], "1");
        assert_eq!(body.user_agent, "echohub-test/1.0");
        assert_eq!(body.cookies["session"], "abc");
        assert!(body.url.contains("/request?probe=1"));
    }

    #[tokio::test]
    async fn test_should_return_404_for_unknown_route() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/unknown"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_return_405_for_wrong_method() {
        let base = spawn_server().await;

        let resp = client()
            .post(format!("{base}/get"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    }
}
