//! Cookie endpoint integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, spawn_server};

    #[tokio::test]
    async fn test_should_echo_request_cookies() {
        let base = spawn_server().await;

        let body: serde_json::Value = client()
            .get(format!("{base}/cookies"))
            .header("cookie", "session=abc123; theme=dark")
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        assert_eq!(body["cookies"]["session"], "abc123");
        assert_eq!(body["cookies"]["theme"], "dark");
    }

    #[tokio::test]
    async fn test_should_set_cookies_from_query_and_redirect() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/cookies/set?whoami=mehdi"))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::FOUND);
        assert_eq!(
            resp.headers()
                .get("location")
                .and_then(|v| v.to_str().ok()),
            Some("/cookies"),
        );

        let set_cookie = resp
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .expect("set-cookie header");
        assert!(set_cookie.starts_with("whoami=mehdi"));
        assert!(set_cookie.contains("Path=/"));
    }

    #[tokio::test]
    async fn test_should_set_cookie_from_path_and_redirect() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/cookies/set/flavor/chocolate"))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::FOUND);
        let set_cookie = resp
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .expect("set-cookie header");
        assert!(set_cookie.starts_with("flavor=chocolate"));
    }

    #[tokio::test]
    async fn test_should_expire_cookies_on_delete() {
        let base = spawn_server().await;

        let resp = client()
            .get(format!("{base}/cookies/delete?names=session,theme"))
            .send()
            .await
            .expect("request");

        assert_eq!(resp.status(), reqwest::StatusCode::FOUND);
        let cookies: Vec<&str> = resp
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("session="));
        assert!(cookies.iter().all(|c| c.contains("Expires=")));
    }

    #[tokio::test]
    async fn test_should_round_trip_cookies_through_redirect() {
        let base = spawn_server().await;

        // Follow the redirect by hand, presenting the cookie the server
        // just handed out.
        let resp = client()
            .get(format!("{base}/cookies/set?whoami=mehdi"))
            .send()
            .await
            .expect("request");
        let set_cookie = resp
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .expect("set-cookie header");
        let pair = set_cookie.split(';').next().expect("cookie pair");

        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("location header");

        let body: serde_json::Value = client()
            .get(format!("{base}{location}"))
            .header("cookie", pair)
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("parse body");

        assert_eq!(body["cookies"]["whoami"], "mehdi");
    }
}
