#[cfg(test)]
mod tests {
    use relay_ox_common::{ApiClient, CommonRequestError, Credential, Endpoint};
    use serde::Deserialize;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Pong {
        pong: bool,
    }

    #[test]
    fn test_url_joins_without_double_slashes() {
        let client = ApiClient::new(reqwest::Client::new(), "https://api.example.com//");
        assert_eq!(
            client.url(&Endpoint::post("/v1/ping")),
            "https://api.example.com/v1/ping"
        );
    }

    #[test]
    fn test_endpoint_collects_query_in_order() {
        let endpoint = Endpoint::post("chat/completions")
            .query("api-version", "2024-06-01")
            .query("trace", "1");

        assert_eq!(endpoint.method, reqwest::Method::POST);
        assert_eq!(
            endpoint.query,
            vec![
                ("api-version".to_string(), "2024-06-01".to_string()),
                ("trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let client = ApiClient::new(reqwest::Client::new(), "https://api.telegram.org/bot42:SECRET")
            .with_credential(Credential::header("api-key", "hunter2"));

        let debug = format!("{client:?}");
        assert!(!debug.contains("SECRET"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("api-key"));
    }

    #[tokio::test]
    async fn test_send_json_applies_credential_query_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/ping"))
            .and(header("api-key", "secret"))
            .and(header("user-agent", "relay-test/1.0"))
            .and(query_param("api-version", "2024-06-01"))
            .and(body_json(serde_json::json!({ "ping": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "pong": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(reqwest::Client::new(), server.uri())
            .with_credential(Credential::header("api-key", "secret"))
            .with_user_agent("relay-test/1.0");
        let endpoint = Endpoint::post("v1/ping").query("api-version", "2024-06-01");

        let pong: Pong = client
            .send_json(&endpoint, &serde_json::json!({ "ping": true }))
            .await
            .unwrap();
        assert!(pong.pong);
    }

    #[tokio::test]
    async fn test_error_status_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/ping"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "code": "401", "message": "Access denied due to invalid subscription key." }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(reqwest::Client::new(), server.uri());
        let result: Result<Pong, _> = client.send_json(&Endpoint::post("v1/ping"), &serde_json::json!({})).await;

        match result {
            Err(CommonRequestError::Api { status, message, .. }) => {
                assert_eq!(status, 401);
                assert!(message.contains("invalid subscription key"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(reqwest::Client::new(), server.uri());
        let result: Result<Pong, _> = client.send_json(&Endpoint::post("v1/ping"), &serde_json::json!({})).await;

        assert!(matches!(result, Err(CommonRequestError::UnexpectedResponse(ref s)) if s.contains("not json")));
    }
}
