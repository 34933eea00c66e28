//! Bot API calls against a mocked Telegram server

#[cfg(test)]
mod tests {
    use telegram_ox::{
        DeleteWebhookRequest, GetUpdatesRequest, MAX_MESSAGE_LENGTH, Telegram,
        TelegramRequestError, UpdateKind,
    };
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123456:TEST-TOKEN";

    fn bot_for(server: &MockServer) -> Telegram {
        Telegram::new(TOKEN).with_base_url(server.uri())
    }

    fn sent_message(chat_id: i64, text: &str) -> serde_json::Value {
        serde_json::json!({
            "ok": true,
            "result": {
                "message_id": 99,
                "from": { "id": 123456, "is_bot": true, "first_name": "AzureBot", "username": "azure_bot" },
                "chat": { "id": chat_id, "type": "private" },
                "date": 1_700_000_100,
                "text": text
            }
        })
    }

    #[tokio::test]
    async fn test_get_me() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getMe")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": { "id": 123456, "is_bot": true, "first_name": "AzureBot", "username": "azure_bot" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let me = bot_for(&server).get_me().await.unwrap();

        assert!(me.is_bot);
        assert_eq!(me.username.as_deref(), Some("azure_bot"));
    }

    #[tokio::test]
    async fn test_delete_webhook() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/deleteWebhook")))
            .and(body_json(serde_json::json!({ "drop_pending_updates": false })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "ok": true, "result": true, "description": "Webhook is already deleted" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = DeleteWebhookRequest {
            drop_pending_updates: Some(false),
        };
        assert!(bot_for(&server).delete_webhook(&request).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_updates_sends_offset_and_filters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(body_json(serde_json::json!({
                "allowed_updates": ["message"],
                "offset": 7,
                "timeout": 0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": [{
                    "update_id": 7,
                    "message": {
                        "message_id": 1,
                        "from": { "id": 42, "is_bot": false, "first_name": "Ana" },
                        "chat": { "id": 42, "type": "private" },
                        "date": 1_700_000_000,
                        "text": "hola"
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = GetUpdatesRequest::builder()
            .offset(7)
            .timeout(0)
            .allow("message")
            .build();
        let updates = bot_for(&server).get_updates(&request).await.unwrap();

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].kind(), UpdateKind::Message);
        assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("hola"));
    }

    #[tokio::test]
    async fn test_api_error_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let err = bot_for(&server).get_me().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Telegram API error 401: Unauthorized");
    }

    #[tokio::test]
    async fn test_flood_wait_carries_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 429,
                "description": "Too Many Requests: retry after 5",
                "parameters": { "retry_after": 5 }
            })))
            .mount(&server)
            .await;

        let err = bot_for(&server).send_text(42, "hola").await.unwrap_err();

        assert!(matches!(
            err,
            TelegramRequestError::Api { code: 429, retry_after: Some(5), .. }
        ));
    }

    #[tokio::test]
    async fn test_blocked_chat_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = bot_for(&server).send_text(42, "hola").await.unwrap_err();

        assert!(err.is_chat_unreachable());
        assert!(!err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_send_text_splits_long_replies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(serde_json::json!({ "chat_id": 42 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message(42, "…")))
            .expect(2)
            .mount(&server)
            .await;

        let long_reply = "a".repeat(MAX_MESSAGE_LENGTH + 10);
        let sent = bot_for(&server).send_text(42, &long_reply).await.unwrap();

        assert_eq!(sent.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_errors_do_not_leak_token() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let err = Telegram::new(TOKEN)
            .with_base_url(uri)
            .get_me()
            .await
            .unwrap_err();

        assert!(matches!(err, TelegramRequestError::Request(_)));
        assert!(!err.to_string().contains(TOKEN));
    }

    #[test]
    fn test_debug_redacts_token() {
        let bot = Telegram::new(TOKEN);
        assert!(!format!("{bot:?}").contains(TOKEN));
    }
}
