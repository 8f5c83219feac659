//! Tests for the Mood Player backend client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use mood_core::{Backend, MoodError, NewChatMessage};
use mood_server_client::{MoodServerClient, ServerClientError, ServerConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

async fn client_for(server: &MockServer) -> MoodServerClient {
    MoodServerClient::new(ServerConfig::new(server.uri())).unwrap()
}

async fn signed_in_client(server: &MockServer) -> MoodServerClient {
    MoodServerClient::new(ServerConfig::with_token(server.uri(), "tok_123")).unwrap()
}

fn user_json(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "email": format!("{name}@example.com") })
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(MoodServerClient::new(ServerConfig::new("http://localhost:8000")).is_ok());
        assert!(MoodServerClient::new(ServerConfig::new("https://api.example.com/")).is_ok());
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(
            MoodServerClient::new(ServerConfig::new("")),
            Err(ServerClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            MoodServerClient::new(ServerConfig::new("ftp://example.com")),
            Err(ServerClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let client = MoodServerClient::new(ServerConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.url().await, "http://localhost:8000");
        assert!(!client.is_authenticated().await);
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "email": "aki@example.com", "password": "secret123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "access_token": "tok_abc",
                "user": user_json("u1", "aki"),
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let session = client.login("aki@example.com", "secret123").await.unwrap();

        assert_eq!(session.access_token, "tok_abc");
        assert_eq!(session.user.id, "u1");
        assert_eq!(client.token().await.as_deref(), Some("tok_abc"));
    }

    #[tokio::test]
    async fn test_login_without_user_fetches_me() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "access_token": "tok_abc",
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", "Bearer tok_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u9", "mio")))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let session = client.login("mio@example.com", "secret123").await.unwrap();
        assert_eq!(session.user.id, "u9");
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid email or password" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.login("aki@example.com", "wrong").await.unwrap_err();

        assert!(matches!(err, MoodError::Auth(ref m) if m == "Invalid email or password"));
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_login_refused_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Email not confirmed",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.login("aki@example.com", "secret123").await.unwrap_err();
        assert!(matches!(err, MoodError::Auth(ref m) if m == "Email not confirmed"));
    }

    #[tokio::test]
    async fn test_register_sends_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(json!({
                "email": "aki@example.com",
                "password": "secret123",
                "name": "aki",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "user_id": "u1",
                "message": "Registered",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let outcome = client
            .register("aki@example.com", "secret123", Some("aki"))
            .await
            .unwrap();

        assert_eq!(outcome.user_id.as_deref(), Some("u1"));
        assert_eq!(outcome.message.as_deref(), Some("Registered"));
    }

    #[tokio::test]
    async fn test_register_conflict_uses_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "detail": "Email already registered" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .register("aki@example.com", "secret123", None)
            .await
            .unwrap_err();
        assert!(matches!(err, MoodError::Backend(ref m) if m == "Email already registered"));
    }

    #[tokio::test]
    async fn test_logout_clears_token_even_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("authorization", "Bearer tok_123"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_in_client(&server).await;
        assert!(client.logout().await.is_err());
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_current_user_states() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", "Bearer tok_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "aki")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "expired" })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.current_user().await.unwrap(), None);

        client.set_access_token(Some("tok_123".into())).await;
        assert_eq!(client.current_user().await.unwrap().unwrap().id, "u1");

        client.set_access_token(Some("expired".into())).await;
        assert_eq!(client.current_user().await.unwrap(), None);
    }
}

// =============================================================================
// Social Tests
// =============================================================================

mod social {
    use super::*;

    #[tokio::test]
    async fn test_social_requires_token() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        assert!(matches!(client.friends().await, Err(MoodError::Auth(_))));
        assert!(matches!(client.search_users("aki").await, Err(MoodError::Auth(_))));
    }

    #[tokio::test]
    async fn test_search_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/search"))
            .and(query_param("query", "a k"))
            .and(header("authorization", "Bearer tok_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [user_json("u2", "aki"), user_json("u3", "akira")]
            })))
            .mount(&server)
            .await;

        let client = signed_in_client(&server).await;
        let users = client.search_users("a k").await.unwrap();
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u2", "u3"]);
    }

    #[tokio::test]
    async fn test_friend_request_flow() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/friends/request"))
            .and(body_json(json!({ "to_user_id": "u2" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/friends/requests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "req1",
                "from_user": user_json("u5", "mio"),
                "created_at": "2024-05-01T10:00:00Z",
            }])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/friends/accept/req1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/friends/reject/req2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_in_client(&server).await;
        client.send_friend_request("u2").await.unwrap();

        let requests = client.friend_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].from_user.name, "mio");

        client.accept_friend_request("req1").await.unwrap();
        client.reject_friend_request("req2").await.unwrap();
    }

    #[tokio::test]
    async fn test_friends_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/friends"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "friends": [user_json("u7", "ren")] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/friends/u7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_in_client(&server).await;
        let friends = client.friends().await.unwrap();
        assert_eq!(friends[0].id, "u7");
        client.delete_friend("u7").await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_request_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/friends/request"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({ "message": "Request already sent" })),
            )
            .mount(&server)
            .await;

        let client = signed_in_client(&server).await;
        let err = client.send_friend_request("u2").await.unwrap_err();
        assert!(matches!(err, MoodError::Backend(ref m) if m == "Request already sent"));
    }
}

// =============================================================================
// Chat Tests
// =============================================================================

mod chat {
    use super::*;

    #[tokio::test]
    async fn test_messages_sorted_oldest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/messages"))
            .and(query_param("room_id", "r_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "2", "room_id": "r_abc", "user_name": "b", "message": "later", "created_at": "2024-05-01T10:05:00Z" },
                { "id": "1", "room_id": "r_abc", "user_name": "a", "message": "first", "created_at": "2024-05-01T10:00:00Z" },
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let messages = client.chat_messages("r_abc").await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["first", "later"]);
    }

    #[tokio::test]
    async fn test_post_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/messages"))
            .and(body_json(json!({
                "room_id": "r_abc",
                "user_id": "u_0123456789",
                "user_name": "User_ab12",
                "message": "hello",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .post_chat_message(&NewChatMessage {
                room_id: "r_abc".into(),
                user_id: "u_0123456789".into(),
                user_name: "User_ab12".into(),
                message: "hello".into(),
            })
            .await
            .unwrap();
    }
}

// =============================================================================
// Connectivity Tests
// =============================================================================

mod connectivity {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Nothing listens on the discard port
        let client = MoodServerClient::new(ServerConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.chat_messages("r_abc").await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/messages"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.chat_messages("r_abc").await.unwrap_err();
        assert!(matches!(err, MoodError::Backend(ref m) if m == "Bad Gateway"));
    }
}
