use serde::{Deserialize, Serialize};

// --- Server to Client Messages ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Reports the identity token assigned at registration.
    Token { token: String },

    /// Proposes a found match; the client answers with accept/decline.
    Accept,

    /// Connection liveness probe. Any reply counts as alive.
    Verify,

    /// The proposed opponent declined or timed out; the receiver has been
    /// returned to the head of the pool.
    OpponentDidNotAccept,

    /// Both sides confirmed and verified; the session is starting.
    MatchFound,

    /// Acknowledges a stop-search request.
    SearchStopped { message: String },

    /// Reports an error to the client.
    Error { code: ErrorCode, message: String },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    TokenNotFound,
}

// --- Client to Server Messages ---

/// Reply to an `accept` proposal or a `verify` probe. A missing `response`
/// field is a malformed reply and is classified as a decline.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClientReply {
    pub response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_carry_command_tags() {
        let json = serde_json::to_value(ServerMessage::Token {
            token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json["command"], "token");
        assert_eq!(json["token"], "abc");

        let json = serde_json::to_value(ServerMessage::OpponentDidNotAccept).unwrap();
        assert_eq!(json["command"], "opponent_did_not_accept");
    }

    #[test]
    fn reply_without_response_field_deserializes() {
        let reply: ClientReply = serde_json::from_str("{}").unwrap();
        assert!(reply.response.is_none());

        let reply: ClientReply = serde_json::from_str(r#"{"response":"accept"}"#).unwrap();
        assert_eq!(reply.response.as_deref(), Some("accept"));
    }
}
