//! Turns raw model output into a [`ClassifierReply`].
//!
//! Models wrap JSON in markdown fences, prepend chatter, or answer in plain
//! prose. Anything that does not parse becomes a `question` fallback that
//! carries the model text (or a fixed help pointer) as the response.

use api_types::classifier::ClassifierReply;

pub(crate) const FALLBACK_RESPONSE: &str =
    "Não entendi. Tente: 'receita 5000 Pompilio' ou 'despesa combustível 1500 Tito'";

/// Parses model content, recovering to the fallback reply on failure.
pub fn parse_reply(content: &str) -> ClassifierReply {
    let candidate = strip_fences(content).trim();
    match serde_json::from_str::<ClassifierReply>(candidate) {
        Ok(reply) if !reply.kind.trim().is_empty() => with_response(reply),
        _ => {
            tracing::warn!("classifier content is not a valid reply, falling back");
            fallback(content)
        }
    }
}

/// The reply used when nothing usable came back.
pub fn fallback(content: &str) -> ClassifierReply {
    let text = content.trim();
    ClassifierReply {
        kind: "question".to_string(),
        data: None,
        response: if text.is_empty() {
            FALLBACK_RESPONSE.to_string()
        } else {
            text.to_string()
        },
        understood: false,
    }
}

/// Returns the body of the first ```` ``` ```` block (with or without a
/// `json` tag), or the input itself when there is no complete block.
fn strip_fences(content: &str) -> &str {
    let Some(open) = content.find("```") else {
        return content;
    };
    let after = &content[open + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    match after.find("```") {
        Some(close) => &after[..close],
        None => content,
    }
}

fn with_response(mut reply: ClassifierReply) -> ClassifierReply {
    if reply.response.trim().is_empty() {
        reply.response = FALLBACK_RESPONSE.to_string();
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_is_parsed() {
        let reply = parse_reply(
            r#"{"type":"revenue","data":{"driver":"Pompilio","amount":5000},"response":"Ok","understood":true}"#,
        );
        assert_eq!(reply.kind, "revenue");
        assert!(reply.understood);
        let data = reply.data.unwrap();
        assert_eq!(data.driver.as_deref(), Some("Pompilio"));
        assert_eq!(data.amount, Some(serde_json::json!(5000)));
    }

    #[test]
    fn fenced_json_is_parsed() {
        let content = "Claro!\n```json\n{\"type\":\"greeting\",\"response\":\"Olá!\",\"understood\":true}\n```";
        let reply = parse_reply(content);
        assert_eq!(reply.kind, "greeting");
        assert_eq!(reply.response, "Olá!");
    }

    #[test]
    fn untagged_fence_is_parsed() {
        let reply = parse_reply("```\n{\"type\":\"help\",\"response\":\"Ajuda\"}\n```");
        assert_eq!(reply.kind, "help");
        assert!(!reply.understood);
    }

    #[test]
    fn prose_falls_back_to_question_with_model_text() {
        let reply = parse_reply("Não sei responder a isso.");
        assert_eq!(reply.kind, "question");
        assert!(!reply.understood);
        assert!(reply.data.is_none());
        assert_eq!(reply.response, "Não sei responder a isso.");
    }

    #[test]
    fn empty_content_uses_help_pointer() {
        let reply = parse_reply("   ");
        assert_eq!(reply.kind, "question");
        assert_eq!(reply.response, FALLBACK_RESPONSE);
    }

    #[test]
    fn missing_response_gets_help_pointer() {
        let reply = parse_reply(r#"{"type":"summary"}"#);
        assert_eq!(reply.kind, "summary");
        assert_eq!(reply.response, FALLBACK_RESPONSE);
    }
}
