use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;
use serde_json::{Value, json};

use crate::context::ContextItemRef;
use crate::document::{InlineNode, MentionNode};

/// Prefix of an encoded mention token in the current payload version.
pub const MENTION_PREFIX: &str = "cody://serialized.v1";

/// Terminates a token's base64 payload. Not part of the base64 alphabet, so
/// it delimits the token unambiguously even with text glued right after it.
pub const MENTION_SENTINEL: char = '_';

pub(crate) const MENTION_SCHEME: &str = "cody://";
pub(crate) const SERIALIZED_STEM: &str = "cody://serialized.v";
const DATA_SEPARATOR: &str = "?data=";

// JavaScript's encodeURIComponent leaves alphanumerics and -_.!~*'()
// unescaped; the historical payloads were produced by it, so the set must
// match exactly.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A mention representable by a short fixed trigger string instead of a full
/// encoded token. The placeholder context item it decodes to is hydrated into
/// a fully resolved item downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicMention {
    pub trigger: &'static str,
    pub item_type: &'static str,
    pub title: &'static str,
    pub label: &'static str,
}

pub const DYNAMIC_MENTIONS: &[DynamicMention] = &[
    DynamicMention {
        trigger: "cody://current-file",
        item_type: "current-file",
        title: "Current File",
        label: "current file",
    },
    DynamicMention {
        trigger: "cody://selection",
        item_type: "current-selection",
        title: "Current Selection",
        label: "current selection",
    },
    DynamicMention {
        trigger: "cody://repository",
        item_type: "current-repository",
        title: "Current Repository",
        label: "current repository",
    },
    DynamicMention {
        trigger: "cody://current-dir",
        item_type: "current-directory",
        title: "Current Directory",
        label: "current directory",
    },
    DynamicMention {
        trigger: "cody://tabs",
        item_type: "current-open-tabs",
        title: "Open Tabs",
        label: "open tabs",
    },
];

impl DynamicMention {
    pub fn for_trigger(trigger: &str) -> Option<&'static DynamicMention> {
        DYNAMIC_MENTIONS.iter().find(|entry| entry.trigger == trigger)
    }

    /// Matches a context item by its `uri` (the trigger itself) or by its
    /// `type` tag. Items of these kinds carry no payload worth encoding; the
    /// trigger literal is always enough to reconstruct them.
    pub fn for_item(item: &Value) -> Option<&'static DynamicMention> {
        let item = ContextItemRef::from_value(item)?;
        DYNAMIC_MENTIONS.iter().find(|entry| {
            item.uri == Some(entry.trigger) || item.kind.as_str() == Some(entry.item_type)
        })
    }

    /// The placeholder mention a trigger literal decodes to.
    pub fn hydratable_mention(&self) -> MentionNode {
        MentionNode {
            text: self.label.to_string(),
            context_item: json!({
                "type": self.item_type,
                "uri": self.trigger,
                "title": self.title,
            }),
            is_from_initial_context: false,
            version: 1,
        }
    }
}

// Field order is the wire format; re-encoding a decoded mention must
// reproduce the original byte sequence.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MentionPayload<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
    context_item: &'a Value,
    is_from_initial_context: bool,
    version: u32,
}

/// Encodes one mention node as either a dynamic trigger literal or a full
/// `cody://serialized.v1?data=..._` token.
pub(crate) fn encode_mention(node: &MentionNode) -> String {
    if let Some(entry) = DynamicMention::for_item(&node.context_item) {
        return entry.trigger.to_string();
    }

    let payload = MentionPayload {
        kind: "contextItemMention",
        text: &node.text,
        context_item: &node.context_item,
        is_from_initial_context: node.is_from_initial_context,
        version: node.version,
    };
    let json = serde_json::to_string(&payload).expect("mention payload is plain JSON data");
    let encoded = utf8_percent_encode(&json, URI_COMPONENT).to_string();
    let data = STANDARD.encode(encoded);
    format!("{MENTION_PREFIX}{DATA_SEPARATOR}{data}{MENTION_SENTINEL}")
}

/// Decodes a grammar-matched token back into the inline node it carries.
/// Any failure along the way yields `None`; the caller degrades the token to
/// plain text instead of surfacing an error.
pub(crate) fn decode_token(token: &str) -> Option<InlineNode> {
    let payload = token.strip_suffix(MENTION_SENTINEL)?;
    let (_, data) = payload.split_once(DATA_SEPARATOR)?;
    let bytes = STANDARD.decode(data).ok()?;
    let encoded = std::str::from_utf8(&bytes).ok()?;
    let json = percent_decode_str(encoded).decode_utf8().ok()?;
    serde_json::from_str(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LinebreakNode;

    // Token captured from a real chat transcript; encoding must stay
    // byte-compatible with payloads already persisted in chat history.
    const ROCKET_TOKEN: &str = "cody://serialized.v1?data=JTdCJTIydHlwZSUyMiUzQSUyMmNvbnRleHRJdGVtTWVudGlvbiUyMiUyQyUyMnRleHQlMjIlM0ElMjIlRjAlOUYlOUElODAlMjIlMkMlMjJjb250ZXh0SXRlbSUyMiUzQSU3QiUyMnR5cGUlMjIlM0ElMjJvcGVuY3R4JTIyJTJDJTIycHJvdmlkZXIlMjIlM0ElMjJvcGVuY3R4JTIyJTJDJTIydGl0bGUlMjIlM0ElMjIlRjAlOUYlOUElODAlMjIlMkMlMjJ1cmklMjIlM0ElMjJmaWxlJTNBJTJGJTJGJTJGZ2l0aHViLmNvbSUyRnNvdXJjZWdyYXBoJTJGY29keSUyRndlYiUyRmRlbW8lMkYlMjIlMkMlMjJwcm92aWRlclVyaSUyMiUzQSUyMmludGVybmFsLXJlbW90ZS1kaXJlY3Rvcnktc2VhcmNoJTIyJTJDJTIyZGVzY3JpcHRpb24lMjIlM0ElMjJDdXJyZW50JTIwRGlyZWN0b3J5JTIyJTJDJTIyc291cmNlJTIyJTNBJTIyaW5pdGlhbCUyMiUyQyUyMm1lbnRpb24lMjIlM0ElN0IlMjJkYXRhJTIyJTNBJTdCJTIycmVwb05hbWUlMjIlM0ElMjJnaXRodWIuY29tJTJGc291cmNlZ3JhcGglMkZjb2R5JTIyJTJDJTIycmVwb0lEJTIyJTNBJTIyVW1Wd2IzTnBkRzl5ZVRveU56VTVPUSUzRCUzRCUyMiUyQyUyMmRpcmVjdG9yeVBhdGglMjIlM0ElMjJ3ZWIlMkZkZW1vJTJGJTIyJTdEJTJDJTIyZGVzY3JpcHRpb24lMjIlM0ElMjIlRjAlOUYlOUElODAlMjIlN0QlN0QlMkMlMjJpc0Zyb21Jbml0aWFsQ29udGV4dCUyMiUzQWZhbHNlJTJDJTIydmVyc2lvbiUyMiUzQTElN0Q=_";

    fn rocket_mention() -> MentionNode {
        MentionNode {
            text: "🚀".to_string(),
            context_item: json!({
                "type": "openctx",
                "provider": "openctx",
                "title": "🚀",
                "uri": "file:///github.com/sourcegraph/cody/web/demo/",
                "providerUri": "internal-remote-directory-search",
                "description": "Current Directory",
                "source": "initial",
                "mention": {
                    "data": {
                        "repoName": "github.com/sourcegraph/cody",
                        "repoID": "UmVwb3NpdG9yeToyNzU5OQ==",
                        "directoryPath": "web/demo/",
                    },
                    "description": "🚀",
                },
            }),
            is_from_initial_context: false,
            version: 1,
        }
    }

    #[test]
    fn encodes_unicode_mention_to_exact_historical_token() {
        assert_eq!(encode_mention(&rocket_mention()), ROCKET_TOKEN);
    }

    #[test]
    fn decode_reverses_encode() {
        let decoded = decode_token(ROCKET_TOKEN).expect("decode");
        assert_eq!(decoded, InlineNode::Mention(rocket_mention()));
    }

    #[test]
    fn decodes_non_mention_node_payloads() {
        let token = "cody://serialized.v1?data=JTdCJTIydHlwZSUyMiUzQSUyMmxpbmVicmVhayUyMiUyQyUyMnZlcnNpb24lMjIlM0ExJTdE_";
        assert_eq!(
            decode_token(token),
            Some(InlineNode::Linebreak(LinebreakNode::default()))
        );
    }

    #[test]
    fn garbled_payloads_decode_to_none() {
        // truncated base64
        assert_eq!(decode_token("cody://serialized.v1?data=123_"), None);
        // valid base64, not percent-encoded JSON
        assert_eq!(decode_token("cody://serialized.v1?data=aGVsbG8=_"), None);
        // valid JSON, unknown node type
        let unknown = STANDARD.encode(
            utf8_percent_encode(r#"{"type":"mystery","version":1}"#, URI_COMPONENT).to_string(),
        );
        assert_eq!(
            decode_token(&format!("cody://serialized.v1?data={unknown}_")),
            None
        );
        // mention missing required fields
        let partial = STANDARD.encode(
            utf8_percent_encode(r#"{"type":"contextItemMention","text":"x"}"#, URI_COMPONENT)
                .to_string(),
        );
        assert_eq!(
            decode_token(&format!("cody://serialized.v1?data={partial}_")),
            None
        );
    }

    #[test]
    fn dynamic_items_encode_as_trigger_literals() {
        for entry in DYNAMIC_MENTIONS {
            let mention = entry.hydratable_mention();
            assert_eq!(encode_mention(&mention), entry.trigger);
        }
    }

    #[test]
    fn current_file_matches_by_type_tag_alone() {
        let mention = MentionNode {
            text: "current file".to_string(),
            context_item: json!({"type": "current-file", "uri": "file:///somewhere/else"}),
            is_from_initial_context: false,
            version: 1,
        };
        assert_eq!(encode_mention(&mention), "cody://current-file");
    }

    #[test]
    fn trigger_lookup() {
        assert!(DynamicMention::for_trigger("cody://tabs").is_some());
        assert!(DynamicMention::for_trigger("cody://nope").is_none());
    }
}
