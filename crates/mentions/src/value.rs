use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::RootNode;

/// Editor state version written by this crate.
pub const STATE_VERSION_CURRENT: &str = "lexical-v1";

/// Version tag found in old persisted states. A legacy marker only; the
/// codec treats the document identically.
pub const STATE_VERSION_LEGACY: &str = "lexical-v0";

/// The top-level value the codec serializes: a plain-text projection, the
/// flat list of mentioned context items, and the versioned document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedPromptEditorValue {
    pub text: String,
    #[serde(default)]
    pub context_items: Vec<Value>,
    pub editor_state: SerializedPromptEditorState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedPromptEditorState {
    pub v: String,
    pub min_reader_v: String,
    pub lexical_editor_state: LexicalEditorState,
}

impl SerializedPromptEditorState {
    pub fn latest(root: RootNode) -> Self {
        Self {
            v: STATE_VERSION_CURRENT.to_string(),
            min_reader_v: STATE_VERSION_CURRENT.to_string(),
            lexical_editor_state: LexicalEditorState { root },
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(
            self.min_reader_v.as_str(),
            STATE_VERSION_CURRENT | STATE_VERSION_LEGACY
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalEditorState {
    pub root: RootNode,
}
