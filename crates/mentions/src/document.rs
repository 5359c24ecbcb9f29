use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn version_one() -> u32 {
    1
}

fn normal_mode() -> String {
    "normal".to_string()
}

const DIRECTION_LTR: &str = "ltr";

/// The root of a serialized Lexical editor state: an ordered list of blocks.
///
/// Block children whose `type` the codec does not know are dropped when
/// loading persisted JSON instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub children: Vec<BlockNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub indent: u32,
    #[serde(rename = "type", default = "RootNode::kind_tag")]
    pub kind: String,
    #[serde(default = "version_one")]
    pub version: u32,
}

impl RootNode {
    fn kind_tag() -> String {
        "root".to_string()
    }

    pub fn with_children(children: Vec<BlockNode>) -> Self {
        Self {
            children,
            direction: Some(DIRECTION_LTR.to_string()),
            format: String::new(),
            indent: 0,
            kind: Self::kind_tag(),
            version: 1,
        }
    }
}

/// The closed set of block-level nodes the codec understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockNode {
    #[serde(rename = "paragraph")]
    Paragraph(ParagraphNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphNode {
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub children: Vec<InlineNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub indent: u32,
    #[serde(default = "version_one")]
    pub version: u32,
    #[serde(default)]
    pub text_format: i64,
    #[serde(default)]
    pub text_style: String,
}

impl ParagraphNode {
    pub fn with_children(children: Vec<InlineNode>) -> Self {
        Self {
            children,
            direction: Some(DIRECTION_LTR.to_string()),
            format: String::new(),
            indent: 0,
            version: 1,
            text_format: 0,
            text_style: String::new(),
        }
    }
}

/// The closed set of inline nodes the codec understands. A serialized
/// mention token's payload is one of these, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InlineNode {
    #[serde(rename = "text")]
    Text(TextNode),
    #[serde(rename = "tab")]
    Tab(TabNode),
    #[serde(rename = "linebreak")]
    Linebreak(LinebreakNode),
    #[serde(rename = "contextItemMention")]
    Mention(MentionNode),
}

impl InlineNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextNode::new(text))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(default)]
    pub detail: i64,
    #[serde(default)]
    pub format: i64,
    #[serde(default = "normal_mode")]
    pub mode: String,
    #[serde(default)]
    pub style: String,
    #[serde(default = "version_one")]
    pub version: u32,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detail: 0,
            format: 0,
            mode: normal_mode(),
            style: String::new(),
            version: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabNode {
    #[serde(default = "version_one")]
    pub version: u32,
}

impl Default for TabNode {
    fn default() -> Self {
        Self { version: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinebreakNode {
    #[serde(default = "version_one")]
    pub version: u32,
}

impl Default for LinebreakNode {
    fn default() -> Self {
        Self { version: 1 }
    }
}

/// An inline reference to a context item (file, repository, symbol, openctx
/// provider result, ...).
///
/// `context_item` stays a raw JSON value: re-encoding a decoded mention must
/// reproduce the original key order byte for byte, and the set of fields
/// varies per item type. [`crate::ContextItemRef`] offers a typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionNode {
    pub text: String,
    pub context_item: Value,
    #[serde(default)]
    pub is_from_initial_context: bool,
    pub version: u32,
}

fn lenient_nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|node| serde_json::from_value(node).ok())
        .collect())
}
