mod context;
mod document;
mod mention;
mod serializer;
mod value;
mod words;

pub use context::{ContextItemKind, ContextItemRef};
pub use document::{
    BlockNode, InlineNode, LinebreakNode, MentionNode, ParagraphNode, RootNode, TabNode, TextNode,
};
pub use mention::{DYNAMIC_MENTIONS, DynamicMention, MENTION_PREFIX, MENTION_SENTINEL};
pub use serializer::{deserialize, serialize};
pub use value::{
    LexicalEditorState, STATE_VERSION_CURRENT, STATE_VERSION_LEGACY, SerializedPromptEditorState,
    SerializedPromptEditorValue,
};
pub use words::split_to_words;
