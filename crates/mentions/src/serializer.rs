use crate::document::{BlockNode, InlineNode, ParagraphNode, RootNode, TabNode};
use crate::mention::{decode_token, encode_mention};
use crate::value::{SerializedPromptEditorState, SerializedPromptEditorValue};
use crate::words::{Word, scan_words};

/// Flattens an editor value into chat input text, embedding each mention as
/// a self-describing token (or a dynamic trigger literal). Paragraphs are
/// joined with a single `\n`; tab and linebreak nodes become `\t` and `\n`.
pub fn serialize(value: &SerializedPromptEditorValue) -> String {
    let root = &value.editor_state.lexical_editor_state.root;
    let mut out = String::new();
    for (ix, block) in root.children.iter().enumerate() {
        if ix > 0 {
            out.push('\n');
        }
        let BlockNode::Paragraph(paragraph) = block;
        for node in &paragraph.children {
            match node {
                InlineNode::Text(text) => out.push_str(&text.text),
                InlineNode::Tab(_) => out.push('\t'),
                InlineNode::Linebreak(_) => out.push('\n'),
                InlineNode::Mention(mention) => out.push_str(&encode_mention(mention)),
            }
        }
    }
    out
}

/// Best-effort reconstruction of an editor value from flat text. Returns
/// `None` only for empty input; malformed embedded tokens degrade to plain
/// text rather than failing the whole document.
pub fn deserialize(input: &str) -> Option<SerializedPromptEditorValue> {
    if input.is_empty() {
        return None;
    }

    let mut context_items = Vec::new();
    let mut paragraphs = Vec::new();
    for line in input.split('\n') {
        let mut children: Vec<InlineNode> = Vec::new();
        for (ix, segment) in line.split('\t').enumerate() {
            if ix > 0 {
                children.push(InlineNode::Tab(TabNode::default()));
            }
            for word in scan_words(segment) {
                match word {
                    Word::Text(text) => push_text(&mut children, text),
                    Word::Serialized(token) => match decode_token(token) {
                        Some(node) => {
                            if let InlineNode::Mention(mention) = &node {
                                context_items.push(mention.context_item.clone());
                            }
                            children.push(node);
                        }
                        None => push_text(&mut children, token),
                    },
                    Word::Dynamic(_, entry) => {
                        let mention = entry.hydratable_mention();
                        context_items.push(mention.context_item.clone());
                        children.push(InlineNode::Mention(mention));
                    }
                }
            }
        }
        paragraphs.push(BlockNode::Paragraph(ParagraphNode::with_children(children)));
    }

    Some(SerializedPromptEditorValue {
        text: project_text(&paragraphs),
        context_items,
        editor_state: SerializedPromptEditorState::latest(RootNode::with_children(paragraphs)),
    })
}

// Plain-text projection of the reconstructed tree: mentions contribute
// their display label, never their encoded form.
fn project_text(blocks: &[BlockNode]) -> String {
    let mut out = String::new();
    for (ix, block) in blocks.iter().enumerate() {
        if ix > 0 {
            out.push('\n');
        }
        let BlockNode::Paragraph(paragraph) = block;
        for node in &paragraph.children {
            match node {
                InlineNode::Text(text) => out.push_str(&text.text),
                InlineNode::Tab(_) => out.push('\t'),
                InlineNode::Linebreak(_) => out.push('\n'),
                InlineNode::Mention(mention) => out.push_str(&mention.text),
            }
        }
    }
    out
}

// Degraded tokens land next to ordinary text; merge adjacent runs so the
// tree stays normalized.
fn push_text(children: &mut Vec<InlineNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(InlineNode::Text(prev)) = children.last_mut() {
        prev.text.push_str(text);
        return;
    }
    children.push(InlineNode::text(text));
}
