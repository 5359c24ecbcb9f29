use serde_json::Value;

/// Closed set of context item kinds the codec can dispatch on. Items decoded
/// from JSON may carry tags minted after this crate was built; those parse as
/// `Unknown` and flow through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextItemKind {
    File,
    Repository,
    Tree,
    Symbol,
    Openctx,
    CurrentFile,
    CurrentSelection,
    CurrentRepository,
    CurrentDirectory,
    CurrentOpenTabs,
    Unknown,
}

impl ContextItemKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "file" => Self::File,
            "repository" => Self::Repository,
            "tree" => Self::Tree,
            "symbol" => Self::Symbol,
            "openctx" => Self::Openctx,
            "current-file" => Self::CurrentFile,
            "current-selection" => Self::CurrentSelection,
            "current-repository" => Self::CurrentRepository,
            "current-directory" => Self::CurrentDirectory,
            "current-open-tabs" => Self::CurrentOpenTabs,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::File => Some("file"),
            Self::Repository => Some("repository"),
            Self::Tree => Some("tree"),
            Self::Symbol => Some("symbol"),
            Self::Openctx => Some("openctx"),
            Self::CurrentFile => Some("current-file"),
            Self::CurrentSelection => Some("current-selection"),
            Self::CurrentRepository => Some("current-repository"),
            Self::CurrentDirectory => Some("current-directory"),
            Self::CurrentOpenTabs => Some("current-open-tabs"),
            Self::Unknown => None,
        }
    }
}

/// Borrowed typed view over a raw `contextItem` JSON object.
#[derive(Debug, Clone, Copy)]
pub struct ContextItemRef<'a> {
    pub kind: ContextItemKind,
    pub uri: Option<&'a str>,
    pub title: Option<&'a str>,
}

impl<'a> ContextItemRef<'a> {
    /// Returns `None` when the value is not a JSON object at all.
    pub fn from_value(item: &'a Value) -> Option<Self> {
        let object = item.as_object()?;
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .map(ContextItemKind::parse)
            .unwrap_or(ContextItemKind::Unknown);
        Some(Self {
            kind,
            uri: object.get("uri").and_then(Value::as_str),
            title: object.get("title").and_then(Value::as_str),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_tags_round_trip() {
        for tag in [
            "file",
            "repository",
            "tree",
            "symbol",
            "openctx",
            "current-file",
            "current-selection",
            "current-repository",
            "current-directory",
            "current-open-tabs",
        ] {
            assert_eq!(ContextItemKind::parse(tag).as_str(), Some(tag));
        }
        assert_eq!(ContextItemKind::parse("holodeck").as_str(), None);
    }

    #[test]
    fn view_reads_common_fields() {
        let item = json!({
            "type": "openctx",
            "uri": "https://example.com/doc",
            "title": "Doc",
            "mention": {"data": {"id": 7}},
        });
        let view = ContextItemRef::from_value(&item).expect("object");
        assert_eq!(view.kind, ContextItemKind::Openctx);
        assert_eq!(view.uri, Some("https://example.com/doc"));
        assert_eq!(view.title, Some("Doc"));

        assert!(ContextItemRef::from_value(&json!("not an object")).is_none());
    }
}
