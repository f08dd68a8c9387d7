//! ContentPart - fragments of a chat turn

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ContentFragment;

/// A part of turn content (text, image, tool call, ...)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },

    /// Image content (base64 or URL)
    Image {
        source: ImageSource,
        #[serde(default)]
        alt_text: Option<String>,
    },

    /// File reference
    FileReference {
        path: String,
        #[serde(default)]
        display_name: Option<String>,
    },

    /// Tool invocation requested by the assistant
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },

    /// Output of a tool invocation
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::Image {
            source: ImageSource::Url { url: url.into() },
            alt_text: None,
        }
    }

    pub fn file_reference(path: impl Into<String>) -> Self {
        Self::FileReference {
            path: path.into(),
            display_name: None,
        }
    }

    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Get text content if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

impl ContentFragment for ContentPart {
    fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::FileReference { .. } => "file_reference",
            Self::ToolUse { .. } => "tool_use",
            Self::ToolResult { .. } => "tool_result",
        }
    }
}

/// Image source (base64 or URL)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    Base64 { data: String, media_type: String },
    Url { url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_serde_tag() {
        let parts = vec![
            ContentPart::text("hi"),
            ContentPart::image_url("https://example.com/cat.png"),
            ContentPart::file_reference("src/main.rs"),
            ContentPart::tool_use("call_1", "read_file", serde_json::json!({ "path": "a" })),
            ContentPart::tool_result("call_1", "ok"),
        ];

        for part in parts {
            let json = serde_json::to_value(&part).unwrap();
            assert_eq!(json["type"], part.kind());
        }
    }

    #[test]
    fn test_tool_result_defaults() {
        let part: ContentPart = serde_json::from_str(
            r#"{"type":"tool_result","tool_use_id":"call_1","content":"done"}"#,
        )
        .unwrap();
        assert_eq!(part, ContentPart::tool_result("call_1", "done"));
        assert_eq!(part.as_text(), None);
    }
}
