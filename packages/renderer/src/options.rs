use serde::{Deserialize, Serialize};

/// Options shared by all render targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Width of the element blocks are placed in. Margins are subtracted
    /// from it when a block has no explicit width.
    pub parent_width: String,
    /// Content width of the email body table
    pub email_width: String,
    /// Pretty print markup
    pub pretty: bool,
    /// Indentation string used when pretty printing
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            parent_width: "100%".to_string(),
            email_width: "600px".to_string(),
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}
