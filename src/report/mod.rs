//! Rendering of dashboard views for the terminal (text) or for other tools (JSON).

pub mod text;

use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 以 JSON 輸出時直接序列化 view；文字格式交給呼叫端提供的 renderer
pub fn render<T: Serialize>(view: &T, format: OutputFormat, text: impl FnOnce(&T) -> String) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(view)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
    }
}
