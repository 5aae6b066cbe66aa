//! 模型输出清洗
//!
//! 模型经常无视"不要 markdown"的要求，返回带代码块围栏或前后带说明文字的 SVG。

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:xml|svg)?").expect("fence pattern is valid"));

static SVG_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg[\s\S]*?</svg>").expect("svg pattern is valid"));

/// 从模型输出中取出 SVG 元素
///
/// 去掉代码块围栏，取第一个 `<svg ...>...</svg>`（忽略大小写，可跨行）。
/// 找不到 SVG 元素时返回 `None`，调用方据此判定生成失败。
pub fn extract_svg(raw: &str) -> Option<String> {
    let cleaned = CODE_FENCE.replace_all(raw, "");
    SVG_ELEMENT
        .find(cleaned.trim())
        .map(|m| m.as_str().to_string())
}

/// 编码为 `data:image/svg+xml;base64,...`
pub fn svg_data_url(svg: &str) -> String {
    format!("data:{SVG_MEDIA_TYPE};base64,{}", STANDARD.encode(svg.as_bytes()))
}

/// 商品名清洗：去掉首尾空白和各一个引号
pub fn clean_product_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let trimmed = trimmed
        .strip_suffix(['"', '\''])
        .unwrap_or(trimmed);
    trimmed.to_string()
}
