//! 上传图片解码
//!
//! 接受 `data:<media-type>;base64,<payload>` 形式的 data URL，也接受裸 base64（按 SVG 处理）。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Result, ShopError};
use crate::generation::svg::SVG_MEDIA_TYPE;

/// 支持的图片类型及其文件扩展名
const SUPPORTED_TYPES: [(&str, &str); 4] = [
    (SVG_MEDIA_TYPE, "svg"),
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
];

/// 解码后的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub extension: &'static str,
}

/// 解码 data URL 或裸 base64
pub fn decode_image(input: &str) -> Result<DecodedImage> {
    let input = input.trim();

    let (media_type, payload) = match input.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| ShopError::InvalidImage("malformed data URL".to_string()))?;
            let media_type = header
                .strip_suffix(";base64")
                .ok_or_else(|| ShopError::InvalidImage("data URL must be base64 encoded".to_string()))?;
            (media_type.trim().to_ascii_lowercase(), payload)
        }
        None => (SVG_MEDIA_TYPE.to_string(), input),
    };

    let (content_type, extension) = SUPPORTED_TYPES
        .into_iter()
        .find(|(ty, _)| *ty == media_type)
        .ok_or_else(|| ShopError::InvalidImage(format!("unsupported image type '{media_type}'")))?;

    // 部分客户端会在 base64 中插入换行
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ShopError::InvalidImage(e.to_string()))?;

    if bytes.is_empty() {
        return Err(ShopError::InvalidImage("image is empty".to_string()));
    }

    Ok(DecodedImage {
        bytes,
        content_type,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_data_url() {
        let image = decode_image("data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=").unwrap();
        assert_eq!(image.bytes, b"<svg></svg>");
        assert_eq!(image.content_type, "image/svg+xml");
        assert_eq!(image.extension, "svg");
    }

    #[test]
    fn test_png_data_url() {
        let image = decode_image("data:image/PNG;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.extension, "png");
        assert_eq!(&image.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_bare_base64_defaults_to_svg() {
        let image = decode_image("  PHN2Zz48L3N2Zz4=  ").unwrap();
        assert_eq!(image.bytes, b"<svg></svg>");
        assert_eq!(image.extension, "svg");
    }

    #[test]
    fn test_line_wrapped_payload() {
        let image = decode_image("data:image/svg+xml;base64,PHN2Zz48\nL3N2Zz4=").unwrap();
        assert_eq!(image.bytes, b"<svg></svg>");
    }

    #[test]
    fn test_invalid_inputs() {
        let cases = [
            "data:image/svg+xml;base64",
            "data:image/svg+xml,<svg></svg>",
            "data:text/html;base64,PGgxPg==",
            "data:image/svg+xml;base64,not base64!!",
            "data:image/svg+xml;base64,",
            "%%%",
        ];
        for input in cases {
            let err = decode_image(input).unwrap_err();
            assert!(matches!(err, ShopError::InvalidImage(_)), "input={input}");
        }
    }
}
