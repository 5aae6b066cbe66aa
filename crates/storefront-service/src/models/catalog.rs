//! 商品目录常量：尺码、颜色、尺码表

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// T 恤尺码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShirtSize {
    #[serde(rename = "XS")]
    ExtraSmall,
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
    #[serde(rename = "2X")]
    DoubleExtraLarge,
}

impl ShirtSize {
    /// 按从小到大排列
    pub const ALL: [ShirtSize; 6] = [
        Self::ExtraSmall,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::ExtraLarge,
        Self::DoubleExtraLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtraSmall => "XS",
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::ExtraLarge => "XL",
            Self::DoubleExtraLarge => "2X",
        }
    }
}

impl fmt::Display for ShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShirtSize {
    type Err = String;

    /// 忽略大小写和首尾空白
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid size '{}'. Expected one of: {}",
                    s.trim(),
                    Self::ALL.map(|size| size.as_str()).join(", ")
                )
            })
    }
}

/// 可选的 T 恤底色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShirtColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// 未指定颜色时使用的底色
pub const DEFAULT_COLOR: &str = "Classic Black";

pub const PALETTE: [ShirtColor; 5] = [
    ShirtColor { name: "Classic Black", hex: "#000000" },
    ShirtColor { name: "Crisp White", hex: "#FFFFFF" },
    ShirtColor { name: "Navy Blue", hex: "#1E3A8A" },
    ShirtColor { name: "Crimson Red", hex: "#DC2626" },
    ShirtColor { name: "Forest Green", hex: "#059669" },
];

impl ShirtColor {
    /// 按名称查找颜色
    ///
    /// 完整名称和末尾单词（如 `White`）都能匹配，忽略大小写。
    pub fn find(name: &str) -> Option<&'static ShirtColor> {
        let name = name.trim();
        PALETTE.iter().find(|color| {
            color.name.eq_ignore_ascii_case(name)
                || color
                    .name
                    .rsplit(' ')
                    .next()
                    .is_some_and(|last| last.eq_ignore_ascii_case(name))
        })
    }
}

/// 存储的颜色值对应的色值，不在调色板中时原样返回
pub fn color_hex(stored: &str) -> String {
    ShirtColor::find(stored)
        .map(|color| color.hex.to_string())
        .unwrap_or_else(|| stored.to_string())
}

/// 尺码表单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    #[default]
    #[serde(alias = "in")]
    Inches,
    Cm,
}

/// 单个尺码的量体数据
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeMeasurement {
    pub size: ShirtSize,
    pub chest: &'static str,
    pub length: &'static str,
    pub shoulder: &'static str,
}

const fn measurement(
    size: ShirtSize,
    chest: &'static str,
    length: &'static str,
    shoulder: &'static str,
) -> SizeMeasurement {
    SizeMeasurement {
        size,
        chest,
        length,
        shoulder,
    }
}

const GUIDE_INCHES: [SizeMeasurement; 6] = [
    measurement(ShirtSize::ExtraSmall, "31-33", "27", "16.5"),
    measurement(ShirtSize::Small, "34-36", "28", "17"),
    measurement(ShirtSize::Medium, "37-40", "29", "18"),
    measurement(ShirtSize::Large, "41-44", "30", "19"),
    measurement(ShirtSize::ExtraLarge, "45-48", "31", "20"),
    measurement(ShirtSize::DoubleExtraLarge, "49-52", "32", "21"),
];

const GUIDE_CM: [SizeMeasurement; 6] = [
    measurement(ShirtSize::ExtraSmall, "79-84", "68.5", "42"),
    measurement(ShirtSize::Small, "86-91", "71", "43"),
    measurement(ShirtSize::Medium, "94-101", "73.5", "46"),
    measurement(ShirtSize::Large, "104-112", "76", "48"),
    measurement(ShirtSize::ExtraLarge, "114-122", "79", "51"),
    measurement(ShirtSize::DoubleExtraLarge, "124-132", "81", "53"),
];

/// 指定单位的尺码表
pub fn size_guide(unit: SizeUnit) -> &'static [SizeMeasurement] {
    match unit {
        SizeUnit::Inches => &GUIDE_INCHES,
        SizeUnit::Cm => &GUIDE_CM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parsing() {
        assert_eq!("XS".parse::<ShirtSize>(), Ok(ShirtSize::ExtraSmall));
        assert_eq!(" xl ".parse::<ShirtSize>(), Ok(ShirtSize::ExtraLarge));
        assert_eq!("2x".parse::<ShirtSize>(), Ok(ShirtSize::DoubleExtraLarge));

        let err = "XXL".parse::<ShirtSize>().unwrap_err();
        assert!(err.contains("XS, S, M, L, XL, 2X"));
        assert!("".parse::<ShirtSize>().is_err());
    }

    #[test]
    fn test_size_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&ShirtSize::DoubleExtraLarge).unwrap(),
            r#""2X""#
        );
        assert_eq!(ShirtSize::Medium.to_string(), "M");
    }

    #[test]
    fn test_color_lookup() {
        assert_eq!(color_hex("Navy Blue"), "#1E3A8A");
        assert_eq!(color_hex("crisp white"), "#FFFFFF");
        assert_eq!(color_hex("White"), "#FFFFFF");
        assert_eq!(color_hex("#123456"), "#123456");
        assert_eq!(color_hex("Mustard"), "Mustard");
    }

    #[test]
    fn test_size_guide_covers_every_size_in_order() {
        for unit in [SizeUnit::Inches, SizeUnit::Cm] {
            let sizes: Vec<ShirtSize> = size_guide(unit).iter().map(|m| m.size).collect();
            assert_eq!(sizes, ShirtSize::ALL.to_vec());
        }
        assert_eq!(size_guide(SizeUnit::Inches)[2].chest, "37-40");
        assert_eq!(size_guide(SizeUnit::Cm)[5].shoulder, "53");
    }

    #[test]
    fn test_size_unit_parsing() {
        assert_eq!(serde_json::from_str::<SizeUnit>(r#""cm""#).unwrap(), SizeUnit::Cm);
        assert_eq!(serde_json::from_str::<SizeUnit>(r#""in""#).unwrap(), SizeUnit::Inches);
        assert!(serde_json::from_str::<SizeUnit>(r#""mm""#).is_err());
    }
}
