use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use heck::ToUpperCamelCase;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Literal suffix dropped from a file name before it is matched.
const STRIPPED_SUFFIX: &str = "icon";

// <prefix>_<name>_<size>_<color>, unanchored; groups 3, 5 and 7 are used.
static FILE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z]*)(_)(.*?)(_)(.*?)(_)([a-z]*)").expect("icon file name pattern")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error("{} is not valid UTF-8", .0.display())]
    NonUtf8(PathBuf),
    #[error("{} has no parent directory to take a category from", .0.display())]
    NoCategory(PathBuf),
    #[error("file name {file_name:?} does not match <prefix>_<name>_<size>_<color>")]
    PatternMismatch { file_name: String },
}

/// Where generated files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub output_root: PathBuf,
    pub index_file: String,
    pub markup_extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("src/icon"),
            index_file: "index.js".to_string(),
            markup_extension: "jsx".to_string(),
        }
    }
}

impl Layout {
    pub fn category_path(&self, category: &str, name: &str) -> PathBuf {
        self.output_root.join(category).join(name)
    }
}

/// Everything known about one source icon. Serialized, it is the context
/// handed to every template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    pub source_path: PathBuf,
    pub raw_file_name: String,
    pub category: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub component_name: String,
    pub theme_color: Option<&'static str>,
    pub css_selector: String,
    pub category_path: PathBuf,
    pub index_file_path: PathBuf,
    pub css_file_path: PathBuf,
    pub markup_file_path: PathBuf,
}

impl IconDescriptor {
    pub fn parse(source_path: &Path, layout: &Layout) -> Result<Self, ParseError> {
        let file_name = source_path
            .file_name()
            .ok_or_else(|| ParseError::NoFileName(source_path.to_path_buf()))?
            .to_str()
            .ok_or_else(|| ParseError::NonUtf8(source_path.to_path_buf()))?;
        let raw_file_name = file_name
            .strip_suffix(STRIPPED_SUFFIX)
            .unwrap_or(file_name)
            .to_string();

        let category = source_path
            .parent()
            .and_then(Path::file_name)
            .ok_or_else(|| ParseError::NoCategory(source_path.to_path_buf()))?
            .to_str()
            .ok_or_else(|| ParseError::NonUtf8(source_path.to_path_buf()))?
            .to_string();

        let Some(captures) = FILE_NAME_PATTERN.captures(&raw_file_name) else {
            return Err(ParseError::PatternMismatch {
                file_name: raw_file_name,
            });
        };
        let name = captures[3].to_string();
        let size = captures[5].to_string();
        let color = captures[7].to_string();

        let theme_color = theme_color(&color);
        let category_path = layout.category_path(&category, &name);
        Ok(Self {
            component_name: component_name(&name),
            css_selector: css_selector(&name, &size, theme_color),
            index_file_path: category_path.join(&layout.index_file),
            css_file_path: category_path.join(format!("{name}.css")),
            markup_file_path: category_path
                .join(format!("{name}.{}", layout.markup_extension)),
            category_path,
            source_path: source_path.to_path_buf(),
            raw_file_name,
            category,
            name,
            size,
            color,
            theme_color,
        })
    }
}

pub fn component_name(name: &str) -> String {
    format!("Icon{}", name.to_upper_camel_case())
}

/// Themed class for monochrome icons; `None` marks a multi-color icon.
pub fn theme_color(color: &str) -> Option<&'static str> {
    match color {
        "white" => Some("alfa-on-color"),
        "black" => Some("alfa-on-white"),
        _ => None,
    }
}

pub fn css_selector(name: &str, size: &str, theme_color: Option<&str>) -> String {
    let mut selector = format!(".icon_size_{size}.icon_name_{name}");
    match theme_color {
        Some(theme) => {
            selector.push_str(".icon_theme_");
            selector.push_str(theme);
        }
        None => selector.push_str(".icon_colored"),
    }
    selector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(path: &str) -> Result<IconDescriptor, ParseError> {
        IconDescriptor::parse(Path::new(path), &Layout::default())
    }

    #[test]
    fn extracts_fields_regardless_of_prefix() {
        for prefix in ["icon", "glyph", "X", ""] {
            let icon = parse(&format!("icons/ui/{prefix}_arrow_16_black.svg")).unwrap();
            assert_eq!(icon.name, "arrow", "prefix {prefix:?}");
            assert_eq!(icon.size, "16", "prefix {prefix:?}");
            assert_eq!(icon.color, "black", "prefix {prefix:?}");
        }
    }

    #[test]
    fn category_is_parent_directory() {
        let icon = parse("vendor/icons/banking/nested/icon_card_24_white.svg").unwrap();
        assert_eq!(icon.category, "nested");

        let icon = parse("vendor/icons/banking/icon_card_24_white.svg").unwrap();
        assert_eq!(icon.category, "banking");
        assert_eq!(icon.raw_file_name, "icon_card_24_white.svg");
    }

    #[test]
    fn component_name_is_pascal_case() {
        assert_eq!(component_name("arrow"), "IconArrow");
        assert_eq!(component_name("arrow-back"), "IconArrowBack");
        assert_eq!(component_name("card-visa"), "IconCardVisa");
        assert_eq!(parse("ui/icon_arrow-down_16_black.svg").unwrap().component_name, "IconArrowDown");
    }

    #[test]
    fn theme_color_only_for_white_and_black() {
        assert_eq!(theme_color("white"), Some("alfa-on-color"));
        assert_eq!(theme_color("black"), Some("alfa-on-white"));
        assert_eq!(theme_color("color"), None);
        assert_eq!(theme_color("White"), None);
        assert_eq!(theme_color(""), None);
    }

    #[test]
    fn css_selector_picks_theme_or_colored() {
        let black = parse("ui/icon_close_24_black.svg").unwrap();
        assert_eq!(
            black.css_selector,
            ".icon_size_24.icon_name_close.icon_theme_alfa-on-white"
        );

        let colored = parse("brand/icon_visa_32_color.svg").unwrap();
        assert_eq!(colored.theme_color, None);
        assert_eq!(colored.css_selector, ".icon_size_32.icon_name_visa.icon_colored");
    }

    #[test]
    fn output_paths_follow_category_and_name() {
        let layout = Layout {
            output_root: PathBuf::from("out"),
            index_file: "index.ts".to_string(),
            markup_extension: "tsx".to_string(),
        };
        let icon = IconDescriptor::parse(Path::new("src/ui/icon_arrow_16_white.svg"), &layout).unwrap();
        assert_eq!(icon.category_path, PathBuf::from("out/ui/arrow"));
        assert_eq!(icon.index_file_path, PathBuf::from("out/ui/arrow/index.ts"));
        assert_eq!(icon.css_file_path, PathBuf::from("out/ui/arrow/arrow.css"));
        assert_eq!(icon.markup_file_path, PathBuf::from("out/ui/arrow/arrow.tsx"));
    }

    #[test]
    fn trailing_icon_suffix_is_stripped() {
        let icon = parse("ui/glyph_star_16_black_icon").unwrap();
        assert_eq!(icon.raw_file_name, "glyph_star_16_black_");
        assert_eq!(icon.color, "black");
    }

    #[test]
    fn mismatched_name_is_an_error() {
        assert_eq!(
            parse("ui/logo.svg"),
            Err(ParseError::PatternMismatch {
                file_name: "logo.svg".to_string()
            })
        );
        assert_eq!(
            parse("icon_arrow_16_black.svg"),
            Err(ParseError::NoCategory(PathBuf::from("icon_arrow_16_black.svg")))
        );
    }
}
