use crate::error::{CrewError, Result};
use crate::model::Record;

const TOML_DELIMITER: &str = "+++";
const YAML_DELIMITER: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontmatterFormat {
    #[default]
    Toml,
    Yaml,
}

impl FrontmatterFormat {
    fn delimiter(self) -> &'static str {
        match self {
            FrontmatterFormat::Toml => TOML_DELIMITER,
            FrontmatterFormat::Yaml => YAML_DELIMITER,
        }
    }
}

/// Detect the frontmatter flavour from the opening delimiter.
pub fn detect_format(content: &str) -> Option<FrontmatterFormat> {
    let content = content.trim_start();
    if content.starts_with(TOML_DELIMITER) {
        Some(FrontmatterFormat::Toml)
    } else if content.starts_with(YAML_DELIMITER) {
        Some(FrontmatterFormat::Yaml)
    } else {
        None
    }
}

pub fn parse_markdown<T: Record>(content: &str) -> Result<T> {
    let format = detect_format(content)
        .ok_or_else(|| CrewError::Parse("Missing frontmatter delimiter".to_string()))?;
    parse_markdown_with_format(content, format)
}

pub fn parse_markdown_with_format<T: Record>(content: &str, format: FrontmatterFormat) -> Result<T> {
    let content = content.trim();
    let delimiter = format.delimiter();

    let after_first = content
        .strip_prefix(delimiter)
        .ok_or_else(|| CrewError::Parse("Missing frontmatter delimiter".to_string()))?;
    let end_index = closing_delimiter(after_first, delimiter)
        .ok_or_else(|| CrewError::Parse("Missing closing frontmatter delimiter".to_string()))?;

    let frontmatter = after_first[..end_index].trim();
    let body = after_first[end_index + 1 + delimiter.len()..].trim().to_string();

    let mut record: T = match format {
        FrontmatterFormat::Toml => toml::from_str(frontmatter)?,
        FrontmatterFormat::Yaml => serde_yaml::from_str(frontmatter)?,
    };
    record.set_body(body);

    Ok(record)
}

/// Byte offset of the newline that opens the closing delimiter line. The
/// delimiter only counts when it stands alone on its line, so the same
/// characters inside a value are left alone.
fn closing_delimiter(after_first: &str, delimiter: &str) -> Option<usize> {
    let needle = format!("\n{}", delimiter);
    after_first.match_indices(&needle).map(|(i, _)| i).find(|&i| {
        let rest = &after_first[i + needle.len()..];
        rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n")
    })
}

pub fn render_markdown<T: Record>(record: &T) -> Result<String> {
    render_markdown_with_format(record, FrontmatterFormat::Toml)
}

pub fn render_markdown_with_format<T: Record>(record: &T, format: FrontmatterFormat) -> Result<String> {
    let frontmatter = match format {
        FrontmatterFormat::Toml => toml::to_string(record)?,
        FrontmatterFormat::Yaml => serde_yaml::to_string(record)?,
    };
    let delimiter = format.delimiter();

    let mut output = String::new();
    output.push_str(delimiter);
    output.push('\n');
    output.push_str(frontmatter.trim());
    output.push('\n');
    output.push_str(delimiter);
    output.push('\n');

    if !record.body().is_empty() {
        output.push('\n');
        output.push_str(record.body());
        output.push('\n');
    }

    Ok(output)
}
