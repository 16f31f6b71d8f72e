use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    /// Tab-separated rows, no styling, no header.
    Plain,
    Json,
}

/// Renders a value for the non-JSON output formats.
pub trait Formattable {
    fn format_human(&self) -> String;
    fn format_plain(&self) -> String;

    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Human | OutputFormat::Json => self.format_human(),
        }
    }
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

impl<T> RobotResponse<T> {
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

pub fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let payload = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(payload)
}

pub fn emit_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    println!("{}", to_json(value, compact)?);
    Ok(())
}

/// Print `value` in the context's output format. Robot output carries the
/// envelope unless `[robot] include_metadata` is off.
pub fn emit<T>(ctx: &AppContext, value: &T, warnings: Vec<String>) -> Result<()>
where
    T: Formattable + Serialize,
{
    match ctx.output_format {
        OutputFormat::Json => {
            let compact = ctx.config.robot.compact();
            if ctx.config.robot.include_metadata {
                emit_json(&robot_ok(value).with_warnings(warnings), compact)
            } else {
                emit_json(value, compact)
            }
        }
        format => {
            for warning in &warnings {
                eprintln!("{} {warning}", style("warning:").yellow().bold());
            }
            println!("{}", value.format(format));
            Ok(())
        }
    }
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 18,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines
            .push(format!("{} {value}", style(padded).dim()));
        self
    }

    /// `kv` that skips empty values.
    pub fn kv_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) if !value.is_empty() => self.kv(key, value),
            _ => self,
        }
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        self.lines.join("\n")
    }
}

/// Tab-joined row with tabs and newlines in fields flattened to spaces.
#[must_use]
pub fn tsv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| field.replace(['\t', '\n'], " "))
        .collect::<Vec<_>>()
        .join("\t")
}
