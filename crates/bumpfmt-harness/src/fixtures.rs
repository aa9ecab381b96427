//! Fixture loading.
//!
//! A fixture file is a JSON [`FixtureSet`]. Each case names a template, its
//! arguments as tagged values (`{"int": 5}`, `{"str": "hi"}`), optional
//! config overrides, and either the expected output or the expected error
//! kind.

use std::path::Path;
use std::str::FromStr;

use bumpfmt_core::{Arg, ConfigError, FloatStyle, FormatConfig, WidthPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or interpreting fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fixture json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad argument '{raw}': {reason}")]
    BadArg { raw: String, reason: String },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// One tagged argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureArg {
    Int(i32),
    Uint(u32),
    Double(f64),
    Str(String),
    /// Promoted to `int`.
    Char(char),
    Ptr(usize),
}

impl FixtureArg {
    #[must_use]
    pub fn to_arg(&self) -> Arg<'_> {
        match self {
            Self::Int(v) => Arg::Int(*v),
            Self::Uint(v) => Arg::Uint(*v),
            Self::Double(v) => Arg::Double(*v),
            Self::Str(s) => Arg::from(s.as_str()),
            Self::Char(c) => Arg::from(*c),
            Self::Ptr(p) => Arg::Ptr(*p),
        }
    }
}

/// Parses the CLI form `kind:value`, e.g. `int:-5`, `uint:0x10`, `str:hi`.
impl FromStr for FixtureArg {
    type Err = FixtureError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let bad = |reason: &str| FixtureError::BadArg {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };
        let (kind, value) = raw
            .split_once(':')
            .ok_or_else(|| bad("expected kind:value"))?;
        match kind.to_ascii_lowercase().as_str() {
            "int" | "d" => value.parse().map(Self::Int).map_err(|_| bad("not an i32")),
            "uint" | "u" => parse_u64(value)
                .and_then(|v| u32::try_from(v).ok())
                .map(Self::Uint)
                .ok_or_else(|| bad("not a u32")),
            "double" | "f" => value.parse().map(Self::Double).map_err(|_| bad("not an f64")),
            "str" | "s" => Ok(Self::Str(value.to_string())),
            "char" | "c" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(bad("expected exactly one character")),
                }
            }
            "ptr" | "p" => parse_u64(value)
                .and_then(|v| usize::try_from(v).ok())
                .map(Self::Ptr)
                .ok_or_else(|| bad("not an address")),
            _ => Err(bad("unknown kind (int|uint|double|str|char|ptr)")),
        }
    }
}

fn parse_u64(raw: &str) -> Option<u64> {
    let s = raw.trim().replace('_', "");
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Per-case overrides of the default [`FormatConfig`] and arena.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    /// `apply` or `ignore`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// `reference` or `padded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_size: Option<usize>,
    /// Arena capacity in bytes; the default arena otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena_capacity: Option<usize>,
    /// Run the template this many times on one arena and check the last call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<usize>,
}

impl ConfigOverrides {
    /// Build the effective config.
    pub fn to_config(&self) -> Result<FormatConfig, ConfigError> {
        let mut config = FormatConfig::default();
        if let Some(width) = &self.width {
            config = config.with_width(WidthPolicy::from_str_loose(width));
        }
        if let Some(float) = &self.float {
            config = config.with_float_style(FloatStyle::from_str_loose(float));
        }
        if let Some(precision) = self.precision {
            config = config.with_float_precision(precision)?;
        }
        if let Some(size) = self.scratch_size {
            config = config.with_scratch_size(size)?;
        }
        Ok(config)
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// `FmtError::kind` of the expected failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
}

impl FixtureCase {
    /// Expectation rendered the way the runner reports actual results.
    #[must_use]
    pub fn expected(&self) -> String {
        match (&self.expected_output, &self.expected_error) {
            (_, Some(kind)) => format!("error:{kind}"),
            (Some(output), None) => output.clone(),
            (None, None) => String::new(),
        }
    }
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Case family name.
    pub family: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_args_deserialize() {
        let args: Vec<FixtureArg> = serde_json::from_str(
            r#"[{"int":-5},{"uint":7},{"double":1.5},{"str":"hi"},{"char":"A"},{"ptr":4096}]"#,
        )
        .unwrap();
        assert_eq!(
            args,
            [
                FixtureArg::Int(-5),
                FixtureArg::Uint(7),
                FixtureArg::Double(1.5),
                FixtureArg::Str("hi".into()),
                FixtureArg::Char('A'),
                FixtureArg::Ptr(4096),
            ]
        );
        assert_eq!(args[4].to_arg(), Arg::Int(65));
        assert_eq!(args[3].to_arg(), Arg::Str(b"hi"));
    }

    #[test]
    fn cli_args_parse() {
        assert_eq!("int:-5".parse::<FixtureArg>().unwrap(), FixtureArg::Int(-5));
        assert_eq!("uint:0xff".parse::<FixtureArg>().unwrap(), FixtureArg::Uint(255));
        assert_eq!("s:a:b".parse::<FixtureArg>().unwrap(), FixtureArg::Str("a:b".into()));
        assert_eq!("c:x".parse::<FixtureArg>().unwrap(), FixtureArg::Char('x'));
        assert_eq!("p:0x10".parse::<FixtureArg>().unwrap(), FixtureArg::Ptr(16));
        assert_eq!("f:2.5".parse::<FixtureArg>().unwrap(), FixtureArg::Double(2.5));
        assert!("uint:-1".parse::<FixtureArg>().is_err());
        assert!("uint:4294967296".parse::<FixtureArg>().is_err());
        assert!("char:xy".parse::<FixtureArg>().is_err());
        assert!("blob:1".parse::<FixtureArg>().is_err());
        let err = "nocolon".parse::<FixtureArg>().unwrap_err();
        assert_eq!(err.to_string(), "bad argument 'nocolon': expected kind:value");
    }

    #[test]
    fn overrides_build_config() {
        let overrides = ConfigOverrides {
            width: Some("ignore".into()),
            float: Some("padded".into()),
            precision: Some(3),
            ..ConfigOverrides::default()
        };
        let config = overrides.to_config().unwrap();
        assert_eq!(config.width, WidthPolicy::Ignore);
        assert_eq!(config.float_style, FloatStyle::Padded);
        assert_eq!(config.float_precision, 3);

        let bad = ConfigOverrides {
            precision: Some(12),
            ..ConfigOverrides::default()
        };
        assert!(bad.to_config().is_err());
    }

    #[test]
    fn fixture_set_roundtrips_through_json() {
        let set = FixtureSet::from_json(
            r#"{"version":"v1","family":"printf","cases":[
                {"name":"hex","template":"%x","args":[{"uint":255}],"expected_output":"ff"},
                {"name":"short","template":"%d","expected_error":"missing_argument"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(set.cases.len(), 2);
        assert!(set.cases[1].args.is_empty());
        assert_eq!(set.cases[0].expected(), "ff");
        assert_eq!(set.cases[1].expected(), "error:missing_argument");

        let again = FixtureSet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(again.cases[0].args, set.cases[0].args);
    }
}
