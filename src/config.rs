//! `KEY=VALUE` maze configuration file.
//!
//! ```text
//! # comment
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! OUTPUT_FILE=maze.txt
//! PERFECT=True
//! SEED=42
//! ```

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::maze::Coord;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: invalid format (missing '='): {content}")]
    MissingSeparator { line: usize, content: String },

    #[error("line {line}: {key} cannot be empty")]
    EmptyValue { line: usize, key: String },

    #[error("line {line}: {key} {reason}")]
    InvalidValue {
        line: usize,
        key: String,
        reason: &'static str,
    },

    #[error("missing required config key: {0}")]
    MissingKey(&'static str),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("WIDTH and HEIGHT must be greater than 0")]
    NonPositiveSize,

    #[error("WIDTH and HEIGHT must be at most {}", MAX_DIMENSION)]
    SizeTooLarge,

    #[error("{key} ({}, {}) is outside maze bounds", .coord.0, .coord.1)]
    OutOfBounds { key: &'static str, coord: (i64, i64) },

    #[error("ENTRY and EXIT cannot be the same")]
    EntryIsExit,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub entry: Coord,
    pub exit: Coord,
    pub output_file: PathBuf,
    pub perfect: bool,
    pub seed: Option<u64>,
}

/// A single parsed, not yet validated, value.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Int(i64),
    Pair(i64, i64),
    Bool(bool),
    Text(String),
}

/// Largest accepted WIDTH or HEIGHT.
pub const MAX_DIMENSION: i64 = 1_000;

const REQUIRED_KEYS: [&str; 6] = ["WIDTH", "HEIGHT", "ENTRY", "EXIT", "OUTPUT_FILE", "PERFECT"];
const OPTIONAL_KEYS: [&str; 1] = ["SEED"];

fn invalid(line: usize, key: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        line,
        key: key.to_string(),
        reason,
    }
}

fn parse_value(line: usize, key: &str, raw: &str) -> Result<Value> {
    let int = |s: &str, reason| s.trim().parse::<i64>().map_err(|_| invalid(line, key, reason));
    match key {
        "WIDTH" | "HEIGHT" | "SEED" => Ok(Value::Int(int(raw, "must be an integer")?)),
        "ENTRY" | "EXIT" => {
            let parts = raw.split(',').collect::<Vec<_>>();
            let &[x, y] = parts.as_slice() else {
                return Err(invalid(line, key, "must be in format x,y"));
            };
            let reason = "coordinates must be integers";
            Ok(Value::Pair(int(x, reason)?, int(y, reason)?))
        }
        "PERFECT" => match raw.to_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid(line, key, "must be True or False")),
        },
        _ => Ok(Value::Text(raw.to_string())),
    }
}

impl MazeConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = text.parse::<MazeConfig>()?;
        tracing::debug!(?config, file = %path.display(), "config loaded");
        Ok(config)
    }

    fn from_values(mut values: HashMap<String, Value>) -> Result<Self> {
        if let Some(&missing) = REQUIRED_KEYS.iter().find(|k| !values.contains_key(**k)) {
            return Err(ConfigError::MissingKey(missing));
        }
        if let Some(unknown) = values
            .keys()
            .find(|k| !REQUIRED_KEYS.contains(&k.as_str()) && !OPTIONAL_KEYS.contains(&k.as_str()))
        {
            return Err(ConfigError::UnknownKey(unknown.clone()));
        }

        // Keys were matched to value kinds while parsing, so the shapes below hold
        let mut take = |key: &str| values.remove(key);
        let (Some(Value::Int(width)), Some(Value::Int(height))) = (take("WIDTH"), take("HEIGHT"))
        else {
            unreachable!("WIDTH and HEIGHT parse as integers");
        };
        let (Some(Value::Pair(ex, ey)), Some(Value::Pair(xx, xy))) = (take("ENTRY"), take("EXIT"))
        else {
            unreachable!("ENTRY and EXIT parse as pairs");
        };
        let Some(Value::Text(output_file)) = take("OUTPUT_FILE") else {
            unreachable!("OUTPUT_FILE parses as text");
        };
        let Some(Value::Bool(perfect)) = take("PERFECT") else {
            unreachable!("PERFECT parses as a boolean");
        };
        let seed = match take("SEED") {
            Some(Value::Int(seed)) => Some(seed as u64),
            _ => None,
        };

        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveSize);
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ConfigError::SizeTooLarge);
        }
        let in_bounds = |x: i64, y: i64| (0..width).contains(&x) && (0..height).contains(&y);
        if !in_bounds(ex, ey) {
            return Err(ConfigError::OutOfBounds {
                key: "ENTRY",
                coord: (ex, ey),
            });
        }
        if !in_bounds(xx, xy) {
            return Err(ConfigError::OutOfBounds {
                key: "EXIT",
                coord: (xx, xy),
            });
        }
        if (ex, ey) == (xx, xy) {
            return Err(ConfigError::EntryIsExit);
        }

        Ok(MazeConfig {
            width: width as usize,
            height: height as usize,
            entry: (ex as usize, ey as usize),
            exit: (xx as usize, xy as usize),
            output_file: PathBuf::from(output_file),
            perfect,
            seed,
        })
    }
}

impl std::str::FromStr for MazeConfig {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self> {
        let mut values = HashMap::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, raw)) = line.split_once('=') else {
                return Err(ConfigError::MissingSeparator {
                    line: line_no,
                    content: line.to_string(),
                });
            };
            let key = key.trim().to_uppercase();
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(ConfigError::EmptyValue { line: line_no, key });
            }
            let value = parse_value(line_no, &key, raw)?;
            values.insert(key, value);
        }
        MazeConfig::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "\
# maze settings
WIDTH=20
height = 15

ENTRY=0,0
EXIT= 19 , 14
OUTPUT_FILE=maze.txt
PERFECT=False
SEED=42
";

    fn with_line(key: &str, line: &str) -> String {
        VALID
            .lines()
            .map(|l| {
                if l.to_uppercase().starts_with(key) {
                    line
                } else {
                    l
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_parse_valid() {
        let config = VALID.parse::<MazeConfig>().unwrap();
        assert_eq!(
            config,
            MazeConfig {
                width: 20,
                height: 15,
                entry: (0, 0),
                exit: (19, 14),
                output_file: PathBuf::from("maze.txt"),
                perfect: false,
                seed: Some(42),
            }
        );
    }

    #[test]
    fn test_seed_is_optional() {
        let config = with_line("SEED", "# no seed").parse::<MazeConfig>().unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_format_errors() {
        assert!(matches!(
            with_line("WIDTH", "WIDTH 20").parse::<MazeConfig>(),
            Err(ConfigError::MissingSeparator { line: 2, .. })
        ));
        assert!(matches!(
            with_line("WIDTH", "WIDTH=").parse::<MazeConfig>(),
            Err(ConfigError::EmptyValue { .. })
        ));
        assert!(matches!(
            with_line("WIDTH", "WIDTH=wide").parse::<MazeConfig>(),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            with_line("ENTRY", "ENTRY=1,2,3").parse::<MazeConfig>(),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            with_line("ENTRY", "ENTRY=a,2").parse::<MazeConfig>(),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            with_line("PERFECT", "PERFECT=yes").parse::<MazeConfig>(),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            with_line("SEED", "SEED=0x10").parse::<MazeConfig>(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_key_errors() {
        assert!(matches!(
            with_line("OUTPUT_FILE", "").parse::<MazeConfig>(),
            Err(ConfigError::MissingKey("OUTPUT_FILE"))
        ));
        assert!(matches!(
            format!("{VALID}COLOR=red\n").parse::<MazeConfig>(),
            Err(ConfigError::UnknownKey(key)) if key == "COLOR"
        ));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            with_line("WIDTH", "WIDTH=0").parse::<MazeConfig>(),
            Err(ConfigError::NonPositiveSize)
        ));
        assert!(matches!(
            with_line("WIDTH", "WIDTH=100000").parse::<MazeConfig>(),
            Err(ConfigError::SizeTooLarge)
        ));
        assert!(matches!(
            with_line("HEIGHT", &format!("HEIGHT={}", MAX_DIMENSION + 1)).parse::<MazeConfig>(),
            Err(ConfigError::SizeTooLarge)
        ));
        assert!(with_line("HEIGHT", &format!("HEIGHT={MAX_DIMENSION}"))
            .parse::<MazeConfig>()
            .is_ok());
        assert!(matches!(
            with_line("ENTRY", "ENTRY=-1,0").parse::<MazeConfig>(),
            Err(ConfigError::OutOfBounds { key: "ENTRY", .. })
        ));
        assert!(matches!(
            with_line("EXIT", "EXIT=20,14").parse::<MazeConfig>(),
            Err(ConfigError::OutOfBounds { key: "EXIT", .. })
        ));
        assert!(matches!(
            with_line("EXIT", "EXIT=0,0").parse::<MazeConfig>(),
            Err(ConfigError::EntryIsExit)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            MazeConfig::load("/definitely/not/here.cfg"),
            Err(ConfigError::Read { .. })
        ));
    }
}
