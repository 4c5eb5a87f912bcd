//! Scenario script parsing.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::content::PoiId;
use crate::scene::AttributeValue;
use crate::session::UiAction;

/// Errors from loading or parsing a scenario script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// `viewport W H`
    Viewport { width: f64, height: f64 },
    /// `anchor ID X Y`: pin a POI anchor at a screen position.
    Anchor { id: PoiId, x: f64, y: f64 },
    /// `ready`
    Ready,
    /// `found`
    Found,
    /// `lost`
    Lost,
    /// `pointer X Y`
    Pointer { x: f64, y: f64 },
    /// `tap ID`: direct hotspot tap.
    Tap(PoiId),
    /// `ui X Y W H`: register a control region.
    Ui {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// `click ACTION`
    Click(UiAction),
    /// `wait MS`
    Wait(Duration),
    /// `group VALUE`: overwrite the group visibility attribute.
    Group(AttributeValue),
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptCommand::Viewport { width, height } => write!(f, "viewport {} {}", width, height),
            ScriptCommand::Anchor { id, x, y } => write!(f, "anchor {} {} {}", id.0, x, y),
            ScriptCommand::Ready => write!(f, "ready"),
            ScriptCommand::Found => write!(f, "found"),
            ScriptCommand::Lost => write!(f, "lost"),
            ScriptCommand::Pointer { x, y } => write!(f, "pointer {} {}", x, y),
            ScriptCommand::Tap(id) => write!(f, "tap {}", id.0),
            ScriptCommand::Ui {
                x,
                y,
                width,
                height,
            } => write!(f, "ui {} {} {} {}", x, y, width, height),
            ScriptCommand::Click(action) => write!(f, "click {}", action),
            ScriptCommand::Wait(delay) => write!(f, "wait {}", delay.as_millis()),
            ScriptCommand::Group(AttributeValue::Missing) => write!(f, "group"),
            ScriptCommand::Group(AttributeValue::Bool(b)) => write!(f, "group {}", b),
            ScriptCommand::Group(AttributeValue::Text(s)) => write!(f, "group {}", s),
        }
    }
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptCommand>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

/// Parse script text. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let command = parse_line(line).map_err(|message| ScriptError::Syntax {
            line: index + 1,
            message,
        })?;
        commands.push(command);
    }

    Ok(commands)
}

fn parse_line(line: &str) -> Result<ScriptCommand, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("");
    let args: Vec<&str> = words.collect();

    let command = match verb {
        "viewport" => {
            let [w, h] = expect_args::<2>(verb, &args)?;
            ScriptCommand::Viewport {
                width: number(w)?,
                height: number(h)?,
            }
        }
        "anchor" => {
            let [id, x, y] = expect_args::<3>(verb, &args)?;
            ScriptCommand::Anchor {
                id: poi_id(id)?,
                x: number(x)?,
                y: number(y)?,
            }
        }
        "ready" => {
            expect_args::<0>(verb, &args)?;
            ScriptCommand::Ready
        }
        "found" => {
            expect_args::<0>(verb, &args)?;
            ScriptCommand::Found
        }
        "lost" => {
            expect_args::<0>(verb, &args)?;
            ScriptCommand::Lost
        }
        "pointer" => {
            let [x, y] = expect_args::<2>(verb, &args)?;
            ScriptCommand::Pointer {
                x: number(x)?,
                y: number(y)?,
            }
        }
        "tap" => {
            let [id] = expect_args::<1>(verb, &args)?;
            ScriptCommand::Tap(poi_id(id)?)
        }
        "ui" => {
            let [x, y, w, h] = expect_args::<4>(verb, &args)?;
            ScriptCommand::Ui {
                x: number(x)?,
                y: number(y)?,
                width: number(w)?,
                height: number(h)?,
            }
        }
        "click" => {
            let [action] = expect_args::<1>(verb, &args)?;
            ScriptCommand::Click(action.parse()?)
        }
        "wait" => {
            let [ms] = expect_args::<1>(verb, &args)?;
            let ms: u64 = ms
                .parse()
                .map_err(|_| format!("invalid duration '{}' (milliseconds)", ms))?;
            ScriptCommand::Wait(Duration::from_millis(ms))
        }
        "group" => ScriptCommand::Group(AttributeValue::parse(&args.join(" "))),
        other => return Err(format!("unknown command '{}'", other)),
    };

    Ok(command)
}

fn expect_args<'a, const N: usize>(verb: &str, args: &[&'a str]) -> Result<[&'a str; N], String> {
    <[&str; N]>::try_from(args).map_err(|_| {
        format!(
            "'{}' takes {} argument(s), got {}",
            verb,
            N,
            args.len()
        )
    })
}

fn number(word: &str) -> Result<f64, String> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid number '{}'", word))
}

fn poi_id(word: &str) -> Result<PoiId, String> {
    word.parse::<u32>()
        .map(PoiId)
        .map_err(|_| format!("invalid POI id '{}'", word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_script() {
        let text = "\
# set the stage
viewport 1000 800
anchor 1 100 100
ui 0 0 200 50   # close button

ready
found
click close-intro
wait 1000
pointer 140 100
tap 2
group maybe
lost
";
        let commands = parse_script(text).unwrap();
        assert_eq!(commands.len(), 11);
        assert_eq!(
            commands[0],
            ScriptCommand::Viewport {
                width: 1000.0,
                height: 800.0
            }
        );
        assert_eq!(
            commands[1],
            ScriptCommand::Anchor {
                id: PoiId(1),
                x: 100.0,
                y: 100.0
            }
        );
        assert_eq!(commands[5], ScriptCommand::Click(UiAction::CloseIntro));
        assert_eq!(commands[6], ScriptCommand::Wait(Duration::from_millis(1000)));
        assert_eq!(commands[8], ScriptCommand::Tap(PoiId(2)));
        assert_eq!(
            commands[9],
            ScriptCommand::Group(AttributeValue::Text("maybe".to_string()))
        );
    }

    #[test]
    fn test_error_reports_line_number() {
        let err = parse_script("ready\n\nwait soon\n").unwrap_err();
        match err {
            ScriptError::Syntax { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("soon"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        for bad in [
            "jump",
            "pointer 1",
            "pointer 1 2 3",
            "pointer x 2",
            "anchor -1 0 0",
            "click open",
            "found now",
            "viewport inf 100",
        ] {
            assert!(parse_script(bad).is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_group_values() {
        let commands = parse_script("group true\ngroup false\ngroup\n").unwrap();
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Group(AttributeValue::Bool(true)),
                ScriptCommand::Group(AttributeValue::Bool(false)),
                ScriptCommand::Group(AttributeValue::Missing),
            ]
        );
    }

    #[test]
    fn test_display_echoes_command() {
        let commands = parse_script("click close-poi\nwait 250\nanchor 3 300 350\n").unwrap();
        let echoed: Vec<String> = commands.iter().map(ToString::to_string).collect();
        assert_eq!(echoed, vec!["click close-poi", "wait 250", "anchor 3 300 350"]);
    }

    #[test]
    fn test_load_script_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_script(&dir.path().join("absent.script"));
        assert!(matches!(result, Err(ScriptError::Read { .. })));
    }
}
