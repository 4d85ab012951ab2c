use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use tilehop_core::input::{Control, InputEvent};

/// Commands sent from the input reader to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    Input(InputEvent),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownVerb(String),
    UnknownKey(String),
    MissingKey,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVerb(v) => write!(f, "unknown command `{v}`"),
            Self::UnknownKey(k) => write!(f, "unbound key `{k}`"),
            Self::MissingKey => write!(f, "missing key name"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parse one input line: `press <key>`, `release <key>` or `quit`.
///
/// Blank lines and lines starting with `#` yield `Ok(None)`. The key is
/// everything after the first space, so `press  ` (two spaces) names the
/// space bar.
pub fn parse_command(line: &str) -> Result<Option<FrameCommand>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, key) = match line.split_once(' ') {
        Some((verb, key)) => (verb, Some(key)),
        None => (line, None),
    };
    let press = match verb {
        "quit" => return Ok(Some(FrameCommand::Quit)),
        "press" => true,
        "release" => false,
        other => return Err(CommandError::UnknownVerb(other.to_string())),
    };
    let key = key.filter(|k| !k.is_empty()).ok_or(CommandError::MissingKey)?;
    let key = if key.trim().is_empty() { key } else { key.trim() };
    let control = Control::from_key(key).ok_or_else(|| CommandError::UnknownKey(key.to_string()))?;
    let event = if press {
        InputEvent::Press(control)
    } else {
        InputEvent::Release(control)
    };
    Ok(Some(FrameCommand::Input(event)))
}

/// Forward commands read from `reader` until EOF, `quit`, or the loop goes
/// away. Unparsable lines are logged and skipped.
pub async fn read_commands<R>(reader: R, tx: mpsc::UnboundedSender<FrameCommand>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Input read failed");
                break;
            },
        };
        match parse_command(&line) {
            Ok(Some(cmd)) => {
                if tx.send(cmd).is_err() || cmd == FrameCommand::Quit {
                    break;
                }
            },
            Ok(None) => {},
            Err(e) => tracing::warn!(line = %line, "Ignoring input: {e}"),
        }
    }
    tracing::debug!("Input stream closed");
}
