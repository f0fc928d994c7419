//! Text commands typed into the command line
//!
//! Everything the user types is validated here; the spectrogram engine only
//! ever sees well-formed numbers.
//!
//! ```text
//! full                     enter fullscreen
//! mic                      open the microphone
//! mic off                  close the microphone
//! shuffle                  randomise where the grid is split
//! a                        show box a and stop looping
//! a off                    hide box a (clears it)
//! a loop                   freeze box a
//! a fft 12                 4096-sample windows (exponent clamped to 6..=14)
//! a gain 200               amplitude multiplier
//! a period 2.5             seconds across the box (at least 0.1)
//! a rgb 100 50 25          colour weights in percent
//! a layout columns         storage layout (columns | continuous)
//! ```

use thiserror::Error;

use crate::spectrogram::{LayoutKind, MIN_PERIOD_SECONDS};

/// Names of the spectrogram boxes, in display order
pub const BOX_NAMES: [&str; 4] = ["a", "b", "c", "d"];

/// Errors that can occur while parsing a command
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown box '{0}'")]
    UnknownBox(String),

    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("Period must be at least {min}s, got {0}", min = MIN_PERIOD_SECONDS)]
    PeriodTooShort(f32),

    #[error("Unknown layout '{0}'")]
    UnknownLayout(String),
}

/// A change to one spectrogram box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxAction {
    /// Visible and not looping
    Show,
    Hide,
    Loop,
    WindowExponent(i64),
    Gain(f32),
    Period(f32),
    Rgb([f32; 3]),
    Layout(LayoutKind),
}

/// A parsed command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Fullscreen,
    OpenMic,
    CloseMic,
    Shuffle,
    Box { index: usize, action: BoxAction },
}

fn parse_number<T: std::str::FromStr>(
    arg: Option<&str>,
    what: &'static str,
) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(what))?;
    arg.parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}

/// Parse one line of user input
pub fn parse(input: &str) -> Result<Command, CommandError> {
    let mut parts = input.split_whitespace();
    let head = parts.next().ok_or(CommandError::Empty)?;

    match head {
        "full" => return Ok(Command::Fullscreen),
        "shuffle" => return Ok(Command::Shuffle),
        "mic" => {
            return match parts.next() {
                None => Ok(Command::OpenMic),
                Some("off") => Ok(Command::CloseMic),
                Some(other) => Err(CommandError::UnknownAction(other.to_string())),
            }
        }
        _ => {}
    }

    let index = BOX_NAMES
        .iter()
        .position(|name| *name == head)
        .ok_or_else(|| CommandError::UnknownBox(head.to_string()))?;

    let action = match parts.next() {
        None => BoxAction::Show,
        Some("off") => BoxAction::Hide,
        Some("loop") => BoxAction::Loop,
        Some("fft") => BoxAction::WindowExponent(parse_number(parts.next(), "window exponent")?),
        Some("gain") => BoxAction::Gain(parse_number(parts.next(), "gain")?),
        Some("period") => {
            let seconds: f32 = parse_number(parts.next(), "period")?;
            if !(seconds >= MIN_PERIOD_SECONDS && seconds.is_finite()) {
                return Err(CommandError::PeriodTooShort(seconds));
            }
            BoxAction::Period(seconds)
        }
        Some("rgb") => BoxAction::Rgb([
            parse_number(parts.next(), "red")?,
            parse_number(parts.next(), "green")?,
            parse_number(parts.next(), "blue")?,
        ]),
        Some("layout") => {
            let name = parts.next().ok_or(CommandError::MissingArgument("layout"))?;
            BoxAction::Layout(
                LayoutKind::from_name(name)
                    .ok_or_else(|| CommandError::UnknownLayout(name.to_string()))?,
            )
        }
        Some(other) => return Err(CommandError::UnknownAction(other.to_string())),
    };

    Ok(Command::Box { index, action })
}
