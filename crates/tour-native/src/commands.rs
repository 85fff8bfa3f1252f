// Line commands understood by the terminal walkthrough.

use tour_core::{parse_angle, SphericalPosition, TourError};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Select a shown marker by id, or the n-th (1-based) navigation hotspot.
    Go(String),
    /// List markers in view, optionally turning first.
    Look(Option<SphericalPosition>),
    Rooms,
    Where,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  go <marker>        select a marker by id (or just type the id)
  <n>                select the n-th hotspot shown
  look [yaw [pitch]] list markers in view, e.g. `look 45deg`
  rooms              list every room
  where              show the current room
  help               this text
  quit               leave the tour";

/// `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, TourError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let command = match (head, rest.as_slice()) {
        ("go", []) => Command::Help,
        ("go", args) => Command::Go(args.join(" ")),
        ("look", []) => Command::Look(None),
        ("look", [yaw]) => Command::Look(Some(SphericalPosition::new(parse_angle(yaw)?, 0.0))),
        ("look", [yaw, pitch, ..]) => Command::Look(Some(SphericalPosition::new(
            parse_angle(yaw)?,
            parse_angle(pitch)?,
        ))),
        ("rooms", _) => Command::Rooms,
        ("where", _) => Command::Where,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        _ => Command::Go(line.trim().to_string()),
    };
    Ok(Some(command))
}

/// 1-based hotspot number typed by the user.
#[inline]
pub fn hotspot_number(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().filter(|n| *n >= 1).map(|n| n - 1)
}
