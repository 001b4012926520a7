//! Device-agnostic input events
//!
//! Keyboard keys and pointer buttons both collapse onto the same small event
//! set. The driver turns events into [`SessionCommand`]s, except `Quit`, which
//! it handles itself.

use std::collections::VecDeque;

use crate::sim::{Session, SessionCommand, Steer};

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    TogglePause,
    Resume,
    Reset,
    ChangeSkin,
    ToggleDayNight,
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
}

impl InputEvent {
    /// Pointer press: the half of the world it lands in picks the direction
    pub fn pointer_down(x: f32, world_width: f32) -> Self {
        if x < world_width / 2.0 {
            InputEvent::MoveLeftStart
        } else {
            InputEvent::MoveRightStart
        }
    }

    /// Pointer release stops horizontal movement
    pub fn pointer_up() -> Self {
        InputEvent::MoveRightStop
    }

    /// The session command this event maps to (None for Quit)
    ///
    /// Any move-stop event zeroes horizontal velocity regardless of which
    /// direction is currently held.
    pub fn command(&self) -> Option<SessionCommand> {
        let command = match self {
            InputEvent::Quit => return None,
            InputEvent::TogglePause => SessionCommand::TogglePause,
            InputEvent::Resume => SessionCommand::Resume,
            InputEvent::Reset => SessionCommand::Reset,
            InputEvent::ChangeSkin => SessionCommand::ChangeSkin,
            InputEvent::ToggleDayNight => SessionCommand::ToggleDayNight,
            InputEvent::MoveLeftStart => SessionCommand::Steer(Steer::Left),
            InputEvent::MoveRightStart => SessionCommand::Steer(Steer::Right),
            InputEvent::MoveLeftStop | InputEvent::MoveRightStop => {
                SessionCommand::Steer(Steer::Stop)
            }
        };
        Some(command)
    }

    /// Parse a key name (as reported by the host window layer)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "escape" | "q" => Some(InputEvent::Quit),
            "space" => Some(InputEvent::Resume),
            "p" => Some(InputEvent::TogglePause),
            "r" => Some(InputEvent::Reset),
            "s" => Some(InputEvent::ChangeSkin),
            "t" => Some(InputEvent::ToggleDayNight),
            "left" | "a" => Some(InputEvent::MoveLeftStart),
            "right" | "d" => Some(InputEvent::MoveRightStart),
            _ => None,
        }
    }

    /// Key release; only the movement keys produce an event
    pub fn from_key_release(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "left" | "a" => Some(InputEvent::MoveLeftStop),
            "right" | "d" => Some(InputEvent::MoveRightStop),
            _ => None,
        }
    }
}

/// Anything that can feed events into the loop, once per tick
pub trait InputSource {
    /// Events that arrived since the last poll, oldest first
    fn poll(&mut self, session: &Session) -> Vec<InputEvent>;
}

/// Pre-recorded events, one batch per tick
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<Vec<InputEvent>>,
    /// Emit Quit once the script runs dry
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
            quit_when_done: false,
        }
    }

    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _session: &Session) -> Vec<InputEvent> {
        match self.ticks.pop_front() {
            Some(events) => events,
            None if self.quit_when_done => vec![InputEvent::Quit],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WorldConfig;

    #[test]
    fn test_pointer_halves() {
        assert_eq!(InputEvent::pointer_down(10.0, 400.0), InputEvent::MoveLeftStart);
        assert_eq!(InputEvent::pointer_down(199.9, 400.0), InputEvent::MoveLeftStart);
        assert_eq!(InputEvent::pointer_down(200.0, 400.0), InputEvent::MoveRightStart);
        assert_eq!(
            InputEvent::pointer_up().command(),
            Some(SessionCommand::Steer(Steer::Stop))
        );
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputEvent::from_key("Space"), Some(InputEvent::Resume));
        assert_eq!(InputEvent::from_key("A"), Some(InputEvent::MoveLeftStart));
        assert_eq!(InputEvent::from_key("right"), Some(InputEvent::MoveRightStart));
        assert_eq!(InputEvent::from_key("x"), None);
        assert_eq!(InputEvent::from_key_release("d"), Some(InputEvent::MoveRightStop));
        assert_eq!(InputEvent::from_key_release("p"), None);
    }

    #[test]
    fn test_quit_has_no_command() {
        assert_eq!(InputEvent::Quit.command(), None);
        assert_eq!(
            InputEvent::MoveLeftStop.command(),
            Some(SessionCommand::Steer(Steer::Stop))
        );
    }

    #[test]
    fn test_scripted_input_replays_then_quits() {
        let session = Session::new(WorldConfig::default(), 1);
        let mut input = ScriptedInput::new([
            vec![InputEvent::Resume],
            vec![],
            vec![InputEvent::MoveLeftStart, InputEvent::MoveLeftStop],
        ])
        .quit_when_done();

        assert_eq!(input.poll(&session), vec![InputEvent::Resume]);
        assert!(input.poll(&session).is_empty());
        assert_eq!(input.poll(&session).len(), 2);
        assert_eq!(input.poll(&session), vec![InputEvent::Quit]);
        assert!(input.is_empty());
    }
}
