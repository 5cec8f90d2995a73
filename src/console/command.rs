//! Line commands understood by the console.

use std::str::FromStr;

use rw_core::{DraftField, EventSlot};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Set { field: DraftField, value: String },
    Toggle { slot: EventSlot, present: bool },
    Next,
    Back,
    Submit,
    Restart,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Argument(String),
}

const SET_USAGE: &str = "set <field> <value>";
const TOGGLE_USAGE: &str = "toggle <event1|event2> <on|off>";

pub const HELP_TEXT: &str = "\
commands:
  set <field> <value>              fields: email fullName contactNumber address
                                   company designation firstTime (yes|no)
  toggle <event1|event2> <on|off>  add or remove an event
  next | back                      move between steps
  submit                           submit from the last step
  restart                          start a new registration after success
  show                             print the current state
  quit";

impl FromStr for ConsoleCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None if !rest.is_empty() => (rest, ""),
                    None => return Err(CommandError::Usage(SET_USAGE)),
                };
                let field = name.parse::<DraftField>().map_err(CommandError::Argument)?;
                Ok(ConsoleCommand::Set {
                    field,
                    value: value.to_string(),
                })
            }
            "toggle" => {
                let mut args = rest.split_whitespace();
                let (Some(slot), Some(state), None) = (args.next(), args.next(), args.next())
                else {
                    return Err(CommandError::Usage(TOGGLE_USAGE));
                };
                let slot = slot.parse::<EventSlot>().map_err(CommandError::Argument)?;
                let present = match state {
                    "on" => true,
                    "off" => false,
                    _ => return Err(CommandError::Usage(TOGGLE_USAGE)),
                };
                Ok(ConsoleCommand::Toggle { slot, present })
            }
            "next" => Ok(ConsoleCommand::Next),
            "back" => Ok(ConsoleCommand::Back),
            "submit" => Ok(ConsoleCommand::Submit),
            "restart" => Ok(ConsoleCommand::Restart),
            "show" => Ok(ConsoleCommand::Show),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_inner_whitespace_of_value() {
        let cmd: ConsoleCommand = "set address  12 St James's Square ".parse().unwrap();
        assert_eq!(
            cmd,
            ConsoleCommand::Set {
                field: DraftField::Address,
                value: "12 St James's Square".into()
            }
        );
    }

    #[test]
    fn set_without_value_clears_field() {
        let cmd: ConsoleCommand = "set company".parse().unwrap();
        assert_eq!(
            cmd,
            ConsoleCommand::Set {
                field: DraftField::Company,
                value: String::new()
            }
        );
    }

    #[test]
    fn set_rejects_unknown_field() {
        let err = "set nickname Ada".parse::<ConsoleCommand>().unwrap_err();
        assert!(matches!(err, CommandError::Argument(_)));
        assert_eq!(
            "set".parse::<ConsoleCommand>().unwrap_err(),
            CommandError::Usage(SET_USAGE)
        );
    }

    #[test]
    fn toggle_parses_slot_and_direction() {
        assert_eq!(
            "toggle event2 off".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Toggle {
                slot: EventSlot::Event2,
                present: false
            }
        );
        assert!("toggle event3 on".parse::<ConsoleCommand>().is_err());
        assert_eq!(
            "toggle event1 maybe".parse::<ConsoleCommand>().unwrap_err(),
            CommandError::Usage(TOGGLE_USAGE)
        );
    }

    #[test]
    fn bare_verbs_are_case_insensitive() {
        assert_eq!("NEXT".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Next);
        assert_eq!(" back ".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Back);
        assert_eq!("exit".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Quit);
        assert_eq!("   ".parse::<ConsoleCommand>().unwrap_err(), CommandError::Empty);
        assert!(matches!(
            "dance".parse::<ConsoleCommand>().unwrap_err(),
            CommandError::Unknown(verb) if verb == "dance"
        ));
    }
}
