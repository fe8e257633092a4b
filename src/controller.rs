//! Popup state machine for the voting page.
//!
//! The page script does not carry its own copy of the rules: `ui` embeds
//! the table produced by [`transition_table`] and the script looks rows up.

use crate::models::Vote;
use serde::Serialize;
use std::{fmt, str::FromStr};

pub const GOOD_VOTE_MESSAGE: &str = "Correct! This is a Good Dog.";
pub const BAD_VOTE_MESSAGE: &str = "Correct! This is a Good Dog. All dogs are Good Dogs.";
pub const FAILURE_MESSAGE: &str = "Sorry, there was a problem recording your vote.";

/// What a vote click does to the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopupMode {
    Always,
    BadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureFeedback {
    Popup,
    Silent,
}

impl FromStr for PopupMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(PopupMode::Always),
            "bad-only" | "bad_only" => Ok(PopupMode::BadOnly),
            other => Err(format!("unknown popup mode '{other}'")),
        }
    }
}

impl FromStr for FailureFeedback {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "popup" => Ok(FailureFeedback::Popup),
            "silent" => Ok(FailureFeedback::Silent),
            other => Err(format!("unknown failure feedback '{other}'")),
        }
    }
}

impl fmt::Display for PopupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupMode::Always => f.write_str("always"),
            PopupMode::BadOnly => f.write_str("bad-only"),
        }
    }
}

impl fmt::Display for FailureFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureFeedback::Popup => f.write_str("popup"),
            FailureFeedback::Silent => f.write_str("silent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    Idle,
    PopupShown { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Overlay,
    Escape,
}

impl PopupState {
    pub fn key(&self) -> &'static str {
        match self {
            PopupState::Idle => "idle",
            PopupState::PopupShown { .. } => "shown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    VoteClicked(Vote),
    VoteFailed,
    Close(CloseTrigger),
}

impl Event {
    pub const ALL: [Event; 6] = [
        Event::VoteClicked(Vote::Good),
        Event::VoteClicked(Vote::Bad),
        Event::VoteFailed,
        Event::Close(CloseTrigger::Button),
        Event::Close(CloseTrigger::Overlay),
        Event::Close(CloseTrigger::Escape),
    ];

    /// Name the page script dispatches.
    pub fn key(self) -> &'static str {
        match self {
            Event::VoteClicked(Vote::Good) => "vote-good",
            Event::VoteClicked(Vote::Bad) => "vote-bad",
            Event::VoteFailed => "vote-failed",
            Event::Close(CloseTrigger::Button) => "close-button",
            Event::Close(CloseTrigger::Overlay) => "close-overlay",
            Event::Close(CloseTrigger::Escape) => "close-escape",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Effect {
    SubmitVote(Vote),
    ShowPopup(String),
    HidePopup,
    LoadNextImage,
    LogFailure,
}

pub fn vote_message(vote: Vote) -> &'static str {
    match vote {
        Vote::Good => GOOD_VOTE_MESSAGE,
        Vote::Bad => BAD_VOTE_MESSAGE,
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    state: PopupState,
    popup_mode: PopupMode,
    failure_feedback: FailureFeedback,
}

impl Controller {
    pub fn new(popup_mode: PopupMode, failure_feedback: FailureFeedback) -> Self {
        Self {
            state: PopupState::Idle,
            popup_mode,
            failure_feedback,
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match (&self.state, event) {
            (PopupState::Idle, Event::VoteClicked(vote)) => {
                let show = match self.popup_mode {
                    PopupMode::Always => true,
                    PopupMode::BadOnly => vote == Vote::Bad,
                };
                if show {
                    let message = vote_message(vote).to_string();
                    self.state = PopupState::PopupShown {
                        message: message.clone(),
                    };
                    vec![Effect::SubmitVote(vote), Effect::ShowPopup(message)]
                } else {
                    vec![Effect::SubmitVote(vote), Effect::LoadNextImage]
                }
            }
            // The buttons sit behind the overlay while it is shown.
            (PopupState::PopupShown { .. }, Event::VoteClicked(_)) => Vec::new(),
            (PopupState::PopupShown { .. }, Event::Close(_)) => {
                self.state = PopupState::Idle;
                vec![Effect::HidePopup, Effect::LoadNextImage]
            }
            (PopupState::Idle, Event::Close(_)) => Vec::new(),
            (_, Event::VoteFailed) => match self.failure_feedback {
                FailureFeedback::Popup => {
                    let message = FAILURE_MESSAGE.to_string();
                    self.state = PopupState::PopupShown {
                        message: message.clone(),
                    };
                    vec![Effect::ShowPopup(message)]
                }
                FailureFeedback::Silent => vec![Effect::LogFailure],
            },
        }
    }
}

/// One row of the table the page script executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: &'static str,
    pub event: &'static str,
    pub to: &'static str,
    pub effects: Vec<Effect>,
}

/// Runs the controller over every (state, event) pair.
pub fn transition_table(popup_mode: PopupMode, failure_feedback: FailureFeedback) -> Vec<Transition> {
    // The popup text never influences a transition, so one shown state stands for all.
    let starts = [
        PopupState::Idle,
        PopupState::PopupShown {
            message: GOOD_VOTE_MESSAGE.to_string(),
        },
    ];

    let mut table = Vec::with_capacity(starts.len() * Event::ALL.len());
    for start in starts {
        for event in Event::ALL {
            let mut controller = Controller {
                state: start.clone(),
                popup_mode,
                failure_feedback,
            };
            let effects = controller.handle(event);
            table.push(Transition {
                from: start.key(),
                event: event.key(),
                to: controller.state.key(),
                effects,
            });
        }
    }
    table
}

/// Settings handed to the page script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub popup_mode: PopupMode,
    pub failure_feedback: FailureFeedback,
    pub transitions: Vec<Transition>,
}

impl ClientSettings {
    pub fn new(popup_mode: PopupMode, failure_feedback: FailureFeedback) -> Self {
        Self {
            popup_mode,
            failure_feedback,
            transitions: transition_table(popup_mode, failure_feedback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(message: &str) -> PopupState {
        PopupState::PopupShown {
            message: message.to_string(),
        }
    }

    #[test]
    fn always_mode_shows_popup_for_every_vote() {
        for vote in [Vote::Good, Vote::Bad] {
            let mut controller = Controller::new(PopupMode::Always, FailureFeedback::Popup);
            let effects = controller.handle(Event::VoteClicked(vote));
            assert_eq!(
                effects,
                vec![
                    Effect::SubmitVote(vote),
                    Effect::ShowPopup(vote_message(vote).to_string())
                ]
            );
            assert_eq!(controller.state(), &shown(vote_message(vote)));
        }
    }

    #[test]
    fn bad_only_mode_skips_popup_for_good_votes() {
        let mut controller = Controller::new(PopupMode::BadOnly, FailureFeedback::Popup);
        let effects = controller.handle(Event::VoteClicked(Vote::Good));
        assert_eq!(effects, vec![Effect::SubmitVote(Vote::Good), Effect::LoadNextImage]);
        assert_eq!(controller.state(), &PopupState::Idle);

        controller.handle(Event::VoteClicked(Vote::Bad));
        assert_eq!(controller.state(), &shown(BAD_VOTE_MESSAGE));
    }

    #[test]
    fn every_close_trigger_returns_to_idle_and_loads_next_image() {
        for trigger in [CloseTrigger::Button, CloseTrigger::Overlay, CloseTrigger::Escape] {
            let mut controller = Controller::new(PopupMode::Always, FailureFeedback::Popup);
            controller.handle(Event::VoteClicked(Vote::Bad));
            let effects = controller.handle(Event::Close(trigger));
            assert_eq!(effects, vec![Effect::HidePopup, Effect::LoadNextImage]);
            assert_eq!(controller.state(), &PopupState::Idle);
        }
    }

    #[test]
    fn close_while_idle_does_nothing() {
        let mut controller = Controller::new(PopupMode::Always, FailureFeedback::Popup);
        assert!(controller.handle(Event::Close(CloseTrigger::Escape)).is_empty());
        assert_eq!(controller.state(), &PopupState::Idle);
    }

    #[test]
    fn votes_are_ignored_while_popup_is_shown() {
        let mut controller = Controller::new(PopupMode::Always, FailureFeedback::Popup);
        controller.handle(Event::VoteClicked(Vote::Good));
        assert!(controller.handle(Event::VoteClicked(Vote::Bad)).is_empty());
        assert_eq!(controller.state(), &shown(GOOD_VOTE_MESSAGE));
    }

    #[test]
    fn failure_popup_replaces_the_vote_message() {
        let mut controller = Controller::new(PopupMode::Always, FailureFeedback::Popup);
        controller.handle(Event::VoteClicked(Vote::Good));
        let effects = controller.handle(Event::VoteFailed);
        assert_eq!(effects, vec![Effect::ShowPopup(FAILURE_MESSAGE.to_string())]);
        assert_eq!(controller.state(), &shown(FAILURE_MESSAGE));
    }

    #[test]
    fn silent_failure_only_logs() {
        let mut controller = Controller::new(PopupMode::BadOnly, FailureFeedback::Silent);
        controller.handle(Event::VoteClicked(Vote::Good));
        let effects = controller.handle(Event::VoteFailed);
        assert_eq!(effects, vec![Effect::LogFailure]);
        assert_eq!(controller.state(), &PopupState::Idle);
    }

    #[test]
    fn modes_parse_from_env_style_strings() {
        assert_eq!("bad-only".parse::<PopupMode>().unwrap(), PopupMode::BadOnly);
        assert_eq!("ALWAYS".parse::<PopupMode>().unwrap(), PopupMode::Always);
        assert_eq!("silent".parse::<FailureFeedback>().unwrap(), FailureFeedback::Silent);
        assert!("sometimes".parse::<PopupMode>().is_err());
    }

    #[test]
    fn client_settings_serialize_in_kebab_case() {
        let settings = ClientSettings::new(PopupMode::BadOnly, FailureFeedback::Silent);
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["popupMode"], "bad-only");
        assert_eq!(value["failureFeedback"], "silent");
        assert_eq!(value["transitions"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn table_covers_every_state_and_event() {
        let table = transition_table(PopupMode::Always, FailureFeedback::Popup);
        for from in ["idle", "shown"] {
            for event in Event::ALL {
                let rows = table
                    .iter()
                    .filter(|row| row.from == from && row.event == event.key())
                    .count();
                assert_eq!(rows, 1, "{from} + {}", event.key());
            }
        }
    }

    #[test]
    fn table_rows_match_controller_in_every_mode() {
        for mode in [PopupMode::Always, PopupMode::BadOnly] {
            for feedback in [FailureFeedback::Popup, FailureFeedback::Silent] {
                for row in transition_table(mode, feedback).iter().filter(|row| row.from == "idle") {
                    let event = Event::ALL.into_iter().find(|event| event.key() == row.event).unwrap();
                    let mut controller = Controller::new(mode, feedback);
                    assert_eq!(controller.handle(event), row.effects);
                    assert_eq!(controller.state().key(), row.to);
                }
            }
        }
    }

    #[test]
    fn effects_serialize_with_type_and_value() {
        let submit = serde_json::to_value(Effect::SubmitVote(Vote::Bad)).unwrap();
        assert_eq!(submit, serde_json::json!({ "type": "submit-vote", "value": "bad" }));
        let next = serde_json::to_value(Effect::LoadNextImage).unwrap();
        assert_eq!(next, serde_json::json!({ "type": "load-next-image" }));
    }
}
