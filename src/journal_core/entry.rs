//! The Day Entry record and its optional parts.
//!
//! Field names serialize in camelCase so a journal exported by the mobile app
//! loads unchanged.

use crate::lunar::{self, MoonPhase};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    #[serde(alias = "model")]
    Assistant,
}

/// One turn of a reflection conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Progress of a reflection or an energy seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    #[default]
    Pending,
    #[serde(alias = "chatting")]
    InProgress,
    Done,
}

/// Today's tarot reflection session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayAwareness {
    pub card_id: String,
    /// Conversation in the order it happened. Append only.
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub complexity_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_title: Option<String>,
}

impl TodayAwareness {
    /// A fresh session for `card_id`, already in progress.
    pub fn begin(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            chat_history: Vec::new(),
            status: ProgressStatus::InProgress,
            complexity_score: 0,
            selected_title: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == ProgressStatus::Done
    }

    /// Messages written by the user, in order.
    pub fn user_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.chat_history
            .iter()
            .filter(|m| m.role == ChatRole::User)
    }

    /// Character count (Unicode scalar values) of everything the user wrote in this session.
    pub fn user_char_count(&self) -> usize {
        self.user_messages().map(|m| m.text.chars().count()).sum()
    }
}

/// A small goal planted for the following day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomorrowSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    pub energy_seed: String,
    #[serde(default)]
    pub blessing_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_suggestion: Option<String>,
    #[serde(default)]
    pub status: ProgressStatus,
}

/// A logged mindfulness session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeLog {
    pub title: String,
    #[serde(default)]
    pub duration_minutes: u32,
    /// False when the session was interrupted.
    #[serde(default)]
    pub completed: bool,
}

/// The five sense channels used by calibration exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenseChannel {
    Visual,
    Audio,
    Touch,
    Smell,
    Taste,
}

impl SenseChannel {
    pub const ALL: [SenseChannel; 5] = [
        SenseChannel::Visual,
        SenseChannel::Audio,
        SenseChannel::Touch,
        SenseChannel::Smell,
        SenseChannel::Taste,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SenseChannel::Visual => "visual",
            SenseChannel::Audio => "audio",
            SenseChannel::Touch => "touch",
            SenseChannel::Smell => "smell",
            SenseChannel::Taste => "taste",
        }
    }
}

impl fmt::Display for SenseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SenseChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SenseChannel::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown sense channel '{}', expected one of: visual, audio, touch, smell, taste",
                    s
                )
            })
    }
}

/// A logged five-senses calibration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensoryLog {
    pub sense: SenseChannel,
    pub title: String,
    pub content: String,
}

/// Everything journaled on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub date: NaiveDate,
    /// Cached phase for `date`; `Journal` keeps it in agreement with the calculator.
    /// Records without one are filled in on load.
    #[serde(default)]
    pub moon_phase: MoonPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_awareness: Option<TodayAwareness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow_seed: Option<TomorrowSeed>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub practices: Vec<PracticeLog>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensory_logs: Vec<SensoryLog>,
}

impl DayEntry {
    /// An empty entry for `date` with its phase computed.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            moon_phase: lunar::phase_for(date),
            today_awareness: None,
            tomorrow_seed: None,
            practices: Vec::new(),
            sensory_logs: Vec::new(),
        }
    }

    /// The finished reflection, if there is one.
    pub fn completed_reflection(&self) -> Option<&TodayAwareness> {
        self.today_awareness.as_ref().filter(|a| a.is_done())
    }

    /// Depth score of the reflection, 0 when there is none.
    pub fn complexity_score(&self) -> u32 {
        self.today_awareness
            .as_ref()
            .map_or(0, |a| a.complexity_score)
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.today_awareness
            .as_ref()
            .and_then(|a| a.selected_title.as_deref())
    }

    pub fn has_practice(&self) -> bool {
        !self.practices.is_empty()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_blank(&self) -> bool {
        self.today_awareness.is_none()
            && self.tomorrow_seed.is_none()
            && self.practices.is_empty()
            && self.sensory_logs.is_empty()
    }
}
