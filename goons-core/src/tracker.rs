//! The "Goons Tracker" chat bot.
use serde::{Deserialize, Serialize};

use crate::RecordStorage;
use crate::constants::LOG_PREFIX;
use crate::error::QueryDataError;
use crate::status::{LocationQueryService, LocationStatus};

pub const QUERY_ERROR_REPLY: &str = "Error retrieving location data. Please try again later.";

pub const ROTATION_EXPLANATION: &str = "The Goons stay on a map for a variable amount of time. \
As time passes, the chance of them switching to a new map increases. \
They will rotate to a new map at the end of a raid based on this chance. \
Use goons track to see where they are currently and their rotation chance.";

pub const HELP_REPLY: &str = "Unrecognized command, please type 'goons track' to receive details of The Goon's location. \
Or type 'goons rotation' if you need an explanation for their rotation mechanic.";

/// Member category the host shows next to the bot's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberCategory {
    Default,
    Sherpa,
}

/// Profile the bot presents in the host's dialogue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBotInfo {
    pub id: String,
    pub aid: u32,
    pub level: u32,
    pub member_category: MemberCategory,
    pub nickname: String,
    pub side: String,
}

impl ChatBotInfo {
    #[must_use]
    pub fn goons_tracker() -> Self {
        Self {
            id: "674d96b02225f02fff47b3be".to_string(),
            aid: 777,
            level: 1,
            member_category: MemberCategory::Sherpa,
            nickname: "Goons Tracker".to_string(),
            side: "Usec".to_string(),
        }
    }
}

/// Commands the bot understands. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Track,
    Rotation,
    Unknown,
}

impl ChatCommand {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "goons track" => Self::Track,
            "goons rotation" => Self::Rotation,
            _ => Self::Unknown,
        }
    }
}

/// Answers chat messages sent to the bot.
#[derive(Debug, Clone)]
pub struct GoonsTracker<S> {
    info: ChatBotInfo,
    status: LocationQueryService<S>,
}

impl<S> GoonsTracker<S>
where
    S: RecordStorage,
{
    #[must_use]
    pub fn new(status: LocationQueryService<S>) -> Self {
        Self {
            info: ChatBotInfo::goons_tracker(),
            status,
        }
    }

    #[must_use]
    pub const fn info(&self) -> &ChatBotInfo {
        &self.info
    }

    /// Reply text for a chat message received at `now`.
    #[must_use]
    pub fn handle_message(&self, text: &str, now: i64) -> String {
        match ChatCommand::parse(text) {
            ChatCommand::Track => render_track(self.status.status(now)),
            ChatCommand::Rotation => ROTATION_EXPLANATION.to_string(),
            ChatCommand::Unknown => HELP_REPLY.to_string(),
        }
    }
}

/// Chat text for a status query result.
#[must_use]
pub fn render_track(result: Result<LocationStatus, QueryDataError>) -> String {
    match result {
        Ok(status) => format!(
            "Location: {}\nLast Seen: {} minutes ago\nRotation Chance: {:.2}%\n{}",
            status.location_label(),
            status.minutes_since_last_seen,
            status.rotation_chance_percent,
            status.last_seen_display
        ),
        Err(err) => {
            log::warn!("{LOG_PREFIX} Error in track command: {err}");
            QUERY_ERROR_REPLY.to_string()
        }
    }
}
