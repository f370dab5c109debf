//! Per-channel state and the owning registry.
//!
//! Channels are created lazily the first time any component references
//! their name (an inbound message or an outbound join request) and are
//! never destroyed for the lifetime of the connection; rejoining reuses
//! the existing entry. The registry exclusively owns all [`Channel`]
//! instances and hands out references, never ownership.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::casemap::irc_to_lower;

/// Membership-mode sigils servers prepend to nicks in a names reply.
const MEMBER_SIGILS: &[char] = &['@', '+', '%', '&', '~'];

/// One `(sender, message)` entry in a channel transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranscriptEntry {
    pub sender: String,
    pub text: String,
    /// When the engine recorded the message.
    pub at: DateTime<Utc>,
}

/// One joined or observed channel.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    name: String,
    members: HashSet<String>,
    transcript: Vec<TranscriptEntry>,
}

impl Channel {
    fn new(name: &str) -> Channel {
        Channel {
            name: name.to_owned(),
            members: HashSet::new(),
            transcript: Vec::new(),
        }
    }

    /// The channel name as first seen (original casing).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nicknames currently believed present. Kept approximate: complete
    /// only once a full names listing has been merged.
    pub fn members(&self) -> &HashSet<String> {
        &self.members
    }

    pub fn has_member(&self, nick: &str) -> bool {
        self.members.contains(nick)
    }

    /// Ordered message history, mutated by the engine and read by the
    /// presentation layer.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }
}

/// Owning arena of per-channel state, keyed by case-normalized name.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelRegistry {
    channels: HashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> ChannelRegistry {
        ChannelRegistry::default()
    }

    /// Look up a channel without creating it.
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&irc_to_lower(name))
    }

    /// Look up or lazily create a channel. Idempotent under case
    /// variation: `#Chan` and `#chan` resolve to the same entry.
    pub fn get_or_create(&mut self, name: &str) -> &mut Channel {
        match self.channels.entry(irc_to_lower(name)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Channel::new(name)),
        }
    }

    /// Merge a (possibly partial) membership snapshot into a channel.
    ///
    /// Names replies may arrive split across several lines, so this
    /// merges rather than replaces. Membership-mode sigils (`@`, `+`, …)
    /// are stripped.
    pub fn merge_names<'a>(&mut self, channel: &str, nicks: impl Iterator<Item = &'a str>) {
        let channel = self.get_or_create(channel);
        for nick in nicks {
            let nick = nick.trim_start_matches(MEMBER_SIGILS);
            if !nick.is_empty() {
                channel.members.insert(nick.to_owned());
            }
        }
    }

    /// Record that a nick joined a channel.
    pub fn add_member(&mut self, channel: &str, nick: &str) {
        self.get_or_create(channel).members.insert(nick.to_owned());
    }

    /// Record that a nick left a channel. Unknown names are accepted and
    /// ignored, matching IRC's permissive semantics.
    pub fn remove_member(&mut self, channel: &str, nick: &str) {
        if let Some(channel) = self.channels.get_mut(&irc_to_lower(channel)) {
            channel.members.remove(nick);
        }
    }

    /// Remove a quitting nick from every channel's member set.
    pub fn remove_everywhere(&mut self, nick: &str) {
        for channel in self.channels.values_mut() {
            channel.members.remove(nick);
        }
    }

    /// Apply a network-wide nickname change to every member set.
    pub fn rename_member(&mut self, old: &str, new: &str) {
        for channel in self.channels.values_mut() {
            if channel.members.remove(old) {
                channel.members.insert(new.to_owned());
            }
        }
    }

    /// Append a message to a channel's transcript, creating the channel
    /// if it has not been seen before.
    pub fn record_message(&mut self, channel: &str, sender: &str, text: &str) {
        self.get_or_create(channel).transcript.push(TranscriptEntry {
            sender: sender.to_owned(),
            text: text.to_owned(),
            at: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Iterate over all known channels, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }
}
