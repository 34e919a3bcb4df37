//! Narration events and event groups.
//!
//! An event is one message addressed to a set of recipients. Groups bundle
//! events (and nested groups) under an id and carry a duration the
//! orchestrator waits for before moving on. Adding a child group adds its
//! duration to the parent, so the root group of a night carries the total.

use serde::{Deserialize, Serialize};

/// Recipients of an event.
///
/// On the wire this is a list of external player ids, or `["*"]` for a
/// broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum EventTargets {
    /// Broadcast to every connected player.
    Everyone,
    /// Specific external player ids (not in-game numbers).
    Players(Vec<String>),
}

impl EventTargets {
    /// Wire value that marks a broadcast.
    pub const WILDCARD: &'static str = "*";

    /// Address a single player.
    pub fn player(id: impl Into<String>) -> Self {
        Self::Players(vec![id.into()])
    }

    /// Check whether an external id receives this event.
    #[must_use]
    pub fn includes(&self, id: &str) -> bool {
        match self {
            Self::Everyone => true,
            Self::Players(ids) => ids.iter().any(|i| i == id),
        }
    }
}

impl From<Vec<String>> for EventTargets {
    fn from(ids: Vec<String>) -> Self {
        if ids.iter().any(|id| id == Self::WILDCARD) {
            Self::Everyone
        } else {
            Self::Players(ids)
        }
    }
}

impl From<EventTargets> for Vec<String> {
    fn from(targets: EventTargets) -> Self {
        match targets {
            EventTargets::Everyone => vec![EventTargets::WILDCARD.to_string()],
            EventTargets::Players(ids) => ids,
        }
    }
}

/// A single narration message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub event_id: String,
    pub targets: EventTargets,
    pub message: String,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(event_id: impl Into<String>, targets: EventTargets, message: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            targets,
            message: message.into(),
        }
    }

    /// Create a broadcast event.
    pub fn broadcast(event_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(event_id, EventTargets::Everyone, message)
    }

    /// Create an event for one player.
    pub fn to_player(
        event_id: impl Into<String>,
        player_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(event_id, EventTargets::player(player_id), message)
    }
}

/// Either a leaf event or a nested group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventEntry {
    Event(GameEvent),
    Group(EventGroup),
}

/// A named, duration-tagged bundle of narration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGroup {
    pub group_id: Option<String>,
    pub duration: u32,
    pub events: Vec<EventEntry>,
}

impl EventGroup {
    /// Create an empty group with the given id.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            duration: super::duration::ZERO,
            events: Vec::new(),
        }
    }

    /// Set the group's own duration (builder pattern).
    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Add an event (builder pattern).
    #[must_use]
    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.push_event(event);
        self
    }

    /// Append a leaf event. Does not change the duration.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(EventEntry::Event(event));
    }

    /// Append a child group, adding its duration to this group's.
    pub fn push_group(&mut self, group: EventGroup) {
        self.duration += group.duration;
        self.events.push(EventEntry::Group(group));
    }

    /// Clear the group for reuse, optionally renaming it.
    pub fn reset(&mut self, new_id: Option<&str>) {
        self.events.clear();
        self.duration = super::duration::ZERO;
        if let Some(id) = new_id {
            self.group_id = Some(id.to_string());
        }
    }

    /// Check if nothing was emitted into this group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Find a direct child by group id or event id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&EventEntry> {
        self.events.iter().find(|entry| match entry {
            EventEntry::Group(group) => group.group_id.as_deref() == Some(id),
            EventEntry::Event(event) => event.event_id == id,
        })
    }

    /// Find a group anywhere below this one by id, depth first.
    #[must_use]
    pub fn find_group(&self, id: &str) -> Option<&EventGroup> {
        self.events.iter().find_map(|entry| match entry {
            EventEntry::Group(group) if group.group_id.as_deref() == Some(id) => Some(group),
            EventEntry::Group(group) => group.find_group(id),
            EventEntry::Event(_) => None,
        })
    }

    /// All leaf events below this group, in emission order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&GameEvent> {
        let mut out = Vec::new();
        self.collect_events(&mut out);
        out
    }

    fn collect_events<'a>(&'a self, out: &mut Vec<&'a GameEvent>) {
        for entry in &self.events {
            match entry {
                EventEntry::Event(event) => out.push(event),
                EventEntry::Group(group) => group.collect_events(out),
            }
        }
    }

    /// Check if an event with this id was emitted anywhere below.
    #[must_use]
    pub fn contains_event(&self, event_id: &str) -> bool {
        self.flatten().iter().any(|e| e.event_id == event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::duration;

    #[test]
    fn test_targets_wire_shape() {
        let everyone = serde_json::to_value(EventTargets::Everyone).unwrap();
        assert_eq!(everyone, serde_json::json!(["*"]));

        let some: EventTargets = serde_json::from_value(serde_json::json!(["u1", "u2"])).unwrap();
        assert_eq!(some, EventTargets::Players(vec!["u1".into(), "u2".into()]));

        let wild: EventTargets = serde_json::from_value(serde_json::json!(["*"])).unwrap();
        assert_eq!(wild, EventTargets::Everyone);
    }

    #[test]
    fn test_targets_includes() {
        assert!(EventTargets::Everyone.includes("anyone"));
        assert!(EventTargets::player("u1").includes("u1"));
        assert!(!EventTargets::player("u1").includes("u2"));
    }

    #[test]
    fn test_group_duration_sums_children() {
        let mut root = EventGroup::new("root");
        root.push_group(EventGroup::new("a").with_duration(duration::MAFIA_KILL));
        root.push_group(EventGroup::new("b").with_duration(duration::SHOOTOUT));
        root.push_group(EventGroup::new("c"));
        root.push_event(GameEvent::broadcast("loose", "no duration"));

        assert_eq!(root.duration, duration::MAFIA_KILL + duration::SHOOTOUT);
        assert_eq!(root.len(), 4);
    }

    #[test]
    fn test_reset() {
        let mut group = EventGroup::new("first").with_duration(3);
        group.push_event(GameEvent::broadcast("e", "m"));

        group.reset(Some("second"));
        assert!(group.is_empty());
        assert_eq!(group.duration, 0);
        assert_eq!(group.group_id.as_deref(), Some("second"));

        group.reset(None);
        assert_eq!(group.group_id.as_deref(), Some("second"));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut scratch = EventGroup::new("scratch");
        scratch.push_event(GameEvent::to_player("e", "u1", "hello"));

        let mut root = EventGroup::new("root");
        root.push_group(scratch.clone());
        scratch.reset(None);

        assert!(scratch.is_empty());
        assert!(root.contains_event("e"));
    }

    #[test]
    fn test_lookup() {
        let inner = EventGroup::new("inner").with_event(GameEvent::broadcast("deep", "x"));
        let mut middle = EventGroup::new("middle");
        middle.push_group(inner);
        let mut root = EventGroup::new("root");
        root.push_group(middle);
        root.push_event(GameEvent::broadcast("top", "y"));

        assert!(matches!(root.get_by_id("middle"), Some(EventEntry::Group(_))));
        assert!(matches!(root.get_by_id("top"), Some(EventEntry::Event(_))));
        assert!(root.get_by_id("inner").is_none());
        assert!(root.find_group("inner").is_some());

        let ids: Vec<_> = root.flatten().iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids, vec!["deep", "top"]);
    }

    #[test]
    fn test_group_wire_shape() {
        let group = EventGroup::new("shootout")
            .with_duration(3)
            .with_event(GameEvent::broadcast("bodyguard_shootout", "bang"));
        let json = serde_json::to_value(&group).unwrap();

        assert_eq!(json["groupId"], "shootout");
        assert_eq!(json["duration"], 3);
        assert_eq!(json["events"][0]["eventId"], "bodyguard_shootout");
        assert_eq!(json["events"][0]["targets"][0], "*");

        let back: EventGroup = serde_json::from_value(json).unwrap();
        assert_eq!(back, group);
    }
}
