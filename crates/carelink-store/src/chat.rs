use carelink_core::models::{AiAgent, ChatMessage, MessageId, MessagePatch};
use carelink_core::{CareError, Result};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Exclusive audio state. Recording and playback can never be active at
/// the same time; the illegal combination is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioActivity {
    #[default]
    Idle,
    Recording,
    Playing,
}

/// Change notifications broadcast after each effective mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEvent {
    MessagesChanged,
    AgentsChanged,
    CurrentAgentChanged,
    ActivityChanged,
    ListeningChanged,
    DraftChanged,
}

#[derive(Debug, Clone, Default)]
struct ChatState {
    messages: Arc<Vec<ChatMessage>>,
    agents: Arc<Vec<AiAgent>>,
    current_agent: Option<AiAgent>,
    activity: AudioActivity,
    listening: bool,
    draft: String,
}

/// Store for the conversation panel: the message sequence, the agent
/// roster, and the voice-interaction state.
pub struct ChatStore {
    state: RwLock<ChatState>,
    events: broadcast::Sender<ChatEvent>,
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self { state: RwLock::new(ChatState::default()), events }
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ChatEvent) {
        let _ = self.events.send(event);
    }

    // --- messages ---

    pub fn set_messages(&self, messages: Vec<ChatMessage>) {
        self.state.write().unwrap().messages = Arc::new(messages);
        self.emit(ChatEvent::MessagesChanged);
    }

    /// Append-only; arrival order is preserved and never reordered
    pub fn add_message(&self, message: ChatMessage) {
        {
            let mut state = self.state.write().unwrap();
            let mut next = state.messages.as_ref().clone();
            next.push(message);
            state.messages = Arc::new(next);
        }
        self.emit(ChatEvent::MessagesChanged);
    }

    /// Silent no-op when the id is absent
    pub fn update_message(&self, id: &MessageId, patch: &MessagePatch) {
        let changed = {
            let mut state = self.state.write().unwrap();
            if state.messages.iter().any(|m| &m.id == id) {
                let mut next = state.messages.as_ref().clone();
                for message in next.iter_mut().filter(|m| &m.id == id) {
                    patch.apply(message);
                }
                state.messages = Arc::new(next);
                true
            } else {
                false
            }
        };
        if changed {
            self.emit(ChatEvent::MessagesChanged);
        }
    }

    pub fn clear_messages(&self) {
        self.state.write().unwrap().messages = Arc::new(Vec::new());
        self.emit(ChatEvent::MessagesChanged);
    }

    // --- agents ---

    pub fn set_agents(&self, agents: Vec<AiAgent>) {
        self.state.write().unwrap().agents = Arc::new(agents);
        self.emit(ChatEvent::AgentsChanged);
    }

    pub fn set_current_agent(&self, agent: Option<AiAgent>) {
        self.state.write().unwrap().current_agent = agent;
        self.emit(ChatEvent::CurrentAgentChanged);
    }

    // --- audio activity ---

    /// Fails unless idle: recording is exclusive with playback
    pub fn begin_recording(&self) -> Result<()> {
        self.begin_activity(AudioActivity::Recording)
    }

    /// Fails unless idle: playback is exclusive with recording
    pub fn begin_playback(&self) -> Result<()> {
        self.begin_activity(AudioActivity::Playing)
    }

    fn begin_activity(&self, next: AudioActivity) -> Result<()> {
        {
            let mut state = self.state.write().unwrap();
            match state.activity {
                AudioActivity::Idle => state.activity = next,
                AudioActivity::Recording => {
                    return Err(CareError::invalid_operation("recording already in progress"));
                }
                AudioActivity::Playing => {
                    return Err(CareError::invalid_operation("playback already in progress"));
                }
            }
        }
        self.emit(ChatEvent::ActivityChanged);
        Ok(())
    }

    /// Idempotent; only a recording transitions back to idle
    pub fn finish_recording(&self) {
        self.finish_activity(AudioActivity::Recording);
    }

    /// Idempotent; only a playback transitions back to idle
    pub fn finish_playback(&self) {
        self.finish_activity(AudioActivity::Playing);
    }

    fn finish_activity(&self, from: AudioActivity) {
        let changed = {
            let mut state = self.state.write().unwrap();
            if state.activity == from {
                state.activity = AudioActivity::Idle;
                true
            } else {
                false
            }
        };
        if changed {
            self.emit(ChatEvent::ActivityChanged);
        }
    }

    // --- scalars ---

    pub fn set_listening(&self, listening: bool) {
        self.state.write().unwrap().listening = listening;
        self.emit(ChatEvent::ListeningChanged);
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.state.write().unwrap().draft = draft.into();
        self.emit(ChatEvent::DraftChanged);
    }

    // --- snapshots ---

    pub fn messages(&self) -> Arc<Vec<ChatMessage>> {
        Arc::clone(&self.state.read().unwrap().messages)
    }

    pub fn agents(&self) -> Arc<Vec<AiAgent>> {
        Arc::clone(&self.state.read().unwrap().agents)
    }

    pub fn current_agent(&self) -> Option<AiAgent> {
        self.state.read().unwrap().current_agent.clone()
    }

    pub fn activity(&self) -> AudioActivity {
        self.state.read().unwrap().activity
    }

    pub fn listening(&self) -> bool {
        self.state.read().unwrap().listening
    }

    pub fn draft(&self) -> String {
        self.state.read().unwrap().draft.clone()
    }

    // --- derived queries ---

    pub fn messages_from(&self, sender_id: &str) -> Vec<ChatMessage> {
        self.state
            .read()
            .unwrap()
            .messages
            .iter()
            .filter(|m| m.sender_id == sender_id)
            .cloned()
            .collect()
    }

    pub fn unread_messages(&self) -> Vec<ChatMessage> {
        self.state.read().unwrap().messages.iter().filter(|m| !m.read).cloned().collect()
    }

    /// Last element of the ordered sequence, if any
    pub fn last_message(&self) -> Option<ChatMessage> {
        self.state.read().unwrap().messages.last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelink_core::models::MessageKind;
    use chrono::Utc;

    fn message(id: &str, sender_id: &str, read: bool) -> ChatMessage {
        ChatMessage {
            id: MessageId::from(id),
            sender_id: sender_id.to_string(),
            sender_name: sender_id.to_string(),
            content: format!("message {id}"),
            kind: MessageKind::Text,
            sent_at: Utc::now(),
            read,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let store = ChatStore::new();
        store.add_message(message("m1", "user", true));
        store.add_message(message("m2", "agent", false));

        assert_eq!(store.last_message().unwrap().id, MessageId::from("m2"));
        let messages = store.messages();
        assert_eq!(messages[0].id, MessageId::from("m1"));
        assert_eq!(messages[1].id, MessageId::from("m2"));
    }

    #[test]
    fn test_last_message_empty() {
        assert!(ChatStore::new().last_message().is_none());
    }

    #[test]
    fn test_update_missing_message_leaves_collection_unchanged() {
        let store = ChatStore::new();
        store.add_message(message("m1", "user", false));
        let before = store.messages();

        store.update_message(&MessageId::from("missing-id"), &MessagePatch {
            read: Some(true),
            ..Default::default()
        });

        let after = store.messages();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 1);
        assert!(!after[0].read);
    }

    #[test]
    fn test_unread_filter() {
        let store = ChatStore::new();
        store.add_message(message("m1", "agent", true));
        store.add_message(message("m2", "agent", false));
        store.add_message(message("m3", "user", false));

        let unread = store.unread_messages();
        assert_eq!(unread.len(), 2);
        assert!(unread.iter().all(|m| !m.read));
    }

    #[test]
    fn test_messages_from_sender() {
        let store = ChatStore::new();
        store.add_message(message("m1", "agent", true));
        store.add_message(message("m2", "user", true));
        store.add_message(message("m3", "agent", true));

        assert_eq!(store.messages_from("agent").len(), 2);
        assert!(store.messages_from("nobody").is_empty());
    }

    #[test]
    fn test_clear_messages() {
        let store = ChatStore::new();
        store.add_message(message("m1", "user", true));
        store.clear_messages();

        assert!(store.messages().is_empty());
        assert!(store.last_message().is_none());
    }

    #[test]
    fn test_recording_excludes_playback() {
        let store = ChatStore::new();

        store.begin_recording().unwrap();
        assert_eq!(store.activity(), AudioActivity::Recording);

        assert!(store.begin_playback().is_err());
        assert!(store.begin_recording().is_err());

        store.finish_recording();
        assert_eq!(store.activity(), AudioActivity::Idle);

        store.begin_playback().unwrap();
        assert_eq!(store.activity(), AudioActivity::Playing);
    }

    #[test]
    fn test_finish_is_idempotent_and_scoped() {
        let store = ChatStore::new();

        // Finishing when idle is a no-op
        store.finish_recording();
        store.finish_playback();
        assert_eq!(store.activity(), AudioActivity::Idle);

        // Finishing the wrong activity does not interrupt the active one
        store.begin_playback().unwrap();
        store.finish_recording();
        assert_eq!(store.activity(), AudioActivity::Playing);

        store.finish_playback();
        store.finish_playback();
        assert_eq!(store.activity(), AudioActivity::Idle);
    }

    #[test]
    fn test_draft_and_listening_flags() {
        let store = ChatStore::new();

        store.set_draft("please call my daughter");
        store.set_listening(true);

        assert_eq!(store.draft(), "please call my daughter");
        assert!(store.listening());
    }
}
