//! A single conversation and its transcript.
//!
//! Every mutation and every snapshot goes through the conversation's own
//! mutex, so a snapshot never observes a partially appended turn and two
//! writers on the same conversation are strictly ordered.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use chatdesk_types::chat::{ConversationDetail, ConversationSummary, Turn, TurnRole};

use super::title::{derive_title, initial_title};
use super::transcript::TranscriptLog;

/// Mutable part of a conversation, guarded by [`Conversation::state`].
#[derive(Debug)]
struct ConversationState {
    title: String,
    updated_at: DateTime<Utc>,
    transcript: TranscriptLog,
}

/// One transcript with its title and timestamps.
///
/// `id` and `created_at` are immutable and readable without locking.
#[derive(Debug)]
pub struct Conversation {
    id: Uuid,
    created_at: DateTime<Utc>,
    state: Mutex<ConversationState>,
}

impl Conversation {
    /// Create an empty conversation stamped with the current time.
    pub fn new(title: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            state: Mutex::new(ConversationState {
                title: initial_title(title),
                updated_at: now,
                transcript: TranscriptLog::new(),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append one turn.
    ///
    /// Sets `updated_at` to the turn's timestamp and, iff this is the first
    /// turn ever appended and it is human, derives the title from its text.
    pub fn append_turn(&self, turn: Turn) {
        let mut state = self.lock();
        Self::append_locked(&mut state, turn);
    }

    /// Append a turn stamped with the clock read while the lock is held, so
    /// stamps follow the order turns land in.
    pub fn record(&self, role: TurnRole, text: impl Into<String>) {
        let mut state = self.lock();
        let turn = Turn::new(role, text, Utc::now());
        Self::append_locked(&mut state, turn);
    }

    /// Append several turns in order under a single lock acquisition.
    pub fn append_turns(&self, turns: impl IntoIterator<Item = Turn>) {
        let mut state = self.lock();
        for turn in turns {
            Self::append_locked(&mut state, turn);
        }
    }

    // A turn stamped earlier than the current `updated_at` (it was stamped
    // outside the lock and lost the race) is lifted to `updated_at`, keeping
    // stamps non-decreasing and `updated_at` equal to the last turn's stamp.
    fn append_locked(state: &mut ConversationState, mut turn: Turn) {
        if state.transcript.is_empty() && turn.role == TurnRole::Human {
            state.title = derive_title(&turn.text);
        }
        if turn.timestamp < state.updated_at {
            turn.timestamp = state.updated_at;
        }
        state.updated_at = turn.timestamp;
        state.transcript.append(turn);
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> ConversationDetail {
        let state = self.lock();
        ConversationDetail {
            id: self.id,
            title: state.title.clone(),
            created_at: self.created_at,
            updated_at: state.updated_at,
            turns: state.transcript.to_vec(),
        }
    }

    /// List-view projection, without copying the transcript.
    pub fn summary(&self) -> ConversationSummary {
        let state = self.lock();
        ConversationSummary {
            id: self.id,
            title: state.title.clone(),
            created_at: self.created_at,
            updated_at: state.updated_at,
            turn_count: state.transcript.len(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().expect("conversation lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::chat::title::PLACEHOLDER_TITLE;

    #[test]
    fn test_new_conversation_is_empty() {
        let conv = Conversation::new(None);
        let snap = conv.snapshot();
        assert_eq!(snap.title, PLACEHOLDER_TITLE);
        assert!(snap.turns.is_empty());
        assert_eq!(snap.created_at, snap.updated_at);
    }

    #[test]
    fn test_first_human_turn_sets_title_once() {
        let conv = Conversation::new(None);
        conv.append_turn(Turn::human(
            "A very long opening message exceeding forty characters total",
        ));
        assert_eq!(conv.snapshot().title, "A very long opening message exceeding fo...");

        conv.append_turn(Turn::human("second message"));
        assert_eq!(conv.snapshot().title, "A very long opening message exceeding fo...");
    }

    #[test]
    fn test_first_human_turn_overrides_given_title() {
        let conv = Conversation::new(Some("Quarterly review"));
        assert_eq!(conv.snapshot().title, "Quarterly review");
        conv.record(TurnRole::Human, "what is ARPU");
        assert_eq!(conv.snapshot().title, "what is ARPU");
    }

    #[test]
    fn test_non_human_first_turn_never_sets_title() {
        let conv = Conversation::new(None);
        conv.append_turn(Turn::system("welcome"));
        conv.append_turn(Turn::human("hello there"));
        assert_eq!(conv.snapshot().title, PLACEHOLDER_TITLE);
    }

    #[test]
    fn test_updated_at_follows_last_turn() {
        let conv = Conversation::new(None);
        let t1 = conv.created_at + Duration::seconds(5);
        let t2 = t1 + Duration::seconds(5);
        conv.append_turn(Turn::new(TurnRole::Human, "a", t1));
        assert_eq!(conv.snapshot().updated_at, t1);
        conv.append_turn(Turn::new(TurnRole::Agent, "b", t2));
        assert_eq!(conv.snapshot().updated_at, t2);
    }

    #[test]
    fn test_late_stamped_turn_is_lifted() {
        let conv = Conversation::new(None);
        let later = conv.created_at + Duration::seconds(10);
        let earlier = conv.created_at + Duration::seconds(1);
        conv.append_turn(Turn::new(TurnRole::Human, "a", later));
        conv.append_turn(Turn::new(TurnRole::Agent, "b", earlier));

        let snap = conv.snapshot();
        assert_eq!(snap.turns.len(), 2);
        assert_eq!(snap.turns[1].timestamp, later);
        assert_eq!(snap.updated_at, later);
    }

    #[test]
    fn test_record_stamps_in_append_order() {
        let conv = Conversation::new(None);
        conv.record(TurnRole::Human, "hi");
        conv.record(TurnRole::System, "notice");

        let snap = conv.snapshot();
        assert_eq!(snap.title, "hi");
        assert!(snap.turns[0].timestamp <= snap.turns[1].timestamp);
        assert_eq!(snap.updated_at, snap.turns[1].timestamp);
    }

    #[test]
    fn test_append_turns_preserves_order() {
        let conv = Conversation::new(None);
        conv.append_turns(vec![Turn::agent("one"), Turn::agent("two")]);
        let texts: Vec<String> = conv.snapshot().turns.into_iter().map(|t| t.text).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn test_concurrent_appends_all_land() {
        const N: usize = 64;
        let conv = Arc::new(Conversation::new(None));
        let base = conv.created_at;

        let handles: Vec<_> = (0..N)
            .map(|i| {
                let conv = Arc::clone(&conv);
                std::thread::spawn(move || {
                    // Pre-stamped, so arrival order need not match stamp order.
                    let ts = base + Duration::milliseconds(i as i64 + 1);
                    conv.append_turn(Turn::new(TurnRole::Human, format!("msg {i}"), ts));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = conv.snapshot();
        assert_eq!(snap.turns.len(), N);

        let mut seen: Vec<String> = snap.turns.iter().map(|t| t.text.clone()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), N);

        assert!(snap.turns.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(snap.updated_at, snap.turns.last().unwrap().timestamp);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_records_track_last() {
        const N: usize = 32;
        let conv = Arc::new(Conversation::new(None));

        let mut tasks = Vec::new();
        for i in 0..N {
            let conv = Arc::clone(&conv);
            tasks.push(tokio::spawn(async move {
                conv.record(TurnRole::Agent, format!("r{i}"));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let snap = conv.snapshot();
        assert_eq!(snap.turns.len(), N);
        assert!(snap.turns.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(snap.updated_at, snap.turns.last().unwrap().timestamp);
    }
}
