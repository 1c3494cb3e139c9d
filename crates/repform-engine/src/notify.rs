//! Notification seam for speech, audio and display collaborators.
//!
//! The engine hands cues off without waiting; whatever consumes them runs on
//! its own executor.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Event worth announcing to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum Cue {
    /// A rep was accepted
    RepCounted { count: u32, duration: f64 },
    /// Corrective or advisory feedback
    Feedback { text: String },
    /// Required joints are out of view
    AwaitingUser { text: String },
    /// The user is back in view
    Ready,
}

/// Receiver of engine cues; must never block the frame loop
pub trait Notifier: Send + Sync {
    fn notify(&self, cue: Cue);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _cue: Cue) {}
}

/// Forwards cues over an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Cue>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end for the consumer task
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Cue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, cue: Cue) {
        if self.tx.send(cue).is_err() {
            tracing::debug!("cue receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        notifier.notify(Cue::Ready);
        notifier.notify(Cue::RepCounted { count: 1, duration: 1.5 });

        assert_eq!(rx.recv().await, Some(Cue::Ready));
        assert_eq!(rx.recv().await, Some(Cue::RepCounted { count: 1, duration: 1.5 }));
    }

    #[tokio::test]
    async fn test_closed_receiver_is_ignored() {
        let (notifier, rx) = ChannelNotifier::channel();
        drop(rx);
        notifier.notify(Cue::Feedback { text: "Squat lower!".into() });
    }

    #[test]
    fn test_cue_json() {
        let json = serde_json::to_string(&Cue::AwaitingUser { text: "Waiting for user...".into() })
            .unwrap();
        assert_eq!(json, r#"{"cue":"awaiting_user","text":"Waiting for user..."}"#);
    }
}
