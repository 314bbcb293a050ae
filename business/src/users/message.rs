//! Banner message that disappears on its own.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

pub const MESSAGE_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// At most one message, cleared [`MESSAGE_TTL_SECS`] after it was shown.
///
/// Time is passed in by the caller, so the timer is driven by whatever clock the
/// front end ticks with. Showing a new message replaces the old one and restarts
/// the countdown.
#[derive(Debug, Clone, Default)]
pub struct TransientMessage {
    current: Option<(Message, DateTime<Utc>)>,
}

impl TransientMessage {
    pub fn show(&mut self, kind: MessageKind, text: impl Into<String>, now: DateTime<Utc>) {
        let deadline = now + TimeDelta::seconds(MESSAGE_TTL_SECS);
        self.current = Some((
            Message {
                kind,
                text: text.into(),
            },
            deadline,
        ));
    }

    pub fn success(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.show(MessageKind::Success, text, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.show(MessageKind::Error, text, now);
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref().map(|(message, _)| message)
    }

    /// Clears an expired message. Returns true when something was cleared.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match &self.current {
            Some((_, deadline)) if *deadline <= now => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    /// Time left before the current message expires.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|(_, deadline)| (*deadline - now).to_std().unwrap_or(Duration::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).expect("valid timestamp")
    }

    #[test]
    fn test_message_expires_after_ttl() {
        let mut message = TransientMessage::default();
        message.success("Saved", at(0));

        assert!(!message.tick(at(2)));
        assert_eq!(message.current().map(|m| m.text.as_str()), Some("Saved"));
        assert_eq!(message.remaining(at(2)), Some(Duration::from_secs(1)));

        assert!(message.tick(at(3)));
        assert!(message.current().is_none());
        assert_eq!(message.remaining(at(3)), None);
    }

    #[test]
    fn test_new_message_restarts_timer() {
        let mut message = TransientMessage::default();
        message.success("First", at(0));
        message.error("Second", at(2));

        assert!(!message.tick(at(4)));
        let current = message.current().expect("second message still shown");
        assert_eq!(current.text, "Second");
        assert_eq!(current.kind, MessageKind::Error);

        assert!(message.tick(at(5)));
    }

    #[test]
    fn test_cancel_clears_immediately() {
        let mut message = TransientMessage::default();
        message.error("Oops", at(0));
        message.cancel();

        assert!(message.current().is_none());
        assert!(!message.tick(at(10)));
    }
}
