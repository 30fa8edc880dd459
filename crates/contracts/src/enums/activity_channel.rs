use serde::{Deserialize, Serialize};

/// CRM engagement channels tracked per rep per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityChannel {
    Call,
    Email,
    Meeting,
    Note,
    Sms,
}

impl ActivityChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityChannel::Call => "call",
            ActivityChannel::Email => "email",
            ActivityChannel::Meeting => "meeting",
            ActivityChannel::Note => "note",
            ActivityChannel::Sms => "sms",
        }
    }

    /// All channels, in the order the reconciler fetches them.
    pub fn all() -> [ActivityChannel; 5] {
        [
            ActivityChannel::Call,
            ActivityChannel::Email,
            ActivityChannel::Meeting,
            ActivityChannel::Note,
            ActivityChannel::Sms,
        ]
    }
}

impl std::fmt::Display for ActivityChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
