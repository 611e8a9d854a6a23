use serde::{Deserialize, Serialize};

/// Caller on whose behalf rights are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    subject: String,
    display_name: String,
}

impl CallerIdentity {
    /// Creates a caller identity from authentication data.
    #[must_use]
    pub fn new(subject: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the caller.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::CallerIdentity;

    #[test]
    fn caller_identity_exposes_subject_and_display_name() {
        let caller = CallerIdentity::new("alice", "Alice Example");
        assert_eq!(caller.subject(), "alice");
        assert_eq!(caller.display_name(), "Alice Example");
    }
}
