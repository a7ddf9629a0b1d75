use serde::Deserialize;

/// Who is driving the session, as reported by the authentication provider.
///
/// The user id is an opaque owner key: plans are listed and created under it
/// and nothing else is read from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub is_authenticated: bool,
    pub user_id: String,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builds an identity from a provider subject such as `auth0|64f1c2`.
    ///
    /// Only the segment after the last `|` is kept as the owner key.
    pub fn from_subject(subject: impl AsRef<str>) -> Self {
        let user_id = subject
            .as_ref()
            .rsplit('|')
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned();

        Self {
            is_authenticated: !user_id.is_empty(),
            user_id,
        }
    }

    pub fn owner_id(&self) -> crate::Result<&str> {
        if !self.is_authenticated || self.user_id.is_empty() {
            return Err(crate::Error::Forbidden);
        }

        Ok(&self.user_id)
    }
}
