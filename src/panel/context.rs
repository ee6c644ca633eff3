use crate::error::PanelError;

/// Which entity kind a panel manages: the API path token and the singular
/// display name. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityContext {
    token: String,
    name: String,
}

impl EntityContext {
    /// The token must be a non-empty run of ASCII letters, digits, `-` or `_`
    /// since it is spliced into API paths.
    pub fn new(token: &str, name: &str) -> Result<Self, PanelError> {
        let token = token.trim();
        let path_safe = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !path_safe {
            return Err(PanelError::InvalidEntityType(token.to_string()));
        }
        Ok(Self {
            token: token.to_string(),
            name: name.trim().to_string(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn plural_name(&self) -> String {
        format!("{}s", self.name)
    }
}
