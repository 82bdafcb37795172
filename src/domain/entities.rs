//! Core domain entity.

/// A short key and the resource it redirects to.
///
/// `short_key` is matched verbatim against request paths, so it only
/// resolves when it starts with `/`. `resource` is stored as given and
/// never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirection {
    pub short_key: String,
    pub resource: String,
}

impl Redirection {
    pub fn new(short_key: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            resource: resource.into(),
        }
    }
}
