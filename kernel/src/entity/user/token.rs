use vodca::{AsRefln, Fromln};

/// Signed bearer token presented by merchants and admins.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}
