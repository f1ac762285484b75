use std::fmt;

/// Reachability of the ticker server as seen by the health probe.
///
/// Starts as `Checking`. Marked non-exhaustive so that consumers keep a
/// fallback arm for states added later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConnectivityState {
    #[default]
    Checking,
    Connected,
    Error,
}

impl ConnectivityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectivityState::Checking => "checking",
            ConnectivityState::Connected => "connected",
            ConnectivityState::Error => "error",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
