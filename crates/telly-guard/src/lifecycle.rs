//! Application lifecycle signals

use std::fmt;
use std::str::FromStr;

use crate::error::GuardError;

/// Foreground state reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppLifecycle {
    /// In the foreground and receiving input
    Active,
    /// Visible but not receiving input (app switcher, incoming call)
    Inactive,
    /// No longer visible
    Background,
}

impl AppLifecycle {
    /// Whether entering this state must lock the session
    pub fn should_lock(self) -> bool {
        matches!(self, AppLifecycle::Inactive | AppLifecycle::Background)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppLifecycle::Active => "active",
            AppLifecycle::Inactive => "inactive",
            AppLifecycle::Background => "background",
        }
    }
}

impl fmt::Display for AppLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppLifecycle {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AppLifecycle::Active),
            "inactive" => Ok(AppLifecycle::Inactive),
            "background" => Ok(AppLifecycle::Background),
            other => Err(GuardError::UnknownLifecycle(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("active", AppLifecycle::Active, false)]
    #[case("inactive", AppLifecycle::Inactive, true)]
    #[case("background", AppLifecycle::Background, true)]
    fn test_parse_and_lock_policy(
        #[case] raw: &str,
        #[case] expected: AppLifecycle,
        #[case] locks: bool,
    ) {
        let parsed: AppLifecycle = raw.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.should_lock(), locks);
        assert_eq!(parsed.to_string(), raw);
    }

    #[rstest]
    #[case("unknown")]
    #[case("Background")]
    #[case("")]
    fn test_unknown_states_rejected(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<AppLifecycle>(),
            Err(GuardError::UnknownLifecycle(_))
        ));
    }
}
