use std::fmt;

/// A named system-prompt configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Zola,
    FriendlyFrank,
    /// Used only when summarizing; never selected by keyword
    MinutesTaker,
}

impl Persona {
    /// Keyword-dispatched personas in precedence order; the first match wins
    pub const DISPATCH_ORDER: [Persona; 2] = [Persona::Zola, Persona::FriendlyFrank];

    /// Pick the persona addressed by an utterance, if any
    pub fn select(utterance: &str) -> Option<Persona> {
        let lowered = utterance.to_lowercase();
        Self::DISPATCH_ORDER
            .into_iter()
            .find(|persona| persona.keyword().is_some_and(|k| lowered.contains(k)))
    }

    /// Lowercase keyword that addresses this persona
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Persona::Zola => Some("zola"),
            Persona::FriendlyFrank => Some("friendly frank"),
            Persona::MinutesTaker => None,
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::Zola => {
                "You are a helpful assistant named Zola. You are focused on helping resolve conflicts and analyse ideas to provide suggestions."
            }
            Persona::FriendlyFrank => {
                "You are the arrogant, control-freak dictator of a small Slavic country. Please actively try to anger me by being extremely sarcastic and annoying."
            }
            Persona::MinutesTaker => {
                "You are a helpful but concise assistant that helps teams track meeting minutes during their meetings. You are straightforward and informative."
            }
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Persona::Zola => "zola",
            Persona::FriendlyFrank => "friendly_frank",
            Persona::MinutesTaker => "minutes_taker",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_zola_case_insensitive() {
        assert_eq!(Persona::select("Zola, what do you think?"), Some(Persona::Zola));
        assert_eq!(Persona::select("hey ZOLA"), Some(Persona::Zola));
    }

    #[test]
    fn test_select_friendly_frank() {
        assert_eq!(
            Persona::select("Friendly Frank is annoying"),
            Some(Persona::FriendlyFrank)
        );
    }

    #[test]
    fn test_select_none_without_keyword() {
        assert_eq!(Persona::select("let's move on to the budget"), None);
        // Both words are needed for Frank
        assert_eq!(Persona::select("frank, be friendly"), None);
    }

    #[test]
    fn test_zola_wins_when_both_keywords_present() {
        assert_eq!(
            Persona::select("friendly frank and zola, settle this"),
            Some(Persona::Zola)
        );
    }

    #[test]
    fn test_minutes_taker_is_never_dispatched() {
        assert!(!Persona::DISPATCH_ORDER.contains(&Persona::MinutesTaker));
        assert_eq!(Persona::MinutesTaker.keyword(), None);
    }
}
