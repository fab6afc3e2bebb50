//! Screens reachable through the navigation table

/// Static description of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub name: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    /// Whether free text typed on this screen is submitted for analysis
    pub accepts_text: bool,
    pub commands: &'static [(&'static str, &'static str)],
}

const COMMON_COMMANDS: &[(&str, &str)] = &[
    ("health", "Check whether the analysis service is reachable"),
    ("go <path>", "Switch screen (/ or /translator)"),
    ("last", "Show the most recent verdict"),
    ("help", "Show this help message"),
    ("exit/quit", "Exit the application"),
];

/// Landing screen: service status and configuration
pub fn home_view() -> View {
    View {
        name: "home",
        title: "TruthLens",
        tagline: "Fact, bias and tone checks for any text",
        accepts_text: false,
        commands: COMMON_COMMANDS,
    }
}

/// Analysis screen: every line typed here is sent to the service
pub fn translator_view() -> View {
    View {
        name: "translator",
        title: "TruthLens Translator",
        tagline: "Paste a claim, article excerpt or post to get a verdict",
        accepts_text: true,
        commands: COMMON_COMMANDS,
    }
}
