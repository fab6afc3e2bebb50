//! Interactive session state and command handling

use truthlens_core::{AnalysisResult, ContentAnalyzer, HealthProbe};

use crate::router::Router;
use crate::views::View;

/// What the front end should show in response to one line of input
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Empty,
    Help(View),
    Navigated(View),
    UnknownRoute(String),
    Health(bool),
    Verdict(AnalysisResult),
    Latest(Option<AnalysisResult>),
    AnalysisFailed(String),
    Hint(&'static str),
    Exit,
}

/// Interactive session over an analyzer and a health probe
pub struct Session<A: ContentAnalyzer, H: HealthProbe> {
    analyzer: A,
    prober: H,
    router: Router,
    current: &'static str,
    service_up: Option<bool>,
}

impl<A: ContentAnalyzer, H: HealthProbe> Session<A, H> {
    /// Create a session starting on the home screen
    pub fn new(analyzer: A, prober: H) -> Self {
        Self {
            analyzer,
            prober,
            router: Router::new(),
            current: "/",
            service_up: None,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Path of the screen currently shown
    pub fn current_path(&self) -> &'static str {
        self.current
    }

    pub fn current_view(&self) -> &View {
        self.router
            .route(self.current)
            .map(|route| route.view())
            .unwrap_or_else(|| self.router.routes()[0].view())
    }

    /// Result of the last health probe, if one has run
    pub fn service_up(&self) -> Option<bool> {
        self.service_up
    }

    /// Switch to the screen bound to `path`
    pub fn navigate(&mut self, path: &str) -> Reply {
        match self.router.route(path) {
            Some(route) => {
                self.current = route.path;
                tracing::debug!(path = route.path, "navigated");
                Reply::Navigated(*route.view())
            }
            None => Reply::UnknownRoute(path.trim().to_string()),
        }
    }

    /// Probe the service and remember the answer
    pub async fn check_health(&mut self) -> bool {
        let up = self.prober.probe().await;
        self.service_up = Some(up);
        up
    }

    /// Path named by a `go <path>` line.
    ///
    /// On screens that analyze free text, a line only counts as navigation when
    /// it names a known route or an absolute path, so prose that happens to
    /// start with "go " still reaches the analyzer.
    fn navigation_target<'a>(&self, line: &'a str) -> Option<&'a str> {
        let path = line.strip_prefix("go ")?.trim();
        if !self.current_view().accepts_text || path.starts_with('/') || self.router.route(path).is_some() {
            Some(path)
        } else {
            None
        }
    }

    /// Whether `input` is a session command rather than text to analyze
    pub fn is_command(&self, input: &str) -> bool {
        let lower = input.trim().to_lowercase();
        matches!(lower.as_str(), "help" | "health" | "last" | "exit" | "quit")
            || self.navigation_target(&lower).is_some()
    }

    /// Handle one line of user input
    pub async fn handle(&mut self, input: &str) -> Reply {
        let input = input.trim();
        if input.is_empty() {
            return Reply::Empty;
        }

        let lower = input.to_lowercase();
        match lower.as_str() {
            "exit" | "quit" => return Reply::Exit,
            "help" => return Reply::Help(*self.current_view()),
            "health" => return Reply::Health(self.check_health().await),
            "last" => return Reply::Latest(self.analyzer.latest()),
            _ => {}
        }

        if let Some(path) = self.navigation_target(&lower) {
            return self.navigate(path);
        }

        if !self.current_view().accepts_text {
            return Reply::Hint("Switch to the translator with 'go /translator' to analyze text");
        }

        match self.analyzer.analyze(input).await {
            Ok(result) => Reply::Verdict(result),
            Err(e) => Reply::AnalysisFailed(e.to_string()),
        }
    }
}
