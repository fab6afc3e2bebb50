//! Two-route navigation table

use std::sync::OnceLock;

use crate::views::{home_view, translator_view, View};

enum Component {
    Eager(View),
    Lazy {
        load: fn() -> View,
        view: OnceLock<View>,
    },
}

/// A path bound to a screen
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    component: Component,
}

impl Route {
    fn eager(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name,
            component: Component::Eager(view),
        }
    }

    fn lazy(path: &'static str, name: &'static str, load: fn() -> View) -> Self {
        Self {
            path,
            name,
            component: Component::Lazy {
                load,
                view: OnceLock::new(),
            },
        }
    }

    /// The route's screen, loading it on first use
    pub fn view(&self) -> &View {
        match &self.component {
            Component::Eager(view) => view,
            Component::Lazy { load, view } => view.get_or_init(|| {
                tracing::debug!(route = self.name, "loading view");
                load()
            }),
        }
    }

    pub fn is_loaded(&self) -> bool {
        match &self.component {
            Component::Eager(_) => true,
            Component::Lazy { view, .. } => view.get().is_some(),
        }
    }
}

/// Maps `/` to the home screen and `/translator` to the analysis screen
pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: vec![
                Route::eager("/", "home", home_view()),
                Route::lazy("/translator", "translator", translator_view),
            ],
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route bound to `path`. A trailing slash is ignored.
    pub fn route(&self, path: &str) -> Option<&Route> {
        let path = path.trim();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Screen bound to `path`
    pub fn resolve(&self, path: &str) -> Option<&View> {
        self.route(path).map(Route::view)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.by_name(name).is_some_and(Route::is_loaded)
    }
}
