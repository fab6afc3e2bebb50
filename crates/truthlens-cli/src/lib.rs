//! Terminal front end for TruthLens

mod router;
mod session;
mod ui;
mod views;


pub use router::{Route, Router};
pub use session::{Reply, Session};
pub use ui::{accuracy_band, display_banner, handle_input_with_history, is_exit_key, print_help, read_line_from, render_reply, render_verdict, AccuracyBand};
pub use views::{home_view, translator_view, View};

// Re-export core types
pub use truthlens_core::{Error, Result};
