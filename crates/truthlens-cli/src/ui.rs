//! UI utilities for the CLI

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, BufRead, IsTerminal, Write};
use truthlens_core::{AnalysisResult, BiasLabel, Result};

use crate::session::Reply;
use crate::views::View;

/// Coarse reading of a factual-accuracy score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    High,
    Moderate,
    Low,
}

pub fn accuracy_band(score: f64) -> AccuracyBand {
    if score >= 80.0 {
        AccuracyBand::High
    } else if score >= 60.0 {
        AccuracyBand::Moderate
    } else {
        AccuracyBand::Low
    }
}

/// Display the banner of a screen, with the service status when known
pub fn display_banner(view: &View, base_url: &str, service_up: Option<bool>) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(67, terminal_width.saturating_sub(4)).max(40);
    let inner = banner_width - 2;

    let top_border = format!("┌{}┐", "─".repeat(inner));
    let bottom_border = format!("└{}┘", "─".repeat(inner));
    let empty_line = format!("│{}│", " ".repeat(inner));
    let padded = |text: &str| format!("│  {}{}│", text, " ".repeat(inner.saturating_sub(text.chars().count() + 2)));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());
    println!(
        "│  {}{}│",
        view.title.blue().bold(),
        " ".repeat(inner.saturating_sub(view.title.chars().count() + 2))
    );
    println!("{}", padded(view.tagline).blue());
    println!("{}", empty_line.blue());
    println!("{}", padded(&format!("Service: {}", base_url)).blue());

    let status = match service_up {
        Some(true) => "Status:  online",
        Some(false) => "Status:  unreachable",
        None => "Status:  unknown",
    };
    println!("{}", padded(status).blue());
    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();

    let tip = if view.accepts_text {
        "💡 Tip: Type or paste text to analyze it, or 'help' for commands"
    } else {
        "💡 Tip: Type 'go /translator' to start analyzing, or 'help' for commands"
    };
    println!("{}", tip.dimmed());
    println!();
}

/// Keeps the terminal in raw mode until dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Ctrl+C and Ctrl+D end the session
pub fn is_exit_key(key_event: &KeyEvent) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

/// Read one line from a non-interactive source. `None` once the input is exhausted.
pub fn read_line_from<R: BufRead>(reader: &mut R, history: &mut Vec<String>) -> Result<Option<String>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    let input = input.trim().to_string();
    if !input.is_empty() {
        history.push(input.clone());
    }
    Ok(Some(input))
}

/// Handle input with history navigation. `None` means the user is done:
/// end of piped input, or Ctrl+C / Ctrl+D at the prompt.
pub async fn handle_input_with_history(prompt: &str, history: &mut Vec<String>) -> Result<Option<String>> {
    // Check if stdin is a terminal (interactive) or piped
    if !io::stdin().is_terminal() {
        return read_line_from(&mut io::stdin().lock(), history);
    }

    let prompt = format!("{}>", prompt);
    let raw_mode = RawModeGuard::enable()?;
    let mut input = String::new();
    let mut history_index: Option<usize> = None;
    let mut cursor_pos = 0;

    print!("{} ", prompt.green().bold());
    io::stdout().flush()?;

    loop {
        if let Event::Key(key_event) = event::read()? {
            if is_exit_key(&key_event) {
                drop(raw_mode);
                println!();
                return Ok(None);
            }

            match key_event.code {
                KeyCode::Enter => {
                    drop(raw_mode);
                    println!();
                    if !input.is_empty() {
                        history.push(input.clone());
                    }
                    return Ok(Some(input));
                }
                KeyCode::Char(c) => {
                    input.insert(cursor_pos, c);
                    cursor_pos += c.len_utf8();
                    print!("\r{} {}", prompt.green().bold(), input);
                    io::stdout().flush()?;
                }
                KeyCode::Backspace => {
                    if let Some(prev) = input[..cursor_pos].chars().next_back() {
                        cursor_pos -= prev.len_utf8();
                        input.remove(cursor_pos);
                        print!("\r{} {}  \r{} {}", prompt.green().bold(), input, prompt.green().bold(), input);
                        io::stdout().flush()?;
                    }
                }
                KeyCode::Up => {
                    if !history.is_empty() {
                        let new_index = match history_index {
                            None => history.len() - 1,
                            Some(idx) if idx > 0 => idx - 1,
                            Some(idx) => idx,
                        };
                        history_index = Some(new_index);
                        input = history[new_index].clone();
                        cursor_pos = input.len();
                        print!("\r{} {}  \r{} {}", prompt.green().bold(), " ".repeat(50), prompt.green().bold(), input);
                        io::stdout().flush()?;
                    }
                }
                KeyCode::Down => {
                    if let Some(idx) = history_index {
                        if idx < history.len() - 1 {
                            let new_index = idx + 1;
                            history_index = Some(new_index);
                            input = history[new_index].clone();
                        } else {
                            history_index = None;
                            input.clear();
                        }
                        cursor_pos = input.len();
                        print!("\r{} {}  \r{} {}", prompt.green().bold(), " ".repeat(50), prompt.green().bold(), input);
                        io::stdout().flush()?;
                    }
                }
                KeyCode::Esc => {
                    drop(raw_mode);
                    println!();
                    return Ok(Some(String::new()));
                }
                _ => {}
            }
        }
    }
}

/// Display help for a screen
pub fn print_help(view: &View) {
    println!("{}", "Available commands:".bold());
    if view.accepts_text {
        println!("  {} - Any other text is sent for analysis", "text".green());
    }
    for (command, description) in view.commands {
        println!("  {} - {}", command.green(), description);
    }
}

/// Print a verdict
pub fn render_verdict(result: &AnalysisResult) {
    let score = format!("{:.0}/100", result.factual_accuracy);
    let score = match accuracy_band(result.factual_accuracy) {
        AccuracyBand::High => score.green(),
        AccuracyBand::Moderate => score.yellow(),
        AccuracyBand::Low => score.red(),
    };
    let bias = match result.bias {
        BiasLabel::Left => result.bias.as_str().blue(),
        BiasLabel::Right => result.bias.as_str().red(),
        BiasLabel::Neutral => result.bias.as_str().green(),
    };

    println!("{}", "Verdict".bold());
    println!("  {} {}", "Factual accuracy:".dimmed(), score.bold());
    println!("  {} {}", "Bias:            ".dimmed(), bias);
    println!("  {} {}", "Emotional tone:  ".dimmed(), result.emotional_level);
    println!("  {} {}", "Recommendation:  ".dimmed(), result.recommendation.italic());
}

/// Print the response to one line of input
pub fn render_reply(reply: &Reply) {
    match reply {
        Reply::Empty | Reply::Exit => {}
        Reply::Help(view) => print_help(view),
        Reply::Navigated(view) => {
            println!("{} {}", "→".green(), view.title.bold());
            println!("{}", view.tagline.dimmed());
        }
        Reply::UnknownRoute(path) => {
            println!("{} No screen at '{}'. Try / or /translator", "❌".red(), path)
        }
        Reply::Health(true) => println!("{} Analysis service is reachable", "✅".green()),
        Reply::Health(false) => println!("{} Analysis service is unreachable", "⚠️".yellow()),
        Reply::Verdict(result) => render_verdict(result),
        Reply::Latest(Some(result)) => render_verdict(result),
        Reply::Latest(None) => println!("{}", "No analysis yet".dimmed()),
        Reply::AnalysisFailed(reason) => println!("{} Analysis failed: {}", "❌".red(), reason),
        Reply::Hint(hint) => println!("{} {}", "💡".cyan(), hint),
    }
}
