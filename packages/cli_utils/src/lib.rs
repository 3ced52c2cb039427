#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the emergency alert tools.
//!
//! Provides [`init_logger`], which sets up `indicatif-log-bridge` so that
//! `log::info!` and friends are suspended while spinners redraw, an
//! [`in_flight`] spinner for requests awaiting the backend, and terminal
//! styling keyed on the configured [`ThemeMode`].

use std::time::Duration;

use dialoguer::console::{Color, Style};
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use emergency_alert_display::Tone;
use emergency_alert_session::ThemeMode;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

/// Adds a spinner to `multi` showing `message` until the returned bar is
/// finished.
#[must_use]
pub fn in_flight(multi: &MultiProgress, message: &str) -> ProgressBar {
    let bar = multi.add(ProgressBar::new_spinner());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar
}

/// Prompt theme for `mode`: colorful on dark terminals, plain on light.
#[must_use]
pub fn prompt_theme(mode: ThemeMode) -> Box<dyn Theme> {
    match mode {
        ThemeMode::Dark => Box::new(ColorfulTheme::default()),
        ThemeMode::Light => Box::new(SimpleTheme),
    }
}

/// Terminal color for a badge tone.
#[must_use]
pub const fn terminal_color(tone: Tone) -> Color {
    match tone {
        Tone::Red => Color::Red,
        Tone::Orange => Color::Color256(208),
        Tone::Yellow => Color::Yellow,
        Tone::Green => Color::Green,
        Tone::Blue => Color::Blue,
        Tone::Purple => Color::Magenta,
        Tone::Gray => Color::Color256(244),
    }
}

/// Renders `text` left-aligned in a `width`-column cell, in `tone`, bold
/// on dark terminals.
///
/// Padding is applied before styling so escape codes never count toward
/// the column width.
#[must_use]
pub fn badge(text: &str, width: usize, tone: Tone, mode: ThemeMode) -> String {
    let style = Style::new().fg(terminal_color(tone));
    let style = match mode {
        ThemeMode::Dark => style.bold(),
        ThemeMode::Light => style,
    };
    style.apply_to(format!("{text:<width$}")).to_string()
}

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while spinners redraw.
///
/// Returns the [`MultiProgress`] that all spinners must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Already set in tests

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_keeps_text() {
        let rendered = badge("critical", 8, Tone::Red, ThemeMode::Light);
        assert!(rendered.contains("critical"));
    }

    #[test]
    fn styled_badge_fills_exactly_its_cell() {
        dialoguer::console::set_colors_enabled(true);
        let rendered = badge("low", 10, Tone::Green, ThemeMode::Dark);

        assert!(rendered.len() > 10);
        assert_eq!(dialoguer::console::measure_text_width(&rendered), 10);
        assert_eq!(dialoguer::console::strip_ansi_codes(&rendered), "low       ");
    }

    #[test]
    fn every_tone_has_a_distinct_color() {
        let tones = [
            Tone::Red,
            Tone::Orange,
            Tone::Yellow,
            Tone::Green,
            Tone::Blue,
            Tone::Purple,
            Tone::Gray,
        ];
        for (i, a) in tones.iter().enumerate() {
            for b in &tones[i + 1..] {
                assert_ne!(terminal_color(*a), terminal_color(*b), "{a} vs {b}");
            }
        }
    }
}
