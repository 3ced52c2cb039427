//! Plain-text tables and bar charts.

use emergency_alert_client_models::SeriesPoint;

/// Widest bar drawn by [`bar_chart`].
const BAR_WIDTH: usize = 40;

/// Truncates `text` to `width` characters, marking the cut with `…`.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Renders one bar per point, scaled to the largest value.
pub fn bar_chart(points: &[SeriesPoint]) -> Vec<String> {
    let max = points.iter().map(|p| p.value).fold(0.0, f64::max);
    let label_width = points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    points
        .iter()
        .map(|p| {
            let len = bar_len(p.value, max);
            format!(
                "{:<label_width$}  {} {}",
                p.label,
                "█".repeat(len),
                p.value
            )
        })
        .collect()
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_len(value: f64, max: f64) -> usize {
    if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    }
}

/// Prints a titled section header.
pub fn heading(title: &str) {
    println!();
    println!("=== {title} ===");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, value: f64) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn fit_truncates_long_text() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("a very long title", 6), "a ver…");
    }

    #[test]
    fn bars_scale_to_largest_value() {
        let lines = bar_chart(&[point("fire", 10.0), point("fraud", 5.0)]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[0].starts_with("fire "));
    }

    #[test]
    fn all_zero_series_draws_no_bars() {
        let lines = bar_chart(&[point("none", 0.0)]);
        assert_eq!(lines[0].matches('█').count(), 0);
    }
}
