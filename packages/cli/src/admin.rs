//! `admin` command: the admin console.

use std::time::Instant;

use clap::Subcommand;
use dialoguer::Confirm;
use emergency_alert_client_models::{AlertQuery, UserQuery, named_series};
use emergency_alert_client::ClientError;
use emergency_alert_display::{HeatPoint, LatencyTier, MAP_TILE_URL, SystemStatus, Tone};
use emergency_alert_session::Route;

use crate::context::Context;
use crate::render::{bar_chart, fit, heading};

/// Admin console views.
#[derive(Subcommand)]
pub enum AdminAction {
    /// Today's headline figures.
    Overview,

    /// Browse alerts with optional filters.
    Alerts {
        /// Substring match on alert type.
        #[arg(long = "type")]
        alert_type: Option<String>,

        /// Exact severity.
        #[arg(long)]
        severity: Option<String>,

        /// Exact status.
        #[arg(long)]
        status: Option<String>,

        /// Rows to skip.
        #[arg(long)]
        skip: Option<u32>,

        /// Page size.
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Alert breakdowns by type, severity, and status.
    Stats,

    /// Browse users.
    Users {
        /// Exact role.
        #[arg(long)]
        role: Option<String>,

        /// `active` or `inactive`.
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a user.
    DeleteUser {
        /// User id.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Trends, hotspots, and predictions.
    Insights,

    /// Risk areas derived from active alerts.
    Map,

    /// Reachability and latency of the backend services.
    Status,
}

impl AdminAction {
    /// The console page this view corresponds to.
    const fn route(&self) -> Route {
        match self {
            Self::Overview | Self::Status => Route::AdminDashboard,
            Self::Alerts { .. } | Self::Stats => Route::AdminAlerts,
            Self::Users { .. } | Self::DeleteUser { .. } => Route::AdminUsers,
            Self::Insights => Route::AdminInsights,
            Self::Map => Route::AdminRiskMap,
        }
    }
}

#[allow(clippy::future_not_send, clippy::too_many_lines)]
pub async fn run(ctx: &Context, action: AdminAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.require(action.route())?;
    let client = ctx.client(&session);

    match action {
        AdminAction::Overview => {
            let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Loading overview...");
            let stats = client.overview_stats().await;
            spinner.finish_and_clear();
            let stats = stats?;

            heading("Dashboard Overview");
            println!("Total alerts today:   {}", stats.total_alerts_today);
            println!("  crime:              {}", stats.crime_alerts);
            println!("  fraud:              {}", stats.fraud_alerts);
            println!("  weather:            {}", stats.weather_alerts);
            println!("Active responders:    {}", stats.active_responders);
            println!("Avg response time:    {:.1} min", stats.avg_response_time);
        }
        AdminAction::Alerts {
            alert_type,
            severity,
            status,
            skip,
            limit,
        } => {
            let query = AlertQuery {
                alert_type,
                severity,
                status,
                skip,
                limit,
            };
            let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Loading alerts...");
            let page = client.admin_alerts(&query).await;
            spinner.finish_and_clear();
            let page = page?;

            heading("Alert Management");
            for alert in &page.data {
                println!(
                    "#{:<6} {:<12} {} {} {:<36} {:<20} {}",
                    alert.id,
                    fit(&alert.alert_type, 12),
                    ctx.badge(&alert.severity, 10, Tone::for_severity(&alert.severity)),
                    ctx.badge(&alert.status, 10, Tone::for_alert_status(&alert.status)),
                    fit(&alert.title, 36),
                    fit(&alert.location, 20),
                    alert.reported_on.format("%Y-%m-%d %H:%M"),
                );
            }
            println!();
            println!(
                "Page {} ({} of {} alert(s), {} per page)",
                page.page,
                page.data.len(),
                page.total,
                page.limit
            );
        }
        AdminAction::Stats => {
            let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Loading stats...");
            let stats = client.alert_stats().await;
            spinner.finish_and_clear();
            let stats = stats?;

            for (title, counts) in [
                ("Alerts by Type", &stats.by_type),
                ("Alerts by Severity", &stats.by_severity),
                ("Alerts by Status", &stats.by_status),
            ] {
                heading(title);
                for line in bar_chart(&named_series(counts)) {
                    println!("{line}");
                }
            }
        }
        AdminAction::Users { role, status } => {
            let query = UserQuery { role, status };
            let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Loading users...");
            let users = client.users(&query).await;
            spinner.finish_and_clear();
            let users = users?;

            heading("Manage Users");
            for user in &users.data {
                println!(
                    "#{:<6} {:<24} {:<30} {} {:<16} {} {}",
                    user.id,
                    fit(&user.name, 24),
                    fit(&user.email, 30),
                    ctx.badge(&user.role, 10, Tone::for_user_role(&user.role)),
                    user.phone.as_deref().unwrap_or("-"),
                    ctx.badge(&user.status, 10, Tone::for_user_status(&user.status)),
                    user.created_at.format("%Y-%m-%d"),
                );
            }
            println!();
            println!("{} user(s)", users.total);
        }
        AdminAction::DeleteUser { id, yes } => {
            let confirmed = yes
                || Confirm::with_theme(ctx.prompt_theme().as_ref())
                    .with_prompt(format!("Are you sure you want to delete user {id}?"))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }
            let message = client.delete_user(id).await?;
            println!("{message}");
        }
        AdminAction::Insights => {
            let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Loading insights...");
            let insights = client.insights().await;
            spinner.finish_and_clear();
            let insights = insights?;

            heading("Alert Trends (last 7 days)");
            for line in bar_chart(&insights.trend_series()) {
                println!("{line}");
            }
            heading("Hotspots");
            for line in bar_chart(&insights.hotspot_series()) {
                println!("{line}");
            }
            heading("Severity Distribution");
            for line in bar_chart(&insights.severity_series()) {
                println!("{line}");
            }
            heading("Predictions");
            let predictions = &insights.predictions;
            println!("Expected alerts next week: {}", predictions.next_week_alerts);
            println!("High-risk areas:           {}", predictions.high_risk_areas);
            println!(
                "Confidence:                {:.0}%",
                predictions.confidence * 100.0
            );
        }
        AdminAction::Map => {
            let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Loading map...");
            let map = client.map_alerts().await;
            spinner.finish_and_clear();
            let map = map?;

            heading("Risk Map");
            println!("{} active alert(s) with coordinates", map.total);
            println!("Tiles: {MAP_TILE_URL}");
            println!();
            for point in HeatPoint::from_map_alerts(&map.alerts) {
                let style = point.marker_style();
                let level = point.level();
                println!(
                    "{:<24} {:>9.4}, {:>9.4}  {} {:>6}  alerts: {:<4} radius: {:.1}{}",
                    fit(&point.area_name, 24),
                    point.lat,
                    point.lon,
                    ctx.badge(&level.to_string(), 12, risk_tone(style.color)),
                    point.risk_percent(),
                    point.alert_count.unwrap_or(1),
                    style.radius,
                    if style.dash_array.is_some() { "  (dashed)" } else { "" },
                );
            }
        }
        AdminAction::Status => {
            let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Checking services...");
            let checks = [
                ("Alert Submission Service", timed(client.alerts()).await),
                ("Real-time Notifications", timed(client.realtime_alerts()).await),
                ("Admin Service", timed(client.overview_stats()).await),
            ];
            spinner.finish_and_clear();

            heading("System Status");
            for (name, latency_ms) in checks {
                let tier = latency_ms.map(LatencyTier::from_millis);
                let status = SystemStatus::from_latency(tier);
                let latency = match (latency_ms, tier) {
                    (Some(ms), Some(tier)) => ctx.badge(&format!("{ms} ms"), 10, tier.tone()),
                    _ => format!("{:<10}", "-"),
                };
                println!(
                    "{:<28} {} {}",
                    name,
                    ctx.badge(&status.to_string(), 12, status.tone()),
                    latency,
                );
            }
        }
    }

    Ok(())
}

/// Milliseconds `request` took to succeed, or `None` if it failed.
#[allow(clippy::future_not_send)]
async fn timed<T>(request: impl Future<Output = Result<T, ClientError>>) -> Option<u64> {
    let started = Instant::now();
    match request.await {
        Ok(_) => Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
        Err(e) => {
            log::warn!("Service check failed: {e}");
            None
        }
    }
}

/// Badge tone matching a risk marker color.
fn risk_tone(color: &str) -> Tone {
    [Tone::Red, Tone::Orange, Tone::Yellow, Tone::Green]
        .into_iter()
        .find(|tone| tone.hex() == color)
        .unwrap_or(Tone::Gray)
}

#[cfg(test)]
mod tests {
    use emergency_alert_display::RiskLevel;

    use super::*;

    #[test]
    fn risk_colors_map_to_tones() {
        assert_eq!(risk_tone(RiskLevel::High.color()), Tone::Red);
        assert_eq!(risk_tone(RiskLevel::Medium.color()), Tone::Orange);
        assert_eq!(risk_tone(RiskLevel::LowMedium.color()), Tone::Yellow);
        assert_eq!(risk_tone(RiskLevel::Low.color()), Tone::Green);
    }

    #[tokio::test]
    async fn timed_reports_success_and_failure() {
        assert!(timed(async { Ok::<_, ClientError>(()) }).await.is_some());

        let failed = timed(async {
            Err::<(), _>(ClientError::Status {
                status: 503,
                detail: "unavailable".to_string(),
            })
        })
        .await;
        assert_eq!(failed, None);
        assert_eq!(
            SystemStatus::from_latency(failed.map(LatencyTier::from_millis)),
            SystemStatus::Down
        );
    }

    #[test]
    fn every_view_is_an_admin_page() {
        let actions = [
            AdminAction::Overview,
            AdminAction::Stats,
            AdminAction::Insights,
            AdminAction::Map,
            AdminAction::Status,
            AdminAction::Users {
                role: None,
                status: None,
            },
            AdminAction::DeleteUser { id: 1, yes: true },
        ];
        for action in &actions {
            assert!(action.route().path().starts_with("/admin"));
        }
    }
}
