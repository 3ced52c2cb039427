//! `alerts` command: the public alert feeds.

use emergency_alert_client_models::{AlertRecord, RealtimeAlert};
use emergency_alert_display::Tone;

use crate::context::Context;
use crate::render::{fit, heading};

#[allow(clippy::future_not_send)]
pub async fn run(
    ctx: &Context,
    active: bool,
    realtime: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = ctx.client(&ctx.public_session());
    let spinner = emergency_alert_cli_utils::in_flight(&ctx.multi, "Loading alerts...");

    if realtime {
        let alerts = if active {
            client.active_realtime_alerts().await
        } else {
            client.realtime_alerts().await
        };
        spinner.finish_and_clear();
        print_realtime(ctx, &alerts?, active);
    } else {
        let alerts = if active {
            client.active_alerts().await
        } else {
            client.alerts().await
        };
        spinner.finish_and_clear();
        print_records(ctx, &alerts?, active);
    }

    Ok(())
}

fn print_records(ctx: &Context, alerts: &[AlertRecord], active: bool) {
    heading(if active { "Active Alerts" } else { "Alerts" });
    if alerts.is_empty() {
        println!("No alerts found.");
        return;
    }
    for alert in alerts {
        println!(
            "#{:<6} {} {} {:<40} {:<24} {}",
            alert.id,
            ctx.badge(&alert.severity, 10, Tone::for_severity(&alert.severity)),
            ctx.badge(&alert.status, 10, Tone::for_alert_status(&alert.status)),
            fit(&alert.title, 40),
            fit(alert.location_name.as_deref().unwrap_or("-"), 24),
            alert.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    println!();
    println!("{} alert(s)", alerts.len());
}

fn print_realtime(ctx: &Context, alerts: &[RealtimeAlert], active: bool) {
    heading(if active {
        "Active Alerts (real-time)"
    } else {
        "Alerts (real-time)"
    });
    if alerts.is_empty() {
        println!("No alerts found.");
        return;
    }
    for alert in alerts {
        let severity = alert
            .severity
            .as_deref()
            .or(alert.urgency_level.as_deref())
            .unwrap_or("-");
        let status = alert.status.as_deref().unwrap_or("-");
        let place = alert
            .location_name
            .as_deref()
            .or(alert.pincode.as_deref())
            .unwrap_or("-");
        println!(
            "{:<22} {} {} {:<40} {:<24} {}",
            alert.id.as_deref().unwrap_or("-"),
            ctx.badge(severity, 10, Tone::for_severity(severity)),
            ctx.badge(status, 10, Tone::for_alert_status(status)),
            fit(
                alert
                    .title
                    .as_deref()
                    .or(alert.alert_type.as_deref())
                    .unwrap_or("-"),
                40
            ),
            fit(place, 24),
            alert.timestamp.as_deref().unwrap_or("-"),
        );
    }
    println!();
    println!("{} alert(s)", alerts.len());
}
