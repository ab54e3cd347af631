//! Activation command handler.

use std::time::Duration;

use owo_colors::OwoColorize;

use lidly_api::ApiClient;
use lidly_core::ActivationReport;

use crate::cli::{ActivateArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(report: &ActivationReport, color: bool) -> String {
    let total = report.total();
    let headline = if total == 0 {
        "No offers needed activation".to_string()
    } else {
        format!("Activated {total} offer(s)")
    };
    let headline = if color {
        headline.green().bold().to_string()
    } else {
        headline
    };

    format!(
        "{headline}\n  Coupons (v2):    {}\n  Promotions (v1): {}",
        report.coupons, report.promotions
    )
}

pub async fn handle(
    client: &ApiClient,
    args: ActivateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Scheduled mode: pass immediately, then every N seconds, forever.
    // Failures are logged and the loop keeps going; Ctrl-C is the only
    // way out.
    if let Some(seconds) = args.every {
        if seconds == 0 {
            return Err(CliError::Validation {
                field: "every".into(),
                reason: "interval must be at least 1 second".into(),
            });
        }
        if !global.quiet {
            eprintln!("Running an activation pass every {seconds}s (Ctrl-C to stop)");
        }
        lidly_core::run_scheduled(client, Duration::from_secs(seconds)).await;
        return Ok(());
    }

    // One-shot pass.
    let report = lidly_core::activate_all(client).await?;

    let color = output::should_color(&global.color);
    let out = output::value(&global.output, &report, |r| detail(r, color));
    output::print_output(&out, global.quiet);
    Ok(())
}
