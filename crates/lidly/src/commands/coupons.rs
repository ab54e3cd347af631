//! Coupon (v2) command handlers.

use chrono::Utc;
use tabled::Tabled;

use lidly_api::{ApiClient, Coupon};
use lidly_core::is_eligible;

use crate::cli::{CouponsArgs, CouponsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CouponRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Activated")]
    activated: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Until")]
    until: String,
    #[tabled(rename = "Eligible")]
    eligible: String,
}

fn to_row(c: &Coupon) -> CouponRow {
    let now = Utc::now();
    CouponRow {
        id: c.id.clone(),
        title: c.title.clone(),
        activated: yes_no(c.is_activated),
        from: c.start_validity_date.format("%Y-%m-%d %H:%M").to_string(),
        until: c.end_validity_date.format("%Y-%m-%d %H:%M").to_string(),
        eligible: yes_no(is_eligible(c, now)),
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes".into() } else { "no".into() }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &ApiClient,
    args: CouponsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CouponsCommand::List { eligible } => {
            let token = client.get_access_token().await?;
            let batch = client.coupons(&token).await?;

            let now = Utc::now();
            let coupons: Vec<Coupon> = batch
                .sections
                .into_iter()
                .flat_map(|s| s.coupons)
                .filter(|c| !eligible || is_eligible(c, now))
                .collect();

            let out = output::offers(&global.output, &coupons, to_row, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
