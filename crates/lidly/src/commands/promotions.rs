//! Promotion (legacy v1) command handlers.

use chrono::Utc;
use tabled::Tabled;

use lidly_api::{ApiClient, Promotion};
use lidly_core::is_eligible;

use crate::cli::{GlobalOpts, PromotionsArgs, PromotionsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PromotionRow {
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

fn to_row(p: &Promotion) -> PromotionRow {
    let now = Utc::now();
    PromotionRow {
        id: p.id.clone(),
        title: p.title.clone(),
        activated: yes_no(p.is_activated),
        from: p.validity.start.format("%Y-%m-%d %H:%M").to_string(),
        until: p.validity.end.format("%Y-%m-%d %H:%M").to_string(),
        eligible: yes_no(is_eligible(p, now)),
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes".into() } else { "no".into() }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &ApiClient,
    args: PromotionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PromotionsCommand::List { eligible } => {
            let token = client.get_access_token().await?;
            let batch = client.coupon_promotions_v1(&token).await?;

            let now = Utc::now();
            let promotions: Vec<Promotion> = batch
                .sections
                .into_iter()
                .flat_map(|s| s.promotions)
                .filter(|p| !eligible || is_eligible(p, now))
                .collect();

            let out = output::offers(&global.output, &promotions, to_row, |p| p.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
