//! Command dispatch: bridges CLI args -> API client calls -> output formatting.

pub mod activate;
pub mod config_cmd;
pub mod coupons;
pub mod promotions;

use lidly_api::ApiClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &ApiClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Activate(args) => activate::handle(client, args, global).await,
        Command::Coupons(args) => coupons::handle(client, args, global).await,
        Command::Promotions(args) => promotions::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
