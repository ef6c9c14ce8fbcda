use anyhow::Context;
use escrow_core::responses::{DealListResponse, RoleResponse};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DealCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `escrow deal`.
pub async fn handle(
    action: &DealCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        DealCommands::Create {
            name,
            seller,
            buyer,
            exchange,
        } => {
            let deal = service
                .create_deal_for_exchange(name, seller, buyer, exchange.as_deref())
                .await?;
            output(&deal, flags.format)
        }
        DealCommands::Get { id, number } => {
            let deal = if *number {
                let d_id: i64 = id
                    .parse()
                    .with_context(|| format!("invalid deal number '{id}'"))?;
                service.get_deal_by_d_id(d_id).await?
            } else {
                service.get_deal(id).await?
            };
            output(&deal, flags.format)
        }
        DealCommands::List { user } => {
            let deals = service.list_deals_for_user(user).await?;
            let response = DealListResponse {
                user_id: user.clone(),
                deals,
            };
            output(&response, flags.format)
        }
        DealCommands::Accept { id, user } => {
            let deal = service.accept_deal(id, user).await?;
            output(&deal, flags.format)
        }
        DealCommands::Status { id, user, status } => {
            let deal = service.set_deal_status(id, user, status).await?;
            output(&deal, flags.format)
        }
        DealCommands::Role { id, user } => {
            let role = service.role_of(id, user).await?;
            let response = RoleResponse {
                deal_id: id.clone(),
                user_id: user.clone(),
                role,
                is_participant: role.is_participant(),
            };
            output(&response, flags.format)
        }
    }
}
