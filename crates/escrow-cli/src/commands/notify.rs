use chrono::Utc;
use escrow_core::enums::NotificationKind;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NotifyArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `escrow notify`.
pub async fn handle(args: &NotifyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kind: NotificationKind = parse_enum(&args.kind, "kind")?;
    let notification = ctx
        .service
        .record_notification(
            kind,
            &args.user,
            args.sender.as_deref(),
            &args.deal,
            Utc::now(),
        )
        .await?;
    output(&notification, flags.format)
}
