use poise::serenity_prelude as serenity;
use tracing::info;

use crate::{CommandResult, Context};

/// Move a member to another voice channel
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "move",
    category = "General",
    required_permissions = "MOVE_MEMBERS"
)]
pub async fn move_member(
    ctx: Context<'_>,
    #[description = "Member to move"] member: serenity::Member,
    #[description = "Voice channel to move them to"] channel: serenity::GuildChannel,
) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    guild_id
        .move_member(ctx, member.user.id, channel.id)
        .await?;
    info!(
        "Moved user {} to channel {} in guild {}",
        member.user.id, channel.id, guild_id
    );

    ctx.say(format!("Moved {} to {}", member.display_name(), channel.name))
        .await?;
    Ok(())
}
