use poise::serenity_prelude as serenity;

use super::{guild_id, respond};
use crate::{CommandResult, Context};

/// Joins a voice channel.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn join(
    ctx: Context<'_>,
    #[description = "Voice channel to join"] channel: serenity::GuildChannel,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.join(guild_id, channel.id).await;
    respond(ctx, result).await
}
