use super::{author_voice_channel, guild_id, respond};
use crate::{CommandResult, Context};

/// Summons the bot to join your voice channel.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn summon(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let channel = author_voice_channel(ctx);
    let result = ctx.data().voice.summon(guild_id, channel).await;
    respond(ctx, result).await
}
