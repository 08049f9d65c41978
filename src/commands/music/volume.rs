use super::{guild_id, respond};
use crate::{CommandResult, Context};

/// Sets the volume of the currently played song.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Volume in percent (0-200)"] value: u32,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.set_volume(guild_id, value).await;
    respond(ctx, result).await
}
