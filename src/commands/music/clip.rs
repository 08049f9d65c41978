use tracing::debug;

use super::{author_voice_channel, origin, respond};
use crate::voice::ClipLibrary;
use crate::{CommandResult, Context};

/// Plays one of the bundled audio clips.
///
/// Every clip name also works as a command of its own.
#[poise::command(
    prefix_command,
    guild_only,
    category = "Clips",
    aliases(
        "ohmaigad", "sotelo", "sotelo2", "sostenlo", "fonsi", "agusto", "pacheco", "jalo",
        "pacheco2"
    )
)]
pub async fn clip(
    ctx: Context<'_>,
    #[description = "Name of the clip"] name: Option<String>,
) -> CommandResult {
    let name = match name {
        Some(name) => name,
        None if ctx.invoked_command_name() == "clip" => {
            let names: Vec<_> = ClipLibrary::names().collect();
            ctx.say(format!("Clips: {}", names.join(", "))).await?;
            return Ok(());
        }
        None => ctx.invoked_command_name().to_string(),
    };
    debug!("Clip '{}' requested", name);

    let origin = origin(ctx)?;
    let channel = author_voice_channel(ctx);
    let result = ctx.data().voice.play_clip(&origin, channel, &name).await;
    respond(ctx, result).await
}
