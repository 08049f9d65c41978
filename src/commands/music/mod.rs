//! Voice commands. Each one gathers who/where from the poise context, calls the
//! voice registry, and replies with the outcome.

pub(crate) mod clip;
pub(crate) mod join;
pub(crate) mod leave;
pub(crate) mod pause;
pub(crate) mod play;
pub(crate) mod playing;
pub(crate) mod skip;
pub(crate) mod stop;
pub(crate) mod summon;
pub(crate) mod volume;

pub mod utils;

use ::serenity::all::{ChannelId, GuildId};

use crate::voice::{CommandOrigin, Requester, VoiceResult, reply_text};
use crate::{CommandResult, Context, Error};

fn guild_id(ctx: Context<'_>) -> Result<GuildId, Error> {
    ctx.guild_id()
        .ok_or_else(|| "This command only works in a server".into())
}

/// The invoking user, channel and guild.
fn origin(ctx: Context<'_>) -> Result<CommandOrigin, Error> {
    let author = ctx.author();
    Ok(CommandOrigin {
        guild_id: guild_id(ctx)?,
        channel_id: ctx.channel_id(),
        requester: Requester {
            id: author.id,
            display_name: author
                .global_name
                .clone()
                .unwrap_or_else(|| author.name.clone()),
        },
    })
}

/// The voice channel the author is sitting in, if any.
fn author_voice_channel(ctx: Context<'_>) -> Option<ChannelId> {
    let guild_id = ctx.guild_id()?;
    utils::get_user_voice_channel(ctx.serenity_context(), guild_id, ctx.author().id)
}

/// Reply in the invoking channel with the outcome of a voice operation.
async fn respond(ctx: Context<'_>, result: VoiceResult<String>) -> CommandResult {
    ctx.say(reply_text(result)).await?;
    Ok(())
}
