use poise::CreateReply;
use ::serenity::all::CreateAttachment;
use tracing::debug;

use crate::{CommandResult, Context, HTTP_CLIENT};

/// A reaction GIF: command name, source URL, attachment file name and caption.
pub struct Reaction {
    pub name: &'static str,
    pub url: &'static str,
    pub filename: &'static str,
    pub caption: &'static str,
}

pub const REACTIONS: &[Reaction] = &[
    Reaction {
        name: "kiss",
        url: "https://media.giphy.com/media/fBS8d3MublSPmrb3Ys/giphy.gif",
        filename: "kiss.gif",
        caption: "Sotelo kiss Gif.",
    },
    Reaction {
        name: "ganzo",
        url: "https://media.giphy.com/media/C8975W8loq6omiX8QC/giphy.gif",
        filename: "ganzo.gif",
        caption: "Aahh aaah Soteloo! Gif.",
    },
];

pub fn find_reaction(name: &str) -> Option<&'static Reaction> {
    let name = name.trim().to_lowercase();
    REACTIONS.iter().find(|reaction| reaction.name == name)
}

/// Post a reaction GIF
#[poise::command(prefix_command, slash_command, category = "Fun", aliases("kiss", "ganzo"))]
pub async fn gif(
    ctx: Context<'_>,
    #[description = "Which GIF to post"] name: Option<String>,
) -> CommandResult {
    let name = name.unwrap_or_else(|| ctx.invoked_command_name().to_string());
    let Some(reaction) = find_reaction(&name) else {
        let names: Vec<_> = REACTIONS.iter().map(|reaction| reaction.name).collect();
        ctx.say(format!("Available GIFs: {}", names.join(", "))).await?;
        return Ok(());
    };

    ctx.defer().await?;
    debug!("Downloading reaction GIF from {}", reaction.url);
    let bytes = HTTP_CLIENT
        .get(reaction.url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    ctx.send(
        CreateReply::default()
            .content(reaction.caption)
            .attachment(CreateAttachment::bytes(bytes.to_vec(), reaction.filename)),
    )
    .await?;

    Ok(())
}
