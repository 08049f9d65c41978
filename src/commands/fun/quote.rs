use tracing::warn;

use crate::utils::quote_store::QuoteError;
use crate::{CommandResult, Context};

/// Save a quote for later
#[poise::command(prefix_command, slash_command, category = "Quotes")]
pub async fn guardarfrase(
    ctx: Context<'_>,
    #[description = "The quote to save"]
    #[rest]
    quote: String,
) -> CommandResult {
    match ctx.data().quotes.append(&quote).await {
        Ok(count) => {
            ctx.say(format!("Quote saved ({} in total).", count)).await?;
        }
        Err(QuoteError::Empty) => {
            ctx.say("Tell me what to save, e.g. `$guardarfrase ...`").await?;
        }
        Err(e) => {
            warn!("Failed to save quote: {}", e);
            ctx.say(format!("Could not save the quote: {}", e)).await?;
        }
    }
    Ok(())
}

/// Say a random saved quote
#[poise::command(prefix_command, slash_command, category = "Quotes")]
pub async fn frase(ctx: Context<'_>) -> CommandResult {
    match ctx.data().quotes.random().await {
        Ok(Some(quote)) => ctx.say(quote).await?,
        Ok(None) => ctx.say("No quotes saved yet.").await?,
        Err(e) => {
            warn!("Failed to read quotes: {}", e);
            ctx.say(format!("Could not read the quotes: {}", e)).await?
        }
    };
    Ok(())
}
