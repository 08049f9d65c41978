use ::serenity::all::{ActivityData, ClientBuilder};
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
#[cfg(feature = "music")]
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hector::config::Config;
use hector::utils::quote_store::QuoteStore;
use hector::{Data, Error};
#[cfg(feature = "music")]
use hector::{
    commands::music::utils::{ChannelNotifier, SongbirdBackend},
    voice::{ClipLibrary, VoiceStateRegistry},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hector=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::from_env()?;
    let token = config.discord_token.clone();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    #[cfg(feature = "music")]
    let songbird = songbird::Songbird::serenity();
    #[cfg(feature = "music")]
    let voice_manager = Arc::clone(&songbird);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: hector::commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                mention_as_prefix: true,
                ..Default::default()
            },
            on_error: |error| Box::pin(hector::on_error(error)),
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Received '{}' from {} in channel {}",
                        ctx.command().qualified_name,
                        ctx.author().name,
                        ctx.channel_id()
                    );
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("{} is connected", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                ctx.set_activity(Some(ActivityData::playing(config.activity.clone())));

                let data = Data {
                    quotes: QuoteStore::new(config.quote_file.clone()),
                    #[cfg(feature = "music")]
                    voice: voice_registry(ctx, voice_manager, &config),
                    config,
                };

                let shard_manager = framework.shard_manager().clone();
                #[cfg(feature = "music")]
                let voice = Arc::clone(&data.voice);
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("Shutting down");
                        #[cfg(feature = "music")]
                        voice.shutdown_all().await;
                        shard_manager.shutdown_all().await;
                    }
                });

                Ok(data)
            })
        });

    let client_builder = ClientBuilder::new(token, intents).framework(framework.build());

    #[cfg(feature = "music")]
    {
        use songbird::SerenityInit;

        let mut client = client_builder.register_songbird_with(songbird).await?;
        client.start().await.map_err(Into::into)
    }

    #[cfg(not(feature = "music"))]
    {
        let mut client = client_builder.await?;
        client.start().await.map_err(Into::into)
    }
}

#[cfg(feature = "music")]
fn voice_registry(
    ctx: &serenity::Context,
    manager: Arc<songbird::Songbird>,
    config: &Config,
) -> Arc<VoiceStateRegistry<SongbirdBackend>> {
    let backend = SongbirdBackend::new(manager, Arc::clone(&ctx.http), hector::HTTP_CLIENT.clone());
    let notifier = ChannelNotifier::new(Arc::clone(&ctx.http));

    Arc::new(VoiceStateRegistry::new(
        Arc::new(backend),
        Arc::new(notifier),
        ClipLibrary::new(config.clip_dir.clone()),
        config.volume(),
    ))
}
