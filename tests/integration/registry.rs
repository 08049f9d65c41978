use hector::voice::{ClipLibrary, VoiceError, reply_text};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serenity::model::id::{ChannelId, UserId};
use serenity::model::mention::Mentionable;

use crate::common::fixtures::{guild, origin, other_voice_channel, voice_channel};
use crate::common::{eventually, registry, voice_backend, wait_for_notice};

fn no_clips() -> ClipLibrary {
    ClipLibrary::new("./does-not-exist")
}

#[tokio::test]
async fn test_join_voice_channel() {
    let (registry, _) = registry(voice_backend(), no_clips());

    let reply = registry.join(guild(), voice_channel()).await;

    assert_eq!(
        reply,
        Ok(format!("Ready to play audio in {}", voice_channel().mention()))
    );
    assert_eq!(registry.backend().recorder.joins(), vec![voice_channel()]);
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_join_twice_is_refused() {
    let (registry, _) = registry(voice_backend(), no_clips());
    registry.join(guild(), voice_channel()).await.unwrap();

    let reply = registry.join(guild(), other_voice_channel()).await;

    assert_eq!(reply, Err(VoiceError::AlreadyInVoiceChannel));
    assert_eq!(registry.backend().recorder.joins(), vec![voice_channel()]);
}

#[tokio::test]
async fn test_join_text_channel_is_refused() {
    let (registry, _) = registry(voice_backend(), no_clips());

    let reply = registry.join(guild(), ChannelId::new(999)).await;

    assert_eq!(reply, Err(VoiceError::NotAVoiceChannel));
}

#[tokio::test]
async fn test_summon_requires_author_in_voice() {
    let (registry, _) = registry(voice_backend(), no_clips());

    let reply = registry.summon(guild(), None).await;

    assert_eq!(
        reply_text(reply),
        "An error occurred while processing this request: ```NotInVoiceChannel: You are not in a voice channel```"
    );
}

#[tokio::test]
async fn test_summon_joins_then_moves() {
    let (registry, _) = registry(voice_backend(), no_clips());

    registry.summon(guild(), Some(voice_channel())).await.unwrap();
    let reply = registry.summon(guild(), Some(other_voice_channel())).await;

    assert_eq!(
        reply,
        Ok(format!("Summoned to {}", other_voice_channel().mention()))
    );
    let recorder = &registry.backend().recorder;
    assert_eq!(recorder.joins(), vec![voice_channel()]);
    assert_eq!(recorder.moves(), vec![other_voice_channel()]);
}

#[tokio::test]
async fn test_play_joins_author_channel_and_enqueues() {
    let (registry, notifier) = registry(voice_backend(), no_clips());

    let reply = registry
        .play(&origin(1), Some(voice_channel()), "never gonna give you up")
        .await;

    assert_eq!(
        reply,
        Ok("Enqueued *never gonna give you up* uploaded by tester and requested by user1".to_string())
    );
    assert_eq!(registry.backend().recorder.joins(), vec![voice_channel()]);
    assert!(wait_for_notice(&notifier, "Now playing *never gonna give you up*").await);
}

#[tokio::test]
async fn test_play_without_voice_channel() {
    let (registry, _) = registry(voice_backend(), no_clips());

    let reply = registry.play(&origin(1), None, "song").await;

    assert_eq!(reply, Err(VoiceError::NotInVoiceChannel));
    assert!(registry.backend().recorder.joins().is_empty());
}

#[tokio::test]
async fn test_failed_resolution_leaves_queue_untouched() {
    let (registry, notifier) = registry(voice_backend().failing_on("nothing"), no_clips());

    let reply = registry.play(&origin(1), Some(voice_channel()), "nothing").await;

    let text = reply_text(reply);
    assert!(text.contains("ResolutionFailed"), "{}", text);
    let state = registry.get(guild()).unwrap();
    assert_eq!(state.queue_len().await, 0);
    assert!(!state.is_playing().await);
    assert!(notifier.texts().is_empty());
}

#[tokio::test]
async fn test_now_playing_reports_votes() {
    let (registry, _) = registry(voice_backend(), no_clips());
    assert_eq!(
        registry.now_playing(guild()).await,
        Ok("Not playing anything.".to_string())
    );

    registry
        .play(&origin(1), Some(voice_channel()), "song")
        .await
        .unwrap();
    let state = registry.get(guild()).unwrap();
    assert!(eventually(&state, |state| Box::pin(state.is_playing())).await);
    registry.vote_skip(guild(), UserId::new(2)).await.unwrap();

    assert_eq!(
        registry.now_playing(guild()).await,
        Ok("Now playing *song* uploaded by tester and requested by user1 [skips: 1/3]".to_string())
    );
}

#[tokio::test]
async fn test_now_playing_links_the_source() {
    let (registry, _) = registry(voice_backend(), no_clips());
    let url = "https://youtu.be/kJQP7kiw5Fk";
    registry
        .play(&origin(1), Some(voice_channel()), url)
        .await
        .unwrap();
    let state = registry.get(guild()).unwrap();
    assert!(eventually(&state, |state| Box::pin(state.is_playing())).await);

    let reply = registry.now_playing(guild()).await.unwrap();

    assert!(reply.ends_with("[skips: 0/3] <https://youtu.be/kJQP7kiw5Fk>"), "{}", reply);
}

#[tokio::test]
async fn test_vote_replies() {
    let (registry, _) = registry(voice_backend(), no_clips());
    registry
        .play(&origin(1), Some(voice_channel()), "song")
        .await
        .unwrap();
    let state = registry.get(guild()).unwrap();
    assert!(eventually(&state, |state| Box::pin(state.is_playing())).await);

    assert_eq!(
        registry.vote_skip(guild(), UserId::new(2)).await,
        Ok("Skip vote added, currently at [1/3]".to_string())
    );
    assert_eq!(
        reply_text(registry.vote_skip(guild(), UserId::new(2)).await),
        "An error occurred while processing this request: ```AlreadyVoted: You have already voted to skip this song```"
    );
    assert_eq!(
        registry.vote_skip(guild(), UserId::new(1)).await,
        Ok("Requester requested skipping song...".to_string())
    );
}

#[rstest]
#[case::pause("pause")]
#[case::resume("resume")]
#[case::volume("volume")]
#[case::skip("skip")]
#[tokio::test]
async fn test_controls_without_state(#[case] command: &str) {
    let (registry, _) = registry(voice_backend(), no_clips());

    let reply = match command {
        "pause" => registry.pause(guild()).await,
        "resume" => registry.resume(guild()).await,
        "volume" => registry.set_volume(guild(), 50).await,
        _ => registry.vote_skip(guild(), UserId::new(2)).await,
    };

    assert_eq!(reply, Err(VoiceError::NotPlaying));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_volume_reply() {
    let (registry, _) = registry(voice_backend(), no_clips());
    registry
        .play(&origin(1), Some(voice_channel()), "song")
        .await
        .unwrap();
    let state = registry.get(guild()).unwrap();
    assert!(eventually(&state, |state| Box::pin(state.is_playing())).await);

    assert_eq!(
        registry.set_volume(guild(), 300).await,
        Ok("Set the volume to 200%".to_string())
    );
    assert_eq!(registry.pause(guild()).await, Ok("Paused.".to_string()));
    assert_eq!(registry.resume(guild()).await, Ok("Resumed.".to_string()));
}

#[tokio::test]
async fn test_stop_tears_down_guild() {
    let (registry, _) = registry(voice_backend(), no_clips());
    registry
        .play(&origin(1), Some(voice_channel()), "song")
        .await
        .unwrap();
    registry
        .play(&origin(1), Some(voice_channel()), "another")
        .await
        .unwrap();

    let reply = registry.stop(guild()).await;

    assert_eq!(reply, Ok("Stopped playback and cleared the queue.".to_string()));
    assert!(registry.get(guild()).is_none());
    assert_eq!(registry.backend().recorder.disconnects(), 1);
    assert!(!registry.backend().recorder.played().contains(&"another".to_string()));
}

#[tokio::test]
async fn test_stop_without_state_still_replies() {
    let (registry, _) = registry(voice_backend(), no_clips());

    assert_eq!(
        registry.stop(guild()).await,
        Ok("Stopped playback and cleared the queue.".to_string())
    );
}

#[tokio::test]
async fn test_leave() {
    let (registry, _) = registry(voice_backend(), no_clips());
    assert_eq!(registry.leave(guild()).await, Err(VoiceError::NotConnected));

    registry.join(guild(), voice_channel()).await.unwrap();
    let reply = registry.leave(guild()).await;

    assert_eq!(reply, Ok("Left the voice channel.".to_string()));
    assert_eq!(registry.backend().recorder.disconnects(), 1);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_unknown_clip() {
    let (registry, _) = registry(voice_backend(), no_clips());

    let reply = registry
        .play_clip(&origin(1), Some(voice_channel()), "macarena")
        .await;

    assert_eq!(reply, Err(VoiceError::FileNotFound("macarena".to_string())));
    assert!(registry.backend().recorder.joins().is_empty());
}

#[tokio::test]
async fn test_missing_clip_file() {
    let (registry, _) = registry(voice_backend(), no_clips());

    let reply = registry
        .play_clip(&origin(1), Some(voice_channel()), "fonsi")
        .await;

    assert!(matches!(reply, Err(VoiceError::FileNotFound(_))));
}

#[tokio::test]
async fn test_clip_goes_through_the_queue() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fonsi.mp3"), b"ID3").unwrap();
    let (registry, notifier) = registry(voice_backend(), ClipLibrary::new(dir.path()));

    registry
        .play(&origin(1), Some(voice_channel()), "song")
        .await
        .unwrap();
    let reply = registry
        .play_clip(&origin(2), Some(voice_channel()), "Fonsi")
        .await;

    assert_eq!(
        reply,
        Ok("Enqueued *fonsi* uploaded by tester and requested by user2".to_string())
    );
    let state = registry.get(guild()).unwrap();
    assert!(eventually(&state, |state| Box::pin(state.is_playing())).await);
    assert_eq!(state.queue_len().await, 1);

    let recorder = &registry.backend().recorder;
    recorder.track("song").unwrap().finish();
    assert!(wait_for_notice(&notifier, "Now playing *fonsi*").await);
}

#[tokio::test]
async fn test_shutdown_all() {
    let (registry, _) = registry(voice_backend(), no_clips());
    registry.join(guild(), voice_channel()).await.unwrap();
    registry
        .join(serenity::model::id::GuildId::new(101), other_voice_channel())
        .await
        .unwrap();

    registry.shutdown_all().await;

    assert!(registry.is_empty());
    assert_eq!(registry.backend().recorder.disconnects(), 2);
}
