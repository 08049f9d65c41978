//! Common test utilities, fixtures, and mocks
//! This module contains shared functionality used across different test categories

#![allow(dead_code)]

pub mod fixtures;

use futures::future::BoxFuture;
use hector::voice::{ClipLibrary, GuildVoiceState, PlayerState, VoiceStateRegistry};
use std::sync::Arc;
use std::time::Duration;

use fixtures::guild;
use mocks::{FakeBackend, FakeConnection, FakeTrack, Recorder, RecordingNotifier};

/// How long a condition may take to become true before a test gives up.
const PATIENCE: Duration = Duration::from_secs(2);

/// Poll `check` until it holds or [`PATIENCE`] runs out.
pub async fn eventually<T, F>(subject: &T, check: F) -> bool
where
    F: for<'a> Fn(&'a T) -> BoxFuture<'a, bool>,
{
    let deadline = tokio::time::Instant::now() + PATIENCE;
    loop {
        if check(subject).await {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Poll until the notifier has sent a message containing `needle`.
pub async fn wait_for_notice(notifier: &RecordingNotifier, needle: &str) -> bool {
    eventually(notifier, |n| {
        let found = n.contains(needle);
        Box::pin(async move { found })
    })
    .await
}

/// A guild state with a live fake connection, plus the handles to inspect it.
pub struct Harness {
    pub state: Arc<GuildVoiceState<FakeConnection>>,
    pub notifier: Arc<RecordingNotifier>,
    pub recorder: Arc<Recorder>,
}

impl Harness {
    pub async fn connected() -> Self {
        let harness = Self::disconnected();
        harness
            .state
            .attach(FakeConnection::new(Arc::clone(&harness.recorder)))
            .await
            .unwrap();
        harness
    }

    pub fn disconnected() -> Self {
        crate::test_utils::init();
        let notifier = Arc::new(RecordingNotifier::default());
        let state = GuildVoiceState::start(guild(), notifier.clone(), 0.6);
        Self {
            state,
            notifier,
            recorder: Arc::new(Recorder::default()),
        }
    }

    /// Wait until `title` has been started and return its stream.
    pub async fn track(&self, title: &str) -> FakeTrack {
        let recorder = &self.recorder;
        assert!(
            eventually(recorder, |r| {
                let started = r.track(title).is_some();
                Box::pin(async move { started })
            })
            .await,
            "'{}' was never started, played so far: {:?}",
            title,
            recorder.played()
        );
        recorder.track(title).unwrap()
    }

    /// Wait until `title` is the entry being streamed and return its stream.
    pub async fn playing(&self, title: &str) -> FakeTrack {
        let track = self.track(title).await;
        let expected = title.to_string();
        let current = eventually(&self.state, move |state| {
            let expected = expected.clone();
            Box::pin(async move {
                state.is_playing().await
                    && state
                        .current_details()
                        .await
                        .is_some_and(|details| details.metadata.title == expected)
            })
        })
        .await;
        assert!(current, "'{}' never became the current entry", title);
        track
    }

    /// Wait until the loop has gone back to waiting on the queue.
    pub async fn wait_idle(&self) -> bool {
        eventually(&self.state, |state| {
            Box::pin(async move {
                state.state().await == PlayerState::Idle
                    && state.queue_len().await == 0
            })
        })
        .await
    }
}

/// A registry over a fake backend that knows the two fixture voice channels.
pub fn registry(
    backend: FakeBackend,
    clips: ClipLibrary,
) -> (VoiceStateRegistry<FakeBackend>, Arc<RecordingNotifier>) {
    crate::test_utils::init();
    let notifier = Arc::new(RecordingNotifier::default());
    let registry = VoiceStateRegistry::new(Arc::new(backend), notifier.clone(), clips, 0.6);
    (registry, notifier)
}

pub fn voice_backend() -> FakeBackend {
    FakeBackend::with_voice_channels([fixtures::voice_channel(), fixtures::other_voice_channel()])
}
