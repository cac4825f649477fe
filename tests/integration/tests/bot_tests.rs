//! Bot integration tests
//!
//! Runs the full bot (REST gateway discovery, gateway session, responder and
//! REST actions) against the mock gateway and mock REST API.
//!
//! Run with: cargo test -p integration-tests --test bot_tests

use dayvid_bot::REACTION_EMOJIS;
use dayvid_gateway::CloseReason;
use dayvid_rest::RestResult;
use integration_tests::{
    bot_config, message_create, message_in, ApiCall, GatewayPeer, MockApi, MockGateway,
    FAILING_CHANNEL, TEST_CHANNEL, TEST_TOKEN,
};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct RunningBot {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<RestResult<CloseReason>>,
    peer: GatewayPeer,
    api: MockApi,
}

async fn start_bot() -> RunningBot {
    let gateway = MockGateway::bind().await.unwrap();
    let api = MockApi::start(gateway.url()).await.unwrap();
    let config = bot_config(&api.base_url()).unwrap();

    let (shutdown, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        dayvid_bot::run(&config, async move {
            let _ = shutdown_rx.await;
        })
        .await
    });

    let mut peer = gateway.accept().await.unwrap();
    let identify = peer.handshake(10_000).await.unwrap();
    assert_eq!(identify["token"], TEST_TOKEN);

    RunningBot {
        shutdown,
        task,
        peer,
        api,
    }
}

impl RunningBot {
    async fn stop(self) -> CloseReason {
        let _ = self.shutdown.send(());
        self.task.await.unwrap().unwrap()
    }
}

#[tokio::test]
async fn test_gateway_url_resolved_through_rest() {
    let bot = start_bot().await;
    assert_eq!(bot.peer.request_uri, "/?v=6&encoding=json");
    assert!(bot.stop().await.is_shutdown());
}

#[tokio::test]
async fn test_correct_spelling_gets_reaction() {
    let mut bot = start_bot().await;

    bot.peer
        .send_json(&message_create(1, "alice", "Dayyyvid is here"))
        .await
        .unwrap();

    let calls = bot.api.wait_for_calls(1).await.unwrap();
    match &calls[0] {
        ApiCall::AddReaction {
            channel_id,
            message_id,
            emoji,
            auth,
        } => {
            assert_eq!(channel_id, TEST_CHANNEL);
            assert_eq!(message_id, "m1");
            assert!(REACTION_EMOJIS.contains(&emoji.as_str()), "emoji {emoji}");
            assert_eq!(auth.as_deref(), Some("Bot integration-token"));
        }
        other => panic!("expected a reaction, got {other:?}"),
    }

    assert!(bot.stop().await.is_shutdown());
}

#[tokio::test]
async fn test_misspellings_get_corrected() {
    let mut bot = start_bot().await;

    bot.peer
        .send_json(&message_create(1, "alice", "Hey DAVID"))
        .await
        .unwrap();
    // Own messages and unrelated chatter produce no calls
    bot.peer
        .send_json(&message_create(2, "DayvidBot", "david david"))
        .await
        .unwrap();
    bot.peer
        .send_json(&message_create(3, "alice", "lunch?"))
        .await
        .unwrap();
    bot.peer
        .send_json(&message_create(4, "carol", "leg day"))
        .await
        .unwrap();

    let calls = bot.api.wait_for_calls(2).await.unwrap();
    assert_eq!(calls.len(), 2);

    let ApiCall::SendMessage { channel_id, content, auth } = &calls[0] else {
        panic!("expected a message, got {:?}", calls[0]);
    };
    assert_eq!(channel_id, TEST_CHANNEL);
    assert!(content.contains("DAY") && content.contains("VID"), "{content}");
    assert_eq!(auth.as_deref(), Some("Bot integration-token"));

    let ApiCall::SendMessage { content, .. } = &calls[1] else {
        panic!("expected a message, got {:?}", calls[1]);
    };
    assert!(content.contains("carol"), "{content}");

    assert!(bot.stop().await.is_shutdown());
}

#[tokio::test]
async fn test_rest_failure_does_not_end_session() {
    let mut bot = start_bot().await;

    bot.peer
        .send_json(&message_in(1, FAILING_CHANNEL, "alice", "david?"))
        .await
        .unwrap();
    bot.peer
        .send_json(&message_create(2, "bob", "dayvid!"))
        .await
        .unwrap();

    let calls = bot.api.wait_for_calls(2).await.unwrap();
    assert!(matches!(&calls[0], ApiCall::SendMessage { channel_id, .. } if channel_id == FAILING_CHANNEL));
    assert!(matches!(&calls[1], ApiCall::AddReaction { message_id, .. } if message_id == "m2"));

    assert!(bot.stop().await.is_shutdown());
}
