use beacon_core::{ClientMessage, PeerIdentity, RoomId, ServerMessage};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, spawn_test_server, wait_until, STATE_TIMEOUT_MS};

#[tokio::test]
async fn test_full_peer_cycle() {
    init_tracing();

    let server = spawn_test_server().await.expect("Failed to start relay");

    let mut alice = TestClient::connect(&server.ws_url())
        .await
        .expect("Failed to connect alice");
    let mut bob = TestClient::connect(&server.ws_url())
        .await
        .expect("Failed to connect bob");
    assert_ne!(alice.connection_id, bob.connection_id);

    alice.join("room1", "alice").await.expect("alice join failed");
    assert!(server.wait_for_members("room1", 1).await);
    bob.join("room1", "bob").await.expect("bob join failed");

    // bob's join is announced to alice only
    let announced = alice.recv().await.expect("alice got no peer-joined");
    assert_eq!(
        announced,
        ServerMessage::PeerJoined {
            room: RoomId::from("room1"),
            identity: PeerIdentity::from("bob"),
            connection_id: bob.connection_id,
        }
    );
    bob.expect_silence().await.expect("bob must not hear its own join");

    // offer alice -> bob
    alice
        .send(&ClientMessage::Offer {
            target: bob.connection_id,
            sdp: json!("v=0..."),
            sender: Some(PeerIdentity::from("alice")),
        })
        .await
        .expect("Failed to send offer");

    let offer = bob.recv().await.expect("bob got no offer");
    assert_eq!(
        offer,
        ServerMessage::Offer {
            sdp: json!("v=0..."),
            sender: PeerIdentity::from("alice"),
            from: alice.connection_id,
        }
    );

    // answer bob -> alice, addressed with the `from` field
    bob.send(&ClientMessage::Answer {
        target: alice.connection_id,
        sdp: json!("v=0 answer"),
        sender: None,
    })
    .await
    .expect("Failed to send answer");

    let answer = alice.recv().await.expect("alice got no answer");
    assert!(matches!(
        answer,
        ServerMessage::Answer { ref sender, from, .. } if sender.as_str() == "bob" && from == bob.connection_id
    ));

    // bob disconnects -> alice hears peer-left
    let bob_id = bob.connection_id;
    bob.close().await.expect("Failed to close bob");

    let left = alice.recv().await.expect("alice got no peer-left");
    assert_eq!(
        left,
        ServerMessage::PeerLeft {
            room: RoomId::from("room1"),
            identity: PeerIdentity::from("bob"),
            connection_id: bob_id,
        }
    );

    let registry_settled = wait_until(STATE_TIMEOUT_MS, || {
        !server.state.router.registry().is_connected(&bob_id)
    })
    .await;
    assert!(registry_settled);

    alice.close().await.expect("Failed to close alice");
    server.shutdown().await;
}
