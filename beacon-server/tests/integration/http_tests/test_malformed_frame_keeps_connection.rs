use beacon_core::{PeerIdentity, ServerMessage};

use crate::integration::init_tracing;
use crate::utils::{TestClient, spawn_test_server};

#[tokio::test]
async fn test_malformed_frame_keeps_connection() {
    init_tracing();

    let server = spawn_test_server().await.expect("Failed to start relay");

    let mut alice = TestClient::connect(&server.ws_url())
        .await
        .expect("Failed to connect alice");
    assert!(!alice.ice_servers.is_empty(), "welcome should carry ICE servers");

    alice.send_raw("{ definitely not a signal").await.unwrap();
    alice.send_raw(r#"{"op":"offer","d":{}}"#).await.unwrap();
    alice.expect_silence().await.expect("malformed frames are not answered");

    alice.join("room1", "alice").await.unwrap();
    assert!(server.wait_for_members("room1", 1).await);

    let mut bob = TestClient::connect(&server.ws_url())
        .await
        .expect("Failed to connect bob");
    bob.join("room1", "bob").await.unwrap();

    match alice.recv().await.expect("alice should still be routed") {
        ServerMessage::PeerJoined { identity, .. } => assert_eq!(identity, PeerIdentity::from("bob")),
        other => panic!("unexpected frame {:?}", other),
    }

    bob.close().await.unwrap();
    alice.close().await.unwrap();
    server.shutdown().await;
}
