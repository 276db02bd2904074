use beacon_core::{PeerIdentity, RoomId};

use crate::integration::{connect, create_test_router, init_tracing};

#[tokio::test]
async fn test_duplicate_join_grows_room_once_but_announces_twice() {
    init_tracing();

    let (router, signaling) = create_test_router();
    let room = RoomId::from("room1");

    let alice = connect(&router).await;
    let bob = connect(&router).await;
    router.join(alice, room.clone(), PeerIdentity::from("alice")).await;

    router.join(bob, room.clone(), PeerIdentity::from("bob")).await;
    router.join(bob, room.clone(), PeerIdentity::from("bob")).await;

    assert_eq!(router.registry().members(&room).len(), 2);
    assert_eq!(
        signaling.joined_seen_by(&alice).await,
        vec![PeerIdentity::from("bob"), PeerIdentity::from("bob")]
    );
    assert!(signaling.joined_seen_by(&bob).await.is_empty());
}

#[tokio::test]
async fn test_rejoin_with_new_identity_updates_leave() {
    init_tracing();

    let (router, signaling) = create_test_router();
    let room = RoomId::from("room1");

    let alice = connect(&router).await;
    let bob = connect(&router).await;
    router.join(alice, room.clone(), PeerIdentity::from("alice")).await;
    router.join(bob, room.clone(), PeerIdentity::from("bob")).await;
    router.join(bob, room.clone(), PeerIdentity::from("robert")).await;

    beacon_server::SignalingHandler::on_disconnect(&router, bob).await;

    assert_eq!(signaling.left_seen_by(&alice).await, vec![PeerIdentity::from("robert")]);
}
