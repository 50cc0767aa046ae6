mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{fast_sync, memory_store, second_session};
use pairchat::chat::{USER_1, USER_2};
use pairchat::store::ChatProvider;

#[tokio::test(start_paused = true)]
async fn refresh_picks_up_other_session_within_one_interval() {
    let (backend, alice) = memory_store();
    let provider = ChatProvider::start(Arc::clone(&alice), &fast_sync());
    alice.login(USER_1);

    let bob = second_session(&backend);
    bob.login(USER_2);
    bob.send_message("hello from bob", None);

    assert!(alice.state().messages.is_empty());
    tokio::time::sleep(Duration::from_millis(150)).await;

    let state = alice.state();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].sender_id, USER_2);
    assert!(state.users[USER_2].is_online);
    assert_eq!(state.current_user.as_ref().map(|u| u.id.as_str()), Some(USER_1));

    provider.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn refresh_keeps_session_fields() {
    let (backend, alice) = memory_store();
    let _provider = ChatProvider::start(Arc::clone(&alice), &fast_sync());
    alice.login(USER_1);
    alice.set_typing(true);

    let bob = second_session(&backend);
    bob.login(USER_2);

    tokio::time::sleep(Duration::from_millis(350)).await;
    let state = alice.state();
    assert!(state.is_typing);
    assert_eq!(state.current_user.as_ref().map(|u| u.id.as_str()), Some(USER_1));
}

#[tokio::test(start_paused = true)]
async fn refresh_without_stored_data_keeps_memory() {
    let (_backend, alice) = memory_store();
    let before = alice.state();
    let _provider = ChatProvider::start(Arc::clone(&alice), &fast_sync());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(alice.state(), before);
}

#[tokio::test(start_paused = true)]
async fn observers_are_notified_of_remote_changes() {
    let (backend, alice) = memory_store();
    let mut updates = alice.subscribe();
    let _provider = ChatProvider::start(Arc::clone(&alice), &fast_sync());

    let bob = second_session(&backend);
    bob.login(USER_2);
    bob.send_message("are you there?", None);

    tokio::time::timeout(Duration::from_secs(1), updates.changed())
        .await
        .expect("no update within a second")
        .expect("store dropped");
    assert_eq!(updates.borrow().messages.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_provider_stops_refresh() {
    let (backend, alice) = memory_store();
    let provider = ChatProvider::start(Arc::clone(&alice), &fast_sync());
    drop(provider);

    let bob = second_session(&backend);
    bob.login(USER_2);
    bob.send_message("too late", None);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(alice.state().messages.is_empty());
}

#[tokio::test(start_paused = true)]
async fn read_receipts_mark_incoming_messages() {
    let (backend, alice) = memory_store();
    let provider = ChatProvider::start(Arc::clone(&alice), &fast_sync());
    alice.login(USER_1);

    let bob = second_session(&backend);
    bob.login(USER_2);
    bob.send_message("first", None);

    let receipts = provider.read_receipts();
    // Receipts fire at once and then every 500ms; the refresh at 100ms
    // brings in bob's message, the tick at 500ms marks it read.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(alice.state().messages[0].read);

    bob.send_message("second", None);
    drop(receipts);
    tokio::time::sleep(Duration::from_secs(2)).await;
    let state = alice.state();
    assert_eq!(state.messages.len(), 2);
    assert!(!state.messages[1].read);
}
