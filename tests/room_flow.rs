//! Integration tests for room flows: nick, join, rooms, messages.

mod common;

use common::TestServer;
use relayd::config::Config;
use std::time::Duration;

const QUIET: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_alice_and_bob_in_lobby() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");

    let mut alice = server.connect().await.expect("Failed to connect alice");
    let mut bob = server.connect().await.expect("Failed to connect bob");

    alice.nick("Alice").await.expect("Alice nick failed");
    alice.join("lobby").await.expect("Alice join failed");

    bob.nick("Bob").await.expect("Bob nick failed");
    bob.join("lobby").await.expect("Bob join failed");
    assert_eq!(alice.recv().await.unwrap(), "Bob has joined the room");

    bob.send_raw("/msg hello").await.unwrap();
    assert_eq!(alice.recv().await.unwrap(), "Bob: hello");

    // Free text is a message too.
    alice.send_raw("hi   Bob").await.unwrap();
    assert_eq!(bob.recv().await.unwrap(), "Alice: hi Bob");

    // Nobody hears their own echo.
    alice.expect_silence(QUIET).await.unwrap();
    bob.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_message_without_join() {
    let server = TestServer::spawn().await.unwrap();
    let mut lurker = server.connect().await.unwrap();
    let mut talker = server.connect().await.unwrap();

    lurker.join("lobby").await.unwrap();
    let before = server.snapshot().await.unwrap();

    talker.send_raw("/msg is anyone there").await.unwrap();
    assert_eq!(
        talker.recv().await.unwrap(),
        "err: you must join the room first"
    );
    talker.expect_silence(QUIET).await.unwrap();
    lurker.expect_silence(QUIET).await.unwrap();

    let after = server.snapshot().await.unwrap();
    assert_eq!(before.rooms, after.rooms);
}

#[tokio::test]
async fn test_rooms_listing() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("/rooms").await.unwrap();
    assert_eq!(client.recv().await.unwrap(), "available rooms are: ");

    client.join("lobby").await.unwrap();
    client.join("games").await.unwrap();
    client.send_raw("/rooms").await.unwrap();
    assert_eq!(client.recv().await.unwrap(), "available rooms are: games, lobby");
}

#[tokio::test]
async fn test_switching_rooms() {
    let server = TestServer::spawn().await.unwrap();
    let mut mover = server.connect().await.unwrap();
    let mut in_a = server.connect().await.unwrap();
    let mut in_b = server.connect().await.unwrap();

    mover.nick("mover").await.unwrap();
    in_a.join("a").await.unwrap();
    in_b.join("b").await.unwrap();
    mover.join("a").await.unwrap();
    assert_eq!(in_a.recv().await.unwrap(), "mover has joined the room");

    mover.join("b").await.unwrap();
    assert_eq!(in_a.recv().await.unwrap(), "mover has left the room");
    assert_eq!(in_b.recv().await.unwrap(), "mover has joined the room");

    mover.send_raw("/msg only b hears this").await.unwrap();
    assert_eq!(in_b.recv().await.unwrap(), "mover: only b hears this");
    in_a.expect_silence(QUIET).await.unwrap();

    let snapshot = server.snapshot().await.unwrap();
    assert!(snapshot.is_consistent());
    assert_eq!(snapshot.members("a").map(|m| m.len()), Some(1));
    assert_eq!(snapshot.members("b").map(|m| m.len()), Some(2));
}

#[tokio::test]
async fn test_usage_hints_and_unknown_commands() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("/nick").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap(),
        "nick is required. usage: /nick NAME"
    );

    client.send_raw("/join").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap(),
        "room name is required. usage: /join ROOM_NAME"
    );

    // Unknown commands and blank lines get no reply at all.
    client.send_raw("/dance wildly").await.unwrap();
    client.send_raw("").await.unwrap();
    client.send_raw("/rooms").await.unwrap();
    assert_eq!(client.recv().await.unwrap(), "available rooms are: ");
}

#[tokio::test]
async fn test_prune_empty_rooms() {
    let mut config = Config::default();
    config.rooms.prune_empty = true;
    let server = TestServer::spawn_with(config).await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.join("lobby").await.unwrap();
    client.join("games").await.unwrap();
    client.send_raw("/rooms").await.unwrap();
    assert_eq!(client.recv().await.unwrap(), "available rooms are: games");
}

#[tokio::test]
async fn test_per_client_order_is_preserved() {
    const CLIENTS: usize = 5;
    const MESSAGES: usize = 20;

    let server = TestServer::spawn().await.unwrap();
    let mut observer = server.connect().await.unwrap();
    observer.join("lobby").await.unwrap();

    let mut talkers = Vec::new();
    for i in 0..CLIENTS {
        let mut talker = server.connect().await.unwrap();
        talker.nick(&format!("t{i}")).await.unwrap();
        talker.join("lobby").await.unwrap();
        observer
            .recv_until(|line| line.ends_with("has joined the room"))
            .await
            .unwrap();
        talkers.push(talker);
    }

    let mut tasks = Vec::new();
    for mut talker in talkers {
        tasks.push(tokio::spawn(async move {
            for seq in 0..MESSAGES {
                talker.send_raw(&format!("/msg {seq}")).await.unwrap();
            }
            talker
        }));
    }

    let mut next = vec![0usize; CLIENTS];
    for _ in 0..CLIENTS * MESSAGES {
        let line = observer.recv().await.unwrap();
        let (nick, seq) = line.split_once(": ").expect("message line");
        let idx: usize = nick.trim_start_matches('t').parse().unwrap();
        assert_eq!(seq.parse::<usize>().unwrap(), next[idx], "{nick} reordered");
        next[idx] += 1;
    }
    assert!(next.iter().all(|n| *n == MESSAGES));

    // Keep the talkers connected until every line has been checked.
    for task in tasks {
        task.await.unwrap();
    }
}
