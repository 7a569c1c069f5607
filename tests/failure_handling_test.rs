use async_trait::async_trait;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use votifier::adapters::key_io;
use votifier::{TomlConfig, Vote, VoteListener, Votifier, VotifierHandle};

struct CountingListener {
    dispatched: Arc<AtomicUsize>,
}

#[async_trait]
impl VoteListener for CountingListener {
    fn name(&self) -> &str {
        "counting"
    }

    async fn on_vote(&self, _vote: &Vote) -> votifier::Result<()> {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

async fn start_receiver(read_timeout_secs: u64) -> (VotifierHandle, RsaPublicKey, Arc<AtomicUsize>) {
    let key_pair = key_io::generate(1024).unwrap();
    let public_key = key_pair.public_key.clone();
    let dispatched = Arc::new(AtomicUsize::new(0));

    let mut config = TomlConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.protocol.read_timeout_secs = read_timeout_secs;

    let mut votifier = Votifier::new(&config, key_pair);
    votifier.register(Box::new(CountingListener {
        dispatched: dispatched.clone(),
    }));

    let handle = votifier.start().await.unwrap();
    (handle, public_key, dispatched)
}

async fn read_greeting(stream: &mut TcpStream) {
    let mut byte = [0u8; 1];
    loop {
        stream.read_exact(&mut byte).await.unwrap();
        if byte[0] == b'\n' {
            break;
        }
    }
}

/// Reads until the server closes the connection, returning how long that took.
async fn read_to_eof(stream: &mut TcpStream) -> Duration {
    let start = Instant::now();
    let mut buf = [0u8; 64];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return start.elapsed(),
            Ok(_) => continue,
        }
    }
}

#[tokio::test]
async fn test_silent_peer_closed_at_deadline_without_dispatch() {
    let (handle, _public_key, dispatched) = start_receiver(1).await;

    let mut stream = TcpStream::connect(handle.local_addr()).await.unwrap();
    read_greeting(&mut stream).await;

    // Send nothing; the server must hang up once the read deadline passes.
    let elapsed = tokio::time::timeout(Duration::from_secs(5), read_to_eof(&mut stream))
        .await
        .expect("server never closed the stalled connection");
    assert!(elapsed >= Duration::from_millis(900));

    handle.stop().await;
    assert_eq!(dispatched.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_truncated_block_is_dropped() {
    let (handle, _public_key, dispatched) = start_receiver(2).await;

    let mut stream = TcpStream::connect(handle.local_addr()).await.unwrap();
    read_greeting(&mut stream).await;
    stream.write_all(&[0u8; 10]).await.unwrap();
    stream.shutdown().await.unwrap();

    read_to_eof(&mut stream).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    handle.stop().await;
    assert_eq!(dispatched.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_undecryptable_block_does_not_kill_the_receiver() {
    let (handle, public_key, dispatched) = start_receiver(2).await;
    let addr = handle.local_addr();

    // Garbage block of the right size: decryption fails, connection dropped.
    let mut stream = TcpStream::connect(addr).await.unwrap();
    read_greeting(&mut stream).await;
    stream.write_all(&[0x42u8; 128]).await.unwrap();
    stream.shutdown().await.unwrap();
    read_to_eof(&mut stream).await;
    assert_eq!(dispatched.load(Ordering::SeqCst), 0);

    // A valid submission right after still lands.
    let block = public_key
        .encrypt(
            &mut rand::thread_rng(),
            Pkcs1v15Encrypt,
            b"VOTE\nSiteA\nBob\n198.51.100.7\n1700000001\n".as_slice(),
        )
        .unwrap();
    let mut stream = TcpStream::connect(addr).await.unwrap();
    read_greeting(&mut stream).await;
    stream.write_all(&block).await.unwrap();
    stream.shutdown().await.unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while dispatched.load(Ordering::SeqCst) < 1 {
        assert!(Instant::now() < deadline, "valid vote was never dispatched");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    handle.stop().await;
    assert_eq!(dispatched.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_payload_is_dropped() {
    let (handle, public_key, dispatched) = start_receiver(2).await;

    // Encrypts fine but carries the wrong opcode, so decoding rejects it.
    let block = public_key
        .encrypt(
            &mut rand::thread_rng(),
            Pkcs1v15Encrypt,
            b"PING\nSiteA\nBob\n198.51.100.7\n1700000001\n".as_slice(),
        )
        .unwrap();

    let mut stream = TcpStream::connect(handle.local_addr()).await.unwrap();
    read_greeting(&mut stream).await;
    stream.write_all(&block).await.unwrap();
    stream.shutdown().await.unwrap();
    read_to_eof(&mut stream).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    handle.stop().await;
    assert_eq!(dispatched.load(Ordering::SeqCst), 0);
}
