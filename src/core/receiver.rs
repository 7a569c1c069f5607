use crate::core::codec;
use crate::core::keystore::KeyStore;
use crate::core::registry::ListenerRegistry;
use crate::utils::error::Result;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

/// Protocol version announced in the greeting line.
pub const PROTOCOL_VERSION: &str = "1.9";

/// Accepts vote submissions and runs the per-connection protocol: greet the
/// peer, read exactly one encrypted block, decrypt, decode, dispatch.
///
/// The accept loop never waits on an in-flight connection; every accepted
/// socket is handled on its own task. A connection failure of any kind is
/// logged and closes that connection only.
pub struct VoteReceiver {
    listener: TcpListener,
    keystore: Arc<KeyStore>,
    registry: Arc<ListenerRegistry>,
    read_timeout: Duration,
}

impl VoteReceiver {
    pub fn new(
        listener: TcpListener,
        keystore: Arc<KeyStore>,
        registry: Arc<ListenerRegistry>,
        read_timeout: Duration,
    ) -> Self {
        Self {
            listener,
            keystore,
            registry,
            read_timeout,
        }
    }

    /// Runs the accept loop until `shutdown` flips. In-flight connections
    /// finish their single pass; the read deadline bounds how long that takes.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    tracing::info!("Vote receiver shutting down");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let keystore = self.keystore.clone();
                            let registry = self.registry.clone();
                            let read_timeout = self.read_timeout;

                            tokio::spawn(async move {
                                if let Err(e) =
                                    handle_connection(stream, peer, keystore, registry, read_timeout)
                                        .await
                                {
                                    tracing::warn!("Dropped submission from {}: {}", peer, e);
                                }
                            });
                        }
                        Err(e) => {
                            tracing::error!("Failed to accept connection: {}", e);
                            tokio::time::sleep(Duration::from_millis(100)).await;
                        }
                    }
                }
            }
        }
    }
}

/// One pass of the connection state machine. Any error closes the connection
/// with nothing dispatched; the submitter gets no acknowledgement either way.
async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    keystore: Arc<KeyStore>,
    registry: Arc<ListenerRegistry>,
    read_timeout: Duration,
) -> Result<()> {
    tracing::debug!("Received connection from {}", peer);

    stream
        .write_all(format!("VOTIFIER {}\n", PROTOCOL_VERSION).as_bytes())
        .await?;
    stream.flush().await?;

    let mut block = vec![0u8; keystore.block_size()];
    tokio::time::timeout(read_timeout, stream.read_exact(&mut block))
        .await
        .map_err(|_| {
            std::io::Error::new(
                ErrorKind::TimedOut,
                format!("no complete block within {:?}", read_timeout),
            )
        })??;

    let plaintext = keystore.decrypt(&block)?;
    let vote = codec::parse(&plaintext)?;

    tracing::info!("Received vote record -> {}", vote);
    registry.dispatch(&vote).await;

    Ok(())
}
