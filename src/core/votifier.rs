use crate::core::keystore::{KeyPair, KeyStore};
use crate::core::receiver::VoteReceiver;
use crate::core::registry::ListenerRegistry;
use crate::domain::ports::{ConfigProvider, VoteListener};
use crate::utils::error::{Result, VotifierError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Wires the key store, listener registry and vote receiver together from
/// host-supplied configuration. Listeners are registered up front; `start`
/// consumes the instance and hands back a [`VotifierHandle`].
pub struct Votifier {
    bind_addr: String,
    read_timeout: Duration,
    key_pair: KeyPair,
    registry: ListenerRegistry,
}

impl Votifier {
    pub fn new<C: ConfigProvider>(config: &C, key_pair: KeyPair) -> Self {
        Self {
            bind_addr: format!("{}:{}", config.host(), config.port()),
            read_timeout: config.read_timeout(),
            key_pair,
            registry: ListenerRegistry::new(),
        }
    }

    pub fn register(&mut self, listener: Box<dyn VoteListener>) {
        self.registry.register(listener);
    }

    /// Binds the listening socket and spawns the accept loop. A bind failure
    /// is fatal: no task is spawned and no socket is left half-open.
    pub async fn start(self) -> Result<VotifierHandle> {
        if self.registry.is_empty() {
            tracing::warn!("No vote listeners registered; votes will be decoded and discarded");
        }

        let listener = TcpListener::bind(&self.bind_addr).await.map_err(|e| {
            VotifierError::startup(format!("unable to bind to {}: {}", self.bind_addr, e))
        })?;
        let local_addr = listener.local_addr().map_err(VotifierError::IoError)?;

        let keystore = Arc::new(KeyStore::new(self.key_pair));
        let registry = Arc::new(self.registry);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let receiver = VoteReceiver::new(listener, keystore, registry, self.read_timeout);
        let task = tokio::spawn(receiver.run(shutdown_rx));

        tracing::info!("Votifier enabled, listening on {}", local_addr);

        Ok(VotifierHandle {
            local_addr,
            shutdown_tx,
            task,
        })
    }
}

/// Running receiver. Dropping the handle closes the shutdown channel, which
/// also stops the accept loop; `stop` additionally waits for it to exit.
pub struct VotifierHandle {
    local_addr: SocketAddr,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl VotifierHandle {
    /// Actual bound address; differs from the configured one when port 0 was
    /// requested.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting, closes the listening socket and waits for the accept
    /// loop to exit. In-flight connections complete their single pass.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
        tracing::info!("Votifier disabled");
    }
}
