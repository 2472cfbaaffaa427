use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};
use zbus::{Connection, fdo::DBusProxy, names::OwnedBusName};

use super::monitoring::{ClientHandle, ClientMap, ClientMonitoring, ClientSignal};
use super::proxy::{MediaPlayer2PlayerProxy, MediaPlayer2Proxy};
use super::types::{ClientId, MPRIS_BUS_PREFIX};
use crate::services::media_session::MediaSessionError;

/// Handles media client discovery on the session bus.
///
/// Watches for `org.mpris.MediaPlayer2.*` names appearing and disappearing,
/// registering clients in the shared map and forwarding lifecycle signals
/// to the session loop.
pub(crate) struct ClientDiscovery;

impl ClientDiscovery {
    /// Discover existing clients, then monitor for lifecycle changes.
    ///
    /// Existing clients are fully registered before this returns; the
    /// returned task keeps watching `NameOwnerChanged` for the rest of the
    /// service lifetime.
    ///
    /// # Errors
    /// Returns error if D-Bus proxy creation or name listing fails
    #[instrument(skip_all)]
    pub(crate) async fn start(
        connection: &Connection,
        clients: ClientMap,
        signals_tx: mpsc::UnboundedSender<ClientSignal>,
        ignored_patterns: Vec<String>,
    ) -> Result<JoinHandle<()>, MediaSessionError> {
        Self::discover_existing(connection, &clients, &signals_tx, &ignored_patterns).await?;

        Ok(Self::spawn_name_monitoring(
            connection,
            clients,
            signals_tx,
            ignored_patterns,
        ))
    }

    async fn discover_existing(
        connection: &Connection,
        clients: &ClientMap,
        signals_tx: &mpsc::UnboundedSender<ClientSignal>,
        ignored_patterns: &[String],
    ) -> Result<(), MediaSessionError> {
        let dbus_proxy = DBusProxy::new(connection).await.map_err(|e| {
            MediaSessionError::InitializationFailed(format!("DBus proxy failed: {e}"))
        })?;

        let names = dbus_proxy
            .list_names()
            .await
            .map_err(|e| MediaSessionError::DbusError(e.into()))?;

        for name in names {
            if name.starts_with(MPRIS_BUS_PREFIX) && !Self::should_ignore(&name, ignored_patterns) {
                let client_id = ClientId::from_bus_name(&name);
                Self::handle_client_added(connection, clients, signals_tx, client_id).await;
            }
        }

        Ok(())
    }

    fn spawn_name_monitoring(
        connection: &Connection,
        clients: ClientMap,
        signals_tx: mpsc::UnboundedSender<ClientSignal>,
        ignored_patterns: Vec<String>,
    ) -> JoinHandle<()> {
        let connection = connection.clone();

        tokio::spawn(async move {
            let Ok(dbus_proxy) = DBusProxy::new(&connection).await else {
                warn!("Failed to create DBus proxy for name monitoring");
                return;
            };

            let Ok(mut name_owner_changed) = dbus_proxy.receive_name_owner_changed().await else {
                warn!("Failed to subscribe to NameOwnerChanged");
                return;
            };

            while let Some(signal) = name_owner_changed.next().await {
                let Ok(args) = signal.args() else { continue };

                if !args.name().starts_with(MPRIS_BUS_PREFIX) {
                    continue;
                }

                let client_id = ClientId::from_bus_name(args.name());

                let is_client_added = args.old_owner().is_none() && args.new_owner().is_some();
                let is_client_removed = args.old_owner().is_some() && args.new_owner().is_none();

                if is_client_added && !Self::should_ignore(args.name(), &ignored_patterns) {
                    Self::handle_client_added(&connection, &clients, &signals_tx, client_id).await;
                } else if is_client_removed {
                    Self::handle_client_removed(&clients, &signals_tx, client_id).await;
                }
            }

            debug!("Name monitoring ended");
        })
    }

    async fn handle_client_added(
        connection: &Connection,
        clients: &ClientMap,
        signals_tx: &mpsc::UnboundedSender<ClientSignal>,
        client_id: ClientId,
    ) {
        match Self::register_client(connection, &client_id).await {
            Ok((player, app_id)) => {
                let watch_task =
                    ClientMonitoring::spawn(client_id.clone(), player.clone(), signals_tx.clone());

                let mut clients_map = clients.write().await;
                clients_map.insert(
                    client_id.clone(),
                    ClientHandle {
                        player,
                        app_id,
                        watch_task,
                    },
                );
                drop(clients_map);

                let _ = signals_tx.send(ClientSignal::Added(client_id.clone()));
                debug!("Media client {client_id} added");
            }
            Err(e) => {
                warn!("Failed to register media client {client_id}: {e}");
            }
        }
    }

    async fn handle_client_removed(
        clients: &ClientMap,
        signals_tx: &mpsc::UnboundedSender<ClientSignal>,
        client_id: ClientId,
    ) {
        let mut clients_map = clients.write().await;
        if let Some(handle) = clients_map.remove(&client_id) {
            handle.watch_task.abort();
        }
        drop(clients_map);

        let _ = signals_tx.send(ClientSignal::Removed(client_id.clone()));
        debug!("Media client {client_id} removed");
    }

    /// Build proxies for a client and resolve its application identifier.
    ///
    /// The identifier prefers the desktop entry, falling back to the
    /// bus-name suffix when none is published.
    async fn register_client(
        connection: &Connection,
        client_id: &ClientId,
    ) -> Result<(MediaPlayer2PlayerProxy<'static>, String), MediaSessionError> {
        let bus_name = OwnedBusName::try_from(client_id.bus_name())
            .map_err(|e| MediaSessionError::InitializationFailed(format!("Invalid bus name: {e}")))?;

        let base_proxy = MediaPlayer2Proxy::builder(connection)
            .destination(bus_name.clone())
            .map_err(MediaSessionError::DbusError)?
            .build()
            .await
            .map_err(MediaSessionError::DbusError)?;

        let player_proxy = MediaPlayer2PlayerProxy::builder(connection)
            .destination(bus_name)
            .map_err(MediaSessionError::DbusError)?
            .build()
            .await
            .map_err(MediaSessionError::DbusError)?;

        let app_id = match base_proxy.desktop_entry().await {
            Ok(entry) if !entry.is_empty() => entry,
            _ => client_id.app_id().to_string(),
        };

        Ok((player_proxy, app_id))
    }

    fn should_ignore(bus_name: &str, ignored_patterns: &[String]) -> bool {
        ignored_patterns
            .iter()
            .any(|pattern| bus_name.contains(pattern))
    }
}
