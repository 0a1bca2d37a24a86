//! Request forwarding and response dispatch.

use std::collections::HashMap;

use fieldlink_frame::{DeviceId, Frame, Request, Response, Resynchronizer};

use crate::error::{Result, RouterError};
use crate::link::Link;

/// Response handler registered for one device id.
pub type Callback = Box<dyn FnMut(Response) + Send>;

/// Router behavior knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterConfig {
    /// Return encode failures from [`Router::handle_request`] instead of
    /// logging and dropping the request. Off by default: outbound requests
    /// are fire-and-forget, and a caller that wants the error opts in.
    pub surface_encode_failures: bool,
}

/// Routes requests out to the bridge and decoded responses back to the
/// device that registered for them.
///
/// Purely reactive: nothing happens between [`Router::poll`] calls, and the
/// caller owns the polling cadence. All state is touched only from that
/// single polling context, so no locking is involved.
pub struct Router<L> {
    link: L,
    resync: Resynchronizer,
    subscribers: HashMap<DeviceId, Callback>,
    config: RouterConfig,
}

impl<L: Link> Router<L> {
    pub fn new(link: L) -> Self {
        Self::with_config(link, RouterConfig::default())
    }

    pub fn with_config(link: L, config: RouterConfig) -> Self {
        Self {
            link,
            resync: Resynchronizer::new(),
            subscribers: HashMap::new(),
            config,
        }
    }

    /// Associate `id` with a response callback.
    ///
    /// At most one subscriber per id; a second registration for the same id
    /// is a hard error, never silently replaced.
    pub fn register(
        &mut self,
        id: DeviceId,
        callback: impl FnMut(Response) + Send + 'static,
    ) -> Result<()> {
        match self.subscribers.entry(id) {
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(Box::new(callback));
                tracing::debug!(%id, "device registered");
                Ok(())
            }
            std::collections::hash_map::Entry::Occupied(_) => {
                Err(RouterError::AlreadyRegistered { id })
            }
        }
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Ids with a registered callback.
    pub fn device_ids(&self) -> Vec<DeviceId> {
        let mut ids: Vec<_> = self.subscribers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Encode `request` and write its frame to the bridge.
    ///
    /// A request that fails to encode is logged and dropped unless
    /// [`RouterConfig::surface_encode_failures`] is set. Writes are refused
    /// with [`RouterError::ProcessGone`] when the bridge has exited.
    pub fn handle_request(&mut self, request: &Request) -> Result<()> {
        let frame = match request.encode() {
            Ok(frame) => frame,
            Err(err) => {
                if self.config.surface_encode_failures {
                    return Err(err.into());
                }
                tracing::warn!(id = %request.id(), %err, "dropping request that failed to encode");
                return Ok(());
            }
        };
        self.send_frame(&frame)
    }

    /// Write an already-encoded frame to the bridge.
    pub fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        if !self.link.is_alive() {
            return Err(RouterError::ProcessGone);
        }
        tracing::debug!(frame = ?frame.as_bytes(), "writing frame to bridge");
        self.link.write_frame(frame)?;
        Ok(())
    }

    /// One inbound poll cycle.
    ///
    /// Drains ready bytes into the resynchronizer until at most one frame
    /// emerges, decodes it, and dispatches the response to its registered
    /// callback, returning the dispatched id. An unparseable frame is
    /// logged and dropped (`Ok(None)`; the stream resynchronizes on later
    /// cycles). A response for an unregistered id is reported as
    /// [`RouterError::NoSubscriber`] and dropped — not fatal, not buffered.
    pub fn poll(&mut self) -> Result<Option<DeviceId>> {
        let Some(frame) = self.next_inbound_frame() else {
            return Ok(None);
        };

        let response = match Response::decode(frame.as_ref()) {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(frame = ?frame.as_bytes(), %err, "discarding unparseable frame");
                return Ok(None);
            }
        };

        let id = response.id();
        match self.subscribers.get_mut(&id) {
            Some(callback) => {
                tracing::debug!(%id, "dispatching response");
                callback(response);
                Ok(Some(id))
            }
            None => {
                tracing::warn!(%id, "response for unregistered device dropped");
                Err(RouterError::NoSubscriber { id })
            }
        }
    }

    /// A frame already buffered in the resynchronizer, or the first one
    /// completed by bytes ready on the link.
    fn next_inbound_frame(&mut self) -> Option<Frame> {
        if let Some(frame) = self.resync.next_frame() {
            return Some(frame);
        }
        while let Some(byte) = self.link.try_read_byte() {
            if let Some(frame) = self.resync.push(byte) {
                return Some(frame);
            }
        }
        None
    }

    /// Borrow the underlying link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}
