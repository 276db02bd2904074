use beacon_core::{ConnectionId, PeerIdentity, RoomId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct ConnectionEntry {
    /// Rooms this connection is in, with the identity it used to join each.
    rooms: HashMap<RoomId, PeerIdentity>,
    last_identity: Option<PeerIdentity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub connections: usize,
    pub rooms: usize,
}

/// In-memory room membership and connection registry.
///
/// Both maps are sharded (`DashMap`), so transport workers can mutate
/// membership concurrently. No guard is ever returned to the caller: every
/// method copies out what it needs so fan-out happens without a lock held.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, HashSet<ConnectionId>>,
    connections: DashMap<ConnectionId, ConnectionEntry>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the connection was already registered.
    pub fn register(&self, connection_id: ConnectionId) -> bool {
        match self.connections.entry(connection_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(ConnectionEntry::default());
                true
            }
        }
    }

    /// Forgets the connection and hands back the rooms it still had joined.
    /// Room member sets are left untouched; the caller leaves each room.
    pub fn unregister(&self, connection_id: &ConnectionId) -> Option<Vec<(RoomId, PeerIdentity)>> {
        self.connections
            .remove(connection_id)
            .map(|(_, entry)| entry.rooms.into_iter().collect())
    }

    pub fn is_connected(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains_key(connection_id)
    }

    /// Identity of the most recent join made by this connection.
    pub fn identity_of(&self, connection_id: &ConnectionId) -> Option<PeerIdentity> {
        self.connections
            .get(connection_id)
            .and_then(|entry| entry.last_identity.clone())
    }

    pub fn identity_in(&self, connection_id: &ConnectionId, room: &RoomId) -> Option<PeerIdentity> {
        self.connections
            .get(connection_id)
            .and_then(|entry| entry.rooms.get(room).cloned())
    }

    /// Adds the connection to the room and returns the other members.
    ///
    /// `None` when the connection is not registered.
    ///
    /// The connection entry stays locked until the room set is updated, so a
    /// concurrent `unregister` either sees this room or prevents the insert.
    /// Lock order is connection then room; nothing takes them the other way.
    pub fn add_member(
        &self,
        connection_id: ConnectionId,
        room: &RoomId,
        identity: PeerIdentity,
    ) -> Option<Vec<ConnectionId>> {
        let mut entry = self.connections.get_mut(&connection_id)?;
        entry.rooms.insert(room.clone(), identity.clone());
        entry.last_identity = Some(identity);

        let mut members = self.rooms.entry(room.clone()).or_default();
        members.insert(connection_id);
        drop(entry);

        Some(
            members
                .iter()
                .filter(|member| **member != connection_id)
                .copied()
                .collect(),
        )
    }

    /// Removes the connection from the room and returns the remaining members.
    ///
    /// `None` when the connection was not a member. A room whose member set
    /// becomes empty is dropped.
    pub fn remove_member(&self, connection_id: &ConnectionId, room: &RoomId) -> Option<Vec<ConnectionId>> {
        if let Some(mut entry) = self.connections.get_mut(connection_id) {
            entry.rooms.remove(room);
        }

        let remaining: Vec<ConnectionId> = {
            let mut members = self.rooms.get_mut(room)?;
            if !members.remove(connection_id) {
                return None;
            }
            members.iter().copied().collect()
        };

        if remaining.is_empty() {
            self.rooms.remove_if(room, |_, members| members.is_empty());
        }

        Some(remaining)
    }

    pub fn members(&self, room: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains_room(&self, room: &RoomId) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            connections: self.connections.len(),
            rooms: self.rooms.len(),
        }
    }
}
