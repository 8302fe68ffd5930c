//! Farm model: rooms, tunnels, start and end markers
//!
//! Rooms live in a vector indexed by [`RoomId`]. Removing a room (see
//! [`crate::reduce`]) only marks its slot as gone, so ids taken from the
//! original farm stay valid in every reduced copy.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::FarmError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Index of a room inside its farm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl RoomId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A room and the rooms it is linked to, in declaration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub x: i64,
    pub y: i64,
    links: Vec<RoomId>,
    removed: bool,
}

impl Room {
    fn new(name: &str, x: i64, y: i64) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            links: Vec::new(),
            removed: false,
        }
    }

    pub fn links(&self) -> &[RoomId] {
        &self.links
    }
}

/// Undirected farm with a start room, an end room and a number of ants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Farm {
    ants: usize,
    rooms: Vec<Room>,
    index: FxHashMap<String, RoomId>,
    start: RoomId,
    end: RoomId,
}

impl Farm {
    pub fn ants(&self) -> usize {
        self.ants
    }

    pub fn start(&self) -> RoomId {
        self.start
    }

    pub fn end(&self) -> RoomId {
        self.end
    }

    /// Look up a room by name. Removed rooms are not found.
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.index
            .get(name)
            .copied()
            .filter(|&id| self.contains(id))
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    pub fn name(&self, id: RoomId) -> &str {
        &self.rooms[id.index()].name
    }

    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        &self.rooms[id.index()].links
    }

    /// Whether the room exists and has not been removed
    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.get(id.index()).is_some_and(|room| !room.removed)
    }

    /// Neither start nor end
    pub fn is_interior(&self, id: RoomId) -> bool {
        id != self.start && id != self.end
    }

    pub fn has_tunnel(&self, a: RoomId, b: RoomId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Live rooms in declaration order
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> + '_ {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| !room.removed)
            .map(|(i, room)| (RoomId(i), room))
    }

    pub fn room_count(&self) -> usize {
        self.rooms().count()
    }

    pub fn tunnel_count(&self) -> usize {
        self.rooms().map(|(_, room)| room.links.len()).sum::<usize>() / 2
    }

    /// Same layout with a different number of ants
    pub fn with_ants(&self, ants: usize) -> Result<Self, FarmError> {
        if ants == 0 {
            return Err(FarmError::InvalidAntCount(ants));
        }
        Ok(Self { ants, ..self.clone() })
    }

    /// Delete a room and every link pointing at it. Start and end are kept.
    pub(crate) fn remove_room(&mut self, id: RoomId) {
        if !self.is_interior(id) || !self.contains(id) {
            return;
        }
        let links = std::mem::take(&mut self.rooms[id.index()].links);
        for neighbor in links {
            self.rooms[neighbor.index()].links.retain(|&link| link != id);
        }
        self.rooms[id.index()].removed = true;
    }

    pub(crate) fn remove_tunnel(&mut self, a: RoomId, b: RoomId) {
        self.rooms[a.index()].links.retain(|&link| link != b);
        self.rooms[b.index()].links.retain(|&link| link != a);
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Incremental, validating construction of a [`Farm`]
#[derive(Clone, Debug, Default)]
pub struct FarmBuilder {
    ants: usize,
    rooms: Vec<Room>,
    index: FxHashMap<String, RoomId>,
    start: Option<RoomId>,
    end: Option<RoomId>,
}

impl FarmBuilder {
    pub fn new(ants: usize) -> Self {
        Self {
            ants,
            ..Default::default()
        }
    }

    /// Declare a room. Names must be non-empty and may not start with `L` or `#`.
    pub fn add_room(&mut self, name: &str, x: i64, y: i64) -> Result<RoomId, FarmError> {
        if name.is_empty() || name.starts_with('L') || name.starts_with('#') || name.contains('-') {
            return Err(FarmError::InvalidRoomName(name.to_string()));
        }
        if self.index.contains_key(name) {
            return Err(FarmError::DuplicateRoom(name.to_string()));
        }

        let id = RoomId(self.rooms.len());
        self.rooms.push(Room::new(name, x, y));
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn set_start(&mut self, id: RoomId) -> Result<(), FarmError> {
        if self.start.is_some() {
            return Err(FarmError::DuplicateStart);
        }
        self.start = Some(id);
        Ok(())
    }

    pub fn set_end(&mut self, id: RoomId) -> Result<(), FarmError> {
        if self.end.is_some() {
            return Err(FarmError::DuplicateEnd);
        }
        self.end = Some(id);
        Ok(())
    }

    /// Link two declared rooms in both directions
    pub fn add_tunnel(&mut self, a: &str, b: &str) -> Result<(), FarmError> {
        let a_id = self.lookup(a)?;
        let b_id = self.lookup(b)?;
        if a_id == b_id {
            return Err(FarmError::SelfLink(a.to_string()));
        }
        if self.rooms[a_id.index()].links.contains(&b_id) {
            return Err(FarmError::DuplicateTunnel(a.to_string(), b.to_string()));
        }

        self.rooms[a_id.index()].links.push(b_id);
        self.rooms[b_id.index()].links.push(a_id);
        Ok(())
    }

    pub fn build(self) -> Result<Farm, FarmError> {
        if self.ants == 0 {
            return Err(FarmError::InvalidAntCount(self.ants));
        }
        let start = self.start.ok_or(FarmError::MissingStart)?;
        let end = self.end.ok_or(FarmError::MissingEnd)?;
        if start == end {
            return Err(FarmError::StartIsEnd);
        }
        if self.rooms.len() < 2 {
            return Err(FarmError::TooFewRooms);
        }

        Ok(Farm {
            ants: self.ants,
            rooms: self.rooms,
            index: self.index,
            start,
            end,
        })
    }

    fn lookup(&self, name: &str) -> Result<RoomId, FarmError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| FarmError::UnknownRoom(name.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::farm_from;

    #[test]
    fn test_tunnels_are_reciprocal() {
        let farm = farm_from(1, &["start-a", "a-end", "start-b"]);
        for (id, room) in farm.rooms() {
            for &link in room.links() {
                assert!(farm.has_tunnel(link, id), "{} -> {}", room.name, farm.name(link));
            }
        }
        assert_eq!(farm.tunnel_count(), 3);
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        let mut builder = FarmBuilder::new(3);
        builder.add_room("a", 0, 0).unwrap();
        assert_eq!(builder.add_room("a", 1, 1), Err(FarmError::DuplicateRoom("a".into())));
        assert_eq!(builder.add_room("L1", 1, 1), Err(FarmError::InvalidRoomName("L1".into())));
        assert_eq!(builder.add_tunnel("a", "a"), Err(FarmError::SelfLink("a".into())));
        assert_eq!(builder.add_tunnel("a", "zz"), Err(FarmError::UnknownRoom("zz".into())));

        builder.add_room("b", 2, 2).unwrap();
        builder.add_tunnel("a", "b").unwrap();
        assert!(matches!(builder.add_tunnel("b", "a"), Err(FarmError::DuplicateTunnel(..))));
        assert_eq!(builder.clone().build(), Err(FarmError::MissingStart));
    }

    #[test]
    fn test_remove_room_cleans_links() {
        let mut farm = farm_from(1, &["start-a", "a-end", "start-b", "b-a"]);
        let a = farm.room_id("a").unwrap();
        farm.remove_room(a);

        assert!(!farm.contains(a));
        assert!(farm.room_id("a").is_none());
        assert!(farm.neighbors(a).is_empty());
        for (_, room) in farm.rooms() {
            assert!(!room.links().contains(&a));
        }
    }

    #[test]
    fn test_start_and_end_cannot_be_removed() {
        let mut farm = farm_from(1, &["start-end"]);
        let (start, end) = (farm.start(), farm.end());
        farm.remove_room(start);
        farm.remove_room(end);
        assert!(farm.contains(start) && farm.contains(end));
        assert!(farm.has_tunnel(start, end));
    }

    #[test]
    fn test_with_ants() {
        let farm = farm_from(1, &["start-end"]);
        assert_eq!(farm.with_ants(7).unwrap().ants(), 7);
        assert_eq!(farm.with_ants(0), Err(FarmError::InvalidAntCount(0)));
    }
}
