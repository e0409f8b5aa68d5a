//! # Map World
//!
//! A bounded tile map in screen coordinates (x grows right, y grows down)
//! holding the player and the events that carry watchers. Positions are
//! converted with [`TilePos::from_screen`] when the engine asks for them.

use std::collections::HashMap;

use sentinel_core::WorldModel;
use sentinel_shared::{Facing, Pose, Target, TilePos, WatcherId};

/// One map event: a screen tile and a facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapEvent {
    /// Screen tile.
    pub x: i32,
    /// Screen tile.
    pub y: i32,
    /// Facing.
    pub facing: Facing,
}

/// Tile map with a player and events.
#[derive(Clone, Debug)]
pub struct MapWorld {
    width: i32,
    height: i32,
    events: HashMap<WatcherId, MapEvent>,
    player: Option<(i32, i32)>,
}

impl MapWorld {
    /// Creates an empty `width` x `height` map with no player.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            events: HashMap::new(),
            player: None,
        }
    }

    /// Map width in tiles.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Map height in tiles.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (x.clamp(0, self.width - 1), y.clamp(0, self.height - 1))
    }

    /// Places an event, replacing any event with the same id.
    pub fn spawn_event(&mut self, id: WatcherId, x: i32, y: i32, facing: Facing) {
        let (x, y) = self.clamp(x, y);
        self.events.insert(id, MapEvent { x, y, facing });
    }

    /// Removes an event. Returns false if it was not on the map.
    pub fn despawn_event(&mut self, id: WatcherId) -> bool {
        self.events.remove(&id).is_some()
    }

    /// Moves an event. Returns false if it is not on the map.
    pub fn move_event(&mut self, id: WatcherId, x: i32, y: i32) -> bool {
        let (x, y) = self.clamp(x, y);
        match self.events.get_mut(&id) {
            Some(event) => {
                event.x = x;
                event.y = y;
                true
            }
            None => false,
        }
    }

    /// Moves an event one tile along its facing. Returns false if it is not
    /// on the map.
    pub fn step_event(&mut self, id: WatcherId) -> bool {
        let Some(event) = self.events.get(&id).copied() else {
            return false;
        };
        let (dx, dy) = event.facing.screen_step();
        self.move_event(id, event.x.saturating_add(dx), event.y.saturating_add(dy))
    }

    /// Turns an event. Returns false if it is not on the map.
    pub fn turn_event(&mut self, id: WatcherId, facing: Facing) -> bool {
        match self.events.get_mut(&id) {
            Some(event) => {
                event.facing = facing;
                true
            }
            None => false,
        }
    }

    /// An event's current state.
    #[must_use]
    pub fn event(&self, id: WatcherId) -> Option<MapEvent> {
        self.events.get(&id).copied()
    }

    /// Places the player.
    pub fn move_player(&mut self, x: i32, y: i32) {
        self.player = Some(self.clamp(x, y));
    }

    /// Moves the player one tile. Does nothing before the player is placed.
    pub fn step_player(&mut self, direction: Facing) {
        if let Some((x, y)) = self.player {
            let (dx, dy) = direction.screen_step();
            self.move_player(x.saturating_add(dx), y.saturating_add(dy));
        }
    }

    /// Takes the player off the map.
    pub fn remove_player(&mut self) {
        self.player = None;
    }

    /// Player's screen tile.
    #[must_use]
    pub fn player(&self) -> Option<(i32, i32)> {
        self.player
    }
}

impl WorldModel for MapWorld {
    fn watcher_pose(&self, id: WatcherId) -> Option<Pose> {
        self.events
            .get(&id)
            .map(|e| Pose::new(TilePos::from_screen(e.x, e.y), e.facing))
    }

    fn target(&self) -> Option<Target> {
        self.player
            .map(|(x, y)| Target::at(TilePos::from_screen(x, y)))
    }
}
