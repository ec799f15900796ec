//! Scattered rectangles: random rooms accepted only when they keep a one-cell buffer.

use crate::mapgen::config::BasicRoomConfig;
use crate::mapgen::seed::random_range;
use crate::room::{Room, generate_room, is_room_area_isolated};
use crate::shape::{Region, Shape};
use crate::types::{Pos, Size};

use super::{GenerationContext, Placement, Strategy};

pub(super) struct BasicRoomPlacement {
    config: BasicRoomConfig,
    target_rooms: usize,
    slots_started: usize,
}

impl BasicRoomPlacement {
    pub(super) fn new(config: BasicRoomConfig) -> Self {
        Self { config, target_rooms: 0, slots_started: 0 }
    }

    fn candidate(&self, context: &mut GenerationContext) -> Room {
        let rng = &mut context.rng;
        let width = random_range(rng, self.config.room_size_min, self.config.room_size_max);
        let height = random_range(rng, self.config.room_size_min, self.config.room_size_max);
        let x = random_range(rng, 0, context.grid.width() - width);
        let y = random_range(rng, 0, context.grid.height() - height);
        generate_room(Shape::rectangle(Pos::new(x, y), Size::new(width, height)))
    }
}

impl Strategy for BasicRoomPlacement {
    fn name(&self) -> &'static str {
        "basic_room_placement"
    }

    fn begin(&mut self, context: &mut GenerationContext) {
        let count =
            random_range(&mut context.rng, self.config.room_count_min, self.config.room_count_max);
        self.target_rooms = usize::try_from(count).unwrap_or_default();
        self.slots_started = 0;
        log::debug!("targeting {} rooms", self.target_rooms);
    }

    /// One room slot per step: placed, or abandoned after the attempt cap.
    fn place_step(&mut self, context: &mut GenerationContext) -> Placement {
        if self.slots_started >= self.target_rooms {
            return Placement::Finished;
        }
        self.slots_started += 1;

        for _ in 0..self.config.attempts_per_room {
            let room = self.candidate(context);
            if !context.selection.covers(room.shape())
                || !is_room_area_isolated(&room, &context.grid)
            {
                continue;
            }
            context.grid.move_to(room.shape().top_left());
            context.grid.fill_rect(room.shape().size(), &context.floor, true);
            context.rooms.push(room);
            context.stats.rooms_placed += 1;
            return Placement::Changed;
        }

        log::debug!(
            "room slot {} abandoned after {} attempts",
            self.slots_started,
            self.config.attempts_per_room
        );
        context.stats.slots_abandoned += 1;
        Placement::Unchanged
    }
}
