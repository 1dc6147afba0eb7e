use engine::{Rect, Vec2};

use super::collision;
use super::crafting::Carrying;

const DIAGONAL_FACTOR: f32 = 0.707;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MovementKeys {
    pub(crate) up: bool,
    pub(crate) down: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
}

/// The player-controlled elf. `position` is the top-left corner of the
/// collision box, which is smaller than the drawn sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Actor {
    pub(crate) position: Vec2,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) base_speed: f32,
    pub(crate) speed: f32,
    pub(crate) facing: Facing,
    pub(crate) moving: bool,
    pub(crate) carrying: Option<Carrying>,
}

impl Actor {
    pub(crate) fn new(position: Vec2, width: f32, height: f32, base_speed: f32) -> Self {
        Self {
            position,
            width,
            height,
            base_speed,
            speed: base_speed,
            facing: Facing::default(),
            moving: false,
            carrying: None,
        }
    }

    pub(crate) fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub(crate) fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MotionBounds {
    pub(crate) field: Rect,
    pub(crate) margin: f32,
}

/// Advances the actor by `elapsed_seconds` of held movement keys, clamps it
/// inside the field margin and pushes it out of blockers.
pub(crate) fn step(
    actor: &Actor,
    keys: MovementKeys,
    elapsed_seconds: f32,
    bounds: &MotionBounds,
    blockers: &[Rect],
) -> Actor {
    let direction = direction_from_keys(keys);
    let mut next = *actor;

    next.position.x += direction.x * actor.speed * elapsed_seconds;
    next.position.y += direction.y * actor.speed * elapsed_seconds;
    next.position = clamp_to_bounds(next.position, actor.width, actor.height, bounds);

    let push = collision::resolve(next.rect(), blockers);
    next.position.x += push.x;
    next.position.y += push.y;

    next.moving = direction.x != 0.0 || direction.y != 0.0;
    if next.moving {
        next.facing = facing_from_keys(keys, actor.facing);
    }
    next
}

fn direction_from_keys(keys: MovementKeys) -> Vec2 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;

    if keys.up {
        y -= 1.0;
    }
    if keys.down {
        y += 1.0;
    }
    if keys.left {
        x -= 1.0;
    }
    if keys.right {
        x += 1.0;
    }

    if x != 0.0 && y != 0.0 {
        x *= DIAGONAL_FACTOR;
        y *= DIAGONAL_FACTOR;
    }
    Vec2 { x, y }
}

/// Later checks win, so a held horizontal key decides facing on diagonals.
fn facing_from_keys(keys: MovementKeys, current: Facing) -> Facing {
    let mut facing = current;
    if keys.up && !keys.down {
        facing = Facing::Up;
    }
    if keys.down && !keys.up {
        facing = Facing::Down;
    }
    if keys.left && !keys.right {
        facing = Facing::Left;
    }
    if keys.right && !keys.left {
        facing = Facing::Right;
    }
    facing
}

fn clamp_to_bounds(position: Vec2, width: f32, height: f32, bounds: &MotionBounds) -> Vec2 {
    let min_x = bounds.field.x + bounds.margin;
    let min_y = bounds.field.y + bounds.margin;
    let max_x = bounds.field.right() - bounds.margin - width;
    let max_y = bounds.field.bottom() - bounds.margin - height;
    // A field smaller than the actor pins it to the minimum corner.
    Vec2 {
        x: position.x.min(max_x).max(min_x),
        y: position.y.min(max_y).max(min_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn bounds() -> MotionBounds {
        MotionBounds {
            field: Rect::new(0.0, 0.0, 800.0, 600.0),
            margin: 50.0,
        }
    }

    fn actor_at(x: f32, y: f32) -> Actor {
        Actor::new(Vec2 { x, y }, 60.0, 80.0, 280.0)
    }

    fn keys(up: bool, down: bool, left: bool, right: bool) -> MovementKeys {
        MovementKeys {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn axial_move_covers_speed_times_elapsed() {
        let actor = actor_at(300.0, 300.0);
        let next = step(&actor, keys(false, false, false, true), 0.5, &bounds(), &[]);

        assert!((next.position.x - 440.0).abs() < EPSILON);
        assert!((next.position.y - 300.0).abs() < EPSILON);
        assert!(next.moving);
        assert_eq!(next.facing, Facing::Right);
    }

    #[test]
    fn diagonal_speed_is_normalized() {
        let actor = actor_at(300.0, 300.0);
        let next = step(&actor, keys(true, false, true, false), 0.25, &bounds(), &[]);

        let dx = next.position.x - actor.position.x;
        let dy = next.position.y - actor.position.y;
        let distance = (dx * dx + dy * dy).sqrt();
        assert!((distance - 70.0).abs() < 0.1, "distance {distance}");
        assert!(dx < 0.0 && dy < 0.0);
    }

    #[test]
    fn horizontal_key_decides_facing_on_diagonals() {
        let actor = actor_at(300.0, 300.0);
        let next = step(&actor, keys(true, false, true, false), 0.1, &bounds(), &[]);
        assert_eq!(next.facing, Facing::Left);
    }

    #[test]
    fn opposing_keys_cancel_and_keep_facing() {
        let mut actor = actor_at(300.0, 300.0);
        actor.facing = Facing::Left;
        actor.moving = true;
        let next = step(&actor, keys(true, true, false, false), 0.5, &bounds(), &[]);

        assert_eq!(next.position, actor.position);
        assert!(!next.moving);
        assert_eq!(next.facing, Facing::Left);
    }

    #[test]
    fn idle_step_keeps_facing_and_clears_moving() {
        let mut actor = actor_at(300.0, 300.0);
        actor.facing = Facing::Up;
        actor.moving = true;
        let next = step(&actor, MovementKeys::default(), 0.5, &bounds(), &[]);

        assert!(!next.moving);
        assert_eq!(next.facing, Facing::Up);
    }

    #[test]
    fn motion_never_leaves_the_margin_box() {
        let bounds = bounds();
        let patterns = [
            keys(true, false, true, false),
            keys(false, true, false, true),
            keys(true, false, false, true),
            keys(false, true, true, false),
            keys(false, false, false, true),
        ];
        let mut actor = actor_at(400.0, 300.0);
        for (index, pattern) in patterns.iter().cycle().take(40).enumerate() {
            let elapsed = 0.05 + (index % 7) as f32 * 0.3;
            actor = step(&actor, *pattern, elapsed, &bounds, &[]);
            assert!(actor.position.x >= 50.0 - EPSILON);
            assert!(actor.position.y >= 50.0 - EPSILON);
            assert!(actor.position.x <= 800.0 - 50.0 - 60.0 + EPSILON);
            assert!(actor.position.y <= 600.0 - 50.0 - 80.0 + EPSILON);
        }
    }

    #[test]
    fn tiny_field_pins_actor_to_minimum_corner() {
        let bounds = MotionBounds {
            field: Rect::new(0.0, 0.0, 100.0, 100.0),
            margin: 50.0,
        };
        let next = step(&actor_at(10.0, 10.0), keys(false, true, false, true), 1.0, &bounds, &[]);
        assert_eq!(next.position, Vec2 { x: 50.0, y: 50.0 });
    }

    #[test]
    fn blocker_stops_actor_at_its_edge() {
        let blocker = Rect::new(400.0, 250.0, 100.0, 200.0);
        let actor = actor_at(300.0, 300.0);
        let next = step(&actor, keys(false, false, false, true), 1.0, &bounds(), &[blocker]);

        assert!((next.position.x + actor.width - blocker.x).abs() < EPSILON);
        assert!(!collision::intersects(&next.rect(), &blocker));
    }

    #[test]
    fn motion_is_deterministic_for_same_inputs() {
        let blockers = [Rect::new(350.0, 200.0, 40.0, 40.0)];
        let run = || {
            let mut actor = actor_at(200.0, 200.0);
            for tick in 0..120 {
                let pattern = keys(tick % 3 == 0, tick % 5 == 0, false, tick % 2 == 0);
                actor = step(&actor, pattern, 1.0 / 60.0, &bounds(), &blockers);
            }
            actor
        };
        assert_eq!(run(), run());
    }
}
