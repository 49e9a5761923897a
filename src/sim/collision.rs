//! Collision detection and response
//!
//! Three response styles live here, matched to how each entity moves:
//! sliding (player input movement), strict accept-or-block (enemy AI moves,
//! which react with an impulse instead of sliding), and axis-aligned bounce
//! (projectiles). Agent-agent contact resolves as circle separation.

use glam::Vec2;

use super::arena::Arena;
use super::body::Body;
use super::obstacle::ObstacleField;
use super::rect::Rect;
use crate::normalize_or_fixed;

/// What blocked a strict move attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveBlock {
    Wall,
    Obstacle { center: Vec2 },
}

/// Move with wall sliding: try the full displacement, then X-only, then
/// Y-only, finally stay in place. The arena clamp applies at every attempt,
/// so walls never need a separate check.
pub fn slide_move(body: &mut Body, velocity: Vec2, dt: f32, arena: &Arena, field: &ObstacleField) {
    let desired = body.pos + velocity * dt;

    for candidate in [
        desired,
        Vec2::new(desired.x, body.pos.y),
        Vec2::new(body.pos.x, desired.y),
    ] {
        let rect = Rect::from_agent(candidate, body.radius);
        let clamped = arena.clamp(&rect);
        // Carry the clamp translation back into continuous space
        let adjusted = candidate + (clamped.center() - rect.center());
        if !field.collides(&clamped) {
            body.pos = adjusted;
            body.rect = clamped;
            return;
        }
    }
    // Fully blocked (usually a corner): stay put
}

/// Accept the move only if the destination is fully inside the arena and
/// overlaps no active obstacle; otherwise report what blocked it and leave
/// the body untouched.
pub fn try_move_strict(
    body: &mut Body,
    next_pos: Vec2,
    arena: &Arena,
    field: &ObstacleField,
) -> Option<MoveBlock> {
    let next_rect = Rect::from_agent(next_pos, body.radius);
    if !arena.contains(&next_rect) {
        return Some(MoveBlock::Wall);
    }
    if let Some(obs) = field.query_colliding(&next_rect) {
        return Some(MoveBlock::Obstacle {
            center: obs.rect.center(),
        });
    }
    body.pos = next_pos;
    body.rect = next_rect;
    None
}

/// Axis-aligned bounce off a blocking rect.
///
/// The axis with the larger overlap extent is the bounce axis: its direction
/// sign flips and the position is corrected by the overlap so the mover does
/// not visibly interpenetrate. Returns `(corrected_pos, reflected_dir)`;
/// untouched when the rects do not overlap.
pub fn bounce_off_rect(pos: Vec2, dir: Vec2, moving: &Rect, blocker: &Rect) -> (Vec2, Vec2) {
    let Some(clip) = moving.intersection(blocker) else {
        return (pos, dir);
    };

    let mut pos = pos;
    let mut dir = dir;
    if clip.w > clip.h {
        // Wide overlap: vertical bounce
        dir.y = -dir.y;
        if moving.center().y < blocker.center().y {
            pos.y -= clip.h;
        } else {
            pos.y += clip.h;
        }
    } else {
        dir.x = -dir.x;
        if moving.center().x < blocker.center().x {
            pos.x -= clip.w;
        } else {
            pos.x += clip.w;
        }
    }
    (pos, dir)
}

/// Circle-circle separation between two agents.
///
/// On overlap the positional correction splits evenly between both bodies
/// along the connecting normal, then each receives an equal-and-opposite
/// outward impulse. Coincident centers fall back to the fixed +X normal.
/// A correction that would shove a body into level geometry is dropped for
/// that body (the impulse still applies and resolves safely next tick).
pub fn separate_circles(
    a: &mut Body,
    b: &mut Body,
    impulse: f32,
    arena: &Arena,
    field: &ObstacleField,
) {
    let diff = a.pos - b.pos;
    let radius_sum = a.radius + b.radius;
    if diff.length_squared() >= radius_sum * radius_sum {
        return;
    }

    let dist = diff.length();
    let normal = normalize_or_fixed(diff);
    let overlap = radius_sum - dist;
    let correction = normal * (overlap / 2.0);

    guarded_shift(a, correction, arena, field);
    guarded_shift(b, -correction, arena, field);

    a.apply_knockback(normal * impulse);
    b.apply_knockback(-normal * impulse);
}

/// Shift a body, clamped to the arena and refused outright when the
/// destination overlaps an active obstacle
fn guarded_shift(body: &mut Body, delta: Vec2, arena: &Arena, field: &ObstacleField) {
    let candidate = body.pos + delta;
    let rect = Rect::from_agent(candidate, body.radius);
    let clamped = arena.clamp(&rect);
    let adjusted = candidate + (clamped.center() - rect.center());
    if !field.collides(&clamped) {
        body.pos = adjusted;
        body.rect = clamped;
    }
}

/// Placement-validity check: every edge of `rect` must be at least
/// `required_gap` away from the arena walls and from every active obstacle
/// (Euclidean edge-to-edge distance, zero when overlapping on an axis).
pub fn placement_clear(
    rect: &Rect,
    arena: &Arena,
    field: &ObstacleField,
    required_gap: f32,
) -> bool {
    let bounds = arena.bounds();
    let wall_gaps = [
        rect.left() - bounds.left(),
        bounds.right() - rect.right(),
        rect.top() - bounds.top(),
        bounds.bottom() - rect.bottom(),
    ];
    if wall_gaps.iter().any(|&gap| gap < required_gap) {
        return false;
    }
    field
        .active()
        .all(|obs| rect.gap_distance(&obs.rect) >= required_gap)
}
