//! Ball collision resolution against the brick field
//!
//! The resolver is a pure per-tick function: it takes the ball's box and
//! velocity, sweeps each axis independently against the obstacle set, and
//! returns the reflected velocity plus the corrected box. Game-state side
//! effects (brick removal, scoring, ball loss) surface as [`ContactEvent`]s
//! for the caller to apply in the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// What an obstacle does to the ball on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Mirror reflection on the colliding axis
    Wall,
    /// Mirror reflection, then the brick is removed by the caller
    Brick,
    /// Rebound angle biased by the impact offset from the paddle center
    Paddle,
}

/// A static collidable box, snapshotted for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// Side effects of one resolution pass, in detection order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    /// A brick was struck and should be removed. Emitted at most once per
    /// brick per tick, even when both axis sweeps overlap it.
    BrickHit { id: u32 },
    /// The ball came off the paddle. `ratio` is the signed center offset
    /// in paddle half-widths, already scaled.
    PaddleHit { ratio: f32 },
    /// The ball left the bottom of the field; no reflection occurred
    BallLost,
}

/// Numeric inputs the resolver needs beyond the body and obstacle set
#[derive(Debug, Clone, Copy)]
pub struct ResolveParams {
    /// Speed used to rebuild the horizontal component after a paddle hit
    pub base_speed: f32,
    /// Scale applied to the paddle deflection ratio
    pub deflection_scale: f32,
    /// Bottom of the play field; a ball whose center passes it is lost
    pub field_height: f32,
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Corrected body box: colliding axes keep their pre-move coordinate,
    /// clear axes advance by their displacement component
    pub rect: Rect,
    /// Post-reflection velocity
    pub vel: Vec2,
    pub events: Vec<ContactEvent>,
}

/// Resolve one tick of ball movement against the obstacle set.
///
/// Each axis is swept independently: the body translated by `(dx, 0)` and
/// by `(0, dy)` is tested against every obstacle, and a colliding axis is
/// rolled back while its velocity component reflects. A corner hit flags
/// both axes and reflects both components. The test assumes the pre-move
/// box does not already overlap the obstacles it is resolved against,
/// which the axis rollback maintains from tick to tick.
pub fn resolve(
    body: Rect,
    vel: Vec2,
    dt: f32,
    obstacles: &[Obstacle],
    params: &ResolveParams,
) -> Resolution {
    let disp = vel * dt;

    // Leaving the bottom of the field is terminal, not a collision.
    let moved = body.translated(disp);
    if moved.center_y() > params.field_height {
        return Resolution {
            rect: moved,
            vel,
            events: vec![ContactEvent::BallLost],
        };
    }

    let after_x = body.translated(Vec2::new(disp.x, 0.0));
    let after_y = body.translated(Vec2::new(0.0, disp.y));

    let mut hit_x = false;
    let mut hit_y = false;
    let mut paddle: Option<&Obstacle> = None;
    let mut events = Vec::new();

    for obstacle in obstacles {
        let on_x = after_x.intersects(&obstacle.rect);
        let on_y = after_y.intersects(&obstacle.rect);
        if !on_x && !on_y {
            continue;
        }
        hit_x |= on_x;
        hit_y |= on_y;
        match obstacle.kind {
            ObstacleKind::Wall => {}
            // One event per obstacle regardless of how many axes flagged it
            ObstacleKind::Brick => events.push(ContactEvent::BrickHit { id: obstacle.id }),
            ObstacleKind::Paddle => paddle = Some(obstacle),
        }
    }

    let mut new_vel = vel;
    if hit_x {
        new_vel.x = -new_vel.x;
    }
    if hit_y {
        new_vel.y = -new_vel.y;
    }

    if let Some(paddle) = paddle {
        let ratio = (body.center_x() - paddle.rect.center_x()) / paddle.rect.half_width()
            * params.deflection_scale;
        new_vel.x = params.base_speed * ratio;
        events.push(ContactEvent::PaddleHit { ratio });
    }

    let rect = Rect::new(
        if hit_x { body.left } else { body.left + disp.x },
        if hit_y { body.top } else { body.top + disp.y },
        body.width,
        body.height,
    );

    Resolution {
        rect,
        vel: new_vel,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ResolveParams {
        ResolveParams {
            base_speed: 180.0,
            deflection_scale: 1.0,
            field_height: 416.0,
        }
    }

    fn wall(id: u32, rect: Rect) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::Wall,
            rect,
        }
    }

    fn brick(id: u32, rect: Rect) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::Brick,
            rect,
        }
    }

    fn paddle(rect: Rect) -> Obstacle {
        Obstacle {
            id: 0,
            kind: ObstacleKind::Paddle,
            rect,
        }
    }

    #[test]
    fn test_free_flight_advances_by_displacement() {
        let body = Rect::from_center(Vec2::new(100.0, 100.0), 16.0, 16.0);
        let out = resolve(body, Vec2::new(5.0, 5.0), 1.0, &[], &params());
        assert_eq!(out.rect.center(), Vec2::new(105.0, 105.0));
        assert_eq!(out.vel, Vec2::new(5.0, 5.0));
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_side_wall_reflects_x_only() {
        // Wall to the right of the ball; a diagonal move only crosses it
        // along x, so y keeps advancing.
        let body = Rect::from_center(Vec2::new(100.0, 100.0), 16.0, 16.0);
        let obstacles = [wall(1, Rect::new(110.0, 90.0, 10.0, 100.0))];
        let out = resolve(body, Vec2::new(5.0, 5.0), 1.0, &obstacles, &params());
        assert_eq!(out.vel, Vec2::new(-5.0, 5.0));
        assert_eq!(out.rect.center_x(), 100.0);
        assert_eq!(out.rect.center_y(), 105.0);
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_corner_hit_reflects_both_axes() {
        // Moving up-right into the seam between a right wall and a top
        // wall: each sweep flags its own obstacle.
        let body = Rect::from_center(Vec2::new(100.0, 100.0), 16.0, 16.0);
        let obstacles = [
            wall(1, Rect::new(110.0, 0.0, 10.0, 200.0)),
            wall(2, Rect::new(0.0, 78.0, 200.0, 10.0)),
        ];
        let out = resolve(body, Vec2::new(5.0, -5.0), 1.0, &obstacles, &params());
        assert_eq!(out.vel, Vec2::new(-5.0, 5.0));
        assert_eq!(out.rect.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_paddle_center_hit_zeroes_horizontal() {
        let obstacles = [paddle(Rect::new(140.0, 400.0, 48.0, 16.0))];
        let body = Rect::from_center(Vec2::new(164.0, 395.0), 8.0, 8.0);
        let out = resolve(body, Vec2::new(0.0, 3.0), 1.0, &obstacles, &params());
        assert_eq!(out.vel, Vec2::new(0.0, -3.0));
        assert_eq!(out.events, vec![ContactEvent::PaddleHit { ratio: 0.0 }]);
    }

    #[test]
    fn test_paddle_offset_hit_deflects() {
        let obstacles = [paddle(Rect::new(140.0, 400.0, 48.0, 16.0))];

        // Left of center: ratio (160 - 164) / 24, rebound deflects left
        let body = Rect::from_center(Vec2::new(160.0, 395.0), 8.0, 8.0);
        let out = resolve(body, Vec2::new(0.0, 3.0), 1.0, &obstacles, &params());
        assert_eq!(out.vel.y, -3.0);
        assert!(out.vel.x < 0.0);
        assert_eq!(out.rect.top, body.top);
        match out.events[..] {
            [ContactEvent::PaddleHit { ratio }] => {
                assert!((ratio - (-1.0 / 6.0)).abs() < 1e-5);
            }
            _ => panic!("expected a single paddle hit, got {:?}", out.events),
        }

        // Right of center deflects right
        let body = Rect::from_center(Vec2::new(180.0, 395.0), 8.0, 8.0);
        let out = resolve(body, Vec2::new(0.0, 3.0), 1.0, &obstacles, &params());
        assert!(out.vel.x > 0.0);
        assert_eq!(out.vel.y, -3.0);
    }

    #[test]
    fn test_brick_hit_fires_once_even_on_both_axes() {
        // Both sweeps overlap the same brick; still a single event.
        let body = Rect::from_center(Vec2::new(100.0, 100.0), 16.0, 16.0);
        let obstacles = [brick(9, Rect::new(104.0, 104.0, 30.0, 30.0))];
        let out = resolve(body, Vec2::new(5.0, 5.0), 1.0, &obstacles, &params());
        assert_eq!(out.events, vec![ContactEvent::BrickHit { id: 9 }]);
        assert_eq!(out.vel, Vec2::new(-5.0, -5.0));
        assert_eq!(out.rect.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_two_bricks_two_events() {
        let body = Rect::from_center(Vec2::new(100.0, 100.0), 16.0, 16.0);
        let obstacles = [
            brick(3, Rect::new(110.0, 88.0, 20.0, 10.0)),
            brick(4, Rect::new(110.0, 98.0, 20.0, 10.0)),
        ];
        let out = resolve(body, Vec2::new(6.0, 0.0), 1.0, &obstacles, &params());
        assert_eq!(
            out.events,
            vec![
                ContactEvent::BrickHit { id: 3 },
                ContactEvent::BrickHit { id: 4 },
            ]
        );
        assert_eq!(out.vel, Vec2::new(-6.0, 0.0));
    }

    #[test]
    fn test_ball_below_field_is_lost_not_reflected() {
        let body = Rect::from_center(Vec2::new(100.0, 420.0), 8.0, 8.0);
        // An obstacle in the path must not matter once the ball is gone
        let obstacles = [wall(1, Rect::new(90.0, 418.0, 40.0, 10.0))];
        let out = resolve(body, Vec2::new(0.0, 3.0), 1.0, &obstacles, &params());
        assert_eq!(out.events, vec![ContactEvent::BallLost]);
        assert_eq!(out.vel, Vec2::new(0.0, 3.0));
        assert_eq!(out.rect.center_y(), 423.0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        const DT: f32 = 1.0 / 120.0;

        proptest! {
            #[test]
            fn untouched_flight_is_exact(
                px in -200.0f32..200.0,
                py in -100.0f32..300.0,
                vx in -120.0f32..120.0,
                vy in -120.0f32..120.0,
            ) {
                let body = Rect::from_center(Vec2::new(px, py), 8.0, 8.0);
                let vel = Vec2::new(vx, vy);
                let out = resolve(body, vel, DT, &[], &params());
                let disp = vel * DT;
                prop_assert_eq!(out.rect.left, body.left + disp.x);
                prop_assert_eq!(out.rect.top, body.top + disp.y);
                prop_assert_eq!(out.vel, vel);
                prop_assert!(out.events.is_empty());
            }

            #[test]
            fn wall_bounce_mirrors_velocity(
                vx in 1.0f32..200.0,
                vy in -100.0f32..100.0,
            ) {
                let body = Rect::from_center(Vec2::new(100.0, 100.0), 16.0, 16.0);
                // Tall wall just past the body's right edge; any rightward
                // move this tick crosses into it.
                let obstacles = [wall(7, Rect::new(108.001, -1000.0, 50.0, 3000.0))];
                let out = resolve(body, Vec2::new(vx, vy), 1.0 / 60.0, &obstacles, &params());
                prop_assert_eq!(out.vel.x, -vx);
                prop_assert_eq!(out.vel.y, vy);
                prop_assert_eq!(out.rect.left, body.left);
            }

            #[test]
            fn paddle_ratio_tracks_impact_offset(offset in -20.0f32..20.0) {
                let obstacles = [paddle(Rect::new(140.0, 400.0, 48.0, 16.0))];
                let body = Rect::from_center(Vec2::new(164.0 + offset, 395.0), 8.0, 8.0);
                let out = resolve(body, Vec2::new(0.0, 60.0), 0.05, &obstacles, &params());
                prop_assert_eq!(out.vel.y, -60.0);
                if offset > 0.0 {
                    prop_assert!(out.vel.x > 0.0);
                } else if offset < 0.0 {
                    prop_assert!(out.vel.x < 0.0);
                } else {
                    prop_assert_eq!(out.vel.x, 0.0);
                }
            }
        }
    }
}
