use engine::{Rect, Vec2};

/// Strict AABB overlap. Touching edges and zero-size rectangles never
/// intersect.
pub(crate) fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Pushes `actor` out of every blocker it overlaps, one pass in blocker
/// order, along the axis of least penetration. Returns the total
/// displacement. Overlapping several blockers at once may leave a small
/// residual penetration.
pub(crate) fn resolve(actor: Rect, blockers: &[Rect]) -> Vec2 {
    let mut working = actor;
    for blocker in blockers {
        if !intersects(&working, blocker) {
            continue;
        }
        let overlap_x = (working.right() - blocker.x).min(blocker.right() - working.x);
        let overlap_y = (working.bottom() - blocker.y).min(blocker.bottom() - working.y);
        let working_center = working.center();
        let blocker_center = blocker.center();
        if overlap_x < overlap_y {
            if working_center.x < blocker_center.x {
                working.x -= overlap_x;
            } else {
                working.x += overlap_x;
            }
        } else if working_center.y < blocker_center.y {
            working.y -= overlap_y;
        } else {
            working.y += overlap_y;
        }
    }
    Vec2 {
        x: working.x - actor.x,
        y: working.y - actor.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displaced(rect: Rect, delta: Vec2) -> Rect {
        Rect::new(rect.x + delta.x, rect.y + delta.y, rect.width, rect.height)
    }

    #[test]
    fn intersection_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0),
            Rect::new(-3.0, 2.0, 4.0, 1.0),
            Rect::new(2.0, 2.0, 0.0, 0.0),
            Rect::new(20.0, 20.0, 1.0, 1.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(intersects(a, b), intersects(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn zero_size_rect_never_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let point = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!intersects(&a, &point));
    }

    #[test]
    fn pushes_out_along_smaller_overlap_axis() {
        let blocker = Rect::new(100.0, 100.0, 50.0, 50.0);
        // Overlaps 5px horizontally from the left, 40px vertically.
        let actor = Rect::new(55.0, 105.0, 50.0, 40.0);
        let delta = resolve(actor, &[blocker]);

        assert_eq!(delta, Vec2 { x: -5.0, y: 0.0 });
        assert!(!intersects(&displaced(actor, delta), &blocker));
    }

    #[test]
    fn pushes_down_when_below_blocker_center() {
        let blocker = Rect::new(100.0, 100.0, 50.0, 50.0);
        let actor = Rect::new(110.0, 145.0, 20.0, 30.0);
        let delta = resolve(actor, &[blocker]);

        assert_eq!(delta, Vec2 { x: 0.0, y: 5.0 });
        assert!(!intersects(&displaced(actor, delta), &blocker));
    }

    #[test]
    fn untouched_actor_has_zero_displacement() {
        let blocker = Rect::new(100.0, 100.0, 50.0, 50.0);
        let actor = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert_eq!(resolve(actor, &[blocker]), Vec2::default());
    }

    #[test]
    fn resolved_actor_clears_each_separate_blocker() {
        let blockers = [
            Rect::new(0.0, 0.0, 40.0, 40.0),
            Rect::new(200.0, 0.0, 40.0, 40.0),
        ];
        let actors = [
            Rect::new(30.0, 10.0, 20.0, 20.0),
            Rect::new(10.0, 35.0, 20.0, 20.0),
            Rect::new(185.0, 5.0, 20.0, 20.0),
        ];
        for actor in actors {
            let resolved = displaced(actor, resolve(actor, &blockers));
            for blocker in &blockers {
                assert!(!intersects(&resolved, blocker), "{resolved:?} in {blocker:?}");
            }
        }
    }
}
