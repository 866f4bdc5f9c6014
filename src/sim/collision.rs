//! Proximity test shared by every hit check
//!
//! Hits use a fixed square window around each position rather than each
//! entity's declared size. Depth (z) is visual only and never compared.

use crate::entities::{Enemy, EnemyBullet, Player, PlayerBullet};

/// Half-width of the square hit window, in world units
pub const HIT_THRESHOLD: f32 = 0.3;

/// Anything with a position in the playfield plane
pub trait Positioned {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
}

macro_rules! impl_positioned {
    ($($ty:ty),* $(,)?) => {
        $(impl Positioned for $ty {
            fn x(&self) -> f32 {
                self.x
            }

            fn y(&self) -> f32 {
                self.y
            }
        })*
    };
}

impl_positioned!(Player, Enemy, PlayerBullet, EnemyBullet);

/// True when both entities exist and sit within [`HIT_THRESHOLD`] of each
/// other on both axes. An absent entity never collides.
pub fn collides<A, B>(a: Option<&A>, b: Option<&B>) -> bool
where
    A: Positioned + ?Sized,
    B: Positioned + ?Sized,
{
    match (a, b) {
        (Some(a), Some(b)) => {
            (a.x() - b.x()).abs() < HIT_THRESHOLD && (a.y() - b.y()).abs() < HIT_THRESHOLD
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Point(f32, f32);

    impl Positioned for Point {
        fn x(&self) -> f32 {
            self.0
        }

        fn y(&self) -> f32 {
            self.1
        }
    }

    #[test]
    fn test_collides_inside_window() {
        assert!(collides(Some(&Point(0.0, 0.0)), Some(&Point(0.29, -0.29))));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!collides(Some(&Point(0.0, 0.0)), Some(&Point(0.5, 0.0))));
        assert!(!collides(Some(&Point(0.0, 0.0)), Some(&Point(0.0, -0.31))));
    }

    #[test]
    fn test_needs_overlap_on_both_axes() {
        assert!(!collides(Some(&Point(0.0, 0.0)), Some(&Point(0.1, 1.0))));
        assert!(!collides(Some(&Point(0.0, 0.0)), Some(&Point(1.0, 0.1))));
    }

    #[test]
    fn test_absent_entity_never_collides() {
        let bullet: Option<&PlayerBullet> = None;
        let enemy = Enemy::new(0.0, 0.0, -20.0, 1.5, 1.0);
        assert!(!collides(bullet, Some(&enemy)));
        assert!(!collides(Some(&enemy), bullet));
    }

    #[test]
    fn test_depth_is_ignored() {
        let enemy = Enemy::new(1.0, 2.0, -20.0, 1.5, 1.0);
        let bullet = PlayerBullet::new(1.0, 2.0, -15.0, 0.3);
        assert!(collides(Some(&bullet), Some(&enemy)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_collides_is_symmetric(
                ax in -20.0f32..20.0, ay in -20.0f32..20.0,
                dx in -1.0f32..1.0, dy in -1.0f32..1.0,
            ) {
                let a = Point(ax, ay);
                let b = Point(ax + dx, ay + dy);
                prop_assert_eq!(collides(Some(&a), Some(&b)), collides(Some(&b), Some(&a)));
            }
        }
    }
}
