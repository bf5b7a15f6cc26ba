//! SpatialWorld: obstacle set, exit region, and collision queries.

use survivor_core::constants::{CLUSTER_CUTOFF, CLUSTER_FACTOR, EXIT_INSET, EXIT_SIZE, MAP_SIZE};
use survivor_core::types::{Position, Rect};

/// Collision footprint of a moving actor: a square of side `size`
/// centred on `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub position: Position,
    pub size: f64,
}

impl Footprint {
    pub fn new(position: Position, size: f64) -> Self {
        Self { position, size }
    }

    /// Bounding region used for obstacle and map-edge tests.
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }
}

/// Immutable arena geometry. Built once per encounter.
#[derive(Debug, Clone)]
pub struct SpatialWorld {
    obstacles: Vec<Rect>,
    exit: Rect,
    extent: f64,
}

impl SpatialWorld {
    pub fn new(obstacles: Vec<Rect>, exit: Rect, extent: f64) -> Self {
        Self {
            obstacles,
            exit,
            extent,
        }
    }

    /// Arena with no obstacles and the standard exit placement.
    pub fn open() -> Self {
        Self::new(Vec::new(), default_exit(), MAP_SIZE)
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn exit(&self) -> Rect {
        self.exit
    }

    /// Side length of the square map.
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Whether `region` overlaps any obstacle (strict overlap).
    pub fn intersects_obstacle(&self, region: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.intersects(region))
    }

    /// Whether `region` lies entirely inside the map.
    pub fn contains(&self, region: &Rect) -> bool {
        Rect::new(0.0, 0.0, self.extent, self.extent).contains_rect(region)
    }

    /// Whether a point lies inside the map (edges inclusive).
    pub fn contains_point(&self, point: &Position) -> bool {
        point.within_extent(self.extent)
    }

    /// Whether `region` touches the exit.
    pub fn in_exit(&self, region: &Rect) -> bool {
        self.exit.intersects(region)
    }

    /// Whether `candidate` crowds any actor in `actors` other than the one at
    /// index `exclude`.
    ///
    /// Uses a reduced radius rather than full overlap so swarms can stay
    /// dense without piling onto the same spot.
    pub fn intersects_actors(
        candidate: &Footprint,
        exclude: Option<usize>,
        actors: &[Footprint],
    ) -> bool {
        actors.iter().enumerate().any(|(i, other)| {
            if Some(i) == exclude {
                return false;
            }
            candidate.position.distance_to(&other.position)
                < crowding_distance(candidate.size, other.size)
        })
    }
}

/// Minimum centre separation between two actors.
pub fn crowding_distance(size_a: f64, size_b: f64) -> f64 {
    ((size_a + size_b) * CLUSTER_FACTOR).min(CLUSTER_CUTOFF)
}

/// Exit region in the far corner of the map.
pub fn default_exit() -> Rect {
    Rect::new(
        MAP_SIZE - EXIT_INSET,
        MAP_SIZE - EXIT_INSET,
        EXIT_SIZE,
        EXIT_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled() -> SpatialWorld {
        SpatialWorld::new(
            vec![Rect::new(100.0, 100.0, 50.0, 50.0)],
            default_exit(),
            MAP_SIZE,
        )
    }

    #[test]
    fn test_obstacle_query() {
        let world = walled();
        let inside = Footprint::new(Position::new(125.0, 125.0), 10.0);
        let touching = Footprint::new(Position::new(155.0, 125.0), 10.0);
        let clear = Footprint::new(Position::new(300.0, 300.0), 10.0);

        assert!(world.intersects_obstacle(&inside.bounds()));
        // Shares an edge only
        assert!(!world.intersects_obstacle(&touching.bounds()));
        assert!(!world.intersects_obstacle(&clear.bounds()));
    }

    #[test]
    fn test_contains() {
        let world = SpatialWorld::open();
        assert!(world.contains(&Rect::centered(Position::new(10.0, 10.0), 20.0)));
        assert!(!world.contains(&Rect::centered(Position::new(5.0, 10.0), 20.0)));
        assert!(!world.contains(&Rect::centered(
            Position::new(MAP_SIZE - 1.0, 700.0),
            20.0
        )));
        assert!(world.contains_point(&Position::new(MAP_SIZE, 0.0)));
        assert!(!world.contains_point(&Position::new(-0.1, 0.0)));
    }

    #[test]
    fn test_in_exit() {
        let world = SpatialWorld::open();
        let exit = world.exit();
        assert!(world.in_exit(&Rect::centered(exit.center(), 20.0)));
        assert!(!world.in_exit(&Rect::centered(Position::new(100.0, 100.0), 20.0)));
    }

    #[test]
    fn test_crowding_uses_cutoff() {
        // Two standard-size hostiles: (18 + 18) * 0.6 = 21.6, capped at 20
        assert!((crowding_distance(18.0, 18.0) - 20.0).abs() < 1e-10);
        // Small actors stay under the cap
        assert!((crowding_distance(5.0, 5.0) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_intersects_actors_excludes_self() {
        let actors = vec![
            Footprint::new(Position::new(500.0, 500.0), 18.0),
            Footprint::new(Position::new(530.0, 500.0), 18.0),
        ];

        // Candidate move of actor 0 toward actor 1
        let near = Footprint::new(Position::new(515.0, 500.0), 18.0);
        assert!(SpatialWorld::intersects_actors(&near, Some(0), &actors));

        // Staying put only conflicts with itself, which is excluded
        let same = Footprint::new(Position::new(500.0, 500.0), 18.0);
        assert!(!SpatialWorld::intersects_actors(&same, Some(0), &actors));
        assert!(SpatialWorld::intersects_actors(&same, None, &actors));

        assert!(!SpatialWorld::intersects_actors(&near, None, &[]));
    }
}
