//! The [`Point`] value type: a position in Ångström-space.

/// Distances under this threshold are treated as coincident.
pub const COINCIDENCE_EPSILON: f64 = 1e-4;

/// A point in three-dimensional Cartesian space, in Ångström units.
///
/// Pure value type: two points are equal iff their coordinates are bit-equal.
/// Use [`Point::is_coincident_with`] for the tolerant comparison the domain
/// actually wants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// X coordinate, Å.
    pub x: f64,
    /// Y coordinate, Å.
    pub y: f64,
    /// Z coordinate, Å.
    pub z: f64,
}

impl Point {
    /// Construct a point from Cartesian coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin, `(0, 0, 0)`.
    pub const ORIGIN: Point = Point::new(0.0, 0.0, 0.0);

    /// Euclidean (straight-line) distance to another point, in Å.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Squared Euclidean distance. Avoids a `sqrt` when only relative
    /// ordering of distances matters.
    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// `true` if `self` and `other` are within [`COINCIDENCE_EPSILON`] Å.
    pub fn is_coincident_with(&self, other: &Point) -> bool {
        self.distance_to(other) < COINCIDENCE_EPSILON
    }

    /// `true` iff all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Componentwise minimum of two points.
    pub fn min(&self, other: &Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Componentwise maximum of two points.
    pub fn max(&self, other: &Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

/// An axis-aligned bounding box in Ångström-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner (inclusive).
    pub min: Point,
    /// Maximum corner (inclusive).
    pub max: Point,
}

impl BoundingBox {
    /// The bounding box of a single point (zero extent).
    pub fn of_point(p: Point) -> Self {
        Self { min: p, max: p }
    }

    /// The bounding box enclosing `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Grow every face outward by `margin` Å.
    pub fn expanded_by(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin, self.min.z - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin, self.max.z + margin),
        }
    }

    /// Extent along each axis, in Å.
    pub fn extent(&self) -> (f64, f64, f64) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// `true` if `p` lies within this box (inclusive).
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Intersection of two boxes, or `None` if they do not overlap.
    pub fn intersect(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min = Point::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x <= max.x && min.y <= max.y && min.z <= max.z {
            Some(BoundingBox { min, max })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn coincidence_threshold() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(0.00005, 0.0, 0.0);
        let c = Point::new(0.001, 0.0, 0.0);
        assert!(a.is_coincident_with(&b));
        assert!(!a.is_coincident_with(&c));
    }

    #[test]
    fn bounding_box_expanded_contains_original() {
        let bb = BoundingBox {
            min: Point::new(0.0, 0.0, 0.0),
            max: Point::new(10.0, 10.0, 10.0),
        };
        let grown = bb.expanded_by(2.0);
        assert!(grown.contains(&bb.min));
        assert!(grown.contains(&bb.max));
        assert_eq!(grown.extent(), (14.0, 14.0, 14.0));
    }

    #[test]
    fn intersect_disjoint_is_none() {
        let a = BoundingBox {
            min: Point::new(0.0, 0.0, 0.0),
            max: Point::new(1.0, 1.0, 1.0),
        };
        let b = BoundingBox {
            min: Point::new(5.0, 5.0, 5.0),
            max: Point::new(6.0, 6.0, 6.0),
        };
        assert!(a.intersect(&b).is_none());
    }

    use proptest::prelude::*;

    fn arb_point() -> impl Strategy<Value = Point> {
        (-200.0..200.0_f64, -200.0..200.0_f64, -200.0..200.0_f64)
            .prop_map(|(x, y, z)| Point::new(x, y, z))
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(p in arb_point()) {
            prop_assert!(p.distance_to(&p) < COINCIDENCE_EPSILON);
        }

        #[test]
        fn distance_is_symmetric_under_any_points(a in arb_point(), b in arb_point()) {
            prop_assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
        }

        #[test]
        fn distance_obeys_triangle_inequality(a in arb_point(), b in arb_point(), c in arb_point()) {
            prop_assert!(a.distance_to(&c) <= a.distance_to(&b) + b.distance_to(&c) + 1e-9);
        }

        #[test]
        fn distance_squared_matches_distance(a in arb_point(), b in arb_point()) {
            let d = a.distance_to(&b);
            prop_assert!((a.distance_squared_to(&b) - d * d).abs() < 1e-6);
        }
    }
}
