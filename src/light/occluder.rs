use nalgebra::Point2;

use crate::geom::{Circle, Rect};

/// Identity of a physics body, used to keep the viewer from shadowing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u64);

/// Shape of an occluder in world units.
///
/// Polygons and chains are both treated as closed loops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OccluderShape<'a> {
    Circle(Circle),
    Polygon(&'a [Point2<f32>]),
    Chain(&'a [Point2<f32>]),
}

/// A shape borrowed from the physics world for the duration of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occluder<'a> {
    pub body: BodyId,
    pub body_enabled: bool,
    pub is_sensor: bool,
    pub shape: OccluderShape<'a>,
}

/// The physics side of occlusion: a broad-phase lookup of shapes.
pub trait OccluderWorld {
    /// Appends all shapes whose bounds overlap `aabb` to `out`, with vertices
    /// in world units. Must not modify the world.
    fn query_aabb<'a>(&'a self, aabb: Rect, out: &mut Vec<Occluder<'a>>);
}

/// Fetches the shapes that can cast shadows for one light.
#[derive(Debug, Default)]
pub struct OccluderQuery {
    queries_issued: usize,
}

impl OccluderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_near<'w, W>(
        &mut self,
        world: &'w W,
        light_pos: Point2<f32>,
        search_radius: f32,
        exclude_body: Option<BodyId>,
    ) -> Vec<Occluder<'w>>
    where
        W: OccluderWorld + ?Sized,
    {
        let mut out = Vec::new();
        self.query_near_into(world, light_pos, search_radius, exclude_body, &mut out);
        out
    }

    /// Like `query_near`, but appends into `out`.
    pub fn query_near_into<'w, W>(
        &mut self,
        world: &'w W,
        light_pos: Point2<f32>,
        search_radius: f32,
        exclude_body: Option<BodyId>,
        out: &mut Vec<Occluder<'w>>,
    ) where
        W: OccluderWorld + ?Sized,
    {
        self.queries_issued += 1;

        let start = out.len();
        world.query_aabb(Rect::around(light_pos, search_radius), out);

        let mut i = start;
        while i < out.len() {
            if casts_shadow(&out[i], exclude_body) {
                i += 1;
            } else {
                // Order does not matter to the builder.
                out.swap_remove(i);
            }
        }
    }

    pub fn queries_issued(&self) -> usize {
        self.queries_issued
    }
}

fn casts_shadow(occluder: &Occluder, exclude_body: Option<BodyId>) -> bool {
    // Things that do not collide should not have an impact on lighting
    // either, while the rest of their body still does.
    Some(occluder.body) != exclude_body && occluder.body_enabled && !occluder.is_sensor
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use super::*;

    pub struct TestShape {
        pub body: BodyId,
        pub body_enabled: bool,
        pub is_sensor: bool,
        pub kind: TestShapeKind,
    }

    pub enum TestShapeKind {
        Circle(Circle),
        Polygon(Vec<Point2<f32>>),
        Chain(Vec<Point2<f32>>),
    }

    /// A brute-force physics world that counts the queries issued to it.
    #[derive(Default)]
    pub struct TestWorld {
        pub shapes: Vec<TestShape>,
        pub queries: Cell<usize>,
    }

    impl TestWorld {
        pub fn with_polygon(mut self, body: u64, vertices: &[(f32, f32)]) -> Self {
            self.shapes.push(TestShape {
                body: BodyId(body),
                body_enabled: true,
                is_sensor: false,
                kind: TestShapeKind::Polygon(
                    vertices.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
                ),
            });
            self
        }

        pub fn with_circle(mut self, body: u64, center: (f32, f32), radius: f32) -> Self {
            self.shapes.push(TestShape {
                body: BodyId(body),
                body_enabled: true,
                is_sensor: false,
                kind: TestShapeKind::Circle(Circle {
                    center: Point2::new(center.0, center.1),
                    radius,
                }),
            });
            self
        }
    }

    impl OccluderWorld for TestWorld {
        fn query_aabb<'a>(&'a self, aabb: Rect, out: &mut Vec<Occluder<'a>>) {
            self.queries.set(self.queries.get() + 1);

            for shape in &self.shapes {
                let (bounds, occluder_shape) = match &shape.kind {
                    TestShapeKind::Circle(circle) => (
                        Some(Rect::around(circle.center, circle.radius)),
                        OccluderShape::Circle(*circle),
                    ),
                    TestShapeKind::Polygon(vertices) => (
                        Rect::bounding(vertices.iter().copied()),
                        OccluderShape::Polygon(vertices.as_slice()),
                    ),
                    TestShapeKind::Chain(vertices) => (
                        Rect::bounding(vertices.iter().copied()),
                        OccluderShape::Chain(vertices.as_slice()),
                    ),
                };

                if bounds.map_or(false, |bounds| bounds.overlaps(&aabb)) {
                    out.push(Occluder {
                        body: shape.body,
                        body_enabled: shape.body_enabled,
                        is_sensor: shape.is_sensor,
                        shape: occluder_shape,
                    });
                }
            }
        }
    }

    #[test]
    fn filters_viewer_disabled_and_sensors() {
        let mut world = TestWorld::default()
            .with_polygon(1, &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)])
            .with_polygon(2, &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)])
            .with_polygon(3, &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)])
            .with_circle(4, (3.0, 0.0), 1.0)
            .with_circle(4, (-3.0, 0.0), 1.0);
        world.shapes[2].body_enabled = false;
        world.shapes[3].is_sensor = true;

        let mut query = OccluderQuery::new();
        let occluders = query.query_near(&world, Point2::origin(), 10.0, Some(BodyId(1)));

        let mut bodies = occluders.iter().map(|o| o.body.0).collect::<Vec<_>>();
        bodies.sort_unstable();

        assert_eq!(bodies, vec![2, 4]);
        assert!(occluders.iter().all(|o| !o.is_sensor));
        assert_eq!(query.queries_issued(), 1);
        assert_eq!(world.queries.get(), 1);
    }

    #[test]
    fn only_returns_nearby_shapes() {
        let world = TestWorld::default()
            .with_circle(1, (5.0, 0.0), 1.0)
            .with_circle(2, (50.0, 0.0), 1.0);

        let occluders = OccluderQuery::new().query_near(&world, Point2::origin(), 10.0, None);

        assert_eq!(occluders.len(), 1);
        assert_eq!(occluders[0].body, BodyId(1));
    }

    #[test]
    fn chains_are_returned() {
        let mut world = TestWorld::default();
        world.shapes.push(TestShape {
            body: BodyId(9),
            body_enabled: true,
            is_sensor: false,
            kind: TestShapeKind::Chain(vec![Point2::new(0.0, 2.0), Point2::new(4.0, 2.0)]),
        });

        let occluders = OccluderQuery::new().query_near(&world, Point2::origin(), 10.0, None);

        assert!(matches!(occluders[0].shape, OccluderShape::Chain(v) if v.len() == 2));
    }
}
