use nalgebra::Point2;

use crate::{
    geom::{Camera, Screen},
    Color4,
};

use super::{
    BodyId, DeferredLightPacker, LightRegistry, LightSystemParams, LightTarget, LightsBlock,
    OccluderQuery, OccluderWorld, ParamsError, ShadowQuad, ShadowVolumeBuilder,
    StencilCompositor,
};

/// Counters of the last rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lights_active: usize,
    pub occluder_queries: usize,
    pub occluders: usize,
    pub shadow_quads: usize,
}

/// Owns the lights of a scene and renders them once per frame.
///
/// All work happens on the thread owning the GL context. Lights are
/// processed one after another in registry order, since they share the
/// stencil buffer.
pub struct LightSystem {
    params: LightSystemParams,
    registry: LightRegistry,
    query: OccluderQuery,
    builder: ShadowVolumeBuilder,
    compositor: StencilCompositor,
    packer: DeferredLightPacker,
    ambient: Color4,
    quads: Vec<ShadowQuad>,
    stats: FrameStats,
}

impl LightSystem {
    pub fn new(params: LightSystemParams) -> Result<Self, ParamsError> {
        params.validate()?;

        let builder = ShadowVolumeBuilder::new(params.shadow.clone())?;
        let compositor = StencilCompositor::new(params.pixels_per_unit);
        let packer = DeferredLightPacker::new(params.light_height);

        Ok(Self {
            registry: LightRegistry::new(),
            query: OccluderQuery::new(),
            builder,
            compositor,
            packer,
            ambient: params.ambient,
            quads: Vec::new(),
            stats: FrameStats::default(),
            params,
        })
    }

    pub fn params(&self) -> &LightSystemParams {
        &self.params
    }

    pub fn registry(&self) -> &LightRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LightRegistry {
        &mut self.registry
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn ambient(&self) -> Color4 {
        self.ambient
    }

    pub fn set_ambient(&mut self, ambient: Color4) {
        self.ambient = ambient;
    }

    pub fn increase_ambient(&mut self, amount: f32) {
        self.ambient = self.ambient.map(|c| (c + amount).clamp(0.0, 1.0));
    }

    pub fn decrease_ambient(&mut self, amount: f32) {
        self.increase_ambient(-amount);
    }

    /// Renders all lights near `viewer` with hard shadows.
    ///
    /// `viewer_body` is excluded from occlusion, so that the viewer does not
    /// shadow its own light.
    pub fn render_stencil<W, T>(
        &mut self,
        world: &W,
        viewer: Point2<f32>,
        viewer_body: Option<BodyId>,
        target: &mut T,
    ) -> FrameStats
    where
        W: OccluderWorld + ?Sized,
        T: LightTarget + ?Sized,
    {
        #[cfg(feature = "coarse-prof")]
        coarse_prof::profile!("render_stencil");

        let search_radius = self.params.shadow.search_radius;
        let mut stats = FrameStats::default();
        let mut occluders = Vec::new();

        let active = self.registry.cull_active(viewer);
        stats.lights_active = active.len();

        for (_, light) in active.iter() {
            occluders.clear();
            self.query.query_near_into(
                world,
                light.origin(),
                search_radius,
                viewer_body,
                &mut occluders,
            );
            stats.occluder_queries += 1;
            stats.occluders += occluders.len();

            self.quads.clear();
            self.builder
                .build_into(light.origin(), &occluders, &mut self.quads);
            stats.shadow_quads += self.quads.len();

            self.compositor.render_light(target, light, &self.quads);
        }

        log::debug!(
            "Rendered {} lights with {} shadow quads from {} occluders",
            stats.lights_active,
            stats.shadow_quads,
            stats.occluders,
        );

        self.stats = stats;
        stats
    }

    /// Culls the lights for `viewer` and packs them for the deferred compose
    /// pass. No shadows are cast on this path.
    pub fn pack_deferred(
        &mut self,
        viewer: Point2<f32>,
        camera: &Camera,
        screen: Screen,
    ) -> LightsBlock {
        #[cfg(feature = "coarse-prof")]
        coarse_prof::profile!("pack_deferred");

        let active = self.registry.cull_active(viewer);

        self.stats = FrameStats {
            lights_active: active.len(),
            ..FrameStats::default()
        };

        self.packer.pack(active, camera, screen, self.ambient)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use nalgebra::Vector2;

    use super::super::{
        occluder::tests::TestWorld, CommandList, LightCommand, LightSource, SpriteId,
    };
    use super::*;

    fn system() -> LightSystem {
        LightSystem::new(LightSystemParams::default()).unwrap()
    }

    fn light(x: f32, y: f32, max_range: f32) -> LightSource {
        LightSource::new(Point2::new(x, y), Some(SpriteId(0))).with_max_range(max_range)
    }

    fn drawn_quads(commands: &CommandList) -> Vec<Vec<ShadowQuad>> {
        commands
            .commands()
            .iter()
            .filter_map(|command| match command {
                LightCommand::DrawShadowQuads(quads) => Some(quads.to_vec()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn out_of_range_light_issues_no_query() {
        let world = TestWorld::default().with_circle(1, (1.0, 0.0), 0.5);
        let mut system = system();
        system.registry_mut().insert(light(0.0, 0.0, 10.0));

        let mut target = CommandList::new();
        let stats = system.render_stencil(&world, Point2::new(11.0, 0.0), None, &mut target);

        assert_eq!(stats.lights_active, 0);
        assert_eq!(stats.occluder_queries, 0);
        assert_eq!(world.queries.get(), 0);
        assert!(target.commands().is_empty());
    }

    #[test]
    fn square_occluder_casts_four_quads() {
        let world = TestWorld::default()
            .with_polygon(1, &[(5.0, 0.0), (5.0, 5.0), (10.0, 5.0), (10.0, 0.0)]);
        let mut system = system();
        system.registry_mut().insert(light(0.0, 0.0, 1000.0));

        let mut target = CommandList::new();
        let stats = system.render_stencil(&world, Point2::new(500.0, 500.0), None, &mut target);

        assert_eq!(stats.lights_active, 1);
        assert_eq!(stats.shadow_quads, 4);
        assert_eq!(world.queries.get(), 1);
        assert_eq!(drawn_quads(&target)[0].len(), 4);
        assert!(!target.stencil_enabled());
    }

    #[test]
    fn viewer_does_not_shadow_itself() {
        let world = TestWorld::default()
            .with_polygon(7, &[(1.0, -1.0), (1.0, 1.0), (2.0, 1.0), (2.0, -1.0)])
            .with_circle(8, (-3.0, 0.0), 1.0);
        let mut system = system();
        system.registry_mut().insert(light(0.0, 0.0, 10.0));

        let mut target = CommandList::new();
        let stats = system.render_stencil(&world, Point2::origin(), Some(BodyId(7)), &mut target);

        assert_eq!(stats.occluders, 1);
        assert_eq!(stats.shadow_quads, 20);
    }

    #[test]
    fn lights_do_not_share_shadows() {
        let world = TestWorld::default().with_circle(1, (0.0, 2.0), 0.5);
        let mut system = system();
        system.registry_mut().insert(light(0.0, 0.0, 100.0));
        system.registry_mut().insert(light(40.0, 0.0, 100.0));

        let mut target = CommandList::new();
        system.render_stencil(&world, Point2::origin(), None, &mut target);

        assert_eq!(target.num_stencil_clears(), 2);

        let quads = drawn_quads(&target);
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].len(), 20);
        assert!(quads[1].is_empty());
        assert_eq!(
            target.commands().last(),
            Some(&LightCommand::StencilTest(None))
        );
    }

    #[test]
    fn frames_are_independent() {
        let world = TestWorld::default().with_circle(1, (0.0, 2.0), 0.5);
        let mut system = system();
        let handle = system.registry_mut().insert(light(0.0, 0.0, 100.0));

        let mut target = CommandList::new();
        system.render_stencil(&world, Point2::origin(), None, &mut target);
        assert_eq!(drawn_quads(&target)[0].len(), 20);

        system
            .registry_mut()
            .get_mut(handle)
            .unwrap()
            .set_position(Point2::new(0.0, 50.0));

        target.clear();
        system.render_stencil(&world, Point2::origin(), None, &mut target);

        assert_eq!(target.num_stencil_clears(), 1);
        assert_eq!(
            target.commands()[3],
            LightCommand::DrawShadowQuads(Cow::Owned(Vec::new()))
        );
    }

    #[test]
    fn ambient_is_clamped() {
        let mut system = system();
        system.set_ambient(Color4::new(0.5, 0.9, 0.0, 0.5));

        system.increase_ambient(0.25);
        assert_eq!(system.ambient(), Color4::new(0.75, 1.0, 0.25, 0.75));

        system.decrease_ambient(1.0);
        assert_eq!(system.ambient(), Color4::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn deferred_path_uses_culled_lights() {
        let mut system = system();
        system.registry_mut().insert(light(0.0, 0.0, 5.0));
        system.registry_mut().insert(light(100.0, 0.0, 5.0));

        let camera = Camera {
            center: Point2::origin(),
            zoom: 48.0,
            angle: 0.0,
        };
        let screen = Screen::new(Vector2::new(640.0, 480.0), Vector2::new(640, 480));

        let block = system.pack_deferred(Point2::origin(), &camera, screen);

        assert_eq!(block.count, 1);
        assert_eq!(block.ambient, <[f32; 4]>::from(system.ambient()));
        assert_eq!(system.stats().lights_active, 1);
    }
}
