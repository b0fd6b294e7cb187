//! Lumen Sim entry point
//!
//! Runs a seeded headless scene: wandering rigidbodies, a few static walls and
//! lights that follow some of the bodies. A real host would replace the frame
//! loop below with its render driver.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lumen Sim (native) starting...");

    // lumen-sim [settings.json] [--quality low|medium|high]
    let mut path = "lumen-sim.json".to_owned();
    let mut quality = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--quality" {
            match args.next().map(|name| name.parse::<lumen_sim::QualityPreset>()) {
                Some(Ok(preset)) => quality = Some(preset),
                Some(Err(err)) => log::error!("{}", err),
                None => log::error!("--quality needs a value"),
            }
        } else {
            path = arg;
        }
    }

    let mut settings = lumen_sim::Settings::load(&path);
    if let Some(quality) = quality {
        settings.quality = quality;
    }
    log::info!(
        "Quality {} ({} light budget)",
        settings.quality,
        settings.max_lights()
    );

    let summary = demo::run(&settings);
    println!(
        "{} frames, {} ticks, {} collision contacts, {} lights ({} packed, {} bytes)",
        summary.frames,
        summary.ticks,
        summary.contacts,
        summary.lights,
        summary.packed_lights,
        summary.packed_bytes
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `World::advance` itself
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use lumen_sim::lighting::{LightId, LightingSystem, gpu};
    use lumen_sim::settings::Settings;
    use lumen_sim::sim::{Rect, Visual, World};

    const ARENA: DVec2 = DVec2::new(800.0, 600.0);
    const LIGHT_PRESETS: [&str; 3] = ["torch", "lantern", "candle"];

    /// Stand-in for a sprite owned by the renderer
    #[derive(Debug, Default)]
    struct SpriteProxy {
        position: (f64, f64),
        syncs: u32,
    }

    impl Visual for SpriteProxy {
        fn set_position(&mut self, x: f64, y: f64) {
            self.position = (x, y);
            self.syncs += 1;
        }
    }

    struct Wanderer {
        id: u32,
        target: DVec2,
        speed: f64,
        light: Option<LightId>,
    }

    pub struct Summary {
        pub frames: u32,
        pub ticks: u64,
        pub contacts: usize,
        pub lights: usize,
        pub packed_lights: usize,
        pub packed_bytes: usize,
    }

    fn random_point(rng: &mut Pcg32) -> DVec2 {
        DVec2::new(rng.random_range(0.0..ARENA.x), rng.random_range(0.0..ARENA.y))
    }

    pub fn run(settings: &Settings) -> Summary {
        let mut rng = Pcg32::seed_from_u64(settings.demo_seed);
        let mut world = World::from_settings(settings);
        let mut lighting = LightingSystem::default();
        log::info!(
            "Light presets: {}",
            lighting.presets().names().collect::<Vec<_>>().join(", ")
        );
        let mut sprites: Vec<Rc<RefCell<SpriteProxy>>> = Vec::new();

        // Static walls along the arena edges
        for rect in [
            Rect::new(ARENA.x / 2.0, -8.0, ARENA.x, 16.0),
            Rect::new(ARENA.x / 2.0, ARENA.y + 8.0, ARENA.x, 16.0),
            Rect::new(-8.0, ARENA.y / 2.0, 16.0, ARENA.y),
            Rect::new(ARENA.x + 8.0, ARENA.y / 2.0, 16.0, ARENA.y),
        ] {
            world.spawn_entity(rect);
        }

        let top_speed = (settings.default_max_speed * 1.5).max(41.0);
        let mut wanderers = Vec::with_capacity(settings.demo_bodies);
        for i in 0..settings.demo_bodies {
            let start = random_point(&mut rng);
            let size = rng.random_range(12.0..32.0);
            let id = world.spawn_rigidbody(Rect::new(start.x, start.y, size, size), settings.default_max_speed);

            let sprite = Rc::new(RefCell::new(SpriteProxy::default()));
            if let Some(entity) = world.entity_mut(id) {
                entity.attach_visual(&sprite);
            }
            sprites.push(sprite);

            // Every third body carries a light
            let light = if i % 3 == 0 {
                let preset = LIGHT_PRESETS[(i / 3) % LIGHT_PRESETS.len()];
                match lighting.create_light_from_preset(preset, start.x, start.y) {
                    Ok(id) => Some(id),
                    Err(err) => {
                        log::error!("Could not light body {}: {}", id, err);
                        None
                    }
                }
            } else {
                None
            };

            wanderers.push(Wanderer {
                id,
                target: random_point(&mut rng),
                speed: rng.random_range(40.0..top_speed),
                light,
            });
        }
        let ambient = lighting.create_light_from_preset("ambient", ARENA.x / 2.0, ARENA.y / 2.0).ok();

        let mut contacts = 0;
        for frame in 0..settings.demo_frames {
            for wanderer in &mut wanderers {
                let Some(body) = world.rigidbody_mut(wanderer.id) else {
                    continue;
                };
                body.move_towards(wanderer.target.x, wanderer.target.y, wanderer.speed);
                if body.speed() == 0.0 {
                    wanderer.target = random_point(&mut rng);
                    log::debug!("Body {} reached target, heading to {:?}", wanderer.id, wanderer.target);
                }
            }

            // Jittery frame times, the way a browser delivers them
            let frame_dt = rng.random_range(0.012..0.022);
            world.advance(frame_dt);

            for wanderer in &wanderers {
                if let (Some(light), Some(entity)) = (&wanderer.light, world.entity(wanderer.id))
                    && let Err(err) =
                        lighting.set_light_position(light.as_str(), entity.position().x, entity.position().y)
                {
                    log::warn!("Light for body {} lost: {}", wanderer.id, err);
                }
            }

            let pairs = world.colliding_pairs();
            contacts += pairs.len();
            if frame % 60 == 0 {
                log::info!(
                    "Frame {}: tick {}, {} overlapping pairs",
                    frame,
                    world.time_ticks(),
                    pairs.len()
                );
            }

            // UI-style controls: flicker the ambient light, retire a light halfway
            if frame % 90 == 45
                && let Some(ambient) = &ambient
                && let Err(err) = lighting.toggle_light(ambient.as_str())
            {
                log::warn!("{}", err);
            }
            if frame == settings.demo_frames / 2
                && let Some(light) = wanderers.iter_mut().find_map(|w| w.light.take())
                && let Err(err) = lighting.remove_light(light.as_str())
            {
                log::warn!("{}", err);
            }
        }

        let syncs: u32 = sprites.iter().map(|s| s.borrow().syncs).sum();
        log::info!("{} visual syncs across {} sprites", syncs, sprites.len());
        for (i, sprite) in sprites.iter().enumerate() {
            log::debug!("Sprite {} drawn at {:?}", i, sprite.borrow().position);
        }

        let packed = gpu::pack_enabled_lights(&lighting, settings.max_lights());
        Summary {
            frames: settings.demo_frames,
            ticks: world.time_ticks(),
            contacts,
            lights: lighting.len(),
            packed_lights: packed.len(),
            packed_bytes: gpu::as_bytes(&packed).len(),
        }
    }
}
