//! Billboard demo: a ring of sprites seen by an orbiting camera.
//!
//! Prints each sprite's projected screen state for a few frames. Run with
//! `RUST_LOG=debug` to see camera diagnostics.

use sprite3d::*;

/// A host that prints display-list changes.
struct PrintHost;

impl SceneHost for PrintHost {
    fn add(&mut self, id: SpriteId, texture: &TextureFrame) {
        println!("display list: + {id} ({})", texture.key);
    }

    fn remove(&mut self, id: SpriteId) {
        println!("display list: - {id}");
    }
}

fn main() -> Result<()> {
    init_logging();

    let options = CameraOptions::perspective()
        .with_name("orbit")
        .with_viewport(800, 600);
    options.validate()?;

    let mut camera = PerspectiveCamera::perspective(&options).with_host(Box::new(PrintHost));
    camera.set_position((0.0, 3.0, 12.0)).look_at(Vec3::ZERO);

    let texture = TextureFrame::new("orb", Vec2::splat(128.0));
    let ids = camera.create_multiple(8, &texture, true);
    camera.random_sphere(4.0, Some(&ids));

    for frame in 0..4 {
        camera.orbit(Vec3::ZERO, std::f32::consts::FRAC_PI_8, Vec3::Y);
        camera.update(16.0, 16.0);

        println!("frame {frame}");
        for (id, sprite) in camera.children().iter() {
            let proxy = sprite.proxy();
            println!(
                "  {id}: screen ({:7.1}, {:7.1}) scale ({:5.1}, {:5.1}) depth {:6.3} visible {}",
                proxy.x, proxy.y, proxy.scale_x, proxy.scale_y, proxy.depth, proxy.visible
            );
        }
    }

    let ray = camera.pick_ray(400.0, 300.0);
    println!("pick ray: {:?} -> {:?}", ray.origin, ray.direction);

    camera.destroy();
    Ok(())
}
