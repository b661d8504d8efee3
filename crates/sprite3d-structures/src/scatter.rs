//! Layout helpers for placing many sprites at once.

use std::f32::consts::TAU;

use glam::{Mat4, UVec3, Vec3, Vec4};
use rand::Rng;

use crate::billboard::BillboardSprite;

/// Positions of a `counts.x * counts.y * counts.z` grid centred on the
/// origin, x varying fastest.
///
/// Along each axis with `n` cells the coordinates are
/// `(i + 0.5 - n / 2) * spacing` for `i` in `0..n`.
#[allow(clippy::cast_precision_loss)]
pub fn grid_positions(counts: UVec3, spacing: Vec3) -> Vec<Vec3> {
    let offset = |i: u32, n: u32| i as f32 + 0.5 - n as f32 / 2.0;
    let mut positions =
        Vec::with_capacity(counts.x as usize * counts.y as usize * counts.z as usize);
    for z in 0..counts.z {
        for y in 0..counts.y {
            for x in 0..counts.x {
                positions.push(
                    Vec3::new(
                        offset(x, counts.x),
                        offset(y, counts.y),
                        offset(z, counts.z),
                    ) * spacing,
                );
            }
        }
    }
    positions
}

/// A uniformly distributed point on the surface of a sphere of `radius`.
pub fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let z = rng.gen::<f32>() * 2.0 - 1.0;
    let ring = (1.0 - z * z).sqrt() * radius;
    Vec3::new(angle.cos() * ring, angle.sin() * ring, z * radius)
}

/// A point with every component uniform in `[-scale, scale)`.
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> Vec4 {
    let mut component = || (rng.gen::<f32>() * 2.0 - 1.0) * scale;
    Vec4::new(component(), component(), component(), component())
}

/// Moves each sprite to a random point on a sphere around the origin.
pub fn scatter_on_sphere<'a, R: Rng + ?Sized>(
    sprites: impl Iterator<Item = &'a mut BillboardSprite>,
    radius: f32,
    rng: &mut R,
) {
    for sprite in sprites {
        sprite.set_position(random_on_sphere(rng, radius));
    }
}

/// Moves each sprite to a random point in a cube, including the reserved
/// `w` component.
pub fn scatter_in_cube<'a, R: Rng + ?Sized>(
    sprites: impl Iterator<Item = &'a mut BillboardSprite>,
    scale: f32,
    rng: &mut R,
) {
    for sprite in sprites {
        sprite.set_position4(random_in_cube(rng, scale));
    }
}

/// Offsets each sprite by `offset`.
pub fn translate<'a>(sprites: impl Iterator<Item = &'a mut BillboardSprite>, offset: Vec3) {
    for sprite in sprites {
        sprite.set_position(sprite.position3() + offset);
    }
}

/// Transforms each sprite position as a point by `matrix`.
pub fn transform<'a>(sprites: impl Iterator<Item = &'a mut BillboardSprite>, matrix: Mat4) {
    for sprite in sprites {
        sprite.set_position(matrix.transform_point3(sprite.position3()));
    }
}
