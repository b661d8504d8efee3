//! Sprites owned and driven by a camera.

use glam::{Mat4, UVec3, Vec3};
use rand::Rng;
use sprite3d_core::{Result, Sprite3dError, SpriteId, TextureFrame};
use sprite3d_structures::{scatter, BillboardSprite, SpriteSet};

use super::Camera;
use crate::projection::Projection;

impl<P: Projection> Camera<P> {
    /// Re-projects every owned sprite against the current matrices.
    ///
    /// Sprites see the camera only through a shared borrow, so none of
    /// them can add or remove siblings while the pass runs.
    pub fn update_children(&mut self) -> &mut Self {
        let mut children = std::mem::take(&mut self.children);
        for (_, sprite) in children.iter_mut() {
            sprite.project(&*self);
        }
        self.children = children;
        self
    }

    /// Sprites owned by this camera.
    #[must_use]
    pub fn children(&self) -> &SpriteSet {
        &self.children
    }

    /// Gets an owned sprite.
    #[must_use]
    pub fn sprite(&self, id: SpriteId) -> Option<&BillboardSprite> {
        self.children.get(id)
    }

    /// Gets an owned sprite for editing. Its proxy is refreshed on the
    /// next recompute.
    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut BillboardSprite> {
        self.children.get_mut(id)
    }

    /// Takes ownership of `sprite`, registers its proxy with the host and
    /// projects it.
    pub fn add(&mut self, sprite: BillboardSprite) -> SpriteId {
        let id = self.insert_child(sprite);
        self.update_children();
        id
    }

    fn insert_child(&mut self, sprite: BillboardSprite) -> SpriteId {
        let texture = sprite.texture().clone();
        let id = self.children.insert(sprite);
        self.host.add(id, &texture);
        log::debug!("camera '{}': added sprite {id} ({})", self.name, texture.key);
        id
    }

    /// Releases a sprite and unregisters its proxy from the host.
    pub fn remove(&mut self, id: SpriteId) -> Result<BillboardSprite> {
        let sprite = self
            .children
            .remove(id)
            .ok_or(Sprite3dError::SpriteNotFound(id))?;
        self.host.remove(id);
        log::debug!("camera '{}': removed sprite {id}", self.name);
        Ok(sprite)
    }

    /// Removes every sprite.
    pub fn clear(&mut self) -> &mut Self {
        for (id, _) in self.children.drain() {
            self.host.remove(id);
        }
        self
    }

    /// Clears all sprites. The camera stays usable afterwards.
    pub fn destroy(&mut self) {
        log::debug!(
            "camera '{}': destroyed with {} sprites",
            self.name,
            self.children.len()
        );
        self.clear();
    }

    /// Creates a sprite at `position` sized by its texture frame.
    pub fn create(
        &mut self,
        position: impl Into<Vec3>,
        texture: TextureFrame,
        visible: bool,
    ) -> SpriteId {
        let mut sprite = BillboardSprite::new(position.into(), texture);
        sprite.set_visible(visible);
        self.add(sprite)
    }

    /// Creates `quantity` sprites at the origin.
    ///
    /// They are not projected until the next recompute, so callers can
    /// position them first.
    pub fn create_multiple(
        &mut self,
        quantity: usize,
        texture: &TextureFrame,
        visible: bool,
    ) -> Vec<SpriteId> {
        (0..quantity)
            .map(|_| {
                let mut sprite = BillboardSprite::new(Vec3::ZERO, texture.clone());
                sprite.set_visible(visible);
                self.insert_child(sprite)
            })
            .collect()
    }

    /// Creates a `counts.x * counts.y * counts.z` grid of sprites centred
    /// on the origin, `spacing` apart along each axis.
    pub fn create_rect(
        &mut self,
        counts: UVec3,
        spacing: impl Into<Vec3>,
        texture: &TextureFrame,
    ) -> Vec<SpriteId> {
        let positions = scatter::grid_positions(counts, spacing.into());
        let ids = self.create_multiple(positions.len(), texture, true);
        for (id, position) in ids.iter().zip(positions) {
            if let Some(sprite) = self.children.get_mut(*id) {
                sprite.set_position(position);
            }
        }
        self.recompute();
        ids
    }

    /// Places the selected sprites (all when `ids` is `None`) at random
    /// points on a sphere of `radius` around the origin.
    pub fn random_sphere(&mut self, radius: f32, ids: Option<&[SpriteId]>) -> &mut Self {
        self.random_sphere_with(radius, ids, &mut rand::thread_rng())
    }

    /// [`random_sphere`](Self::random_sphere) with a caller-supplied generator.
    pub fn random_sphere_with<R: Rng + ?Sized>(
        &mut self,
        radius: f32,
        ids: Option<&[SpriteId]>,
        rng: &mut R,
    ) -> &mut Self {
        scatter::scatter_on_sphere(self.children.selection_mut(ids), radius, rng);
        self.recompute()
    }

    /// Places the selected sprites at random points in a cube of
    /// half-extent `scale`.
    pub fn random_cube(&mut self, scale: f32, ids: Option<&[SpriteId]>) -> &mut Self {
        self.random_cube_with(scale, ids, &mut rand::thread_rng())
    }

    /// [`random_cube`](Self::random_cube) with a caller-supplied generator.
    pub fn random_cube_with<R: Rng + ?Sized>(
        &mut self,
        scale: f32,
        ids: Option<&[SpriteId]>,
        rng: &mut R,
    ) -> &mut Self {
        scatter::scatter_in_cube(self.children.selection_mut(ids), scale, rng);
        self.recompute()
    }

    /// Moves the selected sprites by `offset`.
    pub fn translate_children(
        &mut self,
        offset: impl Into<Vec3>,
        ids: Option<&[SpriteId]>,
    ) -> &mut Self {
        scatter::translate(self.children.selection_mut(ids), offset.into());
        self.recompute()
    }

    /// Transforms the selected sprite positions by `matrix`.
    pub fn transform_children(&mut self, matrix: Mat4, ids: Option<&[SpriteId]>) -> &mut Self {
        scatter::transform(self.children.selection_mut(ids), matrix);
        self.recompute()
    }
}
