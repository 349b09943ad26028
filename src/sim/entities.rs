//! Entity lifecycle: spawning, movement and removal of bullets and meteoroids
//!
//! Each collection owns its members exclusively. A meteoroid lives in
//! `meteoroids` while intact and in `exploding` while its explosion plays;
//! it is never in both.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, Meteoroid, Player};
use crate::consts::{EXPLOSION_FINAL_FRAME, METEOROID_MIN_Y, WINDOW_HEIGHT};

/// Transient entity collections of one run
#[derive(Debug, Clone)]
pub struct Entities {
    pub bullets: Vec<Bullet>,
    /// Intact, collidable meteoroids
    pub meteoroids: Vec<Meteoroid>,
    /// Meteoroids playing their explosion; not collidable
    pub exploding: Vec<Meteoroid>,
    next_id: u32,
}

impl Default for Entities {
    fn default() -> Self {
        Self {
            bullets: Vec::new(),
            meteoroids: Vec::new(),
            exploding: Vec::new(),
            next_id: 1,
        }
    }
}

impl Entities {
    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a meteoroid just past the right edge at a random height
    pub fn spawn_meteoroid<R: Rng>(&mut self, rng: &mut R) -> Meteoroid {
        let y = rng.random_range(METEOROID_MIN_Y..=WINDOW_HEIGHT - METEOROID_MIN_Y);
        self.spawn_meteoroid_at(y)
    }

    /// Spawn a meteoroid just past the right edge at height `y`
    pub fn spawn_meteoroid_at(&mut self, y: f32) -> Meteoroid {
        let id = self.next_entity_id();
        let meteoroid = Meteoroid::new(id, y);
        self.meteoroids.push(meteoroid);
        meteoroid
    }

    /// Fire a bullet from the ship's nose. Cooldown is the caller's job.
    pub fn fire_bullet(&mut self, player: &Player) -> Bullet {
        let id = self.next_entity_id();
        let bullet = Bullet::new(id, player.muzzle());
        self.bullets.push(bullet);
        bullet
    }

    /// Move intact meteoroids at `indices` into the exploding collection.
    /// Duplicate indices transition once. Returns the IDs that transitioned.
    pub fn explode(&mut self, indices: &[usize]) -> Vec<u32> {
        let mask = index_mask(self.meteoroids.len(), indices);
        let mut exploded = Vec::new();
        let mut i = 0;
        self.meteoroids.retain(|m| {
            let hit = mask[i];
            i += 1;
            if hit {
                let mut m = *m;
                m.explosion_frame = 1;
                exploded.push(m.id);
                self.exploding.push(m);
            }
            !hit
        });
        exploded
    }

    /// Remove bullets at `indices`
    pub fn remove_bullets(&mut self, indices: &[usize]) {
        retain_unmarked(&mut self.bullets, indices);
    }

    /// Remove intact meteoroids at `indices` without exploding them
    pub fn remove_meteoroids(&mut self, indices: &[usize]) {
        retain_unmarked(&mut self.meteoroids, indices);
    }

    /// Advance everything one tick: bullets right, meteoroids left, and each
    /// explosion one frame. An explosion reaching its final frame is gone.
    pub fn advance(&mut self, bullet_speed: f32, meteoroid_speed: f32) {
        for bullet in &mut self.bullets {
            bullet.rect.translate(Vec2::new(bullet_speed, 0.0));
        }
        for meteoroid in &mut self.meteoroids {
            meteoroid.rect.translate(Vec2::new(-meteoroid_speed, 0.0));
        }
        for meteoroid in &mut self.exploding {
            meteoroid.rect.translate(Vec2::new(-meteoroid_speed, 0.0));
            meteoroid.explosion_frame += 1;
        }
        self.exploding
            .retain(|m| m.explosion_frame < EXPLOSION_FINAL_FRAME);
    }
}

/// Per-element removal flags; out-of-range indices are ignored
fn index_mask(len: usize, indices: &[usize]) -> Vec<bool> {
    let mut mask = vec![false; len];
    for &i in indices {
        if let Some(flag) = mask.get_mut(i) {
            *flag = true;
        }
    }
    mask
}

/// Drop marked elements, keeping the order of the rest
fn retain_unmarked<T>(items: &mut Vec<T>, indices: &[usize]) {
    let mask = index_mask(items.len(), indices);
    let mut i = 0;
    items.retain(|_| {
        let keep = !mask[i];
        i += 1;
        keep
    });
}
