use crate::geometry::{Bounded, Rect};

use super::player::{Player, MAX_HEALTH};

pub const PICKUP_SIZE: f32 = 20.0;
pub const HEAL_AMOUNT: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    Health,
    Ammo,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub x: f32,
    pub y: f32,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(x: f32, y: f32, kind: PickupKind) -> Self {
        Pickup { x, y, kind }
    }

    /// Apply this pickup to the player. Health is capped at full, ammo refills
    /// only the weapon currently equipped. The caller removes the pickup
    /// whether or not anything changed.
    pub fn collect(&self, player: &mut Player) {
        match self.kind {
            PickupKind::Health => {
                player.health = (player.health + HEAL_AMOUNT).min(MAX_HEALTH);
            }
            PickupKind::Ammo => {
                let weapon = player.current_weapon_mut();
                weapon.ammo = weapon.max_ammo;
            }
        }
    }
}

impl Bounded for Pickup {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PICKUP_SIZE, PICKUP_SIZE)
    }
}
