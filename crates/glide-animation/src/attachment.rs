//! Binding that pushes animator output into an external movable entity

use crate::orientation::Facing;
use glide_core::{Transform, Vec3};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// Something an animator can move around.
pub trait Movable {
    fn set_position(&mut self, position: Vec3);

    /// Turn to face along `facing.direction`. Entities that don't rotate can
    /// keep the default no-op.
    fn face(&mut self, _facing: &Facing) {}
}

impl Movable for Transform {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn face(&mut self, facing: &Facing) {
        self.look_in_direction(facing.direction);
    }
}

/// Shared handle to the entity an animator drives.
pub type SharedMovable = Rc<RefCell<dyn Movable>>;

/// An attached entity plus whether it should be turned each tick.
#[derive(Clone)]
pub struct Attachment {
    target: SharedMovable,
    orient: bool,
}

impl Attachment {
    pub fn new(target: SharedMovable, orient: bool) -> Self {
        Self { target, orient }
    }

    pub fn target(&self) -> &SharedMovable {
        &self.target
    }

    /// Copy one tick's output into the entity.
    ///
    /// Returns false, leaving the entity untouched, if it is borrowed
    /// elsewhere at the time.
    pub fn apply(&self, position: Vec3, facing: Option<&Facing>) -> bool {
        let Ok(mut target) = self.target.try_borrow_mut() else {
            warn!("attached entity is already borrowed; skipping this tick's update");
            return false;
        };
        target.set_position(position);
        if self.orient {
            if let Some(facing) = facing {
                target.face(facing);
            }
        }
        true
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("orient", &self.orient)
            .finish_non_exhaustive()
    }
}
