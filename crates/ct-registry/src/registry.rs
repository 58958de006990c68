//! In-memory camera list.
//!
//! `CameraRegistry` is an ordinary owned value: callers create one (usually
//! from [`CameraStore::load`](crate::CameraStore::load)), pass it by
//! reference to [`Tracker`](crate::Tracker), and persist it themselves.
//! Registration order is kept and is significant: it breaks distance ties
//! when ranking cameras against a route.
//!
//! Mutation needs `&mut self`, so concurrent writers must be serialised by
//! the caller (e.g. behind a `Mutex`).

use ct_core::Camera;

use crate::{RegistryError, RegistryResult};

/// Ordered list of cameras with unique, non-empty names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraRegistry {
    cameras: Vec<Camera>,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from cameras in registration order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EmptyName`] or [`RegistryError::DuplicateName`] on
    /// the first camera that violates the naming rules.
    pub fn from_cameras(cameras: Vec<Camera>) -> RegistryResult<Self> {
        let mut registry = Self::new();
        for camera in cameras {
            registry.insert(camera)?;
        }
        Ok(registry)
    }

    /// Check that `name` could be registered: non-empty after trimming and
    /// not already taken.  Returns the trimmed name.
    pub fn check_name<'a>(&self, name: &'a str) -> RegistryResult<&'a str> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(name) {
            return Err(RegistryError::DuplicateName(name.to_owned()));
        }
        Ok(name)
    }

    /// Append a camera, enforcing the naming rules.  The stored name is
    /// trimmed.  The registry is left untouched on error.
    pub fn insert(&mut self, mut camera: Camera) -> RegistryResult<&Camera> {
        camera.name = self.check_name(&camera.name)?.to_owned();
        self.cameras.push(camera);
        Ok(&self.cameras[self.cameras.len() - 1])
    }

    pub fn get(&self, name: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Cameras in registration order.
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Camera> {
        self.cameras.iter()
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    /// Remove every camera.
    pub fn clear(&mut self) {
        self.cameras.clear();
    }
}

impl<'a> IntoIterator for &'a CameraRegistry {
    type Item = &'a Camera;
    type IntoIter = std::slice::Iter<'a, Camera>;

    fn into_iter(self) -> Self::IntoIter {
        self.cameras.iter()
    }
}
