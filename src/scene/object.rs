use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra_glm as glm;

/// Identity of an `Animator` component.
///
/// Fresh ids are handed out on creation and again on instantiation, so a
/// duplicated hierarchy never aliases the components of the original object.
/// The playable graph is bound against this identity and torn down whenever
/// it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimatorId(u64);

static NEXT_ANIMATOR_ID: AtomicU64 = AtomicU64::new(1);

impl AnimatorId {
    fn next() -> Self {
        Self(NEXT_ANIMATOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The animation-capable component a preview target must carry somewhere in
/// its hierarchy. Only its identity matters to the preview tool; the actual
/// pose writes go to the transform tree rooted at the owning object.
#[derive(Debug, Clone)]
pub struct Animator {
    id: AnimatorId,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            id: AnimatorId::next(),
        }
    }

    pub fn id(&self) -> AnimatorId {
        self.id
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Transform {
    pub translation: glm::Vec3,
    pub rotation: glm::Qua<f32>,
    pub scale: glm::Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::quat_identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> glm::Mat4 {
        glm::translation(&self.translation)
            * glm::quat_to_mat4(&self.rotation)
            * glm::scaling(&self.scale)
    }
}

/// A named node in the scene: local transform, optional animator component,
/// child nodes. Scene objects are plain owned trees; the preview instance is
/// a deep clone of one of them.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub animator: Option<Animator>,
    pub children: Vec<SceneObject>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            animator: None,
            children: Vec::new(),
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.translation = glm::vec3(x, y, z);
        self
    }

    pub fn with_animator(mut self) -> Self {
        self.animator = Some(Animator::new());
        self
    }

    pub fn with_child(mut self, child: SceneObject) -> Self {
        self.children.push(child);
        self
    }

    /// First animator on this object or any descendant, depth-first.
    pub fn find_animator(&self) -> Option<&Animator> {
        if let Some(animator) = &self.animator {
            return Some(animator);
        }
        self.children.iter().find_map(SceneObject::find_animator)
    }

    /// Node owning the animator with the given identity, if present in this
    /// subtree.
    pub fn find_animated_mut(&mut self, id: AnimatorId) -> Option<&mut SceneObject> {
        if self.animator.as_ref().is_some_and(|a| a.id() == id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_animated_mut(id))
    }

    /// Node with the given name in this subtree, including self.
    pub fn find_node_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_node_mut(name))
    }

    /// Disposable duplicate for previewing: deep clone with fresh animator
    /// identities, placed at the origin. Never registered with the scene.
    pub fn instantiate(&self) -> SceneObject {
        let mut copy = self.clone();
        copy.transform.translation = glm::vec3(0.0, 0.0, 0.0);
        copy.refresh_animator_ids();
        copy
    }

    fn refresh_animator_ids(&mut self) {
        if self.animator.is_some() {
            self.animator = Some(Animator::new());
        }
        for child in &mut self.children {
            child.refresh_animator_ids();
        }
    }
}

/// Flat list of root objects the user can pick a preview target from.
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> SceneObject {
        SceneObject::new("Root")
            .with_child(SceneObject::new("Pelvis").at(0.0, 1.0, 0.0).with_animator())
    }

    #[test]
    fn animator_found_on_descendant() {
        let object = rig();
        assert!(object.animator.is_none());
        assert!(object.find_animator().is_some());
    }

    #[test]
    fn animator_absent_when_hierarchy_has_none() {
        let object = SceneObject::new("Crate").with_child(SceneObject::new("Lid"));
        assert!(object.find_animator().is_none());
    }

    #[test]
    fn instantiate_assigns_fresh_identities() {
        let object = rig();
        let original = object.find_animator().unwrap().id();
        let instance = object.instantiate();
        let copied = instance.find_animator().unwrap().id();
        assert_ne!(original, copied);
    }

    #[test]
    fn instantiate_places_copy_at_origin() {
        let object = rig().at(3.0, 0.0, -2.0);
        let instance = object.instantiate();
        assert_eq!(instance.transform.translation, glm::vec3(0.0, 0.0, 0.0));
    }

    #[test]
    fn find_animated_reaches_owning_node() {
        let mut instance = rig().instantiate();
        let id = instance.find_animator().unwrap().id();
        assert_eq!(instance.find_animated_mut(id).unwrap().name, "Pelvis");
    }
}
