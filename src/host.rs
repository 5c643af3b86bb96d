//! The host collaborator contract.
//!
//! The core never talks to an engine directly. Every primitive it needs,
//! from resource acquisition and scene lookup to the asynchronous
//! collection proxy, the spawn factory, transforms, configuration and the
//! clock, sits behind the [`Host`] trait. The host owns all scenes and
//! entities; the core only holds the opaque handles defined here.

use std::sync::mpsc;
use std::time::Duration;

use glam::{Quat, Vec3};

use crate::error::HostError;

/// Opaque handle to a loaded scene (a collection of entities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// Opaque handle to a live entity instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// Opaque handle to a component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentHandle(pub u64);

/// Opaque handle to the world owning a component type's instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldHandle(pub u64);

/// Index of a registered component type within a scene.
pub type TypeIndex = u32;

/// Slot index acquired from a scene's identity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceIndex(pub u32);

/// Identifier the host derives from an [`InstanceIndex`] for a spawned
/// entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// A resolved component: the component itself, the world that owns it, and
/// the type index used for defensive type-consistency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentRef {
    pub component: ComponentHandle,
    pub world: WorldHandle,
    pub type_index: TypeIndex,
}

/// Component property overrides applied at spawn time. Stars spawn without
/// any, but the host contract accepts them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    pub values: Vec<(String, f32)>,
}

/// Events the host raises on this extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine is fully initialized; gameplay may start.
    Initialized,
    /// The engine is tearing down; release what we hold.
    Teardown,
}

/// Outcome the host reports for an asynchronous collection load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Failed,
}

/// Completion message for one asynchronous load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCompletion {
    /// Resource path of the collection the proxy loaded.
    pub path: String,
    pub status: LoadStatus,
}

/// Producer half of a load request.
///
/// The host delivers exactly one completion; delivery consumes the sender,
/// so a request cannot complete twice.
#[derive(Debug)]
pub struct LoadSender(mpsc::Sender<LoadCompletion>);

impl LoadSender {
    pub fn complete(self, completion: LoadCompletion) {
        // The receiver is gone only if the session was dropped mid-load;
        // nothing is waiting on the result then.
        let _ = self.0.send(completion);
    }
}

/// Consumer half of a load request, polled by the controller at tick
/// start.
#[derive(Debug)]
pub struct LoadTicket(mpsc::Receiver<LoadCompletion>);

impl LoadTicket {
    /// Returns the completion once the host has delivered it. Never
    /// blocks.
    pub fn poll(&self) -> Option<LoadCompletion> {
        self.0.try_recv().ok()
    }
}

/// Creates the channel connecting one load request to its completion.
pub fn load_channel() -> (LoadSender, LoadTicket) {
    let (tx, rx) = mpsc::channel();
    (LoadSender(tx), LoadTicket(rx))
}

/// The engine-side primitives the control core drives.
///
/// All calls are non-blocking and run on the host's update thread; the
/// only asynchronous operation is [`Host::proxy_load_async`], whose result
/// arrives through the [`LoadSender`] handed to it.
pub trait Host {
    // Resource acquisition. Reference-counted on the host side; the core
    // pairs every successful acquire with a release.
    fn acquire_scene(&mut self, path: &str) -> Result<SceneHandle, HostError>;
    fn release_scene(&mut self, scene: SceneHandle);

    // Scene and entity lookup.
    fn entity_by_id(&self, scene: SceneHandle, id: &str) -> Option<EntityHandle>;
    fn component(&self, entity: EntityHandle, id: &str) -> Result<ComponentRef, HostError>;
    fn component_type_index(&self, scene: SceneHandle, extension: &str) -> Option<TypeIndex>;

    // Collection proxy: asynchronous sub-scene loading and the two-step
    // activation. `proxy_initialize` must run before `proxy_enable`;
    // enabling an uninitialized scene is undefined in the host model.
    fn proxy_load_async(&mut self, proxy: &ComponentRef, completion: LoadSender) -> Result<(), HostError>;
    fn proxy_initialize(&mut self, proxy: &ComponentRef);
    fn proxy_enable(&mut self, proxy: &ComponentRef);

    // Factory: entity spawning from a template.
    fn acquire_instance_index(&mut self, scene: SceneHandle) -> Option<InstanceIndex>;
    fn construct_instance_id(&self, index: InstanceIndex) -> InstanceId;
    #[allow(clippy::too_many_arguments)]
    fn spawn(
        &mut self,
        factory: &ComponentRef,
        scene: SceneHandle,
        index: InstanceIndex,
        id: InstanceId,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
        properties: Option<&PropertySet>,
    ) -> Result<EntityHandle, HostError>;

    // Transforms.
    fn position(&self, entity: EntityHandle) -> Vec3;
    fn set_position(&mut self, entity: EntityHandle, position: Vec3);

    // Configuration.
    fn config_string(&self, key: &str) -> Option<String>;
    fn config_int(&self, key: &str, default: i32) -> i32;

    // Monotonic clock.
    fn now(&self) -> Duration;
}
