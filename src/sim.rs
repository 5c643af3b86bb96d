//! An in-memory host, used by the test suite and the headless demo.
//!
//! [`SimHost`] implements the whole [`Host`] contract over plain maps:
//! scenes keyed by resource path, named entities carrying typed
//! components, per-entity positions, a manually advanced clock, and a
//! pending-load slot the driver completes explicitly. It exists to
//! exercise the control core; it is not an engine.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use glam::{Quat, Vec3};

use crate::constants::{
    CONFIG_MAIN_SCENE, CONFIG_SCREEN_HEIGHT, CONFIG_SCREEN_WIDTH, FACTORIES_ENTITY_ID,
    FACTORY_TYPE_EXTENSION, LEVELS_ENTITY_ID, LEVEL_PROXY_ID, PROXY_TYPE_EXTENSION,
    STAR_FACTORY_ID,
};
use crate::error::HostError;
use crate::host::{
    ComponentHandle, ComponentRef, EntityHandle, Host, InstanceId, InstanceIndex, LoadCompletion,
    LoadSender, LoadStatus, PropertySet, SceneHandle, TypeIndex, WorldHandle,
};

/// Resource path of the main scene in [`SimHost::star_demo`] content.
pub const MAIN_SCENE_PATH: &str = "/main/game.scene";
/// Resource path the demo level proxy points at.
pub const LEVEL_SCENE_PATH: &str = "/levels/level1.scene";

/// Default per-scene instance budget; mirrors a typical engine project
/// setting for maximum instances per collection.
const DEFAULT_INSTANCE_LIMIT: u32 = 1024;

/// Spawned instance ids live in their own namespace, above anything a
/// scene file could author.
const SPAWNED_ID_BASE: u64 = 1 << 32;

struct SimEntity {
    handle: EntityHandle,
    components: HashMap<String, ComponentRef>,
}

struct SimScene {
    handle: SceneHandle,
    world: WorldHandle,
    entities: HashMap<String, SimEntity>,
    type_indices: HashMap<String, TypeIndex>,
    instances_used: u32,
}

/// In-memory implementation of the [`Host`] contract.
pub struct SimHost {
    scenes: HashMap<String, SimScene>,
    refcounts: HashMap<SceneHandle, u32>,
    positions: HashMap<EntityHandle, Vec3>,
    proxy_targets: HashMap<ComponentHandle, String>,
    pending_load: Option<(LoadSender, String)>,
    config: HashMap<String, String>,
    denied_paths: HashSet<String>,
    clock: Duration,
    instance_limit: u32,
    next_id: u64,
    /// Ordered record of the mutating host primitives the core invoked.
    pub journal: Vec<String>,
}

impl SimHost {
    /// An empty host: no scenes, no configuration.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            refcounts: HashMap::new(),
            positions: HashMap::new(),
            proxy_targets: HashMap::new(),
            pending_load: None,
            config: HashMap::new(),
            denied_paths: HashSet::new(),
            clock: Duration::ZERO,
            instance_limit: DEFAULT_INSTANCE_LIMIT,
            next_id: 1,
            journal: Vec::new(),
        }
    }

    /// The canonical demo content: a main scene whose level proxy points
    /// at a level scene containing the star factory, plus an 800x600
    /// display configuration.
    pub fn star_demo() -> Self {
        let mut sim = Self::new();
        sim.set_config(CONFIG_MAIN_SCENE, MAIN_SCENE_PATH);
        sim.set_config(CONFIG_SCREEN_WIDTH, "800");
        sim.set_config(CONFIG_SCREEN_HEIGHT, "600");

        sim.add_scene(MAIN_SCENE_PATH);
        sim.register_component_type(MAIN_SCENE_PATH, PROXY_TYPE_EXTENSION);
        sim.add_entity(MAIN_SCENE_PATH, LEVELS_ENTITY_ID);
        let proxy = sim.add_component(
            MAIN_SCENE_PATH,
            LEVELS_ENTITY_ID,
            LEVEL_PROXY_ID,
            PROXY_TYPE_EXTENSION,
        );
        sim.set_proxy_target(proxy, LEVEL_SCENE_PATH);

        sim.add_scene(LEVEL_SCENE_PATH);
        sim.register_component_type(LEVEL_SCENE_PATH, FACTORY_TYPE_EXTENSION);
        sim.add_entity(LEVEL_SCENE_PATH, FACTORIES_ENTITY_ID);
        sim.add_component(
            LEVEL_SCENE_PATH,
            FACTORIES_ENTITY_ID,
            STAR_FACTORY_ID,
            FACTORY_TYPE_EXTENSION,
        );

        sim
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn scene_by_handle(&self, handle: SceneHandle) -> Option<&SimScene> {
        self.scenes.values().find(|scene| scene.handle == handle)
    }

    fn scene_by_handle_mut(&mut self, handle: SceneHandle) -> Option<&mut SimScene> {
        self.scenes.values_mut().find(|scene| scene.handle == handle)
    }

    // ------------------------------------------------------------------
    // Content construction and failure injection.
    // ------------------------------------------------------------------

    pub fn set_config(&mut self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn add_scene(&mut self, path: &str) -> SceneHandle {
        let handle = SceneHandle(self.alloc());
        let world = WorldHandle(self.alloc());
        self.scenes.insert(
            path.to_string(),
            SimScene {
                handle,
                world,
                entities: HashMap::new(),
                type_indices: HashMap::new(),
                instances_used: 0,
            },
        );
        handle
    }

    pub fn register_component_type(&mut self, scene_path: &str, extension: &str) -> TypeIndex {
        let scene = self.scenes.get_mut(scene_path).expect("unknown scene path");
        let index = scene.type_indices.len() as TypeIndex;
        scene.type_indices.insert(extension.to_string(), index);
        index
    }

    pub fn add_entity(&mut self, scene_path: &str, id: &str) -> EntityHandle {
        let handle = EntityHandle(self.alloc());
        let scene = self.scenes.get_mut(scene_path).expect("unknown scene path");
        scene.entities.insert(
            id.to_string(),
            SimEntity {
                handle,
                components: HashMap::new(),
            },
        );
        handle
    }

    pub fn add_component(
        &mut self,
        scene_path: &str,
        entity_id: &str,
        component_id: &str,
        extension: &str,
    ) -> ComponentHandle {
        let handle = ComponentHandle(self.alloc());
        let scene = self.scenes.get_mut(scene_path).expect("unknown scene path");
        let type_index = *scene
            .type_indices
            .get(extension)
            .expect("extension not registered in scene");
        let world = scene.world;
        let entity = scene
            .entities
            .get_mut(entity_id)
            .expect("unknown entity id");
        entity.components.insert(
            component_id.to_string(),
            ComponentRef {
                component: handle,
                world,
                type_index,
            },
        );
        handle
    }

    /// Wires a proxy component to the scene it loads.
    pub fn set_proxy_target(&mut self, proxy: ComponentHandle, path: &str) {
        self.proxy_targets.insert(proxy, path.to_string());
    }

    pub fn remove_entity(&mut self, scene_path: &str, id: &str) {
        if let Some(scene) = self.scenes.get_mut(scene_path) {
            scene.entities.remove(id);
        }
    }

    /// Rewrites a component's type index to a value no extension maps to,
    /// for exercising the defensive type checks.
    pub fn corrupt_component_type(&mut self, scene_path: &str, entity_id: &str, component_id: &str) {
        let scene = self.scenes.get_mut(scene_path).expect("unknown scene path");
        let entity = scene
            .entities
            .get_mut(entity_id)
            .expect("unknown entity id");
        let component = entity
            .components
            .get_mut(component_id)
            .expect("unknown component id");
        component.type_index += 100;
    }

    /// Makes `acquire_scene` fail for `path`.
    pub fn deny_acquire(&mut self, path: &str) {
        self.denied_paths.insert(path.to_string());
    }

    /// Caps how many instance indices each scene hands out.
    pub fn limit_instances(&mut self, limit: u32) {
        self.instance_limit = limit;
    }

    // ------------------------------------------------------------------
    // Driver controls.
    // ------------------------------------------------------------------

    /// Advances the monotonic clock.
    pub fn advance_clock(&mut self, dt: Duration) {
        self.clock += dt;
    }

    pub fn has_pending_load(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Delivers the completion of the in-flight load request. Returns
    /// whether a request was pending.
    pub fn complete_load(&mut self, status: LoadStatus) -> bool {
        let Some((sender, path)) = self.pending_load.take() else {
            return false;
        };
        sender.complete(LoadCompletion { path, status });
        true
    }

    /// Creates a free-standing entity at `position`, outside any factory.
    pub fn spawn_entity_at(&mut self, position: Vec3) -> EntityHandle {
        let handle = EntityHandle(self.alloc());
        self.positions.insert(handle, position);
        handle
    }

    /// Current acquire refcount for the scene at `path`.
    pub fn refcount(&self, path: &str) -> u32 {
        self.scenes
            .get(path)
            .and_then(|scene| self.refcounts.get(&scene.handle))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SimHost {
    fn acquire_scene(&mut self, path: &str) -> Result<SceneHandle, HostError> {
        self.journal.push(format!("acquire {path}"));
        if self.denied_paths.contains(path) {
            return Err(HostError(format!("resource not found: {path}")));
        }
        let handle = self
            .scenes
            .get(path)
            .map(|scene| scene.handle)
            .ok_or_else(|| HostError(format!("resource not found: {path}")))?;
        *self.refcounts.entry(handle).or_insert(0) += 1;
        Ok(handle)
    }

    fn release_scene(&mut self, scene: SceneHandle) {
        self.journal.push(format!("release {}", scene.0));
        if let Some(count) = self.refcounts.get_mut(&scene) {
            *count = count.saturating_sub(1);
        }
    }

    fn entity_by_id(&self, scene: SceneHandle, id: &str) -> Option<EntityHandle> {
        self.scene_by_handle(scene)?
            .entities
            .get(id)
            .map(|entity| entity.handle)
    }

    fn component(&self, entity: EntityHandle, id: &str) -> Result<ComponentRef, HostError> {
        for scene in self.scenes.values() {
            for sim_entity in scene.entities.values() {
                if sim_entity.handle == entity {
                    return sim_entity
                        .components
                        .get(id)
                        .copied()
                        .ok_or_else(|| HostError(format!("no component '{id}' on entity")));
                }
            }
        }
        Err(HostError(format!("unknown entity {}", entity.0)))
    }

    fn component_type_index(&self, scene: SceneHandle, extension: &str) -> Option<TypeIndex> {
        self.scene_by_handle(scene)?
            .type_indices
            .get(extension)
            .copied()
    }

    fn proxy_load_async(
        &mut self,
        proxy: &ComponentRef,
        completion: LoadSender,
    ) -> Result<(), HostError> {
        let target = self
            .proxy_targets
            .get(&proxy.component)
            .cloned()
            .ok_or_else(|| HostError("component is not a collection proxy".to_string()))?;
        self.journal.push(format!("load_async {target}"));
        self.pending_load = Some((completion, target));
        Ok(())
    }

    fn proxy_initialize(&mut self, _proxy: &ComponentRef) {
        self.journal.push("proxy_initialize".to_string());
    }

    fn proxy_enable(&mut self, _proxy: &ComponentRef) {
        self.journal.push("proxy_enable".to_string());
    }

    fn acquire_instance_index(&mut self, scene: SceneHandle) -> Option<InstanceIndex> {
        let limit = self.instance_limit;
        let scene = self.scene_by_handle_mut(scene)?;
        if scene.instances_used >= limit {
            return None;
        }
        let index = scene.instances_used;
        scene.instances_used += 1;
        Some(InstanceIndex(index))
    }

    fn construct_instance_id(&self, index: InstanceIndex) -> InstanceId {
        InstanceId(SPAWNED_ID_BASE | u64::from(index.0))
    }

    fn spawn(
        &mut self,
        _factory: &ComponentRef,
        _scene: SceneHandle,
        _index: InstanceIndex,
        _id: InstanceId,
        position: Vec3,
        _rotation: Quat,
        _scale: Vec3,
        _properties: Option<&PropertySet>,
    ) -> Result<EntityHandle, HostError> {
        let handle = EntityHandle(self.alloc());
        self.positions.insert(handle, position);
        self.journal.push(format!("spawn {}", handle.0));
        Ok(handle)
    }

    fn position(&self, entity: EntityHandle) -> Vec3 {
        self.positions.get(&entity).copied().unwrap_or(Vec3::ZERO)
    }

    fn set_position(&mut self, entity: EntityHandle, position: Vec3) {
        self.positions.insert(entity, position);
    }

    fn config_string(&self, key: &str) -> Option<String> {
        self.config.get(key).cloned()
    }

    fn config_int(&self, key: &str, default: i32) -> i32 {
        self.config
            .get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }

    fn now(&self) -> Duration {
        self.clock
    }
}
