//! The collection loader: the asynchronous level-load state machine.
//!
//! Loading runs in two halves. [`begin_load`] resolves the level proxy in
//! the main scene and issues the host's asynchronous load request; it
//! never blocks, because it runs inside the engine-initialized event where
//! blocking is disallowed. [`finish_load`] consumes the completion the
//! host delivers through the load channel: it acquires the loaded scene,
//! resolves the star factory inside it, and activates the scene.
//!
//! At most one request is in flight at a time by construction: the ticket
//! lives inside the controller's loading phase, and a new load can only be
//! issued from a phase that has no ticket.

use tracing::info;

use crate::constants::{
    FACTORIES_ENTITY_ID, FACTORY_TYPE_EXTENSION, LEVELS_ENTITY_ID, LEVEL_PROXY_ID,
    PROXY_TYPE_EXTENSION, STAR_FACTORY_ID,
};
use crate::context::{GameContext, Level};
use crate::error::{GameResult, LoadError, ResolutionError};
use crate::host::{load_channel, ComponentRef, Host, LoadCompletion, LoadStatus, LoadTicket, SceneHandle};

/// Resolves the component `component_id` on entity `entity_id` and checks
/// it against the scene's registered type index for `extension`.
///
/// A type-index mismatch means the content and the host disagree about
/// what the component is; nothing at runtime can repair that.
fn resolve_component<H: Host>(
    host: &H,
    scene: SceneHandle,
    entity_id: &str,
    component_id: &str,
    extension: &str,
) -> Result<ComponentRef, ResolutionError> {
    let expected = host
        .component_type_index(scene, extension)
        .ok_or_else(|| ResolutionError::UnknownComponentType(extension.to_string()))?;

    let entity = host
        .entity_by_id(scene, entity_id)
        .ok_or_else(|| ResolutionError::EntityNotFound(entity_id.to_string()))?;

    let component =
        host.component(entity, component_id)
            .map_err(|source| ResolutionError::ComponentNotFound {
                entity: entity_id.to_string(),
                component: component_id.to_string(),
                source,
            })?;

    if component.type_index != expected {
        return Err(ResolutionError::ComponentTypeMismatch {
            component: component_id.to_string(),
            expected,
            actual: component.type_index,
        });
    }

    Ok(component)
}

/// Issues the asynchronous load of the level collection through the proxy
/// component in the main scene.
///
/// Returns the ticket to poll for completion, plus the proxy reference the
/// activation steps need once the load resolves. Returns immediately; the
/// result is observed only through the ticket on a later tick.
pub fn begin_load<H: Host>(
    host: &mut H,
    main_scene: SceneHandle,
) -> GameResult<(LoadTicket, ComponentRef)> {
    info!("Loading level collection via {}#{}", LEVELS_ENTITY_ID, LEVEL_PROXY_ID);

    let proxy = resolve_component(
        host,
        main_scene,
        LEVELS_ENTITY_ID,
        LEVEL_PROXY_ID,
        PROXY_TYPE_EXTENSION,
    )?;

    let (sender, ticket) = load_channel();
    host.proxy_load_async(&proxy, sender)
        .map_err(LoadError::RequestFailed)?;

    Ok((ticket, proxy))
}

/// Consumes the completion of an asynchronous load: acquires the loaded
/// scene, resolves the star factory inside it, and runs the two activation
/// steps.
pub fn finish_load<H: Host>(
    ctx: &mut GameContext,
    host: &mut H,
    proxy: &ComponentRef,
    completion: LoadCompletion,
) -> GameResult<()> {
    info!("Load completed for '{}': {:?}", completion.path, completion.status);

    if completion.status != LoadStatus::Loaded {
        return Err(LoadError::LoadFailed(completion.path).into());
    }

    let scene = host
        .acquire_scene(&completion.path)
        .map_err(|_| LoadError::AcquireFailed(completion.path.clone()))?;

    let factory = resolve_component(
        host,
        scene,
        FACTORIES_ENTITY_ID,
        STAR_FACTORY_ID,
        FACTORY_TYPE_EXTENSION,
    )?;

    ctx.level = Some(Level { scene, factory });

    // Spawning runs first-time initialization on the spawned instance the
    // same way the scene's own init pass does, so the scene must be
    // initialized (then enabled) before the first spawn.
    host.proxy_initialize(proxy);
    host.proxy_enable(proxy);

    Ok(())
}
