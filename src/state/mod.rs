pub mod color;
pub mod session;

use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use rand::{Rng, rng};
use tokio::{sync::Mutex, time::Instant};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::color_model::ColorModel,
    render::mesh::{MESH_SEED_MIN, MeshGenerator, ShepardMesh},
};

pub use self::session::{DesignerSession, RequestToken, SessionError};

/// Handle to the application state cloned into every handler.
pub type SharedState = Arc<AppState>;
/// A session guarded for exclusive mutation by one handler at a time.
pub type SessionHandle = Arc<Mutex<DesignerSession>>;

struct SessionEntry {
    handle: SessionHandle,
    last_touched: Instant,
}

/// Central application state: configuration, the model backend, the mesh generator and
/// every live designer session.
pub struct AppState {
    config: AppConfig,
    color_model: Option<Arc<dyn ColorModel>>,
    mesh: Arc<dyn MeshGenerator>,
    sessions: DashMap<Uuid, SessionEntry>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// Without a color model the prompt routes answer with "service unavailable".
    pub fn new(config: AppConfig, color_model: Option<Arc<dyn ColorModel>>) -> SharedState {
        Self::with_mesh_generator(config, color_model, Arc::new(ShepardMesh::default()))
    }

    /// Same as [`AppState::new`] with a custom mesh generator.
    pub fn with_mesh_generator(
        config: AppConfig,
        color_model: Option<Arc<dyn ColorModel>>,
        mesh: Arc<dyn MeshGenerator>,
    ) -> SharedState {
        Arc::new(Self {
            config,
            color_model,
            mesh,
            sessions: DashMap::new(),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Installed language-model backend, if any.
    pub fn color_model(&self) -> Option<Arc<dyn ColorModel>> {
        self.color_model.clone()
    }

    /// Generator used for mesh mode.
    pub fn mesh_generator(&self) -> Arc<dyn MeshGenerator> {
        self.mesh.clone()
    }

    /// Whether the service runs without a language model.
    pub fn is_degraded(&self) -> bool {
        self.color_model.is_none()
    }

    /// Uniformly random seed in `MESH_SEED_MIN..=mesh_seed_max`.
    pub fn random_mesh_seed(&self) -> u32 {
        rng().random_range(MESH_SEED_MIN..=self.config.mesh_seed_max())
    }

    /// Register a session seeded with the configured defaults.
    pub fn create_session(&self) -> SessionHandle {
        let id = Uuid::new_v4();
        let session = DesignerSession::new(
            id,
            self.config.default_colors().to_vec(),
            self.config.default_angle(),
            self.random_mesh_seed(),
        );
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_touched: Instant::now(),
            },
        );
        handle
    }

    /// Look up a live session and mark it as recently used.
    pub fn session(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.get_mut(&id).map(|mut entry| {
            entry.last_touched = Instant::now();
            entry.handle.clone()
        })
    }

    /// Drop a session, returning whether it existed.
    pub fn remove_session(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop every session untouched for at least `max_idle`, returning how many went.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut evicted = 0;
        self.sessions.retain(|_, entry| {
            let keep = now.duration_since(entry.last_touched) < max_idle;
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }
}
