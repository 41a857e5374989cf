//! The Orrery viewer session: wires input, the camera controller, selection,
//! and login together and drives them once per frame.

pub mod error;
pub mod frame_clock;
pub mod headless;
pub mod input;
pub mod panels;
pub mod platform;

use std::sync::Arc;

use orrery_camera::{CameraFlightController, FlightKind};
use orrery_config::Config;
use orrery_journal::{
    Authenticator, Identity, IdentityWatch, JournalPanel, JournalStore, LoginPanel, PlanetLookup,
    SelectionCoordinator, SelectionState, Session,
};
use orrery_scene::{SceneError, SceneGraph, SpherePicker, Viewport, ViewportService};
use tracing::{debug, error, info, warn};

pub use error::{AppError, ScriptError};
pub use frame_clock::{FrameClock, MAX_FRAME_TIME};
pub use headless::LogViewport;
pub use input::{InputEvent, InputScript, ScriptStep};
pub use panels::{ConsoleJournalPanel, ConsoleLoginPanel, EntriesView};
pub use platform::{PlatformDirs, PlatformError};

/// One viewer session.
///
/// `B` is the journal backend: planet lookup, entries query, and sign-in.
/// All state is owned here and touched only from the frame loop; background
/// work reports back through [`Orrery::frame`].
pub struct Orrery<B, J = ConsoleJournalPanel, L = ConsoleLoginPanel> {
    controller: CameraFlightController,
    scene: Option<SceneGraph>,
    viewport: Viewport,
    pending_resize: Option<(u32, u32)>,
    picker: SpherePicker,
    selection: SelectionCoordinator<B, B, IdentityWatch>,
    session: Session<B>,
    journal_panel: J,
    login_panel: L,
}

impl<B, J, L> Orrery<B, J, L>
where
    B: PlanetLookup + JournalStore + Authenticator + Send + Sync + 'static,
    J: JournalPanel,
    L: LoginPanel,
{
    pub fn new(config: &Config, backend: Arc<B>, journal_panel: J, login_panel: L) -> Self {
        let session = Session::new(Arc::clone(&backend));
        let selection = SelectionCoordinator::new(
            Arc::clone(&backend),
            backend,
            session.gate(),
            &config.journal,
        );
        Self {
            controller: CameraFlightController::new(&config.camera, &config.flight),
            scene: None,
            viewport: Viewport::new(
                config.window.width,
                config.window.height,
                config.camera.fov_y_degrees,
                config.camera.near,
                config.camera.far,
            ),
            pending_resize: None,
            picker: SpherePicker,
            selection,
            session,
            journal_panel,
            login_panel,
        }
    }

    /// Open the session: the login prompt is shown once.
    pub fn start(&mut self) {
        self.session.start(&mut self.login_panel);
    }

    /// Store the loaded scene. Only the first successful load is kept; a
    /// failed load leaves picking disabled.
    pub fn scene_loaded(&mut self, result: Result<SceneGraph, SceneError>) {
        match result {
            Ok(scene) if self.scene.is_none() => {
                info!(scene = scene.name(), bodies = scene.nodes().len(), "Scene ready");
                self.scene = Some(scene);
            }
            Ok(scene) => warn!(scene = scene.name(), "Scene already loaded, ignoring"),
            Err(err) => error!(%err, "Failed to load scene; picking disabled"),
        }
    }

    /// Dispatch one input event. Must be called inside a tokio runtime.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y),
            InputEvent::Drag { dx, dy } => self.controller.on_drag(dx, dy),
            InputEvent::Wheel { delta } => self.controller.on_wheel(delta),
            InputEvent::Escape => {
                self.controller.on_escape();
                self.selection.clear(&mut self.journal_panel);
            }
            InputEvent::Resize { width, height } => {
                self.viewport.resize(width, height);
                self.pending_resize = Some(self.viewport.size());
            }
            InputEvent::CloseJournal => self.selection.clear(&mut self.journal_panel),
            InputEvent::ContinueAsGuest => self.session.continue_as_guest(&mut self.login_panel),
            InputEvent::SignIn { email, password } => self.session.sign_in(email, password),
            InputEvent::SignOut => self.session.sign_out(&mut self.login_panel),
        }
    }

    /// Run one frame: apply finished background work, advance the camera,
    /// then render. Returns the flight that arrived this frame, if any.
    pub fn frame(&mut self, dt: f32, renderer: &mut impl ViewportService) -> Option<FlightKind> {
        self.session.pump(&mut self.login_panel);
        self.selection.pump(&mut self.journal_panel);

        let arrived = self.controller.tick(dt);
        if let Some(kind) = arrived {
            info!(?kind, pose = ?self.controller.pose(), "Camera arrived");
        }

        if let Some((width, height)) = self.pending_resize.take() {
            renderer.resize(width, height);
        }
        renderer.render_frame(self.controller.pose(), self.scene.as_ref());
        arrived
    }

    fn pointer_down(&mut self, x: f32, y: f32) {
        let ndc = self.viewport.pointer_to_ndc(x, y);
        let scene = self.scene.as_ref();
        let Some(hit) = self
            .controller
            .on_click(ndc, &self.viewport, scene, &self.picker)
        else {
            return;
        };
        debug!(node = %hit.node, distance = hit.distance, "Picked");
        // The panel reopens when the new selection's results land.
        self.journal_panel.hide();
        self.selection.on_pick(hit.node.as_str());
    }

    pub fn controller(&self) -> &CameraFlightController {
        &self.controller
    }

    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.selection()
    }

    pub fn identity(&self) -> Identity {
        self.session.identity()
    }

    pub fn journal_panel(&self) -> &J {
        &self.journal_panel
    }

    pub fn login_panel(&self) -> &L {
        &self.login_panel
    }
}
