// Application state for HTTP handlers
use crate::application::render_service::RenderService;
use crate::infrastructure::config::NightscoutDefaults;

#[derive(Clone)]
pub struct AppState {
    pub render_service: RenderService,
    pub nightscout_defaults: NightscoutDefaults,
}
