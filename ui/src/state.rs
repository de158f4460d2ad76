use snaily_business::{BusinessConfig, FeatureFlags, Route, build_state_ctx};
use snaily_states::StateCtx;

/// The main application state.
pub struct State {
    /// States, computes and commands of every page.
    pub ctx: StateCtx,
    /// Resolved once from the CAD settings before the first frame.
    pub features: FeatureFlags,
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            BusinessConfig::default(),
            FeatureFlags::default(),
            Route::default(),
        )
    }
}

impl State {
    pub fn new(config: BusinessConfig, features: FeatureFlags, route: Route) -> Self {
        Self {
            ctx: build_state_ctx(config, route),
            features,
        }
    }

    pub fn test(base_url: String) -> Self {
        Self::new(
            BusinessConfig::new(base_url),
            FeatureFlags::default(),
            Route::default(),
        )
    }

    pub fn route(&self) -> &Route {
        self.ctx.state::<Route>()
    }

    pub fn navigate(&mut self, route: Route) {
        log::info!("Navigating to {route}");
        self.ctx.update::<Route>(|current| *current = route);
    }
}
