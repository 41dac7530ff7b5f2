//! View Registry - the set of views an application serves
//!
//! Views are collected at startup, then frozen into an [`AppContext`] and
//! turned into a single router by [`ViewRegistry::into_router`].

use crate::view::{ApiView, AppContext, BaseView};
use axum::Router;
use core_config::docs::DocsConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registered views plus the documentation settings.
pub struct ViewRegistry {
    config: DocsConfig,
    views: Vec<Arc<dyn BaseView>>,
}

impl ViewRegistry {
    pub fn new(config: DocsConfig) -> Self {
        Self {
            config,
            views: Vec::new(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Registers an API view. It takes part in spec generation for its version.
    pub fn add_api<V: ApiView>(&mut self, view: V) -> &mut Self {
        if self.has_view(view.name()) {
            warn!(view = view.name(), "View already registered, skipping");
            return self;
        }

        info!(
            view = view.name(),
            version = view.version(),
            route_base = %view.route_base(),
            "Registered API view"
        );
        self.views.push(Arc::new(view));
        self
    }

    /// Registers a page view that is not part of any spec.
    pub fn add_view_no_menu<V: BaseView>(&mut self, view: V) -> &mut Self {
        if self.has_view(view.name()) {
            warn!(view = view.name(), "View already registered, skipping");
            return self;
        }

        info!(
            view = view.name(),
            route_base = %view.route_base(),
            "Registered view"
        );
        self.views.push(Arc::new(view));
        self
    }

    pub fn views(&self) -> &[Arc<dyn BaseView>] {
        &self.views
    }

    pub fn api_views(&self) -> impl Iterator<Item = &dyn ApiView> {
        self.views.iter().filter_map(|view| view.as_api())
    }

    pub fn has_view(&self, name: &str) -> bool {
        self.views.iter().any(|view| view.name() == name)
    }

    /// Every endpoint pattern served by the registered views, in registration order.
    pub fn route_table(&self) -> Vec<String> {
        self.views.iter().flat_map(|view| view.endpoints()).collect()
    }

    /// Freezes the registry and builds the application router.
    ///
    /// Unmatched requests get the JSON 404 body; all requests are traced.
    pub fn into_router(self) -> Router {
        let ctx = Arc::new(AppContext::new(self.config, self.views));

        let routes = ctx.views().iter().fold(Router::new(), |router, view| {
            debug!(view = view.name(), "Mounting view routes");
            router.merge(view.router(&ctx))
        });

        axum_helpers::create_router(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ApiSpec;
    use axum::routing::get;

    struct PageView(&'static str);

    impl BaseView for PageView {
        fn name(&self) -> &str {
            self.0
        }

        fn route_base(&self) -> String {
            format!("/{}", self.0)
        }

        fn endpoints(&self) -> Vec<String> {
            vec![format!("GET /{}", self.0)]
        }

        fn router(&self, _ctx: &Arc<AppContext>) -> Router {
            Router::new().route(&self.route_base(), get(|| async { "page" }))
        }
    }

    struct VersionedView(&'static str, &'static str);

    impl BaseView for VersionedView {
        fn name(&self) -> &str {
            self.0
        }

        fn route_base(&self) -> String {
            format!("/api/{}/{}", self.1, self.0)
        }

        fn endpoints(&self) -> Vec<String> {
            vec![format!("GET {}", self.route_base())]
        }

        fn router(&self, _ctx: &Arc<AppContext>) -> Router {
            Router::new()
        }

        fn as_api(&self) -> Option<&dyn ApiView> {
            Some(self)
        }
    }

    impl ApiView for VersionedView {
        fn version(&self) -> &str {
            self.1
        }

        fn add_api_spec(&self, _spec: &mut ApiSpec) -> crate::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_keeps_registration_order() {
        let mut registry = ViewRegistry::new(DocsConfig::new("Test"));
        registry
            .add_api(VersionedView("contact", "v1"))
            .add_view_no_menu(PageView("about"))
            .add_api(VersionedView("group", "v2"));

        let names: Vec<_> = registry.views().iter().map(|view| view.name()).collect();
        assert_eq!(names, ["contact", "about", "group"]);
        assert_eq!(
            registry.route_table(),
            ["GET /api/v1/contact", "GET /about", "GET /api/v2/group"]
        );
    }

    #[test]
    fn test_only_api_views_are_listed_as_api() {
        let mut registry = ViewRegistry::new(DocsConfig::default());
        registry
            .add_view_no_menu(PageView("about"))
            .add_api(VersionedView("contact", "v1"));

        let api: Vec<_> = registry.api_views().map(|view| view.name()).collect();
        assert_eq!(api, ["contact"]);
    }

    #[test]
    fn test_duplicate_view_names_are_skipped() {
        let mut registry = ViewRegistry::new(DocsConfig::default());
        registry
            .add_api(VersionedView("contact", "v1"))
            .add_api(VersionedView("contact", "v2"));

        assert_eq!(registry.views().len(), 1);
        assert!(registry.has_view("contact"));
        assert_eq!(registry.api_views().next().unwrap().version(), "v1");
    }

    #[test]
    fn test_app_name_comes_from_config() {
        let registry = ViewRegistry::new(DocsConfig::new("Inventory"));
        assert_eq!(registry.app_name(), "Inventory");
    }
}
