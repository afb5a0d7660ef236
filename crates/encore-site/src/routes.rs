//! The fixed route table.
//!
//! Both the HTTP server and the static exporter read this table: the server
//! to mount handlers, the exporter to enumerate the routes it can freeze,
//! and the sitemap generator to list indexable pages. All routes are GET.

/// What a route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Rendered home page.
    Home,
    /// Any file inside the static tree.
    StaticAsset,
    /// Bare `/admin`, redirected to the admin index.
    AdminRedirect,
    /// Admin asset tree root (`index.html`).
    AdminIndex,
    /// Any file inside the admin asset tree.
    AdminAsset,
    /// `robots.txt`.
    Robots,
    /// `sitemap.xml`.
    Sitemap,
}

/// A registered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Path pattern in axum syntax (`{*name}` for wildcards).
    pub path: &'static str,
    /// Handler selector.
    pub kind: RouteKind,
    /// Sitemap priority; `None` keeps the route out of the sitemap.
    pub sitemap_priority: Option<&'static str>,
}

impl Route {
    /// Whether the pattern has path parameters.
    #[must_use]
    pub fn has_params(&self) -> bool {
        self.path.contains('{')
    }

    /// Whether the exporter writes this route to disk.
    ///
    /// Parameterised routes need arguments and redirects have no body.
    #[must_use]
    pub fn is_freezable(&self) -> bool {
        !self.has_params() && self.kind != RouteKind::AdminRedirect
    }

    /// Whether the route is listed in the sitemap.
    #[must_use]
    pub fn is_indexable(&self) -> bool {
        self.sitemap_priority.is_some()
    }
}

/// Every route the site exposes.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        kind: RouteKind::Home,
        sitemap_priority: Some("1.0"),
    },
    Route {
        path: "/static/{*path}",
        kind: RouteKind::StaticAsset,
        sitemap_priority: None,
    },
    Route {
        path: "/admin",
        kind: RouteKind::AdminRedirect,
        sitemap_priority: None,
    },
    Route {
        path: "/admin/",
        kind: RouteKind::AdminIndex,
        sitemap_priority: None,
    },
    Route {
        path: "/admin/{*path}",
        kind: RouteKind::AdminAsset,
        sitemap_priority: None,
    },
    Route {
        path: "/robots.txt",
        kind: RouteKind::Robots,
        sitemap_priority: None,
    },
    Route {
        path: "/sitemap.xml",
        kind: RouteKind::Sitemap,
        sitemap_priority: None,
    },
];

/// Path registered for the given kind.
#[must_use]
pub const fn path_for(kind: RouteKind) -> &'static str {
    match kind {
        RouteKind::Home => "/",
        RouteKind::StaticAsset => "/static/{*path}",
        RouteKind::AdminRedirect => "/admin",
        RouteKind::AdminIndex => "/admin/",
        RouteKind::AdminAsset => "/admin/{*path}",
        RouteKind::Robots => "/robots.txt",
        RouteKind::Sitemap => "/sitemap.xml",
    }
}

/// Routes the exporter renders to files.
pub fn static_routes() -> impl Iterator<Item = &'static Route> {
    ROUTES.iter().filter(|r| r.is_freezable())
}
