// ── Page router ──
//
// Fixed mapping from URL path to a named page. Pages are built on first
// navigation and reused afterwards. The router enforces nothing: audience
// is descriptive, the backend rejects what a role may not do.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::model::{Identity, Role};

/// Who a page is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Audience {
    Anyone,
    SignedIn,
    Admin,
    User,
}

impl Audience {
    /// Whether `identity` is who this page is meant for.
    pub fn includes(self, identity: &Identity) -> bool {
        match self {
            Self::Anyone => true,
            Self::SignedIn => identity.is_authenticated(),
            Self::Admin => identity.role == Some(Role::Admin),
            Self::User => identity.role == Some(Role::User),
        }
    }
}

/// Every page of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Route {
    Home,
    Login,
    Register,
    AdminLogin,
    AdminDashboard,
    UserDashboard,
    Lots,
    Spots,
    Users,
    Search,
    Profile,
    AdminSummary,
    UserSummary,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::AdminLogin => "/admin-login",
            Self::AdminDashboard => "/admin/dashboard",
            Self::UserDashboard => "/dashboard",
            Self::Lots => "/lots",
            Self::Spots => "/spots",
            Self::Users => "/users",
            Self::Search => "/search",
            Self::Profile => "/profile",
            Self::AdminSummary => "/admin/summary",
            Self::UserSummary => "/summary",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::AdminLogin => "admin-login",
            Self::AdminDashboard => "admin-dashboard",
            Self::UserDashboard => "user-dashboard",
            Self::Lots => "lots",
            Self::Spots => "spots",
            Self::Users => "users",
            Self::Search => "search",
            Self::Profile => "profile",
            Self::AdminSummary => "admin-summary",
            Self::UserSummary => "user-summary",
        }
    }

    pub const fn audience(self) -> Audience {
        match self {
            Self::Home | Self::Login | Self::Register | Self::AdminLogin => Audience::Anyone,
            Self::AdminDashboard | Self::Lots | Self::Spots | Self::Users | Self::AdminSummary => {
                Audience::Admin
            }
            Self::UserDashboard | Self::UserSummary => Audience::User,
            Self::Search | Self::Profile => Audience::SignedIn,
        }
    }

    /// Match a path exactly. Query string, fragment and a trailing slash
    /// are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = normalize(path);
        Self::iter().find(|route| route.path() == path)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|route| route.name() == name)
    }

    /// The dashboard a freshly signed-in identity lands on.
    pub fn landing(identity: &Identity) -> Self {
        match identity.role {
            Some(Role::Admin) => Self::AdminDashboard,
            Some(Role::User) => Self::UserDashboard,
            None => Self::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path.get(..end).unwrap_or(path).trim();
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

// ── Router ───────────────────────────────────────────────────────────

/// Result of navigating to a path.
#[derive(Debug)]
pub enum Navigation<'a, V> {
    Found { route: Route, view: &'a mut V },
    NotFound { path: String },
}

impl<V> Navigation<'_, V> {
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Found { route, .. } => Some(*route),
            Self::NotFound { .. } => None,
        }
    }
}

type ViewFactory<V> = Box<dyn Fn(Route) -> V + Send + Sync>;

/// Maps paths to lazily built views of type `V`.
pub struct Router<V> {
    factory: ViewFactory<V>,
    views: HashMap<Route, V>,
    current: Option<Route>,
}

impl<V> Router<V> {
    /// `factory` builds the view for a route the first time it is visited.
    pub fn new(factory: impl Fn(Route) -> V + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            views: HashMap::new(),
            current: None,
        }
    }

    /// Resolve `path`, building its view on first visit.
    ///
    /// An unknown path yields [`Navigation::NotFound`] and leaves the
    /// current route unchanged.
    pub fn navigate(&mut self, path: &str) -> Navigation<'_, V> {
        let Some(route) = Route::from_path(path) else {
            tracing::debug!(path, "no route for path");
            return Navigation::NotFound {
                path: path.to_owned(),
            };
        };
        self.current = Some(route);
        let factory = &self.factory;
        let view = self.views.entry(route).or_insert_with(|| factory(route));
        Navigation::Found { route, view }
    }

    /// The last route successfully navigated to.
    pub fn current(&self) -> Option<Route> {
        self.current
    }

    /// Whether the view for `route` has been built yet.
    pub fn is_instantiated(&self, route: Route) -> bool {
        self.views.contains_key(&route)
    }

    /// Every route in declaration order.
    pub fn routes() -> impl Iterator<Item = Route> {
        Route::iter()
    }
}
