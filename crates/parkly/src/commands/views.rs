//! Pages behind `parkly open <path>`.
//!
//! Each route of the core router gets a [`View`] that loads what the page
//! shows and prints it. Views are built lazily by the router and render
//! against whatever the backend allows: a page meant for another role
//! surfaces the backend's refusal instead of being blocked here.

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use parkly_core::{Controller, LotFilter, Navigation, Resource, Route, Router};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::{admin, auth, lots, reservations, util};

/// Everything a page needs while rendering.
pub struct ViewContext<'a> {
    pub controller: &'a Controller,
    pub global: &'a GlobalOpts,
    /// `--lot` for the spots page.
    pub lot: Option<String>,
    /// `--query` for the search page.
    pub query: Option<String>,
}

/// One page of the client.
pub trait View {
    fn title(&self) -> &'static str;

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>>;
}

/// A router that builds the page for each route on first visit.
pub fn router() -> Router<Box<dyn View>> {
    Router::new(view_for)
}

fn view_for(route: Route) -> Box<dyn View> {
    match route {
        Route::Home => Box::new(HomeView),
        Route::Login | Route::AdminLogin | Route::Register => Box::new(FormView { route }),
        Route::AdminDashboard => Box::new(AdminDashboardView),
        Route::UserDashboard => Box::new(UserDashboardView),
        Route::Lots => Box::new(LotsView),
        Route::Spots => Box::new(SpotsView),
        Route::Users => Box::new(UsersView),
        Route::Search => Box::new(SearchView),
        Route::Profile => Box::new(ProfileView),
        Route::AdminSummary => Box::new(AdminSummaryView),
        Route::UserSummary => Box::new(UserSummaryView),
    }
}

/// A page name (`lots`) stands for its path (`/lots`).
fn page_path(target: &str) -> &str {
    match Route::from_name(target) {
        Some(route) => route.path(),
        None => target,
    }
}

/// Navigate to `target` (a path or page name) and render its page.
///
/// An unknown page fails before any backend connection is made. When the
/// page fails for an identity it is not meant for, a hint names its
/// audience.
pub async fn open(
    target: &str,
    lot: Option<String>,
    query: Option<String>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut router = router();
    let (route, view) = match router.navigate(page_path(target)) {
        Navigation::Found { route, view } => {
            debug!(%route, "opening page");
            (route, view)
        }
        Navigation::NotFound { path } => {
            return Err(CliError::NotFound {
                resource_type: "page".into(),
                identifier: path,
                list_command: "routes".into(),
            });
        }
    };

    let (controller, _target) = super::connect(global)?;
    let ctx = ViewContext {
        controller: &controller,
        global,
        lot,
        query,
    };
    heading(view.title(), global);
    let result = view.render(&ctx).await;
    if result.is_err() && !route.audience().includes(&controller.identity()) {
        output::print_hint(
            &format!("{} is meant for {} accounts", route.path(), route.audience()),
            global,
        );
    }
    result
}

fn heading(title: &str, global: &GlobalOpts) {
    if matches!(global.output, crate::cli::OutputFormat::Table) {
        output::print_hint(&format!("── {title} ──"), global);
    }
}

// ── Route listing ───────────────────────────────────────────────────

#[derive(Serialize)]
struct RouteInfo {
    path: &'static str,
    name: &'static str,
    audience: String,
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "Page")]
    name: &'static str,
    #[tabled(rename = "For")]
    audience: String,
}

impl From<&RouteInfo> for RouteRow {
    fn from(r: &RouteInfo) -> Self {
        Self {
            path: r.path,
            name: r.name,
            audience: r.audience.clone(),
        }
    }
}

/// Print every page `open` understands.
pub fn list_routes(global: &GlobalOpts) -> Result<(), CliError> {
    let routes: Vec<RouteInfo> = Router::<Box<dyn View>>::routes()
        .map(|route| RouteInfo {
            path: route.path(),
            name: route.name(),
            audience: route.audience().to_string(),
        })
        .collect();
    let out = output::render_list(
        &global.output,
        &routes,
        |r| RouteRow::from(r),
        |r| r.path.into(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Public pages ────────────────────────────────────────────────────

struct HomeView;

impl View for HomeView {
    fn title(&self) -> &'static str {
        "parkly"
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            let identity = ctx.controller.refresh_identity().await?;
            if identity.is_authenticated() {
                output::print_notice(
                    &format!("Welcome back, {}", identity.display_name()),
                    ctx.global,
                );
                output::print_hint(
                    &format!("Your dashboard: parkly open {}", Route::landing(&identity).path()),
                    ctx.global,
                );
            } else {
                output::print_hint("Find and book a parking spot.", ctx.global);
                output::print_hint("Log in: parkly login", ctx.global);
                output::print_hint(
                    "New here: parkly register --name <name> --email <email>",
                    ctx.global,
                );
            }
            Ok(())
        }
        .boxed_local()
    }
}

/// Login, admin login and register are forms; on the command line the
/// form is the matching subcommand.
struct FormView {
    route: Route,
}

impl FormView {
    fn usage(&self) -> &'static str {
        match self.route {
            Route::Register => "parkly register --name <name> --email <email>",
            _ => "parkly login --email <email>",
        }
    }
}

impl View for FormView {
    fn title(&self) -> &'static str {
        match self.route {
            Route::Register => "Register",
            Route::AdminLogin => "Admin login",
            _ => "Login",
        }
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            let identity = ctx.controller.refresh_identity().await?;
            if identity.is_authenticated() {
                output::print_hint(
                    &format!("Already logged in as {}", identity.display_name()),
                    ctx.global,
                );
            }
            output::print_hint(&self.usage(), ctx.global);
            Ok(())
        }
        .boxed_local()
    }
}

// ── Admin pages ─────────────────────────────────────────────────────

struct AdminDashboardView;

impl View for AdminDashboardView {
    fn title(&self) -> &'static str {
        "Admin dashboard"
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            ctx.controller.refetch(Resource::AdminLots).await?;
            let lots = ctx.controller.store().lots_snapshot();
            lots::print_lots(&lots, ctx.global)?;
            output::print_hint(
                &format!("{} lots. Manage them with: parkly lots --help", lots.len()),
                ctx.global,
            );
            Ok(())
        }
        .boxed_local()
    }
}

struct LotsView;

impl View for LotsView {
    fn title(&self) -> &'static str {
        "Lots"
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            ctx.controller.refetch(Resource::AdminLots).await?;
            lots::print_lots(&ctx.controller.store().lots_snapshot(), ctx.global)
        }
        .boxed_local()
    }
}

struct SpotsView;

impl View for SpotsView {
    fn title(&self) -> &'static str {
        "Spots"
    }

    /// Spots of `--lot`, or of the first lot when none is given.
    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            let lot_id = match ctx.lot.as_deref() {
                Some(raw) => util::parse_id(raw),
                None => {
                    ctx.controller.refetch(Resource::AdminLots).await?;
                    let lots = ctx.controller.store().lots_snapshot();
                    let first = lots.first().ok_or_else(|| CliError::NotFound {
                        resource_type: "lot".into(),
                        identifier: "(any)".into(),
                        list_command: "lots list".into(),
                    })?;
                    first.id.clone()
                }
            };
            let spots = ctx.controller.lot_spots(&lot_id).await?;
            output::print_hint(&format!("Lot {lot_id}"), ctx.global);
            lots::print_spots(&spots, ctx.global)
        }
        .boxed_local()
    }
}

struct UsersView;

impl View for UsersView {
    fn title(&self) -> &'static str {
        "Users"
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            let users = ctx.controller.list_users().await?;
            admin::print_users(&users, ctx.global)
        }
        .boxed_local()
    }
}

struct AdminSummaryView;

impl View for AdminSummaryView {
    fn title(&self) -> &'static str {
        "Occupancy"
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            let rows = ctx.controller.occupancy_summary().await?;
            admin::print_occupancy(&rows, ctx.global)
        }
        .boxed_local()
    }
}

// ── User pages ──────────────────────────────────────────────────────

struct UserDashboardView;

impl View for UserDashboardView {
    fn title(&self) -> &'static str {
        "Dashboard"
    }

    /// Lots with free spots, then the reservations still open.
    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            ctx.controller.refetch(Resource::UserLots).await?;
            ctx.controller.refetch(Resource::History).await?;

            lots::print_lots(&lots::filtered(ctx.controller, &LotFilter::Available), ctx.global)?;
            let active = ctx.controller.store().active_reservations();
            if active.is_empty() {
                output::print_hint(
                    "No active reservations. Book with: parkly book <lot>",
                    ctx.global,
                );
                Ok(())
            } else {
                reservations::print_history(&active, ctx.global)
            }
        }
        .boxed_local()
    }
}

struct UserSummaryView;

impl View for UserSummaryView {
    fn title(&self) -> &'static str {
        "Summary"
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            ctx.controller.refetch(Resource::History).await?;
            reservations::print_summary(&ctx.controller.history_summary(), ctx.global)
        }
        .boxed_local()
    }
}

// ── Signed-in pages ─────────────────────────────────────────────────

struct SearchView;

impl View for SearchView {
    fn title(&self) -> &'static str {
        "Search"
    }

    /// Matches `--query` against the lots this role sees; no query lists all.
    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            util::require_session(ctx.controller).await?;
            let query = ctx.query.as_deref().unwrap_or_default();
            lots::print_lots(&ctx.controller.search_lots(query), ctx.global)
        }
        .boxed_local()
    }
}

struct ProfileView;

impl View for ProfileView {
    fn title(&self) -> &'static str {
        "Profile"
    }

    fn render<'a>(&'a self, ctx: &'a ViewContext<'a>) -> LocalBoxFuture<'a, Result<(), CliError>> {
        async move {
            let identity = ctx.controller.refresh_identity().await?;
            if !identity.is_authenticated() {
                return Err(CliError::AuthFailed {
                    message: "Not logged in".into(),
                });
            }
            auth::print_identity(&identity, ctx.global)
        }
        .boxed_local()
    }
}
