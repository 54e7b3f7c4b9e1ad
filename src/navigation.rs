use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AuthStatusProvider;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const EMPLOYEES_PATH: &str = "/employees";

/// Upper bound on chained redirects followed by [`navigate`]. The table has no cycles,
/// so a real chain is at most two hops (`/` -> `/login` -> `/employees`).
pub const MAX_REDIRECTS: usize = 8;

/// ProfileMode
///
/// Whether the employee profile view opens read-only or as an editable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMode {
    View,
    Edit,
}

/// Page
///
/// The logical page a route renders, together with the view props it is mounted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "component")]
pub enum Page {
    #[serde(rename = "LoginView")]
    Login,
    #[serde(rename = "SignupView")]
    Signup,
    #[serde(rename = "EmployeesView")]
    Employees,
    EmployeeProfile {
        mode: ProfileMode,
    },
    MobileEmployeeForm {
        #[serde(rename = "isEditMode")]
        is_edit_mode: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Page(Page),
    Redirect(&'static str),
}

/// RouteDef
///
/// One row of the static route table. `path` uses `:param` segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub requires_auth: bool,
}

impl RouteDef {
    /// The same pattern in axum's `{param}` syntax, for router registration.
    pub fn axum_path(&self) -> String {
        if self.path == ROOT_PATH {
            return ROOT_PATH.to_string();
        }
        self.path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => format!("{{{param}}}"),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn segments(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter(|segment| !segment.is_empty())
    }

    fn static_segments(&self) -> usize {
        self.segments().filter(|segment| !segment.starts_with(':')).count()
    }

    fn match_segments(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = self.segments().collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(param) => {
                    params.insert(param.to_string(), actual.to_string());
                }
                None if expected.eq_ignore_ascii_case(actual) => {}
                None => return None,
            }
        }
        Some(params)
    }
}

/// The application's route table.
pub static ROUTES: [RouteDef; 8] = [
    RouteDef {
        path: ROOT_PATH,
        name: None,
        target: RouteTarget::Redirect(LOGIN_PATH),
        requires_auth: false,
    },
    RouteDef {
        path: LOGIN_PATH,
        name: Some("login"),
        target: RouteTarget::Page(Page::Login),
        requires_auth: false,
    },
    RouteDef {
        path: SIGNUP_PATH,
        name: Some("signup"),
        target: RouteTarget::Page(Page::Signup),
        requires_auth: false,
    },
    RouteDef {
        path: EMPLOYEES_PATH,
        name: Some("employees"),
        target: RouteTarget::Page(Page::Employees),
        requires_auth: true,
    },
    RouteDef {
        path: "/employees/:id",
        name: Some("employee-profile"),
        target: RouteTarget::Page(Page::EmployeeProfile {
            mode: ProfileMode::View,
        }),
        requires_auth: true,
    },
    RouteDef {
        path: "/employees/:id/edit",
        name: Some("employee-edit"),
        target: RouteTarget::Page(Page::EmployeeProfile {
            mode: ProfileMode::Edit,
        }),
        requires_auth: true,
    },
    RouteDef {
        path: "/employees/create",
        name: Some("employee-create-mobile"),
        target: RouteTarget::Page(Page::MobileEmployeeForm {
            is_edit_mode: false,
        }),
        requires_auth: true,
    },
    RouteDef {
        path: "/employees/:id/edit-mobile",
        name: Some("employee-edit-mobile"),
        target: RouteTarget::Page(Page::MobileEmployeeForm { is_edit_mode: true }),
        requires_auth: true,
    },
];

/// ResolvedRoute
///
/// A concrete path matched against [`ROUTES`], with its captured path params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub route: &'static RouteDef,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

/// PageView
///
/// What a page route answers with: which view the SPA mounts and with which params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub name: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub page: Page,
}

impl ResolvedRoute {
    /// `None` for redirect-only routes.
    pub fn page_view(&self) -> Option<PageView> {
        match self.route.target {
            RouteTarget::Page(page) => Some(self.view_of(page)),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// The view for this route rendering `page`.
    pub fn view_of(&self, page: Page) -> PageView {
        PageView {
            name: self.route.name.unwrap_or_default().to_string(),
            path: self.path.clone(),
            params: self.params.clone(),
            page,
        }
    }
}

/// The path part of a location, without query or fragment.
pub fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Strips query/fragment and any trailing slash, keeping `/` itself.
pub fn normalize_path(path: &str) -> &str {
    let path = strip_query(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}

/// resolve
///
/// Matches `path` against the table. Static segments compare ASCII case-insensitively
/// and `:param` segments match any single non-empty segment. When several routes match, the one with the most static segments wins, so
/// `/employees/create` is never read as a profile with id `create`.
pub fn resolve(path: &str) -> Option<ResolvedRoute> {
    let path = normalize_path(path);
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

    ROUTES
        .iter()
        .filter_map(|route| {
            route
                .match_segments(&segments)
                .map(|params| (route, params))
        })
        .max_by_key(|(route, _)| route.static_segments())
        .map(|(route, params)| ResolvedRoute {
            route,
            path: path.to_string(),
            params,
        })
}

/// NavigationOutcome
///
/// The guard's decision for a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Proceed,
    RedirectTo(&'static str),
}

/// guard
///
/// The pre-navigation check. Reads the marker once, then:
/// protected destination without a marker goes to `/login`; `/login` or `/signup` with a
/// marker goes to `/employees`; anything else proceeds. Unknown paths are unprotected.
/// The `/login` and `/signup` check compares the path literally, so `/login/` or `/Login`
/// is not caught by it.
pub fn guard(destination: &str, auth: &dyn AuthStatusProvider) -> NavigationOutcome {
    let authenticated = auth.is_authenticated();
    let path = strip_query(destination);
    let requires_auth = resolve(path).is_some_and(|resolved| resolved.route.requires_auth);

    let outcome = if requires_auth && !authenticated {
        NavigationOutcome::RedirectTo(LOGIN_PATH)
    } else if (path == LOGIN_PATH || path == SIGNUP_PATH) && authenticated {
        NavigationOutcome::RedirectTo(EMPLOYEES_PATH)
    } else {
        NavigationOutcome::Proceed
    };

    if let NavigationOutcome::RedirectTo(target) = outcome {
        tracing::debug!(from = %path, to = %target, authenticated, "navigation redirected");
    }
    outcome
}

/// Navigation
///
/// Where a navigation request finally lands after every redirect has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Navigation {
    pub requested: String,
    pub destination: String,
    /// Each intermediate redirect target, in order.
    pub redirects: Vec<String>,
}

/// navigate
///
/// Applies the table's static redirects and the guard repeatedly until a destination
/// proceeds, the way the router chains a record redirect into its pre-navigation hook.
pub fn navigate(path: &str, auth: &dyn AuthStatusProvider) -> Navigation {
    let requested = strip_query(path).to_string();
    let mut current = requested.clone();
    let mut redirects = Vec::new();

    while redirects.len() < MAX_REDIRECTS {
        let next = match static_redirect(&current) {
            Some(target) => Some(target),
            None => match guard(&current, auth) {
                NavigationOutcome::Proceed => None,
                NavigationOutcome::RedirectTo(target) => Some(target),
            },
        };

        match next {
            Some(target) => {
                redirects.push(target.to_string());
                current = target.to_string();
            }
            None => break,
        }
    }

    Navigation {
        requested,
        destination: current,
        redirects,
    }
}

/// The table-level redirect for `path`, if its route is redirect-only.
pub fn static_redirect(path: &str) -> Option<&'static str> {
    match resolve(path)?.route.target {
        RouteTarget::Redirect(target) => Some(target),
        RouteTarget::Page(_) => None,
    }
}
