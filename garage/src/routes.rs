//! Route table
//!
//! Every navigable path maps to a screen in one of two areas. The private area lives under the
//! `/dashboard` prefix and the public area is everything else, so the areas never overlap.

use std::collections::BTreeMap;

use serde::Serialize;

/// Login screen
pub const LOGIN: &str = "/login";

/// Private landing screen
pub const PRIVATE: &str = "/dashboard";

/// Screen terminating the session
pub const LOGOUT: &str = "/dashboard/logout";

/// Part of the route tree behind a single guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    /// Reachable only without a session
    Public,
    /// Reachable only with a session
    Private,
}

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    SignUp,
    ForgotPassword,
    RecoverPassword,
    Dashboard,
    VehicleForm,
    VehicleDetail,
    PreventiveMaintenance,
    PreventiveMaintenanceForm,
    ServiceHistory,
    VehicleServiceForm,
    FuelHistory,
    Documents,
    InterestLinks,
    Profile,
    Logout,
}

struct RouteDef {
    pattern: &'static str,
    screen: Screen,
    area: Area,
}

const fn public(pattern: &'static str, screen: Screen) -> RouteDef {
    RouteDef {
        pattern,
        screen,
        area: Area::Public,
    }
}

const fn private(pattern: &'static str, screen: Screen) -> RouteDef {
    RouteDef {
        pattern,
        screen,
        area: Area::Private,
    }
}

/// Routes in matching order, first match wins
const ROUTES: &[RouteDef] = &[
    public("/", Screen::Login),
    public(LOGIN, Screen::Login),
    public("/sign-up", Screen::SignUp),
    public("/forgot-password", Screen::ForgotPassword),
    public("/recover-password", Screen::RecoverPassword),
    private(PRIVATE, Screen::Dashboard),
    private("/dashboard/management/add-vehicle", Screen::VehicleForm),
    private("/dashboard/management/edit-vehicle/:id", Screen::VehicleForm),
    private("/dashboard/management/vehicle/:id", Screen::VehicleDetail),
    private(
        "/dashboard/management/vehicle/:id/preventive-maintenance",
        Screen::PreventiveMaintenance,
    ),
    private(
        "/dashboard/management/vehicle/:id/preventive-maintenance/add",
        Screen::PreventiveMaintenanceForm,
    ),
    private(
        "/dashboard/management/vehicle/:id/preventive-maintenance/edit/:maintenanceId",
        Screen::PreventiveMaintenanceForm,
    ),
    private("/dashboard/management/services", Screen::ServiceHistory),
    private(
        "/dashboard/management/services/add",
        Screen::VehicleServiceForm,
    ),
    private(
        "/dashboard/management/services/edit/:idService",
        Screen::VehicleServiceForm,
    ),
    private("/dashboard/management/fuel", Screen::FuelHistory),
    private("/dashboard/management/documents", Screen::Documents),
    private("/dashboard/management/useful-links", Screen::InterestLinks),
    private("/dashboard/management/profile", Screen::Profile),
    private(LOGOUT, Screen::Logout),
];

/// Path resolved against the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub screen: Screen,
    pub area: Area,
    /// Matched pattern
    pub pattern: &'static str,
    /// Values of `:name` path segments
    pub params: BTreeMap<String, String>,
    /// Decoded query string
    pub query: BTreeMap<String, String>,
}

impl Route {
    /// Matches `path` against the route table
    ///
    /// Trailing slashes are ignored. A query string, if any, is decoded into `query`.
    pub fn resolve(path: &str) -> Option<Self> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let (def, params) = ROUTES
            .iter()
            .find_map(|def| Some((def, match_pattern(def.pattern, &segments)?)))?;

        Some(Self {
            screen: def.screen,
            area: def.area,
            pattern: def.pattern,
            params,
            query: query.map(parse_query).unwrap_or_default(),
        })
    }

    /// Path parameter value
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Query parameter value
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let pattern: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if pattern.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected.strip_prefix(':') {
            Some(name) => {
                let value = urlencoding::decode(actual).ok()?;
                params.insert(name.to_owned(), value.into_owned());
            }
            None if expected == actual => {}
            None => return None,
        }
    }

    Some(params)
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = key.replace('+', " ");
            let value = value.replace('+', " ");
            let key = urlencoding::decode(&key).ok()?.into_owned();
            let value = urlencoding::decode(&value).ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes() {
        let route = Route::resolve("/").unwrap();
        assert_eq!(route.screen, Screen::Login);
        assert_eq!(route.area, Area::Public);

        let route = Route::resolve("/dashboard/").unwrap();
        assert_eq!(route.screen, Screen::Dashboard);
        assert_eq!(route.area, Area::Private);

        let route = Route::resolve(LOGOUT).unwrap();
        assert_eq!(route.screen, Screen::Logout);

        assert_eq!(Route::resolve("/dashboard/unknown"), None);
        assert_eq!(Route::resolve("/nowhere"), None);
    }

    #[test]
    fn path_params() {
        let route = Route::resolve(
            "/dashboard/management/vehicle/ABC123/preventive-maintenance/edit/42",
        )
        .unwrap();
        assert_eq!(route.screen, Screen::PreventiveMaintenanceForm);
        assert_eq!(route.param("id"), Some("ABC123"));
        assert_eq!(route.param("maintenanceId"), Some("42"));

        // Static segment wins over parameter when listed first
        let route =
            Route::resolve("/dashboard/management/vehicle/7/preventive-maintenance/add").unwrap();
        assert_eq!(route.screen, Screen::PreventiveMaintenanceForm);
        assert_eq!(route.param("maintenanceId"), None);

        let route = Route::resolve("/dashboard/management/services/edit/9").unwrap();
        assert_eq!(route.screen, Screen::VehicleServiceForm);
        assert_eq!(route.param("idService"), Some("9"));

        let route = Route::resolve("/dashboard/management/vehicle/AB%20C1").unwrap();
        assert_eq!(route.param("id"), Some("AB C1"));
    }

    #[test]
    fn query_string() {
        let route = Route::resolve("/recover-password?token=abc%3D%3D&x").unwrap();
        assert_eq!(route.screen, Screen::RecoverPassword);
        assert_eq!(route.query_param("token"), Some("abc=="));
        assert_eq!(route.query_param("x"), Some(""));
        assert_eq!(route.query_param("y"), None);

        let route = Route::resolve("/recover-password?token=a+b%2Bc&empty=").unwrap();
        assert_eq!(route.query_param("token"), Some("a b+c"));
        assert_eq!(route.query_param("empty"), Some(""));
    }

    #[test]
    fn areas_partition_by_prefix() {
        for def in ROUTES {
            let private = def.pattern == PRIVATE || def.pattern.starts_with("/dashboard/");
            let expected = if private { Area::Private } else { Area::Public };
            assert_eq!(def.area, expected, "{}", def.pattern);
        }
    }
}
