//! Data fetched before a screen renders

use color_eyre::Result;
use garage::{Route, Screen, UserClaims};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::api::{self, ApiClient};
use crate::model::documents::Document;
use crate::model::fuel::FuelRefill;
use crate::model::links::InterestLink;
use crate::model::maintenance::{MaintenanceService, PreventiveMaintenance};
use crate::model::services::PerformedService;
use crate::model::users::UserProfile;
use crate::model::vehicles::Vehicle;

const LOAD_FAILED: &str = "Error loading data";

/// Items listed on a screen
///
/// A failure explained by the backend leaves the list empty and carries the explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
        }
    }
}

impl<T> Listing<T> {
    fn from_result(result: Result<Vec<T>>) -> Result<Self> {
        match result {
            Ok(items) => Ok(Self { items, error: None }),
            Err(err) => Ok(Self {
                items: Vec::new(),
                error: Some(failure(err)?),
            }),
        }
    }
}

/// Single record shown on a screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<T> {
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Record<T> {
    fn from_result(result: Result<T>) -> Result<Self> {
        match result {
            Ok(item) => Ok(Self {
                item: Some(item),
                error: None,
            }),
            Err(err) => Ok(Self {
                item: None,
                error: Some(failure(err)?),
            }),
        }
    }
}

/// Recovers backend explained failures into a message, propagating anything else
fn failure(err: color_eyre::Report) -> Result<String> {
    match api::Error::backend_detail(&err) {
        Some(detail) => {
            let message = detail.unwrap_or(LOAD_FAILED).to_owned();
            warn!(message, "Backend refused to provide data");
            Ok(message)
        }
        None => Err(err),
    }
}

/// Data prepared for a screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoaderData {
    /// Screen needs no data
    None,
    Vehicles(Listing<Vehicle>),
    Vehicle(Record<Vehicle>),
    VehicleDetail {
        vehicle: Record<Vehicle>,
        refills: Listing<FuelRefill>,
    },
    Maintenance(Listing<PreventiveMaintenance>),
    MaintenanceServices(Listing<MaintenanceService>),
    PerformedServices(Listing<PerformedService>),
    ServiceForm {
        vehicles: Listing<Vehicle>,
        /// Service being edited
        #[serde(skip_serializing_if = "Option::is_none")]
        service: Option<Record<PerformedService>>,
    },
    Fuel {
        refills: Listing<FuelRefill>,
        vehicles: Listing<Vehicle>,
    },
    Documents(Listing<Document>),
    Links(Listing<InterestLink>),
    Profile(Record<UserProfile>),
}

/// Loads data for a resolved route
///
/// Data owned by the user is fetched by the id from the session claims. Without a user such data
/// is empty.
#[instrument(skip_all, fields(screen = ?route.screen))]
pub async fn load(api: &ApiClient, route: &Route, user: Option<&UserClaims>) -> Result<LoaderData> {
    let user_id = user.map(|user| user.id);
    let vehicle_id = route.param("id");

    let data = match route.screen {
        Screen::Dashboard => LoaderData::Vehicles(user_vehicles(api, user_id).await?),
        Screen::VehicleServiceForm => {
            let service = match route.param("idService").and_then(|id| id.parse().ok()) {
                Some(id) => Some(Record::from_result(api.performed_service(id).await)?),
                None => None,
            };
            LoaderData::ServiceForm {
                vehicles: user_vehicles(api, user_id).await?,
                service,
            }
        }
        Screen::VehicleForm => match vehicle_id {
            Some(id) => LoaderData::Vehicle(Record::from_result(api.vehicle(id).await)?),
            None => LoaderData::None,
        },
        Screen::VehicleDetail => match vehicle_id {
            Some(id) => LoaderData::VehicleDetail {
                vehicle: Record::from_result(api.vehicle(id).await)?,
                refills: Listing::from_result(api.vehicle_refills(id).await)?,
            },
            None => LoaderData::None,
        },
        Screen::PreventiveMaintenance => match vehicle_id {
            Some(id) => {
                LoaderData::Maintenance(Listing::from_result(api.vehicle_maintenance(id).await)?)
            }
            None => LoaderData::Maintenance(Listing::default()),
        },
        Screen::PreventiveMaintenanceForm => match (route.param("maintenanceId"), vehicle_id) {
            (Some(_), Some(id)) => {
                LoaderData::Maintenance(Listing::from_result(api.vehicle_maintenance(id).await)?)
            }
            _ => LoaderData::MaintenanceServices(Listing::from_result(
                api.maintenance_services().await,
            )?),
        },
        Screen::ServiceHistory => LoaderData::PerformedServices(match user_id {
            Some(id) => Listing::from_result(api.performed_services(id).await)?,
            None => Listing::default(),
        }),
        Screen::FuelHistory => LoaderData::Fuel {
            refills: match user_id {
                Some(id) => Listing::from_result(api.user_refills(id).await)?,
                None => Listing::default(),
            },
            vehicles: user_vehicles(api, user_id).await?,
        },
        Screen::Documents => LoaderData::Documents(match user_id {
            Some(id) => Listing::from_result(api.documents(id).await)?,
            None => Listing::default(),
        }),
        Screen::InterestLinks => LoaderData::Links(Listing::from_result(api.links().await)?),
        Screen::Profile => match user_id {
            Some(_) => LoaderData::Profile(Record::from_result(api.me().await)?),
            None => LoaderData::None,
        },
        Screen::Login
        | Screen::SignUp
        | Screen::ForgotPassword
        | Screen::RecoverPassword
        | Screen::Logout => LoaderData::None,
    };

    Ok(data)
}

async fn user_vehicles(api: &ApiClient, user_id: Option<i64>) -> Result<Listing<Vehicle>> {
    match user_id {
        Some(id) => Listing::from_result(api.vehicles(id).await),
        None => Ok(Listing::default()),
    }
}
