//! Navigation and screen loaders tests

use assert_json_diff::assert_json_include;
use garage::{Screen, Storage};
use serde_json::{json, to_value};
use warp::http::{Method, StatusCode};

use crate::service::LoaderData;
use crate::service::tests::{Backend, app, logged_in};

fn vehicle(plate: &str) -> serde_json::Value {
    json!({
        "Placa": plate,
        "Tipo": "Carro",
        "Marca": "Mazda",
        "Modelo": "2020",
        "Color": "Rojo",
        "TipoCombustible": "Gasolina",
        "NumeroMotor": "M1",
        "NumeroChasis": "C1",
        "KilometrajeActual": 12000,
    })
}

#[tokio::test]
async fn anonymous_user_lands_on_login() {
    let backend = Backend::start();
    let (_, app) = app(&backend.url()).await;

    let page = app.open("/dashboard/management/fuel").await.unwrap();

    assert_eq!(page.path, "/login");
    assert_eq!(page.requested.as_deref(), Some("/dashboard/management/fuel"));
    assert_eq!(page.route.screen, Screen::Login);
    assert_eq!(page.data, LoaderData::None);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn logged_in_user_lands_on_dashboard() {
    let backend = Backend::start();
    backend.respond(
        Method::GET,
        "/api/vehicle/7/vehicles",
        StatusCode::OK,
        json!([vehicle("ABC123")]),
    );
    let (_, app) = logged_in(&backend).await;

    let page = app.open("/login").await.unwrap();

    assert_eq!(page.path, "/dashboard");
    assert_eq!(page.route.screen, Screen::Dashboard);
    assert_json_include!(
        actual: to_value(&page.data).unwrap(),
        expected: json!({
            "kind": "vehicles",
            "items": [{ "Placa": "ABC123", "KilometrajeActual": 12000 }],
        })
    );

    let request = backend.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/api/vehicle/7/vehicles");
    let token = app.session().token().await.unwrap().unwrap();
    assert_eq!(request.authorization, Some(format!("Bearer {token}")));
}

#[tokio::test]
async fn vehicle_detail_loads_vehicle_and_refills() {
    let backend = Backend::start();
    backend
        .respond(
            Method::GET,
            "/api/vehicle/ABC123",
            StatusCode::OK,
            vehicle("ABC123"),
        )
        .respond(
            Method::GET,
            "/api/fuel_refills/vehicles/ABC123",
            StatusCode::OK,
            json!([{
                "IdRecargaCombustible": 1,
                "IdVehiculo": "ABC123",
                "Fecha": "2025-01-02",
                "EstacionServicio": "Terpel",
                "GalonesTanqueados": "10.5",
                "PrecioGalon": 15000,
                "CostoTotal": 157500,
                "Kilometraje": 12100,
                "TipoCombustible": "Gasolina",
            }]),
        );
    let (_, app) = logged_in(&backend).await;

    let page = app
        .open("/dashboard/management/vehicle/ABC123")
        .await
        .unwrap();

    assert_eq!(page.route.screen, Screen::VehicleDetail);
    assert_json_include!(
        actual: to_value(&page.data).unwrap(),
        expected: json!({
            "kind": "vehicle_detail",
            "vehicle": { "item": { "Placa": "ABC123" } },
            "refills": { "items": [{ "GalonesTanqueados": 10.5 }] },
        })
    );
}

#[tokio::test]
async fn backend_detail_becomes_listing_error() {
    let backend = Backend::start();
    backend.respond(
        Method::GET,
        "/api/documents/users/7/documents",
        StatusCode::NOT_FOUND,
        json!({ "detail": "No documents found" }),
    );
    let (_, app) = logged_in(&backend).await;

    let page = app.open("/dashboard/management/documents").await.unwrap();

    assert_eq!(
        to_value(&page.data).unwrap(),
        json!({ "kind": "documents", "items": [], "error": "No documents found" })
    );
}

#[tokio::test]
async fn maintenance_form_loads_catalog_when_adding() {
    let backend = Backend::start();
    backend.respond(
        Method::GET,
        "/api/service/maintenance_service",
        StatusCode::OK,
        json!([{
            "IdServicio": 3,
            "Nombre": "Cambio de aceite",
            "Descripcion": "",
            "CreadoPorUsuario": false,
        }]),
    );
    let (_, app) = logged_in(&backend).await;

    let page = app
        .open("/dashboard/management/vehicle/ABC123/preventive-maintenance/add")
        .await
        .unwrap();

    assert_eq!(page.route.screen, Screen::PreventiveMaintenanceForm);
    assert_json_include!(
        actual: to_value(&page.data).unwrap(),
        expected: json!({
            "kind": "maintenance_services",
            "items": [{ "IdServicio": 3 }],
        })
    );
}

#[tokio::test]
async fn logout_screen_ends_session() {
    let backend = Backend::start();
    let (storage, app) = logged_in(&backend).await;

    let page = app.open("/dashboard/logout").await.unwrap();

    assert_eq!(page.path, "/login");
    assert_eq!(page.route.screen, Screen::Login);
    assert!(!app.session().is_authenticated());
    for key in ["isAuthorized", "userData", "token"] {
        assert_eq!(storage.get(key).await.unwrap(), None, "{key}");
    }

    // Private paths are no longer reachable
    let page = app.open("/dashboard").await.unwrap();
    assert_eq!(page.path, "/login");
}

#[tokio::test]
async fn unknown_path() {
    let backend = Backend::start();
    let (_, app) = app(&backend.url()).await;

    let err = app.open("/nowhere").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<crate::service::Error>(),
        Some(crate::service::Error::NotFound { .. })
    ));
}
