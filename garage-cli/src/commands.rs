//! Command line actions

use std::io::read_to_string;

use color_eyre::Result;
use color_eyre::eyre::{OptionExt, bail, eyre};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::api::ApiClient;
use crate::model::auth::{Credentials, Registration};
use crate::opt::{Command, Resource};
use crate::service::{App, LoginForm, account};

/// Prints a value as pretty JSON on the standard output
fn print(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(mut input: clio::Input) -> Result<T> {
    let body = read_to_string(&mut input)?;
    Ok(serde_json::from_str(&body)?)
}

fn numeric(id: &str) -> Result<i64> {
    id.parse()
        .map_err(|_| eyre!("Expected a numeric id, got {id}"))
}

pub async fn execute(app: &App, command: Command) -> Result<()> {
    let api = app.api();
    let session = app.session();

    match command {
        Command::Login { username, password } => {
            let mut form = LoginForm::new();
            let credentials = Credentials::new(username, password);
            match form.submit(api, session, &credentials).await {
                Some(path) => print(&app.open(path).await?),
                None => bail!("Login failed: {}", form.errors().join(", ")),
            }
        }
        Command::Logout => {
            session.logout().await?;
            info!("Session terminated");
            Ok(())
        }
        Command::Status => print(&session.current()),
        Command::Register {
            name,
            document,
            email,
            password,
            confirmation,
            phone,
        } => {
            let registration =
                Registration::new(name, document, email, password, phone, chrono::Utc::now());
            print(&account::register(api, &registration, &confirmation).await)
        }
        Command::RecoverPassword { email } => {
            print(&account::recover_password(api, &email).await)
        }
        Command::ResetPassword {
            link,
            password,
            confirmation,
        } => {
            let token = account::recovery_token(&link);
            print(&account::reset_password(api, token.as_deref(), &password, &confirmation).await)
        }
        Command::Open { path } => print(&app.open(&path).await?),
        Command::Add { resource, file } => {
            require_user(app)?;
            print(&add(api, resource, file).await?)
        }
        Command::Update { resource, id, file } => {
            require_user(app)?;
            print(&update(api, resource, &id, file).await?)
        }
        Command::Delete { resource, id } => {
            require_user(app)?;
            print(&delete(api, resource, &id).await?)
        }
    }
}

async fn add(api: &ApiClient, resource: Resource, file: clio::Input) -> Result<serde_json::Value> {
    let created = match resource {
        Resource::Vehicle => {
            serde_json::to_value(api.create_vehicle(&read_json(file)?).await?)?
        }
        Resource::Refill => api.create_refill(&read_json(file)?).await?,
        Resource::Maintenance => api.create_maintenance(&read_json(file)?).await?,
        Resource::Service => api.create_performed_service(&read_json(file)?).await?,
        Resource::Document => api.create_document(&read_json(file)?).await?,
        Resource::Profile => bail!("Profiles are created by registering"),
    };
    Ok(created)
}

async fn update(
    api: &ApiClient,
    resource: Resource,
    id: &str,
    file: clio::Input,
) -> Result<serde_json::Value> {
    let updated = match resource {
        Resource::Vehicle => {
            serde_json::to_value(api.update_vehicle(id, &read_json(file)?).await?)?
        }
        Resource::Refill => api.update_refill(numeric(id)?, &read_json(file)?).await?,
        Resource::Service => {
            api.update_performed_service(numeric(id)?, &read_json(file)?)
                .await?
        }
        Resource::Profile => api.update_profile(&read_json(file)?).await?,
        Resource::Maintenance | Resource::Document => {
            bail!("{resource:?} cannot be updated, delete and add it again")
        }
    };
    Ok(updated)
}

async fn delete(api: &ApiClient, resource: Resource, id: &str) -> Result<serde_json::Value> {
    let deleted = match resource {
        Resource::Vehicle => bail!("Vehicles cannot be deleted"),
        Resource::Refill => api.delete_refill(numeric(id)?).await?,
        Resource::Maintenance => api.delete_maintenance(numeric(id)?).await?,
        Resource::Service => api.delete_performed_service(numeric(id)?).await?,
        Resource::Document => api.delete_document(numeric(id)?).await?,
        Resource::Profile => {
            let deleted = api.delete_account().await?;
            api.session().logout().await?;
            deleted
        }
    };
    Ok(deleted)
}

/// Fails when the session has no user, for commands acting on the user's data
fn require_user(app: &App) -> Result<garage::UserClaims> {
    app.session().user().ok_or_eyre("Not logged in")
}
