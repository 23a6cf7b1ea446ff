//! MongoDB connection handling.

use crate::config::BootstrapConfig;
use crate::constants::APP_NAME;
use crate::{ProvisionError, ProvisionResult};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;

/// Create a MongoDB client from resolved configuration.
///
/// The connection is verified with a `ping` against the `admin` database
/// before the client is handed out, so provisioning never starts against a
/// server that is unreachable or refusing the credentials.
///
/// # Errors
///
/// Returns a `ProvisionError::ClientOptions` if the URI does not parse, a
/// `ProvisionError::ClientBuild` if the client cannot be constructed, or a
/// `ProvisionError::Ping` if the liveness check fails.
pub async fn connect(config: &BootstrapConfig) -> ProvisionResult<Client> {
    let mut options = ClientOptions::parse(config.uri())
        .await
        .map_err(ProvisionError::ClientOptions)?;

    options.app_name = Some(APP_NAME.to_string());
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());

    if let Some(credentials) = config.credentials() {
        options.credential = Some(
            Credential::builder()
                .username(credentials.username.clone())
                .password(credentials.password.clone())
                .build(),
        );
    }

    let client = Client::with_options(options).map_err(ProvisionError::ClientBuild)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(ProvisionError::Ping)?;

    tracing::info!("connected to MongoDB");

    Ok(client)
}
