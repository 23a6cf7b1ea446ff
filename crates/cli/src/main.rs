use clap::{Parser, Subcommand};
use fhir_init_core::{client, config, BootstrapConfig, ProvisionPlan, Provisioner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fhir-init")]
#[command(about = "Provision the MongoDB backing store for the FHIR records API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create both databases and their collections
    Provision,
    /// Check that every expected collection exists
    Verify,
    /// Print the provisioning plan without connecting
    Plan,
    /// Print the encounters JSON Schema without connecting
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fhir_init_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let plan = ProvisionPlan::standard();

    match cli.command {
        Commands::Provision => {
            let config = config_from_env()?;
            let client = client::connect(&config).await?;
            Provisioner::new(client).apply(&plan).await?;

            let collections: usize = plan
                .databases()
                .iter()
                .map(|database| database.collections().len())
                .sum();
            println!(
                "Provisioned {} collections across {} databases",
                collections,
                plan.databases().len()
            );
        }
        Commands::Verify => {
            let config = config_from_env()?;
            let client = client::connect(&config).await?;
            Provisioner::new(client).verify(&plan).await?;
            println!("All expected collections are present");
        }
        Commands::Plan => {
            print!("{plan}");
        }
        Commands::Schema => {
            let schema = fhir_init_core::encounter_json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

/// Resolve connection configuration from the environment.
///
/// `DB_URI` is required. `DB_USER`/`DB_PWD` must be set together or not at
/// all, and `DB_CONNECT_TIMEOUT_SECS` overrides the default deadline.
fn config_from_env() -> anyhow::Result<BootstrapConfig> {
    let uri = std::env::var("DB_URI")
        .map_err(|_| anyhow::anyhow!("DB_URI must be set to the MongoDB connection string"))?;

    let credentials = config::credentials_from_env_values(
        std::env::var("DB_USER").ok(),
        std::env::var("DB_PWD").ok(),
    )?;

    let connect_timeout =
        config::connect_timeout_from_env_value(std::env::var("DB_CONNECT_TIMEOUT_SECS").ok())?;

    Ok(BootstrapConfig::new(uri, credentials, connect_timeout)?)
}
