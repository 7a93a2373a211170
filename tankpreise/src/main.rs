use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tankpreise::collector::PriceCollector;
use tankpreise::config::Settings;
use tankpreise::domain::LocationSet;
use tankpreise::job::{Job, TankpreiseJob, run_polling};
use tankpreise::sink::{InfluxConfig, InfluxSink, LogSink, Sink};
use tankpreise::tankerkoenig::{FuelApi, TankerkoenigClient, TankerkoenigConfig};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn run<A: FuelApi, S: Sink>(collector: PriceCollector<A>, sink: S, settings: &Settings) {
    let mut job = TankpreiseJob::new(collector, sink);
    info!(job = job.name(), "Starting");
    run_polling(&mut job, settings.interval, shutdown_signal()).await;
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tankpreise=info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(2);
        }
    };

    let locations = LocationSet::parse(&settings.locations);
    if locations.is_empty() {
        warn!("No valid locations configured, no prices will be collected");
    }
    for location in &locations {
        info!(%location, "Location");
    }

    let mut client_config = TankerkoenigConfig::new(&settings.api_key);
    if let Some(url) = &settings.base_url {
        client_config = client_config.with_base_url(url);
    }
    let client = TankerkoenigClient::new(client_config).expect("Failed to create Tankerkoenig client");

    let collector = PriceCollector::new(client, locations, settings.database.clone());

    match &settings.influx {
        Some(influx) => {
            let mut config = InfluxConfig::new(&influx.url);
            if let Some(username) = &influx.username {
                config = config.with_credentials(username, influx.password.clone());
            }
            let (sink, writer) = InfluxSink::spawn(config).expect("Failed to create InfluxDB sink");
            info!(url = %influx.url, database = %settings.database, "Writing to InfluxDB");

            run(collector, sink, &settings).await;

            // The sink is dropped with the job; wait for queued batches to drain.
            if let Err(e) = writer.await {
                error!(error = %e, "InfluxDB writer task failed");
            }
        }
        None => {
            warn!("INFLUXDB_URL not set, entries are only logged");
            run(collector, LogSink, &settings).await;
        }
    }
}
