use clap::{Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pulse")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Serve,
    Openapi,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve => {
            init_tracing();
            pulse_serve::openapi::ensure_initialized();
            let db_path = std::env::var("PULSE_DB_PATH")
                .unwrap_or_else(|_| ".pulse/events.db".to_string());
            if let Some(parent) = Path::new(&db_path).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let port = std::env::var("PULSE_PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(8080);
            let timeout_secs = std::env::var("PULSE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(15);
            // Run the migration once up front so a broken database path fails
            // the process instead of every request.
            if let Err(err) = pulse_db::schema::open_and_migrate(&db_path) {
                eprintln!("migration error: {err}");
                std::process::exit(1);
            }
            let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
            let state = pulse_serve::AppState {
                db_path,
                request_timeout: Duration::from_secs(timeout_secs),
            };
            tracing::info!(%addr, "listening");
            if let Err(err) = pulse_serve::serve(state, addr).await {
                eprintln!("serve error: {err}");
            }
        }
        Command::Openapi => {
            let spec = pulse_serve::openapi::generate_spec();
            println!("{}", spec);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
