mod app;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tidyclean::persist::Persistence;
use tidyclean::schedule::SystemClock;
use tidyclean::{disk_info, Store};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tidyclean",
    about = "A macOS cleanup assistant. Shows what could be cleaned; never deletes files.",
    version
)]
struct Args {
    /// Where theme, language, history, stats and schedules are kept
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Keep all state in memory for this run
    #[arg(long)]
    no_persist: bool,

    /// Show the simulated storage breakdown instead of the root volume
    #[arg(long)]
    simulated_disk: bool,

    /// Seed for the simulated item list
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match dirs::cache_dir() {
        Some(cache_dir) => {
            let logfile = tracing_appender::rolling::daily(cache_dir.join("tidyclean/logs"), "log");
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_writer(logfile)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn open_store(args: &Args) -> Store {
    if args.no_persist {
        debug!("persistence disabled");
        return Store::new(SystemClock);
    }

    let path = match &args.state_file {
        Some(path) => path.clone(),
        None => match Persistence::default_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("running without saved state: {e}");
                return Store::new(SystemClock);
            }
        },
    };
    Store::open(SystemClock, Persistence::new(path))
}

fn main() -> eframe::Result<()> {
    init_logging();
    let args = Args::parse();
    debug!("starting application");

    let mut store = open_store(&args);
    store.set_storage(disk_info::storage_breakdown(args.simulated_disk));

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    store.restock_items(&mut rng);
    info!("generated {} simulated items", store.items().len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TidyClean")
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "TidyClean",
        options,
        Box::new(|cc| Ok(Box::new(app::TidyCleanApp::new(cc, store, rng)))),
    );
    match &result {
        Ok(()) => debug!("closing application"),
        Err(err) => error!("closing application with error: {err:?}"),
    }
    result
}
