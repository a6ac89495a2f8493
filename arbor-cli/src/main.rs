use std::fs::{self, File};
use std::io;
use std::path::Path;

use arbor::TreeStore;
use arbor_cli::config::CliConfig;
use arbor_cli::{CliError, outline, paths, session};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() {
    let config = load_config();
    init_logging(config.log_level);

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> CliConfig {
    let Some(path) = paths::config_file() else {
        return CliConfig::default();
    };
    CliConfig::load(&path).unwrap_or_else(|e| {
        eprintln!("Ignoring {}: {}", path.display(), e);
        CliConfig::default()
    })
}

fn init_logging(level: LevelFilter) {
    let (Some(dir), Some(path)) = (paths::cache_dir(), paths::log_file()) else {
        return;
    };
    if let Err(e) = fs::create_dir_all(&dir).and_then(|()| paths::rotate_logs(&dir)) {
        eprintln!("Log rotation failed in {}: {}", dir.display(), e);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Logging disabled, cannot create {}: {}", path.display(), e),
    }
}

fn run(config: CliConfig) -> Result<(), CliError> {
    let items = match std::env::args_os().nth(1) {
        Some(path) => outline::build(outline::load(Path::new(&path))?),
        None => outline::sample(),
    };
    log::info!("Loaded tree with {} nodes", items.len());

    let store = TreeStore::with_config(items, config.store());
    store.subscribe(|change| {
        log::info!("{:?} (changed: {})", change.kind, change.changed);
    });

    session::run(&store, io::stdin().lock(), io::stdout().lock())
}
