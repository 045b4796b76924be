use agri_dashboard::app::App;
use agri_dashboard::cli::CliArgs;
use agri_dashboard::config::init_app_config;
use agri_dashboard::export::write_export;
use agri_dashboard::store::RegionStore;
use agri_dashboard::{event, logging, terminal};
use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    let mut config = init_app_config().wrap_err("Invalid dashboard configuration")?;
    args.apply_overrides(&mut config);

    logging::init(config.debug).map_err(|e| eyre!("Failed to initialize logging: {e}"))?;
    log::debug!("resolved configuration: {config:?}");

    let store = RegionStore::seed();
    config
        .validate_against(&store)
        .wrap_err("Invalid initial selection")?;

    let mut app = App::new(store, &config);

    if args.wants_export() {
        let path = write_export(&app.store, &config.export_path).await?;
        println!("Exported dashboard to {}", path.display());
        return Ok(());
    }

    // Run headless when asked to, or when stdout isn't a terminal
    if args.headless || args.json || !is_terminal() {
        return event::run_headless(&app, args.json);
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, config.tick_rate).await;
    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
