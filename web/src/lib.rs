use anyhow::Context as _;
use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod art;
mod game;
mod menu;
mod upload;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    launch: app::LaunchProps,
}

fn start() -> anyhow::Result<()> {
    use gloo::utils::{document, window};

    let location_hash = window().location().hash().unwrap_or_default();
    let (args, parse_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from([""]), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level)
            .map_err(|err| anyhow::anyhow!("Error initializing logger: {}", err))?;
    }
    if let Some(err) = parse_error {
        log::error!("Ignoring launch options: {}", err);
    }
    log::debug!("launch options: {:?}", args.launch);

    let root = document()
        .get_element_by_id("game")
        .context("Could not find id=\"game\" element")?;

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, args.launch).render();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    if let Err(err) = start() {
        // the logger might be what failed
        gloo::console::error!(format!("Could not start: {:#}", err));
    }
}
