use anyhow::Result;
use chrono::Local;
use params::Params;

mod params;
mod render;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args().nth(1);
    let params = Params::load(path.as_deref())?;
    log::debug!("{:?}", params);

    let constants = params.select()?;
    log::info!(
        "{} of {} constants selected for {}",
        constants.len(),
        interface_constants::len(),
        std::env::consts::OS
    );

    print!("{}", render::render(&params, &constants, Local::now())?);
    Ok(())
}
