//! Init command handler

use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Wrote default config.toml");
        println!("Set provider keys there or via GEOCODE_API_KEY, WEATHER_API_KEY, ...");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}
