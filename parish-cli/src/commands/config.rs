use anyhow::Result;
use owo_colors::OwoColorize;
use parish_core::config::ParishConfig;

pub fn run() -> Result<()> {
    let path = ParishConfig::config_path()?;
    let config = ParishConfig::load()?;
    let zone = config.zone()?;

    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    println!("  data_file       {}", config.data_path().display());
    println!("  upcoming_limit  {}", config.upcoming_limit);
    println!("  page_size       {}", config.page_size);
    println!(
        "  timezone        {}{}",
        zone.name(),
        if config.timezone.is_none() {
            " (system)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    println!("  leap_day        {:?}", config.leap_day);

    Ok(())
}
