use anyhow::Result;
use modelctl_core::config::KEYS;
use modelctl_core::Config;

pub async fn execute(key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut config = Config::load()?;

    match (key, value) {
        // Show all config
        (None, _) => {
            println!("Configuration file: {:?}\n", Config::config_path()?);
            for key in KEYS {
                let value = config.get(key)?;
                let shown = if value.is_empty() { "(not set)" } else { value.as_str() };
                println!("  {} = {}", key, shown);
            }
        }

        // Get a specific key
        (Some(key), None) => {
            println!("{}", config.get(key)?);
        }

        // Set a specific key
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            let shown = if key == "auth.token" { "***" } else { value };
            println!("Set {} = {}", key, shown);
        }
    }

    Ok(())
}
