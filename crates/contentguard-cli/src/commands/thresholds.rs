//! Thresholds command

use contentguard_core::EngineConfig;

pub fn run(config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
