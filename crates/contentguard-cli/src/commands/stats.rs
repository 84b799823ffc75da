//! Statistics command

use contentguard_engine::extract_statistics;

pub fn run(path: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let buffer = super::load_image(path)?;
    let stats = extract_statistics(&buffer)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Image Statistics: {}", path);
    println!("  Size: {}x{}", buffer.width(), buffer.height());
    println!();
    for (name, value) in stats.fields() {
        println!("  {:<20} {:.4}", name, value);
    }

    Ok(())
}
