//! Config validation command

use anyhow::{Context, Result};
use stardust_particles::FieldConfig;

pub fn run(file: &str) -> Result<()> {
    let config = FieldConfig::load(file).with_context(|| format!("Invalid config: {file}"))?;

    println!("{file}: ok");
    println!("  seed:      {:#x}", config.seed);
    println!("  stars:     {}", config.starfield.count);
    println!(
        "  glow:      {} layer(s), {} particles",
        config.glow.layers.len(),
        config.glow.layers.iter().map(|l| l.count).sum::<usize>()
    );
    println!("  magnetic:  {}", config.magnetic.count);

    let l = &config.layers;
    let disabled: Vec<&str> = [
        ("glow", l.glow),
        ("magnetic", l.magnetic),
        ("trail", l.trail),
        ("bursts", l.bursts),
        ("drag_particles", l.drag_particles),
    ]
    .into_iter()
    .filter(|(_, on)| !on)
    .map(|(name, _)| name)
    .collect();
    if !disabled.is_empty() {
        println!("  disabled:  {}", disabled.join(", "));
    }
    Ok(())
}
