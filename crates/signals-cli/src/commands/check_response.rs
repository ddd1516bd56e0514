use anyhow::{Context, Result};
use signals_sigmax::stuf_response_ok;
use std::path::Path;

pub fn execute(file: &Path) -> Result<()> {
    let body = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if !stuf_response_ok(&body) {
        anyhow::bail!("{} is not a Bv03 acknowledgement", file.display());
    }
    println!("Bv03 acknowledgement");
    Ok(())
}
