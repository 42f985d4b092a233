// ddc/src/commands/version.rs

pub fn execute() -> anyhow::Result<()> {
    println!("ddc version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
