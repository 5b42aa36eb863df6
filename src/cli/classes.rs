use crate::plugin::Registry;
use anyhow::Result;

/// Handle classes command - list scorer classes a config may reference
pub fn handle(registry: &Registry) -> Result<()> {
    let classes = registry.classes();

    println!("Registered scorer classes:");
    if classes.is_empty() {
        println!("  (none)");
    }
    for class in &classes {
        println!("  module: {:<28} class: {}", class.module, class.class);
    }

    Ok(())
}
