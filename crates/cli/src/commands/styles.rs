use anyhow::Result;
use kospec_core::StyleRegistry;

pub fn styles_command() -> Result<()> {
    let registry = StyleRegistry::new();
    println!("📚 Supported spec styles:");
    for style in registry.iter() {
        println!("   • {:<12} {}", style.style_name(), style.fq_name());
        println!("     {}", style.generate_test("example"));
    }
    Ok(())
}
