use anyhow::Result;
use kospec_core::{StyleRegistry, generate_stub};

pub fn stub_command(style_name: &str, test_name: &str, spec_name: Option<&str>) -> Result<()> {
    let registry = StyleRegistry::new();
    let style = registry
        .lookup(style_name)
        .ok_or_else(|| kospec_core::Error::UnknownStyle(style_name.to_string()))?;

    match spec_name {
        Some(spec_name) => print!("{}", style.generate_spec(spec_name, test_name)),
        None => println!("{}", generate_stub(style, test_name)),
    }
    Ok(())
}
