//! Factory pipeline listing.

use clap::Args;
use sordino_config::{factory_pipelines, get_factory_pipeline};

#[derive(Args)]
pub struct PipelinesArgs {
    /// Show the TOML of one pipeline
    #[arg(value_name = "NAME")]
    name: Option<String>,
}

pub fn run(args: PipelinesArgs) -> anyhow::Result<()> {
    if let Some(name) = args.name {
        let Some(config) = get_factory_pipeline(&name) else {
            anyhow::bail!("unknown factory pipeline '{name}'");
        };
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    println!("Factory Pipelines");
    println!("=================\n");
    for config in factory_pipelines() {
        println!(
            "  {:<10} {}",
            config.name,
            config.description.as_deref().unwrap_or("")
        );
        println!("  {:<10} stages: {}", "", config.stage_types().join(", "));
    }
    println!("\nUse: sordino denoise INPUT OUTPUT --pipeline <NAME|PATH>");

    Ok(())
}
