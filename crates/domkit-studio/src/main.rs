mod demo;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use domkit_ui::config::DomConfig;
use domkit_ui::headless;
use domkit_ui::logging::{init_logging, LoggingConfig};
use domkit_ui::DomExtension;

/// Load a UI definition into the headless toolkit and print the widget tree.
#[derive(Parser)]
#[command(name = "domkit-studio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// UI definition to load (.xml or .json)
    #[arg(required_unless_present = "types")]
    file: Option<PathBuf>,

    /// List the widget types the headless toolkit provides and exit
    #[arg(long)]
    types: bool,

    /// JSON file overriding loader/builder conventions
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "domkit_ui=debug"
    #[arg(long)]
    log: Option<String>,

    /// Click a named element after loading (repeatable)
    #[arg(long, value_name = "ELEMENT")]
    fire: Vec<String>,

    /// Set a named element's model value after loading, e.g. `progress=0.5`
    #[arg(long, value_name = "ELEMENT=VALUE")]
    set: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if !init_logging(LoggingConfig { env_filter: cli.log.clone(), ..Default::default() }) {
        log::debug!("keeping the existing logger");
    }

    if cli.types {
        for info in headless::CATALOG {
            println!("{:<18} {:?}  {}", info.name, info.kind, info.doc);
        }
        return Ok(());
    }
    let Some(file) = &cli.file else {
        bail!("no UI definition given");
    };

    let config = match &cli.config {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<DomConfig>(&src)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DomConfig::default(),
    };

    let events = demo::EventQueue::default();
    let mut ext = demo::register_handlers(
        DomExtension::new(headless::registry()).with_config(config),
        &events,
    );

    ext.load_ui(file)
        .with_context(|| format!("loading {}", file.display()))?;

    print_state(&ext);

    for assignment in &cli.set {
        demo::set_model(&ext, assignment)?;
    }
    for name in &cli.fire {
        let widget = ext.elements().get(name)?;
        let ran = headless::click(&widget)?;
        log::info!("clicked '{name}' ({ran} handlers)");
    }

    if !cli.fire.is_empty() || !cli.set.is_empty() {
        demo::react(&ext, &events);
        println!();
        print_state(&ext);
    }

    Ok(())
}

fn print_state(ext: &DomExtension) {
    if let Some(root) = ext.root() {
        print!("{}", headless::outline(root));
    }
    println!("elements: {}", ext.elements().names().join(", "));
}
