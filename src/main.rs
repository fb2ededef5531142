use clap::{Parser, Subcommand};
use imgbed::{config, generate, output, scan, serve};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "imgbed")]
#[command(about = "Static gallery generator and dev server for self-hosted image beds")]
#[command(long_about = "\
Static gallery generator and dev server for self-hosted image beds

Your filesystem is the data source. Images in the content root and its
immediate folders become a browsable gallery page with a random-image API.

Project layout:

  project/
  ├── config.toml        # Optional settings (content root, port, colors)
  ├── index.html         # Generated gallery page
  ├── inventory.json     # Generated scan snapshot
  └── website/           # Content root (configurable)
      ├── a.png          # Root images appear above the folder tree
      └── Genshin/       # One folder = one collapsible group
          ├── b.jpg
          └── c.jpg

The dev server serves the project directory and answers
GET /random[?folder=NAME] with a 302 redirect to a random image.

Run 'imgbed gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project directory (contains config.toml and the content root)
    #[arg(long, default_value = ".", global = true)]
    dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content root and write inventory.json
    Scan,
    /// Scan and generate index.html + inventory.json
    Build,
    /// Build, then serve the gallery with the /random endpoint
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate the content root without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if matches!(cli.command, Command::GenConfig) {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.dir)?;
    let content_dir = cli.dir.join(&config.content_root);

    match cli.command {
        Command::Scan => {
            let inventory = scan::scan(&content_dir, &config.content_root)?;
            let json = serde_json::to_string_pretty(&inventory)?;
            std::fs::write(cli.dir.join(generate::INVENTORY_FILE), json)?;
            output::print_scan_output(&inventory);
        }
        Command::Build => {
            println!("==> Scanning {}", content_dir.display());
            let inventory = scan::scan(&content_dir, &config.content_root)?;
            output::print_scan_output(&inventory);

            println!("==> Generating {}", cli.dir.join(generate::INDEX_FILE).display());
            generate::generate(&inventory, &config, &cli.dir)?;
            output::print_build_output(&inventory);
        }
        Command::Serve { port } => {
            let inventory = scan::scan(&content_dir, &config.content_root)?;
            generate::generate(&inventory, &config, &cli.dir)?;
            output::print_scan_output(&inventory);

            let port = port.unwrap_or(config.server.port);
            let server = serve::Server::bind(&cli.dir, &config, inventory, port)?;
            let addr = server.local_addr()?;
            println!("==> Serving {} at http://{}/", cli.dir.display(), addr);
            println!("==> Random image API: http://{}/random", addr);
            server.run()?;
        }
        Command::Check => {
            println!("==> Checking {}", content_dir.display());
            let inventory = scan::scan(&content_dir, &config.content_root)?;
            output::print_scan_output(&inventory);
            println!("==> Content is valid");
        }
        Command::GenConfig => unreachable!("handled before config load"),
    }

    Ok(())
}
