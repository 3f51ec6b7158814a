use std::path::PathBuf;

use clap::{Parser, Subcommand};
use langlines_cli::{
    delete::run_delete_command, export::run_export_command, import::run_import_command,
    list::run_list_command, upload::run_upload_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The language-line store file (created on first write)
    #[arg(short, long, default_value = "lines.json")]
    store: PathBuf,

    /// Panel configuration (TOML); without it every gated action is off
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import language lines from a lang-file tree.
    Import {
        /// Root of the lang-file tree
        #[arg(long, default_value = "lang")]
        source: PathBuf,

        /// Replace conflicting values instead of only filling gaps
        #[arg(long)]
        overwrite: bool,

        /// Delete all existing lines first (irreversible)
        #[arg(long)]
        truncate: bool,
    },

    /// Export all language lines to a sheet file.
    Export {
        /// The output file; format inferred from the extension (.csv/.tsv)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import an uploaded sheet file.
    Upload {
        /// The sheet file to import; format inferred from the extension
        #[arg(short, long)]
        input: PathBuf,

        /// Delete all existing lines first (irreversible)
        #[arg(long)]
        truncate: bool,
    },

    /// List language lines with per-locale presence indicators.
    List {
        /// Only lines in this group
        #[arg(short, long)]
        group: Option<String>,

        /// Only lines missing a translation for this locale
        #[arg(long)]
        missing: Option<String>,

        /// Substring match over keys and translations
        #[arg(long)]
        search: Option<String>,
    },

    /// Delete language lines by `group/key` selector.
    Delete {
        /// Selectors such as `validation/required`; no slash means no group
        specs: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let store = args.store.as_path();
    let config = args.config.as_deref();

    let result = match args.commands {
        Commands::Import {
            source,
            overwrite,
            truncate,
        } => run_import_command(store, config, &source, overwrite, truncate),
        Commands::Export { output } => run_export_command(store, config, &output),
        Commands::Upload { input, truncate } => run_upload_command(store, config, &input, truncate),
        Commands::List {
            group,
            missing,
            search,
        } => run_list_command(store, config, group, missing, search),
        Commands::Delete { specs } => run_delete_command(store, config, &specs),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
