use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, clap::ValueEnum)]
enum EmitStage {
    /// Human-readable plan listing.
    Plan,
    /// Construction plan as JSON (the host boundary schema).
    Json,
    /// Provenance metadata for the compile.
    BuildInfo,
}

#[derive(Parser, Debug)]
#[command(
    name = "mmc",
    version,
    about = "Mermaid Material Compiler — compiles flow-chart graph text to material construction plans"
)]
struct Cli {
    /// Input graph text file (.mmd)
    source: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output stage
    #[arg(long, value_enum, default_value_t = EmitStage::Plan)]
    emit: EmitStage,

    /// Exit nonzero if the compile produced any warnings
    #[arg(long)]
    deny_warnings: bool,

    /// Print compile summary on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.source) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("mmc: error: {}: {}", cli.source.display(), e);
            std::process::exit(2);
        }
    };

    let registry = mmc::registry::Registry::builtin();
    let result = mmc::pipeline::compile(&source, &registry);

    for diag in &result.diagnostics {
        eprintln!("mmc: {}", diag);
    }

    if cli.verbose {
        eprintln!(
            "mmc: {} creates, {} connections, {} warning(s)",
            result.plan.create_count(),
            result.plan.connect_count(),
            result.diagnostics.len(),
        );
    }

    let rendered = match cli.emit {
        EmitStage::Plan => result.plan.to_string(),
        EmitStage::Json => match serde_json::to_string_pretty(&result.plan) {
            Ok(mut s) => {
                s.push('\n');
                s
            }
            Err(e) => {
                eprintln!("mmc: error: failed to serialize plan: {}", e);
                std::process::exit(2);
            }
        },
        EmitStage::BuildInfo => result.provenance.to_json(),
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, rendered) {
                eprintln!("mmc: error: {}: {}", path.display(), e);
                std::process::exit(2);
            }
        }
        None => print!("{rendered}"),
    }

    if cli.deny_warnings && result.has_warnings() {
        std::process::exit(1);
    }
}
