use clap::Parser;
use promptcat::logger::initialize_logger;
use promptcat::output::{ClipboardSink, FileSink, PromptSink, StdoutSink};
use promptcat::{pack_project, PackRequest, PromptError, ScanConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[arg(short = 'r', long, env = "PROMPTCAT_ROOT", help = "Project root used for the paths in the output (defaults to the current directory)")]
    root: Option<PathBuf>,
    #[arg(short = 'd', long, default_value = "src", help = "Directory to scan, relative to the project root")]
    scan_dir: PathBuf,
    #[arg(short = 'e', long = "ext", help = "Extra file extension to include (e.g., --ext rs --ext toml)")]
    extensions: Vec<String>,
    #[arg(long = "only-ext", help = "Include only these extensions instead of the defaults")]
    only_extensions: Option<Vec<String>>,
    #[arg(long = "ignore-dir", help = "Extra directory name to prune")]
    ignore_dirs: Vec<String>,
    #[arg(long = "ignore-file", help = "Extra exact file name to skip")]
    ignore_files: Vec<String>,
    #[arg(long, help = "Visit directory entries in file-name order")]
    sorted: bool,
    #[arg(long, conflicts_with = "output", help = "Print the prompt instead of copying it")]
    stdout: bool,
    #[arg(short = 'o', long, help = "Write the prompt to this file instead of copying it")]
    output: Option<PathBuf>,
    #[arg(short = 's', long, default_value = "false")]
    no_stats: bool,
    #[arg(short = 'M', long, default_value = "gpt-4o")]
    model: String,
}

impl CliArgs {
    fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default();
        if let Some(only) = &self.only_extensions {
            config = config.with_only_extensions(only);
        }
        config
            .with_extensions(&self.extensions)
            .with_ignore_dirs(&self.ignore_dirs)
            .with_ignore_files(&self.ignore_files)
            .sorted(self.sorted)
    }

    fn sink(&self) -> Box<dyn PromptSink> {
        match (&self.output, self.stdout) {
            (Some(path), _) => Box::new(FileSink::new(path.clone())),
            (None, true) => Box::new(StdoutSink),
            (None, false) => Box::new(ClipboardSink::default()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let project_root = match cli_args.root.clone() {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Could not determine the current directory: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };
    info!("Project root assumed to be: {}", project_root.display());

    let request = PackRequest {
        scan_dir: project_root.join(&cli_args.scan_dir),
        project_root,
        config: cli_args.scan_config(),
        stats_model: (!cli_args.no_stats).then(|| cli_args.model.clone()),
    };
    let sink = cli_args.sink();

    tokio::select! {
        result = pack_project(request, sink.as_ref()) => match result {
            Ok(summary) => {
                if summary.delivered {
                    info!("SUCCESS! {} file(s) packed", summary.files);
                }
                ExitCode::SUCCESS
            }
            Err(PromptError::InvalidRoot(path)) => {
                error!("'{}' folder not found", cli_args.scan_dir.display());
                error!("Please run this from your project's root folder (looked for: {})", path.display());
                ExitCode::FAILURE
            }
            Err(e) => {
                error!("Error packing project: {}", e);
                ExitCode::FAILURE
            }
        },
        _ = signal::ctrl_c() => {
            info!("Operation cancelled by user.");
            // don't wait on the blocking walk during runtime shutdown
            std::process::exit(0);
        }
    }
}
