//! pdsc_pick - Choose a device from a CMSIS pack description.
//!
//! Reads `devices.pdsc` from the first workspace folder, asks for a
//! sub-family and then a device, and prints the device's description.
//!
//! # Usage
//!
//! ```bash
//! pdsc_pick [OPTIONS]
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Use devices.pdsc in the current directory
//! pdsc_pick
//!
//! # Use a specific workspace folder
//! pdsc_pick --workspace ~/firmware
//!
//! # Read a pack description directly and print the whole hierarchy
//! pdsc_pick --file Keil.STM32F4xx_DFP.pdsc --list
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pdsc_picker::flow::{self, run_command, COMMAND_ID};
use pdsc_picker::objects::SubFamilies;
use pdsc_picker::picker::{ConsoleNotifier, Notifier, TerminalPicker};
use pdsc_picker::workspace::{load_file, Workspace, WorkspaceConfig, DEFAULT_PDSC_FILE_NAME};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Choose a device from a CMSIS pack description.
#[derive(Parser, Debug)]
#[command(name = "pdsc_pick")]
#[command(version = VERSION)]
#[command(about = "Choose a device from a .pdsc package description")]
#[command(
    long_about = "Reads the package description in the first workspace folder, \
    asks for a sub-family and one of its devices, and prints the device description."
)]
struct Args {
    /// Workspace folder (repeatable, the first one is used)
    ///
    /// Defaults to the current directory.
    #[arg(short, long = "workspace", value_name = "DIR")]
    workspaces: Vec<PathBuf>,

    /// Name of the description file inside the workspace
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PDSC_FILE_NAME)]
    file_name: String,

    /// Read this description file instead of searching the workspace
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["workspaces", "file_name"])]
    file: Option<PathBuf>,

    /// Print every sub-family and device, then exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pdsc_picker=debug,pdsc_pick=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pdsc_picker=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Writes the whole hierarchy as an indented listing.
fn write_listing<W: Write>(out: &mut W, sub_families: &SubFamilies) -> io::Result<()> {
    for sub_family in sub_families {
        writeln!(out, "{}", sub_family.label)?;
        for device in &sub_family.devices {
            writeln!(out, "  {}: {}", device.label, device.description)?;
        }
    }
    Ok(())
}

fn workspace_from_args(args: &Args) -> io::Result<Workspace> {
    let folders = if args.workspaces.is_empty() {
        vec![std::env::current_dir()?]
    } else {
        args.workspaces.clone()
    };
    let config = WorkspaceConfig {
        file_name: args.file_name.clone(),
    };
    Ok(Workspace::with_config(folders, config))
}

fn run(args: &Args) -> pdsc_picker::Result<bool> {
    let stdin = io::stdin();
    let mut picker = TerminalPicker::new(stdin.lock(), io::stdout());
    let mut notifier = ConsoleNotifier::new(io::stdout(), io::stderr());

    if let Some(path) = &args.file {
        let sub_families = match load_file(path) {
            Ok(s) => s,
            Err(e) => {
                notifier.error(&e.to_string())?;
                return Ok(false);
            }
        };
        if args.list {
            write_listing(&mut io::stdout().lock(), &sub_families)?;
        } else {
            flow::present(&sub_families, &mut picker, &mut notifier)?;
        }
        return Ok(true);
    }

    let workspace = workspace_from_args(args)?;
    if args.list {
        return match workspace.load_sub_families() {
            Ok(sub_families) => {
                write_listing(&mut io::stdout().lock(), &sub_families)?;
                Ok(true)
            }
            Err(e) => {
                notifier.error(&e.to_string())?;
                Ok(false)
            }
        };
    }

    Ok(run_command(&workspace, &mut picker, &mut notifier)?.is_some())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);
    tracing::debug!(command = COMMAND_ID, version = VERSION, "starting");

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdsc_picker::objects::{Device, SubFamily};

    #[test]
    fn test_write_listing() {
        let mut m4 = SubFamily::new("M4");
        m4.push(Device::new("STM32F4", "Cortex-M4 MCU"));
        m4.push(Device::without_description("STM32F405"));
        let subs: SubFamilies = vec![m4, SubFamily::new("M0")].into();

        let mut out = Vec::new();
        write_listing(&mut out, &subs).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "M4\n  STM32F4: Cortex-M4 MCU\n  STM32F405: No description available\nM0\n"
        );
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["pdsc_pick"]);
        assert!(args.workspaces.is_empty());
        assert_eq!(args.file_name, "devices.pdsc");
        assert!(args.file.is_none());
        assert!(!args.list);

        let workspace = workspace_from_args(&args).unwrap();
        assert_eq!(workspace.folders().len(), 1);
        assert_eq!(workspace.config().file_name, "devices.pdsc");
    }

    #[test]
    fn test_args_workspaces() {
        let args = Args::parse_from(["pdsc_pick", "-w", "/a", "--workspace", "/b", "--list"]);
        assert_eq!(
            args.workspaces,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert!(args.list);
        let workspace = workspace_from_args(&args).unwrap();
        assert_eq!(
            workspace.pdsc_path().unwrap(),
            PathBuf::from("/a/devices.pdsc")
        );
    }
}
