//! IEC bus bridge runner.
//!
//! This binary wires the two simulators together and runs the frame loop. It performs:
//! 1. **Run (default):** Checks the firmware, opens the native MCU and peer libraries, loads the
//!    UF2 image, and runs frames until interrupted or `--frames` is reached.
//! 2. **Symbol lookup:** Prints the address of a firmware symbol from the linker map or the ELF.
//!
//! With no arguments every path takes its built-in default, so `iecbridge` alone reproduces the
//! usual development setup.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use iecbridge_core::mcu::{Mcu, NativeMcu};
use iecbridge_core::peer::{LoopbackPeer, NativePeer, PeerBus};
use iecbridge_core::sim::session;
use iecbridge_core::sim::symbols::{ElfSymbols, MapFile, SymbolTable};
use iecbridge_core::sim::{DiagnosticSnapshot, FrameReport};
use iecbridge_core::stats::STATS_SECTIONS;
use iecbridge_core::{BridgeConfig, BridgeError};

#[derive(Parser, Debug)]
#[command(
    name = "iecbridge",
    author,
    version,
    about = "IEC bus bridge between an RP2040 simulator and a C64 simulator",
    long_about = "Runs 1541 drive firmware in an RP2040 simulator and couples its IEC pins to a C64 simulator, one bus tick at a time.\n\nExamples:\n  iecbridge\n  iecbridge --frames 200 --firmware build/c1541.uf2\n  iecbridge --loopback --frames 20\n  iecbridge --loopback --stats-sections sync\n  iecbridge symbol iec_state"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file (defaults apply to anything it leaves out).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// UF2 firmware image.
    #[arg(short, long, global = true)]
    firmware: Option<PathBuf>,

    /// Native C64 peer library.
    #[arg(long)]
    peer: Option<PathBuf>,

    /// Native RP2040 simulator library.
    #[arg(long)]
    mcu: Option<PathBuf>,

    /// Stop after this many frames (default: run until interrupted).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,

    /// Statistics sections to print at exit, comma separated (default: all).
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
    )]
    stats_sections: Vec<String>,

    /// Use the in-process loopback peer instead of the native peer library.
    #[arg(long)]
    loopback: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the address of a firmware symbol.
    Symbol {
        /// Symbol name.
        name: String,

        /// Read the ELF symbol table instead of the linker map.
        #[arg(long)]
        elf: bool,
    },
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();

    let cli = Cli::parse();

    if let Err(e) = dispatch(&cli) {
        eprintln!("Error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("{hint}");
        }
        process::exit(e.exit_code());
    }
}

fn dispatch(cli: &Cli) -> Result<(), BridgeError> {
    let config = load_config(cli)?;

    match &cli.command {
        Some(Commands::Symbol { name, elf }) => cmd_symbol(&config, name, *elf),
        None => cmd_run(&config, cli),
    }
}

/// Layers the optional JSON file and then the command-line overrides over the defaults.
fn load_config(cli: &Cli) -> Result<BridgeConfig, BridgeError> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::from_json_file(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(firmware) = &cli.firmware {
        config.paths.firmware.clone_from(firmware);
    }
    if let Some(peer) = &cli.peer {
        config.paths.peer_library.clone_from(peer);
    }
    if let Some(mcu) = &cli.mcu {
        config.paths.mcu_library.clone_from(mcu);
    }
    Ok(config)
}

fn cmd_symbol(config: &BridgeConfig, name: &str, elf: bool) -> Result<(), BridgeError> {
    let address = if elf {
        ElfSymbols::open(&config.paths.elf_file())?.address_of(name)?
    } else {
        MapFile::open(&config.paths.map_file())?.address_of(name)?
    };
    println!("{name} = {address:#010x}");
    Ok(())
}

/// Runs the bridge until `--frames` frames have completed, or forever.
fn cmd_run(config: &BridgeConfig, cli: &Cli) -> Result<(), BridgeError> {
    // Checked before either library is opened so a missing build fails first.
    session::ensure_firmware(&config.paths.firmware)?;

    let mcu = NativeMcu::open(&config.paths.mcu_library)?;
    if cli.loopback {
        info!("using loopback peer");
        run_frames(config, mcu, LoopbackPeer::new(), cli)
    } else {
        let peer = NativePeer::open(&config.paths.peer_library)?;
        run_frames(config, mcu, peer, cli)
    }
}

/// Writes and clears buffered UART output.
fn forward_console<W: Write>(out: &mut W, console: &mut Vec<u8>) -> io::Result<()> {
    if console.is_empty() {
        return Ok(());
    }
    out.write_all(console)?;
    out.flush()?;
    console.clear();
    Ok(())
}

fn run_frames<M: Mcu, P: PeerBus>(
    config: &BridgeConfig,
    mcu: M,
    peer: P,
    cli: &Cli,
) -> Result<(), BridgeError> {
    let mut scheduler = session::start(config, mcu, peer)?;
    let mut console = Vec::new();
    let mut console_error = None;

    let mut host = |report: &FrameReport, snapshot: Option<&DiagnosticSnapshot>, mcu: &mut M| {
        mcu.drain_uart(&mut console);
        if let Err(e) = forward_console(&mut io::stdout().lock(), &mut console) {
            console_error = Some(e);
            return ControlFlow::Break(());
        }
        if snapshot.is_some() {
            info!(
                frame = report.index,
                cycles = report.cycles_run,
                ticks = report.ticks,
                "frame"
            );
        }
        match cli.frames {
            Some(limit) if report.index + 1 >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    };

    let _ = scheduler.run(&mut host);

    scheduler.peer_mut().print_tick_count();
    scheduler.stats().print_sections(&cli.stats_sections);
    console_error.map_or(Ok(()), |e| Err(BridgeError::Console(e)))
}
