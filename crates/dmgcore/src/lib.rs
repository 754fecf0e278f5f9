//! Headless driver: load a ROM image, run the core for a number of frames
//! or steps, and report what happened.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use dmgcore_gb::cpu::{disassemble, CpuConfig, Diagnostic, Interrupt, RunState};
use dmgcore_gb::machine::{ROM_WINDOW, TICKS_PER_FRAME};
use dmgcore_gb::GameBoy;
use typed_builder::TypedBuilder;

/// Options for one headless run.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom: PathBuf,
    #[builder(default = 1)]
    pub frames: u32,
    /// Stop after this many steps instead of a frame count.
    #[builder(default)]
    pub steps: Option<u64>,
    #[builder(default)]
    pub strict: bool,
    /// Write one trace line per executed instruction.
    #[builder(default)]
    pub trace: bool,
    #[builder(default)]
    pub stats: bool,
}

/// Outcome of [`run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub instructions: u64,
    pub ticks: u64,
    pub frames: u64,
    pub final_state: RunState,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read a ROM image from disk.
///
/// Only images that fit the unbanked 32 KiB window are accepted.
pub fn load_rom(path: &Path) -> Result<Vec<u8>> {
    let rom = std::fs::read(path)
        .with_context(|| format!("failed to read ROM file '{}'", path.display()))?;
    if rom.is_empty() {
        bail!("ROM file '{}' is empty", path.display());
    }
    if rom.len() > ROM_WINDOW {
        bail!(
            "ROM file '{}' is {} bytes; images larger than {} bytes need a bank controller",
            path.display(),
            rom.len(),
            ROM_WINDOW
        );
    }
    Ok(rom)
}

/// Load the configured ROM and run it, writing trace/stats output to `out`.
pub fn run_file<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let rom = load_rom(&config.rom)?;
    log::info!("Playing ROM path: '{}'", config.rom.display());
    run(config, &rom, out)
}

/// Run an in-memory image.
pub fn run<W: Write>(config: &RunConfig, rom: &[u8], out: &mut W) -> Result<RunSummary> {
    let cpu_config = CpuConfig::builder()
        .strict(config.strict)
        .trace(log::log_enabled!(log::Level::Trace))
        .build();
    let mut gb = GameBoy::with_config(cpu_config);
    gb.load_rom(rom);

    if config.trace || config.steps.is_some() {
        let tick_budget = config.frames as u64 * TICKS_PER_FRAME;
        let mut steps = 0u64;
        loop {
            let done = match config.steps {
                Some(limit) => steps >= limit,
                None => gb.cpu.total_ticks() >= tick_budget,
            };
            if done {
                break;
            }
            if config.trace && gb.cpu.run_state() == RunState::Running {
                let pc = gb.cpu.regs.pc;
                let line = gb.cpu.trace_line(&mut gb.memory);
                let (text, _) = disassemble(&mut gb.memory, pc);
                writeln!(out, "{line} {text}")?;
            }
            let before = gb.cpu.total_ticks();
            gb.step();
            steps += 1;
            if gb.cpu.run_state() == RunState::Stopped && gb.cpu.total_ticks() == before {
                log::warn!("CPU is in STOP with no input held; ending run");
                break;
            }
        }
    } else {
        for frame in 0..config.frames {
            let elapsed = gb.run_frame();
            if elapsed < TICKS_PER_FRAME {
                log::warn!("CPU is in STOP with no input held; ending run at frame {frame}");
                break;
            }
        }
    }

    if config.stats {
        write_stats(&gb, out)?;
    }

    // Each diagnostic was already logged by the core when it was raised.
    let diagnostics = gb.cpu.take_diagnostics();

    Ok(RunSummary {
        instructions: gb.cpu.stats().instructions,
        ticks: gb.cpu.total_ticks(),
        frames: gb.video().frames(),
        final_state: gb.cpu.run_state(),
        diagnostics,
    })
}

fn write_stats<W: Write>(gb: &GameBoy, out: &mut W) -> Result<()> {
    let stats = gb.cpu.stats();
    writeln!(out, "instructions: {}", stats.instructions)?;
    writeln!(out, "halted steps: {}", stats.halted_steps)?;
    writeln!(out, "clock ticks:  {}", gb.cpu.total_ticks())?;
    for interrupt in Interrupt::ALL {
        writeln!(
            out,
            "interrupt {:?}: {}",
            interrupt,
            stats.interrupt_count(interrupt)
        )?;
    }
    writeln!(out, "hottest instructions:")?;
    for (instr, count) in stats.hottest(10) {
        writeln!(out, "  {count:>10}  {instr}")?;
    }
    Ok(())
}
