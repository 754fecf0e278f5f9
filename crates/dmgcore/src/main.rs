use anyhow::{bail, Context, Result};
use dmgcore::RunConfig;

const USAGE: &str = "usage: dmgcore <rom.gb> [--frames N] [--steps N] [--strict] [--trace] [--stats]";

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let value = value.with_context(|| format!("{flag} needs a value\n{USAGE}"))?;
    value
        .parse()
        .ok()
        .with_context(|| format!("invalid value for {flag}: '{value}'"))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut rom = None;
    let mut frames = 1;
    let mut steps = None;
    let (mut strict, mut trace, mut stats) = (false, false, false);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => frames = parse_number("--frames", args.next())?,
            "--steps" => steps = Some(parse_number("--steps", args.next())?),
            "--strict" => strict = true,
            "--trace" => trace = true,
            "--stats" => stats = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            other if other.starts_with("--") => bail!("unknown option '{other}'\n{USAGE}"),
            path if rom.is_none() => rom = Some(path.to_string()),
            extra => bail!("unexpected argument '{extra}'\n{USAGE}"),
        }
    }
    let Some(rom) = rom else {
        bail!("no ROM path provided\n{USAGE}");
    };

    let config = RunConfig::builder()
        .rom(rom)
        .frames(frames)
        .strict(strict)
        .trace(trace)
        .steps(steps)
        .stats(stats)
        .build();

    let stdout = std::io::stdout();
    let summary = dmgcore::run_file(&config, &mut stdout.lock())?;
    log::info!(
        "ran {} instructions, {} ticks, {} frames, {} diagnostics; final state {:?}",
        summary.instructions,
        summary.ticks,
        summary.frames,
        summary.diagnostics.len(),
        summary.final_state
    );
    Ok(())
}
