use clap::Parser;
use vaxpolicy::{Args, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(args, &mut out)?;

    tracing::debug!("Done");
    Ok(())
}
