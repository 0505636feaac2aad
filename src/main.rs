use edabench::pipeline::{run, BenchmarkDirs};
use edabench::registry::default_registry;
use edabench::{logger, Result};

fn main() -> Result<()> {
    logger::init();

    let registry = default_registry();
    let report = run(&registry, &BenchmarkDirs::default())?;
    report.print_summary();

    Ok(())
}
