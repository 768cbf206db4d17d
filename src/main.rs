mod cli;
mod core;
mod plot;

fn main() -> anyhow::Result<()> {
    cli::run::entry()
}
