use anyhow::Result;

fn main() -> Result<()> {
    howto_guides::cli::run()
}
