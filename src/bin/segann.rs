//! segann command-line binary.

fn main() -> anyhow::Result<()> {
    segann::cli::run_cli()
}
