use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let args = sales_ledger::args::parse();
    sales_ledger::cli::main(args)
}
