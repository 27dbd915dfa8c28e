use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;

use festival_sales::{Config, SalesLedger};

fn main() -> Result<()> {
    // Logs go to stderr at warn by default so the alternate screen stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "report" {
        run_report()?;
    } else {
        run_ui_mode()?;
    }

    Ok(())
}

fn open_ledger() -> Result<SalesLedger> {
    let config = Config::load()?;
    Ok(SalesLedger::new(config)?)
}

/// Print the configured roster, prices and an (empty-session) report
fn run_report() -> Result<()> {
    let ledger = open_ledger()?;

    println!("Festival Sales v{}", festival_sales::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Vendedores: {}", ledger.sellers().join(", "));
    for (ticket_type, price) in ledger.prices().iter() {
        println!("  {:<12} R$ {}", ticket_type, price);
    }
    println!("Contatos: {}", ledger.contacts().len());
    println!("{}", ledger.report().summary());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let ledger = open_ledger()?;

    let mut app = festival_sales::ui::App::new(ledger);
    festival_sales::ui::run_ui(&mut app)?;

    let report = app.ledger.report();
    println!("Sessão encerrada. {}", report.summary());

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin festival-server --features server");
    std::process::exit(1);
}
