use anyhow::Context;

use coffer_currency::LedgerConfig;
use coffer_market::{Market, default_script};

fn main() -> anyhow::Result<()> {
    coffer_observability::init();

    let config = match std::env::var("COFFER_LEDGER_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading ledger config {path}"))?;
            LedgerConfig::from_json(&raw).with_context(|| format!("parsing ledger config {path}"))?
        }
        Err(_) => {
            tracing::warn!("COFFER_LEDGER_CONFIG not set; using default ledger config");
            LedgerConfig::default().with_initial_balance(100)
        }
    };

    let mut market = Market::open(config).context("opening market")?;
    let balance_changes = market.subscribe();
    let report = market.run(&default_script());

    for change in balance_changes.drain() {
        tracing::debug!(
            ledger_id = %change.ledger_id,
            previous = change.previous,
            balance = change.balance,
            "balance changed"
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
