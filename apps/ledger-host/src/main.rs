//! Line-oriented driver for the ledger host.
//!
//! Reads one JSON action per line from stdin and writes the resulting
//! snapshot (or error) as one JSON line to stdout. Logs go to stderr.
//!
//! ```text
//! $ LEDGER_SEED_DEMO=1 ledger-host
//! {"type":"UPDATE_ITEM","payload":{"id":1,"updates":{"rate":20}}}
//! {"ok":{"items":[...],"itemTaxes":[{"id":1,"itemId":1,"taxId":1,"total":7.2},...],...}}
//! ```

use std::io::{self, BufRead, Write};

use ledger_host::commands::ledger::dispatch_action;
use ledger_host::error::ApiError;
use serde_json::{json, Value};
use tracing::{info, warn};

fn main() -> io::Result<()> {
    let app = ledger_host::bootstrap();
    info!("Starting ledger host");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Value>(&line) {
            Ok(action) => match dispatch_action(&app.ledger, &action) {
                Ok(snapshot) => json!({ "ok": snapshot }),
                Err(err) => error_reply(err),
            },
            Err(err) => {
                warn!(error = %err, "Skipping line that is not JSON");
                error_reply(ApiError::validation(format!("invalid JSON: {err}")))
            }
        };

        writeln!(stdout, "{reply}")?;
    }

    Ok(())
}

fn error_reply(err: ApiError) -> Value {
    json!({ "error": err })
}
