//! Final account summary and its CSV rendering.

use crate::account::Account;
use crate::amount::Amount;
use crate::error::Result;
use crate::transaction::ClientId;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 5] = ["client", "available", "held", "total", "locked"];

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub client: ClientId,
    pub available: Amount,
    pub held: Amount,
    /// Recomputed as `available + held`
    pub total: Amount,
    pub locked: bool,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        AccountSummary {
            client: account.client(),
            available: account.available(),
            held: account.held(),
            total: account.total(),
            locked: account.is_locked(),
        }
    }
}

/// Builds one row per account, sorted by client ID.
pub fn summarize<'a, I>(accounts: I) -> Vec<AccountSummary>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut rows: Vec<AccountSummary> = accounts.into_iter().map(AccountSummary::from).collect();
    rows.sort_by_key(|row| row.client);
    rows
}

/// Writes the header and `rows` as CSV.
///
/// Amounts always carry 4 fractional digits and `locked` is `true`/`false`.
/// The header is written even when there are no rows.
pub fn write_csv<W: Write>(rows: &[AccountSummary], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}
