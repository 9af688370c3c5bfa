//! Edge cases of the ledger, driven through CSV in and CSV out.

use std::io::Cursor;
use transaction_ledger::{LedgerEngine, ProcessStats};

fn run_csv(csv: &str) -> (String, ProcessStats) {
    let mut engine = LedgerEngine::new();
    let stats = *engine.process_csv(Cursor::new(csv)).unwrap();

    let mut output = Vec::new();
    engine.write_output(&mut output).unwrap();
    (String::from_utf8(output).unwrap(), stats)
}

#[derive(Debug, PartialEq)]
struct Balances {
    available: String,
    held: String,
    total: String,
    locked: bool,
}

fn balances(output: &str, client_id: u16) -> Balances {
    let line = output
        .lines()
        .skip(1)
        .find(|line| line.starts_with(&format!("{},", client_id)))
        .unwrap_or_else(|| panic!("no row for client {} in\n{}", client_id, output));
    let parts: Vec<&str> = line.split(',').collect();
    Balances {
        available: parts[1].to_string(),
        held: parts[2].to_string(),
        total: parts[3].to_string(),
        locked: parts[4] == "true",
    }
}

fn expect(available: &str, held: &str, total: &str, locked: bool) -> Balances {
    Balances {
        available: available.to_string(),
        held: held.to_string(),
        total: total.to_string(),
        locked,
    }
}

// ==================== DEPOSITS ====================

#[test]
fn test_deposit_zero_amount() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,0.0
deposit,1,2,10.0",
    );

    assert_eq!(balances(&output, 1), expect("10.0000", "0.0000", "10.0000", false));
    assert_eq!(stats.applied, 2);
}

#[test]
fn test_deposit_smallest_unit() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,0.0001",
    );

    assert_eq!(balances(&output, 1).available, "0.0001");
}

#[test]
fn test_deposit_large_amount() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,999999999999.9999",
    );

    assert_eq!(balances(&output, 1).total, "999999999999.9999");
}

#[test]
fn test_negative_deposit_is_malformed() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,-5.0
deposit,1,2,1.0",
    );

    assert_eq!(balances(&output, 1).available, "1.0000");
    assert_eq!(stats.malformed, 1);
}

// ==================== WITHDRAWALS ====================

#[test]
fn test_withdrawal_exact_balance() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
withdrawal,1,2,100.0",
    );

    assert_eq!(balances(&output, 1), expect("0.0000", "0.0000", "0.0000", false));
}

#[test]
fn test_withdrawal_exceeds_balance_by_smallest_unit() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
withdrawal,1,2,100.0001",
    );

    assert_eq!(balances(&output, 1).available, "100.0000");
    assert_eq!(stats.insufficient_funds, 1);
}

#[test]
fn test_withdrawal_on_fresh_account_creates_empty_account() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
withdrawal,2,10,50.0",
    );

    assert_eq!(balances(&output, 2), expect("0.0000", "0.0000", "0.0000", false));
    assert_eq!(stats.insufficient_funds, 1);
}

#[test]
fn test_multiple_withdrawals() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
withdrawal,1,2,30.0
withdrawal,1,3,20.0
withdrawal,1,4,10.0",
    );

    assert_eq!(balances(&output, 1).available, "40.0000");
}

// ==================== DISPUTES ====================

#[test]
fn test_dispute_unknown_transaction() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
dispute,1,999,",
    );

    assert_eq!(balances(&output, 1), expect("100.0000", "0.0000", "100.0000", false));
    assert_eq!(stats.unknown_reference, 1);
}

#[test]
fn test_dispute_of_other_clients_transaction() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
deposit,2,2,50.0
dispute,2,1,",
    );

    assert_eq!(balances(&output, 1), expect("100.0000", "0.0000", "100.0000", false));
    assert_eq!(balances(&output, 2), expect("50.0000", "0.0000", "50.0000", false));
    assert_eq!(stats.unknown_reference, 1);
}

#[test]
fn test_double_dispute_same_transaction() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
dispute,1,1,
dispute,1,1,",
    );

    assert_eq!(balances(&output, 1), expect("0.0000", "100.0000", "100.0000", false));
    assert_eq!(stats.invalid_transition, 1);
}

#[test]
fn test_dispute_after_partial_withdrawal_goes_negative() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
withdrawal,1,2,70.0
dispute,1,1,",
    );

    assert_eq!(balances(&output, 1), expect("-70.0000", "100.0000", "30.0000", false));
}

#[test]
fn test_dispute_of_withdrawal_holds_nothing() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
withdrawal,1,2,30.0
dispute,1,2,",
    );

    assert_eq!(balances(&output, 1), expect("70.0000", "0.0000", "70.0000", false));
}

#[test]
fn test_dispute_with_amount_is_malformed() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
dispute,1,1,100.0",
    );

    assert_eq!(balances(&output, 1).held, "0.0000");
    assert_eq!(stats.malformed, 1);
}

// ==================== RESOLVES ====================

#[test]
fn test_resolve_not_disputed() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
resolve,1,1,",
    );

    assert_eq!(balances(&output, 1), expect("100.0000", "0.0000", "100.0000", false));
    assert_eq!(stats.invalid_transition, 1);
}

#[test]
fn test_resolve_unknown_transaction() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
dispute,1,1,
resolve,1,999,",
    );

    assert_eq!(balances(&output, 1), expect("0.0000", "100.0000", "100.0000", false));
    assert_eq!(stats.invalid_transition, 1);
}

#[test]
fn test_resolve_by_other_client() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
deposit,2,2,50.0
dispute,1,1,
resolve,2,1,",
    );

    assert_eq!(balances(&output, 1).held, "100.0000");
    assert_eq!(stats.unknown_reference, 1);
}

#[test]
fn test_double_resolve() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
dispute,1,1,
resolve,1,1,
resolve,1,1,",
    );

    assert_eq!(balances(&output, 1), expect("100.0000", "0.0000", "100.0000", false));
}

#[test]
fn test_resolved_transaction_cannot_be_disputed_again() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
dispute,1,1,
resolve,1,1,
dispute,1,1,
chargeback,1,1,",
    );

    assert_eq!(balances(&output, 1), expect("100.0000", "0.0000", "100.0000", false));
    assert_eq!(stats.invalid_transition, 2);
}

// ==================== CHARGEBACKS ====================

#[test]
fn test_chargeback_not_disputed() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,1.0
deposit,1,2,200
chargeback,1,1",
    );

    assert_eq!(balances(&output, 1), expect("201.0000", "0.0000", "201.0000", false));
}

#[test]
fn test_chargeback_locks_account() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,1.0
deposit,1,2,200
dispute,1,1
chargeback,1,1",
    );

    assert_eq!(balances(&output, 1), expect("200.0000", "0.0000", "200.0000", true));
}

#[test]
fn test_chargeback_by_other_client() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
deposit,2,2,50.0
dispute,1,1,
chargeback,2,1,",
    );

    assert_eq!(balances(&output, 1), expect("0.0000", "100.0000", "100.0000", false));
    assert!(!balances(&output, 2).locked);
}

#[test]
fn test_chargeback_of_withdrawal_returns_funds() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit ,  1,1,  1.0
withdrawal,  1,2,1
dispute, 1,2
chargeback,1,2",
    );

    assert_eq!(balances(&output, 1), expect("1.0000", "0.0000", "1.0000", true));
}

#[test]
fn test_double_chargeback() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
dispute,1,1,
chargeback,1,1,
chargeback,1,1,",
    );

    assert_eq!(balances(&output, 1), expect("0.0000", "0.0000", "0.0000", true));
    assert_eq!(stats.account_locked, 1);
}

// ==================== LOCKED ACCOUNTS ====================

#[test]
fn test_locked_account_ignores_everything() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
deposit,1,2,50.0
dispute,1,1,
dispute,1,2,
chargeback,1,1,
deposit,1,3,500.0
withdrawal,1,4,25.0
resolve,1,2,
dispute,1,2,",
    );

    // tx 2 stays held: the account locked before it could be resolved
    assert_eq!(balances(&output, 1), expect("0.0000", "50.0000", "50.0000", true));
    assert_eq!(stats.account_locked, 4);
}

#[test]
fn test_lock_is_per_client() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
deposit,2,2,200.0
withdrawal,1,3,50.0
dispute,2,2,
deposit,1,4,25.0
chargeback,2,2,
withdrawal,1,5,30.0",
    );

    assert_eq!(balances(&output, 1), expect("45.0000", "0.0000", "45.0000", false));
    assert_eq!(balances(&output, 2), expect("0.0000", "0.0000", "0.0000", true));
}

// ==================== IDENTIFIERS ====================

#[test]
fn test_identifier_bounds() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,0,0,1.0
deposit,65535,4294967295,2.0",
    );

    assert_eq!(balances(&output, 0).available, "1.0000");
    assert_eq!(balances(&output, 65535).available, "2.0000");
}

#[test]
fn test_out_of_range_client_is_malformed() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,65536,1,1.0",
    );

    assert_eq!(output.lines().count(), 1);
    assert_eq!(stats.malformed, 1);
}

#[test]
fn test_duplicate_tx_id_across_clients() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
deposit,2,1,50.0
withdrawal,1,1,10.0",
    );

    assert_eq!(balances(&output, 1).available, "100.0000");
    assert_eq!(balances(&output, 2).available, "0.0000");
    assert_eq!(stats.duplicate_tx_id, 2);
}

// ==================== CSV FORMAT ====================

#[test]
fn test_empty_input_with_header() {
    let (output, stats) = run_csv("type,client,tx,amount\n");

    assert_eq!(output, "client,available,held,total,locked\n");
    assert_eq!(stats.total(), 0);
}

#[test]
fn test_mixed_case_types_and_whitespace() {
    let (output, _) = run_csv(
        "type,  client,   tx,    amount
  DEPOSIT  ,  1  ,  1  ,   100.0
Withdrawal,1,2,30.0
DISPUTE,1,1,
Resolve,1,1,",
    );

    assert_eq!(balances(&output, 1), expect("70.0000", "0.0000", "70.0000", false));
}

#[test]
fn test_malformed_rows_are_counted_and_skipped() {
    let (output, stats) = run_csv(
        "type,client,tx,amount
deposit,1,1,
deposit,1,2,abc
foo
foo,1,2,4,34
transfer,1,3,1.0
deposit,x,4,1.0
deposit,1,5,100.0",
    );

    assert_eq!(balances(&output, 1).available, "100.0000");
    assert_eq!(stats.malformed, 6);
    assert_eq!(stats.applied, 1);
}

// ==================== PRECISION AND ORDER ====================

#[test]
fn test_decimal_precision_preserved() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,0.1234
deposit,1,2,0.5678
deposit,1,3,1
deposit,1,4,2.5",
    );

    assert_eq!(balances(&output, 1).available, "4.1912");
}

#[test]
fn test_output_sorted_by_client_with_four_decimals() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,5,1,5.1234
deposit,1,2,1
deposit,3,3,3.12
deposit,2,4,2.5
deposit,4,5,4.123",
    );

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 6);
    for (i, line) in lines[1..].iter().enumerate() {
        assert!(line.starts_with(&format!("{},", i + 1)));
        let parts: Vec<&str> = line.split(',').collect();
        for field in &parts[1..=3] {
            assert_eq!(field.split('.').nth(1).unwrap().len(), 4, "{}", line);
        }
    }
}

#[test]
fn test_multiple_disputes_on_different_transactions() {
    let (output, _) = run_csv(
        "type,client,tx,amount
deposit,1,1,100.0
deposit,1,2,50.0
deposit,1,3,25.0
dispute,1,1,
dispute,1,3,
resolve,1,1,
chargeback,1,3,",
    );

    assert_eq!(balances(&output, 1), expect("150.0000", "0.0000", "150.0000", true));
}
