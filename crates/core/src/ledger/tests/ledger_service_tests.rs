use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::holdings::HoldingRepository;
use crate::ledger::{LedgerError, LedgerService};
use crate::test_utils::{register_user, test_pool, MockQuoteProvider};
use crate::transactions::{TransactionRepository, TransactionSide};
use crate::users::UserService;

fn cash_of(pool: &Arc<DbPool>, username: &str) -> Decimal {
    UserService::new(pool.clone())
        .get_user(username)
        .expect("user exists")
        .cash
}

#[tokio::test]
async fn buy_debits_cash_and_creates_holding() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    let outcome = ledger.buy("alice", "AAPL", 10).await.expect("buy succeeds");
    assert_eq!(outcome.executed_price, dec!(150.00));
    assert_eq!(outcome.name, "AAPL Inc");
    assert_eq!(outcome.cash_after, dec!(8500.00));

    assert_eq!(cash_of(&pool, "alice"), dec!(8500.00));

    let holding = HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .expect("holding exists");
    assert_eq!(holding.shares, 10);
    assert_eq!(holding.cost_basis, dec!(1500.00));

    let history = TransactionRepository::new(pool.clone())
        .list_for_user("alice")
        .expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].side, TransactionSide::Buy);
    assert_eq!(history[0].symbol, "AAPL");
    assert_eq!(history[0].shares, 10);
    assert_eq!(history[0].price, dec!(150.00));
}

#[tokio::test]
async fn repeated_buys_accumulate_shares_and_cost_basis() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider.clone());

    ledger.buy("alice", "AAPL", 10).await.expect("first buy");
    provider.set_price("AAPL", dec!(160.00));
    ledger.buy("alice", "AAPL", 5).await.expect("second buy");

    let holding = HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .expect("holding exists");
    assert_eq!(holding.shares, 15);
    assert_eq!(holding.cost_basis, dec!(2300.00));
    assert_eq!(cash_of(&pool, "alice"), dec!(7700.00));
}

#[tokio::test]
async fn insufficient_funds_leaves_state_unchanged() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    let err = ledger.buy("alice", "AAPL", 100).await.unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

    assert_eq!(cash_of(&pool, "alice"), dec!(10000.00));
    assert!(HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .is_none());
    assert!(TransactionRepository::new(pool.clone())
        .list_for_user("alice")
        .expect("history")
        .is_empty());
}

#[tokio::test]
async fn unknown_symbol_is_rejected() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    let err = ledger.buy("alice", "ZZZZ", 1).await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidSymbol(_)));
}

#[tokio::test]
async fn non_positive_share_counts_are_rejected() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    assert!(matches!(
        ledger.buy("alice", "AAPL", 0).await.unwrap_err(),
        LedgerError::InvalidShareCount(0)
    ));
    assert!(matches!(
        ledger.sell("alice", "AAPL", -3).await.unwrap_err(),
        LedgerError::InvalidShareCount(-3)
    ));
}

#[tokio::test]
async fn blank_symbols_are_rejected_before_the_provider() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    assert!(matches!(
        ledger.buy("alice", "   ", 1).await.unwrap_err(),
        LedgerError::InvalidSymbol(_)
    ));
    assert!(matches!(
        ledger.sell("alice", "", 1).await.unwrap_err(),
        LedgerError::InvalidSymbol(_)
    ));
}

#[tokio::test]
async fn unknown_user_cannot_buy() {
    let pool = test_pool();
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    let err = ledger.buy("ghost", "AAPL", 1).await.unwrap_err();
    assert!(matches!(err, LedgerError::UserNotFound(_)));
}

#[tokio::test]
async fn selling_everything_removes_the_holding() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider.clone());

    ledger.buy("alice", "AAPL", 10).await.expect("buy");
    provider.set_price("AAPL", dec!(160.00));
    let outcome = ledger.sell("alice", "AAPL", 10).await.expect("sell");
    assert_eq!(outcome.executed_price, dec!(160.00));

    // No zero-share row may survive
    assert!(HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .is_none());
    assert_eq!(cash_of(&pool, "alice"), dec!(10100.00));

    let history = TransactionRepository::new(pool.clone())
        .list_for_user("alice")
        .expect("history");
    assert_eq!(history.len(), 2);
    let sell = history
        .iter()
        .find(|t| t.side == TransactionSide::Sell)
        .expect("sell recorded");
    assert_eq!(sell.shares, 10);
    assert_eq!(sell.price, dec!(160.00));
}

#[tokio::test]
async fn partial_sell_reduces_cost_basis_proportionally() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider.clone());

    ledger.buy("alice", "AAPL", 10).await.expect("buy");
    provider.set_price("AAPL", dec!(160.00));
    ledger.sell("alice", "AAPL", 4).await.expect("partial sell");

    let holding = HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .expect("holding remains");
    assert_eq!(holding.shares, 6);
    assert_eq!(holding.cost_basis, dec!(900.00));
}

#[tokio::test]
async fn overselling_fails_and_leaves_state_unchanged() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    ledger.buy("alice", "AAPL", 10).await.expect("buy");
    let cash_before = cash_of(&pool, "alice");

    let err = ledger.sell("alice", "AAPL", 20).await.unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Oversell {
            requested: 20,
            held: 10
        }
    ));

    let holding = HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .expect("holding unchanged");
    assert_eq!(holding.shares, 10);
    assert_eq!(cash_of(&pool, "alice"), cash_before);
    assert_eq!(
        TransactionRepository::new(pool.clone())
            .list_for_user("alice")
            .expect("history")
            .len(),
        1
    );
}

#[tokio::test]
async fn selling_without_a_holding_fails() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    let err = ledger.sell("alice", "AAPL", 1).await.unwrap_err();
    assert!(matches!(err, LedgerError::NoSuchHolding { .. }));
}

#[tokio::test]
async fn round_trip_to_zero_shares_nets_out_in_cash() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider.clone());

    ledger.buy("alice", "AAPL", 10).await.expect("buy");
    provider.set_price("AAPL", dec!(160.00));
    ledger.sell("alice", "AAPL", 4).await.expect("first sell");
    provider.set_price("AAPL", dec!(155.00));
    ledger.sell("alice", "AAPL", 6).await.expect("second sell");

    assert!(HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .is_none());
    // 10000 - 1500 + 640 + 930
    assert_eq!(cash_of(&pool, "alice"), dec!(10070.00));
}

#[tokio::test]
async fn history_is_ordered_newest_first() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = LedgerService::new(pool.clone(), provider);

    ledger.buy("alice", "AAPL", 10).await.expect("buy");
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    ledger.sell("alice", "AAPL", 10).await.expect("sell");

    let history = TransactionRepository::new(pool.clone())
        .list_for_user("alice")
        .expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].side, TransactionSide::Sell);
    assert_eq!(history[1].side, TransactionSide::Buy);
    assert!(history[0].timestamp >= history[1].timestamp);
}

#[tokio::test]
async fn transient_store_failure_is_retried_once() {
    let pool = test_pool();
    let ledger = LedgerService::new(pool.clone(), Arc::new(MockQuoteProvider::new()));
    let mut conn = get_connection(&pool).expect("connection");

    let attempts = AtomicUsize::new(0);
    let result = ledger.with_retry(&mut conn, |_tx| {
        if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(LedgerError::TransientStore("database is locked".to_string()))
        } else {
            Ok(42)
        }
    });

    assert_eq!(result.expect("second attempt succeeds"), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn persistent_transient_failure_becomes_operation_failed() {
    let pool = test_pool();
    let ledger = LedgerService::new(pool.clone(), Arc::new(MockQuoteProvider::new()));
    let mut conn = get_connection(&pool).expect("connection");

    let attempts = AtomicUsize::new(0);
    let result: Result<(), _> = ledger.with_retry(&mut conn, |_tx| {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(LedgerError::TransientStore("database is locked".to_string()))
    });

    assert!(matches!(result, Err(LedgerError::OperationFailed(_))));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_buys_cannot_both_overspend() {
    let pool = test_pool();
    register_user(&pool, "alice");
    let provider = MockQuoteProvider::with_price("AAPL", dec!(150.00));
    let ledger = Arc::new(LedgerService::new(pool.clone(), provider));

    // Each buy costs 6000, more than half of the 10000 starting cash:
    // only one can be afforded.
    let first = {
        let ledger = ledger.clone();
        tokio::spawn(async move { ledger.buy("alice", "AAPL", 40).await })
    };
    let second = {
        let ledger = ledger.clone();
        tokio::spawn(async move { ledger.buy("alice", "AAPL", 40).await })
    };

    let results = [
        first.await.expect("task one"),
        second.await.expect("task two"),
    ];
    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let insufficient = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::InsufficientFunds { .. })))
        .count();
    assert_eq!(succeeded, 1);
    assert_eq!(insufficient, 1);

    // Exactly one deduction is visible
    assert_eq!(cash_of(&pool, "alice"), dec!(4000.00));
    let holding = HoldingRepository::new(pool.clone())
        .get_for_symbol("alice", "AAPL")
        .expect("query holding")
        .expect("holding exists");
    assert_eq!(holding.shares, 40);
}
