//! End-to-end tests: order source → book → optional call auction → report.
//!
//! Covers the reference run (100 random orders, clear at the end), seeded
//! reproducibility, and JSON replay of a hand-written order stream.

use rust_decimal::Decimal;
use unitbook_matchcore::{BookMutation, ClearingResult, OrderBook, book_root_hex};
use unitbook_sim::{OrderSource, RandomOrderSource, ReplaySource, Simulation};
use unitbook_types::*;

fn dec(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn seeded(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

#[test]
fn reference_run_submits_one_hundred_orders() {
    let report = Simulation::new(seeded(123)).unwrap().run().unwrap();

    assert_eq!(report.steps.len(), 100);
    assert_eq!(report.matched + report.rested + report.dropped, 100);
    let stamps: Vec<u64> = report.steps.iter().map(|s| s.placed_at.0).collect();
    assert_eq!(stamps, (1..=100).collect::<Vec<_>>());

    // Continuous matching never leaves a cross behind, so the closing
    // auction has nothing to do.
    assert_eq!(report.clearing, Some(ClearingResult::NoEquilibrium));
    assert_eq!(report.book_before_clearing, report.final_book);

    let resting = report.final_book.bids.len() + report.final_book.asks.len();
    assert_eq!(resting, report.rested - report.matched);
}

#[test]
fn spread_in_each_step_matches_book_state() {
    let mut sim = Simulation::new(seeded(7)).unwrap();
    let mut shadow = OrderBook::new();
    while let Some(step) = sim.step().unwrap() {
        shadow.submit(step.order).unwrap();
        assert_eq!(step.spread, shadow.spread());
        if let Some(spread) = step.spread {
            assert!(spread > Decimal::ZERO);
        }
        if step.placed_at.0 == 100 {
            break;
        }
    }
    assert_eq!(sim.book(), &shadow);
}

#[test]
fn same_seed_same_report() {
    let a = Simulation::new(seeded(2024)).unwrap().run().unwrap();
    let b = Simulation::new(seeded(2024)).unwrap().run().unwrap();
    assert_eq!(a, b);

    let c = Simulation::new(seeded(2025)).unwrap().run().unwrap();
    assert_ne!(a.book_root, c.book_root);
}

#[test]
fn report_root_matches_final_book() {
    let config = seeded(55);
    let mut sim = Simulation::new(config.clone()).unwrap();
    let report = sim.run().unwrap();
    assert_eq!(report.book_root, book_root_hex(sim.book()));

    // Replaying the same random stream by hand lands on the same book.
    let mut source = RandomOrderSource::new(&config).unwrap();
    let mut book = OrderBook::new();
    for _ in 0..config.order_count {
        book.submit(source.next_order().unwrap()).unwrap();
    }
    assert_eq!(&book, sim.book());
}

#[test]
fn json_replay_walkthrough() {
    let source = ReplaySource::from_json_str(
        r#"[
            {"placed_at": 1, "order_type": "Market", "side": "Buy"},
            {"placed_at": 2, "order_type": "Limit",  "side": "Buy",  "price": "75.00"},
            {"placed_at": 3, "order_type": "Limit",  "side": "Sell", "price": "76.00"},
            {"placed_at": 4, "order_type": "Limit",  "side": "Buy",  "price": "75.50"},
            {"placed_at": 5, "order_type": "Limit",  "side": "Sell", "price": "75.50"},
            {"placed_at": 6, "order_type": "Market", "side": "Sell"}
        ]"#,
    )
    .unwrap();
    let config = SimulationConfig {
        order_count: 10,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::with_source(config, source).unwrap();
    let report = sim.run().unwrap();

    assert_eq!(report.steps.len(), 6);
    assert!(report.steps[0].mutation.is_dropped());
    assert_eq!(report.steps[2].spread, Some(dec(100)));
    assert_eq!(
        report.steps[3].mutation,
        BookMutation::Rested {
            side: OrderSide::Buy,
            entry: BookEntry::new(dec(7550), Timestamp(4)),
            position: 0,
        }
    );
    // Sell at 75.50 hits the 75.50 bid placed at t=4.
    let BookMutation::Matched(exec) = report.steps[4].mutation else {
        panic!("expected a match at t=5");
    };
    assert_eq!(exec.resting, BookEntry::new(dec(7550), Timestamp(4)));
    // Market sell takes the remaining 75.00 bid.
    assert!(report.steps[5].mutation.is_matched());

    assert!(report.final_book.bids.is_empty());
    assert_eq!(
        report.final_book.asks,
        vec![BookEntry::new(dec(7600), Timestamp(3))]
    );
    assert_eq!((report.matched, report.rested, report.dropped), (2, 3, 1));
}

#[test]
fn report_serializes_to_json() {
    let config = SimulationConfig {
        order_count: 5,
        ..seeded(1)
    };
    let report = Simulation::new(config).unwrap().run().unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["steps"].as_array().unwrap().len(), 5);
    assert_eq!(json["clearing"]["outcome"], "no_equilibrium");
    assert_eq!(json["book_root"].as_str().unwrap().len(), 64);
}

#[test]
fn config_file_drives_run() {
    let dir = std::env::temp_dir().join(format!("unitbook-sim-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{"order_count": 12, "seed": 9, "market_order_probability": 0.0, "clear_at_end": false}"#,
    )
    .unwrap();

    let config = SimulationConfig::from_path(&path).unwrap();
    let report = Simulation::new(config).unwrap().run().unwrap();
    assert_eq!(report.steps.len(), 12);
    assert_eq!(report.dropped, 0);
    assert!(report.steps.iter().all(|s| !s.order.is_market()));
    assert_eq!(report.clearing, None);

    std::fs::remove_dir_all(&dir).unwrap();
}
