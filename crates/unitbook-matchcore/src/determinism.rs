//! Book-state fingerprints for replay verification.
//!
//! Replaying the same order stream into a fresh book must leave the exact
//! same entries behind. The `book_root` is a SHA-256 over both sides that
//! lets two runs be compared without diffing full snapshots.

use sha2::{Digest, Sha256};
use unitbook_types::{BookEntry, constants};

use crate::OrderBook;

/// Compute the book root over both sides, best first.
///
/// Depends on:
/// - the number of entries on each side
/// - each entry's normalized price and timestamp, in queue order
///
/// Prices are normalized so `75.5` and `75.50` hash the same.
#[must_use]
pub fn compute_book_root(book: &OrderBook) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::BOOK_ROOT_DOMAIN);
    hash_side(&mut hasher, b"bids", book.bids());
    hash_side(&mut hasher, b"asks", book.asks());

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

fn hash_side<'a>(hasher: &mut Sha256, tag: &[u8], entries: impl Iterator<Item = &'a BookEntry>) {
    let entries: Vec<&BookEntry> = entries.collect();
    hasher.update(tag);
    hasher.update((entries.len() as u64).to_le_bytes());
    for entry in entries {
        hasher.update(entry.price.normalize().to_string().as_bytes());
        hasher.update([0u8]);
        hasher.update(entry.placed_at.0.to_le_bytes());
    }
}

/// Hex form of [`compute_book_root`], as printed in reports.
#[must_use]
pub fn book_root_hex(book: &OrderBook) -> String {
    hex::encode(compute_book_root(book))
}

/// Verify that a book matches an expected root.
#[must_use]
pub fn verify_book_root(book: &OrderBook, expected_root: &[u8; 32]) -> bool {
    compute_book_root(book) == *expected_root
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use unitbook_types::Timestamp;

    use super::*;

    fn entry(price: Decimal, ts: u64) -> BookEntry {
        BookEntry::new(price, Timestamp(ts))
    }

    #[test]
    fn empty_books_share_a_root() {
        assert_eq!(
            compute_book_root(&OrderBook::new()),
            compute_book_root(&OrderBook::new())
        );
    }

    #[test]
    fn same_entries_same_root() {
        let a = OrderBook::from_entries(vec![entry(Decimal::new(7500, 2), 1)], vec![]).unwrap();
        let b = OrderBook::from_entries(vec![entry(Decimal::new(75, 0), 1)], vec![]).unwrap();
        assert_eq!(compute_book_root(&a), compute_book_root(&b));
    }

    #[test]
    fn side_matters() {
        let bid = OrderBook::from_entries(vec![entry(Decimal::new(75, 0), 1)], vec![]).unwrap();
        let ask = OrderBook::from_entries(vec![], vec![entry(Decimal::new(75, 0), 1)]).unwrap();
        assert_ne!(compute_book_root(&bid), compute_book_root(&ask));
    }

    #[test]
    fn timestamp_matters() {
        let a = OrderBook::from_entries(vec![entry(Decimal::new(75, 0), 1)], vec![]).unwrap();
        let b = OrderBook::from_entries(vec![entry(Decimal::new(75, 0), 2)], vec![]).unwrap();
        assert_ne!(compute_book_root(&a), compute_book_root(&b));
    }

    #[test]
    fn verify_and_hex() {
        let book = OrderBook::from_entries(vec![], vec![entry(Decimal::new(76, 0), 3)]).unwrap();
        let root = compute_book_root(&book);
        assert!(verify_book_root(&book, &root));
        assert!(!verify_book_root(&book, &[0xAB; 32]));
        assert_eq!(book_root_hex(&book).len(), 64);
    }
}
