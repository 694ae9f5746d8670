//! Receipts domain module: proof-of-purchase records and where they are kept.

pub mod receipt;

pub use receipt::{
    NewReceipt, PaymentMethod, Receipt, ReceiptFormat, ReceiptRecord, ReceiptStatus, ReceiptType,
};
