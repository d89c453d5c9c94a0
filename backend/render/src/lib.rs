//! Presentation layer: turns one stored `BillRecord` into the display
//! model the dashboard renders, tolerating partially missing data.

pub mod display;

pub use display::{
    format_amount, render, BankBlock, BillDisplay, DisplayModel, HeaderBlock, ItemRow,
    TotalsBlock, VendorBlock,
};
