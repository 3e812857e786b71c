mod order_book;
mod side;

pub use order_book::{BookLevel, OrderBook, OrderBooks};
pub use side::{BookSide, Side};
