//! Cursor codec
//!
//! Turns the store's resume position (a [`TransactionKey`]) into an opaque
//! token that is safe to embed as a query-string value, and back.
//!
//! [`TransactionKey`]: crate::model::TransactionKey

mod codec;

pub use codec::{CursorCodec, MAX_CURSOR_LEN};
