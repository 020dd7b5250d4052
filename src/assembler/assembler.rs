//! Result assembly
//!
//! Decodes raw store rows into typed records and issues the continuation
//! cursor. A page is all-or-nothing: one bad row fails the whole page.

use crate::cursor::CursorCodec;
use crate::model::{DecodeError, RawRow, Transaction, TransactionKey};

use super::page::ListResponse;

/// Builds response pages from store output
pub struct ResultAssembler;

impl ResultAssembler {
    /// Assembles a page.
    ///
    /// `new_position` is the store's resume marker; the empty key means the
    /// range is exhausted and no cursor is issued. Row order is kept.
    pub fn assemble(
        rows: &[RawRow],
        new_position: &TransactionKey,
    ) -> Result<ListResponse, DecodeError> {
        Ok(ListResponse {
            items: Self::decode_rows(rows)?,
            cursor: CursorCodec::encode(new_position),
        })
    }

    /// Decodes rows in order, naming the first row that fails
    pub fn decode_rows(rows: &[RawRow]) -> Result<Vec<Transaction>, DecodeError> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                Transaction::from_attributes(row).map_err(|error| DecodeError::Row { index, error })
            })
            .collect()
    }
}
