//! Result Assembler subsystem
//!
//! Consumes store output (raw rows plus the resume marker) and produces a
//! [`ListResponse`]: typed records in store order and, when the store
//! signalled more data, a freshly encoded cursor.

mod assembler;
mod page;

pub use assembler::ResultAssembler;
pub use page::ListResponse;
