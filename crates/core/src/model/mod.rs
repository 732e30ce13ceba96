mod property;
mod question;
mod symbol;
mod table;

pub use property::{
    DEFAULT_PROPERTIES, DEFAULT_SYMBOL_COLUMN, PropertyError, PropertyName, TableSchema,
};
pub use question::{Answer, Question};
pub use symbol::{SymbolRecord, is_null_cell};
pub use table::{LoadError, SymbolTable};
