pub mod parser;

pub use parser::{Query, QueryNode, QueryParser, parse_query};
