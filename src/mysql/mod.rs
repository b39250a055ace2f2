// MySQL module - `mysql_async` implementation of the connection boundary
//
// - config: Pool options and construction
// - params: Conversion between middleware values and `mysql_async::Value`
// - query: Result extraction and building
// - executor: Statement execution for pools and single shared connections

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{MySqlOptions, MySqlOptionsBuilder};
pub use executor::{MySqlConnection, run_query};
pub use params::{Params, from_mysql_value, to_mysql_value};
pub use query::build_result_set;
