//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module is static. User input is never interpolated; any
//! values are passed with `.bind()` or through the DSL filters around these
//! fragments.

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::{Double, Nullable};

/// Average of `ratings.value` as a double, or NULL when there are no rows.
///
/// Diesel's `avg()` on an integer column yields `Numeric`, which would need
/// an arbitrary-precision decimal type on the Rust side just to turn it
/// into a float for the response.
///
/// # Safety
/// Static SQL string with no user input.
pub fn avg_rating() -> SqlLiteral<Nullable<Double>> {
    sql::<Nullable<Double>>("AVG(ratings.value)::float8")
}
