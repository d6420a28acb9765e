//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the migrations under `migrations/` exactly; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// Product catalog table.
    ///
    /// SKU uniqueness is enforced by the application's validation pass, not
    /// by a database constraint.
    products (id) {
        /// Primary key, assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        /// Stock-keeping unit code.
        sku -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Long-form description.
        description -> Varchar,
        /// Unit price; the validation pass requires at least 10.
        price -> Float8,
    }
}
