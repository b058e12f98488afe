//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered employees. `code` and `cpf` carry unique constraints
    /// (`employees_code_key`, `employees_cpf_key`).
    employees (id) {
        id -> Uuid,
        code -> Int4,
        name -> Varchar,
        #[max_length = 11]
        cpf -> Varchar,
        /// `active` or `inactive`.
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only ticket ledger.
    tickets (id) {
        id -> Uuid,
        quantity -> Int4,
        employee_id -> Uuid,
        /// Employee code captured at issue time.
        employee_code -> Int4,
        status -> Text,
        delivered_at -> Timestamptz,
    }
}

diesel::joinable!(tickets -> employees (employee_id));

diesel::allow_tables_to_appear_in_same_query!(employees, tickets);
