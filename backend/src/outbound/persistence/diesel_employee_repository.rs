//! PostgreSQL-backed `EmployeeRepository`.

use async_trait::async_trait;
use diesel::dsl;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    EmployeeFilter, EmployeeLookup, EmployeeRepository, EmployeeRepositoryError,
};
use crate::domain::{
    Cpf, Employee, EmployeeCode, EmployeeDraft, EmployeeId, EmployeeName, RecordStatus,
};

use super::diesel_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_field,
};
use super::models::{EmployeeRow, EmployeeUpdate, NewEmployeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::employees;

type EmployeeQuery = employees::BoxedQuery<'static, Pg, dsl::AsSelect<EmployeeRow, Pg>>;

/// Diesel implementation of the employee storage port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EmployeeRepositoryError {
    map_basic_pool_error(error, EmployeeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EmployeeRepositoryError {
    match unique_violation_field(&error) {
        Some(field) => EmployeeRepositoryError::conflict(field),
        None => map_basic_diesel_error(
            error,
            EmployeeRepositoryError::query,
            EmployeeRepositoryError::connection,
        ),
    }
}

fn row_to_employee(row: EmployeeRow) -> Result<Employee, EmployeeRepositoryError> {
    let invalid = |err: &dyn std::fmt::Display| {
        EmployeeRepositoryError::query(format!("invalid employee row {}: {err}", row.id))
    };
    let code = EmployeeCode::new(i64::from(row.code)).map_err(|err| invalid(&err))?;
    let name = EmployeeName::new(&row.name).map_err(|err| invalid(&err))?;
    let cpf = Cpf::new(row.cpf.clone()).map_err(|err| invalid(&err))?;
    let status = row
        .status
        .parse::<RecordStatus>()
        .map_err(|err| invalid(&err))?;
    Ok(Employee::new(EmployeeDraft {
        id: EmployeeId::from_uuid(row.id),
        code,
        name,
        cpf,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn employee_rows() -> EmployeeQuery {
    employees::table
        .select(EmployeeRow::as_select())
        .into_boxed()
}

fn find_query(lookup: &EmployeeLookup) -> EmployeeQuery {
    let query = employee_rows();
    match lookup {
        EmployeeLookup::Id(id) => query.filter(employees::id.eq(*id.as_uuid())),
        EmployeeLookup::Cpf(cpf) => query.filter(employees::cpf.eq(cpf.as_ref().to_owned())),
        EmployeeLookup::Code(code) => query.filter(employees::code.eq(code.value())),
    }
}

fn list_query(filter: &EmployeeFilter) -> EmployeeQuery {
    let mut query = employee_rows().order((employees::name.asc(), employees::code.asc()));
    if let Some(status) = filter.status {
        query = query.filter(employees::status.eq(status.as_str()));
    }
    if let Some(ids) = &filter.ids {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        query = query.filter(employees::id.eq_any(ids));
    }
    query
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn find(
        &self,
        lookup: &EmployeeLookup,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = find_query(lookup)
            .first::<EmployeeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_employee).transpose()
    }

    async fn highest_code(&self) -> Result<Option<EmployeeCode>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let highest: Option<i32> = employees::table
            .select(dsl::max(employees::code))
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        highest
            .map(|code| {
                EmployeeCode::new(i64::from(code)).map_err(|err| {
                    EmployeeRepositoryError::query(format!("invalid stored code: {err}"))
                })
            })
            .transpose()
    }

    async fn list(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EmployeeRow> = list_query(filter)
            .load(&mut conn).await.map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_employee).collect()
    }

    async fn create(&self, employee: &Employee) -> Result<(), EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEmployeeRow {
            id: *employee.id().as_uuid(),
            code: employee.code().value(),
            name: employee.name().as_ref(),
            cpf: employee.cpf().as_ref(),
            status: employee.status().as_str(),
            created_at: employee.created_at(),
            updated_at: employee.updated_at(),
        };

        diesel::insert_into(employees::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, employee: &Employee) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = EmployeeUpdate {
            name: employee.name().as_ref(),
            cpf: employee.cpf().as_ref(),
            status: employee.status().as_str(),
            updated_at: employee.updated_at(),
        };

        let updated = diesel::update(employees::table.find(*employee.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }
}
