//! `PostgreSQL` repository implementation for payload parameter lookups.

use super::{
    models::ParameterInstanceRow,
    schema::{c2profile, c2profileparameters, c2profileparametersinstance, payload},
};
use crate::redirect_check::{
    domain::{
        ParameterDefinition, ParameterInstance, PayloadId, PayloadUuid, ProfileId, ProfileName,
        ProfileRef,
    },
    ports::{PayloadParameterRepository, PayloadRepositoryError, PayloadRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by payload parameter adapters.
pub type PayloadPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed payload parameter repository.
#[derive(Debug, Clone)]
pub struct PostgresPayloadParameters {
    pool: PayloadPgPool,
}

impl PostgresPayloadParameters {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PayloadPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PayloadRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PayloadRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PayloadRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PayloadRepositoryError::persistence)?
    }
}

#[async_trait]
impl PayloadParameterRepository for PostgresPayloadParameters {
    async fn find_payload_id(
        &self,
        uuid: &PayloadUuid,
    ) -> PayloadRepositoryResult<Option<PayloadId>> {
        let uuid_str = uuid.as_str().to_owned();
        self.run_blocking(move |connection| {
            let id = payload::table
                .filter(payload::uuid.eq(&uuid_str))
                .select(payload::id)
                .first::<i32>(connection)
                .optional()
                .map_err(PayloadRepositoryError::persistence)?;
            Ok(id.map(PayloadId::new))
        })
        .await
    }

    async fn load_parameter_instances(
        &self,
        payload_id: Option<PayloadId>,
    ) -> PayloadRepositoryResult<Vec<ParameterInstance>> {
        let Some(id) = payload_id else {
            return Ok(Vec::new());
        };

        self.run_blocking(move |connection| {
            let rows = c2profileparametersinstance::table
                .inner_join(c2profileparameters::table)
                .inner_join(c2profile::table)
                .filter(c2profileparametersinstance::payload_id.eq(id.into_inner()))
                .order(c2profileparametersinstance::id.asc())
                .select((
                    c2profile::id,
                    c2profile::name,
                    c2profileparameters::name,
                    c2profileparameters::parameter_type,
                    c2profileparameters::crypto_type,
                    c2profileparametersinstance::value,
                    c2profileparametersinstance::enc_key,
                    c2profileparametersinstance::dec_key,
                ))
                .load::<ParameterInstanceRow>(connection)
                .map_err(PayloadRepositoryError::persistence)?;
            Ok(map_rows(rows))
        })
        .await
    }
}

/// Maps joined rows to instances, skipping rows that cannot be represented.
fn map_rows(rows: Vec<ParameterInstanceRow>) -> Vec<ParameterInstance> {
    rows.into_iter()
        .filter_map(|row| {
            let profile_id = row.profile_id;
            let parameter_name = row.parameter_name.clone();
            match row_to_instance(row) {
                Ok(instance) => Some(instance),
                Err(err) => {
                    tracing::warn!(
                        profile_id,
                        parameter = %parameter_name,
                        error = %err,
                        "skipping unmappable profile parameter row"
                    );
                    None
                }
            }
        })
        .collect()
}

fn row_to_instance(row: ParameterInstanceRow) -> PayloadRepositoryResult<ParameterInstance> {
    let ParameterInstanceRow {
        profile_id,
        profile_name,
        parameter_name,
        parameter_type,
        crypto_type,
        value,
        enc_key,
        dec_key,
    } = row;

    let name =
        ProfileName::new(profile_name).map_err(PayloadRepositoryError::invalid_persisted_data)?;
    let definition = ParameterDefinition::new(parameter_name, parameter_type, crypto_type)
        .map_err(PayloadRepositoryError::invalid_persisted_data)?;
    let profile = ProfileRef::new(ProfileId::new(profile_id), name);

    Ok(ParameterInstance::new(profile, definition, value).with_keys(enc_key, dec_key))
}
