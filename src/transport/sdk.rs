//! RDS Data API transport over the AWS SDK.
//!
//! Credential and region resolution are left to `aws-config`'s default
//! provider chain; the connection string can only override the region and
//! the endpoint URL.

use super::messages::{
    BeginTransactionRequest, ColumnMetadata, EndTransactionRequest, ExecuteStatementRequest,
    ExecutionResult, TaggedValue,
};
use super::protocol::DataApiTransport;
use crate::connection::ConnectionParams;
use crate::error::TransportError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_rdsdata::config::Region;
use aws_sdk_rdsdata::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_rdsdata::primitives::Blob;
use aws_sdk_rdsdata::types::{Field, SqlParameter as SdkSqlParameter};
use aws_sdk_rdsdata::Client;

/// Transport backed by an `aws_sdk_rdsdata::Client`.
#[derive(Debug, Clone)]
pub struct SdkTransport {
    client: Client,
}

impl SdkTransport {
    /// Wrap an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Load the shared AWS configuration and build a client for `params`.
    pub async fn from_params(params: &ConnectionParams) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &params.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &params.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let config = loader.load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl DataApiTransport for SdkTransport {
    async fn begin_transaction(
        &self,
        request: &BeginTransactionRequest,
    ) -> Result<String, TransportError> {
        let output = self
            .client
            .begin_transaction()
            .resource_arn(&request.resource_arn)
            .secret_arn(&request.secret_arn)
            .database(&request.database)
            .send()
            .await
            .map_err(map_sdk_error)?;

        output
            .transaction_id()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                TransportError::InvalidResponse(
                    "BeginTransaction returned no transaction id".to_string(),
                )
            })
    }

    async fn commit_transaction(
        &self,
        request: &EndTransactionRequest,
    ) -> Result<String, TransportError> {
        let output = self
            .client
            .commit_transaction()
            .resource_arn(&request.resource_arn)
            .secret_arn(&request.secret_arn)
            .transaction_id(&request.transaction_id)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(output.transaction_status().unwrap_or_default().to_string())
    }

    async fn rollback_transaction(
        &self,
        request: &EndTransactionRequest,
    ) -> Result<String, TransportError> {
        let output = self
            .client
            .rollback_transaction()
            .resource_arn(&request.resource_arn)
            .secret_arn(&request.secret_arn)
            .transaction_id(&request.transaction_id)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(output.transaction_status().unwrap_or_default().to_string())
    }

    async fn execute_statement(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<ExecutionResult, TransportError> {
        let parameters = request
            .parameters
            .iter()
            .map(|p| {
                SdkSqlParameter::builder()
                    .name(&p.name)
                    .value(to_field(&p.value))
                    .build()
            })
            .collect::<Vec<_>>();

        let output = self
            .client
            .execute_statement()
            .resource_arn(&request.resource_arn)
            .secret_arn(&request.secret_arn)
            .database(&request.database)
            .sql(&request.sql)
            .set_parameters(Some(parameters))
            .include_result_metadata(request.include_result_metadata)
            .set_transaction_id(request.transaction_id.clone())
            .send()
            .await
            .map_err(map_sdk_error)?;

        let columns = output
            .column_metadata()
            .iter()
            .map(|c| {
                ColumnMetadata::new(
                    c.name().unwrap_or_default(),
                    c.type_name().unwrap_or_default(),
                )
            })
            .collect();

        let records = output
            .records()
            .iter()
            .map(|row| row.iter().map(from_field).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExecutionResult {
            columns,
            records,
            rows_updated: output.number_of_records_updated(),
        })
    }
}

fn to_field(value: &TaggedValue) -> Field {
    match value {
        TaggedValue::Null => Field::IsNull(true),
        TaggedValue::Blob(bytes) => Field::BlobValue(Blob::new(bytes.clone())),
        TaggedValue::Boolean(b) => Field::BooleanValue(*b),
        TaggedValue::Double(d) => Field::DoubleValue(*d),
        TaggedValue::Long(l) => Field::LongValue(*l),
        TaggedValue::String(s) => Field::StringValue(s.clone()),
    }
}

fn from_field(field: &Field) -> Result<TaggedValue, TransportError> {
    match field {
        Field::IsNull(true) => Ok(TaggedValue::Null),
        Field::BlobValue(blob) => Ok(TaggedValue::Blob(blob.as_ref().to_vec())),
        Field::BooleanValue(b) => Ok(TaggedValue::Boolean(*b)),
        Field::DoubleValue(d) => Ok(TaggedValue::Double(*d)),
        Field::LongValue(l) => Ok(TaggedValue::Long(*l)),
        Field::StringValue(s) => Ok(TaggedValue::String(s.clone())),
        other => Err(TransportError::InvalidResponse(format!(
            "unsupported field type: {:?}",
            other
        ))),
    }
}

/// Service errors keep the service's own message; anything that never
/// reached the service becomes `Dispatch`.
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> TransportError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::ServiceError(context) => {
            let err = context.into_err();
            let message = err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
            TransportError::Service {
                code: err.code().map(str::to_string),
                message,
            }
        }
        other => TransportError::Dispatch(DisplayErrorContext(&other).to_string()),
    }
}
