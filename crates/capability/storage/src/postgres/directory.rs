//! Postgres 设备目录实现
//!
//! 表结构：
//! - device_group_device(device_group_id, device_id)
//! - location_device(location_id, device_id)
//! - location_device_group(location_id, device_group_id)
//! - device_attribute(device_id, key, value, origin)

use crate::error::StorageError;
use crate::models::LocationMembers;
use crate::traits::DeviceDirectory;
use domain::{DeviceAttribute, RequestContext};
use sqlx::{PgPool, Row};
use std::collections::HashMap;

pub struct PgDeviceDirectory {
    pub pool: PgPool,
}

impl PgDeviceDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DeviceDirectory for PgDeviceDirectory {
    async fn list_group_devices(
        &self,
        _ctx: &RequestContext,
        device_group_id: &str,
    ) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query(
            "select device_id from device_group_device \
             where device_group_id = $1 \
             order by device_id",
        )
        .bind(device_group_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| row.try_get("device_id").map_err(StorageError::from))
            .collect()
    }

    async fn find_location_members(
        &self,
        _ctx: &RequestContext,
        location_id: &str,
    ) -> Result<LocationMembers, StorageError> {
        let device_rows = sqlx::query(
            "select device_id from location_device \
             where location_id = $1 \
             order by device_id",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;
        let group_rows = sqlx::query(
            "select device_group_id from location_device_group \
             where location_id = $1 \
             order by device_group_id",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;
        let mut members = LocationMembers::default();
        for row in device_rows {
            members.device_ids.push(row.try_get("device_id")?);
        }
        for row in group_rows {
            members.device_group_ids.push(row.try_get("device_group_id")?);
        }
        Ok(members)
    }

    async fn list_device_attributes(
        &self,
        _ctx: &RequestContext,
        device_ids: &[String],
    ) -> Result<HashMap<String, Vec<DeviceAttribute>>, StorageError> {
        if device_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query(
            "select device_id, key, value, origin from device_attribute \
             where device_id = any($1)",
        )
        .bind(device_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut result: HashMap<String, Vec<DeviceAttribute>> = HashMap::new();
        for row in rows {
            let device_id: String = row.try_get("device_id")?;
            let value: Option<String> = row.try_get("value")?;
            let origin: Option<String> = row.try_get("origin")?;
            result.entry(device_id).or_default().push(DeviceAttribute {
                key: row.try_get("key")?,
                value: value.unwrap_or_default(),
                origin: origin.unwrap_or_default(),
            });
        }
        Ok(result)
    }
}
