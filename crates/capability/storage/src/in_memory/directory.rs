//! 设备目录内存实现。

use crate::error::StorageError;
use crate::models::LocationMembers;
use crate::traits::DeviceDirectory;
use domain::{DeviceAttribute, RequestContext};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Directory {
    groups: HashMap<String, Vec<String>>,
    locations: HashMap<String, LocationMembers>,
    attributes: HashMap<String, Vec<DeviceAttribute>>,
}

pub struct InMemoryDeviceDirectory {
    inner: RwLock<Directory>,
}

impl InMemoryDeviceDirectory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Directory::default()),
        }
    }

    pub fn with_group(self, group_id: &str, device_ids: &[&str]) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.groups.insert(
                group_id.to_string(),
                device_ids.iter().map(|id| id.to_string()).collect(),
            );
        }
        self
    }

    pub fn with_location(self, location_id: &str, device_ids: &[&str], group_ids: &[&str]) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.locations.insert(
                location_id.to_string(),
                LocationMembers {
                    device_ids: device_ids.iter().map(|id| id.to_string()).collect(),
                    device_group_ids: group_ids.iter().map(|id| id.to_string()).collect(),
                },
            );
        }
        self
    }

    pub fn with_attribute(self, device_id: &str, attribute: DeviceAttribute) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner
                .attributes
                .entry(device_id.to_string())
                .or_default()
                .push(attribute);
        }
        self
    }
}

impl Default for InMemoryDeviceDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DeviceDirectory for InMemoryDeviceDirectory {
    async fn list_group_devices(
        &self,
        _ctx: &RequestContext,
        device_group_id: &str,
    ) -> Result<Vec<String>, StorageError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(inner.groups.get(device_group_id).cloned().unwrap_or_default())
    }

    async fn find_location_members(
        &self,
        _ctx: &RequestContext,
        location_id: &str,
    ) -> Result<LocationMembers, StorageError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(inner.locations.get(location_id).cloned().unwrap_or_default())
    }

    async fn list_device_attributes(
        &self,
        _ctx: &RequestContext,
        device_ids: &[String],
    ) -> Result<HashMap<String, Vec<DeviceAttribute>>, StorageError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut result = HashMap::new();
        for id in device_ids {
            if let Some(attributes) = inner.attributes.get(id) {
                result.insert(id.clone(), attributes.clone());
            }
        }
        Ok(result)
    }
}
