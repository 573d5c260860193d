use crate::domain::model::{Credentials, QuerySpec, Session, Target};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn inventory_path(&self) -> &Path;
    fn log_dir(&self) -> &Path;
    fn verify_tls(&self) -> bool;
    fn request_timeout_seconds(&self) -> Option<u64>;
}

/// REST surface of a fabric controller.
#[async_trait]
pub trait FabricApi: Send + Sync {
    async fn login(&self, target: &Target, credentials: &Credentials) -> Result<Session>;

    async fn query(
        &self,
        target: &Target,
        session: &Session,
        query: &QuerySpec,
    ) -> Result<serde_json::Value>;
}
