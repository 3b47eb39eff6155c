use sunmark_core::EnrichmentRecord;

use super::BackendClient;
use crate::error::ClientError;

impl BackendClient {
    /// Stores an enrichment record. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure and
    /// [`ClientError::UnexpectedStatus`] on a non-2xx status.
    pub async fn insert_data(&self, record: &EnrichmentRecord) -> Result<(), ClientError> {
        self.post_json(&self.insert_url, record).await?;
        Ok(())
    }
}
