//! Audit logging for assembled fact bundles
//!
//! Every request into the facts layer is recorded with an integrity hash,
//! so a downstream explanation can always be traced back to the exact
//! deterministic facts it was generated from.

use crate::error::{FactsError, Result};
use crate::models::{FactsBundle, FactsRequest};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::Write;
use std::sync::RwLock;
use uuid::Uuid;

/// One audited request/bundle pair.
#[derive(Debug, Clone)]
pub struct FactsRecord {
    pub audit_id: Uuid,
    pub request: FactsRequest,
    pub request_hash: String,
    pub bundle: FactsBundle,
    pub recorded_at: DateTime<Utc>,
}

/// In-memory audit trail, keyed by request id.
pub struct AuditLog {
    records: RwLock<HashMap<Uuid, FactsRecord>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Store a record
    pub fn record(&self, record: FactsRecord) -> Result<Uuid> {
        let audit_id = record.audit_id;
        let mut records = self
            .records
            .write()
            .map_err(|_| FactsError::AuditError("audit log lock poisoned".to_string()))?;
        records.insert(audit_id, record);
        Ok(audit_id)
    }

    /// Retrieve a record by audit ID
    pub fn get(&self, audit_id: Uuid) -> Result<Option<FactsRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| FactsError::AuditError("audit log lock poisoned".to_string()))?;
        Ok(records.get(&audit_id).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| FactsError::AuditError("audit log lock poisoned".to_string()))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Verify a record's integrity by recomputing its request hash.
    pub fn verify_integrity(&self, audit_id: Uuid) -> Result<bool> {
        let records = self
            .records
            .read()
            .map_err(|_| FactsError::AuditError("audit log lock poisoned".to_string()))?;

        match records.get(&audit_id) {
            Some(record) => Ok(compute_request_hash(&record.request) == record.request_hash),
            None => Ok(false),
        }
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA256 hash of a request, streamed into the hasher without an
/// intermediate String.
pub fn compute_request_hash(request: &FactsRequest) -> String {
    let mut hasher = Sha256::new();

    if serde_json::to_writer(&mut HashWriter(&mut hasher), request).is_err() {
        return String::new();
    }

    hex::encode(hasher.finalize())
}

/// Adapter to allow writing into Sha256 via std::io::Write
struct HashWriter<'a, H: Digest>(&'a mut H);

impl<'a, H: Digest> Write for HashWriter<'a, H> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

//
// ================= Tests =================
//

#[cfg(test)]
mod tests {
    use super::*;

    fn record_for(text: &str) -> FactsRecord {
        let request = FactsRequest::new(text);
        let request_hash = compute_request_hash(&request);
        FactsRecord {
            audit_id: request.request_id,
            request: request.clone(),
            request_hash,
            bundle: FactsBundle {
                request_id: request.request_id,
                topic: None,
                bank_policy: None,
                deposit: None,
                risk: None,
                reasoning_trace: vec![],
                assembled_at: Utc::now(),
            },
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_and_get() {
        let log = AuditLog::new();
        let record = record_for("HDFC home loan");
        let audit_id = log.record(record).unwrap();

        let fetched = log.get(audit_id).unwrap();
        assert!(fetched.is_some());
        assert_eq!(log.len().unwrap(), 1);
    }

    #[test]
    fn test_integrity_check() {
        let log = AuditLog::new();
        let record = record_for("apply for PF withdrawal");
        let audit_id = log.record(record).unwrap();

        assert!(log.verify_integrity(audit_id).unwrap());
        assert!(!log.verify_integrity(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn test_hash_is_stable_for_identical_request() {
        let request = FactsRequest::new("cheque bounce notice");
        assert_eq!(compute_request_hash(&request), compute_request_hash(&request));
    }
}
