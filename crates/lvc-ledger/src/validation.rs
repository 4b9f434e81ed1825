use lvc_crypto::ContentHasher;
use lvc_store::ObjectStore;
use lvc_types::ObjectId;
use serde::Serialize;
use tracing::debug;

use crate::chain::CommitChain;
use crate::error::{LedgerError, LedgerResult};
use crate::record::StoredCommit;

/// Result of verifying the whole commit chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Commits that were read and parsed.
    pub commits: usize,
    pub violations: Vec<Violation>,
}

impl VerifyReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub commit: ObjectId,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    HashMismatch,
    /// A parent pointer leads back to a commit already walked.
    Cycle,
    MissingCommit,
    CorruptCommit,
    MissingBlob,
}

/// Commit chain integrity validator.
pub struct ChainValidator;

impl ChainValidator {
    /// Walk the chain from HEAD and check every commit.
    ///
    /// Problems with the stored data become [`Violation`]s; only failures to
    /// reach the stores at all are returned as errors.
    pub fn verify(chain: &CommitChain) -> LedgerResult<VerifyReport> {
        let mut violations = Vec::new();
        let mut commits: Vec<StoredCommit> = Vec::new();

        for item in chain.history()? {
            match item {
                Ok(stored) => commits.push(stored),
                Err(LedgerError::MissingCommit { id, referenced_by }) => {
                    let description = match referenced_by {
                        Some(child) => format!("parent of {child} is not in the object store"),
                        None => "HEAD names a commit that is not in the object store".into(),
                    };
                    violations.push(Violation {
                        commit: id,
                        kind: ViolationKind::MissingCommit,
                        description,
                    });
                }
                Err(LedgerError::Cycle { id, referenced_by }) => {
                    let from = referenced_by.map_or_else(|| "HEAD".into(), |c| c.to_string());
                    violations.push(Violation {
                        commit: id,
                        kind: ViolationKind::Cycle,
                        description: format!("reached again from {from}"),
                    });
                }
                Err(LedgerError::CorruptCommit { id, reason }) => {
                    violations.push(Violation {
                        commit: id,
                        kind: ViolationKind::CorruptCommit,
                        description: reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let objects = chain.objects();
        for stored in &commits {
            if !ContentHasher::verify(&stored.raw, &stored.id) {
                violations.push(Violation {
                    commit: stored.id,
                    kind: ViolationKind::HashMismatch,
                    description: format!(
                        "stored bytes hash to {}",
                        ContentHasher::hash(&stored.raw)
                    ),
                });
            }

            for entry in &stored.record.files {
                if !objects.exists(&entry.id)? {
                    violations.push(Violation {
                        commit: stored.id,
                        kind: ViolationKind::MissingBlob,
                        description: format!(
                            "{} -> {} is not in the object store",
                            entry.path, entry.id
                        ),
                    });
                }
            }
        }

        debug!(
            commits = commits.len(),
            violations = violations.len(),
            "chain verified"
        );
        Ok(VerifyReport {
            commits: commits.len(),
            violations,
        })
    }
}

impl CommitChain {
    /// Verify the chain. See [`ChainValidator::verify`].
    pub fn verify(&self) -> LedgerResult<VerifyReport> {
        ChainValidator::verify(self)
    }
}
