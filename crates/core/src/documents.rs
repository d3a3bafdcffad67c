//! Embedded document status constants.
//!
//! These must match the `status` field of entries in a process record's
//! `documents_json` column.

/// Document requested from the employee, nothing uploaded yet.
pub const DOCUMENT_PENDING: &str = "pending";
/// Document uploaded by the employee.
pub const DOCUMENT_SUBMITTED: &str = "submitted";
/// Document waiting for an HR reviewer.
pub const DOCUMENT_PENDING_REVIEW: &str = "pending_review";
/// Document accepted by HR.
pub const DOCUMENT_APPROVED: &str = "approved";
/// Document rejected; the employee must re-submit.
pub const DOCUMENT_REJECTED: &str = "rejected";

/// All valid embedded-document status values.
pub const VALID_DOCUMENT_STATUSES: &[&str] = &[
    DOCUMENT_PENDING,
    DOCUMENT_SUBMITTED,
    DOCUMENT_PENDING_REVIEW,
    DOCUMENT_APPROVED,
    DOCUMENT_REJECTED,
];

/// The document checklist attached to every new onboarding process, as
/// `(name, required)` pairs.
pub const DEFAULT_ONBOARDING_DOCUMENTS: &[(&str, bool)] = &[
    ("Signed contract", true),
    ("Identity document", true),
    ("Tax form", true),
    ("Bank details", false),
];
