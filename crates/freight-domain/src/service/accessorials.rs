//! Accessorial serviceability

use freight_types::{Error, Result};
use tracing::debug;

use crate::model::CarrierCapability;

/// Reject any requested accessorial the carrier does not handle.
///
/// Codes listed as unserviceable are rejected, codes the carrier maps or
/// accepts unquoted pass, and unknown codes are rejected.
pub fn check_accessorials<S: AsRef<str>>(
    carrier: &CarrierCapability,
    requested: &[S],
) -> Result<()> {
    if requested.is_empty() {
        return Ok(());
    }

    let policy = &carrier.accessorials;
    let mut rejected: Vec<String> = Vec::new();

    for code in requested.iter().map(AsRef::as_ref) {
        let serviceable = !policy.unserviceable.contains(code)
            && (policy.mappable.contains_key(code) || policy.unquotable.contains(code));
        if !serviceable && !rejected.iter().any(|r| r == code) {
            rejected.push(code.to_string());
        }
    }

    if rejected.is_empty() {
        return Ok(());
    }

    debug!(
        carrier = carrier.name.as_str(),
        rejected = ?rejected,
        "unserviceable accessorials"
    );
    Err(Error::UnserviceableAccessorials {
        accessorials: rejected,
    })
}

/// Carrier codes for the requested accessorials, after checking them.
///
/// Unquotable accessorials have no carrier code and are left out.
pub fn map_accessorials<S: AsRef<str>>(
    carrier: &CarrierCapability,
    requested: &[S],
) -> Result<Vec<String>> {
    check_accessorials(carrier, requested)?;
    Ok(requested
        .iter()
        .filter_map(|code| carrier.accessorials.mappable.get(code.as_ref()).cloned())
        .collect())
}
